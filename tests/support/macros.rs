/// REST descriptor body as served by a Tizen TV
macro_rules! device_desc {
    ($id:expr, $mac:expr, $name:expr, $model:expr, $token_auth:expr) => {
        serde_json::from_str::<serde_json::Value>(&format!(
            indoc::indoc! {r#"
            {{
                "device": {{
                    "FrameTVSupport": "false",
                    "GamePadSupport": "true",
                    "OS": "Tizen",
                    "PowerState": "on",
                    "TokenAuthSupport": "{}",
                    "VoiceSupport": "true",
                    "id": "{}",
                    "modelName": "{}",
                    "name": "{}",
                    "networkType": "wireless",
                    "type": "Samsung SmartTV",
                    "wifiMac": "{}"
                }},
                "id": "{}",
                "isSupport": "{{}}",
                "name": "{}",
                "remote": "1.0",
                "type": "Samsung SmartTV",
                "uri": "http://127.0.0.1:8001/api/v2/",
                "version": "2.0.25"
            }}"#},
            $token_auth, $id, $model, $name, $mac, $id, $name
        ))
        .unwrap()
    };
}

/// SmartThings device list item
macro_rules! st_device {
    ($id:expr, $name:expr, $label:expr, $kind:expr) => {
        serde_json::json!({
            "deviceId": $id,
            "name": $name,
            "label": $label,
            "type": $kind,
            "components": [],
        })
    };
}
