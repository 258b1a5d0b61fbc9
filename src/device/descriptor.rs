use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Identity and capabilities reported by a TV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    uuid: Option<String>,
    mac_address: Option<String>,
    device_name: String,
    model: Option<String>,
    os_version: Option<String>,
    token_auth_supported: bool,
    working_port: u16,
}

impl DeviceDescriptor {
    /// Build a descriptor from the `device` object of the REST descriptor.
    ///
    /// `fallback_name` is used when the TV does not report a name.
    pub(crate) fn from_device(
        device: Value,
        fallback_name: &str,
        working_port: u16,
    ) -> Result<Self, serde_json::Error> {
        let raw = RawDevice::deserialize(device)?;

        Ok(Self {
            uuid: raw.id.map(|id| strip_uuid(&id).to_string()),
            mac_address: raw.wifi_mac,
            device_name: raw
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| fallback_name.to_string()),
            model: raw.model_name,
            os_version: raw.os,
            token_auth_supported: raw.token_auth_support,
            working_port,
        })
    }

    /// Device id without its `uuid:` prefix
    pub fn uuid(&self) -> Option<String> {
        self.uuid.clone()
    }

    /// Wifi MAC address
    pub fn mac_address(&self) -> Option<String> {
        self.mac_address.clone()
    }

    pub fn device_name(&self) -> String {
        self.device_name.clone()
    }

    pub fn model(&self) -> Option<String> {
        self.model.clone()
    }

    /// Operating system, usually "Tizen"
    pub fn os_version(&self) -> Option<String> {
        self.os_version.clone()
    }

    /// Whether the TV pairs with tokens on the secure port
    pub fn token_auth_supported(&self) -> bool {
        self.token_auth_supported
    }

    /// Remote-control port the prober connected on
    pub fn working_port(&self) -> u16 {
        self.working_port
    }
}

fn strip_uuid(id: &str) -> &str {
    id.strip_prefix("uuid:").unwrap_or(id)
}

#[derive(Deserialize)]
struct RawDevice {
    #[serde(default, deserialize_with = "parse_text")]
    id: Option<String>,
    #[serde(rename = "wifiMac", default, deserialize_with = "parse_text")]
    wifi_mac: Option<String>,
    #[serde(default, deserialize_with = "parse_text")]
    name: Option<String>,
    #[serde(rename = "modelName", default, deserialize_with = "parse_text")]
    model_name: Option<String>,
    #[serde(rename = "OS", default, deserialize_with = "parse_text")]
    os: Option<String>,
    #[serde(rename = "TokenAuthSupport", default, deserialize_with = "parse_flag")]
    token_auth_support: bool,
}

/// Firmware varies in how it types these fields; keep scalars as text
fn parse_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// TVs send `"true"`/`"false"` strings; accept real booleans and 0/1 as well
fn parse_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::String(flag) => flag.eq_ignore_ascii_case("true"),
        Value::Number(number) => number.as_u64().map_or(false, |n| n != 0),
        _ => false,
    })
}
