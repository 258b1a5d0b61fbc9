use super::{CloudApi, DeviceSummary};
use crate::constant::SMARTTHINGS_API;
use crate::error::{ApiError, Error, Result};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// SmartThings REST client
#[derive(Debug, Clone)]
pub struct SmartThings {
    base_url: String,
}

impl SmartThings {
    pub fn new() -> Self {
        Self::with_base_url(SMARTTHINGS_API)
    }

    /// Point the client at another API root, e.g. a local test server
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API URL with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| Error::Other(format!("Invalid API root {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, session: &Client, api_key: &str, segments: &[&str]) -> Result<Value> {
        let res = session
            .get(self.endpoint(segments)?)
            .bearer_auth(api_key)
            .send()
            .await?;
        Ok(check_status(res).await?.json().await?)
    }
}

impl Default for SmartThings {
    fn default() -> Self {
        Self::new()
    }
}

async fn check_status(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(ApiError::Status(status.as_u16(), body).into())
}

#[derive(Deserialize)]
struct Health {
    state: Option<String>,
}

#[derive(Deserialize)]
struct DeviceList {
    #[serde(default)]
    items: Vec<DeviceItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeviceItem {
    device_id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    label: String,
    #[serde(rename = "type", default)]
    kind: String,
}

/// Samsung TVs are registered as OCF devices
const TV_DEVICE_TYPE: &str = "OCF";

#[async_trait]
impl CloudApi for SmartThings {
    async fn device_health(
        &self,
        session: &Client,
        api_key: &str,
        device_id: &str,
    ) -> Result<bool> {
        if device_id.is_empty() {
            return Ok(false);
        }

        let value = self
            .get(session, api_key, &["devices", device_id, "health"])
            .await?;
        let health: Health = serde_json::from_value(value)
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        match health.state {
            Some(state) => Ok(state.eq_ignore_ascii_case("online")),
            None => Err(ApiError::Malformed("missing 'state'".into()).into()),
        }
    }

    async fn devices(
        &self,
        session: &Client,
        api_key: &str,
        label: Option<&str>,
    ) -> Result<Vec<DeviceSummary>> {
        let value = self.get(session, api_key, &["devices"]).await?;
        let list: DeviceList =
            serde_json::from_value(value).map_err(|e| ApiError::Malformed(e.to_string()))?;

        Ok(list
            .items
            .into_iter()
            .filter(|item| item.kind == TV_DEVICE_TYPE)
            .filter(|item| match label {
                Some(label) if !label.is_empty() => item.label == label,
                _ => true,
            })
            .filter_map(|item| {
                let device_id = item.device_id?;
                Some(DeviceSummary {
                    device_id,
                    name: item.name,
                    label: item.label,
                })
            })
            .collect())
    }
}
