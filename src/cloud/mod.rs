mod smartthings;

pub use self::smartthings::SmartThings;

use super::config::within;
use super::{Error, ResultCode, Result};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use std::time::Duration;

/// A cloud-registered device as listed by [`CloudApi::devices()`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub device_id: String,
    pub name: String,
    pub label: String,
}

/// Device management API that can vouch for a TV
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// Whether `device_id` exists and is online
    async fn device_health(&self, session: &Client, api_key: &str, device_id: &str)
        -> Result<bool>;

    /// TVs visible to `api_key`, optionally only those with the given label
    async fn devices(
        &self,
        session: &Client,
        api_key: &str,
        label: Option<&str>,
    ) -> Result<Vec<DeviceSummary>>;
}

/// HTTP statuses that do not mean the key was rejected
///
/// SmartThings answers 400 for a malformed or foreign device id only after it
/// has accepted the key.
pub const CLOUD_STATUS_RESULTS: &[(u16, ResultCode)] = &[(400, ResultCode::StDeviceNotFound)];

/// Code for every cloud failure not listed in [`CLOUD_STATUS_RESULTS`]
pub const CLOUD_FALLBACK_RESULT: ResultCode = ResultCode::WrongApiKey;

/// Map a failed health check to its result code
pub fn classify_error(err: &Error) -> ResultCode {
    err.status()
        .and_then(|status| {
            CLOUD_STATUS_RESULTS
                .iter()
                .find(|(code, _)| *code == status)
                .map(|(_, result)| *result)
        })
        .unwrap_or(CLOUD_FALLBACK_RESULT)
}

/// Confirm the key is valid and the device is reachable through the cloud
pub async fn check_health(
    cloud: &dyn CloudApi,
    session: &Client,
    api_key: &str,
    device_id: &str,
    limit: Duration,
) -> ResultCode {
    log::debug!("Try connection to SmartThings TV with id [{}]", device_id);
    let res = within(limit, cloud.device_health(session, api_key, device_id))
        .await
        .and_then(|res| res);

    match res {
        Ok(true) => {
            log::debug!("Connection completed successfully.");
            ResultCode::Success
        }
        Ok(false) => {
            log::debug!("Connection not available.");
            ResultCode::StDeviceNotFound
        }
        Err(e) => {
            log::debug!("Failed connecting with SmartThings, error: {}", e);
            classify_error(&e)
        }
    }
}

/// List cloud TVs for a device picker. Failures give an empty list.
pub async fn list_devices(
    cloud: &dyn CloudApi,
    session: &Client,
    api_key: &str,
    label: Option<&str>,
    limit: Duration,
) -> Vec<DeviceSummary> {
    match within(limit, cloud.devices(session, api_key, label)).await {
        Ok(Ok(devices)) => devices,
        Ok(Err(e)) | Err(e) => {
            log::debug!("Failed connecting with SmartThings, error: {}", e);
            Vec::new()
        }
    }
}
