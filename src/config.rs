use super::constant::{
    DEFAULT_DESCRIPTOR_TIMEOUT, DEFAULT_HEALTH_TIMEOUT, DEFAULT_LIST_TIMEOUT, DEFAULT_NAME,
    DEFAULT_PAIRING_TIMEOUT, REST_PORT,
};
use super::token::FileTokenStore;
use super::Result;

use serde::Deserialize;
use tokio::time::timeout;

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

/// Timeouts of each network step, in seconds. `0` waits without limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Opening a remote channel, including the on-screen pairing prompt
    pub pairing: u64,
    /// Fetching the REST descriptor
    pub descriptor: u64,
    /// Listing cloud devices
    pub list: u64,
    /// Cloud health check
    pub health: u64,
}

impl Timeouts {
    pub fn pairing(&self) -> Duration {
        Duration::from_secs(self.pairing)
    }

    pub fn descriptor(&self) -> Duration {
        Duration::from_secs(self.descriptor)
    }

    pub fn list(&self) -> Duration {
        Duration::from_secs(self.list)
    }

    pub fn health(&self) -> Duration {
        Duration::from_secs(self.health)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            pairing: DEFAULT_PAIRING_TIMEOUT,
            descriptor: DEFAULT_DESCRIPTOR_TIMEOUT,
            list: DEFAULT_LIST_TIMEOUT,
            health: DEFAULT_HEALTH_TIMEOUT,
        }
    }
}

/// Run `fut` to completion within `limit`, or without limit when it is zero
pub(crate) async fn within<F: Future>(limit: Duration, fut: F) -> Result<F::Output> {
    if limit.is_zero() {
        return Ok(fut.await);
    }
    Ok(timeout(limit, fut).await?)
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_rest_port() -> u16 {
    REST_PORT
}

/// Settings for one TV
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    /// Display name, also sent to the TV as the client name
    #[serde(default = "default_name")]
    pub name: String,
    /// SmartThings personal access token
    pub api_key: Option<String>,
    /// SmartThings device id of this TV
    pub device_id: Option<String>,
    /// Where pairing tokens are kept
    pub token_dir: Option<PathBuf>,
    #[serde(default = "default_rest_port")]
    pub rest_port: u16,
    #[serde(default)]
    pub timeouts: Timeouts,
}

impl Config {
    pub fn new<S: Into<String>>(host: S) -> Self {
        Self {
            host: host.into(),
            name: default_name(),
            api_key: None,
            device_id: None,
            token_dir: None,
            rest_port: REST_PORT,
            timeouts: Timeouts::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn token_dir(&self) -> PathBuf {
        self.token_dir
            .clone()
            .unwrap_or_else(FileTokenStore::default_dir)
    }
}
