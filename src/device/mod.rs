mod descriptor;

pub use self::descriptor::DeviceDescriptor;

use super::cloud::{self, CloudApi, DeviceSummary, SmartThings};
use super::config::{within, Config, Timeouts};
use super::constant::{REST_PATH, REST_PORT};
use super::error::{ClientError, Result};
use super::probe::{ProbeOutcome, Prober};
use super::remote::WsConnector;
use super::token::FileTokenStore;
use super::ResultCode;

use reqwest::Client;
use serde_json::Value;

use std::sync::Arc;

/// URL of the TV's REST descriptor service
pub fn tv_url(host: &str, port: u16, address: &str) -> String {
    format!("http://{}:{}{}{}", host, port, REST_PATH, address)
}

/// Resolves identity and reachability of one TV during setup
///
/// [`get_device_info()`](Self::get_device_info) runs a fixed sequence of steps and
/// stops at the first one that fails:
///
/// 1. probe the remote-control ports,
/// 2. fetch the REST descriptor,
/// 3. if SmartThings credentials are given, check the device through the cloud.
#[derive(Clone)]
pub struct TvInfo {
    host: String,
    name: String,
    rest_port: u16,
    timeouts: Timeouts,
    prober: Prober,
    cloud: Arc<dyn CloudApi>,
    api_key: Option<String>,
    device_id: Option<String>,
}

impl TvInfo {
    /// Resolver with the default websocket prober, token directory and SmartThings client
    pub fn new<S: Into<String>>(host: S, name: S) -> Self {
        let timeouts = Timeouts::default();
        Self {
            host: host.into(),
            name: name.into(),
            rest_port: REST_PORT,
            timeouts,
            prober: Prober::default().with_timeout(timeouts.pairing()),
            cloud: Arc::new(SmartThings::new()),
            api_key: None,
            device_id: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let prober = Prober::new(
            Arc::new(WsConnector),
            Arc::new(FileTokenStore::new(config.token_dir())),
        )
        .with_timeout(config.timeouts.pairing());

        Self {
            host: config.host.clone(),
            name: config.name.clone(),
            rest_port: config.rest_port,
            timeouts: config.timeouts,
            prober,
            cloud: Arc::new(SmartThings::new()),
            api_key: config.api_key.clone(),
            device_id: config.device_id.clone(),
        }
    }

    pub fn with_prober(mut self, prober: Prober) -> Self {
        self.prober = prober;
        self
    }

    pub fn with_cloud(mut self, cloud: Arc<dyn CloudApi>) -> Self {
        self.cloud = cloud;
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.prober = self.prober.with_timeout(timeouts.pairing());
        self.timeouts = timeouts;
        self
    }

    pub fn with_rest_port(mut self, port: u16) -> Self {
        self.rest_port = port;
        self
    }

    pub fn host(&self) -> String {
        self.host.clone()
    }

    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// Probe the remote-control ports on a blocking thread
    pub async fn probe(&self) -> ProbeOutcome {
        let prober = self.prober.clone();
        let host = self.host.clone();
        let name = self.name.clone();

        match tokio::task::spawn_blocking(move || prober.probe(&host, &name)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Probe task for {} failed: {}", self.host, e);
                ProbeOutcome::failed()
            }
        }
    }

    async fn fetch_device(&self, session: &Client) -> Result<Value> {
        let url = tv_url(&self.host, self.rest_port, "");
        let info: Value = within(self.timeouts.descriptor(), async {
            session
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await
        })
        .await??;

        match info.get("device") {
            Some(device) if is_present(device) => Ok(device.clone()),
            _ => Err(ClientError::MissingDevice.into()),
        }
    }

    /// Probe the TV, read its descriptor and optionally check its cloud binding
    ///
    /// The descriptor is returned whenever it was fetched, even if the cloud
    /// check then fails. Without both `api_key` and `device_id` no cloud call is made.
    pub async fn get_device_info(
        &self,
        session: Option<&Client>,
        api_key: Option<&str>,
        device_id: Option<&str>,
    ) -> (ResultCode, Option<DeviceDescriptor>) {
        let session = match session {
            Some(session) => session,
            None => return (ResultCode::NotSuccessful, None),
        };

        let probe = self.probe().await;
        if !probe.result.is_success() {
            return (probe.result, None);
        }

        let device = match self.fetch_device(session).await {
            Ok(device) => device,
            Err(e) => {
                log::error!("Error getting HTTP info for TV {}: {}", self.host, e);
                return (ResultCode::NotSuccessful, None);
            }
        };

        let descriptor = match DeviceDescriptor::from_device(device, &self.name, probe.port) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                log::error!("Invalid device info from TV {}: {}", self.host, e);
                return (ResultCode::NotSuccessful, None);
            }
        };

        let result = match (non_empty(api_key), non_empty(device_id)) {
            (Some(api_key), Some(device_id)) => {
                cloud::check_health(
                    self.cloud.as_ref(),
                    session,
                    api_key,
                    device_id,
                    self.timeouts.health(),
                )
                .await
            }
            _ => ResultCode::Success,
        };

        (result, Some(descriptor))
    }

    /// [`get_device_info()`](Self::get_device_info) with the credentials from the [`Config`]
    pub async fn get_configured_info(
        &self,
        session: Option<&Client>,
    ) -> (ResultCode, Option<DeviceDescriptor>) {
        self.get_device_info(session, self.api_key.as_deref(), self.device_id.as_deref())
            .await
    }

    /// SmartThings TVs visible to `api_key`, empty on any failure
    pub async fn get_st_devices(
        &self,
        api_key: &str,
        session: &Client,
        label: Option<&str>,
    ) -> Vec<DeviceSummary> {
        cloud::list_devices(
            self.cloud.as_ref(),
            session,
            api_key,
            label,
            self.timeouts.list(),
        )
        .await
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => false,
    }
}
