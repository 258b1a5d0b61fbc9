#![allow(dead_code)]

#[macro_use]
mod macros;

use tvprobe::{
    CloudApi, Connector, DeviceSummary, Error, ProbeTarget, Prober, Result, TokenHandle,
    TokenSlot, TokenStore,
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::sleep;
use warp::Filter;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use std::time::Duration;

pub fn init_logger() {
    if let Err(e) = pretty_env_logger::try_init() {
        log::warn!(target: "test::support", "Logger init() returned '{}'", e);
    }
}

/// What the simulated REST descriptor service answers
#[derive(Debug, Clone)]
pub enum Descriptor {
    Json(Value),
    Text(&'static str),
    Status(u16),
    Slow(Duration, Value),
}

impl Descriptor {
    async fn respond(&self) -> http::Response<String> {
        match self {
            Self::Json(value) => response(200, value.to_string()),
            Self::Text(text) => response(200, text.to_string()),
            Self::Status(code) => response(*code, "{}".into()),
            Self::Slow(delay, value) => {
                sleep(*delay).await;
                response(200, value.to_string())
            }
        }
    }
}

fn response(status: u16, body: String) -> http::Response<String> {
    http::Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(body)
        .unwrap()
}

/// Start a descriptor service on an ephemeral port and return its address
pub fn serve_descriptor(descriptor: Descriptor) -> SocketAddr {
    let descriptor = Arc::new(descriptor);
    let route = warp::path!("api" / "v2" / ..)
        .and(warp::get())
        .and_then(move || {
            let descriptor = descriptor.clone();
            async move { Ok::<_, Infallible>(descriptor.respond().await) }
        })
        .with(warp::log("test::support::descriptor"));

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

/// Connector that accepts a fixed set of ports and records every attempt
#[derive(Debug, Default)]
pub struct FakeConnector {
    accept: Vec<u16>,
    attempts: Mutex<Vec<ProbeTarget>>,
}

impl FakeConnector {
    pub fn accepting(ports: &[u16]) -> Arc<Self> {
        Arc::new(Self {
            accept: ports.to_vec(),
            attempts: Mutex::new(Vec::new()),
        })
    }

    pub fn attempted_ports(&self) -> Vec<u16> {
        self.attempts.lock().unwrap().iter().map(|t| t.port).collect()
    }

    pub fn attempts(&self) -> Vec<ProbeTarget> {
        self.attempts.lock().unwrap().clone()
    }
}

impl Connector for FakeConnector {
    fn open(&self, target: &ProbeTarget, _: Duration) -> Result<()> {
        self.attempts.lock().unwrap().push(target.clone());
        if self.accept.contains(&target.port) {
            Ok(())
        } else {
            Err(std::io::Error::from(std::io::ErrorKind::ConnectionRefused).into())
        }
    }
}

/// Connector whose first attempt blocks until the test releases it
///
/// Gives up after two seconds so a probe running on the runtime thread fails
/// instead of deadlocking the test.
pub struct GatedConnector {
    gate: Mutex<Receiver<()>>,
    threads: Mutex<Vec<ThreadId>>,
}

impl GatedConnector {
    pub fn new() -> (Arc<Self>, Sender<()>) {
        let (release, gate) = mpsc::channel();
        let connector = Arc::new(Self {
            gate: Mutex::new(gate),
            threads: Mutex::new(Vec::new()),
        });
        (connector, release)
    }

    /// Threads the attempts ran on
    pub fn threads(&self) -> Vec<ThreadId> {
        self.threads.lock().unwrap().clone()
    }
}

impl Connector for GatedConnector {
    fn open(&self, _: &ProbeTarget, _: Duration) -> Result<()> {
        self.threads.lock().unwrap().push(thread::current().id());
        match self.gate.lock().unwrap().recv_timeout(Duration::from_secs(2)) {
            Ok(()) => Ok(()),
            Err(_) => Err(Error::Timeout),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySlot(Mutex<Option<String>>);

impl TokenSlot for MemorySlot {
    fn load(&self) -> Option<String> {
        self.0.lock().unwrap().clone()
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.0.lock().unwrap() = Some(token.to_string());
        Ok(())
    }
}

/// In-memory token store that records which keys were requested
#[derive(Default)]
pub struct MemoryTokens {
    unavailable: bool,
    created: Mutex<Vec<String>>,
}

impl MemoryTokens {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A store whose backing storage cannot be created
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            unavailable: true,
            created: Mutex::new(Vec::new()),
        })
    }

    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }
}

impl TokenStore for MemoryTokens {
    fn get_or_create(&self, key: &str) -> Option<TokenHandle> {
        self.created.lock().unwrap().push(key.to_string());
        if self.unavailable {
            None
        } else {
            Some(Arc::new(MemorySlot::default()))
        }
    }
}

pub fn prober(connector: Arc<FakeConnector>, tokens: Arc<MemoryTokens>) -> Prober {
    Prober::new(connector, tokens)
}

/// How the fake cloud answers a health check
#[derive(Debug, Clone, Copy)]
pub enum Health {
    Online,
    Offline,
    Status(u16),
    /// Health checks and listings never answer
    Hang,
}

pub struct FakeCloud {
    health: Health,
    devices: Option<Vec<DeviceSummary>>,
    calls: AtomicUsize,
}

impl FakeCloud {
    pub fn new(health: Health) -> Arc<Self> {
        Arc::new(Self {
            health,
            devices: Some(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    /// `None` makes the device listing fail
    pub fn with_devices(devices: Option<Vec<DeviceSummary>>) -> Arc<Self> {
        Arc::new(Self {
            health: Health::Online,
            devices,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CloudApi for FakeCloud {
    async fn device_health(&self, _: &reqwest::Client, _: &str, _: &str) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.health {
            Health::Online => Ok(true),
            Health::Offline => Ok(false),
            Health::Status(code) => Err(tvprobe::ApiError::Status(code, String::new()).into()),
            Health::Hang => {
                sleep(Duration::from_secs(60)).await;
                Ok(true)
            }
        }
    }

    async fn devices(
        &self,
        _: &reqwest::Client,
        _: &str,
        _: Option<&str>,
    ) -> Result<Vec<DeviceSummary>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Health::Hang = self.health {
            sleep(Duration::from_secs(60)).await;
        }
        self.devices
            .clone()
            .ok_or_else(|| Error::Other("connection reset".into()))
    }
}

/// Random data helpers
pub mod rand_data {
    use rand::{distributions::Alphanumeric, Rng};

    pub fn string(len: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .map(char::from)
            .take(len)
            .collect()
    }

    pub fn uuid() -> String {
        let rand_string = string(32);
        format!(
            "{}-{}-{}-{}-{}",
            &rand_string[0..8],
            &rand_string[8..12],
            &rand_string[12..16],
            &rand_string[16..20],
            &rand_string[20..32]
        )
    }

    pub fn mac() -> String {
        let bytes: [u8; 6] = rand::random();
        bytes
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(":")
    }
}
