use super::constant::{DEFAULT_PAIRING_TIMEOUT, PROBE_PORTS, TOKEN_PORT, WS_PREFIX};
use super::remote::WsConnector;
use super::token::{FileTokenStore, TokenHandle, TokenStore};
use super::{ResultCode, Result};

use std::sync::Arc;
use std::time::Duration;

/// One connection attempt against one port of a TV
#[derive(Debug, Clone)]
pub struct ProbeTarget {
    pub host: String,
    pub port: u16,
    /// Client name shown in the TV's device list
    pub name: String,
    /// Token slot, only ever set for the token port
    pub token: Option<TokenHandle>,
}

/// Opens and closes a remote-control connection. Implementations may block.
pub trait Connector: Send + Sync {
    fn open(&self, target: &ProbeTarget, timeout: Duration) -> Result<()>;
}

/// Result of [`Prober::probe()`]
///
/// `port` is the working port when `result` is [`ResultCode::Success`] and 0 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub result: ResultCode,
    pub port: u16,
}

impl ProbeOutcome {
    pub(crate) fn success(port: u16) -> Self {
        Self {
            result: ResultCode::Success,
            port,
        }
    }

    pub(crate) fn failed() -> Self {
        Self {
            result: ResultCode::NotSuccessful,
            port: 0,
        }
    }
}

/// Finds a remote-control port that accepts connections
///
/// Ports are tried in order and the first one that opens wins. The probe uses
/// blocking socket I/O, so async callers should run it on a blocking thread.
#[derive(Clone)]
pub struct Prober {
    connector: Arc<dyn Connector>,
    tokens: Arc<dyn TokenStore>,
    ports: Vec<u16>,
    timeout: Duration,
}

impl Prober {
    pub fn new(connector: Arc<dyn Connector>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            connector,
            tokens,
            ports: PROBE_PORTS.to_vec(),
            timeout: Duration::from_secs(DEFAULT_PAIRING_TIMEOUT),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn ports(&self) -> &[u16] {
        &self.ports
    }

    fn token_for(&self, host: &str, port: u16) -> Option<TokenHandle> {
        if port != TOKEN_PORT {
            return None;
        }
        self.tokens.get_or_create(host)
    }

    /// Try each port in turn and report the first that works
    pub fn probe(&self, host: &str, name: &str) -> ProbeOutcome {
        for &port in &self.ports {
            log::debug!("Try config with port: {}", port);
            let target = ProbeTarget {
                host: host.to_string(),
                port,
                name: format!("{} {}", WS_PREFIX, name),
                token: self.token_for(host, port),
            };

            match self.connector.open(&target, self.timeout) {
                Ok(()) => {
                    log::debug!("Working config with port: {}", port);
                    return ProbeOutcome::success(port);
                }
                Err(e) => log::debug!("Failing config with port: {}, error: {}", port, e),
            }
        }

        ProbeOutcome::failed()
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new(Arc::new(WsConnector), Arc::new(FileTokenStore::default()))
    }
}
