use super::constant::{TOKEN_PORT, WS_ENDPOINT_REMOTE_CONTROL, WS_EVENT_CONNECT};
use super::probe::{Connector, ProbeTarget};
use super::token::TokenHandle;
use super::{Error, Result};

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{json, Value};
use tungstenite::{client_tls_with_config, stream::MaybeTlsStream, Message, WebSocket};
use url::Url;

use std::fmt::Display;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

type Socket = WebSocket<MaybeTlsStream<TcpStream>>;

/// How a key is pressed in [`Remote::send_key()`]
#[derive(Debug, Clone, Copy)]
pub enum KeyCommand {
    /// Press and release once
    Click,
    /// Hold the key down
    Press,
    /// Release a held key
    Release,
}

impl Display for KeyCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cmd = match self {
            Self::Click => "Click",
            Self::Press => "Press",
            Self::Release => "Release",
        };
        write!(f, "{}", cmd)
    }
}

/// Blocking client for the TV's remote-control websocket channel
///
/// The connection is opened lazily and closed when the `Remote` is dropped. On
/// the token port the stored token is sent with the request, and any token the
/// TV hands out in its connect event is written back to the slot.
pub struct Remote {
    host: String,
    port: u16,
    name: String,
    token: Option<TokenHandle>,
    timeout: Option<Duration>,
    socket: Option<Socket>,
}

impl Remote {
    /// A zero `timeout` means wait forever
    pub fn new(target: &ProbeTarget, timeout: Duration) -> Self {
        Self {
            host: target.host.clone(),
            port: target.port,
            name: target.name.clone(),
            token: target.token.clone(),
            timeout: Some(timeout).filter(|t| !t.is_zero()),
            socket: None,
        }
    }

    pub fn is_ssl(&self) -> bool {
        self.port == TOKEN_PORT
    }

    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    pub(crate) fn url(&self) -> Result<Url> {
        let scheme = if self.is_ssl() { "wss" } else { "ws" };
        let mut url = Url::parse(&format!(
            "{}://{}:{}{}",
            scheme, self.host, self.port, WS_ENDPOINT_REMOTE_CONTROL
        ))?;
        url.query_pairs_mut()
            .append_pair("name", &STANDARD.encode(&self.name));

        if self.is_ssl() {
            if let Some(token) = self.token.as_ref().and_then(|slot| slot.load()) {
                url.query_pairs_mut().append_pair("token", &token);
            }
        }
        Ok(url)
    }

    /// Open the channel and wait for the TV to accept it
    ///
    /// On a TV that was never paired this blocks until the user answers the
    /// prompt on screen or the timeout runs out.
    pub fn open(&mut self) -> Result<()> {
        if self.socket.is_some() {
            return Ok(());
        }

        let url = self.url()?;
        log::debug!("WS url {}", url);

        let stream = self.connect_tcp()?;
        let connector = if self.is_ssl() {
            // TVs use self-signed certificates
            Some(tungstenite::Connector::NativeTls(
                native_tls::TlsConnector::builder()
                    .danger_accept_invalid_certs(true)
                    .danger_accept_invalid_hostnames(true)
                    .build()?,
            ))
        } else {
            None
        };

        let (mut socket, _) = client_tls_with_config(url.as_str(), stream, None, connector)?;

        let response = read_json(&mut socket)?;
        if response["event"] != WS_EVENT_CONNECT {
            let _ = socket.close(None);
            return Err(Error::connection_failure(response));
        }

        if let Some(token) = response["data"]["token"].as_str() {
            log::info!("New token received from {}", self.host);
            if let Some(slot) = &self.token {
                slot.save(token)?;
            }
        }

        self.socket = Some(socket);
        Ok(())
    }

    /// Send a remote key such as `KEY_POWER`, opening the channel if needed
    pub fn send_key(&mut self, key: &str, cmd: KeyCommand) -> Result<()> {
        log::debug!("Sending key {}", key);
        let payload = json!({
            "method": "ms.remote.control",
            "params": {
                "Cmd": cmd.to_string(),
                "DataOfCmd": key,
                "Option": "false",
                "TypeOfRemote": "SendRemoteKey",
            },
        });

        self.open()?;
        match self.socket.as_mut() {
            Some(socket) => Ok(socket.send(Message::Text(payload.to_string()))?),
            None => Err(Error::Other("Remote channel is not open".into())),
        }
    }

    pub fn close(&mut self) {
        if let Some(mut socket) = self.socket.take() {
            let _ = socket.close(None);
            let _ = socket.flush();
            log::debug!("Connection closed.");
        }
    }

    fn connect_tcp(&self) -> Result<TcpStream> {
        let mut last_err = None;
        for addr in (self.host.as_str(), self.port).to_socket_addrs()? {
            let res = match self.timeout {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };
            match res {
                Ok(stream) => {
                    stream.set_read_timeout(self.timeout)?;
                    stream.set_write_timeout(self.timeout)?;
                    return Ok(stream);
                }
                Err(e) => last_err = Some(e),
            }
        }

        Err(match last_err {
            Some(e) => e.into(),
            None => Error::host_not_found(self.host.clone()),
        })
    }
}

impl Drop for Remote {
    fn drop(&mut self) {
        self.close();
    }
}

/// Next text frame parsed as json, skipping control frames
fn read_json(socket: &mut Socket) -> Result<Value> {
    loop {
        match socket.read()? {
            Message::Text(text) => return Ok(serde_json::from_str(&text)?),
            Message::Close(_) => return Err(Error::connection_failure(Value::Null)),
            _ => continue,
        }
    }
}

/// [`Connector`] that opens a real [`Remote`] channel and closes it again
#[derive(Debug, Default, Clone, Copy)]
pub struct WsConnector;

impl Connector for WsConnector {
    fn open(&self, target: &ProbeTarget, timeout: Duration) -> Result<()> {
        let mut remote = Remote::new(target, timeout);
        remote.open()?;
        remote.close();
        Ok(())
    }
}
