use std::fmt::Display;

use serde_json::Value;

/// Result for fallible operations inside the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Errors reported by the SmartThings cloud API
    Api(ApiError),
    /// Errors from the TV's local services
    Client(ClientError),
    /// Error from http client
    Reqwest(reqwest::Error),
    /// Error from the websocket transport
    WebSocket(tungstenite::Error),
    /// Error from std::io
    IO(std::io::Error),
    /// Error processing json
    Json(serde_json::Error),
    /// Error building a websocket url
    Url(url::ParseError),
    /// A step ran past its timeout
    Timeout,
    #[doc(hidden)]
    Other(String),
}

impl Error {
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    pub fn is_client(&self) -> bool {
        matches!(self, Error::Client(_))
    }

    pub fn is_reqwest(&self) -> bool {
        matches!(self, Error::Reqwest(_))
    }

    pub fn is_websocket(&self) -> bool {
        matches!(self, Error::WebSocket(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Error::IO(_))
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout => true,
            Error::Reqwest(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(ApiError::Status(code, _)) => Some(*code),
            Error::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn connection_failure(response: Value) -> Error {
        ClientError::ConnectionFailure(response).into()
    }

    pub fn host_not_found(host: String) -> Error {
        ClientError::HostNotFound(host).into()
    }
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Error::Api(e)
    }
}

impl From<ClientError> for Error {
    fn from(e: ClientError) -> Self {
        Error::Client(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Reqwest(e)
    }
}

impl From<tungstenite::Error> for Error {
    fn from(e: tungstenite::Error) -> Error {
        Error::WebSocket(e)
    }
}

impl<R: tungstenite::handshake::HandshakeRole> From<tungstenite::HandshakeError<R>> for Error {
    fn from(e: tungstenite::HandshakeError<R>) -> Error {
        match e {
            tungstenite::HandshakeError::Failure(e) => Error::WebSocket(e),
            tungstenite::HandshakeError::Interrupted(_) => {
                Error::Other("Websocket handshake interrupted".into())
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Json(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::IO(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        Error::Url(e)
    }
}

impl From<native_tls::Error> for Error {
    fn from(e: native_tls::Error) -> Error {
        Error::Other(format!("TLS setup failed: {}", e))
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Error {
        Error::Timeout
    }
}

impl From<String> for Error {
    fn from(e: String) -> Error {
        Error::Other(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api(e) => write!(f, "{}", e),
            Self::Client(e) => write!(f, "{}", e),
            Self::Reqwest(e) => write!(f, "{}", e),
            Self::WebSocket(e) => write!(f, "{}", e),
            Self::IO(e) => write!(f, "{}", e),
            Self::Json(e) => write!(f, "{}", e),
            Self::Url(e) => write!(f, "{}", e),
            Self::Timeout => write!(f, "Operation timed out"),
            Self::Other(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

/// Errors from the SmartThings cloud API
#[derive(Debug)]
pub enum ApiError {
    /// Non-success HTTP status with the response body
    Status(u16, String),
    /// Response did not have the expected shape
    Malformed(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Status(code, body) => write!(f, "SmartThings returned HTTP {}: '{}'", code, body),
            Self::Malformed(detail) => write!(f, "Unexpected SmartThings response: {}", detail),
        }
    }
}

/// Errors from the TV's local services
#[derive(Debug)]
pub enum ClientError {
    /// First websocket frame was not a channel connect event
    ConnectionFailure(Value),
    /// Descriptor response had no `device` object
    MissingDevice,
    /// Hostname did not resolve to any address
    HostNotFound(String),
}

impl Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::ConnectionFailure(response) => {
                write!(f, "Remote channel refused connection: {}", response)
            }

            Self::MissingDevice => write!(f, "Descriptor response has no device information"),

            Self::HostNotFound(host) => write!(f, "Could not resolve TV host: '{}'", host),
        }
    }
}
