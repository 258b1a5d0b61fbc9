use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Outcome of a probe or device info request
///
/// Exactly one code is produced per resolution attempt. Setup flows branch on it
/// to decide which form or error to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCode {
    /// Everything requested was reachable
    Success,
    /// No transport was reachable or the descriptor could not be fetched
    NotSuccessful,
    /// Reserved for unsupported devices. Nothing produces it yet.
    NotSupported,
    /// SmartThings accepted the key but the device id is invalid or offline
    StDeviceNotFound,
    /// SmartThings rejected the key
    WrongApiKey,
}

impl ResultCode {
    pub fn is_success(self) -> bool {
        self == ResultCode::Success
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NotSuccessful => "not_successful",
            Self::NotSupported => "not_supported",
            Self::StDeviceNotFound => "st_device_not_found",
            Self::WrongApiKey => "wrong_api_key",
        }
    }
}

impl Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
