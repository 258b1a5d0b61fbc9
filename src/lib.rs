//! Set up Samsung Tizen TVs: find a working remote-control port, read the TV's
//! identity from its REST descriptor and check an optional SmartThings binding.
//!
//! ```no_run
//! # async fn setup() {
//! use tvprobe::{ResultCode, TvInfo};
//!
//! let session = reqwest::Client::new();
//! let info = TvInfo::new("192.168.1.20", "Living Room");
//!
//! let (result, descriptor) = info.get_device_info(Some(&session), None, None).await;
//! if result == ResultCode::Success {
//!     let descriptor = descriptor.unwrap();
//!     println!("{} on port {}", descriptor.device_name(), descriptor.working_port());
//! }
//! # }
//! ```

pub mod cloud;
mod config;
pub mod constant;
mod device;
mod error;
mod probe;
mod remote;
mod result;
mod token;

pub use cloud::{CloudApi, DeviceSummary, SmartThings};
pub use config::{Config, Timeouts};
pub use device::{tv_url, DeviceDescriptor, TvInfo};
pub use error::{ApiError, ClientError, Error, Result};
pub use probe::{Connector, ProbeOutcome, ProbeTarget, Prober};
pub use remote::{KeyCommand, Remote, WsConnector};
pub use result::ResultCode;
pub use token::{FileTokenStore, TokenFile, TokenHandle, TokenSlot, TokenStore};
