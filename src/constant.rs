/// Legacy remote-control port, plain `ws://`, no token
pub const LEGACY_PORT: u16 = 8001;
/// Token-auth remote-control port, `wss://` with a self-signed certificate
pub const TOKEN_PORT: u16 = 8002;
/// Ports tried by the prober, in order
pub const PROBE_PORTS: [u16; 2] = [LEGACY_PORT, TOKEN_PORT];

/// Port of the REST descriptor service
pub const REST_PORT: u16 = 8001;
pub const REST_PATH: &str = "/api/v2/";

pub const WS_ENDPOINT_REMOTE_CONTROL: &str = "/api/v2/channels/samsung.remote.control";
pub const WS_EVENT_CONNECT: &str = "ms.channel.connect";

/// Prefix of the client name shown in the TV's list of external devices
pub const WS_PREFIX: &str = "[Home Assistant]";
pub const DEFAULT_NAME: &str = "Samsung TV Remote";

// Seconds. The pairing timeout must cover a user accepting the prompt on screen.
pub const DEFAULT_PAIRING_TIMEOUT: u64 = 45;
pub const DEFAULT_DESCRIPTOR_TIMEOUT: u64 = 2;
pub const DEFAULT_LIST_TIMEOUT: u64 = 4;
pub const DEFAULT_HEALTH_TIMEOUT: u64 = 10;

pub const SMARTTHINGS_API: &str = "https://api.smartthings.com/v1";
pub const TOKEN_DIR_NAME: &str = "tvprobe";
