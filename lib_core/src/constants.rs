pub const IPINFO_URL: &'static str = "https://ipinfo.io/json";
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
