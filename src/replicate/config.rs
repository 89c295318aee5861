pub const API_URL: &str = "https://api.replicate.com/v1";

pub const DEFAULT_MODEL_ID: &str =
    "tattzy25/famous-flux:9d51097c0ad12337cd012d7796e61fe20fdcfe42f03fcca4546eb36b62636962";

pub const POLL_INTERVAL_MILLIS: u64 = 2000;
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 600;

pub const CREATE_RETRY_INTERVAL_MILLIS: u64 = 3000;
pub const CREATE_RETRY_ATTEMPTS: usize = 2;
