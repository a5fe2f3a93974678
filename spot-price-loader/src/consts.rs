use std::time::Duration;

pub const DEFAULT_PRICE_API_URL: &str = "https://www.hvakosterstrommen.no/api/v1";
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:5000";
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

pub const PRICE_API_URL_VAR: &str = "SPOT_PRICE_API_URL";
pub const RELAY_URL_VAR: &str = "AI_RELAY_URL";
pub const REGION_VAR: &str = "SPOT_PRICE_REGION";

pub fn get_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
