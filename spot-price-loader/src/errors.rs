use reqwest::StatusCode;
use spot_price_lib::prices::region::UnknownRegion;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpotPriceError {
    #[error("Invalid value for {variable}: {reason}")]
    InvalidConfig {
        variable: &'static str,
        reason: String,
    },

    #[error("{0}")]
    InvalidRegion(#[from] UnknownRegion),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("Failed to fetch: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Failed to encode request: {0}")]
    EncodeError(serde_json::Error),

    #[error("Failed to decode response: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Request failed with status {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Relay response did not contain a reply")]
    MissingReply,
}
