use crate::{consts, errors::SpotPriceError};
use reqwest::Url;
use spot_price_lib::prices::region::PriceRegion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the price API, without the `/prices/...` suffix
    pub price_api_url: String,
    /// Base URL of the AI relay backend
    pub relay_url: String,
    /// Region used when the caller does not pick one
    pub region: PriceRegion,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(consts::DEFAULT_PRICE_API_URL, consts::DEFAULT_RELAY_URL)
    }
}

impl Config {
    pub fn new(price_api_url: &str, relay_url: &str) -> Self {
        Self {
            price_api_url: price_api_url.trim_end_matches('/').to_string(),
            relay_url: relay_url.trim_end_matches('/').to_string(),
            region: PriceRegion::default(),
        }
    }

    pub fn from_env() -> Result<Self, SpotPriceError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from a variable lookup, falling back to defaults for unset variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SpotPriceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str, default: &str| -> Result<String, SpotPriceError> {
            match lookup(name).filter(|value| !value.trim().is_empty()) {
                Some(value) => {
                    Url::parse(value.trim()).map_err(|e| SpotPriceError::InvalidConfig {
                        variable: name,
                        reason: e.to_string(),
                    })?;
                    Ok(value.trim().to_string())
                }
                None => Ok(default.to_string()),
            }
        };

        let mut config = Self::new(
            &read(consts::PRICE_API_URL_VAR, consts::DEFAULT_PRICE_API_URL)?,
            &read(consts::RELAY_URL_VAR, consts::DEFAULT_RELAY_URL)?,
        );

        if let Some(region) = lookup(consts::REGION_VAR).filter(|value| !value.trim().is_empty()) {
            config.region = region.parse()?;
        }
        Ok(config)
    }
}
