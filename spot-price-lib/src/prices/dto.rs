use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Spot price for one interval as published by hvakosterstrommen.no
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct PriceRecord {
    /// Price in Norwegian kroner per kilowatt-hour
    #[serde(rename = "NOK_per_kWh")]
    pub nok_per_kwh: f64,
    /// Price in euro per kilowatt-hour
    #[serde(rename = "EUR_per_kWh", default, skip_serializing_if = "Option::is_none")]
    pub eur_per_kwh: Option<f64>,
    /// EUR to NOK exchange rate used for the conversion
    #[serde(rename = "EXR", default, skip_serializing_if = "Option::is_none")]
    pub exr: Option<f64>,
    pub time_start: DateTime<FixedOffset>,
    pub time_end: DateTime<FixedOffset>,
}
