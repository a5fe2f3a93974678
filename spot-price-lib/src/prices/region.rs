use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Norwegian bidding zone used by the price API
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum PriceRegion {
    /// Oslo / East Norway
    #[default]
    #[serde(rename = "NO1")]
    No1,
    /// Kristiansand / South Norway
    #[serde(rename = "NO2")]
    No2,
    /// Trondheim / Central Norway
    #[serde(rename = "NO3")]
    No3,
    /// Tromsø / North Norway
    #[serde(rename = "NO4")]
    No4,
    /// Bergen / West Norway
    #[serde(rename = "NO5")]
    No5,
}

impl PriceRegion {
    pub const ALL: [PriceRegion; 5] = [
        PriceRegion::No1,
        PriceRegion::No2,
        PriceRegion::No3,
        PriceRegion::No4,
        PriceRegion::No5,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            PriceRegion::No1 => "NO1",
            PriceRegion::No2 => "NO2",
            PriceRegion::No3 => "NO3",
            PriceRegion::No4 => "NO4",
            PriceRegion::No5 => "NO5",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRegion(pub String);

impl fmt::Display for UnknownRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown price region {:?}", self.0)
    }
}

impl std::error::Error for UnknownRegion {}

impl FromStr for PriceRegion {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        PriceRegion::ALL
            .into_iter()
            .find(|region| region.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownRegion(code.to_string()))
    }
}

impl fmt::Display for PriceRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.code().fmt(f)
    }
}
