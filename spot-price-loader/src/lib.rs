pub mod client;
pub mod comparison;
pub mod config;
pub mod consts;
pub mod errors;
pub mod relay;
pub mod stats;
pub mod store;

pub use crate::{
    comparison::{ComparisonEntry, ComparisonId},
    config::Config,
    errors::SpotPriceError,
    relay::RelayClient,
    store::{PriceStore, StoreState},
};
