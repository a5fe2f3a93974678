use crate::{
    client::{connect, get_json, parse_records, price_url},
    comparison::{ComparisonEntry, ComparisonId, ComparisonIdGenerator},
    config::Config,
    errors::SpotPriceError,
    stats,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use log::{debug, error, info, warn};
use reqwest::Client;
use serde_json::Value;
use spot_price_lib::prices::{dto::PriceRecord, region::PriceRegion};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Records of the last successful `fetch_prices`
    pub prices: Vec<PriceRecord>,
    /// Untransformed payload `prices` was parsed from
    pub raw_prices: Option<Value>,
    pub todays_prices: Vec<PriceRecord>,
    pub comparisons: Vec<ComparisonEntry>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Holds fetched spot prices and everything derived from them.
///
/// All operations take `&self`, so one store can be shared between tasks behind an `Arc`.
/// When fetches of the same kind overlap, only the most recently started one may update
/// the state; responses of older requests are dropped.
#[derive(Debug)]
pub struct PriceStore {
    client: Client,
    base_url: String,
    state: RwLock<StoreState>,
    prices_generation: AtomicU64,
    todays_generation: AtomicU64,
    comparison_ids: ComparisonIdGenerator,
}

impl PriceStore {
    pub fn new(config: &Config) -> Result<Self, SpotPriceError> {
        Ok(PriceStore {
            client: connect()?,
            base_url: config.price_api_url.clone(),
            state: RwLock::new(StoreState::default()),
            prices_generation: AtomicU64::new(0),
            todays_generation: AtomicU64::new(0),
            comparison_ids: ComparisonIdGenerator::default(),
        })
    }

    /// Loads the prices of `date` in `region` and afterwards today's prices for the same region.
    ///
    /// Failures end up in [`PriceStore::error`] and empty the price list.
    pub async fn fetch_prices(&self, date: NaiveDate, region: PriceRegion) {
        let generation = {
            let (generation, mut state) = self.start_request(&self.prices_generation);
            state.loading = true;
            state.error = None;
            generation
        };

        let url = price_url(&self.base_url, date, region);
        debug!("Fetching prices from {url}");
        let result = self.load(&url).await;

        let fetched = {
            let Some(mut state) = self.write_if_latest(&self.prices_generation, generation) else {
                debug!("Discarding outdated prices for {date} in {region}");
                return;
            };
            match result {
                Ok((raw, records)) => {
                    info!("Fetched {} prices for {date} in {region}", records.len());
                    state.raw_prices = Some(raw);
                    state.prices = records;
                    true
                }
                Err(e) => {
                    error!("Failed to fetch prices for {date} in {region}: {e}");
                    state.prices = Vec::new();
                    state.error = Some(e.to_string());
                    false
                }
            }
        };

        if fetched {
            self.fetch_todays_prices(region).await;
        }

        if let Some(mut state) = self.write_if_latest(&self.prices_generation, generation) {
            state.loading = false;
        }
    }

    /// Loads today's prices used for [`PriceStore::current_price`]. Failures only clear them.
    pub async fn fetch_todays_prices(&self, region: PriceRegion) {
        self.fetch_todays_prices_on(Local::now().date_naive(), region).await
    }

    pub(crate) async fn fetch_todays_prices_on(&self, today: NaiveDate, region: PriceRegion) {
        let generation = self.start_request(&self.todays_generation).0;
        let url = price_url(&self.base_url, today, region);
        let result = self.load(&url).await;

        let Some(mut state) = self.write_if_latest(&self.todays_generation, generation) else {
            debug!("Discarding outdated prices for today in {region}");
            return;
        };
        state.todays_prices = match result {
            Ok((_, records)) => records,
            Err(e) => {
                warn!("Failed to fetch today's prices in {region}: {e}");
                Vec::new()
            }
        };
    }

    /// Fetches a dataset independent of the main prices and saves it as a comparison.
    ///
    /// Returns `None` if the fetch fails, the comparisons stay untouched then.
    pub async fn add_comparison(
        &self,
        date: NaiveDate,
        region: PriceRegion,
        label: impl Into<String>,
    ) -> Option<ComparisonId> {
        let label = label.into();
        let url = price_url(&self.base_url, date, region);

        match self.load(&url).await {
            Ok((_, prices)) => {
                let entry = ComparisonEntry {
                    id: self.comparison_ids.next_at(now_millis()),
                    region,
                    date,
                    label,
                    prices,
                };
                let id = entry.id;
                info!("Saved comparison {id} ({}) for {date} in {region}", entry.label);
                self.write().comparisons.push(entry);
                Some(id)
            }
            Err(e) => {
                error!("Failed to fetch comparison data: {e}");
                None
            }
        }
    }

    pub fn remove_comparison(&self, id: ComparisonId) {
        let mut state = self.write();
        if let Some(index) = state.comparisons.iter().position(|c| c.id == id) {
            state.comparisons.remove(index);
        }
    }

    pub fn clear_comparisons(&self) {
        self.write().comparisons.clear();
    }

    pub fn average_price(&self) -> f64 {
        stats::average_price(&self.read().prices)
    }

    pub fn highest_price(&self) -> f64 {
        stats::highest_price(&self.read().prices)
    }

    /// Today's record for the current hour of the local clock
    pub fn current_price(&self) -> Option<PriceRecord> {
        self.current_price_at(&Local::now())
    }

    pub fn current_price_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<PriceRecord> {
        stats::find_current(&self.read().todays_prices, now).cloned()
    }

    pub fn prices(&self) -> Vec<PriceRecord> {
        self.read().prices.clone()
    }

    pub fn raw_prices(&self) -> Option<Value> {
        self.read().raw_prices.clone()
    }

    pub fn todays_prices(&self) -> Vec<PriceRecord> {
        self.read().todays_prices.clone()
    }

    pub fn comparisons(&self) -> Vec<ComparisonEntry> {
        self.read().comparisons.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    pub fn snapshot(&self) -> StoreState {
        self.read().clone()
    }

    async fn load(&self, url: &str) -> Result<(Value, Vec<PriceRecord>), SpotPriceError> {
        let raw = get_json(&self.client, url).await?;
        let records = parse_records(&raw)?;
        Ok((raw, records))
    }

    /// Registers a new request of the kind `counter` tracks, under the write lock
    fn start_request(&self, counter: &AtomicU64) -> (u64, RwLockWriteGuard<'_, StoreState>) {
        let state = self.write();
        let generation = counter.fetch_add(1, Ordering::SeqCst) + 1;
        (generation, state)
    }

    /// Write access to the state, unless a newer request of the same kind has started since
    fn write_if_latest(
        &self,
        counter: &AtomicU64,
        generation: u64,
    ) -> Option<RwLockWriteGuard<'_, StoreState>> {
        let state = self.write();
        (counter.load(Ordering::SeqCst) == generation).then_some(state)
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}
