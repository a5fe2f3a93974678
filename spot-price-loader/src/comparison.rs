use crate::stats;
use chrono::NaiveDate;
use spot_price_lib::prices::{dto::PriceRecord, region::PriceRegion};
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

/// Time based id of a saved comparison (milliseconds since the Unix epoch)
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ComparisonId(pub u64);

impl fmt::Display for ComparisonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Labelled price dataset for a date and region, kept next to the main prices
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonEntry {
    pub id: ComparisonId,
    pub region: PriceRegion,
    pub date: NaiveDate,
    pub label: String,
    pub prices: Vec<PriceRecord>,
}

impl ComparisonEntry {
    pub fn average_price(&self) -> f64 {
        stats::average_price(&self.prices)
    }

    pub fn highest_price(&self) -> f64 {
        stats::highest_price(&self.prices)
    }
}

/// Hands out strictly increasing ids, even for several calls within one millisecond
#[derive(Debug, Default)]
pub(crate) struct ComparisonIdGenerator(AtomicU64);

impl ComparisonIdGenerator {
    pub(crate) fn next_at(&self, now_millis: u64) -> ComparisonId {
        let step = |last: u64| now_millis.max(last + 1);
        let previous = match self
            .0
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(step(last)))
        {
            Ok(previous) | Err(previous) => previous,
        };
        ComparisonId(step(previous))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::stats::test::record;

    #[test]
    fn test_ids_follow_the_clock() {
        let ids = ComparisonIdGenerator::default();

        assert_eq!(ids.next_at(1_700_000_000_000), ComparisonId(1_700_000_000_000));
        assert_eq!(ids.next_at(1_700_000_000_500), ComparisonId(1_700_000_000_500));
    }

    #[test]
    fn test_ids_are_unique_within_one_millisecond() {
        let ids = ComparisonIdGenerator::default();

        let first = ids.next_at(1_700_000_000_000);
        let second = ids.next_at(1_700_000_000_000);
        let third = ids.next_at(1_699_999_999_999);

        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn test_entry_statistics() {
        let entry = ComparisonEntry {
            id: ComparisonId(1),
            region: PriceRegion::No2,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            label: "Last winter".to_string(),
            prices: vec![record(1.0, 0), record(3.0, 1)],
        };

        assert_eq!(entry.average_price(), 2.0);
        assert_eq!(entry.highest_price(), 3.0);
    }
}
