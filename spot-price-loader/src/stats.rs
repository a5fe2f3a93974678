use chrono::{DateTime, DurationRound, TimeDelta, TimeZone};
use spot_price_lib::prices::dto::PriceRecord;

/// Arithmetic mean of `nok_per_kwh`, `0.0` for no records
pub fn average_price(records: &[PriceRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| r.nok_per_kwh).sum::<f64>() / records.len() as f64
}

/// Highest `nok_per_kwh`, `0.0` for no records
pub fn highest_price(records: &[PriceRecord]) -> f64 {
    records
        .iter()
        .map(|r| r.nok_per_kwh)
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Finds the record starting in the same hour as `now`, truncated in `now`'s time zone
pub fn find_current<'a, Tz: TimeZone>(
    records: &'a [PriceRecord],
    now: &DateTime<Tz>,
) -> Option<&'a PriceRecord> {
    let current_hour = hour_start(now)?;
    records.iter().find(|record| {
        hour_start(&record.time_start.with_timezone(&now.timezone()))
            .is_some_and(|start| start.timestamp() == current_hour.timestamp())
    })
}

fn hour_start<Tz: TimeZone>(time: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    time.clone().duration_trunc(TimeDelta::hours(1)).ok()
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use chrono::{FixedOffset, Utc};

    pub(crate) fn record(nok_per_kwh: f64, hour: u32) -> PriceRecord {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let time_start = offset.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap();
        PriceRecord {
            nok_per_kwh,
            eur_per_kwh: None,
            exr: None,
            time_start,
            time_end: time_start + TimeDelta::hours(1),
        }
    }

    #[test]
    fn test_empty_records_yield_zero() {
        assert_eq!(average_price(&[]), 0.0);
        assert_eq!(highest_price(&[]), 0.0);
    }

    #[test]
    fn test_average_and_highest() {
        let records = [record(1.0, 0), record(3.0, 1)];
        assert_eq!(average_price(&records), 2.0);
        assert_eq!(highest_price(&records), 3.0);

        let records = [record(0.5, 0), record(1.25, 1), record(-0.25, 2), record(0.5, 3)];
        assert_eq!(average_price(&records), 0.5);
        assert_eq!(highest_price(&records), 1.25);
    }

    #[test]
    fn test_highest_of_only_negative_prices() {
        let records = [record(-0.3, 0), record(-0.1, 1)];
        assert_eq!(highest_price(&records), -0.1);
    }

    #[test]
    fn test_find_current_matches_hour() {
        let records: Vec<_> = (0..24).map(|h| record(h as f64, h)).collect();
        let offset = FixedOffset::east_opt(3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 3, 1, 13, 42, 17).unwrap();

        let current = find_current(&records, &now).unwrap();
        assert_eq!(current.nok_per_kwh, 13.0);
    }

    #[test]
    fn test_find_current_across_time_zones() {
        let records: Vec<_> = (0..24).map(|h| record(h as f64, h)).collect();
        // 13:05 UTC is 14:05 at +01:00
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 13, 5, 0).unwrap();

        let current = find_current(&records, &now).unwrap();
        assert_eq!(current.nok_per_kwh, 14.0);
    }

    #[test]
    fn test_find_current_without_match() {
        let records = [record(1.0, 0), record(2.0, 1)];
        let offset = FixedOffset::east_opt(3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 3, 2, 0, 30, 0).unwrap();

        assert!(find_current(&records, &now).is_none());
        assert!(find_current(&[], &now).is_none());
    }
}
