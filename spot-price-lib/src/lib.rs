pub mod endpoint;
pub mod prices;
pub mod relay;

#[cfg(test)]
mod test {
    use crate::prices::{dto::PriceRecord, region::PriceRegion};
    use crate::relay::{dto, endpoints::AI_RELAY_ENDPOINT};
    use chrono::{FixedOffset, TimeZone};
    use serde_json::json;

    #[test]
    fn test_decode_price_record() {
        let record: PriceRecord = serde_json::from_value(json!({
            "NOK_per_kWh": 0.84631,
            "EUR_per_kWh": 0.07282,
            "EXR": 11.6221,
            "time_start": "2024-03-01T13:00:00+01:00",
            "time_end": "2024-03-01T14:00:00+01:00"
        }))
        .unwrap();

        let offset = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(record.nok_per_kwh, 0.84631);
        assert_eq!(record.eur_per_kwh, Some(0.07282));
        assert_eq!(record.exr, Some(11.6221));
        assert_eq!(
            record.time_start,
            offset.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap()
        );
        assert_eq!(
            record.time_end,
            offset.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_decode_price_record_without_euro() {
        let record: PriceRecord = serde_json::from_value(json!({
            "NOK_per_kWh": 1.5,
            "time_start": "2024-03-01T00:00:00+01:00",
            "time_end": "2024-03-01T01:00:00+01:00"
        }))
        .unwrap();

        assert_eq!(record.eur_per_kwh, None);
        assert_eq!(record.exr, None);
    }

    #[test]
    fn test_parse_region() {
        assert_eq!("NO3".parse::<PriceRegion>().unwrap(), PriceRegion::No3);
        assert_eq!(" no5 ".parse::<PriceRegion>().unwrap(), PriceRegion::No5);
        assert!("SE3".parse::<PriceRegion>().is_err());
        assert_eq!(PriceRegion::default().to_string(), "NO1");
    }

    #[test]
    fn test_relay_request_without_prices_omits_key() {
        let request = dto::RelayRequest {
            message: "hello".to_string(),
            prices: None,
        };

        let encoded = AI_RELAY_ENDPOINT.encode(&request).unwrap();
        let body: serde_json::Value = serde_json::from_slice(&encoded).unwrap();

        assert_eq!(body, json!({ "message": "hello" }));
    }

    #[test]
    fn test_decode_relay_error_reply() {
        let reply = AI_RELAY_ENDPOINT
            .decode(br#"{"error": "quota exceeded"}"#)
            .unwrap();

        assert_eq!(reply.reply, None);
        assert_eq!(reply.error.as_deref(), Some("quota exceeded"));
        assert_eq!(AI_RELAY_ENDPOINT.path(), "/api/openai");
    }
}
