use crate::{consts, errors::SpotPriceError};
use chrono::NaiveDate;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::Deserialize;
use serde_json::Value;
use spot_price_lib::prices::{dto::PriceRecord, region::PriceRegion};

pub fn connect() -> Result<Client, SpotPriceError> {
    let mut headers = HeaderMap::new();

    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static("application/json"),
    );

    Client::builder()
        .user_agent(consts::get_user_agent())
        .default_headers(headers)
        .timeout(consts::HTTP_TIMEOUT)
        .build()
        .map_err(SpotPriceError::ClientBuild)
}

/// URL of the daily price file, e.g. `{base}/prices/2024/03-01_NO1.json`
pub fn price_url(base: &str, date: NaiveDate, region: PriceRegion) -> String {
    format!("{}/prices/{}_{}.json", base, date.format("%Y/%m-%d"), region)
}

/// GETs `url` and returns the JSON body untouched. Non-2xx responses are errors.
pub async fn get_json(client: &Client, url: &str) -> Result<Value, SpotPriceError> {
    let body = client.get(url).send().await?.error_for_status()?.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

pub fn parse_records(raw: &Value) -> Result<Vec<PriceRecord>, SpotPriceError> {
    Ok(Vec::<PriceRecord>::deserialize(raw)?)
}
