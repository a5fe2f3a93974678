use crate::{client::connect, config::Config, errors::SpotPriceError, store::PriceStore};
use log::{debug, error};
use reqwest::{header::CONTENT_TYPE, Client};
use spot_price_lib::relay::{dto::RelayRequest, endpoints::AI_RELAY_ENDPOINT};

/// Forwards questions together with the store's raw prices to the AI relay backend
#[derive(Debug, Clone)]
pub struct RelayClient {
    url: String,
    client: Client,
}

impl RelayClient {
    pub fn new(config: &Config) -> Result<Self, SpotPriceError> {
        Ok(RelayClient {
            url: format!("{}{}", config.relay_url, AI_RELAY_ENDPOINT.path()),
            client: connect()?,
        })
    }

    /// Sends `message` and the untransformed price payload of `store`, returns the reply text.
    ///
    /// Errors are logged and handed back to the caller.
    pub async fn send_request(
        &self,
        store: &PriceStore,
        message: &str,
    ) -> Result<String, SpotPriceError> {
        let request = RelayRequest {
            message: message.to_string(),
            prices: store.raw_prices(),
        };

        self.post(&request)
            .await
            .inspect_err(|e| error!("Error communicating with the relay backend: {e}"))
    }

    async fn post(&self, request: &RelayRequest) -> Result<String, SpotPriceError> {
        debug!("Posting question to {}", self.url);
        let body = AI_RELAY_ENDPOINT
            .encode(request)
            .map_err(SpotPriceError::EncodeError)?;
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let payload = response.bytes().await?;

        if !status.is_success() {
            let message = AI_RELAY_ENDPOINT
                .decode(&payload)
                .ok()
                .and_then(|reply| reply.error)
                .unwrap_or_else(|| String::from_utf8_lossy(&payload).into_owned());
            return Err(SpotPriceError::Status { status, message });
        }

        AI_RELAY_ENDPOINT
            .decode(&payload)?
            .reply
            .ok_or(SpotPriceError::MissingReply)
    }
}
