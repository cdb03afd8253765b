//! Stock-data endpoint client

use crate::config::StockConfig;
use crate::error::{Result, StockError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Field holding the latest close price inside the `prices` object
const CLOSE_FIELD: &str = "4. close";

/// Source of the latest close price for a symbol
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Latest close price, as the decimal string the provider returned
    async fn latest_close(&self, symbol: &str) -> Result<String>;
}

/// Client for the stock-data endpoint
///
/// Issues a single `GET <endpoint>?symbol=<symbol>` per lookup, no retries.
#[derive(Debug, Clone)]
pub struct StockDataClient {
    client: Client,
    endpoint: Url,
}

impl StockDataClient {
    /// Create a new client from configuration
    pub fn new(config: &StockConfig) -> Result<Self> {
        config.validate()?;

        let endpoint = Url::parse(&config.price_api_url)
            .map_err(|e| StockError::ConfigError(format!("Invalid price API URL: {e}")))?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl PriceSource for StockDataClient {
    async fn latest_close(&self, symbol: &str) -> Result<String> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("symbol", symbol);
        debug!(%url, "Fetching stock price");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StockError::ApiError(format!(
                "Stock data API error {status}: {body}"
            )));
        }

        let data: Value = response.json().await?;
        extract_close(symbol, &data)
    }
}

/// Read `prices["4. close"]` from a stock-data response body
fn extract_close(symbol: &str, data: &Value) -> Result<String> {
    if let Some(error) = data.get("error").and_then(Value::as_str) {
        return Err(StockError::ApiError(error.to_string()));
    }

    match data.get("prices").and_then(|p| p.get(CLOSE_FIELD)) {
        Some(Value::String(price)) => Ok(price.clone()),
        Some(Value::Number(price)) => Ok(price.to_string()),
        Some(other) => Err(StockError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: format!("unexpected close price value: {other}"),
        }),
        None => Err(StockError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "response has no close price".to_string(),
        }),
    }
}
