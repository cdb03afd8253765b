//! Configuration for stock analysis operations

use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const DEFAULT_PRICE_API_URL: &str = "https://mastra-stock-data.vercel.app/api/stock-data";
const DEFAULT_REPORTS_PATH: &str = "reports.txt";

/// Configuration for stock analysis operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Stock-data endpoint, queried with `?symbol=<symbol>`
    pub price_api_url: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Repository file that saved reports are appended to
    pub reports_path: String,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            reports_path: DEFAULT_REPORTS_PATH.to_string(),
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.price_api_url).map_err(|e| {
            StockError::ConfigError(format!(
                "Invalid price API URL '{}': {e}",
                self.price_api_url
            ))
        })?;

        if self.request_timeout.is_zero() {
            return Err(StockError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.reports_path.trim().is_empty() {
            return Err(StockError::ConfigError(
                "reports_path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    price_api_url: Option<String>,
    request_timeout: Option<Duration>,
    reports_path: Option<String>,
}

impl StockConfigBuilder {
    /// Set the stock-data endpoint
    pub fn price_api_url(mut self, url: impl Into<String>) -> Self {
        self.price_api_url = Some(url.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the reports file path
    pub fn reports_path(mut self, path: impl Into<String>) -> Self {
        self.reports_path = Some(path.into());
        self
    }

    /// Load `STOCK_DATA_URL` and `STOCK_REPORTS_PATH` from the environment
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("STOCK_DATA_URL") {
            self.price_api_url = Some(url);
        }
        if let Ok(path) = std::env::var("STOCK_REPORTS_PATH") {
            self.reports_path = Some(path);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            price_api_url: self.price_api_url.unwrap_or(defaults.price_api_url),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            reports_path: self.reports_path.unwrap_or(defaults.reports_path),
        };

        config.validate()?;
        Ok(config)
    }
}
