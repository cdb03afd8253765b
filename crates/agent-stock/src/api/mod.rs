//! API clients for stock data providers

pub mod stock_data;

pub use stock_data::{PriceSource, StockDataClient};

#[cfg(test)]
pub use stock_data::MockPriceSource;
