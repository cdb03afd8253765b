//! Stock price analysis tools
//!
//! This crate fetches the latest close price for a symbol, classifies it with
//! fixed price thresholds and renders a plain-text report. It includes:
//!
//! - A price source for the stock-data endpoint (`PriceSource`, `StockDataClient`)
//! - Threshold classification into an analysis label, recommendation and risk tier
//! - Report rendering, plus the envelope and commit message used when saving
//! - Agent tools: `stock_analyzer` and `save_stock_report`
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_stock::{StockAnalyzerTool, StockConfig, StockDataClient};
//! use agent_tools::Tool;
//! use std::sync::Arc;
//!
//! let config = StockConfig::builder().with_env().build()?;
//! let source = Arc::new(StockDataClient::new(&config)?);
//! let tool = StockAnalyzerTool::new(source);
//!
//! let result = tool.execute(serde_json::json!({ "symbol": "AAPL" })).await?;
//! println!("{}", result["report"]);
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod report;
pub mod tools;

pub use analysis::{AnalysisLabel, Price, Recommendation, RiskTier, StockReport, classify};
pub use api::{PriceSource, StockDataClient};
pub use config::StockConfig;
pub use error::{Result, StockError};
pub use report::{commit_message, envelope, render};
pub use tools::{SaveStockReportTool, StockAnalyzerTool};
