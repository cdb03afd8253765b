//! Tool for analyzing a stock's latest price

use agent_core::Result as AgentResult;
use agent_tools::{Tool, failure, parse_params, success};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::analysis::{Price, StockReport, classify};
use crate::api::PriceSource;
use crate::error::{Result, StockError};
use crate::report::render;

/// Tool that fetches a price, classifies it and renders a report
pub struct StockAnalyzerTool {
    source: Arc<dyn PriceSource>,
}

#[derive(Debug, Deserialize)]
struct AnalyzerParams {
    symbol: String,
    /// Accepted but unused; historical data is not fetched
    #[serde(default, rename = "include_history")]
    _include_history: Option<bool>,
}

impl StockAnalyzerTool {
    /// Create a new analyzer over a price source
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self { source }
    }

    /// Fetch and classify the latest price, returning the report and its rendered text
    pub async fn analyze(&self, symbol: &str) -> Result<(StockReport, String)> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(StockError::InvalidSymbol(symbol));
        }

        let raw_price = self.source.latest_close(&symbol).await?;
        let price = Price::parse(&raw_price)?;
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let report = classify(&symbol, &price, &timestamp);
        let text = render(&report);
        Ok((report, text))
    }
}

#[async_trait]
impl Tool for StockAnalyzerTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: AnalyzerParams = parse_params(params)?;
        info!(symbol = %params.symbol, "Analyzing stock");

        match self.analyze(&params.symbol).await {
            Ok((report, text)) => Ok(success(json!({
                "analysis": report,
                "report": text,
                "formatted_report": text,
            }))),
            Err(e) => {
                warn!(symbol = %params.symbol, error = %e, "Stock analysis failed");
                Ok(failure(e))
            }
        }
    }

    fn name(&self) -> &'static str {
        "stock_analyzer"
    }

    fn description(&self) -> &'static str {
        "Analyzes a stock price and generates a comprehensive report with recommendations"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Stock symbol to analyze"
                },
                "include_history": {
                    "type": "boolean",
                    "description": "Whether to include historical data"
                }
            },
            "required": ["symbol"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisLabel, Recommendation, RiskTier};
    use crate::api::MockPriceSource;
    use mockall::predicate::eq;

    fn tool_with_price(symbol: &'static str, price: &'static str) -> StockAnalyzerTool {
        let mut source = MockPriceSource::new();
        source
            .expect_latest_close()
            .with(eq(symbol))
            .times(1)
            .returning(move |_| Ok(price.to_string()));
        StockAnalyzerTool::new(Arc::new(source))
    }

    #[test]
    fn test_tool_metadata() {
        let tool = StockAnalyzerTool::new(Arc::new(MockPriceSource::new()));
        assert_eq!(tool.name(), "stock_analyzer");
        assert!(!tool.description().is_empty());

        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["symbol"].is_object());
    }

    #[tokio::test]
    async fn test_analyze_aapl() {
        let tool = tool_with_price("AAPL", "150.25");
        let (report, text) = tool.analyze("aapl").await.unwrap();

        assert_eq!(report.symbol, "AAPL");
        assert_eq!(report.price, "150.25");
        assert_eq!(report.analysis_label, AnalysisLabel::MidRange);
        assert_eq!(report.recommendation, Recommendation::HoldMonitor);
        assert_eq!(report.risk_tier, RiskTier::Medium);
        assert!(chrono::DateTime::parse_from_rfc3339(&report.timestamp).is_ok());

        assert!(text.contains("RECOMMENDATION: HOLD/MONITOR"));
        assert!(text.contains("RISK ASSESSMENT:\nMEDIUM"));
    }

    #[tokio::test]
    async fn test_execute_success_envelope() {
        let tool = tool_with_price("NVDA", "875.40");
        let result = tool.execute(json!({ "symbol": "NVDA" })).await.unwrap();

        assert_eq!(result["success"], true);
        assert_eq!(result["analysis"]["analysis_label"], "HighValue");
        assert_eq!(result["analysis"]["recommendation"], "HoldMonitor");
        assert_eq!(result["analysis"]["risk_tier"], "High");
        assert_eq!(result["report"], result["formatted_report"]);
    }

    #[tokio::test]
    async fn test_execute_source_failure() {
        let mut source = MockPriceSource::new();
        source.expect_latest_close().returning(|symbol| {
            Err(StockError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "response has no close price".to_string(),
            })
        });
        let tool = StockAnalyzerTool::new(Arc::new(source));

        let result = tool.execute(json!({ "symbol": "ZZZZ" })).await.unwrap();
        assert_eq!(result["success"], false);
        assert_eq!(
            result["error"],
            "Data not available for ZZZZ: response has no close price"
        );
    }

    #[tokio::test]
    async fn test_execute_unparseable_price() {
        let tool = tool_with_price("ABC", "n/a");
        let result = tool.execute(json!({ "symbol": "ABC" })).await.unwrap();
        assert_eq!(result["success"], false);
        assert_eq!(result["error"], "Invalid price: n/a");
    }

    #[tokio::test]
    async fn test_blank_symbol() {
        let tool = StockAnalyzerTool::new(Arc::new(MockPriceSource::new()));
        let result = tool.execute(json!({ "symbol": "  " })).await.unwrap();
        assert_eq!(result["success"], false);
    }

    #[tokio::test]
    async fn test_include_history_accepted() {
        let tool = tool_with_price("MSFT", "410.10");
        let result = tool
            .execute(json!({ "symbol": "MSFT", "include_history": true }))
            .await
            .unwrap();
        assert_eq!(result["success"], true);
        assert_eq!(result["analysis"]["symbol"], "MSFT");
    }

    #[tokio::test]
    async fn test_invalid_params() {
        let tool = StockAnalyzerTool::new(Arc::new(MockPriceSource::new()));
        assert!(tool.execute(json!({ "symbol": 42 })).await.is_err());
        assert!(
            tool.execute(json!({ "symbol": "MSFT", "include_history": "yes" }))
                .await
                .is_err()
        );
    }
}
