//! Tool for appending analysis reports to a repository file

use agent_core::Result as AgentResult;
use agent_github::tool::write_result;
use agent_github::{FileTarget, FileWriter, WriteMode};
use agent_tools::{Tool, failure, parse_params};
use async_trait::async_trait;
use chrono::{Local, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::config::StockConfig;
use crate::report::{commit_message, envelope};

/// Tool that appends a report to the configured reports file
pub struct SaveStockReportTool {
    writer: FileWriter,
    reports_path: String,
}

#[derive(Debug, Deserialize)]
struct SaveReportParams {
    owner: String,
    repo: String,
    stock_symbol: String,
    report_content: String,
}

impl SaveStockReportTool {
    /// Create a new save tool writing to `config.reports_path`
    pub fn new(writer: FileWriter, config: &StockConfig) -> Self {
        Self {
            writer,
            reports_path: config.reports_path.clone(),
        }
    }
}

#[async_trait]
impl Tool for SaveStockReportTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: SaveReportParams = parse_params(params)?;
        let target = FileTarget::new(params.owner, params.repo, self.reports_path.clone());
        info!(symbol = %params.stock_symbol, %target, "Saving stock report");

        let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let content = envelope(&params.stock_symbol, &params.report_content, &generated_at);
        let message = commit_message(&params.stock_symbol, Local::now().date_naive());

        match self
            .writer
            .upsert(&target, &content, &message, WriteMode::Append)
            .await
        {
            Ok(outcome) => Ok(write_result(&target.path, WriteMode::Append, &outcome)),
            Err(e) => {
                warn!(%target, error = %e, "Saving stock report failed");
                Ok(failure(e))
            }
        }
    }

    fn name(&self) -> &'static str {
        "save_stock_report"
    }

    fn description(&self) -> &'static str {
        "Automatically saves stock analysis reports to the reports.txt file in your GitHub \
         repository. Appends new reports to existing content."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "owner": {
                    "type": "string",
                    "description": "GitHub repository owner (username or organization)"
                },
                "repo": {
                    "type": "string",
                    "description": "GitHub repository name"
                },
                "stock_symbol": {
                    "type": "string",
                    "description": "Stock symbol that was analyzed"
                },
                "report_content": {
                    "type": "string",
                    "description": "The stock analysis report content to save"
                }
            },
            "required": ["owner", "repo", "stock_symbol", "report_content"]
        })
    }
}
