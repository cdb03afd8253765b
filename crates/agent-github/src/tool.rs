//! Tool for writing files to a GitHub repository

use agent_core::Result as AgentResult;
use agent_tools::{Tool, failure, parse_params, success};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::types::{FileTarget, WriteMode, WriteOutcome};
use crate::writer::FileWriter;

/// Tool that creates or updates a repository file
pub struct WriteFileTool {
    writer: FileWriter,
}

#[derive(Debug, Deserialize)]
struct WriteFileParams {
    owner: String,
    repo: String,
    path: String,
    content: String,
    message: String,
    #[serde(default)]
    mode: WriteMode,
}

impl WriteFileTool {
    /// Create a new write tool around a file writer
    pub fn new(writer: FileWriter) -> Self {
        Self { writer }
    }
}

/// Build the success payload shared by the file-writing tools
pub fn write_result(path: &str, mode: WriteMode, outcome: &WriteOutcome) -> Value {
    let message = match (mode, outcome.created) {
        (WriteMode::Append, _) => format!("Successfully appended to file: {path}"),
        (WriteMode::Overwrite, true) => format!("Successfully created file: {path}"),
        (WriteMode::Overwrite, false) => format!("Successfully updated file: {path}"),
    };

    success(json!({
        "url": outcome.url,
        "sha": outcome.revision_token,
        "message": message,
    }))
}

#[async_trait]
impl Tool for WriteFileTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: WriteFileParams = parse_params(params)?;
        let target = FileTarget::new(params.owner, params.repo, params.path);
        info!(%target, "Writing to GitHub");

        match self
            .writer
            .upsert(&target, &params.content, &params.message, params.mode)
            .await
        {
            Ok(outcome) => Ok(write_result(&target.path, params.mode, &outcome)),
            Err(e) => {
                warn!(%target, error = %e, "GitHub write failed");
                Ok(failure(e))
            }
        }
    }

    fn name(&self) -> &'static str {
        "github_write_file"
    }

    fn description(&self) -> &'static str {
        "Writes content to a file in a GitHub repository. Can create new files or update \
         existing ones, either replacing the content or appending to it."
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
                "path": {
                    "type": "string",
                    "description": "File path within the repository (e.g., 'data/stock-prices.json')"
                },
                "content": {
                    "type": "string",
                    "description": "Content to write to the file"
                },
                "message": {
                    "type": "string",
                    "description": "Commit message"
                },
                "mode": {
                    "type": "string",
                    "description": "Replace the file or append to it",
                    "enum": ["overwrite", "append"],
                    "default": "overwrite"
                }
            },
            "required": ["owner", "repo", "path", "content", "message"]
        })
    }
}
