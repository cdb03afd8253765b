//! Command-line interface for the stock agent tools
//!
//! Each subcommand invokes one of the agent tools through the tool registry,
//! exactly as an agent would, and prints the JSON result.
//!
//! # Usage
//!
//! ```bash
//! export GITHUB_TOKEN="ghp_..."
//!
//! stock-agent analyze AAPL
//! stock-agent save-report --owner octocat --repo portfolio AAPL
//! echo "hello" | stock-agent write --owner octocat --repo notes --path notes.txt -m "Add note"
//! stock-agent tools --schema
//! ```

use agent_github::{FileWriter, GitHubClient, GitHubConfig, MissingFilePolicy, WriteFileTool};
use agent_stock::{SaveStockReportTool, StockAnalyzerTool, StockConfig, StockDataClient};
use agent_tools::ToolRegistry;
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use serde_json::{Value, json};
use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stock-agent")]
#[command(about = "Analyze stock prices and save reports to GitHub", long_about = None)]
struct Args {
    /// Take the create path when fetching the current file fails
    #[arg(long, global = true)]
    lenient_fetch: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and analyze the latest price for a symbol
    Analyze {
        /// Stock symbol (e.g. AAPL)
        symbol: String,
    },

    /// Analyze a symbol and append the report to the reports file
    SaveReport {
        /// Repository owner
        #[arg(long)]
        owner: String,
        /// Repository name
        #[arg(long)]
        repo: String,
        /// Stock symbol (e.g. AAPL)
        symbol: String,
    },

    /// Create or update a repository file
    Write {
        /// Repository owner
        #[arg(long)]
        owner: String,
        /// Repository name
        #[arg(long)]
        repo: String,
        /// File path within the repository
        #[arg(long)]
        path: String,
        /// Commit message
        #[arg(short, long)]
        message: String,
        /// Content to write; read from stdin when omitted
        #[arg(long)]
        content: Option<String>,
        /// Append instead of overwriting
        #[arg(long)]
        append: bool,
    },

    /// List the available tools
    Tools {
        /// Print input schemas as JSON
        #[arg(long)]
        schema: bool,
    },
}

fn fetch_policy(lenient_fetch: bool) -> MissingFilePolicy {
    if lenient_fetch {
        MissingFilePolicy::TreatAsMissing
    } else {
        MissingFilePolicy::Strict
    }
}

fn build_registry(lenient_fetch: bool) -> anyhow::Result<ToolRegistry> {
    let stock_config = StockConfig::builder()
        .with_env()
        .build()
        .context("invalid stock configuration")?;

    let github_config = GitHubConfig::builder()
        .with_env()
        .missing_file_policy(fetch_policy(lenient_fetch))
        .build()
        .context("invalid GitHub configuration")?;

    if github_config.token.is_none() {
        tracing::warn!("GITHUB_TOKEN is not set, repository writes will be rejected");
    }

    let source = Arc::new(StockDataClient::new(&stock_config)?);
    let store = Arc::new(GitHubClient::new(&github_config)?);
    let writer = FileWriter::new(store).with_policy(github_config.missing_file_policy);

    let registry = ToolRegistry::new();
    registry.register(Arc::new(StockAnalyzerTool::new(source)));
    registry.register(Arc::new(SaveStockReportTool::new(
        writer.clone(),
        &stock_config,
    )));
    registry.register(Arc::new(WriteFileTool::new(writer)));
    Ok(registry)
}

fn print_tools(registry: &ToolRegistry, schema: bool) -> anyhow::Result<()> {
    if schema {
        let schemas: Vec<Value> = registry
            .list_tools()
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "input_schema": tool.input_schema(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&schemas)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Tool", "Description"]);
    for tool in registry.list_tools() {
        table.add_row(vec![tool.name(), tool.description()]);
    }
    println!("{table}");
    Ok(())
}

/// Input for `github_write_file`
fn write_params(
    owner: String,
    repo: String,
    path: String,
    content: String,
    message: String,
    append: bool,
) -> Value {
    json!({
        "owner": owner,
        "repo": repo,
        "path": path,
        "content": content,
        "message": message,
        "mode": if append { "append" } else { "overwrite" },
    })
}

fn exit_code(result: &Value) -> ExitCode {
    if result["success"] == true {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Print a tool result and map `success` to the exit code
fn report(result: &Value) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(exit_code(result))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = agent_utils::Config::from_env();
    agent_utils::init_tracing_with(&config.log_filter);

    let args = Args::parse();
    info!(app = %config.app_name, env = %config.environment, "Starting stock-agent");

    let registry = build_registry(args.lenient_fetch)?;

    match args.command {
        Command::Analyze { symbol } => {
            let result = registry
                .execute("stock_analyzer", json!({ "symbol": symbol }))
                .await?;
            report(&result)
        }
        Command::SaveReport {
            owner,
            repo,
            symbol,
        } => {
            let analysis = registry
                .execute("stock_analyzer", json!({ "symbol": symbol }))
                .await?;
            if analysis["success"] != true {
                return report(&analysis);
            }

            let result = registry
                .execute(
                    "save_stock_report",
                    json!({
                        "owner": owner,
                        "repo": repo,
                        "stock_symbol": analysis["analysis"]["symbol"],
                        "report_content": analysis["report"],
                    }),
                )
                .await?;
            report(&result)
        }
        Command::Write {
            owner,
            repo,
            path,
            message,
            content,
            append,
        } => {
            let content = match content {
                Some(content) => content,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read content from stdin")?;
                    buf
                }
            };

            let result = registry
                .execute(
                    "github_write_file",
                    write_params(owner, repo, path, content, message, append),
                )
                .await?;
            report(&result)
        }
        Command::Tools { schema } => {
            print_tools(&registry, schema)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_follows_success() {
        assert_eq!(exit_code(&json!({ "success": true })), ExitCode::SUCCESS);
        assert_eq!(
            exit_code(&json!({ "success": false, "error": "boom" })),
            ExitCode::FAILURE
        );
        assert_eq!(exit_code(&json!({})), ExitCode::FAILURE);
        assert_eq!(exit_code(&json!({ "success": "true" })), ExitCode::FAILURE);
    }

    #[test]
    fn test_write_mode_mapping() {
        let params = |append| {
            write_params(
                "octocat".into(),
                "notes".into(),
                "notes.txt".into(),
                "hello".into(),
                "Add note".into(),
                append,
            )
        };
        assert_eq!(params(false)["mode"], "overwrite");
        assert_eq!(params(true)["mode"], "append");
        assert_eq!(params(true)["path"], "notes.txt");
    }

    #[test]
    fn test_fetch_policy() {
        assert_eq!(fetch_policy(false), MissingFilePolicy::Strict);
        assert_eq!(fetch_policy(true), MissingFilePolicy::TreatAsMissing);
    }

    #[test]
    fn test_parse_write_command() {
        let args = Args::try_parse_from([
            "stock-agent",
            "write",
            "--owner",
            "octocat",
            "--repo",
            "notes",
            "--path",
            "notes.txt",
            "-m",
            "Add note",
            "--append",
            "--lenient-fetch",
        ])
        .unwrap();

        assert!(args.lenient_fetch);
        match args.command {
            Command::Write {
                append, content, ..
            } => {
                assert!(append);
                assert!(content.is_none());
            }
            other => panic!("expected write command, got {other:?}"),
        }
    }

    #[test]
    fn test_registry_has_all_tools() {
        let registry = build_registry(false).unwrap();
        let tools = registry.list_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            ["github_write_file", "save_stock_report", "stock_analyzer"]
        );
    }
}
