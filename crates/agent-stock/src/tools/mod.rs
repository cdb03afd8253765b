//! Stock analysis tools for LLM agents

pub mod analyzer;
pub mod save_report;

pub use analyzer::StockAnalyzerTool;
pub use save_report::SaveStockReportTool;
