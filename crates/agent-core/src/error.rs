//! Error types for agent-core

use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool invocations
#[derive(Error, Debug)]
pub enum Error {
    /// Tool input did not match the declared schema
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// No tool registered under the requested name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool processing failed
    #[error("Tool processing failed: {0}")]
    ProcessingFailed(String),
}
