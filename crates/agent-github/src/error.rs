//! Error types for GitHub file operations

use thiserror::Error;

/// Errors raised while reading or writing repository files
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The file does not exist. Benign when upserting: it selects the create path.
    #[error("File not found: {0}")]
    NotFound(String),

    /// Network or HTTP transport failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with an unexpected status
    #[error("GitHub API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The revision token was stale or missing for an existing file
    #[error("Conflict writing {path}: {reason}")]
    Conflict { path: String, reason: String },

    /// The stored content could not be decoded
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Malformed input rejected before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GitHubError {
    /// Whether this is the benign "file does not exist" outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether the remote store rejected the write as a lost update
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Result type alias for GitHub operations
pub type Result<T> = std::result::Result<T, GitHubError>;

/// Convert GitHubError to agent_core::Error
impl From<GitHubError> for agent_core::Error {
    fn from(err: GitHubError) -> Self {
        agent_core::Error::ProcessingFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitHubError::Conflict {
            path: "reports.txt".to_string(),
            reason: "sha does not match".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Conflict writing reports.txt: sha does not match"
        );
        assert!(err.is_conflict());

        let err = GitHubError::Api {
            status: 500,
            message: "Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "GitHub API error 500: Server Error");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_conversion() {
        let err: agent_core::Error = GitHubError::NotFound("a/b/c".to_string()).into();
        match err {
            agent_core::Error::ProcessingFailed(msg) => assert!(msg.contains("a/b/c")),
            _ => panic!("Expected ProcessingFailed variant"),
        }
    }
}
