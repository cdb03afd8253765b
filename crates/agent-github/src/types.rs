//! Data types for repository file writes

use crate::error::{GitHubError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a single file in a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileTarget {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Path of the file within the repository
    pub path: String,
}

impl FileTarget {
    /// Create a new file target
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            path: path.into(),
        }
    }

    /// Reject targets with blank components
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("owner", &self.owner), ("repo", &self.repo), ("path", &self.path)] {
            if value.trim().is_empty() {
                return Err(GitHubError::Validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

impl fmt::Display for FileTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.owner, self.repo, self.path)
    }
}

/// Current state of a remote file, fetched fresh for every write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileState {
    pub exists: bool,
    pub content: Option<String>,
    pub revision_token: Option<String>,
}

impl FileState {
    /// State of a file that does not exist yet
    pub fn missing() -> Self {
        Self::default()
    }

    /// State of an existing file
    pub fn existing(content: impl Into<String>, revision_token: impl Into<String>) -> Self {
        Self {
            exists: true,
            content: Some(content.into()),
            revision_token: Some(revision_token.into()),
        }
    }
}

/// How new content is combined with what is already stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Replace the file content
    #[default]
    Overwrite,
    /// Add the new content after the existing content
    Append,
}

/// Result of a successful create-or-update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOutcome {
    /// Browser URL of the written file
    pub url: Option<String>,
    /// Revision token of the new file version
    pub revision_token: Option<String>,
    /// True when the file did not exist before the write
    pub created: bool,
}
