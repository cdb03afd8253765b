//! Storage seam for repository files
//!
//! [`FileWriter`](crate::FileWriter) talks to the remote store only through
//! this trait, so the upsert flow can run against GitHub or the in-memory
//! store used in tests.

use crate::error::Result;
use crate::types::{FileTarget, WriteOutcome};
use async_trait::async_trait;

/// A file as currently stored remotely
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Decoded UTF-8 content
    pub content: String,
    /// Revision token (blob SHA)
    pub sha: String,
}

/// A create-or-update request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutFileRequest {
    pub content: String,
    pub message: String,
    /// Revision token of the version being replaced; `None` creates the file
    pub sha: Option<String>,
}

/// Remote file store with optimistic-concurrency versioning
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch a file; a missing file is [`GitHubError::NotFound`](crate::GitHubError::NotFound)
    async fn get_file(&self, target: &FileTarget) -> Result<RemoteFile>;

    /// Create or update a file
    ///
    /// Fails with [`GitHubError::Conflict`](crate::GitHubError::Conflict) when
    /// `request.sha` does not match the stored revision.
    async fn put_file(&self, target: &FileTarget, request: PutFileRequest) -> Result<WriteOutcome>;
}
