//! In-memory implementation of [`ContentStore`]
//!
//! Mirrors the contents API's versioning rules so the upsert flow can be
//! exercised without network access:
//! - every successful put assigns a new revision token;
//! - updating an existing file requires its current token, otherwise the put
//!   fails with [`GitHubError::Conflict`];
//! - supplying a token for a file that does not exist fails with
//!   [`GitHubError::NotFound`].
//!
//! State is not durable and is shared only by clones of the same store.

use crate::error::{GitHubError, Result};
use crate::store::{ContentStore, PutFileRequest, RemoteFile};
use crate::types::{FileTarget, WriteOutcome};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredFile {
    content: String,
    sha: String,
    /// Commit messages, oldest first
    history: Vec<String>,
}

#[derive(Debug, Default)]
struct Inner {
    files: HashMap<FileTarget, StoredFile>,
    next_revision: u64,
}

impl Inner {
    fn next_sha(&mut self) -> String {
        self.next_revision += 1;
        format!("rev-{:08x}", self.next_revision)
    }
}

/// Content store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, returning its revision token
    pub async fn insert(&self, target: FileTarget, content: impl Into<String>) -> String {
        let mut inner = self.inner.write().await;
        let sha = inner.next_sha();
        inner.files.insert(
            target,
            StoredFile {
                content: content.into(),
                sha: sha.clone(),
                history: Vec::new(),
            },
        );
        sha
    }

    /// Current content of a file, if present
    pub async fn content(&self, target: &FileTarget) -> Option<String> {
        let inner = self.inner.read().await;
        inner.files.get(target).map(|f| f.content.clone())
    }

    /// Commit messages recorded for a file, oldest first
    pub async fn commit_messages(&self, target: &FileTarget) -> Vec<String> {
        let inner = self.inner.read().await;
        inner
            .files
            .get(target)
            .map(|f| f.history.clone())
            .unwrap_or_default()
    }

    fn html_url(target: &FileTarget) -> String {
        format!(
            "memory://{}/{}/blob/main/{}",
            target.owner, target.repo, target.path
        )
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn get_file(&self, target: &FileTarget) -> Result<RemoteFile> {
        let inner = self.inner.read().await;
        inner
            .files
            .get(target)
            .map(|f| RemoteFile {
                content: f.content.clone(),
                sha: f.sha.clone(),
            })
            .ok_or_else(|| GitHubError::NotFound(target.to_string()))
    }

    async fn put_file(&self, target: &FileTarget, request: PutFileRequest) -> Result<WriteOutcome> {
        let mut inner = self.inner.write().await;

        let created = match (inner.files.get(target), request.sha.as_deref()) {
            (None, None) => true,
            (None, Some(_)) => return Err(GitHubError::NotFound(target.to_string())),
            (Some(_), None) => {
                return Err(GitHubError::Conflict {
                    path: target.path.clone(),
                    reason: "\"sha\" wasn't supplied".to_string(),
                });
            }
            (Some(existing), Some(sha)) if existing.sha != sha => {
                return Err(GitHubError::Conflict {
                    path: target.path.clone(),
                    reason: format!("{} does not match {sha}", existing.sha),
                });
            }
            (Some(_), Some(_)) => false,
        };

        let sha = inner.next_sha();
        let entry = inner
            .files
            .entry(target.clone())
            .or_insert_with(|| StoredFile {
                content: String::new(),
                sha: String::new(),
                history: Vec::new(),
            });
        entry.content = request.content;
        entry.sha.clone_from(&sha);
        entry.history.push(request.message);

        Ok(WriteOutcome {
            url: Some(Self::html_url(target)),
            revision_token: Some(sha),
            created,
        })
    }
}
