//! Create-or-update file writer
//!
//! [`FileWriter::upsert`] performs one read and one write per call:
//!
//! 1. fetch the current [`FileState`] (a missing file is not an error);
//! 2. compute the effective content from the [`WriteMode`];
//! 3. put the content, carrying the revision token fetched in step 1 when the
//!    file existed and no token otherwise.
//!
//! The read and the write are not atomic. Two writers racing on the same file
//! may both read the same token; the store rejects the second put with
//! [`GitHubError::Conflict`]. Nothing here retries.

use crate::config::MissingFilePolicy;
use crate::error::{GitHubError, Result};
use crate::store::{ContentStore, PutFileRequest};
use crate::types::{FileState, FileTarget, WriteMode, WriteOutcome};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Inserted between existing and appended content
pub const APPEND_SEPARATOR: &str = "\n\n---\n\n";

/// Writes files through an injected [`ContentStore`]
#[derive(Clone)]
pub struct FileWriter {
    store: Arc<dyn ContentStore>,
    policy: MissingFilePolicy,
}

impl FileWriter {
    /// Create a writer with the default (strict) fetch error policy
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            policy: MissingFilePolicy::default(),
        }
    }

    /// Set the policy for fetch errors other than "not found"
    pub fn with_policy(mut self, policy: MissingFilePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active fetch error policy
    pub fn policy(&self) -> MissingFilePolicy {
        self.policy
    }

    /// Fetch the current state of a file
    ///
    /// "Not found" maps to [`FileState::missing`]; every other error is
    /// returned as is, regardless of policy.
    pub async fn fetch_state(&self, target: &FileTarget) -> Result<FileState> {
        match self.store.get_file(target).await {
            Ok(file) => Ok(FileState::existing(file.content, file.sha)),
            Err(GitHubError::NotFound(_)) => Ok(FileState::missing()),
            Err(e) => Err(e),
        }
    }

    /// Create or update `target` with `new_content`
    pub async fn upsert(
        &self,
        target: &FileTarget,
        new_content: &str,
        commit_message: &str,
        mode: WriteMode,
    ) -> Result<WriteOutcome> {
        target.validate()?;
        if commit_message.trim().is_empty() {
            return Err(GitHubError::Validation(
                "commit message must not be empty".to_string(),
            ));
        }

        info!(%target, ?mode, "Upserting file");

        let state = match self.fetch_state(target).await {
            Ok(state) => state,
            Err(e) if self.policy == MissingFilePolicy::TreatAsMissing => {
                warn!(%target, error = %e, "Fetch failed, treating file as missing");
                FileState::missing()
            }
            Err(e) => return Err(e),
        };

        debug!(%target, exists = state.exists, "Fetched file state");

        let content = merge_content(mode, &state, new_content);
        let request = PutFileRequest {
            content,
            message: commit_message.to_string(),
            sha: if state.exists {
                state.revision_token
            } else {
                None
            },
        };

        let outcome = self.store.put_file(target, request).await?;
        info!(
            %target,
            created = outcome.created,
            "File written"
        );
        Ok(outcome)
    }
}

/// Compute the content to store for a write
///
/// Overwrite always yields `new_content`. Append joins existing content and
/// `new_content` with [`APPEND_SEPARATOR`], omitting the separator when the
/// existing content is blank.
pub fn merge_content(mode: WriteMode, state: &FileState, new_content: &str) -> String {
    match (mode, state.content.as_deref()) {
        (WriteMode::Append, Some(existing)) if state.exists => {
            let separator = if existing.trim().is_empty() {
                ""
            } else {
                APPEND_SEPARATOR
            };
            format!("{existing}{separator}{new_content}")
        }
        _ => new_content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryContentStore;
    use crate::store::{MockContentStore, RemoteFile};
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn target() -> FileTarget {
        FileTarget::new("octocat", "notes", "reports.txt")
    }

    fn transport_like_error() -> GitHubError {
        GitHubError::Api {
            status: 502,
            message: "Bad Gateway".to_string(),
        }
    }

    #[test]
    fn test_merge_overwrite_ignores_existing() {
        let state = FileState::existing("old", "rev-1");
        assert_eq!(merge_content(WriteMode::Overwrite, &state, "new"), "new");
        assert_eq!(
            merge_content(WriteMode::Overwrite, &FileState::missing(), "new"),
            "new"
        );
    }

    #[test]
    fn test_merge_append_with_separator() {
        let state = FileState::existing("first report", "rev-1");
        assert_eq!(
            merge_content(WriteMode::Append, &state, "second report"),
            "first report\n\n---\n\nsecond report"
        );
    }

    #[test]
    fn test_merge_append_to_blank_or_missing() {
        assert_eq!(
            merge_content(WriteMode::Append, &FileState::missing(), "report"),
            "report"
        );
        assert_eq!(
            merge_content(WriteMode::Append, &FileState::existing("", "rev-1"), "report"),
            "report"
        );
        // Whitespace-only content is kept but gets no separator
        assert_eq!(
            merge_content(WriteMode::Append, &FileState::existing("\n", "rev-1"), "report"),
            "\nreport"
        );
    }

    #[tokio::test]
    async fn test_create_sends_no_token() {
        let mut store = MockContentStore::new();
        store
            .expect_get_file()
            .returning(|t| Err(GitHubError::NotFound(t.to_string())));
        store
            .expect_put_file()
            .withf(|_, req| req.sha.is_none() && req.content == "hello")
            .times(1)
            .returning(|_, _| {
                Ok(WriteOutcome {
                    url: Some("https://github.com/octocat/notes/blob/main/reports.txt".into()),
                    revision_token: Some("abc".into()),
                    created: true,
                })
            });

        let writer = FileWriter::new(Arc::new(store));
        let outcome = assert_ok!(
            writer
                .upsert(&target(), "hello", "Create", WriteMode::Append)
                .await
        );
        assert!(outcome.created);
        assert_eq!(outcome.revision_token.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_update_sends_fetched_token() {
        let mut store = MockContentStore::new();
        store.expect_get_file().with(eq(target())).returning(|_| {
            Ok(RemoteFile {
                content: "old".into(),
                sha: "sha-1".into(),
            })
        });
        store
            .expect_put_file()
            .withf(|_, req| {
                req.sha.as_deref() == Some("sha-1") && req.content == "old\n\n---\n\nnew"
            })
            .times(1)
            .returning(|_, _| {
                Ok(WriteOutcome {
                    url: None,
                    revision_token: Some("sha-2".into()),
                    created: false,
                })
            });

        let writer = FileWriter::new(Arc::new(store));
        let outcome = writer
            .upsert(&target(), "new", "Append", WriteMode::Append)
            .await
            .unwrap();
        assert!(!outcome.created);
    }

    #[tokio::test]
    async fn test_strict_policy_surfaces_fetch_error() {
        let mut store = MockContentStore::new();
        store
            .expect_get_file()
            .returning(|_| Err(transport_like_error()));
        store.expect_put_file().never();

        let writer = FileWriter::new(Arc::new(store));
        let err = assert_err!(
            writer
                .upsert(&target(), "new", "msg", WriteMode::Overwrite)
                .await
        );
        assert!(matches!(err, GitHubError::Api { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_lenient_policy_attempts_create() {
        let mut store = MockContentStore::new();
        store
            .expect_get_file()
            .returning(|_| Err(transport_like_error()));
        // The file exists remotely, so a tokenless create is rejected
        store
            .expect_put_file()
            .withf(|_, req| req.sha.is_none())
            .times(1)
            .returning(|t, _| {
                Err(GitHubError::Conflict {
                    path: t.path.clone(),
                    reason: "\"sha\" wasn't supplied".to_string(),
                })
            });

        let writer =
            FileWriter::new(Arc::new(store)).with_policy(MissingFilePolicy::TreatAsMissing);
        let err = assert_err!(
            writer
                .upsert(&target(), "new", "msg", WriteMode::Overwrite)
                .await
        );
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_validation_before_io() {
        let mut store = MockContentStore::new();
        store.expect_get_file().never();
        store.expect_put_file().never();

        let writer = FileWriter::new(Arc::new(store));
        let err = assert_err!(
            writer
                .upsert(&target(), "x", "   ", WriteMode::Overwrite)
                .await
        );
        assert!(matches!(err, GitHubError::Validation(_)));

        let bad = FileTarget::new("", "notes", "a.txt");
        let err = assert_err!(writer.upsert(&bad, "x", "msg", WriteMode::Overwrite).await);
        assert!(matches!(err, GitHubError::Validation(_)));
    }

    #[tokio::test]
    async fn test_overwrite_twice_is_idempotent() {
        let store = InMemoryContentStore::new();
        let writer = FileWriter::new(Arc::new(store.clone()));

        let first = writer
            .upsert(&target(), "same", "first", WriteMode::Overwrite)
            .await
            .unwrap();
        let second = writer
            .upsert(&target(), "same", "second", WriteMode::Overwrite)
            .await
            .unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(store.content(&target()).await.as_deref(), Some("same"));
    }

    #[tokio::test]
    async fn test_append_sequence() {
        let store = InMemoryContentStore::new();
        let writer = FileWriter::new(Arc::new(store.clone()));

        writer
            .upsert(&target(), "one", "r1", WriteMode::Append)
            .await
            .unwrap();
        writer
            .upsert(&target(), "two", "r2", WriteMode::Append)
            .await
            .unwrap();

        assert_eq!(
            store.content(&target()).await.as_deref(),
            Some("one\n\n---\n\ntwo")
        );
        assert_eq!(store.commit_messages(&target()).await, vec!["r1", "r2"]);
    }

    #[tokio::test]
    async fn test_concurrent_writers_conflict() {
        let store = InMemoryContentStore::new();
        store.insert(target(), "base").await;
        let writer = FileWriter::new(Arc::new(store.clone()));

        // Both writers observe the same token before either writes
        let state_a = writer.fetch_state(&target()).await.unwrap();
        let state_b = writer.fetch_state(&target()).await.unwrap();
        assert_eq!(state_a.revision_token, state_b.revision_token);

        let first = store
            .put_file(
                &target(),
                PutFileRequest {
                    content: merge_content(WriteMode::Append, &state_a, "a"),
                    message: "a".into(),
                    sha: state_a.revision_token.clone(),
                },
            )
            .await;
        assert_ok!(first);

        let second = store
            .put_file(
                &target(),
                PutFileRequest {
                    content: merge_content(WriteMode::Append, &state_b, "b"),
                    message: "b".into(),
                    sha: state_b.revision_token.clone(),
                },
            )
            .await;
        let err = assert_err!(second);
        assert!(err.is_conflict());
        assert_eq!(
            store.content(&target()).await.as_deref(),
            Some("base\n\n---\n\na")
        );
    }
}
