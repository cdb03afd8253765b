//! GitHub file writer for the stock agent
//!
//! Persists text into a repository file through the GitHub contents API.
//! Every write is a read-modify-write round trip: the current blob SHA is
//! fetched, the new content is computed (overwrite or append), and the file
//! is created or updated with that SHA. The SHA acts as an optimistic
//! concurrency token, so a concurrent writer that raced us fails with a
//! conflict instead of silently losing an update.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_github::{FileTarget, FileWriter, GitHubClient, GitHubConfig, WriteMode};
//! use std::sync::Arc;
//!
//! let config = GitHubConfig::from_env()?;
//! let store = Arc::new(GitHubClient::new(&config)?);
//! let writer = FileWriter::new(store);
//!
//! let target = FileTarget::new("octocat", "notes", "reports.txt");
//! let outcome = writer
//!     .upsert(&target, "hello", "Add note", WriteMode::Append)
//!     .await?;
//! println!("{:?}", outcome.url);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod memory;
pub mod store;
pub mod tool;
pub mod types;
pub mod writer;

pub use client::GitHubClient;
pub use config::{GitHubConfig, MissingFilePolicy};
pub use error::{GitHubError, Result};
pub use memory::InMemoryContentStore;
pub use store::{ContentStore, PutFileRequest, RemoteFile};
pub use tool::WriteFileTool;
pub use types::{FileState, FileTarget, WriteMode, WriteOutcome};
pub use writer::{APPEND_SEPARATOR, FileWriter, merge_content};
