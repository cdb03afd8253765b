//! Shared utilities for the stock agent workspace
//!
//! This crate provides logging setup and process-level configuration used by
//! the binaries in the workspace.

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::{init_tracing, init_tracing_with};
