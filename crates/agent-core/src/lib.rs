//! Core types shared by the stock-agent tool crates
//!
//! Tools report failures to their caller through [`Error`]; crate-specific
//! error types convert into it at the tool boundary.

pub mod error;

pub use error::{Error, Result};
