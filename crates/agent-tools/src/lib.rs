//! Tool framework for the stock agent
//!
//! Tools are the functions an external agent calls by name with JSON
//! parameters. This crate defines the [`Tool`] trait, a [`ToolRegistry`] to
//! look tools up by name, and the uniform response envelope every tool
//! returns.

pub mod registry;
pub mod response;
pub mod tool;

pub use registry::ToolRegistry;
pub use response::{failure, parse_params, success};
pub use tool::Tool;
