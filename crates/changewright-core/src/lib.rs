//! Changewright Core - configuration and file workflows
//!
//! This crate connects the pure changelog model from `changewright-changelog`
//! to the filesystem: it discovers and validates configuration, and reads,
//! mutates and writes changelog files.

pub mod config;
pub mod error;
pub mod workflow;

pub use config::Config;
pub use error::{ConfigError, CoreError, Result};
