//! Core types, errors, and configuration for chatstat.
//!
//! This crate provides the transcript data model shared by the analysis,
//! rendering, and command-line crates, together with the error taxonomy and
//! the TOML configuration layer.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use config::ChatStatConfig;
pub use error::{Error, Result};
pub use types::*;
