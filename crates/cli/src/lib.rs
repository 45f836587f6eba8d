//! Command-line interface for chatstat.
//!
//! Ranks the members who answer questions in a chat export and renders a
//! word cloud of what the chat talks about.

#![deny(missing_docs, unsafe_code)]

/// CLI command definitions and parsing.
pub mod commands;

/// CLI application entry point and configuration.
pub mod app;

/// Error types for CLI operations.
pub mod error;
