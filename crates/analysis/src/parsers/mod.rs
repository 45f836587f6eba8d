//! Transcript loading from chat export files.

use chatstat_core::error::IntoCoreError;
use chatstat_core::{Error, Result, Transcript};
use std::path::Path;
use tracing::info;

/// Read and decode a transcript export.
///
/// A missing or unreadable file, invalid JSON, or a missing top-level
/// `messages` array is an input error. Malformed individual messages are not.
pub fn load_transcript(path: &Path) -> Result<Transcript> {
    info!("loading chat data from {}", path.display());
    let content = std::fs::read_to_string(path)
        .input_context(&format!("failed to read {}", path.display()))?;

    let transcript = parse_transcript(&content)
        .map_err(|e| Error::input(format!("failed to parse {}: {}", path.display(), e)))?;
    info!(
        "loaded {} messages from {}",
        transcript.len(),
        transcript.name.as_deref().unwrap_or("unnamed chat")
    );
    Ok(transcript)
}

/// Decode a transcript from its JSON text.
pub fn parse_transcript(content: &str) -> Result<Transcript> {
    serde_json::from_str(content).map_err(|e| Error::input(e.to_string()))
}
