//! Word-cloud rendering for chatstat.
//!
//! The renderer receives the prepared corpus string, extracts word
//! frequencies itself, lays words out on the canvas, and returns PNG bytes.

#![deny(missing_docs, unsafe_code)]

/// Color parsing and palettes.
pub mod color;

/// Error types for rendering.
pub mod error;

/// Word frequency extraction from the corpus.
pub mod frequency;

/// Spiral word placement.
pub mod layout;

/// Renderer trait and the glyph-based implementation.
pub mod render;

pub use error::{RenderError, RenderResult};
pub use frequency::word_frequencies;
pub use render::{GlyphCloudRenderer, RenderOptions, WordCloudRenderer};
