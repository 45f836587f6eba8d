//! Question-answer attribution and word-cloud corpus building for chat
//! transcripts.
//!
//! The pipeline resolves each message to plain text, flags question messages,
//! credits the authors replying to them, and accumulates a filtered,
//! normalized corpus for the word-cloud renderer.

#![deny(missing_docs, unsafe_code)]

/// Language capabilities: normalization, tokenization, reshaping, stop words.
pub mod nlp;

/// Transcript loading.
pub mod parsers;

/// Question detection.
pub mod question;

/// Reply attribution.
pub mod replies;

/// Message text reconstruction.
pub mod resolver;

/// Pipeline facade.
pub mod stats;

/// Word-cloud corpus building.
pub mod vocabulary;

pub use nlp::{NlpToolkit, StopWords};
pub use question::QuestionDetector;
pub use replies::{QuestionFlagIndex, ReplyAttributionEngine, UserReplyTally};
pub use resolver::resolve_text;
pub use stats::ChatStatistics;
pub use vocabulary::VocabularyAggregator;
