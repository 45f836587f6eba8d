//! Corpus building for the word cloud.

use crate::nlp::{NlpToolkit, StopWords};
use crate::resolver::resolve_text;
use chatstat_core::Transcript;
use tracing::{debug, info};

/// Builds the text handed to the word-cloud renderer.
pub struct VocabularyAggregator<'a> {
    toolkit: &'a NlpToolkit,
}

impl<'a> VocabularyAggregator<'a> {
    /// Create an aggregator over the run's language capabilities.
    pub fn new(toolkit: &'a NlpToolkit) -> Self {
        Self { toolkit }
    }

    /// Accumulate the filtered tokens of every message, each message preceded
    /// by a single space. Nothing is truncated or normalized here.
    pub fn collect_buffer(&self, transcript: &Transcript, stop_words: &StopWords) -> String {
        let mut buffer = String::new();
        let mut skipped = 0usize;

        for message in &transcript.messages {
            let text = resolve_text(message.text.as_ref());
            if text.is_empty() {
                skipped += 1;
                continue;
            }

            let kept: Vec<String> = self
                .toolkit
                .words
                .words(&text)
                .into_iter()
                .filter(|token| !stop_words.contains(&self.toolkit.normalizer.normalize(token)))
                .collect();

            buffer.push(' ');
            buffer.push_str(&kept.join(" "));
        }

        if skipped > 0 {
            debug!("{} messages without text left out of the corpus", skipped);
        }
        buffer
    }

    /// Build the final corpus: accumulate, cut to `max_chars` characters,
    /// then normalize and reshape. The cut is not token-aware.
    pub fn build_corpus(
        &self,
        transcript: &Transcript,
        stop_words: &StopWords,
        max_chars: usize,
    ) -> String {
        let buffer = self.collect_buffer(transcript, stop_words);
        let total = buffer.chars().count();
        let truncated = truncate_chars(&buffer, max_chars);
        if truncated.len() < buffer.len() {
            info!("corpus truncated from {} to {} characters", total, max_chars);
        }

        let normalized = self.toolkit.normalizer.normalize(truncated);
        self.toolkit.reshaper.reshape(&normalized)
    }
}

/// The first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
