//! Detection of interrogative messages.

use crate::nlp::SentenceTokenizer;
use chatstat_core::constants::QUESTION_MARKERS;

/// Flags messages containing at least one question sentence.
pub struct QuestionDetector<'a> {
    sentences: &'a dyn SentenceTokenizer,
}

impl<'a> QuestionDetector<'a> {
    /// Create a detector over the given sentence tokenizer.
    pub fn new(sentences: &'a dyn SentenceTokenizer) -> Self {
        Self { sentences }
    }

    /// True iff some sentence of `text` contains a question marker.
    /// Empty or unsegmentable text is never a question.
    pub fn is_question(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.sentences
            .sentences(text)
            .iter()
            .any(|sentence| sentence.contains(QUESTION_MARKERS))
    }
}
