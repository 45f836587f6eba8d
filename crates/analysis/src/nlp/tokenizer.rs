use super::{SentenceTokenizer, WordTokenizer};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([!.?⸮؟]+)[ \n]+").expect("sentence end regex"));
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph break regex"));

/// Sentence splitter keyed on terminal punctuation and blank lines.
///
/// A run of `. ! ? ؟ ⸮` followed by a space or newline ends a sentence; the
/// punctuation stays with the sentence it ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexSentenceTokenizer;

impl RegexSentenceTokenizer {
    /// Create a new sentence tokenizer.
    pub fn new() -> Self {
        Self
    }
}

impl SentenceTokenizer for RegexSentenceTokenizer {
    fn sentences(&self, text: &str) -> Vec<String> {
        let marked = SENTENCE_END.replace_all(text, "$1\n\n");
        PARAGRAPH_BREAK
            .split(&marked)
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Word splitter following Unicode word boundaries (UAX #29).
///
/// Punctuation comes out as separate tokens. Zero-width non-joiners stay
/// inside the word they belong to.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new word tokenizer.
    pub fn new() -> Self {
        Self
    }
}

impl WordTokenizer for UnicodeWordTokenizer {
    fn words(&self, text: &str) -> Vec<String> {
        text.split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .map(String::from)
            .collect()
    }
}
