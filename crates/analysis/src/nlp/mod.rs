//! Language capabilities used by the analysis pipeline.
//!
//! Each capability is a single-method trait so the pipeline can be run with
//! different language models. The shipped implementations target Persian and
//! Arabic-script chats and pass Latin text through unchanged apart from digit
//! and whitespace normalization.

mod normalizer;
mod reshaper;
mod stopwords;
mod tokenizer;

pub use normalizer::PersianNormalizer;
pub use reshaper::ArabicReshaper;
pub use stopwords::StopWords;
pub use tokenizer::{RegexSentenceTokenizer, UnicodeWordTokenizer};

/// Maps orthographic variants to canonical forms.
pub trait Normalizer: Send + Sync {
    /// Normalize `text`. Must be idempotent.
    fn normalize(&self, text: &str) -> String;
}

/// Splits text into an ordered sequence of sentences.
pub trait SentenceTokenizer: Send + Sync {
    /// Sentences of `text` in order. Empty input yields no sentences.
    fn sentences(&self, text: &str) -> Vec<String>;
}

/// Splits text into an ordered sequence of word tokens.
pub trait WordTokenizer: Send + Sync {
    /// Tokens of `text` in order, without whitespace.
    fn words(&self, text: &str) -> Vec<String>;
}

/// Rewrites right-to-left text into contextual glyph forms for rendering.
pub trait Reshaper: Send + Sync {
    /// Reshape `text`.
    fn reshape(&self, text: &str) -> String;
}

/// The language capabilities of one pipeline run, built once and passed
/// explicitly to each component.
pub struct NlpToolkit {
    /// Text normalizer.
    pub normalizer: Box<dyn Normalizer>,
    /// Sentence splitter.
    pub sentences: Box<dyn SentenceTokenizer>,
    /// Word splitter.
    pub words: Box<dyn WordTokenizer>,
    /// Glyph reshaper.
    pub reshaper: Box<dyn Reshaper>,
}

impl NlpToolkit {
    /// Persian/Arabic toolkit built from the shipped implementations.
    pub fn persian() -> Self {
        Self {
            normalizer: Box::new(PersianNormalizer::new()),
            sentences: Box::new(RegexSentenceTokenizer::new()),
            words: Box::new(UnicodeWordTokenizer::new()),
            reshaper: Box::new(ArabicReshaper::new()),
        }
    }

    /// Replace the normalizer.
    pub fn with_normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    /// Replace the reshaper.
    pub fn with_reshaper(mut self, reshaper: impl Reshaper + 'static) -> Self {
        self.reshaper = Box::new(reshaper);
        self
    }
}

impl Default for NlpToolkit {
    fn default() -> Self {
        Self::persian()
    }
}

/// Normalizer that returns its input unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityNormalizer;

impl Normalizer for IdentityNormalizer {
    fn normalize(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Reshaper that returns its input unchanged, for left-to-right transcripts.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityReshaper;

impl Reshaper for IdentityReshaper {
    fn reshape(&self, text: &str) -> String {
        text.to_string()
    }
}
