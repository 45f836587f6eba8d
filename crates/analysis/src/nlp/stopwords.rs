use super::Normalizer;
use chatstat_core::{Error, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

const BUILTIN_STOP_WORDS: &str = include_str!("../../data/stop_words.txt");

/// Stop-word set, normalized with the same normalizer applied to tokens.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Load a newline-delimited stop-word file. Lines are trimmed, blank lines
    /// skipped, and every entry normalized.
    pub fn load(path: &Path, normalizer: &dyn Normalizer) -> Result<Self> {
        info!("loading stop words from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::resource(format!(
                "failed to read stop words {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::from_lines(&content, normalizer))
    }

    /// The embedded Persian and English list.
    pub fn builtin(normalizer: &dyn Normalizer) -> Self {
        Self::from_lines(BUILTIN_STOP_WORDS, normalizer)
    }

    /// Build from individual words.
    pub fn from_words<I, S>(words: I, normalizer: &dyn Normalizer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| normalizer.normalize(word.as_ref().trim()))
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }

    fn from_lines(content: &str, normalizer: &dyn Normalizer) -> Self {
        Self::from_words(content.lines(), normalizer)
    }

    /// Check if an already normalized token is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{IdentityNormalizer, PersianNormalizer};

    #[test]
    fn load_trims_and_skips_blank_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("stop_words.txt");
        std::fs::write(&path, "  the \n\n\tof\n   \n").expect("write stop words");

        let stop_words = StopWords::load(&path, &IdentityNormalizer).expect("load stop words");
        assert_eq!(stop_words.len(), 2);
        assert!(stop_words.contains("the"));
        assert!(stop_words.contains("of"));
        assert!(!stop_words.contains(""));
    }

    #[test]
    fn entries_are_normalized() {
        let stop_words = StopWords::from_words(["كه", "يك"], &PersianNormalizer::new());
        assert!(stop_words.contains("که"));
        assert!(stop_words.contains("یک"));
        assert!(!stop_words.contains("كه"));
    }

    #[test]
    fn missing_file_is_resource_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = StopWords::load(&dir.path().join("absent.txt"), &IdentityNormalizer)
            .expect_err("missing file must fail");
        assert!(matches!(err, Error::Resource(_)));
    }

    #[test]
    fn builtin_list_covers_both_languages() {
        let stop_words = StopWords::builtin(&PersianNormalizer::new());
        assert!(stop_words.contains("the"));
        assert!(stop_words.contains("از"));
        assert!(!stop_words.contains("cat"));
    }
}
