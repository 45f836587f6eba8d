use crate::constants::{
    DEFAULT_HEIGHT, DEFAULT_MAX_CORPUS_CHARS, DEFAULT_MAX_WORDS, DEFAULT_MIN_FONT_SIZE,
    DEFAULT_MIN_WORD_LENGTH, DEFAULT_TOP_N, DEFAULT_WIDTH, WORDCLOUD_FILE_NAME,
};
use crate::Error;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for chatstat.
///
/// Every section and field has a default, so a partial TOML file loads.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ChatStatConfig {
    /// Reply attribution and corpus settings.
    pub analysis: AnalysisConfig,

    /// Word-cloud rendering settings.
    pub wordcloud: WordCloudConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of repliers to report.
    pub top_n: usize,

    /// Character budget for the word-cloud corpus, applied before normalization.
    pub max_corpus_chars: usize,

    /// Newline-delimited stop-word file. `None` uses the built-in list.
    pub stop_words_path: Option<PathBuf>,
}

/// Word-cloud configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WordCloudConfig {
    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,

    /// TrueType/OpenType font able to draw the transcript's script.
    pub font_path: Option<PathBuf>,

    /// Background color name or `#rrggbb`.
    pub background: String,

    /// Maximum number of distinct words drawn.
    pub max_words: usize,

    /// Smallest font size a word may shrink to before it is dropped.
    pub min_font_size: f32,

    /// Largest font size. `None` derives it from the canvas height.
    pub max_font_size: Option<f32>,

    /// Words shorter than this many characters are ignored.
    pub min_word_length: usize,

    /// Seed for the layout's random starting angles.
    pub seed: u64,

    /// File name written inside the output directory.
    pub output_file_name: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no verbosity flag is given.
    pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level.
    Error,

    /// Warning level.
    Warn,

    /// Info level.
    Info,

    /// Debug level.
    Debug,

    /// Trace level.
    Trace,
}

impl ChatStatConfig {
    /// Default location of the configuration file.
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))?
            .join("chatstat")
            .join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.max_corpus_chars == 0 {
            return Err(Error::config("analysis.max_corpus_chars must be positive"));
        }
        if self.wordcloud.width == 0 || self.wordcloud.height == 0 {
            return Err(Error::config(format!(
                "wordcloud size must be positive, got {}x{}",
                self.wordcloud.width, self.wordcloud.height
            )));
        }
        let min_font = self.wordcloud.min_font_size;
        if min_font.is_nan() || min_font <= 0.0 {
            return Err(Error::config("wordcloud.min_font_size must be positive"));
        }
        if let Some(max) = self.wordcloud.max_font_size {
            if max < self.wordcloud.min_font_size {
                return Err(Error::config(
                    "wordcloud.max_font_size must not be below min_font_size",
                ));
            }
        }
        if self.wordcloud.output_file_name.trim().is_empty() {
            return Err(Error::config("wordcloud.output_file_name must not be empty"));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            max_corpus_chars: DEFAULT_MAX_CORPUS_CHARS,
            stop_words_path: None,
        }
    }
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font_path: None,
            background: "white".to_string(),
            max_words: DEFAULT_MAX_WORDS,
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            max_font_size: None,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            seed: 0,
            output_file_name: WORDCLOUD_FILE_NAME.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[analysis]\nmax_corpus_chars = 1000\n\n[wordcloud]\nbackground = \"#101010\"\n",
        )
        .expect("write config");

        let config = ChatStatConfig::load(&path).expect("load config");
        assert_eq!(config.analysis.max_corpus_chars, 1000);
        assert_eq!(config.analysis.top_n, DEFAULT_TOP_N);
        assert_eq!(config.wordcloud.background, "#101010");
        assert_eq!(config.wordcloud.width, DEFAULT_WIDTH);
        assert_eq!(config.wordcloud.output_file_name, WORDCLOUD_FILE_NAME);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ChatStatConfig::default();
        config.analysis.top_n = 3;
        config.wordcloud.font_path = Some(PathBuf::from("/fonts/Vazir.ttf"));
        config.logging.level = LogLevel::Debug;
        config.save(&path).expect("save config");

        assert_eq!(ChatStatConfig::load(&path).expect("load config"), config);
    }

    #[test]
    fn validate_rejects_zero_sized_canvas() {
        let mut config = ChatStatConfig::default();
        config.wordcloud.height = 0;
        let err = config.validate().expect_err("zero height must be rejected");
        assert!(err.to_string().contains("wordcloud size must be positive"));
    }

    #[test]
    fn validate_rejects_zero_corpus_budget() {
        let mut config = ChatStatConfig::default();
        config.analysis.max_corpus_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ChatStatConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
