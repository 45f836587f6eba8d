//! Application constants and configuration defaults.

/// Number of repliers reported when no limit is given.
pub const DEFAULT_TOP_N: usize = 10;

/// Character budget applied to the word-cloud corpus before normalization.
pub const DEFAULT_MAX_CORPUS_CHARS: usize = 50_000;

/// Default word-cloud width in pixels.
pub const DEFAULT_WIDTH: u32 = 1000;

/// Default word-cloud height in pixels.
pub const DEFAULT_HEIGHT: u32 = 800;

/// Default number of distinct words drawn in the cloud.
pub const DEFAULT_MAX_WORDS: usize = 200;

/// Smallest font size the layout will shrink a word to.
pub const DEFAULT_MIN_FONT_SIZE: f32 = 4.0;

/// Words shorter than this (in characters) are left out of the cloud.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 2;

/// File name of the rendered cloud inside the output directory.
pub const WORDCLOUD_FILE_NAME: &str = "wordcloud.png";

/// Characters that mark a sentence as a question (ASCII and Arabic/Persian).
pub const QUESTION_MARKERS: [char; 2] = ['?', '\u{061F}'];
