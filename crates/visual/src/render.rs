use crate::color::{palette_for, parse_color};
use crate::error::{RenderError, RenderResult};
use crate::frequency::word_frequencies;
use crate::layout::{layout, LayoutParams, Measure};
use ab_glyph::{FontVec, PxScale};
use chatstat_core::config::WordCloudConfig;
use chatstat_core::constants::{
    DEFAULT_HEIGHT, DEFAULT_MAX_WORDS, DEFAULT_MIN_FONT_SIZE, DEFAULT_MIN_WORD_LENGTH,
    DEFAULT_WIDTH,
};
use image::{DynamicImage, ImageFormat, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Turns a prepared corpus into an encoded image.
pub trait WordCloudRenderer {
    /// Render `text` and return the encoded image bytes.
    fn render(&self, text: &str, options: &RenderOptions) -> RenderResult<Vec<u8>>;
}

/// Canvas, font, and sizing options for one render.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Font able to draw the corpus script.
    pub font_path: Option<PathBuf>,
    /// Background color name or hex string.
    pub background: String,
    /// Maximum number of distinct words drawn.
    pub max_words: usize,
    /// Smallest font size.
    pub min_font_size: f32,
    /// Largest font size; derived from the height when absent.
    pub max_font_size: Option<f32>,
    /// Shortest word drawn, in characters.
    pub min_word_length: usize,
    /// Layout seed.
    pub seed: u64,
}

impl Default for RenderOptions {
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
        }
    }
}

impl From<&WordCloudConfig> for RenderOptions {
    fn from(config: &WordCloudConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            font_path: config.font_path.clone(),
            background: config.background.clone(),
            max_words: config.max_words,
            min_font_size: config.min_font_size,
            max_font_size: config.max_font_size,
            min_word_length: config.min_word_length,
            seed: config.seed,
        }
    }
}

impl RenderOptions {
    /// Largest font size used for the most frequent word.
    pub fn effective_max_font_size(&self) -> f32 {
        self.max_font_size
            .unwrap_or(self.height as f32 * 0.3)
            .max(self.min_font_size)
    }

    fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidOptions(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.min_font_size.is_nan() || self.min_font_size <= 0.0 {
            return Err(RenderError::InvalidOptions(
                "min_font_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// A loaded font resource.
pub struct FontResource {
    font: FontVec,
}

impl FontResource {
    /// Load a TrueType/OpenType font from disk.
    pub fn load(path: &Path) -> RenderResult<Self> {
        let data = std::fs::read(path)
            .map_err(|e| RenderError::Font(format!("{}: {}", path.display(), e)))?;
        let font = FontVec::try_from_vec(data)
            .map_err(|e| RenderError::Font(format!("{}: {}", path.display(), e)))?;
        Ok(Self { font })
    }
}

impl Measure for FontResource {
    fn measure(&self, word: &str, size: f32) -> (u32, u32) {
        text_size(PxScale::from(size), &self.font, word)
    }
}

/// Renderer drawing glyphs with `ab_glyph` onto an RGBA canvas, encoded as PNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlyphCloudRenderer;

impl GlyphCloudRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }
}

impl WordCloudRenderer for GlyphCloudRenderer {
    fn render(&self, text: &str, options: &RenderOptions) -> RenderResult<Vec<u8>> {
        options.validate()?;
        let background = parse_color(&options.background)?;

        let frequencies = word_frequencies(text, options.min_word_length, options.max_words);
        if frequencies.is_empty() {
            return Err(RenderError::EmptyText);
        }

        let font_path = options
            .font_path
            .as_deref()
            .ok_or_else(|| RenderError::Font("no font configured".to_string()))?;
        let font = FontResource::load(font_path)?;

        let params = LayoutParams {
            width: options.width,
            height: options.height,
            min_font_size: options.min_font_size,
            max_font_size: options.effective_max_font_size(),
            relative_scaling: 0.5,
            seed: options.seed,
        };
        let placed = layout(&frequencies, &params, &font);
        if placed.is_empty() {
            return Err(RenderError::NoRoom(options.width, options.height));
        }
        info!(
            "placed {} of {} words on {}x{} canvas",
            placed.len(),
            frequencies.len(),
            options.width,
            options.height
        );

        let palette = palette_for(background);
        let mut rng = fastrand::Rng::with_seed(options.seed);
        let mut canvas = RgbaImage::from_pixel(options.width, options.height, background);
        for word in &placed {
            let color = palette[rng.usize(..palette.len())];
            debug!("drawing '{}' at ({}, {}) size {:.1}", word.word, word.x, word.y, word.size);
            draw_text_mut(
                &mut canvas,
                color,
                word.x as i32,
                word.y as i32,
                PxScale::from(word.size),
                &font.font,
                &word.word,
            );
        }

        encode_png(canvas)
    }
}

fn encode_png(canvas: RgbaImage) -> RenderResult<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_corpus_is_rejected_before_font_loading() {
        let options = RenderOptions {
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
            ..RenderOptions::default()
        };
        let err = GlyphCloudRenderer::new().render("  ، ! ", &options).unwrap_err();
        assert!(matches!(err, RenderError::EmptyText));
    }

    #[test]
    fn missing_font_is_a_font_error() {
        let options = RenderOptions {
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
            ..RenderOptions::default()
        };
        let err = GlyphCloudRenderer::new().render("cat sat", &options).unwrap_err();
        assert!(matches!(err, RenderError::Font(_)));
    }

    #[test]
    fn unconfigured_font_is_a_font_error() {
        let err = GlyphCloudRenderer::new()
            .render("cat sat", &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Font(_)));
    }

    #[test]
    fn invalid_font_bytes_are_a_font_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").expect("write font");
        assert!(matches!(FontResource::load(&path), Err(RenderError::Font(_))));
    }

    #[test]
    fn zero_sized_canvas_is_invalid() {
        let options = RenderOptions {
            width: 0,
            ..RenderOptions::default()
        };
        let err = GlyphCloudRenderer::new().render("cat", &options).unwrap_err();
        assert!(matches!(err, RenderError::InvalidOptions(_)));
    }

    #[test]
    fn options_follow_config() {
        let config = WordCloudConfig {
            width: 320,
            background: "#000000".to_string(),
            max_font_size: Some(64.0),
            ..WordCloudConfig::default()
        };
        let options = RenderOptions::from(&config);
        assert_eq!(options.width, 320);
        assert_eq!(options.height, DEFAULT_HEIGHT);
        assert_eq!(options.background, "#000000");
        assert_eq!(options.effective_max_font_size(), 64.0);
    }

    #[test]
    fn derived_max_font_size_tracks_height() {
        let options = RenderOptions {
            height: 100,
            ..RenderOptions::default()
        };
        assert!((options.effective_max_font_size() - 30.0).abs() < 1e-3);
    }
}
