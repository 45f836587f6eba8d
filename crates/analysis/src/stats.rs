//! One pipeline run over a transcript: reply attribution and word cloud.

use crate::nlp::{NlpToolkit, StopWords};
use crate::parsers::load_transcript;
use crate::question::QuestionDetector;
use crate::replies::ReplyAttributionEngine;
use crate::vocabulary::VocabularyAggregator;
use chatstat_core::config::{AnalysisConfig, WordCloudConfig};
use chatstat_core::{Result, Transcript};
use chatstat_visual::{RenderOptions, WordCloudRenderer};
use once_cell::unsync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Chat statistics over one loaded transcript.
///
/// The transcript and language toolkit are loaded once and stay read-only for
/// the lifetime of the value. Stop words are only needed for the corpus and
/// are loaded on first use, so a broken stop-word list never blocks the reply
/// ranking.
pub struct ChatStatistics {
    transcript: Transcript,
    toolkit: NlpToolkit,
    stop_words: OnceCell<StopWords>,
    config: AnalysisConfig,
}

impl ChatStatistics {
    /// Load the transcript at `path`. The stop words named by `config` are
    /// read when the corpus is first built.
    pub fn from_file(path: &Path, config: AnalysisConfig) -> Result<Self> {
        let transcript = load_transcript(path)?;
        Ok(Self {
            transcript,
            toolkit: NlpToolkit::persian(),
            stop_words: OnceCell::new(),
            config,
        })
    }

    /// Assemble from already loaded parts.
    pub fn new(
        transcript: Transcript,
        toolkit: NlpToolkit,
        stop_words: StopWords,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            transcript,
            toolkit,
            stop_words: OnceCell::with_value(stop_words),
            config,
        }
    }

    /// Stop words from the configured file, or the built-in list when none
    /// is configured.
    fn stop_words(&self) -> Result<&StopWords> {
        self.stop_words.get_or_try_init(|| {
            let normalizer = self.toolkit.normalizer.as_ref();
            let stop_words = match &self.config.stop_words_path {
                Some(path) => StopWords::load(path, normalizer)?,
                None => {
                    info!("loading built-in stop words");
                    StopWords::builtin(normalizer)
                }
            };
            info!("{} stop words loaded", stop_words.len());
            Ok(stop_words)
        })
    }

    /// The loaded transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    fn engine(&self) -> ReplyAttributionEngine<'_> {
        ReplyAttributionEngine::new(QuestionDetector::new(self.toolkit.sentences.as_ref()))
    }

    /// The `top_n` users who most often answered someone's question.
    pub fn top_repliers(&self, top_n: usize) -> Vec<(String, usize)> {
        self.engine().compute_top_repliers(&self.transcript, top_n)
    }

    /// The corpus handed to the renderer, cut to the configured budget.
    pub fn corpus(&self) -> Result<String> {
        let stop_words = self.stop_words()?;
        info!("loading text");
        Ok(VocabularyAggregator::new(&self.toolkit).build_corpus(
            &self.transcript,
            stop_words,
            self.config.max_corpus_chars,
        ))
    }

    /// Render the word cloud into `output_dir` and return the written path.
    ///
    /// The image is written to a temporary file and renamed into place, so
    /// the target either holds a complete image or is left untouched.
    pub fn generate_wordcloud(
        &self,
        output_dir: &Path,
        renderer: &dyn WordCloudRenderer,
        wordcloud: &WordCloudConfig,
    ) -> Result<PathBuf> {
        let corpus = self.corpus()?;

        info!("generating word cloud");
        let bytes = renderer.render(&corpus, &RenderOptions::from(wordcloud))?;

        std::fs::create_dir_all(output_dir)?;
        let target = output_dir.join(&wordcloud.output_file_name);
        let staging = output_dir.join(format!(".{}.tmp", wordcloud.output_file_name));

        info!("saving word cloud to {}", target.display());
        if let Err(e) = std::fs::write(&staging, &bytes).and_then(|_| std::fs::rename(&staging, &target)) {
            if let Err(cleanup) = std::fs::remove_file(&staging) {
                warn!("failed to remove {}: {}", staging.display(), cleanup);
            }
            return Err(e.into());
        }
        Ok(target)
    }
}
