//! CLI command definitions for chatstat.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CHATSTAT_GIT_COMMIT"),
    ")"
);

/// Main CLI application.
#[derive(Parser, Debug)]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// Logging verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CHATSTAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank members by how often they reply to questions
    Repliers(RepliersArgs),

    /// Render a word cloud of the chat vocabulary
    Wordcloud(WordcloudArgs),

    /// Rank repliers and render the word cloud in one pass
    Report(ReportArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Reply ranking arguments.
#[derive(Args, Debug)]
pub struct RepliersArgs {
    /// Chat export (JSON)
    pub transcript: PathBuf,

    /// Ranking options.
    #[command(flatten)]
    pub ranking: RankingArgs,
}

/// Options shared by commands printing the ranking.
#[derive(Args, Debug, Clone)]
pub struct RankingArgs {
    /// Number of repliers to show
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Word-cloud arguments.
#[derive(Args, Debug)]
pub struct WordcloudArgs {
    /// Chat export (JSON)
    pub transcript: PathBuf,

    /// Word-cloud options.
    #[command(flatten)]
    pub render: RenderArgs,
}

/// Combined report arguments.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Chat export (JSON)
    pub transcript: PathBuf,

    /// Ranking options.
    #[command(flatten)]
    pub ranking: RankingArgs,

    /// Word-cloud options.
    #[command(flatten)]
    pub render: RenderArgs,
}

/// Word-cloud options. Anything left unset falls back to the config file.
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Directory the image is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Font able to draw the chat's script
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Newline-delimited stop-word file
    #[arg(long)]
    pub stop_words: Option<PathBuf>,

    /// Character budget for the corpus
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Background color (name or #rrggbb)
    #[arg(long)]
    pub background: Option<String>,
}

/// Configuration management arguments.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration action
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration actions.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
