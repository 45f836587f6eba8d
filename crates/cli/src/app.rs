//! CLI application entry point and configuration.
//!
//! This module provides the main CLI application logic, including argument parsing,
//! configuration loading, and command dispatch.

use crate::commands::{
    Cli, Commands, ConfigCommand, OutputFormat, RankingArgs, RenderArgs, ReportArgs, RepliersArgs,
    WordcloudArgs,
};
use crate::error::{CliError, Result};
use chatstat_analysis::ChatStatistics;
use chatstat_core::config::LogLevel;
use chatstat_core::ChatStatConfig;
use chatstat_visual::GlyphCloudRenderer;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};

/// Main CLI application.
#[derive(Debug)]
pub struct App {
    /// Effective configuration: defaults, then the config file.
    pub config: ChatStatConfig,
    /// Where the configuration was read from, or would be written to.
    pub config_path: Option<PathBuf>,
    /// Parsed CLI arguments.
    pub cli: Cli,
}

impl App {
    /// Create a new application instance from command line arguments.
    pub fn new() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    /// Create an application instance from already parsed arguments.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let (config, config_path) = Self::load_config(&cli)?;
        Ok(Self {
            config,
            config_path,
            cli,
        })
    }

    /// Load configuration from the file named on the command line (or in
    /// `CHATSTAT_CONFIG`), else from the default location when it exists.
    fn load_config(cli: &Cli) -> Result<(ChatStatConfig, Option<PathBuf>)> {
        if let Some(config_path) = &cli.config {
            if !config_path.exists() {
                // `config init` creates the file
                if matches!(&cli.command, Commands::Config(_)) {
                    return Ok((ChatStatConfig::default(), Some(config_path.clone())));
                }
                return Err(CliError::Config(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            let config = ChatStatConfig::load(config_path)?;
            return Ok((config, Some(config_path.clone())));
        }

        let default_path = ChatStatConfig::default_path().ok();
        match default_path {
            Some(path) if path.exists() => {
                let config = ChatStatConfig::load(&path)?;
                Ok((config, Some(path)))
            }
            other => Ok((ChatStatConfig::default(), other)),
        }
    }

    /// Run the application.
    pub fn run(self) -> Result<()> {
        self.setup_logging();

        match &self.cli.command {
            Commands::Repliers(args) => self.handle_repliers(args),
            Commands::Wordcloud(args) => self.handle_wordcloud(args),
            Commands::Report(args) => self.handle_report(args),
            Commands::Config(args) => self.handle_config(&args.command),
        }
    }

    /// Set up logging based on verbosity level, falling back to the
    /// configured level when no `-v` was given.
    fn setup_logging(&self) {
        let level = match self.cli.verbose {
            0 => level_for(self.config.logging.level),
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .ok(); // Ignore errors if a subscriber is already installed
    }

    fn handle_repliers(&self, args: &RepliersArgs) -> Result<()> {
        let stats = ChatStatistics::from_file(&args.transcript, self.config.analysis.clone())?;
        print_repliers(&stats, &args.ranking, &self.config)
    }

    fn handle_wordcloud(&self, args: &WordcloudArgs) -> Result<()> {
        let config = with_render_overrides(&self.config, &args.render)?;
        let stats = ChatStatistics::from_file(&args.transcript, config.analysis.clone())?;
        let path = stats.generate_wordcloud(
            &args.render.output_dir,
            &GlyphCloudRenderer::new(),
            &config.wordcloud,
        )?;
        println!("Word cloud saved to {}", path.display());
        Ok(())
    }

    fn handle_report(&self, args: &ReportArgs) -> Result<()> {
        let config = with_render_overrides(&self.config, &args.render)?;
        let stats = ChatStatistics::from_file(&args.transcript, config.analysis.clone())?;

        print_repliers(&stats, &args.ranking, &config)?;

        match stats.generate_wordcloud(
            &args.render.output_dir,
            &GlyphCloudRenderer::new(),
            &config.wordcloud,
        ) {
            Ok(path) => {
                println!("Word cloud saved to {}", path.display());
                Ok(())
            }
            Err(e) => {
                error!("word cloud was not generated");
                Err(e.into())
            }
        }
    }

    fn handle_config(&self, command: &ConfigCommand) -> Result<()> {
        match command {
            ConfigCommand::Init { force } => {
                let path = self.config_path.clone().ok_or_else(|| {
                    CliError::Config(
                        "no configuration directory on this platform, pass --config".to_string(),
                    )
                })?;
                init_config(&path, *force)?;
                println!("Configuration written to {}", path.display());
                Ok(())
            }
            ConfigCommand::Show => {
                println!("{}", render_config(&self.config)?);
                Ok(())
            }
        }
    }
}

fn level_for(level: LogLevel) -> Level {
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

/// Apply command-line word-cloud options on top of the loaded configuration.
pub fn with_render_overrides(config: &ChatStatConfig, args: &RenderArgs) -> Result<ChatStatConfig> {
    let mut config = config.clone();

    if let Some(font) = &args.font {
        config.wordcloud.font_path = Some(font.clone());
    }
    if let Some(stop_words) = &args.stop_words {
        config.analysis.stop_words_path = Some(stop_words.clone());
    }
    if let Some(max_chars) = args.max_chars {
        config.analysis.max_corpus_chars = max_chars;
    }
    if let Some(width) = args.width {
        config.wordcloud.width = width;
    }
    if let Some(height) = args.height {
        config.wordcloud.height = height;
    }
    if let Some(background) = &args.background {
        config.wordcloud.background = background.clone();
    }

    config.validate()?;
    Ok(config)
}

fn print_repliers(stats: &ChatStatistics, args: &RankingArgs, config: &ChatStatConfig) -> Result<()> {
    let top_n = args.top.unwrap_or(config.analysis.top_n);
    let ranking = stats.top_repliers(top_n);
    info!("{} repliers ranked", ranking.len());
    println!("{}", format_repliers(&ranking, args.format)?);
    Ok(())
}

/// Format a ranking for display.
pub fn format_repliers(ranking: &[(String, usize)], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = ranking
                .iter()
                .enumerate()
                .map(|(index, (author, replies))| {
                    serde_json::json!({
                        "rank": index + 1,
                        "author": author,
                        "replies": replies,
                    })
                })
                .collect();
            serde_json::to_string_pretty(&entries)
                .map_err(|e| CliError::Serialization(e.to_string()))
        }
        OutputFormat::Text => {
            if ranking.is_empty() {
                return Ok("No replies to questions found.".to_string());
            }
            let width = ranking
                .iter()
                .map(|(author, _)| author.chars().count())
                .max()
                .unwrap_or(0);
            let lines: Vec<String> = ranking
                .iter()
                .enumerate()
                .map(|(index, (author, replies))| {
                    format!("{:>3}. {:<width$}  {}", index + 1, author, replies, width = width)
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

fn render_config(config: &ChatStatConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::Serialization(e.to_string()))
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists, use --force to overwrite",
            path.display()
        )));
    }
    ChatStatConfig::default().save(path)?;
    Ok(())
}

/// Parse command line arguments and run the application.
pub fn run() -> Result<()> {
    let app = App::new()?;
    app.run()
}
