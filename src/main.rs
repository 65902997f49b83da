// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod corpus;
mod cue_parser;
mod errors;
mod file_utils;
mod fingerprint;
mod matcher;
mod report;
mod transcriber;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Match unnamed videos to named subtitles by dialogue content (default command)
    Match(MatchArgs),

    /// Generate shell completions for vidmatch
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct MatchArgs {
    /// Files or directories containing videos to select from
    #[arg(short, long, value_name = "PATH")]
    source: Vec<PathBuf>,

    /// Files or directories containing subtitles with target names
    #[arg(short, long, value_name = "PATH")]
    target: Vec<PathBuf>,

    /// Video extensions to search directories for
    #[arg(short = 'f', long = "format", value_name = "EXT")]
    format: Vec<String>,

    /// Output directory for renamed video copies
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Minimum similarity for a match
    #[arg(short, long, value_name = "SCORE")]
    minsim: Option<f64>,

    /// Dry run only, report matches without copying
    #[arg(short, long)]
    dryrun: bool,

    /// Whisper model to transcribe with
    #[arg(short = 'w', long, value_name = "MODEL")]
    whisper_model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// vidmatch - Content-Based Video Matching
///
/// Matches video files lacking descriptive filenames to known-named subtitle
/// files by comparing the semantic content of their dialogue, then copies each
/// matched video under the matched name.
#[derive(Parser, Debug)]
#[command(name = "vidmatch")]
#[command(version = "1.0.0")]
#[command(about = "Match unnamed videos to named subtitles by dialogue content")]
#[command(long_about = "vidmatch transcribes unnamed videos, fingerprints their dialogue and matches
them against named subtitle files, copying each matched video under its
matched name.

EXAMPLES:
    vidmatch -s /rips -t /subs -o /named          # Match and copy
    vidmatch -s /rips -t /subs -d                 # Report matches only
    vidmatch -s a.mkv -s b.mkv -t /subs -d        # Explicit source files
    vidmatch -s /rips -t /subs -o /named -m 0.3   # Stricter threshold
    vidmatch completions bash > vidmatch.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    match_args: MatchArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "vidmatch", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Match(args)) => run_match(args).await,
        None => run_match(cli.match_args).await,
    }
}

async fn run_match(options: MatchArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if !options.format.is_empty() {
        config.video_extensions = options.format.clone();
    }

    if let Some(minsim) = options.minsim {
        config.min_similarity = minsim;
    }

    if options.dryrun {
        config.dry_run = true;
    }

    if let Some(output) = &options.output {
        config.output_dir = Some(output.clone());
    }

    if let Some(model) = &options.whisper_model {
        config.whisper.model = model.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(to_level_filter(&config.log_level));
    }

    if options.source.is_empty() {
        return Err(anyhow!("At least one --source path is required"));
    }
    if options.target.is_empty() {
        return Err(anyhow!("At least one --target path is required"));
    }

    // Create controller and run the matching workflow
    let controller = Controller::with_config(config)?;
    controller.run(&options.source, &options.target).await
}
