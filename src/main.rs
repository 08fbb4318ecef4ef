// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use folder_translator::app_config::{self, Config};
use folder_translator::names::DisplayMode;
use folder_translator::operator::TerminalOperator;
use folder_translator::Controller;

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a folder tree (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for folder-translator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct TranslateArgs {
    /// Folder to translate; asked for interactively when omitted
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Destination language code (e.g., 'ru', 'en', 'zh-cn')
    #[arg(short, long)]
    target_language: Option<String>,

    /// How to show the translation: rename, prefix or suffix
    #[arg(short, long)]
    display_mode: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long)]
    yes: bool,
}

/// Folder Translator - translated copies of directory trees
///
/// Translates every folder and file name of a directory tree and writes the
/// result to a new folder next to the original.
#[derive(Parser, Debug)]
#[command(name = "folder-translator")]
#[command(version)]
#[command(about = "Translate folder and file names of a directory tree")]
#[command(long_about = "Folder Translator walks a folder, translates every folder and file name, \
and creates a translated copy next to it (e.g. 'Docs - Translated').

EXAMPLES:
    folder-translator ~/Docs -t ru              # Translate names to Russian
    folder-translator ~/Docs -t de -d suffix    # Keep originals: 'name [Name]'
    folder-translator                           # Ask for everything interactively
    folder-translator completions bash > folder-translator.bash

CONFIGURATION:
    Settings are read from conf.json by default. You can specify a different
    file with --config-path. Defaults are used when the file does not exist.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
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

    // @returns: ANSI colour code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
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
async fn main() {
    // The logger accepts everything; the effective level is set with set_max_level
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "folder-translator", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Load config, apply CLI overrides, validate
fn load_config(options: &TranslateArgs) -> Result<Config> {
    let mut config = Config::load_or_default(&options.config_path)?;

    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }

    if let Some(mode) = &options.display_mode {
        let parsed = DisplayMode::parse_lenient(mode);
        if !parsed.as_str().eq_ignore_ascii_case(mode.trim()) {
            warn!("Unknown display mode '{}', using '{}'", mode, parsed);
        }
        config.display_mode = Some(parsed);
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // Apply the command line level early so config loading can log
    if let Some(level) = &options.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config);
    let mut operator = TerminalOperator::stdio(options.yes);

    let summary = controller
        .run(options.input_path.clone(), &mut operator)
        .await?;

    log::info!("Done: {}", summary.destination_root.display());
    Ok(())
}
