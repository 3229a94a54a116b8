// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::{Config, PromptAnswers, TranslationProvider};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod language_utils;
mod providers;
mod subtitle_processor;
mod translation_service;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Libretranslate,
    Deepl,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Libretranslate => TranslationProvider::LibreTranslate,
            CliTranslationProvider::Deepl => TranslationProvider::DeepL,
        }
    }
}

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
    /// Translate subtitle files (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for subtrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input subtitle file or directory to scan recursively
    #[arg(value_name = "INPUT_PATH", default_value = ".")]
    input_path: PathBuf,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Endpoint URL for the active provider
    #[arg(long)]
    endpoint: Option<String>,

    /// API key for the active provider
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Source language code (e.g. 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'bg')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Output root folder; pass an empty string to write beside the sources
    #[arg(short, long)]
    output_folder: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Select the provider interactively instead of from config/flags
    #[arg(short, long)]
    interactive: bool,
}

/// subtrans - Batch subtitle translation
///
/// Translates every .srt file under a directory from a source language to a
/// target language using LibreTranslate or DeepL, skipping files that are
/// already translated.
#[derive(Parser, Debug)]
#[command(name = "subtrans")]
#[command(version = "1.0.0")]
#[command(about = "Batch subtitle translation via LibreTranslate or DeepL")]
#[command(long_about = "subtrans scans a directory tree for .srt subtitle files and translates them
line by line through LibreTranslate or DeepL, writing the results into a
mirrored output tree. Already-translated files are skipped, so an interrupted
run can simply be restarted.

EXAMPLES:
    subtrans                                   # Translate ./**/*.srt using conf.json
    subtrans /media/series                     # Translate a specific directory
    subtrans movie.srt                         # Translate a single file
    subtrans -p deepl -k $DEEPL_KEY .          # Use DeepL with an API key
    subtrans -p libretranslate --endpoint http://localhost:5000/translate .
    subtrans -i                                # Pick the provider interactively
    subtrans -o '' .                           # Write translations beside sources
    subtrans completions bash > subtrans.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    libretranslate - LibreTranslate server (default: http://localhost:5000/translate)
    deepl          - DeepL API (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file or directory to scan recursively
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Endpoint URL for the active provider
    #[arg(long)]
    endpoint: Option<String>,

    /// API key for the active provider
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Source language code (e.g. 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'bg')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Output root folder; pass an empty string to write beside the sources
    #[arg(short, long)]
    output_folder: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Select the provider interactively instead of from config/flags
    #[arg(short, long)]
    interactive: bool,
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

    // @returns: Marker for log level
    fn get_marker_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "     ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
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
            let marker = Self::get_marker_for_level(record.level());

            let color = match record.level() {
                Level::Error => "\x1B[1;31m",
                Level::Warn => "\x1B[1;33m",
                Level::Info => "\x1B[1;32m",
                Level::Debug => "\x1B[1;36m",
                Level::Trace => "\x1B[1;35m",
            };

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                marker,
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
            generate(shell, &mut cmd, "subtrans", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let translate_args = TranslateArgs {
                input_path: cli.input_path.unwrap_or_else(|| PathBuf::from(".")),
                provider: cli.provider,
                endpoint: cli.endpoint,
                api_key: cli.api_key,
                source_language: cli.source_language,
                target_language: cli.target_language,
                output_folder: cli.output_folder,
                config_path: cli.config_path,
                log_level: cli.log_level,
                interactive: cli.interactive,
            };
            run_translate(translate_args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    let config = if options.interactive {
        // Provider choice, endpoint/key, and output folder come from the
        // terminal; everything else keeps defaults plus CLI overrides
        let answers = collect_prompt_answers()?;
        let mut config = Config::from_prompt_answers(&answers)?;
        apply_cli_overrides(&mut config, &options);
        config
    } else {
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

            let config_json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize default config to JSON")?;

            std::fs::write(config_path, config_json)
                .context(format!("Failed to write default config to file: {}", config_path))?;

            config
        };

        apply_cli_overrides(&mut config, &options);
        config
    };

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    // Create controller and run on the input path
    let controller = Controller::with_config(config)?;
    controller.run(options.input_path).await
}

/// Override config file values with any provided command line options
fn apply_cli_overrides(config: &mut Config, options: &TranslateArgs) {
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    let provider_str = config.translation.provider.to_lowercase_string();

    if let Some(endpoint) = &options.endpoint {
        if let Some(provider_config) = config
            .translation
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
        {
            provider_config.endpoint = endpoint.clone();
        }
    }

    if let Some(api_key) = &options.api_key {
        if let Some(provider_config) = config
            .translation
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
        {
            provider_config.api_key = api_key.clone();
        }
    }

    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(output_folder) = &options.output_folder {
        config.output_folder = output_folder.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

/// Ask for the provider selection on the terminal. Parsing and validation of
/// the raw answers happens in Config::from_prompt_answers.
fn collect_prompt_answers() -> Result<PromptAnswers> {
    println!("Select translation service:");
    println!("1. LibreTranslate");
    println!("2. DeepL");
    let provider_choice = prompt_line("Enter 1 or 2: ")?;

    let endpoint_or_key = match provider_choice.trim() {
        "1" => prompt_line("LibreTranslate server URL (empty for http://localhost:5000/translate): ")?,
        "2" => prompt_line("DeepL API key: ")?,
        other => return Err(anyhow!("Invalid provider selection: {}", other)),
    };

    let use_output_folder =
        prompt_line("Write translated files into a separate output folder? (y/n): ")?;

    Ok(PromptAnswers {
        provider_choice,
        endpoint_or_key,
        use_output_folder,
    })
}

// Read one answer from stdin, echoing the prompt without a newline
fn prompt_line(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("Failed to read from stdin")?;

    Ok(answer.trim().to_string())
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
