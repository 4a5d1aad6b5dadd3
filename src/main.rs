// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use xliffwai::app_config::{self, Config, TranslationProvider};
use xliffwai::app_controller::{BatchSummary, Controller};
use xliffwai::language_utils;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Ollama,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
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
    /// Translate *.<source-suffix>.xlf files into a new language
    Translate(TranslateArgs),

    /// Convert XLIFF files to Uzbek Cyrillic in place
    Cyrillic(CyrillicArgs),

    /// Remove comments inside <target> elements
    StripComments {
        /// XLIFF file, or directory searched recursively
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Translate a single string and print it
    Text {
        /// Text to translate
        text: String,

        /// Target language code (defaults to batch.target_language)
        #[arg(short, long)]
        target_language: Option<String>,
    },

    /// Generate shell completions for xliffwai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Directory holding the source files
    #[arg(value_name = "DIR", default_value = ".")]
    input_dir: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Target language code (e.g., 'uz', 'kk')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Locale suffix of input files
    #[arg(long)]
    source_suffix: Option<String>,

    /// Locale suffix of output files
    #[arg(long)]
    target_suffix: Option<String>,

    /// Output directory, relative to DIR
    #[arg(long)]
    output_dir: Option<String>,
}

#[derive(Parser, Debug)]
struct CyrillicArgs {
    /// Directory scanned recursively (defaults to cyrillic.root)
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,

    /// Tag written to target-language (e.g., 'uz-Cyrl')
    #[arg(long)]
    tag: Option<String>,
}

/// XLIFFwAI - XLIFF translation and Uzbek Cyrillic conversion
#[derive(Parser, Debug)]
#[command(name = "xliffwai")]
#[command(version)]
#[command(about = "Batch translation of XLIFF 1.2 localization files")]
#[command(long_about = "xliffwai fills XLIFF 1.2 files through a translation service and converts Uzbek Latin targets to Cyrillic.

EXAMPLES:
    xliffwai translate translations/            # en-US files -> translations/uz-UZ/*.uz-UZ.xlf
    xliffwai translate -f -t kk --target-suffix kk-KZ --output-dir kk-KZ .
    xliffwai cyrillic uz-UZ/                     # Convert every target under uz-UZ/ to Cyrillic
    xliffwai strip-comments Admin.uz-UZ.xlf      # Drop comments inside <target> elements
    xliffwai text \"Please enter your name\"       # Translate one string
    xliffwai completions bash > xliffwai.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    google - Public Google Translate endpoint (default)
    ollama - Local Ollama server (default: llama3.2:3b)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Translation provider to use
    #[arg(short, long, global = true, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation (Ollama)
    #[arg(short, long, global = true)]
    model: Option<String>,
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

    // @returns: Marker and ANSI color for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "\x1B[1;31m"),
            Level::Warn => ("WARN ", "\x1B[1;33m"),
            Level::Info => ("INFO ", "\x1B[1;32m"),
            Level::Debug => ("DEBUG", "\x1B[1;36m"),
            Level::Trace => ("TRACE", "\x1B[1;35m"),
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
            let (marker, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "xliffwai", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(log_level) = &cli.log_level {
        let level: app_config::LogLevel = log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    apply_global_overrides(&mut config, &cli);

    match cli.command {
        Commands::Translate(args) => {
            apply_translate_overrides(&mut config, &args);
            let controller = create_controller(config)?;
            let summary = controller.run_translate(&args.input_dir, args.force_overwrite).await?;
            report(&summary);
        }
        Commands::Cyrillic(args) => {
            if let Some(tag) = &args.tag {
                config.cyrillic.target_language = tag.clone();
            }
            let root = args
                .root
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.cyrillic.root));
            let controller = create_controller(config)?;
            let summary = controller.run_cyrillic(&root).await?;
            report(&summary);
        }
        Commands::StripComments { path } => {
            let controller = create_controller(config)?;
            let summary = controller.run_strip_comments(&path)?;
            report(&summary);
        }
        Commands::Text { text, target_language } => {
            if let Some(target_language) = target_language {
                config.batch.target_language = target_language;
            }
            let controller = create_controller(config)?;
            let target_language = controller.config().batch.target_language.clone();
            let translated = controller.translate_text(&text, &target_language).await?;
            println!("{}", translated);
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

fn apply_global_overrides(config: &mut Config, cli: &CommandLineOptions) {
    if let Some(provider) = &cli.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &cli.model {
        // Find the provider config and update the model
        let provider_str = config.translation.provider.to_lowercase_string();
        if let Some(provider_config) = config
            .translation
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type.eq_ignore_ascii_case(&provider_str))
        {
            provider_config.model = model.clone();
        }
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }
}

fn apply_translate_overrides(config: &mut Config, args: &TranslateArgs) {
    if let Some(target_language) = &args.target_language {
        config.batch.target_language = target_language.clone();
    }
    if let Some(source_suffix) = &args.source_suffix {
        config.batch.source_suffix = source_suffix.clone();
    }
    if let Some(target_suffix) = &args.target_suffix {
        config.batch.target_suffix = target_suffix.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.batch.output_dir = output_dir.clone();
    }
}

fn create_controller(config: Config) -> Result<Controller> {
    config.validate().context("Configuration validation failed")?;

    let language_name = language_utils::get_language_name(&config.batch.target_language)?;
    info!(
        "Provider: {}, source language: {}, default target: {} ({})",
        config.translation.provider.display_name(),
        config.source_language,
        config.batch.target_language,
        language_name
    );

    Controller::with_config(config)
}

fn report(summary: &BatchSummary) {
    if summary.failed > 0 {
        warn!("{} file(s) failed, see the errors above", summary.failed);
    }
}
