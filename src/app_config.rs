/*!
 * Application configuration module.
 *
 * This module handles the application configuration including loading,
 * validating and saving configuration settings.
 */

use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language of the `<source>` texts (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Settings for the translate-to-new-language pass
    #[serde(default)]
    pub batch: BatchConfig,

    /// Settings for the Cyrillic normalization pass
    #[serde(default)]
    pub cyrillic: CyrillicConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Public Google Translate endpoint
    #[default]
    Google,
    // @provider: Ollama
    Ollama,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::Ollama => "Ollama",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Ollama => "ollama".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "ollama" => Ok(Self::Ollama),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name (Ollama only)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::Google => Self {
                provider_type: "google".to_string(),
                model: String::new(),
                endpoint: default_google_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: default_ollama_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default = "default_available_providers")]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: default_available_providers(),
            common: TranslationCommonConfig::default(),
        }
    }
}

impl TranslationConfig {
    /// Settings of the active provider, falling back to its defaults
    pub fn active_provider_config(&self) -> ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type.eq_ignore_ascii_case(&provider_str))
            .cloned()
            .unwrap_or_else(|| ProviderConfig::new(self.provider.clone()))
    }
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Minimum delay in milliseconds between consecutive requests
    #[serde(default = "default_rate_limit_delay_ms")]
    pub rate_limit_delay_ms: u64,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            rate_limit_delay_ms: default_rate_limit_delay_ms(),
        }
    }
}

/// Settings for translating `*.<source_suffix>.xlf` files into a new language
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchConfig {
    /// Locale suffix of input files (`Admin.en-US.xlf`)
    #[serde(default = "default_source_suffix")]
    pub source_suffix: String,

    /// Locale suffix of output files (`Admin.uz-UZ.xlf`)
    #[serde(default = "default_target_suffix")]
    pub target_suffix: String,

    /// Language requested from the provider and written to `target-language`
    #[serde(default = "default_batch_target_language")]
    pub target_language: String,

    /// Output directory, relative to the input directory
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            source_suffix: default_source_suffix(),
            target_suffix: default_target_suffix(),
            target_language: default_batch_target_language(),
            output_dir: default_output_dir(),
        }
    }
}

impl BatchConfig {
    /// File name ending that marks an input file
    pub fn input_ending(&self) -> String {
        format!(".{}.xlf", self.source_suffix)
    }

    /// File name ending given to output files
    pub fn output_ending(&self) -> String {
        format!(".{}.xlf", self.target_suffix)
    }
}

/// Settings for the Latin to Cyrillic normalization pass
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CyrillicConfig {
    /// Directory scanned recursively when no path is given
    #[serde(default = "default_output_dir")]
    pub root: String,

    /// Tag written to `target-language`
    #[serde(default = "default_cyrillic_tag")]
    pub target_language: String,

    /// File extensions that are processed
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for CyrillicConfig {
    fn default() -> Self {
        Self {
            root: default_output_dir(),
            target_language: default_cyrillic_tag(),
            extensions: default_extensions(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_ollama_timeout_secs() -> u64 {
    60
}

fn default_rate_limit_delay_ms() -> u64 {
    100 // keep the public endpoint from throttling us
}

fn default_google_endpoint() -> String {
    crate::providers::google::DEFAULT_ENDPOINT.to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_available_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(TranslationProvider::Google),
        ProviderConfig::new(TranslationProvider::Ollama),
    ]
}

fn default_source_suffix() -> String {
    "en-US".to_string()
}

fn default_target_suffix() -> String {
    "uz-UZ".to_string()
}

fn default_batch_target_language() -> String {
    "uz".to_string()
}

fn default_output_dir() -> String {
    "uz-UZ".to_string()
}

fn default_cyrillic_tag() -> String {
    "uz-Cyrl".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["xlf".to_string(), "xliff".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            translation: TranslationConfig::default(),
            batch: BatchConfig::default(),
            cyrillic: CyrillicConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load the configuration file, writing a default one if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            return serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path));
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        crate::language_utils::validate_language_code(&self.source_language)
            .context("Invalid source_language")?;
        crate::language_utils::validate_language_code(&self.batch.target_language)
            .context("Invalid batch.target_language")?;
        crate::language_utils::validate_language_code(&self.cyrillic.target_language)
            .context("Invalid cyrillic.target_language")?;

        if self.batch.source_suffix.is_empty() || self.batch.target_suffix.is_empty() {
            return Err(anyhow!("batch.source_suffix and batch.target_suffix must not be empty"));
        }
        if self.batch.source_suffix == self.batch.target_suffix {
            return Err(anyhow!("batch.source_suffix and batch.target_suffix must differ"));
        }
        if self.cyrillic.extensions.is_empty() {
            return Err(anyhow!("cyrillic.extensions must list at least one extension"));
        }

        let provider_config = self.translation.active_provider_config();
        if provider_config.endpoint.is_empty() {
            return Err(anyhow!(
                "An endpoint is required for the {} provider",
                self.translation.provider.display_name()
            ));
        }
        if self.translation.provider == TranslationProvider::Ollama && provider_config.model.is_empty() {
            return Err(anyhow!("A model name is required for the Ollama provider"));
        }

        Ok(())
    }
}
