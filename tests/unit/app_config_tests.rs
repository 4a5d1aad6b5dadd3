/*!
 * Tests for application configuration
 */

use anyhow::Result;
use std::fs;
use xliffwai::app_config::{Config, LogLevel, ProviderConfig, TranslationProvider};
use crate::common;

/// Test that the default configuration carries the documented defaults
#[test]
fn test_default_config_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.common.rate_limit_delay_ms, 100);
    assert_eq!(config.batch.source_suffix, "en-US");
    assert_eq!(config.batch.target_suffix, "uz-UZ");
    assert_eq!(config.batch.target_language, "uz");
    assert_eq!(config.batch.output_dir, "uz-UZ");
    assert_eq!(config.cyrillic.target_language, "uz-Cyrl");
    assert_eq!(config.cyrillic.extensions, vec!["xlf", "xliff"]);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test that file endings are derived from the suffixes
#[test]
fn test_batch_endings_shouldWrapSuffixes() {
    let config = Config::default();
    assert_eq!(config.batch.input_ending(), ".en-US.xlf");
    assert_eq!(config.batch.output_ending(), ".uz-UZ.xlf");
}

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.batch.target_language, "uz");
    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(written["translation"]["provider"], "google");
    Ok(())
}

/// Test that partial config files fall back to defaults for missing fields
#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "translation": { "provider": "ollama" }, "batch": { "target_language": "kk" }, "log_level": "debug" }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.batch.target_language, "kk");
    assert_eq!(config.batch.source_suffix, "en-US");
    assert_eq!(config.log_level, LogLevel::Debug);

    let ollama = config.translation.active_provider_config();
    assert_eq!(ollama.provider_type, "ollama");
    assert_eq!(ollama.endpoint, "http://localhost:11434");
    assert_eq!(ollama.model, "llama3.2:3b");
    Ok(())
}

/// Test that a broken config file is reported
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

/// Test that invalid language codes fail validation
#[test]
fn test_validate_withInvalidLanguage_shouldFail() {
    let mut config = Config::default();
    config.batch.target_language = "xx".to_string();
    assert!(config.validate().is_err());
}

/// Test that identical suffixes fail validation
#[test]
fn test_validate_withSameSuffixes_shouldFail() {
    let mut config = Config::default();
    config.batch.target_suffix = config.batch.source_suffix.clone();
    assert!(config.validate().is_err());
}

/// Test that a provider without endpoint fails validation
#[test]
fn test_validate_withEmptyEndpoint_shouldFail() {
    let mut config = Config::default();
    let mut google = ProviderConfig::new(TranslationProvider::Google);
    google.endpoint = String::new();
    config.translation.available_providers = vec![google];
    assert!(config.validate().is_err());
}

/// Test provider names parse and print consistently
#[test]
fn test_translationProvider_fromStr_shouldRoundTripNames() {
    let provider: TranslationProvider = "Ollama".parse().unwrap();
    assert_eq!(provider, TranslationProvider::Ollama);
    assert_eq!(provider.to_lowercase_string(), "ollama");
    assert_eq!(TranslationProvider::Google.display_name(), "Google Translate");
    assert!("deepl".parse::<TranslationProvider>().is_err());
}

/// Test log level mapping
#[test]
fn test_logLevel_toLevelFilter_shouldMatchLogCrate() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
