/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct, which sends single
 * segments to the configured provider. Failures never propagate out of
 * `translate_segment`: the original text comes back and the failure is
 * logged, so one bad request cannot stop a batch.
 */

use log::{debug, warn};
use std::sync::Arc;

use crate::app_config::{Config, TranslationConfig, TranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::providers::google::GoogleTranslate;
use crate::providers::ollama::Ollama;
use crate::providers::{Provider, TranslationRequest};
use crate::text::{skip_reason, SkipReason};

/// What happened to a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentOutcome {
    /// Empty or whitespace-only input, nothing sent
    Blank,
    /// Technical content kept verbatim, nothing sent
    Skipped(SkipReason),
    /// The provider returned a translation
    Translated,
    /// The provider failed; the original text was kept
    Failed,
}

/// Result of translating one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTranslation {
    /// Translated text, or the input when nothing was translated
    pub text: String,
    /// How the text was obtained
    pub outcome: SegmentOutcome,
}

impl SegmentTranslation {
    fn unchanged(text: &str, outcome: SegmentOutcome) -> Self {
        Self {
            text: text.to_string(),
            outcome,
        }
    }
}

/// Build the provider selected in the configuration
pub fn create_provider(config: &TranslationConfig) -> Arc<dyn Provider> {
    let provider_config = config.active_provider_config();
    let delay_ms = config.common.rate_limit_delay_ms;

    match config.provider {
        TranslationProvider::Google => Arc::new(GoogleTranslate::new(
            provider_config.endpoint,
            provider_config.timeout_secs,
            delay_ms,
        )),
        TranslationProvider::Ollama => Arc::new(Ollama::new(
            provider_config.endpoint,
            provider_config.model,
            provider_config.timeout_secs,
            delay_ms,
        )),
    }
}

/// Translation service for XLIFF segments
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Backend doing the actual translation
    provider: Arc<dyn Provider>,
    /// Language of the source texts
    source_language: String,
}

impl TranslationService {
    /// Create a service from the application configuration
    pub fn new(config: &Config) -> Self {
        Self::with_provider(create_provider(&config.translation), config.source_language.clone())
    }

    /// Create a service around an existing provider
    pub fn with_provider(provider: Arc<dyn Provider>, source_language: impl Into<String>) -> Self {
        Self {
            provider,
            source_language: source_language.into(),
        }
    }

    /// Name of the provider in use
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Language of the source texts
    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Translate one segment, best effort
    ///
    /// Blank and technical segments are returned without a request. Provider
    /// errors are logged and the original text is returned.
    pub async fn translate_segment(&self, text: &str, target_language: &str) -> SegmentTranslation {
        if text.trim().is_empty() {
            return SegmentTranslation::unchanged(text, SegmentOutcome::Blank);
        }

        if let Some(reason) = skip_reason(text) {
            debug!("Keeping '{}' verbatim ({:?})", text, reason);
            return SegmentTranslation::unchanged(text, SegmentOutcome::Skipped(reason));
        }

        let request = TranslationRequest::new(text, self.source_language.as_str(), target_language);
        match self.provider.complete(request).await {
            Ok(response) if !response.text.is_empty() => SegmentTranslation {
                text: response.text,
                outcome: SegmentOutcome::Translated,
            },
            Ok(_) => {
                warn!("Translation of '{}' came back empty, keeping the original", text);
                SegmentTranslation::unchanged(text, SegmentOutcome::Failed)
            }
            Err(e) => {
                warn!("Translation error for '{}': {}", text, e);
                SegmentTranslation::unchanged(text, SegmentOutcome::Failed)
            }
        }
    }

    /// Translate one segment and return only the text
    pub async fn translate_text(&self, text: &str, target_language: &str) -> String {
        self.translate_segment(text, target_language).await.text
    }

    /// Translate one segment, reporting failures to the caller
    ///
    /// Unlike `translate_segment` this always contacts the provider, skipping
    /// only blank input.
    pub async fn translate_strict(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let request = TranslationRequest::new(text, self.source_language.as_str(), target_language);
        let response = self.provider.complete(request).await?;
        if response.text.is_empty() {
            return Err(TranslationError::EmptyTranslation(text.to_string()));
        }
        Ok(response.text)
    }

    /// Check that the provider answers
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }
}
