/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the translation backends:
 * - Google: the public, unauthenticated `translate_a/single` endpoint
 * - Ollama: Local LLM server
 * - Mock: scripted provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single segment to translate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// The text to translate
    pub text: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

impl TranslationRequest {
    /// Create a new request
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// The provider's answer for one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    /// The translated text
    pub text: String,
}

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider name used in log lines
    fn name(&self) -> &str;

    /// Translate one segment
    ///
    /// # Arguments
    /// * `request` - The segment and language pair
    ///
    /// # Returns
    /// * `Result<TranslationResponse, ProviderError>` - The translation or an error
    async fn complete(&self, request: TranslationRequest) -> Result<TranslationResponse, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod google;
pub mod mock;
pub mod ollama;
pub mod throttle;
