/*!
 * Google Translate provider using the public `gtx` web endpoint.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::throttle::RequestThrottle;
use crate::providers::{Provider, TranslationRequest, TranslationResponse};

/// Public endpoint used by the `gtx` web client
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Client for the unauthenticated Google Translate endpoint
///
/// The endpoint answers a GET with a nested JSON array; the first element of
/// the first sentence block is the translated text:
/// `[[["Sozlamalar","Settings",null,null,10]],null,"en"]`.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint URL
    endpoint: String,
    /// Spacing between consecutive requests
    throttle: RequestThrottle,
}

impl GoogleTranslate {
    /// Create a new client
    ///
    /// An empty endpoint falls back to [`DEFAULT_ENDPOINT`].
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64, rate_limit_delay_ms: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: if endpoint.is_empty() { DEFAULT_ENDPOINT.to_string() } else { endpoint },
            throttle: RequestThrottle::new(Duration::from_millis(rate_limit_delay_ms)),
        }
    }

    /// Build the GET URL for a request
    pub fn request_url(&self, request: &TranslationRequest) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", request.source_language.as_str()),
                ("tl", request.target_language.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", self.endpoint, e)))
    }

    /// Pull the first translated-text token out of the response body
    pub fn extract_translation(body: &Value) -> Result<String, ProviderError> {
        let text = body
            .get(0)
            .and_then(|sentences| sentences.get(0))
            .and_then(|sentence| sentence.get(0))
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::ParseError(format!("Unexpected response shape: {}", body)))?;

        if text.is_empty() {
            return Err(ProviderError::ParseError("Response contains an empty translation".to_string()));
        }

        Ok(text.to_string())
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
    }

    async fn complete(&self, request: TranslationRequest) -> Result<TranslationResponse, ProviderError> {
        let url = self.request_url(&request)?;

        self.throttle.wait().await;
        debug!("GET {} ({} -> {})", self.endpoint, request.source_language, request.target_language);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(TranslationResponse {
            text: Self::extract_translation(&value)?,
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete(TranslationRequest::new("Hello", "en", "de")).await?;
        Ok(())
    }
}
