/*!
 * Integration tests for the HTTP providers against a local fake server
 */

use anyhow::Result;
use xliffwai::errors::ProviderError;
use xliffwai::providers::google::GoogleTranslate;
use xliffwai::providers::ollama::Ollama;
use xliffwai::providers::{Provider, TranslationRequest};
use crate::common;

/// Test that a Google response is parsed and the query carries the languages
#[tokio::test]
async fn test_google_complete_withValidResponse_shouldReturnTranslation() -> Result<()> {
    let (base_url, server) = common::serve_once(
        "200 OK",
        r#"[[["Sozlamalar","Settings",null,null,10]],null,"en",null,null,null,1.0]"#,
    )
    .await?;
    let client = GoogleTranslate::new(format!("{}/translate_a/single", base_url), 5, 0);

    let response = client.complete(TranslationRequest::new("Settings", "en", "uz")).await?;
    let request_head = server.await?;

    assert_eq!(response.text, "Sozlamalar");
    assert!(request_head.starts_with("GET /translate_a/single?"));
    assert!(request_head.contains("client=gtx"));
    assert!(request_head.contains("sl=en"));
    assert!(request_head.contains("tl=uz"));
    assert!(request_head.contains("dt=t"));
    assert!(request_head.contains("q=Settings"));
    Ok(())
}

/// Test that non-ASCII translations survive the round trip
#[tokio::test]
async fn test_google_complete_withCyrillicResponse_shouldDecodeUtf8() -> Result<()> {
    let (base_url, _server) = common::serve_once("200 OK", r#"[[["Созламалар","Settings",null,null,10]],null,"en"]"#).await?;
    let client = GoogleTranslate::new(base_url, 5, 0);

    let response = client.complete(TranslationRequest::new("Settings", "en", "uz")).await?;

    assert_eq!(response.text, "Созламалар");
    Ok(())
}

/// Test that an HTTP error status becomes an API error
#[tokio::test]
async fn test_google_complete_withTooManyRequests_shouldReturnApiError() -> Result<()> {
    let (base_url, _server) = common::serve_once("429 Too Many Requests", r#"{"error":"slow down"}"#).await?;
    let client = GoogleTranslate::new(base_url, 5, 0);

    let result = client.complete(TranslationRequest::new("Settings", "en", "uz")).await;

    match result {
        Err(ProviderError::ApiError { status_code, message }) => {
            assert_eq!(status_code, 429);
            assert!(message.contains("slow down"));
        }
        other => panic!("expected an API error, got {:?}", other),
    }
    Ok(())
}

/// Test that an unexpected body shape becomes a parse error
#[tokio::test]
async fn test_google_complete_withUnexpectedBody_shouldReturnParseError() -> Result<()> {
    let (base_url, _server) = common::serve_once("200 OK", r#"{"sentences":[]}"#).await?;
    let client = GoogleTranslate::new(base_url, 5, 0);

    let result = client.complete(TranslationRequest::new("Settings", "en", "uz")).await;

    assert!(matches!(result, Err(ProviderError::ParseError(_))));
    Ok(())
}

/// Test that a refused connection becomes a connection error
#[tokio::test]
async fn test_google_complete_withClosedPort_shouldReturnConnectionError() -> Result<()> {
    let client = GoogleTranslate::new(common::unreachable_endpoint()?, 2, 0);

    let result = client.complete(TranslationRequest::new("Settings", "en", "uz")).await;

    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
    assert!(client.test_connection().await.is_err());
    Ok(())
}

/// Test that the Ollama answer is trimmed and the prompt names both languages
#[tokio::test]
async fn test_ollama_complete_withValidResponse_shouldReturnTrimmedText() -> Result<()> {
    let (base_url, server) = common::serve_once(
        "200 OK",
        r#"{"model":"llama3.2:3b","created_at":"2024-01-01T00:00:00Z","response":"  Sozlamalar\n","done":true}"#,
    )
    .await?;
    let client = Ollama::new(base_url, "llama3.2:3b", 5, 0);

    let response = client.complete(TranslationRequest::new("Settings", "en", "uz")).await?;
    let request_head = server.await?;

    assert_eq!(response.text, "Sozlamalar");
    assert!(request_head.starts_with("POST /api/generate"));
    Ok(())
}

/// Test that an empty Ollama answer is an error
#[tokio::test]
async fn test_ollama_complete_withBlankResponse_shouldReturnParseError() -> Result<()> {
    let (base_url, _server) = common::serve_once(
        "200 OK",
        r#"{"model":"llama3.2:3b","response":"   ","done":true}"#,
    )
    .await?;
    let client = Ollama::new(base_url, "llama3.2:3b", 5, 0);

    let result = client.complete(TranslationRequest::new("Settings", "en", "uz")).await;

    assert!(matches!(result, Err(ProviderError::ParseError(_))));
    Ok(())
}

/// Test the Ollama connection check against the tags endpoint
#[tokio::test]
async fn test_ollama_test_connection_withRunningServer_shouldSucceed() -> Result<()> {
    let (base_url, server) = common::serve_once("200 OK", r#"{"models":[]}"#).await?;
    let client = Ollama::new(base_url, "llama3.2:3b", 5, 0);

    client.test_connection().await?;

    assert!(server.await?.starts_with("GET /api/tags"));
    Ok(())
}
