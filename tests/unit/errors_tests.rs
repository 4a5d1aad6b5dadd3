/*!
 * Tests for error types and conversions
 */

use xliffwai::errors::{AppError, ProviderError, TranslationError, XliffError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_connectionError_shouldDisplayCorrectly() {
    let error = ProviderError::ConnectionError("Host unreachable".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Connection error"));
    assert!(display.contains("Host unreachable"));
}

#[test]
fn test_xliffError_malformed_shouldDisplayPosition() {
    let error = XliffError::Malformed {
        position: 42,
        message: "unexpected end".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("byte 42"));
    assert!(display.contains("unexpected end"));
}

#[test]
fn test_xliffError_unbalanced_shouldNameBothTags() {
    let error = XliffError::Unbalanced {
        expected: "target".to_string(),
        found: "source".to_string(),
    };
    assert_eq!(error.to_string(), "Unbalanced element: expected </target>, found </source>");
}

#[test]
fn test_translationError_fromProviderError_shouldWrapIt() {
    let error: TranslationError = ProviderError::ParseError("bad json".to_string()).into();
    assert!(matches!(error, TranslationError::Provider(ProviderError::ParseError(_))));
    assert!(error.to_string().contains("bad json"));
}

#[test]
fn test_appError_fromXliffError_shouldWrapIt() {
    let error: AppError = XliffError::MissingRoot.into();
    assert!(matches!(error, AppError::Xliff(XliffError::MissingRoot)));
    assert!(error.to_string().contains("no root element"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.xlf");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(_)));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(ref message) if message == "something odd"));
}
