/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use folder_translator::errors::{AppError, ProviderError, TranslationError};

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
fn test_translationError_misaligned_shouldShowCounts() {
    let error = TranslationError::MisalignedResults { expected: 3, actual: 2 };
    let display = error.to_string();
    assert!(display.contains("sent 3"));
    assert!(display.contains("received 2"));
}

#[test]
fn test_appError_fromProviderError_shouldWrapCorrectly() {
    let provider_error = ProviderError::ConnectionError("Network down".to_string());
    let app_error: AppError = provider_error.into();
    assert!(app_error.to_string().contains("Network down"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(_)));
}

#[test]
fn test_appError_copyRebuild_shouldNamePath() {
    let error = AppError::copy_rebuild(PathBuf::from("/tmp/X - Translated/a"), "permission denied");
    let display = error.to_string();
    assert!(display.contains("X - Translated"));
    assert!(display.contains("permission denied"));
}

#[test]
fn test_appError_declines_shouldMentionCancellation() {
    assert!(AppError::NameValidationDeclined.to_string().contains("Canceled by user"));
    assert!(AppError::CopyDeclined.to_string().contains("Canceled by user"));
}
