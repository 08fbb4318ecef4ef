/*!
 * Tests for the translation service and sequential batch translation
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use folder_translator::errors::{AppError, TranslationError};
use folder_translator::providers::mock::MockTranslator;
use folder_translator::translation::{BatchTranslator, TranslationOptions, TranslationService};

fn service(mock: &MockTranslator, options: TranslationOptions) -> TranslationService {
    TranslationService::with_translator(Arc::new(mock.clone()), options)
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Test that results come back aligned with the request order
#[tokio::test]
async fn test_translate_batch_withWorkingBackend_shouldPreserveOrder() {
    let mock = MockTranslator::uppercase();
    let batch = BatchTranslator::new(service(&mock, TranslationOptions::default()));

    let results = batch
        .translate_batch(&texts(&["docs", "a", "sub"]), "xx", |_, _| {})
        .await
        .unwrap();

    let pairs: Vec<(&str, &str)> = results.iter().map(|r| (r.source.as_str(), r.result.as_str())).collect();
    assert_eq!(pairs, vec![("docs", "DOCS"), ("a", "A"), ("sub", "SUB")]);
    assert_eq!(mock.received_texts(), texts(&["docs", "a", "sub"]));
    assert_eq!(mock.probe_count(), 1);
}

/// Test that an unreachable backend fails before any text is sent
#[tokio::test]
async fn test_translate_batch_withUnreachableBackend_shouldFailBeforeTranslating() {
    let mock = MockTranslator::unreachable();
    let batch = BatchTranslator::new(service(&mock, TranslationOptions::default()));

    let result = batch.translate_batch(&texts(&["a", "b"]), "fr", |_, _| {}).await;

    assert!(matches!(result, Err(AppError::ServiceUnavailable(_))));
    assert_eq!(mock.request_count(), 0);
}

/// Test that a backend error is fatal when retries are off
#[tokio::test]
async fn test_translate_batch_withFailingBackend_shouldStopAtFirstError() {
    let mock = MockTranslator::failing();
    let batch = BatchTranslator::new(service(&mock, TranslationOptions::default()));

    let result = batch.translate_batch(&texts(&["a", "b", "c"]), "fr", |_, _| {}).await;

    assert!(matches!(result, Err(AppError::Translation(TranslationError::Provider(_)))));
    assert_eq!(mock.request_count(), 1);
}

/// Test that configured retries recover from an intermittent failure
#[tokio::test]
async fn test_translate_batch_withRetries_shouldRecoverFromIntermittentFailure() {
    let mock = MockTranslator::intermittent(2);
    let options = TranslationOptions {
        rate_limit_delay_ms: 0,
        retry_count: 1,
        retry_backoff_ms: 1,
    };
    let batch = BatchTranslator::new(service(&mock, options));

    let results = batch
        .translate_batch(&texts(&["a", "b"]), "de", |_, _| {})
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[1].source, "b");
    assert_eq!(mock.request_count(), 3);
}

/// Test that the progress callback sees every completed text
#[tokio::test]
async fn test_translate_batch_shouldReportProgress() {
    let mock = MockTranslator::working();
    let batch = BatchTranslator::new(service(&mock, TranslationOptions::default()));
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();

    batch
        .translate_batch(&texts(&["a", "b", "c"]), "fr", move |completed, total| {
            assert_eq!(total, 3);
            seen.store(completed, Ordering::SeqCst);
        })
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

/// Test that an empty batch still probes and returns nothing
#[tokio::test]
async fn test_translate_batch_withNoTexts_shouldReturnEmpty() {
    let mock = MockTranslator::working();
    let batch = BatchTranslator::new(service(&mock, TranslationOptions::default()));

    let results = batch.translate_batch(&[], "fr", |_, _| {}).await.unwrap();

    assert!(results.is_empty());
    assert_eq!(mock.probe_count(), 1);
}
