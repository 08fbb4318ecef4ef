/*!
 * Mock translator for testing.
 *
 * This module provides a mock backend that simulates different behaviors:
 * - `MockTranslator::working()` - Always succeeds, tagging the text
 * - `MockTranslator::with_mapping(f)` - Succeeds using a custom mapping
 * - `MockTranslator::failing()` - Probe succeeds, every translation fails
 * - `MockTranslator::unreachable()` - Probe fails
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::names::TranslationResult;
use crate::providers::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Every translation fails
    Failing,
    /// The reachability probe fails
    Unreachable,
}

/// Mock translator that never touches the network
#[derive(Debug, Clone)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Translation request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Probe counter, shared between clones
    probe_count: Arc<AtomicUsize>,
    /// Texts received, in order
    received: Arc<Mutex<Vec<String>>>,
    /// Custom text mapping (optional)
    mapping: Option<fn(&str, &str) -> String>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            probe_count: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
            mapping: None,
        }
    }

    /// Create a working mock that answers `[lang] text`
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a working mock using a custom `(text, lang) -> translation` mapping
    pub fn with_mapping(mapping: fn(&str, &str) -> String) -> Self {
        let mut mock = Self::new(MockBehavior::Working);
        mock.mapping = Some(mapping);
        mock
    }

    /// Create a working mock that upper-cases every text
    pub fn uppercase() -> Self {
        Self::with_mapping(|text, _| text.to_uppercase())
    }

    /// Create an intermittently failing mock; `0` behaves like `1`
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    /// Create a mock whose translations always fail
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock whose reachability probe fails
    pub fn unreachable() -> Self {
        Self::new(MockBehavior::Unreachable)
    }

    /// Number of translation requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Number of probes received so far
    pub fn probe_count(&self) -> usize {
        self.probe_count.load(Ordering::SeqCst)
    }

    /// Texts received so far, in request order
    pub fn received_texts(&self) -> Vec<String> {
        self.received.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn translate_text(&self, text: &str, target_language: &str) -> String {
        match self.mapping {
            Some(mapping) => mapping(text, target_language),
            None => format!("[{}] {}", target_language, text),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.probe_count.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Unreachable => Err(ProviderError::ConnectionError(
                "Simulated unreachable backend".to_string(),
            )),
            _ => Ok(()),
        }
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslationResult, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut received) = self.received.lock() {
            received.push(text.to_string());
        }

        match self.behavior {
            MockBehavior::Working => Ok(TranslationResult::new(
                text,
                self.translate_text(text, target_language),
            )),
            MockBehavior::Intermittent { fail_every } => {
                let fail_every = fail_every.max(1);
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(TranslationResult::new(
                        text,
                        self.translate_text(text, target_language),
                    ))
                }
            }
            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated translation failure".to_string(),
                status_code: 500,
            }),
            MockBehavior::Unreachable => Err(ProviderError::ConnectionError(
                "Simulated unreachable backend".to_string(),
            )),
        }
    }
}
