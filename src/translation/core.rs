/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct, which owns the
 * active backend and the request pacing settings taken from configuration.
 */

use std::sync::Arc;
use std::time::Duration;
use log::{debug, warn};

use crate::app_config::TranslatorConfig;
use crate::errors::{AppError, ProviderError};
use crate::names::TranslationResult;
use crate::providers::Translator;
use crate::providers::google::GoogleTranslate;

/// Pacing and retry settings for backend requests
#[derive(Debug, Clone, Default)]
pub struct TranslationOptions {
    /// Delay between consecutive requests in milliseconds
    pub rate_limit_delay_ms: u64,
    /// Extra attempts after a failed request; 0 makes the first failure fatal
    pub retry_count: u32,
    /// Base backoff in milliseconds, doubled on each retry
    pub retry_backoff_ms: u64,
}

impl From<&TranslatorConfig> for TranslationOptions {
    fn from(config: &TranslatorConfig) -> Self {
        Self {
            rate_limit_delay_ms: config.rate_limit_delay_ms,
            retry_count: config.retry_count,
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }
}

/// Translation service wrapping a single backend
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Active backend
    translator: Arc<dyn Translator>,
    /// Request pacing
    pub options: TranslationOptions,
}

impl TranslationService {
    /// Create the production service from configuration
    pub fn new(config: &TranslatorConfig) -> Self {
        let translator = GoogleTranslate::new(
            config.endpoint.clone(),
            config.probe_url.clone(),
            config.timeout_secs,
        );
        Self::with_translator(Arc::new(translator), TranslationOptions::from(config))
    }

    /// Create a service around any backend
    pub fn with_translator(translator: Arc<dyn Translator>, options: TranslationOptions) -> Self {
        Self { translator, options }
    }

    /// Name of the active backend
    pub fn backend_name(&self) -> &str {
        self.translator.name()
    }

    /// Probe the backend; any failure means the service is unavailable
    pub async fn test_connection(&self) -> Result<(), AppError> {
        debug!("Probing {}", self.translator.name());
        self.translator
            .test_connection()
            .await
            .map_err(|e| AppError::ServiceUnavailable(format!("{}: {}", self.translator.name(), e)))
    }

    /// Translate one text, retrying with exponential backoff if configured
    pub async fn translate_text(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslationResult, ProviderError> {
        let mut attempt = 0u32;
        loop {
            match self.translator.translate(text, target_language).await {
                Ok(result) => return Ok(result),
                Err(e) if attempt < self.options.retry_count => {
                    let backoff = self.options.retry_backoff_ms.saturating_mul(1 << attempt.min(16));
                    warn!(
                        "Translation of '{}' failed (attempt {}/{}): {}. Retrying in {}ms",
                        text,
                        attempt + 1,
                        self.options.retry_count + 1,
                        e,
                        backoff
                    );
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
