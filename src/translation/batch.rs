/*!
 * Batch translation of unique name texts.
 *
 * Requests are issued one at a time in list order; the next request is only
 * sent once the previous one has answered.
 */

use std::time::Duration;
use log::{debug, error};

use crate::errors::{AppError, TranslationError};
use crate::names::TranslationResult;

use super::core::TranslationService;

/// Batch translator for a list of unique texts
pub struct BatchTranslator {
    /// The translation service to use
    service: TranslationService,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(service: TranslationService) -> Self {
        Self { service }
    }

    /// Translate every text, returning results aligned by position.
    ///
    /// The backend is probed first so an unreachable service fails the run
    /// before any text is sent. `progress_callback` receives
    /// `(completed, total)` after each text.
    pub async fn translate_batch(
        &self,
        texts: &[String],
        target_language: &str,
        progress_callback: impl Fn(usize, usize),
    ) -> Result<Vec<TranslationResult>, AppError> {
        self.service.test_connection().await?;

        let total = texts.len();
        let mut results = Vec::with_capacity(total);

        for (index, text) in texts.iter().enumerate() {
            if index > 0 && self.service.options.rate_limit_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.service.options.rate_limit_delay_ms)).await;
            }

            let result = self
                .service
                .translate_text(text, target_language)
                .await
                .map_err(|e| {
                    error!("Translation failed for '{}': {}", text, e);
                    TranslationError::Provider(e)
                })?;
            debug!("'{}' -> '{}'", result.source, result.result);

            results.push(result);
            progress_callback(index + 1, total);
        }

        if results.len() != total {
            return Err(TranslationError::MisalignedResults {
                expected: total,
                actual: results.len(),
            }
            .into());
        }

        Ok(results)
    }
}
