/*!
 * Translation backends.
 *
 * This module contains the client implementations the pipeline can talk to:
 * - Google: public Google Translate web endpoint
 * - Mock: scriptable offline translator for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::names::TranslationResult;

/// Common trait for all translation backends
///
/// The pipeline only ever talks to a backend through this trait, so an
/// offline double can replace the real service without touching the
/// controller.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Short human-readable backend name
    fn name(&self) -> &str;

    /// Check that the backend is reachable before any translation is issued
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the backend answered with a success status
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Translate a single text into the target language
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `target_language` - Destination language code (e.g. `ru`, `zh-cn`)
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslationResult, ProviderError>;
}

pub mod google;
pub mod mock;
