/*!
 * Translation service for folder and file names.
 *
 * - `core`: the service wrapping the active backend, with retry and pacing
 * - `batch`: sequential translation of the unique name texts
 */

// Re-export main types for easier usage
pub use self::batch::BatchTranslator;
pub use self::core::{TranslationOptions, TranslationService};

// Submodules
pub mod batch;
pub mod core;
