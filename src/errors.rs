/*!
 * Error types for the folder-translator application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions. Every `AppError`
 * is terminal for a run: nothing in the pipeline recovers from one locally.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to the translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur while translating a batch of names
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The backend returned a different number of results than texts sent
    #[error("Translation results are misaligned: sent {expected} texts, received {actual} results")]
    MisalignedResults {
        /// Number of unique texts sent
        expected: usize,
        /// Number of results received
        actual: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Source path is missing, not a directory, or holds unusable names
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The translation backend failed its reachability probe
    #[error("Translation service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The operator refused the proposed name sanitization
    #[error("Canceled by user: invalid names were not sanitized")]
    NameValidationDeclined,

    /// The operator refused to create the translated copy
    #[error("Canceled by user: translated folder was not created")]
    CopyDeclined,

    /// Two entries would end up at the same destination path
    #[error("Translated names collide at '{path}': '{first}' and '{second}'")]
    DestinationCollision {
        /// Destination relative path shared by both entries
        path: PathBuf,
        /// Source relative path of the first entry
        first: PathBuf,
        /// Source relative path of the second entry
        second: PathBuf,
    },

    /// Copy or rename failed; the destination may be partially translated
    #[error("Failed to rebuild translated tree at '{path}': {message}")]
    CopyRebuild {
        /// Path that was being copied or renamed
        path: PathBuf,
        /// Underlying failure
        message: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Build a rebuild error for the given path
    pub fn copy_rebuild(path: impl Into<PathBuf>, error: impl std::fmt::Display) -> Self {
        Self::CopyRebuild {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
