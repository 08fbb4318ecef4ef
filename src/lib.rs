/*!
 * # Folder Translator
 *
 * A Rust library for producing a translated copy of a directory tree: every
 * folder and file name is translated into a target language and the tree is
 * rebuilt next to the original.
 *
 * ## Features
 *
 * - Deduplicates repeated names so each distinct text is translated once
 * - Display modes: translation only, `translation [original]`,
 *   `original [translation]`
 * - Keeps file extensions untouched
 * - Validates names for filesystem legality and offers sanitization
 * - Never overwrites: the copy goes to a fresh sibling folder
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `tree`: Source tree enumeration
 * - `names`: Name deduplication, formatting and redistribution
 * - `providers`: Translation backends (Google Translate, mock)
 * - `translation`: Translation service and sequential batch translation
 * - `validator`: Filesystem name rules and sanitization
 * - `rebuild`: Destination naming, path mapping, copy and rename
 * - `operator`: Operator interaction (terminal or scripted)
 * - `tree_view`: Tree previews
 * - `app_controller`: The end-to-end pipeline
 * - `app_config`: Configuration management
 * - `language_utils`: Language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod names;
pub mod operator;
pub mod providers;
pub mod rebuild;
pub mod translation;
pub mod tree;
pub mod tree_view;
pub mod validator;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, ProviderError, TranslationError};
pub use names::{DisplayMode, NameUnit, TranslatedNames, TranslationResult};
pub use tree::{Entry, EntryKey, SourceTree};
