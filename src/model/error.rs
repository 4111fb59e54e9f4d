//! Error types for tabview.
//!
//! The table pipeline itself never fails: an empty dataset, an unmatched
//! search term and an out-of-range page are all valid "no data" outcomes.
//! Errors only come from the shell around it.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from the binary
//!   - [`DatasetError`] - Loading a dataset file (missing, unreadable, bad JSON, bad record)
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse/validation
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing subscriber setup
//!   - [`TuiError`](crate::view::TuiError) - Terminal I/O

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// Every variant is fatal: the binary prints it and exits non-zero.
#[derive(Debug, Error)]
pub enum AppError {
    /// The dataset could not be loaded.
    #[error("Failed to load dataset: {0}")]
    Dataset(#[from] DatasetError),

    /// Configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal setup, rendering or teardown failed.
    #[error("Terminal error: {0}")]
    Tui(#[from] crate::view::TuiError),
}

/// Errors encountered when loading a dataset file.
///
/// The built-in dataset cannot fail; these only occur with `--data <file>`.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file does not exist.
    #[error("Dataset file not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// The dataset file exists but is not a JSON array of records.
    #[error("Invalid dataset JSON in {path}: {message}")]
    InvalidJson {
        /// The file that failed to parse.
        path: PathBuf,
        /// Parser message from `serde_json`.
        message: String,
    },

    /// A record parsed but violates a record invariant.
    ///
    /// `index` is the 0-based position of the record in the JSON array.
    #[error("Invalid record #{index}: {reason}")]
    InvalidRecord {
        /// Position of the record in the file.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Generic I/O error reading the dataset file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
