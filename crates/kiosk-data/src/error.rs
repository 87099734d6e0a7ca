//! # Data Error Types
//!
//! Error types for loading the catalog files.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / malformed field / CoreError from Catalog             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DataError (this module) ← Adds file name and line number              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in kiosk app) ← Printed once, then the app exits            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use kiosk_core::CoreError;
use thiserror::Error;

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be read.
    ///
    /// ## When This Occurs
    /// - Data directory or file does not exist
    /// - File permissions issue
    /// - File is not valid UTF-8
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file holds nothing but whitespace.
    #[error("{file} is empty")]
    EmptyFile { file: String },

    /// The header row lacks a required column.
    #[error("{file} is missing the '{column}' column")]
    MissingColumn { file: String, column: String },

    /// A field could not be parsed.
    ///
    /// `line` is 1-based and counts the header row.
    #[error("{file} line {line}: invalid {field} '{value}'")]
    InvalidField {
        file: String,
        line: usize,
        field: String,
        value: String,
    },

    /// The records parsed but do not form a valid catalog.
    ///
    /// ## When This Occurs
    /// - Two promotional (or two regular) lines for one product
    /// - A promotion with zero buy/get or reversed dates
    #[error(transparent)]
    Catalog(#[from] CoreError),
}

impl DataError {
    /// Creates an InvalidField error.
    pub fn invalid_field(
        file: impl Into<String>,
        line: usize,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        DataError::InvalidField {
            file: file.into(),
            line,
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for data loading.
pub type DataResult<T> = Result<T, DataError>;
