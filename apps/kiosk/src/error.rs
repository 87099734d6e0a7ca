//! # App Error Type
//!
//! Unified error type for the console boundary.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Kiosk                              │
//! │                                                                         │
//! │  ValidationError ──┐                                                    │
//! │  CoreError ────────┼──► AppError { code, message } ──► "[ERROR] ..."   │
//! │  DataError ────────┤                                    then the same   │
//! │  std::io::Error ───┘                                    prompt again    │
//! │                                                                         │
//! │  EndOfInput is the one code that ends the loop (stdin closed).         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kiosk_core::{CoreError, ErrorKind, ValidationError};
use kiosk_data::DataError;
use serde::Serialize;

/// Error shown to the buyer.
///
/// ## Serialization
/// With the JSON receipt format errors are logged as:
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Requested 30 Cola, only 20 in stock"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input syntax failed; ask again
    InvalidInput,

    /// Unknown product name
    NotFound,

    /// Stock cannot cover the request
    InsufficientStock,

    /// The buyer declined a shortfall
    Cancelled,

    /// Catalog files could not be loaded
    DataError,

    /// stdin was closed
    EndOfInput,

    /// Anything that should never reach the buyer
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn end_of_input() -> Self {
        AppError::new(ErrorCode::EndOfInput, "Input closed")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    /// Returns true if the loop should stop instead of re-prompting.
    pub fn is_end_of_input(&self) -> bool {
        self.code == ErrorCode::EndOfInput
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(ErrorCode::InvalidInput, err.to_string())
    }
}

/// Converts core errors to console errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match err.kind() {
            ErrorKind::ProductNotFound => ErrorCode::NotFound,
            ErrorKind::InsufficientStock => ErrorCode::InsufficientStock,
            ErrorKind::PurchaseCancelled => ErrorCode::Cancelled,
            ErrorKind::InvalidCatalog => ErrorCode::DataError,
            ErrorKind::SessionState => {
                tracing::error!("Checkout session misuse: {}", err);
                return AppError::internal("Something went wrong, please try again");
            }
            _ => ErrorCode::InvalidInput,
        };

        AppError::new(code, err.to_string())
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Catalog(core) => AppError::from(core),
            other => AppError::new(ErrorCode::DataError, other.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            return AppError::end_of_input();
        }

        // Log the actual error but return a generic message
        tracing::error!("Console I/O failed: {}", err);
        AppError::internal("Console I/O failed")
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ERROR] {}", self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::StockPool;

    #[test]
    fn test_core_error_codes() {
        let err = AppError::from(CoreError::ProductNotFound("Tea".into()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.to_string(), "[ERROR] Product not found: Tea");

        let err = AppError::from(CoreError::insufficient_stock("Cola", StockPool::Regular, 1, 3));
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err = AppError::from(CoreError::from(ValidationError::InvalidFormat));
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_session_misuse_is_internal() {
        let err = AppError::from(CoreError::SessionClosed);
        assert_eq!(err.code, ErrorCode::Internal);
    }

    #[test]
    fn test_unexpected_eof_ends_input() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "closed");
        assert!(AppError::from(io).is_end_of_input());
    }

    #[test]
    fn test_serializes_code() {
        let json = serde_json::to_value(AppError::from(ValidationError::EmptyInput)).unwrap();
        assert_eq!(json["code"], "INVALID_INPUT");
    }
}
