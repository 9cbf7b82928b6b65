//! # Common Error Types
//!
//! Consolidated error handling for the client data layer.
//!
//! Errors are categorized by their source:
//!
//! - **Api**: backend communication (network failure, non-2xx status, JSON
//!   decode mismatch) - the service layer collapses all three into a
//!   descriptive string
//! - **State**: store state management (duplicate in-flight write)
//! - **Validation**: input validation before a request is sent

use thiserror::Error;

/// Application-wide error type for the data layer.
///
/// Each variant carries a descriptive `String`; `thiserror` provides the
/// `Display` and `Error` implementations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend API communication error.
    ///
    /// Carries the detailed cause as produced by the service layer. Stores
    /// log this detail and keep only a fixed human-readable message in
    /// state.
    #[error("API error: {0}")]
    Api(String),

    /// Store state management error, e.g. a create dispatched while the
    /// previous one is still in flight.
    #[error("State error: {0}")]
    State(String),

    /// Input validation error raised before any network call.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Convenience alias used throughout the client crate.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Api(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Api(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category_and_detail() {
        let err = AppError::Api("connection refused".to_string());
        assert_eq!(err.to_string(), "API error: connection refused");

        let err = AppError::State("create already in flight".to_string());
        assert_eq!(err.to_string(), "State error: create already in flight");
    }

    #[test]
    fn service_strings_fold_into_api_errors() {
        let err: AppError = "Network error: timeout".to_string().into();
        assert!(matches!(err, AppError::Api(_)));
    }
}
