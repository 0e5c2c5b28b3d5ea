//! Error types for receiptdesk-core
//!
//! Every failure a page handler can hit ends up as a `CoreError`, which knows
//! its code, its severity and how to explain itself to the user.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    NotFound,
    StorageError,
    IoError,
    ImageError,
    RemoteError,
    Unauthorized,
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::StorageError => write!(f, "STORAGE_ERROR"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::ImageError => write!(f, "IMAGE_ERROR"),
            ErrorCode::RemoteError => write!(f, "REMOTE_ERROR"),
            ErrorCode::Unauthorized => write!(f, "UNAUTHORIZED"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Debug => write!(f, "debug"),
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for receiptdesk-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{message}")]
    ValidationError { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Storage unavailable: {message}")]
    StorageError { message: String },

    #[error("IO error occurred")]
    IoError,

    #[error("Could not read image: {message}")]
    ImageError { message: String },

    #[error("{message}")]
    RemoteError { message: String },

    #[error("Not connected to QuickBooks")]
    Unauthorized,

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Shorthand for the most common failure in form handlers
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::ValidationError {
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::StorageError { .. } => ErrorCode::StorageError,
            CoreError::IoError => ErrorCode::IoError,
            CoreError::ImageError { .. } => ErrorCode::ImageError,
            CoreError::RemoteError { .. } => ErrorCode::RemoteError,
            CoreError::Unauthorized => ErrorCode::Unauthorized,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::NotFound { .. } => ErrorSeverity::Info,
            CoreError::StorageError { .. } => ErrorSeverity::Warning,
            CoreError::IoError => ErrorSeverity::Error,
            CoreError::ImageError { .. } => ErrorSeverity::Error,
            CoreError::RemoteError { .. } => ErrorSeverity::Error,
            CoreError::Unauthorized => ErrorSeverity::Warning,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::ValidationError { message } => {
                details = details
                    .with_detail(serde_json::json!({ "validation_message": message }))
                    .with_suggestion("Correct the highlighted field and try again.".to_string());
            }
            CoreError::StorageError { .. } => {
                details = details.with_suggestion(
                    "Check that the storage directory is writable.".to_string(),
                );
            }
            CoreError::ImageError { .. } => {
                details = details
                    .with_suggestion("Upload a PNG, JPEG or GIF image.".to_string());
            }
            CoreError::Unauthorized => {
                details = details
                    .with_suggestion("Connect to QuickBooks and try again.".to_string());
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<io::Error> for CoreError {
    fn from(_error: io::Error) -> Self {
        CoreError::IoError
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Transaction the operation was about, if any
    pub transaction_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            transaction_id: None,
        }
    }

    pub fn with_transaction(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        log::error!(
            target: "receiptdesk::error",
            "ERROR [{}] {} - Operation: {} - Transaction: {:?}",
            error.code(),
            error.to_details(),
            context.operation,
            context.transaction_id
        );
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "receiptdesk::error",
            "WARNING: {} - Operation: {} - Transaction: {:?}",
            message,
            context.operation,
            context.transaction_id
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::StorageError.to_string(), "STORAGE_ERROR");
        assert_eq!(ErrorCode::Unauthorized.to_string(), "UNAUTHORIZED");
    }

    #[test]
    fn test_validation_message_is_user_facing() {
        let error = CoreError::validation("Organization name is required");
        assert_eq!(error.to_string(), "Organization name is required");
        assert_eq!(error.severity(), ErrorSeverity::Warning);
        assert_eq!(error.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(CoreError::IoError.severity(), ErrorSeverity::Error);
        assert_eq!(
            CoreError::InternalError { message: "x".to_string() }.severity(),
            ErrorSeverity::Critical
        );
        assert_eq!(
            CoreError::NotFound { resource: "logo".to_string() }.severity(),
            ErrorSeverity::Info
        );
    }

    #[test]
    fn test_details_carry_suggestions() {
        let details = CoreError::Unauthorized.to_details();
        assert_eq!(details.code, ErrorCode::Unauthorized);
        assert_eq!(details.suggestions.len(), 1);

        let details = CoreError::validation("bad EIN").to_details();
        assert!(details.details.is_some());
        assert!(details.to_string().contains("bad EIN"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("email_receipt").with_transaction("txn-42");

        assert_eq!(context.operation, "email_receipt");
        assert_eq!(context.transaction_id.as_deref(), Some("txn-42"));
    }
}
