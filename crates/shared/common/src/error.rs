//! Unified error handling for the store and service layers.
//!
//! Domain errors convert losslessly; file and serialization failures that
//! happen while persisting are added on top.

use domain::{DomainError, FieldErrors};
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Too many failed login attempts")]
    TooManyAttempts,

    #[error("Access denied: {0}")]
    Forbidden(String),

    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    // Validation
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    // Persistence
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable error code for callers and logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Io(_) => "STORAGE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Rejected fields, when this is a validation error
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(fields) => AppError::Validation(fields),
            DomainError::AlreadyExists(entity) => AppError::AlreadyExists(entity),
            DomainError::NotFound(entity) => AppError::NotFound(entity),
            DomainError::Forbidden(action) => AppError::Forbidden(action),
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(entity.into()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn already_exists(entity: impl Into<String>) -> Self {
        AppError::AlreadyExists(entity.into())
    }

    pub fn forbidden(action: impl Into<String>) -> Self {
        AppError::Forbidden(action.into())
    }

    pub fn validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        AppError::Validation(FieldErrors::single(field, msg))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_keep_their_kind() {
        let err: AppError = DomainError::already_exists("User a@x.com").into();
        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(err.code(), "ALREADY_EXISTS");
        assert_eq!(err.to_string(), "User a@x.com already exists");

        let err: AppError = DomainError::validation("email", "bad").into();
        assert_eq!(err.field_errors().unwrap().fields(), vec!["email"]);
    }

    #[test]
    fn test_ok_or_not_found() {
        let missing: Option<u8> = None;
        let err = missing.ok_or_not_found("Product A123").unwrap_err();
        assert_eq!(err.to_string(), "Product A123 not found");
        assert_eq!(Some(1).ok_or_not_found("x").unwrap(), 1);
    }
}
