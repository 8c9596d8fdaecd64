//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (files, serialization).

use std::fmt;

use thiserror::Error;

/// A single rejected field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path, nested fields use dots (`address.zip_code`)
    pub field: String,
    pub message: String,
}

/// Every field that failed validation in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection holding exactly one error
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Check whether a field (by full path) was rejected
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Names of the rejected fields, in report order
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }

    /// Order by field path so reports are stable
    pub(crate) fn sort(&mut self) {
        self.0.sort_by(|a, b| a.field.cmp(&b.field));
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(mut self) -> DomainResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            self.sort();
            Err(DomainError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// One or more fields failed validation
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    /// Unique key already taken
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The acting user lacks the role for this action
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid credentials provided
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error for a single field
    pub fn validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        DomainError::Validation(FieldErrors::single(field, msg))
    }

    /// Create an already-exists error
    pub fn already_exists(entity: impl Into<String>) -> Self {
        DomainError::AlreadyExists(entity.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Create a forbidden error
    pub fn forbidden(action: impl Into<String>) -> Self {
        DomainError::Forbidden(action.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
