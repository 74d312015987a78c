//! Unified error types for ticket triage
//!
//! This module defines error types for each layer:
//! - `FieldError` / `ValidationError`: raw ticket records rejected at the boundary
//! - `ConfigError`: invalid configuration values
//! - `AppError`: batch loading and worker failures

use thiserror::Error;

/// A single field-level violation found while validating a raw ticket
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field}: field required")]
    Missing { field: &'static str },

    #[error("{field}: expected {expected}, got {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{field}: {constraint}")]
    OutOfRange {
        field: &'static str,
        constraint: String,
    },

    #[error("{field}: unknown customer tier '{value}' (expected free, premium or enterprise)")]
    UnknownTier { field: &'static str, value: String },
}

impl FieldError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Missing { field }
            | FieldError::WrongType { field, .. }
            | FieldError::OutOfRange { field, .. }
            | FieldError::UnknownTier { field, .. } => field,
        }
    }
}

/// Raw ticket record that could not be turned into a `Ticket`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("ticket record must be an object, got {0}")]
    NotAnObject(&'static str),

    #[error("{} validation error(s) for ticket: {}", .0.len(), join_field_errors(.0))]
    Fields(Vec<FieldError>),
}

impl ValidationError {
    /// Field-level violations (empty when the record was not an object at all)
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ValidationError::NotAnObject(_) => &[],
            ValidationError::Fields(errors) => errors,
        }
    }

    /// Names of every offending field, in the order they were checked
    pub fn offending_fields(&self) -> Vec<&'static str> {
        self.field_errors().iter().map(FieldError::field).collect()
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Inconsistent configuration: {0}")]
    Inconsistent(String),
}

/// Application layer errors - batch loading and processing
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid batch: {0}")]
    InvalidBatch(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
