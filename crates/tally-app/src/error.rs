//! # Application Error Types
//!
//! Unified error type for command and query handlers.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationReport ──┐                                                   │
//! │  PricingError ──────┤                                                   │
//! │  RepositoryError ───┼──► AppError (this module) ──► ApiError            │
//! │  ConfigError ───────┘        │                      { code, message,    │
//! │                              │                        errors }          │
//! │                              ▼                                          │
//! │                       ErrorCode (machine-readable)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers never log-and-swallow: every failure is returned to the caller,
//! which decides how to reject the request.

use serde::Serialize;
use tally_core::{PricingError, ValidationReport, Violation};
use thiserror::Error;

use crate::config::ConfigError;
use crate::repository::RepositoryError;

/// Errors surfaced by handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// The command or query failed one or more rules.
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    /// The pricing engine rejected an item quantity.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The request collides with existing state.
    ///
    /// ## When This Occurs
    /// - Creating a sale with a sale number that is already taken
    #[error("{0}")]
    Conflict(String),

    /// Requested entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Storage collaborator failed.
    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        AppError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Machine-readable category of the error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::Pricing(_) => ErrorCode::BusinessLogic,
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::Repository(_) | AppError::Config(_) => ErrorCode::Internal,
        }
    }
}

impl From<ValidationReport> for AppError {
    fn from(report: ValidationReport) -> Self {
        AppError::Validation(report)
    }
}

/// Duplicate keys become conflicts; everything else stays a storage failure.
impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate { .. } => AppError::Conflict(err.to_string()),
            other => AppError::Repository(other),
        }
    }
}

/// Convenience type alias for handler results.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Serialized Error Envelope
// =============================================================================

/// Error codes for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Business rule rejected the request (422)
    BusinessLogic,

    /// Resource already exists (409)
    Conflict,

    /// Resource not found (404)
    NotFound,

    /// Internal failure (500)
    Internal,
}

/// What a transport layer sends back when a handler fails.
///
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Validation failed: customer: Customer is required",
///   "errors": [{ "path": "customer", "message": "Customer is required" }]
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Violation>,
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        let errors = match err {
            AppError::Validation(report) => report.violations().to_vec(),
            _ => Vec::new(),
        };

        ApiError {
            code: err.code(),
            message: err.to_string(),
            errors,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::from(&err)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
