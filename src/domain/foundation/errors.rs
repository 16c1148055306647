//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' must be a finite number")]
    NotFinite { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates a non-finite validation error.
    pub fn not_finite(field: impl Into<String>) -> Self {
        ValidationError::NotFinite { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Broad failure family an [`ErrorCode`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad design input (out of bounds, non-positive duration, NaN).
    Domain,
    /// Malformed configuration, detected at construction.
    Config,
    /// Stakeholder weights that cannot be normalized.
    Normalization,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Domain errors
    DesignOutOfBounds,
    InvalidDuration,
    InvalidGateHeight,
    NonFiniteInput,

    // Configuration errors
    MalformedKnots,
    StakeholderShapeMismatch,
    InvalidWeight,
    ConfigInvalid,
    UnknownScenario,
    MalformedFixture,

    // Normalization errors
    DegenerateInfluence,
}

impl ErrorCode {
    /// Returns the failure family for this code.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::DesignOutOfBounds
            | ErrorCode::InvalidDuration
            | ErrorCode::InvalidGateHeight
            | ErrorCode::NonFiniteInput => ErrorCategory::Domain,
            ErrorCode::MalformedKnots
            | ErrorCode::StakeholderShapeMismatch
            | ErrorCode::InvalidWeight
            | ErrorCode::ConfigInvalid
            | ErrorCode::UnknownScenario
            | ErrorCode::MalformedFixture => ErrorCategory::Config,
            ErrorCode::DegenerateInfluence => ErrorCategory::Normalization,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::DesignOutOfBounds => "DESIGN_OUT_OF_BOUNDS",
            ErrorCode::InvalidDuration => "INVALID_DURATION",
            ErrorCode::InvalidGateHeight => "INVALID_GATE_HEIGHT",
            ErrorCode::NonFiniteInput => "NON_FINITE_INPUT",
            ErrorCode::MalformedKnots => "MALFORMED_KNOTS",
            ErrorCode::StakeholderShapeMismatch => "STAKEHOLDER_SHAPE_MISMATCH",
            ErrorCode::InvalidWeight => "INVALID_WEIGHT",
            ErrorCode::ConfigInvalid => "CONFIG_INVALID",
            ErrorCode::UnknownScenario => "UNKNOWN_SCENARIO",
            ErrorCode::MalformedFixture => "MALFORMED_FIXTURE",
            ErrorCode::DegenerateInfluence => "DEGENERATE_INFLUENCE",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the failure family of this error.
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        DomainError::new(ErrorCode::ConfigInvalid, err.to_string()).with_detail("field", field)
    }
}
