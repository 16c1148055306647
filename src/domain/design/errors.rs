//! Error types for design inputs.

use thiserror::Error;

use super::DesignVariable;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised when a design vector cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesignError {
    #[error("{variable} = {actual} is outside [{min}, {max}]")]
    OutOfBounds {
        variable: DesignVariable,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("closure duration must be positive, got {actual}")]
    NonPositiveDuration { actual: f64 },

    #[error("gate height must be positive, got {actual}")]
    NonPositiveGateHeight { actual: f64 },

    #[error("{variable} must be a finite number")]
    NonFinite { variable: DesignVariable },
}

impl From<DesignError> for DomainError {
    fn from(err: DesignError) -> Self {
        let code = match &err {
            DesignError::OutOfBounds { .. } => ErrorCode::DesignOutOfBounds,
            DesignError::NonPositiveDuration { .. } => ErrorCode::InvalidDuration,
            DesignError::NonPositiveGateHeight { .. } => ErrorCode::InvalidGateHeight,
            DesignError::NonFinite { .. } => ErrorCode::NonFiniteInput,
        };
        let message = err.to_string();
        match err {
            DesignError::OutOfBounds { variable, actual, .. } => DomainError::new(code, message)
                .with_detail("variable", variable.symbol())
                .with_detail("actual", actual.to_string()),
            DesignError::NonPositiveDuration { actual }
            | DesignError::NonPositiveGateHeight { actual } => {
                DomainError::new(code, message).with_detail("actual", actual.to_string())
            }
            DesignError::NonFinite { variable } => {
                DomainError::new(code, message).with_detail("variable", variable.symbol())
            }
        }
    }
}
