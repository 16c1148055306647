//! Error types for preference curves.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while building or evaluating a preference curve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("knot set needs at least 2 knots, got {count}")]
    TooFewKnots { count: usize },

    #[error("knot arrays differ in length: x has {x_len}, y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("knot x values must be strictly increasing (index {index})")]
    NotStrictlyIncreasing { index: usize },

    #[error("knot {index} has a non-finite coordinate")]
    NonFiniteKnot { index: usize },

    #[error("knot {index} preference {value} is outside [0, 100]")]
    PreferenceOutOfRange { index: usize, value: f64 },

    #[error("metric value is NaN")]
    NanMetric,
}

impl From<CurveError> for DomainError {
    fn from(err: CurveError) -> Self {
        let code = match err {
            CurveError::NanMetric => ErrorCode::NonFiniteInput,
            _ => ErrorCode::MalformedKnots,
        };
        DomainError::new(code, err.to_string())
    }
}
