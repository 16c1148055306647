//! Configuration error types

use thiserror::Error;

use crate::domain::foundation::{self, DomainError, ErrorCode, ObjectiveKey};
use crate::domain::preference::CurveError;
use crate::domain::weighting::WeightingError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration parsing failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Embedded default configuration is invalid: {0}")]
    EmbeddedDefaults(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Invalid knot set for {objective}: {source}")]
    Curve {
        objective: ObjectiveKey,
        #[source]
        source: CurveError,
    },

    #[error("Invalid stakeholder table: {0}")]
    Weighting(#[from] WeightingError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0}")]
    Field(#[from] foundation::ValidationError),

    #[error("Movable length upper bound {max} exceeds the {span} m inlet span")]
    MovableLengthExceedsSpan { max: f64, span: f64 },

    #[error("Closure duration lower bound must be positive, got {min}")]
    NonPositiveDurationBound { min: f64 },

    #[error("Gate height lower bound must be positive, got {min}")]
    NonPositiveGateHeightBound { min: f64 },

    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        let code = match &err {
            ConfigError::Curve { .. } => ErrorCode::MalformedKnots,
            ConfigError::Weighting(WeightingError::DegenerateInfluence { .. }) => {
                ErrorCode::DegenerateInfluence
            }
            ConfigError::Weighting(WeightingError::InvalidValue { .. }) => ErrorCode::InvalidWeight,
            ConfigError::Weighting(_) => ErrorCode::StakeholderShapeMismatch,
            _ => ErrorCode::ConfigInvalid,
        };
        DomainError::new(code, err.to_string())
    }
}
