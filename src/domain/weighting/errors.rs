//! Error types for stakeholder weighting.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ObjectiveKey};

/// Errors raised while validating or normalizing stakeholder weights.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightingError {
    #[error("stakeholder table is empty")]
    EmptyTable,

    #[error("{what} has {actual} entries, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("objective weight row for '{stakeholder}' has {actual} columns, expected {}", ObjectiveKey::COUNT)]
    RowWidth { stakeholder: String, actual: usize },

    #[error("stakeholder name at position {index} is empty")]
    EmptyName { index: usize },

    #[error("stakeholder '{0}' appears more than once")]
    DuplicateStakeholder(String),

    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidValue { field: String, value: f64 },

    #[error("raw influence sums to {sum}; cannot normalize")]
    DegenerateInfluence { sum: f64 },

    #[error("no stakeholder with positive influence has a non-zero objective weight row")]
    NoEffectiveWeight,

    #[error("unknown stakeholder '{0}'")]
    UnknownStakeholder(String),
}

impl From<WeightingError> for DomainError {
    fn from(err: WeightingError) -> Self {
        let code = match &err {
            WeightingError::DegenerateInfluence { .. } | WeightingError::NoEffectiveWeight => {
                ErrorCode::DegenerateInfluence
            }
            WeightingError::InvalidValue { .. } => ErrorCode::InvalidWeight,
            _ => ErrorCode::StakeholderShapeMismatch,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_width_mentions_objective_count() {
        let err = WeightingError::RowWidth {
            stakeholder: "Residents".to_string(),
            actual: 5,
        };
        assert_eq!(
            format!("{}", err),
            "objective weight row for 'Residents' has 5 columns, expected 6"
        );
    }

    #[test]
    fn degenerate_influence_maps_to_normalization_code() {
        let err: DomainError = WeightingError::DegenerateInfluence { sum: 0.0 }.into();
        assert_eq!(err.code, ErrorCode::DegenerateInfluence);
    }

    #[test]
    fn shape_mismatch_maps_to_config_code() {
        let err: DomainError = WeightingError::ShapeMismatch {
            what: "raw_influence",
            expected: 4,
            actual: 3,
        }
        .into();
        assert_eq!(err.code, ErrorCode::StakeholderShapeMismatch);
    }
}
