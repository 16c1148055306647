//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, enums, and error types that form the
//! vocabulary of the evaluation engine.

mod errors;
mod objective_key;
mod objective_map;
mod preference_score;

pub use errors::{DomainError, ErrorCategory, ErrorCode, ValidationError};
pub use objective_key::ObjectiveKey;
pub use objective_map::ObjectiveMap;
pub use preference_score::PreferenceScore;

/// One metric value per objective, computed from a design vector.
pub type Metrics = ObjectiveMap<f64>;

/// One 0-100 preference score per objective.
pub type Preferences = ObjectiveMap<PreferenceScore>;
