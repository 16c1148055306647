//! Stored result catalog port.
//!
//! Precomputed "optimal" designs come from an offline search that the
//! engine never runs. They are exposed as a static lookup table keyed by
//! scenario, so the engine can rescore them next to live designs.
//!
//! # Example
//!
//! ```ignore
//! fn show_stored(catalog: &dyn StoredResultCatalog) -> Result<(), StoredResultError> {
//!     let key: ScenarioKey = "balanced:min-max".parse()?;
//!     let stored = catalog.lookup_stored_result(&key)?;
//!     println!("{} -> {}", key, stored.design);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::analysis::Paradigm;
use crate::domain::design::{DesignVariable, DesignVector};
use crate::domain::foundation::{DomainError, ErrorCode, Metrics, ObjectiveKey};
use crate::domain::weighting::WeightPreset;

/// Read-only lookup of precomputed scenario results.
pub trait StoredResultCatalog: Send + Sync {
    /// The stored design and metrics for `key`.
    ///
    /// # Errors
    ///
    /// `UnknownScenario` if the catalog holds no result for `key`.
    fn lookup_stored_result(&self, key: &ScenarioKey) -> Result<StaticResult, StoredResultError>;

    /// Every key the catalog can answer, in catalog order.
    fn scenario_keys(&self) -> Vec<ScenarioKey>;
}

/// Identifies a stored result: a weighting scenario under one paradigm.
///
/// The scenario is either a preset key (`balanced`) or a stakeholder name
/// for a solo run (`Municipality`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScenarioKey {
    pub scenario: String,
    pub paradigm: Paradigm,
}

impl ScenarioKey {
    pub fn new(scenario: impl Into<String>, paradigm: Paradigm) -> Self {
        Self {
            scenario: scenario.into(),
            paradigm,
        }
    }

    pub fn preset(preset: WeightPreset, paradigm: Paradigm) -> Self {
        Self::new(preset.key(), paradigm)
    }

    /// The preset this key refers to, if it is not a solo run.
    pub fn as_preset(&self) -> Option<WeightPreset> {
        self.scenario.parse().ok()
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scenario, self.paradigm)
    }
}

impl FromStr for ScenarioKey {
    type Err = StoredResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || StoredResultError::MalformedKey(s.to_string());
        let (scenario, paradigm) = s.rsplit_once(':').ok_or_else(malformed)?;
        if scenario.trim().is_empty() {
            return Err(malformed());
        }
        let paradigm = paradigm.parse::<Paradigm>().map_err(|_| malformed())?;
        Ok(Self::new(scenario, paradigm))
    }
}

impl TryFrom<String> for ScenarioKey {
    type Error = StoredResultError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScenarioKey> for String {
    fn from(key: ScenarioKey) -> Self {
        key.to_string()
    }
}

/// A stored design with the metrics recorded alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticResult {
    pub design: DesignVector,
    pub metrics: Metrics,
}

impl StaticResult {
    pub fn new(design: DesignVector, metrics: Metrics) -> Self {
        Self { design, metrics }
    }

    /// Schema check: every design component and metric is finite.
    pub fn validate(&self, key: &ScenarioKey) -> Result<(), StoredResultError> {
        if let Some(variable) = DesignVariable::all()
            .iter()
            .copied()
            .find(|v| !self.design.get(*v).is_finite())
        {
            return Err(StoredResultError::NonFiniteDesign {
                key: key.to_string(),
                variable,
            });
        }
        if let Some((objective, _)) = self.metrics.iter().find(|(_, v)| !v.is_finite()) {
            return Err(StoredResultError::NonFiniteMetric {
                key: key.to_string(),
                objective,
            });
        }
        Ok(())
    }
}

/// Errors raised by stored result catalogs.
#[derive(Debug, Error)]
pub enum StoredResultError {
    #[error("no stored result for scenario '{0}'")]
    UnknownScenario(String),

    #[error("malformed scenario key '{0}', expected <scenario>:<paradigm>")]
    MalformedKey(String),

    #[error("stored result '{key}' has a non-finite {variable}")]
    NonFiniteDesign { key: String, variable: DesignVariable },

    #[error("stored result '{key}' has a non-finite {objective} metric")]
    NonFiniteMetric { key: String, objective: ObjectiveKey },

    #[error("scenario '{0}' is listed more than once")]
    DuplicateScenario(String),

    #[error("failed to read stored results: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse stored results: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl From<StoredResultError> for DomainError {
    fn from(err: StoredResultError) -> Self {
        let code = match &err {
            StoredResultError::UnknownScenario(_) => ErrorCode::UnknownScenario,
            _ => ErrorCode::MalformedFixture,
        };
        DomainError::new(code, err.to_string())
    }
}
