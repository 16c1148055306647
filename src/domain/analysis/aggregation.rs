//! Aggregation Engine - Scalar scores under the weighted-sum and Min–Max paradigms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::domain::foundation::{ObjectiveKey, Preferences, ValidationError};
use crate::domain::weighting::GlobalWeights;

/// Decision paradigm used to collapse preferences into one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paradigm {
    /// Influence-weighted average of all preferences ("Tetra").
    #[serde(rename = "weighted-sum", alias = "tetra")]
    WeightedSum,
    /// The worst preference across objectives (maximin).
    #[serde(rename = "min-max", alias = "minmax")]
    MinMax,
}

impl Paradigm {
    pub fn all() -> &'static [Paradigm] {
        &[Paradigm::WeightedSum, Paradigm::MinMax]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Paradigm::WeightedSum => "weighted-sum",
            Paradigm::MinMax => "min-max",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Paradigm::WeightedSum => "Weighted sum (Tetra)",
            Paradigm::MinMax => "Min–Max",
        }
    }
}

impl fmt::Display for Paradigm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Paradigm {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weighted-sum" | "tetra" => Ok(Paradigm::WeightedSum),
            "min-max" | "minmax" => Ok(Paradigm::MinMax),
            other => Err(ValidationError::invalid_format(
                "paradigm",
                format!("unknown paradigm '{}'", other),
            )),
        }
    }
}

/// A design's score under one paradigm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateScore {
    pub paradigm: Paradigm,
    /// Score on the 0-100 preference scale.
    pub score: f64,
    /// The worst objective. Always set for Min–Max, `None` for weighted sum.
    pub binding: Option<ObjectiveKey>,
}

impl fmt::Display for AggregateScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.binding {
            Some(objective) => write!(f, "{}: {:.2} (bound by {})", self.paradigm, self.score, objective),
            None => write!(f, "{}: {:.2}", self.paradigm, self.score),
        }
    }
}

/// Stateless scorer for both paradigms.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Scores `preferences` under `paradigm`.
    pub fn aggregate(paradigm: Paradigm, preferences: &Preferences, weights: &GlobalWeights) -> AggregateScore {
        let result = match paradigm {
            Paradigm::WeightedSum => AggregateScore {
                paradigm,
                score: Self::weighted_sum(preferences, weights),
                binding: None,
            },
            Paradigm::MinMax => {
                let (objective, score) = Self::min_max(preferences);
                AggregateScore {
                    paradigm,
                    score,
                    binding: Some(objective),
                }
            }
        };
        debug!(paradigm = %paradigm, score = result.score, "Preferences aggregated");
        result
    }

    /// `sum over objectives of weight * preference`.
    pub fn weighted_sum(preferences: &Preferences, weights: &GlobalWeights) -> f64 {
        preferences
            .iter()
            .map(|(key, preference)| weights.get(key) * preference.value())
            .sum()
    }

    /// The lowest preference and the objective holding it.
    ///
    /// Ties resolve to the first objective in canonical order.
    pub fn min_max(preferences: &Preferences) -> (ObjectiveKey, f64) {
        preferences
            .iter()
            .map(|(key, preference)| (key, preference.value()))
            .fold(None, |worst: Option<(ObjectiveKey, f64)>, (key, value)| match worst {
                Some((_, lowest)) if lowest <= value => worst,
                _ => Some((key, value)),
            })
            .unwrap_or((ObjectiveKey::InitialCost, 0.0))
    }

    /// The highest preference across objectives.
    pub fn best(preferences: &Preferences) -> f64 {
        preferences
            .iter()
            .map(|(_, preference)| preference.value())
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
