//! Weight Aggregator - Collapses stakeholder weights into global objective weights.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{StakeholderTable, WeightingError};
use crate::domain::foundation::{ObjectiveKey, ObjectiveMap};

/// Tolerance used when checking that weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Objective weights that are non-negative and sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalWeights(ObjectiveMap<f64>);

impl GlobalWeights {
    /// Normalizes arbitrary non-negative weights so they sum to one.
    ///
    /// # Errors
    /// `InvalidValue` for a negative or non-finite entry, `NoEffectiveWeight`
    /// when every entry is zero.
    pub fn try_new(weights: ObjectiveMap<f64>) -> Result<Self, WeightingError> {
        for (key, value) in weights.iter() {
            if !value.is_finite() || *value < 0.0 {
                return Err(WeightingError::InvalidValue {
                    field: format!("weight.{}", key),
                    value: *value,
                });
            }
        }
        let total = weights.sum();
        if total <= 0.0 {
            return Err(WeightingError::NoEffectiveWeight);
        }
        Ok(Self(weights.map(|_, w| w / total)))
    }

    /// Equal weight on every objective.
    pub fn uniform() -> Self {
        Self(ObjectiveMap::from_fn(|_| 1.0 / ObjectiveKey::COUNT as f64))
    }

    pub fn get(&self, objective: ObjectiveKey) -> f64 {
        self.0[objective]
    }

    pub fn as_map(&self) -> &ObjectiveMap<f64> {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectiveKey, &f64)> + '_ {
        self.0.iter()
    }

    pub fn sum(&self) -> f64 {
        self.0.sum()
    }
}

/// Normalized weight of one stakeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderWeight {
    pub name: String,
    /// Share of total influence, in [0, 1].
    pub influence: f64,
    /// Objective weights normalized to sum to one, or all zero when the raw
    /// row summed to zero.
    pub objective_weights: ObjectiveMap<f64>,
    /// True when the raw row summed to zero and was zero-filled.
    pub zero_filled: bool,
}

/// Result of collapsing a stakeholder table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightingOutcome {
    pub global_weights: GlobalWeights,
    pub stakeholders: Vec<StakeholderWeight>,
}

impl WeightingOutcome {
    /// Names of stakeholders whose raw objective row summed to zero.
    pub fn zero_filled_stakeholders(&self) -> Vec<&str> {
        self.stakeholders
            .iter()
            .filter(|s| s.zero_filled)
            .map(|s| s.name.as_str())
            .collect()
    }
}

/// Stateless calculator for stakeholder weighting.
pub struct WeightAggregator;

impl WeightAggregator {
    /// Scales raw influences so they sum to one.
    ///
    /// # Errors
    /// `DegenerateInfluence` when the total is zero or not finite.
    pub fn normalize_influence(raw_influence: &[f64]) -> Result<Vec<f64>, WeightingError> {
        let sum: f64 = raw_influence.iter().sum();
        if !sum.is_finite() || sum <= 0.0 {
            return Err(WeightingError::DegenerateInfluence { sum });
        }
        Ok(raw_influence.iter().map(|w| w / sum).collect())
    }

    /// Scales one stakeholder's raw objective row so it sums to one.
    ///
    /// Returns `None` when the row sums to zero; callers treat that
    /// stakeholder as contributing nothing.
    pub fn normalize_objective_weights(row: &ObjectiveMap<f64>) -> Option<ObjectiveMap<f64>> {
        let sum = row.sum();
        if !sum.is_finite() || sum <= 0.0 {
            return None;
        }
        Some(row.map(|_, w| w / sum))
    }

    /// Collapses the table into global objective weights.
    ///
    /// `global[j] = sum over s of influence[s] * row[s][j]`. Zero rows are
    /// zero-filled and the result is renormalized so it still sums to one.
    ///
    /// # Errors
    /// `DegenerateInfluence` when raw influences sum to zero,
    /// `NoEffectiveWeight` when every influential stakeholder has a zero row.
    pub fn compute_global_weights(table: &StakeholderTable) -> Result<WeightingOutcome, WeightingError> {
        let influences = Self::normalize_influence(&table.raw_influences())?;

        let stakeholders: Vec<StakeholderWeight> = table
            .profiles()
            .iter()
            .zip(influences)
            .map(|(profile, influence)| {
                match Self::normalize_objective_weights(&profile.raw_objective_weights) {
                    Some(objective_weights) => StakeholderWeight {
                        name: profile.name.clone(),
                        influence,
                        objective_weights,
                        zero_filled: false,
                    },
                    None => {
                        warn!(
                            stakeholder = %profile.name,
                            "Objective weight row sums to zero; stakeholder contributes nothing"
                        );
                        StakeholderWeight {
                            name: profile.name.clone(),
                            influence,
                            objective_weights: ObjectiveMap::default(),
                            zero_filled: true,
                        }
                    }
                }
            })
            .collect();

        let combined = ObjectiveMap::from_fn(|key| {
            stakeholders
                .iter()
                .map(|s| s.influence * s.objective_weights[key])
                .sum::<f64>()
        });

        let global_weights = if stakeholders.iter().any(|s| s.zero_filled) {
            GlobalWeights::try_new(combined)?
        } else {
            GlobalWeights(combined)
        };

        debug!(weights = ?global_weights.as_map(), "Global objective weights computed");

        Ok(WeightingOutcome {
            global_weights,
            stakeholders,
        })
    }

    /// The `n` heaviest objectives of a weight row, heaviest first.
    ///
    /// Ties keep canonical objective order.
    pub fn top_objectives(row: &ObjectiveMap<f64>, n: usize) -> Vec<(ObjectiveKey, f64)> {
        let mut ranked: Vec<(ObjectiveKey, f64)> = row.iter().map(|(k, w)| (k, *w)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(influence: Vec<f64>, rows: Vec<Vec<f64>>) -> StakeholderTable {
        let names = (0..rows.len()).map(|i| format!("S{}", i)).collect();
        StakeholderTable::from_columns(names, influence, rows).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    // ───────────────────────────────────────────────────────────────
    // normalize_influence
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn normalize_influence_scales_to_one() {
        let w = WeightAggregator::normalize_influence(&[2.0, 1.0, 1.0]).unwrap();
        assert_eq!(w, vec![0.5, 0.25, 0.25]);
    }

    #[test]
    fn normalize_influence_rejects_zero_sum() {
        assert_eq!(
            WeightAggregator::normalize_influence(&[0.0, 0.0]),
            Err(WeightingError::DegenerateInfluence { sum: 0.0 })
        );
    }

    // ───────────────────────────────────────────────────────────────
    // normalize_objective_weights
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn normalize_objective_weights_scales_row() {
        let row = ObjectiveMap::from_array([1.0, 1.0, 0.0, 0.0, 0.0, 2.0]);
        let normalized = WeightAggregator::normalize_objective_weights(&row).unwrap();
        assert!(approx(normalized.overtopping_risk, 0.5));
        assert!(approx(normalized.sum(), 1.0));
    }

    #[test]
    fn normalize_objective_weights_returns_none_for_zero_row() {
        assert!(WeightAggregator::normalize_objective_weights(&ObjectiveMap::default()).is_none());
    }

    // ───────────────────────────────────────────────────────────────
    // compute_global_weights
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn global_weights_are_influence_weighted_rows() {
        let t = table(
            vec![3.0, 1.0],
            vec![
                vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            ],
        );
        let outcome = WeightAggregator::compute_global_weights(&t).unwrap();
        assert!(approx(outcome.global_weights.get(ObjectiveKey::InitialCost), 0.75));
        assert!(approx(outcome.global_weights.get(ObjectiveKey::OvertoppingRisk), 0.25));
        assert!(approx(outcome.global_weights.sum(), 1.0));
        assert!(outcome.zero_filled_stakeholders().is_empty());
    }

    #[test]
    fn zero_row_is_zero_filled_and_renormalized() {
        let t = table(
            vec![1.0, 1.0],
            vec![
                vec![0.0; 6],
                vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.0],
            ],
        );
        let outcome = WeightAggregator::compute_global_weights(&t).unwrap();
        assert_eq!(outcome.zero_filled_stakeholders(), vec!["S0"]);
        assert!(approx(outcome.global_weights.get(ObjectiveKey::Sight), 0.5));
        assert!(approx(outcome.global_weights.get(ObjectiveKey::WaterQuality), 0.5));
        assert!(approx(outcome.global_weights.sum(), 1.0));
    }

    #[test]
    fn only_zero_rows_with_influence_has_no_effective_weight() {
        let t = table(
            vec![1.0, 0.0],
            vec![vec![0.0; 6], vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0]],
        );
        assert_eq!(
            WeightAggregator::compute_global_weights(&t),
            Err(WeightingError::NoEffectiveWeight)
        );
    }

    #[test]
    fn zero_influence_table_is_degenerate() {
        let t = table(vec![0.0], vec![vec![1.0; 6]]);
        assert!(matches!(
            WeightAggregator::compute_global_weights(&t),
            Err(WeightingError::DegenerateInfluence { .. })
        ));
    }

    // ───────────────────────────────────────────────────────────────
    // GlobalWeights / top_objectives
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn global_weights_try_new_normalizes() {
        let w = GlobalWeights::try_new(ObjectiveMap::from_array([2.0, 2.0, 0.0, 0.0, 0.0, 4.0])).unwrap();
        assert!(approx(w.get(ObjectiveKey::OvertoppingRisk), 0.5));
    }

    #[test]
    fn global_weights_try_new_rejects_negative() {
        let err = GlobalWeights::try_new(ObjectiveMap::from_array([1.0, -1.0, 0.0, 0.0, 0.0, 0.0])).unwrap_err();
        assert!(matches!(err, WeightingError::InvalidValue { .. }));
    }

    #[test]
    fn uniform_weights_sum_to_one() {
        assert!(approx(GlobalWeights::uniform().sum(), 1.0));
    }

    #[test]
    fn top_objectives_orders_by_weight_then_canonical_order() {
        let row = ObjectiveMap::from_array([0.1, 0.3, 0.3, 0.0, 0.0, 0.3]);
        let top = WeightAggregator::top_objectives(&row, 2);
        assert_eq!(
            top.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            vec![ObjectiveKey::MaintenanceCost, ObjectiveKey::Sight]
        );
    }
}
