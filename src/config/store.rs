//! Validated, immutable configuration consumed by the engine

use tracing::debug;

use super::{ConfigError, EngineConfig, EvaluationConfig};
use crate::domain::design::{CostCoefficients, DesignBounds, MetricModel};
use crate::domain::foundation::ObjectiveMap;
use crate::domain::preference::KnotSet;
use crate::domain::weighting::{StakeholderTable, WeightAggregator};

/// Immutable domain configuration built from an [`EngineConfig`].
///
/// Every check happens in [`ConfigStore::from_config`]; once built, the
/// store never fails and never changes.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    bounds: DesignBounds,
    knots: ObjectiveMap<KnotSet>,
    stakeholders: StakeholderTable,
    costs: CostCoefficients,
    evaluation: EvaluationConfig,
}

impl ConfigStore {
    /// Validates `config` and builds the domain objects.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for bad bounds, coefficients or settings
    /// - `Curve` for a malformed knot set, naming the objective
    /// - `Weighting` for a malformed stakeholder table or zero total influence
    pub fn from_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let knots = ObjectiveMap::try_from_fn(|objective| {
            KnotSet::try_from(config.knots[objective].clone())
                .map_err(|source| ConfigError::Curve { objective, source })
        })?;

        let stakeholders = StakeholderTable::try_from(config.stakeholders)?;
        WeightAggregator::compute_global_weights(&stakeholders)?;

        debug!(
            stakeholders = stakeholders.len(),
            bound_policy = ?config.evaluation.bound_policy,
            "Configuration store built"
        );

        Ok(Self {
            bounds: config.bounds,
            knots,
            stakeholders,
            costs: config.cost_model,
            evaluation: config.evaluation,
        })
    }

    /// Store built from the embedded course configuration.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::from_config(EngineConfig::defaults()?)
    }

    pub fn bounds(&self) -> &DesignBounds {
        &self.bounds
    }

    pub fn knots(&self) -> &ObjectiveMap<KnotSet> {
        &self.knots
    }

    pub fn stakeholders(&self) -> &StakeholderTable {
        &self.stakeholders
    }

    pub fn costs(&self) -> &CostCoefficients {
        &self.costs
    }

    pub fn evaluation(&self) -> &EvaluationConfig {
        &self.evaluation
    }

    /// Metric model bound to the configured bounds and coefficients.
    pub fn metric_model(&self) -> MetricModel {
        MetricModel::new(self.bounds.clone(), self.costs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ObjectiveKey;
    use crate::domain::preference::CurveError;
    use crate::domain::weighting::WeightingError;

    #[test]
    fn defaults_build_a_store() {
        let store = ConfigStore::defaults().unwrap();
        assert_eq!(store.stakeholders().len(), 4);
        assert_eq!(store.knots()[ObjectiveKey::Sight].len(), 4);
        assert!(store.knots()[ObjectiveKey::OvertoppingRisk].is_non_increasing());
    }

    #[test]
    fn malformed_knots_name_the_objective() {
        let mut config = EngineConfig::defaults().unwrap();
        config.knots.water_quality.x = vec![0.0, 5.0, 5.0, 10.0];
        let err = ConfigStore::from_config(config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Curve {
                objective: ObjectiveKey::WaterQuality,
                source: CurveError::NotStrictlyIncreasing { .. }
            }
        ));
    }

    #[test]
    fn short_weight_row_fails_fast() {
        let mut config = EngineConfig::defaults().unwrap();
        config.stakeholders.raw_objective_weights[2].pop();
        let err = ConfigStore::from_config(config).unwrap_err();
        assert!(matches!(err, ConfigError::Weighting(WeightingError::RowWidth { .. })));
    }

    #[test]
    fn zero_total_influence_fails_fast() {
        let mut config = EngineConfig::defaults().unwrap();
        config.stakeholders.raw_influence = vec![0.0; 4];
        let err = ConfigStore::from_config(config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Weighting(WeightingError::DegenerateInfluence { .. })
        ));
    }

    #[test]
    fn metric_model_uses_configured_costs() {
        let mut config = EngineConfig::defaults().unwrap();
        config.cost_model.c3 = 0.0;
        let store = ConfigStore::from_config(config).unwrap();
        assert_eq!(store.metric_model().costs().c3, 0.0);
    }
}
