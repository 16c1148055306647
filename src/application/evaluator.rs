//! Design Evaluator - The engine facade consumed by presentation code.
//!
//! Wires the configured metric model, preference curves and weighting into
//! one stateless pipeline:
//! `DesignVector -> Metrics -> Preferences -> Scores`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::config::ConfigStore;
use crate::domain::analysis::{
    AggregateScore, AggregationEngine, CandidateRanker, Paradigm, RankedCandidate, ScoredCandidate,
};
use crate::domain::design::{BoundPolicy, DesignVector, MetricModel};
use crate::domain::foundation::{DomainError, Metrics, ObjectiveKey, PreferenceScore, Preferences};
use crate::domain::preference::{CurveCache, PreferenceCurves};
use crate::domain::weighting::{GlobalWeights, StakeholderTable, WeightAggregator, WeightingOutcome};
use crate::ports::{ScenarioKey, StoredResultCatalog};

/// Full evaluation of one design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignEvaluation {
    /// The design actually evaluated, after the bound policy was applied.
    pub design: DesignVector,
    pub metrics: Metrics,
    pub preferences: Preferences,
    pub weighted_sum: AggregateScore,
    pub min_max: AggregateScore,
}

impl DesignEvaluation {
    pub fn score(&self, paradigm: Paradigm) -> AggregateScore {
        match paradigm {
            Paradigm::WeightedSum => self.weighted_sum,
            Paradigm::MinMax => self.min_max,
        }
    }
}

/// A stored result rescored with the current curves and its scenario's weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvaluation {
    pub key: ScenarioKey,
    pub global_weights: GlobalWeights,
    pub evaluation: DesignEvaluation,
}

/// Stateless evaluation engine over an immutable configuration.
///
/// Cloning is cheap; built curves are shared through the curve cache.
#[derive(Clone)]
pub struct DesignEvaluator {
    store: Arc<ConfigStore>,
    model: MetricModel,
    curves: PreferenceCurves,
    catalog: Arc<dyn StoredResultCatalog>,
}

impl DesignEvaluator {
    /// Creates an evaluator whose curves come from the process-wide cache.
    pub fn new(store: Arc<ConfigStore>, catalog: Arc<dyn StoredResultCatalog>) -> Self {
        Self::with_cache(store, catalog, CurveCache::global())
    }

    /// Creates an evaluator building curves through `cache`.
    pub fn with_cache(
        store: Arc<ConfigStore>,
        catalog: Arc<dyn StoredResultCatalog>,
        cache: &CurveCache,
    ) -> Self {
        let model = store.metric_model();
        let curves = PreferenceCurves::from_knots(store.knots(), cache);
        Self {
            store,
            model,
            curves,
            catalog,
        }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn curves(&self) -> &PreferenceCurves {
        &self.curves
    }

    pub fn catalog(&self) -> &dyn StoredResultCatalog {
        self.catalog.as_ref()
    }

    /// The bound policy from configuration.
    pub fn default_policy(&self) -> BoundPolicy {
        self.store.evaluation().bound_policy
    }

    /// Metrics for `design` under the configured bound policy.
    pub fn compute_metrics(&self, design: &DesignVector) -> Result<Metrics, DomainError> {
        self.compute_metrics_with(design, self.default_policy())
    }

    /// Metrics for `design` under an explicit bound policy.
    pub fn compute_metrics_with(&self, design: &DesignVector, policy: BoundPolicy) -> Result<Metrics, DomainError> {
        Ok(self.model.compute(design, policy)?)
    }

    /// Preference (0-100) for one objective's metric value.
    pub fn evaluate_preference(&self, objective: ObjectiveKey, metric: f64) -> Result<PreferenceScore, DomainError> {
        Ok(self.curves.evaluate(objective, metric)?)
    }

    /// Preferences for a full metric set.
    pub fn evaluate_preferences(&self, metrics: &Metrics) -> Result<Preferences, DomainError> {
        Ok(self.curves.evaluate_all(metrics)?)
    }

    /// Global weights for an arbitrary stakeholder table.
    pub fn compute_global_weights(&self, table: &StakeholderTable) -> Result<WeightingOutcome, DomainError> {
        Ok(WeightAggregator::compute_global_weights(table)?)
    }

    /// Global weights for the configured stakeholder table.
    pub fn configured_global_weights(&self) -> Result<WeightingOutcome, DomainError> {
        self.compute_global_weights(self.store.stakeholders())
    }

    /// Scores preferences under one paradigm.
    pub fn aggregate(&self, paradigm: Paradigm, preferences: &Preferences, weights: &GlobalWeights) -> AggregateScore {
        AggregationEngine::aggregate(paradigm, preferences, weights)
    }

    /// Runs the whole pipeline for one design.
    pub fn evaluate_design(
        &self,
        design: &DesignVector,
        policy: BoundPolicy,
        weights: &GlobalWeights,
    ) -> Result<DesignEvaluation, DomainError> {
        let admitted = self.model.bounds().admit(design, policy)?;
        let metrics = self.model.compute_admitted(&admitted);
        self.evaluate_metrics(admitted, metrics, weights)
    }

    fn evaluate_metrics(
        &self,
        design: DesignVector,
        metrics: Metrics,
        weights: &GlobalWeights,
    ) -> Result<DesignEvaluation, DomainError> {
        let preferences = self.evaluate_preferences(&metrics)?;
        let evaluation = DesignEvaluation {
            design,
            metrics,
            preferences,
            weighted_sum: self.aggregate(Paradigm::WeightedSum, &preferences, weights),
            min_max: self.aggregate(Paradigm::MinMax, &preferences, weights),
        };
        debug!(
            %design,
            weighted_sum = evaluation.weighted_sum.score,
            min_max = evaluation.min_max.score,
            "Design evaluated"
        );
        Ok(evaluation)
    }

    /// Scores labelled candidate designs and ranks them under `paradigm`.
    pub fn rank_candidates(
        &self,
        candidates: &[(String, DesignVector)],
        paradigm: Paradigm,
        policy: BoundPolicy,
        weights: &GlobalWeights,
    ) -> Result<Vec<RankedCandidate>, DomainError> {
        let scored = candidates
            .iter()
            .map(|(label, design)| {
                let evaluation = self.evaluate_design(design, policy, weights)?;
                Ok(ScoredCandidate::new(label.clone(), evaluation.score(paradigm)))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(CandidateRanker::rank(scored))
    }

    /// Global weights implied by a scenario key.
    ///
    /// Preset scenarios use the preset influences; any other scenario is
    /// read as a stakeholder name and gets a solo weighting.
    pub fn scenario_weights(&self, key: &ScenarioKey) -> Result<GlobalWeights, DomainError> {
        let table = match key.as_preset() {
            Some(preset) => preset.apply_to(self.store.stakeholders())?,
            None => self.store.stakeholders().solo(&key.scenario)?,
        };
        Ok(self.compute_global_weights(&table)?.global_weights)
    }

    /// Converts a stored result's metrics into preferences and scores.
    ///
    /// The stored metrics are used as recorded; they are not recomputed
    /// from the stored design.
    pub fn rescore_stored_result(&self, key: &ScenarioKey) -> Result<StoredEvaluation, DomainError> {
        let stored = self.catalog.lookup_stored_result(key)?;
        let global_weights = self.scenario_weights(key)?;
        let evaluation = self.evaluate_metrics(stored.design, stored.metrics, &global_weights)?;
        Ok(StoredEvaluation {
            key: key.clone(),
            global_weights,
            evaluation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::NotebookResultCatalog;
    use crate::domain::foundation::ErrorCode;

    fn evaluator() -> DesignEvaluator {
        DesignEvaluator::with_cache(
            Arc::new(ConfigStore::defaults().unwrap()),
            Arc::new(NotebookResultCatalog::builtin()),
            &CurveCache::new(),
        )
    }

    #[test]
    fn compute_metrics_matches_model() {
        let metrics = evaluator()
            .compute_metrics(&DesignVector::new(1598.44, 2.92, 2.11))
            .unwrap();
        assert!((metrics.sight - 9.99).abs() < 0.01);
        assert!((metrics.overtopping_risk - 0.331).abs() < 0.002);
    }

    #[test]
    fn reject_policy_surfaces_domain_error() {
        let err = evaluator()
            .compute_metrics_with(&DesignVector::new(0.0, 9.99, 3.19), BoundPolicy::Reject)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DesignOutOfBounds);
    }

    #[test]
    fn zero_gate_height_is_rejected_before_metrics() {
        let e = evaluator();
        for policy in [BoundPolicy::Clamp, BoundPolicy::Reject] {
            let err = e
                .compute_metrics_with(&DesignVector::new(1600.0, 0.0, 1.0), policy)
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidGateHeight);
        }
    }

    #[test]
    fn evaluate_preference_hits_knots() {
        let e = evaluator();
        let score = e.evaluate_preference(ObjectiveKey::Sight, 7.0).unwrap();
        assert_eq!(score.value(), 70.0);
    }

    #[test]
    fn evaluate_preference_rejects_nan() {
        let err = evaluator()
            .evaluate_preference(ObjectiveKey::Sight, f64::NAN)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NonFiniteInput);
    }

    #[test]
    fn configured_weights_sum_to_one() {
        let outcome = evaluator().configured_global_weights().unwrap();
        assert!((outcome.global_weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn evaluate_design_reports_admitted_design() {
        let e = evaluator();
        let weights = e.configured_global_weights().unwrap().global_weights;
        let evaluation = e
            .evaluate_design(&DesignVector::new(0.0, 9.99, 3.19), BoundPolicy::Clamp, &weights)
            .unwrap();
        assert_eq!(evaluation.design.x3, 3.0);
        assert_eq!(evaluation.min_max.score, 0.0);
        assert!(evaluation.min_max.score <= evaluation.weighted_sum.score);
    }

    #[test]
    fn rank_candidates_orders_by_score() {
        let e = evaluator();
        let weights = e.configured_global_weights().unwrap().global_weights;
        let candidates = vec![
            ("closed inlet".to_string(), DesignVector::new(0.0, 9.99, 3.0)),
            ("movable gate".to_string(), DesignVector::new(1598.44, 2.92, 2.11)),
        ];
        let ranked = e
            .rank_candidates(&candidates, Paradigm::WeightedSum, BoundPolicy::Clamp, &weights)
            .unwrap();
        assert_eq!(ranked[0].candidate.label, "movable gate");
        assert_eq!(ranked[0].relative_rating, 100.0);
        assert_eq!(ranked[1].relative_rating, 0.0);
    }

    #[test]
    fn scenario_weights_for_solo_stakeholder_match_their_row() {
        let e = evaluator();
        let key: ScenarioKey = "Environmental Agency:min-max".parse().unwrap();
        let weights = e.scenario_weights(&key).unwrap();
        assert!((weights.get(ObjectiveKey::WaterQuality) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn rescore_stored_result_uses_recorded_metrics() {
        let e = evaluator();
        let key: ScenarioKey = "balanced:min-max".parse().unwrap();
        let rescored = e.rescore_stored_result(&key).unwrap();
        assert_eq!(rescored.evaluation.metrics.initial_cost, 1.381e9);
        assert!(rescored.evaluation.min_max.binding.is_some());
    }

    #[test]
    fn rescore_unknown_scenario_fails() {
        let err = evaluator()
            .rescore_stored_result(&ScenarioKey::new("Tourists", Paradigm::MinMax))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownScenario);
    }
}
