//! One preference curve per objective.

use std::sync::Arc;

use super::{CurveCache, CurveError, KnotSet, PreferenceCurve};
use crate::domain::foundation::{Metrics, ObjectiveKey, ObjectiveMap, PreferenceScore, Preferences};

/// The six built curves used to turn metrics into preferences.
#[derive(Debug, Clone)]
pub struct PreferenceCurves {
    curves: ObjectiveMap<Arc<PreferenceCurve>>,
}

impl PreferenceCurves {
    /// Builds (or reuses from `cache`) the curve of every objective.
    pub fn from_knots(knots: &ObjectiveMap<KnotSet>, cache: &CurveCache) -> Self {
        Self {
            curves: knots.map(|_, set| cache.get_or_build(set)),
        }
    }

    pub fn curve(&self, objective: ObjectiveKey) -> &PreferenceCurve {
        &self.curves[objective]
    }

    /// Preference for a single objective's metric value.
    pub fn evaluate(&self, objective: ObjectiveKey, metric: f64) -> Result<PreferenceScore, CurveError> {
        self.curves[objective].evaluate(metric)
    }

    /// Preferences for a full metric set.
    pub fn evaluate_all(&self, metrics: &Metrics) -> Result<Preferences, CurveError> {
        ObjectiveMap::try_from_fn(|key| self.evaluate(key, metrics[key]))
    }
}
