//! Metric Model - Closed-form performance metrics for a barrier design.
//!
//! With L = movable length, H = gate height and T = closure duration:
//!
//! | Metric | Formula |
//! |--------|---------|
//! | initial_cost | `L·(H²·c₂ + c₂/T) + (S−L)·H²·c₃` |
//! | maintenance_cost | `L·(H·d₁ + d₂/T²) + (S−L)·H·d₃` |
//! | sight | `clamp₀¹⁰((L/S)·10 − ((S−L)/(S·H))·10)` |
//! | accessibility | `clamp₀¹⁰((L/S)·10 − (10/7)·T)` |
//! | water_quality | `clamp₀¹⁰((L/S)·10 − (10/24)·T)` |
//! | overtopping_risk | `0.65·e^(−0.35·(H−1))` |
//!
//! where S is the 1600 m inlet span.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BoundPolicy, DesignBounds, DesignError, DesignVector};
use crate::domain::foundation::{Metrics, ValidationError};

/// Combined length of the three lagoon inlets [m].
pub const INLET_SPAN_M: f64 = 1600.0;

/// Upper end of the 0-10 score metrics.
pub const SCORE_CEILING: f64 = 10.0;

/// Overtopping probability of a 1 m gate.
const BASE_OVERTOPPING_RISK: f64 = 0.65;

/// Exponential decay of overtopping risk per metre of gate height.
const OVERTOPPING_DECAY_PER_M: f64 = 0.35;

/// Cost coefficients of the construction and maintenance formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostCoefficients {
    /// Movable gate construction cost per metre per H² and per 1/T.
    pub c2: f64,
    /// Fixed structure construction cost per metre per H².
    pub c3: f64,
    /// Movable gate maintenance per metre per H.
    pub d1: f64,
    /// Movable gate maintenance per metre per 1/T².
    pub d2: f64,
    /// Fixed structure maintenance per metre per H.
    pub d3: f64,
}

impl Default for CostCoefficients {
    fn default() -> Self {
        Self {
            c2: 4.8e4,
            c3: 5.5e3,
            d1: 4.8e5,
            d2: 1.5e6,
            d3: 2.2e4,
        }
    }
}

impl CostCoefficients {
    /// Checks that every coefficient is finite and non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let named = [
            ("cost_model.c2", self.c2),
            ("cost_model.c3", self.c3),
            ("cost_model.d1", self.d1),
            ("cost_model.d2", self.d2),
            ("cost_model.d3", self.d3),
        ];
        for (field, value) in named {
            if !value.is_finite() {
                return Err(ValidationError::not_finite(field));
            }
            if value < 0.0 {
                return Err(ValidationError::out_of_range(field, 0.0, f64::MAX, value));
            }
        }
        Ok(())
    }
}

/// Maps design vectors to the six domain metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricModel {
    bounds: DesignBounds,
    costs: CostCoefficients,
}

impl MetricModel {
    pub fn new(bounds: DesignBounds, costs: CostCoefficients) -> Self {
        Self { bounds, costs }
    }

    pub fn bounds(&self) -> &DesignBounds {
        &self.bounds
    }

    pub fn costs(&self) -> &CostCoefficients {
        &self.costs
    }

    /// Computes all six metrics for `design` after applying `policy`.
    ///
    /// # Errors
    /// - `DesignError::OutOfBounds` under [`BoundPolicy::Reject`]
    /// - `DesignError::NonPositiveGateHeight` when H ≤ 0
    /// - `DesignError::NonPositiveDuration` when T ≤ 0
    /// - `DesignError::NonFinite` for NaN or infinite components
    pub fn compute(&self, design: &DesignVector, policy: BoundPolicy) -> Result<Metrics, DesignError> {
        let admitted = self.bounds.admit(design, policy)?;
        let metrics = self.compute_admitted(&admitted);
        debug!(design = %admitted, ?metrics, "Metrics computed");
        Ok(metrics)
    }

    /// Evaluates the formulas on a design already passed through
    /// [`DesignBounds::admit`].
    pub(crate) fn compute_admitted(&self, design: &DesignVector) -> Metrics {
        let (l, h, t) = (design.x1, design.x2, design.x3);
        let fixed = INLET_SPAN_M - l;
        let movable_share = (l / INLET_SPAN_M) * SCORE_CEILING;
        let CostCoefficients { c2, c3, d1, d2, d3 } = self.costs;

        Metrics {
            initial_cost: l * (h * h * c2 + (1.0 / t) * c2) + fixed * (h * h * c3),
            maintenance_cost: l * (h * d1 + (1.0 / (t * t)) * d2) + fixed * (h * d3),
            sight: clamp_score(movable_share - (fixed / (INLET_SPAN_M * h)) * SCORE_CEILING),
            accessibility: clamp_score(movable_share - (10.0 / 7.0) * t),
            water_quality: clamp_score(movable_share - (10.0 / 24.0) * t),
            overtopping_risk: BASE_OVERTOPPING_RISK * (-OVERTOPPING_DECAY_PER_M * (h - 1.0)).exp(),
        }
    }
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, SCORE_CEILING)
}
