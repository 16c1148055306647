//! Design Session - Caller-owned state with a pure reducer.
//!
//! Presentation code keeps a [`DesignSession`] value and replaces it with
//! the result of [`reduce`] on every user action. The evaluator holds no
//! state of its own; each action re-runs the pipeline from scratch.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::evaluator::{DesignEvaluation, DesignEvaluator};
use crate::domain::design::{BoundPolicy, DesignVariable, DesignVector};
use crate::domain::foundation::DomainError;
use crate::domain::weighting::{WeightPreset, WeightingOutcome};

/// Everything the presentation layer shows for the current design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSession {
    /// Design as evaluated (clamped when the policy is `Clamp`).
    pub design: DesignVector,
    pub bound_policy: BoundPolicy,
    /// Raw influences aligned to the configured stakeholder order.
    pub raw_influence: Vec<f64>,
    /// Preset matching the current influences, if any.
    pub preset: Option<WeightPreset>,
    /// Stakeholder holding all influence after `FocusStakeholder`.
    pub focus: Option<String>,
    pub weighting: WeightingOutcome,
    pub evaluation: DesignEvaluation,
    pub warnings: Vec<String>,
}

/// A user action on the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionAction {
    /// Moves one or more sliders; `None` keeps the current value.
    SetDesign {
        x1: Option<f64>,
        x2: Option<f64>,
        x3: Option<f64>,
    },
    SetBoundPolicy { policy: BoundPolicy },
    SetInfluences { raw_influence: Vec<f64> },
    ApplyPreset { preset: WeightPreset },
    FocusStakeholder { name: String },
}

impl DesignSession {
    /// Starts a session at `design` with the configured influences and policy.
    pub fn start(evaluator: &DesignEvaluator, design: DesignVector) -> Result<Self, DomainError> {
        let raw_influence = evaluator.store().stakeholders().raw_influences();
        Self::evaluate(
            evaluator,
            Inputs {
                design,
                bound_policy: evaluator.default_policy(),
                preset: WeightPreset::matching(&raw_influence),
                raw_influence,
                focus: None,
            },
        )
    }

    fn inputs(&self) -> Inputs {
        Inputs {
            design: self.design,
            bound_policy: self.bound_policy,
            raw_influence: self.raw_influence.clone(),
            preset: self.preset,
            focus: self.focus.clone(),
        }
    }

    fn evaluate(evaluator: &DesignEvaluator, inputs: Inputs) -> Result<Self, DomainError> {
        let mut warnings = Vec::new();

        if inputs.bound_policy == BoundPolicy::Clamp {
            let bounds = evaluator.store().bounds();
            for variable in bounds.violations(&inputs.design) {
                let limits = bounds.get(variable);
                warnings.push(format!(
                    "{} = {} clamped into [{}, {}] {}",
                    variable,
                    inputs.design.get(variable),
                    limits.min,
                    limits.max,
                    limits.unit
                ));
            }
        }

        let table = evaluator
            .store()
            .stakeholders()
            .with_influences(&inputs.raw_influence)?;
        let weighting = evaluator.compute_global_weights(&table)?;
        for name in weighting.zero_filled_stakeholders() {
            warnings.push(format!("{} has no objective weights and contributes nothing", name));
        }

        let evaluation = evaluator.evaluate_design(&inputs.design, inputs.bound_policy, &weighting.global_weights)?;

        Ok(Self {
            design: evaluation.design,
            bound_policy: inputs.bound_policy,
            raw_influence: inputs.raw_influence,
            preset: inputs.preset,
            focus: inputs.focus,
            weighting,
            evaluation,
            warnings,
        })
    }
}

/// The values a session is derived from.
struct Inputs {
    design: DesignVector,
    bound_policy: BoundPolicy,
    raw_influence: Vec<f64>,
    preset: Option<WeightPreset>,
    focus: Option<String>,
}

/// Applies `action` to `state` and returns the new session.
///
/// `state` is never modified; on error the caller keeps its current session.
pub fn reduce(
    evaluator: &DesignEvaluator,
    state: &DesignSession,
    action: SessionAction,
) -> Result<DesignSession, DomainError> {
    let mut inputs = state.inputs();

    match action {
        SessionAction::SetDesign { x1, x2, x3 } => {
            let updates = [
                (DesignVariable::MovableLength, x1),
                (DesignVariable::GateHeight, x2),
                (DesignVariable::ClosureDuration, x3),
            ];
            for (variable, value) in updates {
                if let Some(value) = value {
                    inputs.design = inputs.design.with(variable, value);
                }
            }
        }
        SessionAction::SetBoundPolicy { policy } => {
            inputs.bound_policy = policy;
        }
        SessionAction::SetInfluences { raw_influence } => {
            inputs.preset = WeightPreset::matching(&raw_influence);
            inputs.raw_influence = raw_influence;
            inputs.focus = None;
        }
        SessionAction::ApplyPreset { preset } => {
            let table = preset.apply_to(evaluator.store().stakeholders())?;
            inputs.raw_influence = table.raw_influences();
            inputs.preset = Some(preset);
            inputs.focus = None;
        }
        SessionAction::FocusStakeholder { name } => {
            let table = evaluator.store().stakeholders().solo(&name)?;
            inputs.raw_influence = table.raw_influences();
            inputs.preset = None;
            inputs.focus = Some(name);
        }
    }

    let next = DesignSession::evaluate(evaluator, inputs)?;
    debug!(
        design = %next.design,
        weighted_sum = next.evaluation.weighted_sum.score,
        min_max = next.evaluation.min_max.score,
        "Session updated"
    );
    Ok(next)
}
