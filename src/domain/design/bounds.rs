//! Variable bounds and the policy for out-of-bounds design inputs.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{DesignError, DesignVariable, DesignVector};
use crate::domain::foundation::ValidationError;

/// How out-of-bounds design components are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundPolicy {
    /// Snap each component into its bound (interactive sliders).
    #[default]
    Clamp,
    /// Fail with [`DesignError::OutOfBounds`] (batch evaluation).
    Reject,
}

/// Declared range of one design variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: String,
}

impl VariableBounds {
    pub fn new(min: f64, max: f64, step: f64, unit: impl Into<String>) -> Self {
        Self {
            min,
            max,
            step,
            unit: unit.into(),
        }
    }

    /// Checks that the range is finite, ordered and has a positive step.
    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        for value in [self.min, self.max, self.step] {
            if !value.is_finite() {
                return Err(ValidationError::not_finite(field));
            }
        }
        if self.min >= self.max {
            return Err(ValidationError::invalid_format(
                field,
                format!("min ({}) must be below max ({})", self.min, self.max),
            ));
        }
        if self.step <= 0.0 {
            return Err(ValidationError::invalid_format(field, "step must be positive"));
        }
        if self.unit.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.unit", field)));
        }
        Ok(())
    }

    /// Returns true if `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Number of slider positions across the range.
    pub fn steps(&self) -> usize {
        ((self.max - self.min) / self.step).floor() as usize + 1
    }

    /// Rounds `value` to the nearest slider position.
    pub fn snap_to_step(&self, value: f64) -> f64 {
        let k = ((self.clamp(value) - self.min) / self.step).round();
        self.clamp(self.min + k * self.step)
    }
}

/// Bounds for the full design vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignBounds {
    pub x1: VariableBounds,
    pub x2: VariableBounds,
    pub x3: VariableBounds,
}

impl DesignBounds {
    /// Returns the bounds of one variable.
    pub fn get(&self, variable: DesignVariable) -> &VariableBounds {
        match variable {
            DesignVariable::MovableLength => &self.x1,
            DesignVariable::GateHeight => &self.x2,
            DesignVariable::ClosureDuration => &self.x3,
        }
    }

    /// Validates all three ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for variable in DesignVariable::all() {
            self.get(*variable).validate(variable.symbol())?;
        }
        Ok(())
    }

    /// Variables of `design` that fall outside their declared bounds.
    pub fn violations(&self, design: &DesignVector) -> Vec<DesignVariable> {
        DesignVariable::all()
            .iter()
            .copied()
            .filter(|variable| !self.get(*variable).contains(design.get(*variable)))
            .collect()
    }

    /// Applies `policy` to `design`, producing an in-bounds vector.
    ///
    /// Non-finite components, non-positive gate heights and non-positive
    /// durations are rejected under either policy.
    pub fn admit(&self, design: &DesignVector, policy: BoundPolicy) -> Result<DesignVector, DesignError> {
        for variable in DesignVariable::all() {
            if !design.get(*variable).is_finite() {
                return Err(DesignError::NonFinite { variable: *variable });
            }
        }
        if design.x2 <= 0.0 {
            return Err(DesignError::NonPositiveGateHeight { actual: design.x2 });
        }
        if design.x3 <= 0.0 {
            return Err(DesignError::NonPositiveDuration { actual: design.x3 });
        }

        let mut admitted = *design;
        for variable in self.violations(design) {
            let bounds = self.get(variable);
            let actual = design.get(variable);
            match policy {
                BoundPolicy::Reject => {
                    return Err(DesignError::OutOfBounds {
                        variable,
                        min: bounds.min,
                        max: bounds.max,
                        actual,
                    });
                }
                BoundPolicy::Clamp => {
                    let clamped = bounds.clamp(actual);
                    warn!(variable = %variable, actual, clamped, "Design input clamped to bound");
                    admitted = admitted.with(variable, clamped);
                }
            }
        }
        Ok(admitted)
    }
}
