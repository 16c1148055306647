//! Design vector and its three variables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three degrees of freedom of a barrier design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignVariable {
    /// x1: length of the inlet span built as movable gates.
    MovableLength,
    /// x2: gate height above water.
    GateHeight,
    /// x3: time the gates stay closed per event.
    ClosureDuration,
}

impl DesignVariable {
    /// Returns all variables in vector order.
    pub fn all() -> &'static [DesignVariable; 3] {
        &[
            DesignVariable::MovableLength,
            DesignVariable::GateHeight,
            DesignVariable::ClosureDuration,
        ]
    }

    /// Returns the vector symbol (`x1`, `x2`, `x3`).
    pub fn symbol(&self) -> &'static str {
        match self {
            DesignVariable::MovableLength => "x1",
            DesignVariable::GateHeight => "x2",
            DesignVariable::ClosureDuration => "x3",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            DesignVariable::MovableLength => "Movable barrier length",
            DesignVariable::GateHeight => "Gate height above water",
            DesignVariable::ClosureDuration => "Closure duration",
        }
    }
}

impl fmt::Display for DesignVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A candidate barrier design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignVector {
    /// Movable length L [m].
    pub x1: f64,
    /// Gate height H [m].
    pub x2: f64,
    /// Closure duration T [h].
    pub x3: f64,
}

impl DesignVector {
    pub fn new(x1: f64, x2: f64, x3: f64) -> Self {
        Self { x1, x2, x3 }
    }

    /// Returns the component for a variable.
    pub fn get(&self, variable: DesignVariable) -> f64 {
        match variable {
            DesignVariable::MovableLength => self.x1,
            DesignVariable::GateHeight => self.x2,
            DesignVariable::ClosureDuration => self.x3,
        }
    }

    /// Returns a copy with one component replaced.
    pub fn with(mut self, variable: DesignVariable, value: f64) -> Self {
        match variable {
            DesignVariable::MovableLength => self.x1 = value,
            DesignVariable::GateHeight => self.x2 = value,
            DesignVariable::ClosureDuration => self.x3 = value,
        }
        self
    }
}

impl fmt::Display for DesignVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x1={:.2} m, x2={:.2} m, x3={:.2} h)", self.x1, self.x2, self.x3)
    }
}
