//! PreferenceScore value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A stakeholder desirability score between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceScore(f64);

impl PreferenceScore {
    /// Lowest preference.
    pub const MIN: Self = Self(0.0);

    /// Highest preference.
    pub const MAX: Self = Self(100.0);

    /// Creates a new PreferenceScore, clamping to valid range.
    ///
    /// NaN maps to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Creates a PreferenceScore, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::not_finite("preference"));
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::out_of_range("preference", 0.0, 100.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }

    /// Returns the value rounded to the nearest whole point, as shown in result tables.
    pub fn rounded(&self) -> f64 {
        self.0.round()
    }
}

impl fmt::Display for PreferenceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} / 100", self.0)
    }
}
