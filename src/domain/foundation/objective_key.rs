//! ObjectiveKey enum representing the six evaluated performance aspects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The six performance aspects every design is scored on.
///
/// The set is closed and ordered; knot sets, weight rows and metric maps are
/// all indexed by these keys in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKey {
    InitialCost,
    MaintenanceCost,
    Sight,
    Accessibility,
    WaterQuality,
    OvertoppingRisk,
}

impl ObjectiveKey {
    /// Number of objectives.
    pub const COUNT: usize = 6;

    /// Returns all objectives in canonical order.
    pub fn all() -> &'static [ObjectiveKey; ObjectiveKey::COUNT] {
        &[
            ObjectiveKey::InitialCost,
            ObjectiveKey::MaintenanceCost,
            ObjectiveKey::Sight,
            ObjectiveKey::Accessibility,
            ObjectiveKey::WaterQuality,
            ObjectiveKey::OvertoppingRisk,
        ]
    }

    /// Returns the 0-based index of this objective in the canonical order.
    pub fn index(&self) -> usize {
        match self {
            ObjectiveKey::InitialCost => 0,
            ObjectiveKey::MaintenanceCost => 1,
            ObjectiveKey::Sight => 2,
            ObjectiveKey::Accessibility => 3,
            ObjectiveKey::WaterQuality => 4,
            ObjectiveKey::OvertoppingRisk => 5,
        }
    }

    /// Returns the snake_case tag used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveKey::InitialCost => "initial_cost",
            ObjectiveKey::MaintenanceCost => "maintenance_cost",
            ObjectiveKey::Sight => "sight",
            ObjectiveKey::Accessibility => "accessibility",
            ObjectiveKey::WaterQuality => "water_quality",
            ObjectiveKey::OvertoppingRisk => "overtopping_risk",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ObjectiveKey::InitialCost => "Initial construction cost",
            ObjectiveKey::MaintenanceCost => "Annual maintenance cost",
            ObjectiveKey::Sight => "Sightline score",
            ObjectiveKey::Accessibility => "Navigation accessibility",
            ObjectiveKey::WaterQuality => "Water quality score",
            ObjectiveKey::OvertoppingRisk => "Residual overtopping risk",
        }
    }

    /// Returns the unit of the underlying metric.
    pub fn unit(&self) -> &'static str {
        match self {
            ObjectiveKey::InitialCost | ObjectiveKey::MaintenanceCost => "EUR",
            ObjectiveKey::OvertoppingRisk => "probability",
            _ => "score",
        }
    }
}

impl fmt::Display for ObjectiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ObjectiveKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectiveKey::all()
            .iter()
            .find(|key| key.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::invalid_format("objective", format!("unknown objective '{}'", s)))
    }
}
