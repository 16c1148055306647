//! Named stakeholder influence presets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StakeholderTable, WeightingError};
use crate::domain::foundation::ValidationError;

/// Stakeholder order the preset influences are aligned to.
pub const PRESET_STAKEHOLDERS: [&str; 4] = [
    "Municipality",
    "Residents",
    "Environmental Agency",
    "Shipping Companies",
];

/// Tolerance for recognizing a preset from an influence vector.
pub const PRESET_MATCH_TOLERANCE: f64 = 1e-3;

/// A named influence distribution across the four stakeholder groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightPreset {
    Balanced,
    CivicSafety,
    Environmental,
    Navigation,
}

impl WeightPreset {
    pub fn all() -> &'static [WeightPreset] {
        &[
            WeightPreset::Balanced,
            WeightPreset::CivicSafety,
            WeightPreset::Environmental,
            WeightPreset::Navigation,
        ]
    }

    /// Stable identifier, also used in scenario keys.
    pub fn key(&self) -> &'static str {
        match self {
            WeightPreset::Balanced => "balanced",
            WeightPreset::CivicSafety => "civic-safety",
            WeightPreset::Environmental => "environmental",
            WeightPreset::Navigation => "navigation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeightPreset::Balanced => "Balanced",
            WeightPreset::CivicSafety => "Civic safety",
            WeightPreset::Environmental => "Environmental",
            WeightPreset::Navigation => "Navigation",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeightPreset::Balanced => "Municipality leads while other groups keep a meaningful voice.",
            WeightPreset::CivicSafety => "Flood safety and public budget dominate the decision.",
            WeightPreset::Environmental => "Water quality and ecology carry extra weight.",
            WeightPreset::Navigation => "Port access and shipping reliability carry extra weight.",
        }
    }

    /// Raw influences aligned to [`PRESET_STAKEHOLDERS`]. Each sums to one.
    pub fn influences(&self) -> [f64; 4] {
        match self {
            WeightPreset::Balanced => [0.5, 0.25, 0.1, 0.15],
            WeightPreset::CivicSafety => [0.6, 0.25, 0.05, 0.1],
            WeightPreset::Environmental => [0.35, 0.15, 0.35, 0.15],
            WeightPreset::Navigation => [0.4, 0.15, 0.1, 0.35],
        }
    }

    /// Copy of `table` with this preset's influences, matched by stakeholder name.
    ///
    /// # Errors
    /// `UnknownStakeholder` if the table holds a group the presets do not cover.
    pub fn apply_to(&self, table: &StakeholderTable) -> Result<StakeholderTable, WeightingError> {
        let influences = self.influences();
        let aligned = table
            .names()
            .into_iter()
            .map(|name| {
                PRESET_STAKEHOLDERS
                    .iter()
                    .position(|known| *known == name)
                    .map(|index| influences[index])
                    .ok_or_else(|| WeightingError::UnknownStakeholder(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        table.with_influences(&aligned)
    }

    /// The preset whose influences match `influences` within tolerance.
    pub fn matching(influences: &[f64]) -> Option<WeightPreset> {
        Self::all().iter().copied().find(|preset| {
            influences.len() == 4
                && preset
                    .influences()
                    .iter()
                    .zip(influences)
                    .all(|(a, b)| (a - b).abs() <= PRESET_MATCH_TOLERANCE)
        })
    }
}

impl fmt::Display for WeightPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for WeightPreset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.key() == s)
            .ok_or_else(|| ValidationError::invalid_format("preset", format!("unknown preset '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_sums_to_one() {
        for preset in WeightPreset::all() {
            let sum: f64 = preset.influences().iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "{} sums to {}", preset, sum);
        }
    }

    #[test]
    fn keys_parse_back() {
        for preset in WeightPreset::all() {
            assert_eq!(preset.key().parse::<WeightPreset>().unwrap(), *preset);
        }
        assert!("coastal".parse::<WeightPreset>().is_err());
    }

    #[test]
    fn matching_tolerates_small_differences() {
        assert_eq!(
            WeightPreset::matching(&[0.4005, 0.15, 0.1, 0.35]),
            Some(WeightPreset::Navigation)
        );
        assert_eq!(WeightPreset::matching(&[0.45, 0.2, 0.2, 0.15]), None);
    }

    #[test]
    fn matching_requires_four_entries() {
        assert_eq!(WeightPreset::matching(&[0.5, 0.25, 0.1]), None);
    }

    #[test]
    fn apply_to_aligns_by_name() {
        let names = vec!["Shipping Companies".to_string(), "Municipality".to_string()];
        let table = StakeholderTable::from_columns(names, vec![1.0, 1.0], vec![vec![1.0; 6], vec![1.0; 6]]).unwrap();
        let applied = WeightPreset::Navigation.apply_to(&table).unwrap();
        assert_eq!(applied.raw_influences(), vec![0.35, 0.4]);
    }

    #[test]
    fn apply_to_rejects_unknown_group() {
        let table = StakeholderTable::from_columns(vec!["Tourists".to_string()], vec![1.0], vec![vec![1.0; 6]]).unwrap();
        assert_eq!(
            WeightPreset::Balanced.apply_to(&table).unwrap_err(),
            WeightingError::UnknownStakeholder("Tourists".to_string())
        );
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&WeightPreset::CivicSafety).unwrap();
        assert_eq!(json, "\"civic-safety\"");
    }
}
