//! Stakeholder profiles and the stakeholder table.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::WeightingError;
use crate::domain::foundation::{ObjectiveKey, ObjectiveMap};

/// One stakeholder group with its raw (unnormalized) weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderProfile {
    pub name: String,
    pub raw_influence: f64,
    pub raw_objective_weights: ObjectiveMap<f64>,
}

impl StakeholderProfile {
    pub fn new(
        name: impl Into<String>,
        raw_influence: f64,
        raw_objective_weights: ObjectiveMap<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            raw_influence,
            raw_objective_weights,
        }
    }
}

/// Column-oriented stakeholder table as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderTableRecord {
    pub names: Vec<String>,
    pub raw_influence: Vec<f64>,
    /// Rows aligned to `names`, columns aligned to the six objectives.
    pub raw_objective_weights: Vec<Vec<f64>>,
}

/// Validated stakeholder table.
///
/// Invariants: at least one stakeholder, unique non-empty names, every raw
/// value finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StakeholderTableRecord", into = "StakeholderTableRecord")]
pub struct StakeholderTable {
    profiles: Vec<StakeholderProfile>,
}

impl StakeholderTable {
    /// Validates and creates a table from profiles.
    pub fn try_new(profiles: Vec<StakeholderProfile>) -> Result<Self, WeightingError> {
        if profiles.is_empty() {
            return Err(WeightingError::EmptyTable);
        }
        let mut seen = HashSet::new();
        for (index, profile) in profiles.iter().enumerate() {
            if profile.name.trim().is_empty() {
                return Err(WeightingError::EmptyName { index });
            }
            if !seen.insert(profile.name.as_str()) {
                return Err(WeightingError::DuplicateStakeholder(profile.name.clone()));
            }
            check_value(format!("{}.raw_influence", profile.name), profile.raw_influence)?;
            for (key, value) in profile.raw_objective_weights.iter() {
                check_value(format!("{}.{}", profile.name, key), *value)?;
            }
        }
        Ok(Self { profiles })
    }

    /// Builds a table from parallel columns.
    ///
    /// # Errors
    /// `ShapeMismatch` when the column lengths disagree, `RowWidth` when a
    /// weight row does not have one entry per objective.
    pub fn from_columns(
        names: Vec<String>,
        raw_influence: Vec<f64>,
        raw_objective_weights: Vec<Vec<f64>>,
    ) -> Result<Self, WeightingError> {
        if raw_influence.len() != names.len() {
            return Err(WeightingError::ShapeMismatch {
                what: "raw_influence",
                expected: names.len(),
                actual: raw_influence.len(),
            });
        }
        if raw_objective_weights.len() != names.len() {
            return Err(WeightingError::ShapeMismatch {
                what: "raw_objective_weights",
                expected: names.len(),
                actual: raw_objective_weights.len(),
            });
        }

        let profiles = names
            .into_iter()
            .zip(raw_influence)
            .zip(raw_objective_weights)
            .map(|((name, influence), row)| {
                let row: [f64; ObjectiveKey::COUNT] =
                    row.as_slice().try_into().map_err(|_| WeightingError::RowWidth {
                        stakeholder: name.clone(),
                        actual: row.len(),
                    })?;
                Ok(StakeholderProfile::new(name, influence, ObjectiveMap::from_array(row)))
            })
            .collect::<Result<Vec<_>, WeightingError>>()?;

        Self::try_new(profiles)
    }

    pub fn profiles(&self) -> &[StakeholderProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Always false; a valid table holds at least one stakeholder.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn raw_influences(&self) -> Vec<f64> {
        self.profiles.iter().map(|p| p.raw_influence).collect()
    }

    pub fn get(&self, name: &str) -> Option<&StakeholderProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Returns a copy with new raw influences, aligned to the stakeholder order.
    pub fn with_influences(&self, raw_influence: &[f64]) -> Result<Self, WeightingError> {
        if raw_influence.len() != self.profiles.len() {
            return Err(WeightingError::ShapeMismatch {
                what: "raw_influence",
                expected: self.profiles.len(),
                actual: raw_influence.len(),
            });
        }
        let profiles = self
            .profiles
            .iter()
            .zip(raw_influence)
            .map(|(profile, influence)| StakeholderProfile {
                raw_influence: *influence,
                ..profile.clone()
            })
            .collect();
        Self::try_new(profiles)
    }

    /// Returns a copy where `name` holds all influence and everyone else none.
    pub fn solo(&self, name: &str) -> Result<Self, WeightingError> {
        if self.get(name).is_none() {
            return Err(WeightingError::UnknownStakeholder(name.to_string()));
        }
        let influences: Vec<f64> = self
            .profiles
            .iter()
            .map(|p| if p.name == name { 1.0 } else { 0.0 })
            .collect();
        self.with_influences(&influences)
    }
}

fn check_value(field: String, value: f64) -> Result<(), WeightingError> {
    if !value.is_finite() || value < 0.0 {
        return Err(WeightingError::InvalidValue { field, value });
    }
    Ok(())
}

impl TryFrom<StakeholderTableRecord> for StakeholderTable {
    type Error = WeightingError;

    fn try_from(record: StakeholderTableRecord) -> Result<Self, Self::Error> {
        StakeholderTable::from_columns(record.names, record.raw_influence, record.raw_objective_weights)
    }
}

impl From<StakeholderTable> for StakeholderTableRecord {
    fn from(table: StakeholderTable) -> Self {
        let mut record = StakeholderTableRecord {
            names: Vec::with_capacity(table.len()),
            raw_influence: Vec::with_capacity(table.len()),
            raw_objective_weights: Vec::with_capacity(table.len()),
        };
        for profile in table.profiles {
            record.names.push(profile.name);
            record.raw_influence.push(profile.raw_influence);
            record.raw_objective_weights.push(profile.raw_objective_weights.to_array().to_vec());
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["Municipality".to_string(), "Residents".to_string()]
    }

    fn rows() -> Vec<Vec<f64>> {
        vec![
            vec![3.0, 2.0, 0.0, 0.0, 0.0, 5.0],
            vec![1.0, 1.0, 2.0, 0.0, 2.0, 4.0],
        ]
    }

    #[test]
    fn from_columns_builds_profiles_in_order() {
        let table = StakeholderTable::from_columns(names(), vec![0.7, 0.3], rows()).unwrap();
        assert_eq!(table.names(), vec!["Municipality", "Residents"]);
        assert_eq!(
            table.get("Residents").unwrap().raw_objective_weights[ObjectiveKey::Sight],
            2.0
        );
    }

    #[test]
    fn from_columns_rejects_influence_count_mismatch() {
        let err = StakeholderTable::from_columns(names(), vec![1.0], rows()).unwrap_err();
        assert_eq!(
            err,
            WeightingError::ShapeMismatch {
                what: "raw_influence",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn from_columns_rejects_short_row() {
        let mut short = rows();
        short[1].pop();
        let err = StakeholderTable::from_columns(names(), vec![0.5, 0.5], short).unwrap_err();
        assert_eq!(
            err,
            WeightingError::RowWidth {
                stakeholder: "Residents".to_string(),
                actual: 5
            }
        );
    }

    #[test]
    fn try_new_rejects_negative_weight() {
        let mut bad = rows();
        bad[0][2] = -1.0;
        let err = StakeholderTable::from_columns(names(), vec![0.5, 0.5], bad).unwrap_err();
        assert!(matches!(err, WeightingError::InvalidValue { .. }));
    }

    #[test]
    fn try_new_rejects_duplicate_names() {
        let dupes = vec!["Residents".to_string(), "Residents".to_string()];
        let err = StakeholderTable::from_columns(dupes, vec![0.5, 0.5], rows()).unwrap_err();
        assert_eq!(err, WeightingError::DuplicateStakeholder("Residents".to_string()));
    }

    #[test]
    fn solo_gives_all_influence_to_one_stakeholder() {
        let table = StakeholderTable::from_columns(names(), vec![0.7, 0.3], rows()).unwrap();
        let solo = table.solo("Residents").unwrap();
        assert_eq!(solo.raw_influences(), vec![0.0, 1.0]);
    }

    #[test]
    fn solo_rejects_unknown_stakeholder() {
        let table = StakeholderTable::from_columns(names(), vec![0.7, 0.3], rows()).unwrap();
        assert_eq!(
            table.solo("Tourists").unwrap_err(),
            WeightingError::UnknownStakeholder("Tourists".to_string())
        );
    }

    #[test]
    fn record_round_trip_preserves_columns() {
        let table = StakeholderTable::from_columns(names(), vec![0.7, 0.3], rows()).unwrap();
        let record: StakeholderTableRecord = table.clone().into();
        assert_eq!(record.raw_objective_weights, rows());
        assert_eq!(StakeholderTable::try_from(record).unwrap(), table);
    }
}
