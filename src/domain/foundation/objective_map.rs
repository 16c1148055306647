//! Fixed-shape map with one value per objective.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::ObjectiveKey;

/// One value per [`ObjectiveKey`].
///
/// Serializes as a map keyed by the objective tags, which is also the shape
/// used in configuration files and stored result fixtures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveMap<T> {
    pub initial_cost: T,
    pub maintenance_cost: T,
    pub sight: T,
    pub accessibility: T,
    pub water_quality: T,
    pub overtopping_risk: T,
}

impl<T> ObjectiveMap<T> {
    /// Builds a map by calling `f` for each objective in canonical order.
    pub fn from_fn(mut f: impl FnMut(ObjectiveKey) -> T) -> Self {
        Self {
            initial_cost: f(ObjectiveKey::InitialCost),
            maintenance_cost: f(ObjectiveKey::MaintenanceCost),
            sight: f(ObjectiveKey::Sight),
            accessibility: f(ObjectiveKey::Accessibility),
            water_quality: f(ObjectiveKey::WaterQuality),
            overtopping_risk: f(ObjectiveKey::OvertoppingRisk),
        }
    }

    /// Fallible variant of [`ObjectiveMap::from_fn`]; stops at the first error.
    pub fn try_from_fn<E>(mut f: impl FnMut(ObjectiveKey) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            initial_cost: f(ObjectiveKey::InitialCost)?,
            maintenance_cost: f(ObjectiveKey::MaintenanceCost)?,
            sight: f(ObjectiveKey::Sight)?,
            accessibility: f(ObjectiveKey::Accessibility)?,
            water_quality: f(ObjectiveKey::WaterQuality)?,
            overtopping_risk: f(ObjectiveKey::OvertoppingRisk)?,
        })
    }

    /// Builds a map from a row aligned to [`ObjectiveKey::all`].
    pub fn from_array(values: [T; ObjectiveKey::COUNT]) -> Self {
        let [initial_cost, maintenance_cost, sight, accessibility, water_quality, overtopping_risk] =
            values;
        Self {
            initial_cost,
            maintenance_cost,
            sight,
            accessibility,
            water_quality,
            overtopping_risk,
        }
    }

    /// Applies `f` to every value.
    pub fn map<U>(&self, mut f: impl FnMut(ObjectiveKey, &T) -> U) -> ObjectiveMap<U> {
        ObjectiveMap::from_fn(|key| f(key, &self[key]))
    }

    /// Iterates `(key, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectiveKey, &T)> + '_ {
        ObjectiveKey::all().iter().map(move |key| (*key, &self[*key]))
    }
}

impl ObjectiveMap<f64> {
    /// Sum over all objectives.
    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| *v).sum()
    }

    /// Returns true if every value is finite.
    pub fn all_finite(&self) -> bool {
        self.iter().all(|(_, v)| v.is_finite())
    }

    /// Returns the values as a row aligned to [`ObjectiveKey::all`].
    pub fn to_array(&self) -> [f64; ObjectiveKey::COUNT] {
        [
            self.initial_cost,
            self.maintenance_cost,
            self.sight,
            self.accessibility,
            self.water_quality,
            self.overtopping_risk,
        ]
    }
}

impl<T> Index<ObjectiveKey> for ObjectiveMap<T> {
    type Output = T;

    fn index(&self, key: ObjectiveKey) -> &T {
        match key {
            ObjectiveKey::InitialCost => &self.initial_cost,
            ObjectiveKey::MaintenanceCost => &self.maintenance_cost,
            ObjectiveKey::Sight => &self.sight,
            ObjectiveKey::Accessibility => &self.accessibility,
            ObjectiveKey::WaterQuality => &self.water_quality,
            ObjectiveKey::OvertoppingRisk => &self.overtopping_risk,
        }
    }
}

impl<T> IndexMut<ObjectiveKey> for ObjectiveMap<T> {
    fn index_mut(&mut self, key: ObjectiveKey) -> &mut T {
        match key {
            ObjectiveKey::InitialCost => &mut self.initial_cost,
            ObjectiveKey::MaintenanceCost => &mut self.maintenance_cost,
            ObjectiveKey::Sight => &mut self.sight,
            ObjectiveKey::Accessibility => &mut self.accessibility,
            ObjectiveKey::WaterQuality => &mut self.water_quality,
            ObjectiveKey::OvertoppingRisk => &mut self.overtopping_risk,
        }
    }
}
