//! Notebook Result Catalog Adapter
//!
//! Serves the designs recorded from the offline genetic-algorithm runs:
//! four presets and four solo stakeholders, each under both paradigms.
//! A replacement dataset can be loaded from YAML.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::domain::analysis::Paradigm;
use crate::domain::design::DesignVector;
use crate::domain::foundation::Metrics;
use crate::ports::{ScenarioKey, StaticResult, StoredResultCatalog, StoredResultError};

/// One stored entry as it appears in a YAML dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogEntry {
    key: ScenarioKey,
    design: DesignVector,
    metrics: Metrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogDocument {
    results: Vec<CatalogEntry>,
}

/// Stored results held in memory, in insertion order.
#[derive(Debug, Clone)]
pub struct NotebookResultCatalog {
    order: Vec<ScenarioKey>,
    results: HashMap<ScenarioKey, StaticResult>,
}

impl NotebookResultCatalog {
    /// Builds a catalog from entries, validating each one.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (ScenarioKey, StaticResult)>,
    ) -> Result<Self, StoredResultError> {
        let mut order = Vec::new();
        let mut results = HashMap::new();
        for (key, result) in entries {
            result.validate(&key)?;
            if results.insert(key.clone(), result).is_some() {
                return Err(StoredResultError::DuplicateScenario(key.to_string()));
            }
            order.push(key);
        }
        Ok(Self { order, results })
    }

    /// The sixteen recorded results.
    pub fn builtin() -> Self {
        let mut order = Vec::new();
        let mut results = HashMap::new();
        for (scenario, paradigm, design, metrics) in BUILTIN {
            let key = ScenarioKey::new(*scenario, *paradigm);
            let design = DesignVector::new(design[0], design[1], design[2]);
            results.insert(key.clone(), StaticResult::new(design, Metrics::from_array(*metrics)));
            order.push(key);
        }
        Self { order, results }
    }

    /// Parses a YAML dataset of the form `results: [{key, design, metrics}]`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, StoredResultError> {
        let document: CatalogDocument = serde_yaml::from_str(yaml)?;
        let catalog = Self::from_entries(
            document
                .results
                .into_iter()
                .map(|entry| (entry.key, StaticResult::new(entry.design, entry.metrics))),
        )?;
        debug!(results = catalog.len(), "Stored result catalog loaded");
        Ok(catalog)
    }

    /// Reads and parses a YAML dataset from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoredResultError> {
        let yaml = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&yaml)
    }

    /// Serializes the catalog back to the YAML dataset format.
    pub fn to_yaml_string(&self) -> Result<String, StoredResultError> {
        let document = CatalogDocument {
            results: self
                .order
                .iter()
                .filter_map(|key| {
                    self.results.get(key).map(|result| CatalogEntry {
                        key: key.clone(),
                        design: result.design,
                        metrics: result.metrics,
                    })
                })
                .collect(),
        };
        Ok(serde_yaml::to_string(&document)?)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for NotebookResultCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StoredResultCatalog for NotebookResultCatalog {
    fn lookup_stored_result(&self, key: &ScenarioKey) -> Result<StaticResult, StoredResultError> {
        self.results
            .get(key)
            .copied()
            .ok_or_else(|| StoredResultError::UnknownScenario(key.to_string()))
    }

    fn scenario_keys(&self) -> Vec<ScenarioKey> {
        self.order.clone()
    }
}

type BuiltinRow = (&'static str, Paradigm, [f64; 3], [f64; 6]);

// Metrics order: initial cost, maintenance cost, sight, accessibility,
// water quality, overtopping risk.
const BUILTIN: &[BuiltinRow] = &[
    ("balanced", Paradigm::MinMax, [1598.44, 2.92, 2.11], [1.381e9, 9.395e11, 9.99, 6.97, 9.11, 0.331]),
    ("balanced", Paradigm::WeightedSum, [1598.44, 3.1, 1.63], [1.466e9, 1.028e12, 9.99, 7.66, 9.31, 0.312]),
    ("civic-safety", Paradigm::MinMax, [1598.44, 2.93, 2.12], [1.383e9, 9.403e11, 9.99, 6.97, 9.11, 0.33]),
    ("civic-safety", Paradigm::WeightedSum, [1598.44, 3.04, 1.62], [1.455e9, 1.021e12, 9.99, 7.68, 9.31, 0.318]),
    ("environmental", Paradigm::MinMax, [1598.44, 2.93, 2.12], [1.383e9, 9.403e11, 9.99, 6.97, 9.11, 0.33]),
    ("environmental", Paradigm::WeightedSum, [1598.44, 3.24, 1.31], [1.547e9, 1.119e12, 9.99, 8.11, 9.44, 0.297]),
    ("navigation", Paradigm::MinMax, [1598.44, 2.97, 2.12], [1.39e9, 9.451e11, 9.99, 6.97, 9.11, 0.326]),
    ("navigation", Paradigm::WeightedSum, [1598.44, 3.24, 1.39], [1.532e9, 1.099e12, 9.99, 8.01, 9.41, 0.297]),
    ("Municipality", Paradigm::MinMax, [0.0, 9.99, 3.19], [1.395e8, 2.682e10, 1.0, 0.0, 0.0, 0.028]),
    ("Municipality", Paradigm::WeightedSum, [0.0, 9.99, 1.12], [1.395e8, 2.682e10, 1.0, 0.0, 0.0, 0.028]),
    ("Residents", Paradigm::MinMax, [1598.44, 4.79, 0.57], [2.252e9, 1.868e12, 9.99, 9.18, 9.75, 0.173]),
    ("Residents", Paradigm::WeightedSum, [1598.44, 5.5, 0.62], [2.385e9, 1.881e12, 9.99, 9.1, 9.73, 0.135]),
    ("Environmental Agency", Paradigm::MinMax, [1598.44, 5.84, 0.5], [2.618e9, 2.158e12, 9.99, 9.28, 9.78, 0.119]),
    ("Environmental Agency", Paradigm::WeightedSum, [1598.44, 5.84, 0.5], [2.618e9, 2.158e12, 9.99, 9.28, 9.78, 0.119]),
    ("Shipping Companies", Paradigm::MinMax, [1598.44, 4.79, 0.57], [2.252e9, 1.868e12, 9.99, 9.18, 9.75, 0.173]),
    ("Shipping Companies", Paradigm::WeightedSum, [1598.44, 4.79, 0.57], [2.252e9, 1.868e12, 9.99, 9.18, 9.75, 0.173]),
];
