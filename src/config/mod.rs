//! Engine configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. The course configuration is embedded as YAML and
//! forms the base layer; an optional YAML file and environment variables
//! prefixed with `MOSE_ENGINE` are layered on top.
//!
//! # Example
//!
//! ```no_run
//! use mose_engine::config::{ConfigStore, EngineConfig};
//!
//! let config = EngineConfig::load().expect("Failed to load configuration");
//! let store = ConfigStore::from_config(config).expect("Invalid configuration");
//!
//! println!("Stakeholders: {:?}", store.stakeholders().names());
//! ```

mod error;
mod evaluation;
mod store;

pub use error::{ConfigError, ValidationError};
pub use evaluation::EvaluationConfig;
pub use store::ConfigStore;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::design::{CostCoefficients, DesignBounds, INLET_SPAN_M};
use crate::domain::foundation::ObjectiveMap;
use crate::domain::preference::KnotSetRecord;
use crate::domain::weighting::StakeholderTableRecord;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "MOSE_ENGINE";

/// Environment variable naming an optional YAML configuration file.
pub const CONFIG_PATH_ENV: &str = "MOSE_ENGINE_CONFIG";

/// The embedded course configuration.
pub const DEFAULT_CONFIG_YAML: &str = include_str!("defaults.yaml");

static DEFAULT_CONFIG: Lazy<Result<EngineConfig, String>> =
    Lazy::new(|| serde_yaml::from_str(DEFAULT_CONFIG_YAML).map_err(|e| e.to_string()));

/// Root engine configuration
///
/// Mirrors the inputs the engine consumes: variable bounds, one knot set
/// per objective, the stakeholder table and the cost coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Design variable bounds (x1, x2, x3)
    pub bounds: DesignBounds,

    /// Preference curve knots per objective
    pub knots: ObjectiveMap<KnotSetRecord>,

    /// Stakeholder names, influences and objective weights
    pub stakeholders: StakeholderTableRecord,

    /// Cost formula coefficients
    #[serde(default)]
    pub cost_model: CostCoefficients,

    /// Evaluation and logging settings
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

impl EngineConfig {
    /// The embedded course configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmbeddedDefaults` if the embedded YAML does not parse.
    pub fn defaults() -> Result<Self, ConfigError> {
        DEFAULT_CONFIG
            .as_ref()
            .map(Clone::clone)
            .map_err(|e| ConfigError::EmbeddedDefaults(e.clone()))
    }

    /// Load configuration from layered sources
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Starts from the embedded course configuration
    /// 3. Layers the YAML file named by `MOSE_ENGINE_CONFIG`, if set
    /// 4. Layers environment variables with the `MOSE_ENGINE` prefix,
    ///    using `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `MOSE_ENGINE__EVALUATION__BOUND_POLICY=reject` -> `evaluation.bound_policy = reject`
    /// - `MOSE_ENGINE__COST_MODEL__C2=50000` -> `cost_model.c2 = 50000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or values cannot be parsed
    /// into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_CONFIG_YAML,
            config::FileFormat::Yaml,
        ));

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            builder = builder.add_source(config::File::new(&path, config::FileFormat::Yaml));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Parse a complete configuration document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Layer a partial YAML document over the embedded defaults
    pub fn with_overrides(yaml: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG_YAML, config::FileFormat::Yaml))
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration shape
    ///
    /// Performs semantic validation of configuration:
    /// - Bounds finite, ordered, positive step
    /// - Movable length within the inlet span
    /// - Positive gate height and closure duration lower bounds
    /// - Non-negative finite cost coefficients
    ///
    /// Knot sets and the stakeholder table are checked when the
    /// [`ConfigStore`] builds them.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bounds.validate()?;
        if self.bounds.x1.min < 0.0 || self.bounds.x1.max > INLET_SPAN_M {
            return Err(ValidationError::MovableLengthExceedsSpan {
                max: self.bounds.x1.max,
                span: INLET_SPAN_M,
            });
        }
        if self.bounds.x2.min <= 0.0 {
            return Err(ValidationError::NonPositiveGateHeightBound {
                min: self.bounds.x2.min,
            });
        }
        if self.bounds.x3.min <= 0.0 {
            return Err(ValidationError::NonPositiveDurationBound {
                min: self.bounds.x3.min,
            });
        }
        if self.stakeholders.names.is_empty() {
            return Err(ValidationError::MissingRequired("stakeholders.names"));
        }
        self.cost_model.validate()?;
        self.evaluation.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::design::BoundPolicy;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var(CONFIG_PATH_ENV);
        env::remove_var("MOSE_ENGINE__EVALUATION__BOUND_POLICY");
        env::remove_var("MOSE_ENGINE__COST_MODEL__C2");
    }

    #[test]
    fn embedded_defaults_parse_and_validate() {
        let config = EngineConfig::defaults().unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.stakeholders.names.len(), 4);
        assert_eq!(config.bounds.x1.max, 1600.0);
        assert_eq!(config.cost_model, CostCoefficients::default());
    }

    #[test]
    fn test_load_uses_embedded_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = EngineConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        assert_eq!(result.unwrap(), EngineConfig::defaults().unwrap());
    }

    #[test]
    fn test_environment_overrides_scalar() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("MOSE_ENGINE__EVALUATION__BOUND_POLICY", "reject");
        env::set_var("MOSE_ENGINE__COST_MODEL__C2", "50000");
        let result = EngineConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.evaluation.bound_policy, BoundPolicy::Reject);
        assert_eq!(config.cost_model.c2, 50000.0);
        assert_eq!(config.cost_model.c3, 5.5e3);
    }

    #[test]
    fn test_config_file_layer() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "evaluation:\n  log_level: \"debug\"").unwrap();
        env::set_var(CONFIG_PATH_ENV, file.path());
        let result = EngineConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.evaluation.log_level, "debug");
        assert_eq!(config.stakeholders.names[0], "Municipality");
    }

    #[test]
    fn test_missing_config_file_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(CONFIG_PATH_ENV, "/nonexistent/mose-engine.yaml");
        let result = EngineConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn with_overrides_replaces_knot_arrays() {
        let config = EngineConfig::with_overrides(
            "knots:\n  sight:\n    x: [0.0, 10.0]\n    y: [0.0, 100.0]\n",
        )
        .unwrap();
        assert_eq!(config.knots.sight.x, vec![0.0, 10.0]);
        assert_eq!(config.knots.accessibility.x.len(), 4);
    }

    #[test]
    fn validate_rejects_span_overflow() {
        let mut config = EngineConfig::defaults().unwrap();
        config.bounds.x1.max = 2000.0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MovableLengthExceedsSpan { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_duration_bound() {
        let mut config = EngineConfig::defaults().unwrap();
        config.bounds.x3.min = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::NonPositiveDurationBound { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_gate_height_bound() {
        let mut config = EngineConfig::defaults().unwrap();
        config.bounds.x2.min = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::NonPositiveGateHeightBound { .. })
        ));
    }

    #[test]
    fn validate_rejects_negative_cost_coefficient() {
        let mut config = EngineConfig::defaults().unwrap();
        config.cost_model.d2 = -1.0;
        assert!(matches!(config.validate(), Err(ValidationError::Field(_))));
    }
}
