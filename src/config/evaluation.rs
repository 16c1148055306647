//! Evaluation settings

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use crate::domain::design::BoundPolicy;
use crate::domain::foundation;

/// Runtime settings for evaluation and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Policy for design inputs outside their bounds
    #[serde(default)]
    pub bound_policy: BoundPolicy,

    /// Tracing filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl EvaluationConfig {
    /// Validate evaluation settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.log_level.trim().is_empty() {
            return Err(foundation::ValidationError::empty_field("evaluation.log_level").into());
        }
        Ok(())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            bound_policy: BoundPolicy::default(),
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}
