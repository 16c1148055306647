//! Application layer - Engine facade, session reducer and telemetry.
//!
//! This layer wires configuration and ports into the pure domain services.
//! It owns no mutable state: sessions belong to the caller.

pub mod evaluator;
pub mod session;
pub mod telemetry;

pub use evaluator::{DesignEvaluation, DesignEvaluator, StoredEvaluation};
pub use session::{reduce, DesignSession, SessionAction};
pub use telemetry::init_tracing;
