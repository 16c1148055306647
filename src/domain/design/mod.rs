//! Design module - Design vectors, their bounds, and the metric model.

mod bounds;
mod design_vector;
mod errors;
mod metric_model;

pub use bounds::{BoundPolicy, DesignBounds, VariableBounds};
pub use design_vector::{DesignVariable, DesignVector};
pub use errors::DesignError;
pub use metric_model::{CostCoefficients, MetricModel, INLET_SPAN_M, SCORE_CEILING};
