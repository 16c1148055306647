//! Domain layer containing the evaluation logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (objective keys, scores, errors)
//! - `design` - Design vectors, bounds, and the closed-form metric model
//! - `preference` - Knot sets and monotone preference curves
//! - `weighting` - Stakeholder influence and global objective weights
//! - `analysis` - Aggregation paradigms and candidate ranking

pub mod analysis;
pub mod design;
pub mod foundation;
pub mod preference;
pub mod weighting;
