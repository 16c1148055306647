//! Analysis Module - Pure scoring and ranking of evaluated designs.
//!
//! # Components
//!
//! - `AggregationEngine` - Weighted-sum ("Tetra") and Min–Max scores
//! - `CandidateRanker` - Ordering and relative ratings for candidate designs
//!
//! All functions are pure and stateless. They take preferences and weights
//! as input and return computed results.

mod aggregation;
mod ranking;

pub use aggregation::{AggregateScore, AggregationEngine, Paradigm};
pub use ranking::{CandidateRanker, RankedCandidate, ScoredCandidate, BEST_RATING};
