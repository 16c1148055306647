//! Weighting module - Stakeholder influence and global objective weights.
//!
//! Each stakeholder group carries a raw influence and a raw weight per
//! objective. Both are normalized and collapsed into one global weight
//! vector that the aggregation paradigms consume.

mod aggregator;
mod errors;
mod presets;
mod stakeholder;

pub use aggregator::{GlobalWeights, StakeholderWeight, WeightAggregator, WeightingOutcome, WEIGHT_SUM_TOLERANCE};
pub use errors::WeightingError;
pub use presets::{WeightPreset, PRESET_MATCH_TOLERANCE, PRESET_STAKEHOLDERS};
pub use stakeholder::{StakeholderProfile, StakeholderTable, StakeholderTableRecord};
