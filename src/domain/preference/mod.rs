//! Preference module - Knot sets and monotone preference curves.
//!
//! A preference curve maps a raw metric value onto a 0-100 desirability
//! score by shape-preserving interpolation of elicited knots. Built curves
//! are immutable and memoized by knot fingerprint.

mod cache;
mod curve;
mod curve_set;
mod errors;
mod knot_set;

pub use cache::CurveCache;
pub use curve::PreferenceCurve;
pub use curve_set::PreferenceCurves;
pub use errors::CurveError;
pub use knot_set::{KnotFingerprint, KnotSet, KnotSetRecord};
