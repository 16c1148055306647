//! Knot Set - Elicited (metric, preference) anchor points for one objective.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use super::CurveError;

/// Content hash of a knot set, used to memoize built curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KnotFingerprint([u8; 32]);

impl KnotFingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for KnotFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Raw knot arrays as they appear in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnotSetRecord {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A validated knot set.
///
/// Invariants: at least 2 knots, equal-length arrays, every coordinate
/// finite, `x` strictly increasing, `y` within `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KnotSetRecord", into = "KnotSetRecord")]
pub struct KnotSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl KnotSet {
    /// Validates and creates a knot set.
    ///
    /// # Errors
    /// Returns the first violated invariant as a `CurveError`.
    pub fn try_new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, CurveError> {
        if x.len() != y.len() {
            return Err(CurveError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(CurveError::TooFewKnots { count: x.len() });
        }
        for (index, (xi, yi)) in x.iter().zip(&y).enumerate() {
            if !xi.is_finite() || !yi.is_finite() {
                return Err(CurveError::NonFiniteKnot { index });
            }
            if !(0.0..=100.0).contains(yi) {
                return Err(CurveError::PreferenceOutOfRange { index, value: *yi });
            }
        }
        if let Some(index) = x.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(CurveError::NotStrictlyIncreasing { index: index + 1 });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false; a valid knot set holds at least two knots.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Returns the metric domain `(x[0], x[n-1])`.
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Returns true if `y` never decreases.
    pub fn is_non_decreasing(&self) -> bool {
        self.y.windows(2).all(|pair| pair[1] >= pair[0])
    }

    /// Returns true if `y` never increases.
    pub fn is_non_increasing(&self) -> bool {
        self.y.windows(2).all(|pair| pair[1] <= pair[0])
    }

    /// SHA-256 over the bit patterns of both arrays.
    pub fn fingerprint(&self) -> KnotFingerprint {
        let mut hasher = Sha256::new();
        hasher.update((self.x.len() as u64).to_le_bytes());
        for value in self.x.iter().chain(&self.y) {
            hasher.update(value.to_bits().to_le_bytes());
        }
        let digest = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        KnotFingerprint(bytes)
    }
}

impl TryFrom<KnotSetRecord> for KnotSet {
    type Error = CurveError;

    fn try_from(record: KnotSetRecord) -> Result<Self, Self::Error> {
        KnotSet::try_new(record.x, record.y)
    }
}

impl From<KnotSet> for KnotSetRecord {
    fn from(knots: KnotSet) -> Self {
        KnotSetRecord {
            x: knots.x,
            y: knots.y,
        }
    }
}
