//! Preference Curve - Monotone piecewise-cubic Hermite interpolation (PCHIP).
//!
//! # Algorithm
//!
//! For knots `(x_k, y_k)` with spacings `h_k` and secants `δ_k`:
//!
//! - Interior tangents use the weighted harmonic mean of the adjacent
//!   secants, and are zero when the secants differ in sign or either is zero.
//! - End tangents use the one-sided three-point estimate, zeroed when its
//!   sign disagrees with the end secant and limited to `3·δ` when the two
//!   nearest secants change sign.
//! - Evaluation clamps the metric into the knot domain, locates the
//!   interval by binary search and evaluates the cubic Hermite basis.
//!
//! A two-knot set degenerates to the straight line between its knots.

use serde::Serialize;

use super::{CurveError, KnotSet};
use crate::domain::foundation::PreferenceScore;

/// A built preference curve: knots plus one tangent per knot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceCurve {
    knots: KnotSet,
    slopes: Vec<f64>,
}

impl PreferenceCurve {
    /// Builds the interpolant for a validated knot set.
    pub fn build(knots: &KnotSet) -> Self {
        let slopes = pchip_slopes(knots.x(), knots.y());
        Self {
            knots: knots.clone(),
            slopes,
        }
    }

    pub fn knots(&self) -> &KnotSet {
        &self.knots
    }

    /// Tangent estimate at each knot.
    pub fn slopes(&self) -> &[f64] {
        &self.slopes
    }

    /// Maps a metric value to a 0-100 preference.
    ///
    /// Values outside the knot domain return the boundary preference.
    /// Knot abscissae return their `y` exactly.
    ///
    /// # Errors
    /// `CurveError::NanMetric` if `metric` is NaN.
    pub fn evaluate(&self, metric: f64) -> Result<PreferenceScore, CurveError> {
        if metric.is_nan() {
            return Err(CurveError::NanMetric);
        }
        let x = self.knots.x();
        let y = self.knots.y();
        let (lo, hi) = self.knots.domain();
        let v = metric.clamp(lo, hi);

        // x[0] <= v, so at least one knot is <= v.
        let k = x.partition_point(|&xk| xk <= v) - 1;
        if x[k] == v {
            return Ok(PreferenceScore::new(y[k]));
        }

        let h = x[k + 1] - x[k];
        let t = (v - x[k]) / h;
        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        let value = h00 * y[k]
            + h10 * h * self.slopes[k]
            + h01 * y[k + 1]
            + h11 * h * self.slopes[k + 1];
        Ok(PreferenceScore::new(value))
    }

    /// Returns `steps + 1` evenly spaced `(metric, preference)` samples over the domain.
    pub fn sample(&self, steps: usize) -> Vec<(f64, PreferenceScore)> {
        let (lo, hi) = self.knots.domain();
        if steps == 0 {
            return vec![(lo, PreferenceScore::new(self.knots.y()[0]))];
        }
        (0..=steps)
            .map(|i| {
                let metric = if i == steps {
                    hi
                } else {
                    lo + (i as f64 / steps as f64) * (hi - lo)
                };
                // Sample points lie inside the domain and are never NaN.
                let preference = self.evaluate(metric).unwrap_or(PreferenceScore::MIN);
                (metric, preference)
            })
            .collect()
    }
}

/// Sign as -1, 0 or 1 (zero stays zero, unlike `f64::signum`).
fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

fn pchip_slopes(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|k| (y[k + 1] - y[k]) / h[k]).collect();

    if n == 2 {
        return vec![delta[0], delta[0]];
    }

    let mut slopes = vec![0.0; n];
    for k in 1..n - 1 {
        let (before, after) = (delta[k - 1], delta[k]);
        if sign(before) * sign(after) <= 0 {
            continue;
        }
        let w1 = 2.0 * h[k] + h[k - 1];
        let w2 = h[k] + 2.0 * h[k - 1];
        slopes[k] = (w1 + w2) / (w1 / before + w2 / after);
    }

    slopes[0] = end_slope(h[0], h[1], delta[0], delta[1]);
    slopes[n - 1] = end_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
    slopes
}

/// One-sided three-point tangent at a domain end.
///
/// `h0`/`m0` belong to the end interval, `h1`/`m1` to its neighbour.
fn end_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if sign(d) != sign(m0) {
        0.0
    } else if sign(m0) != sign(m1) && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}
