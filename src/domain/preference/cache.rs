//! Curve Cache - Built curves memoized by knot fingerprint.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use super::{KnotFingerprint, KnotSet, PreferenceCurve};

static GLOBAL_CACHE: Lazy<CurveCache> = Lazy::new(CurveCache::new);

/// Thread-safe memo of built curves.
///
/// Curves are immutable once built, so sharing them across threads only
/// needs the lock around the map itself.
#[derive(Debug, Default)]
pub struct CurveCache {
    curves: RwLock<HashMap<KnotFingerprint, Arc<PreferenceCurve>>>,
}

impl CurveCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache shared by every evaluator.
    pub fn global() -> &'static CurveCache {
        &GLOBAL_CACHE
    }

    /// Returns the cached curve for `knots`, building it on first use.
    pub fn get_or_build(&self, knots: &KnotSet) -> Arc<PreferenceCurve> {
        let fingerprint = knots.fingerprint();

        if let Some(curve) = self
            .curves
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&fingerprint)
        {
            debug!(%fingerprint, "Preference curve reused from cache");
            return Arc::clone(curve);
        }

        let mut curves = self.curves.write().unwrap_or_else(PoisonError::into_inner);
        let curve = curves
            .entry(fingerprint)
            .or_insert_with(|| {
                debug!(%fingerprint, knots = knots.len(), "Preference curve built");
                Arc::new(PreferenceCurve::build(knots))
            });
        Arc::clone(curve)
    }

    /// Number of distinct curves held.
    pub fn len(&self) -> usize {
        self.curves.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached curve.
    pub fn clear(&self) {
        self.curves.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn knots(top: f64) -> KnotSet {
        KnotSet::try_new(vec![0.0, 5.0, 10.0], vec![0.0, 50.0, top]).unwrap()
    }

    #[test]
    fn same_knots_share_one_curve() {
        let cache = CurveCache::new();
        let a = cache.get_or_build(&knots(100.0));
        let b = cache.get_or_build(&knots(100.0));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_knots_build_separate_curves() {
        let cache = CurveCache::new();
        cache.get_or_build(&knots(100.0));
        cache.get_or_build(&knots(90.0));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn clear_empties_cache() {
        let cache = CurveCache::new();
        cache.get_or_build(&knots(100.0));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_lookups_agree() {
        let cache = Arc::new(CurveCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_build(&knots(100.0)).evaluate(2.5).unwrap())
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(cache.len(), 1);
    }
}
