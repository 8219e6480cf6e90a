//! Memoized yield analyses.
//!
//! Results are keyed on the exact bit pattern of `(price, coupon, years,
//! face)`: a lookup with identical inputs returns the stored analysis, and
//! any difference in inputs computes a fresh one.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use log::trace;

use ytm_core::types::BondParameters;

use crate::error::BondResult;
use crate::pricing::{YieldAnalysis, YieldSolver};

/// Hit/miss counters for a [`YieldCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that ran the solver.
    pub misses: u64,
    /// Entries currently stored.
    pub entries: usize,
}

/// Thread-safe cache of yield analyses.
///
/// # Example
///
/// ```rust
/// use ytm_bonds::cache::YieldCache;
/// use ytm_core::BondParameters;
///
/// let cache = YieldCache::default();
/// let params = BondParameters::new(97.76, 11.0088, 5.0, 100.0).unwrap();
///
/// let first = cache.get_or_compute(&params).unwrap();
/// let second = cache.get_or_compute(&params).unwrap();
///
/// assert_eq!(first, second);
/// assert_eq!(cache.stats().hits, 1);
/// ```
pub struct YieldCache {
    entries: DashMap<[u64; 4], YieldAnalysis>,
    solver: YieldSolver,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl YieldCache {
    /// Create a new cache that computes misses with `solver`.
    pub fn new(solver: YieldSolver) -> Self {
        Self {
            entries: DashMap::new(),
            solver,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the stored analysis for `params`, computing it on a miss.
    ///
    /// Failed computations are not cached.
    pub fn get_or_compute(&self, params: &BondParameters) -> BondResult<YieldAnalysis> {
        let key = params.key_bits();

        if let Some(cached) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!("yield cache hit for {params}");
            return Ok(cached.value().clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!("yield cache miss for {params}");

        let analysis = self.solver.analyze(params)?;
        self.entries.insert(key, analysis.clone());
        Ok(analysis)
    }

    /// Get a stored analysis without computing.
    pub fn get(&self, params: &BondParameters) -> Option<YieldAnalysis> {
        self.entries
            .get(&params.key_bits())
            .map(|entry| entry.value().clone())
    }

    /// Drop the entry for `params`. Returns true if one was stored.
    pub fn invalidate(&self, params: &BondParameters) -> bool {
        self.entries.remove(&params.key_bits()).is_some()
    }

    /// Number of stored analyses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries. Counters are kept.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Current hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    /// The solver used for misses.
    pub fn solver(&self) -> &YieldSolver {
        &self.solver
    }
}

impl Default for YieldCache {
    fn default() -> Self {
        Self::new(YieldSolver::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn params(price: f64) -> BondParameters {
        BondParameters::new(price, 5.0, 5.0, 100.0).unwrap()
    }

    #[test]
    fn test_repeat_lookup_hits() {
        let cache = YieldCache::default();

        let first = cache.get_or_compute(&params(98.0)).unwrap();
        let second = cache.get_or_compute(&params(98.0)).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_changed_input_recomputes() {
        let cache = YieldCache::default();

        let low = cache.get_or_compute(&params(95.0)).unwrap();
        let high = cache.get_or_compute(&params(105.0)).unwrap();

        assert!(low.bond_equivalent_yield > high.bond_equivalent_yield);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_get_and_invalidate() {
        let cache = YieldCache::default();
        assert!(cache.get(&params(99.0)).is_none());

        cache.get_or_compute(&params(99.0)).unwrap();
        assert!(cache.get(&params(99.0)).is_some());

        assert!(cache.invalidate(&params(99.0)));
        assert!(!cache.invalidate(&params(99.0)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_keeps_counters() {
        let cache = YieldCache::default();
        cache.get_or_compute(&params(99.0)).unwrap();
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        use crate::pricing::BoundaryPolicy;

        let cache =
            YieldCache::new(YieldSolver::new().with_boundary_policy(BoundaryPolicy::Reject));
        let out_of_range = BondParameters::new(150.0, 2.0, 2.0, 100.0).unwrap();

        assert!(cache.get_or_compute(&out_of_range).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_callers_agree() {
        let cache = Arc::new(YieldCache::default());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_compute(&params(97.0)).unwrap())
            })
            .collect();

        let results: Vec<YieldAnalysis> = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();

        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().hits + cache.stats().misses, 4);
    }
}
