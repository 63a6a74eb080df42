//! Generation-scoped memoization of population fitness statistics.
//!
//! Six scalars are cached: {max, min, mean} for both the effective
//! (possibly scaled) fitness and the original fitness. The cache is
//! generation-scoped: the engine calls [`StatsCache::reset_all`] at the
//! top of every generation, so a statistic read after a replacement
//! always reflects the new population.

use std::cell::Cell;

/// Lazily-filled cache slots for population statistics.
///
/// Interior mutability keeps the engine's statistic accessors usable
/// through a shared reference, which is what operator and analysis
/// plugins hold during a generation. Single-threaded by contract, so
/// `Cell` suffices.
#[derive(Debug, Default)]
pub(crate) struct StatsCache {
    pub(crate) fmax: Cell<Option<f64>>,
    pub(crate) fmin: Cell<Option<f64>>,
    pub(crate) fmean: Cell<Option<f64>>,
    pub(crate) ori_fmax: Cell<Option<f64>>,
    pub(crate) ori_fmin: Cell<Option<f64>>,
    pub(crate) ori_fmean: Cell<Option<f64>>,
}

impl StatsCache {
    /// Invalidates every cached statistic. Called once per generation,
    /// before any breeding work.
    pub(crate) fn reset_all(&self) {
        self.fmax.set(None);
        self.fmin.set(None);
        self.fmean.set(None);
        self.ori_fmax.set(None);
        self.ori_fmin.set(None);
        self.ori_fmean.set(None);
    }
}

/// Reads a slot, computing and memoizing it on first access.
pub(crate) fn memoize<E>(
    slot: &Cell<Option<f64>>,
    compute: impl FnOnce() -> Result<f64, E>,
) -> Result<f64, E> {
    if let Some(v) = slot.get() {
        return Ok(v);
    }
    let v = compute()?;
    slot.set(Some(v));
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memoize_computes_once() {
        let cache = StatsCache::default();
        let mut calls = 0;
        for _ in 0..3 {
            let v: Result<f64, ()> = memoize(&cache.fmax, || {
                calls += 1;
                Ok(42.0)
            });
            assert_eq!(v, Ok(42.0));
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_reset_all_clears_every_slot() {
        let cache = StatsCache::default();
        let _: Result<f64, ()> = memoize(&cache.fmax, || Ok(1.0));
        let _: Result<f64, ()> = memoize(&cache.ori_fmean, || Ok(2.0));
        cache.reset_all();
        assert_eq!(cache.fmax.get(), None);
        assert_eq!(cache.ori_fmean.get(), None);
    }

    #[test]
    fn test_memoize_error_leaves_slot_empty() {
        let cache = StatsCache::default();
        let r: Result<f64, &str> = memoize(&cache.fmin, || Err("boom"));
        assert!(r.is_err());
        assert_eq!(cache.fmin.get(), None);
        let r: Result<f64, &str> = memoize(&cache.fmin, || Ok(5.0));
        assert_eq!(r, Ok(5.0));
    }
}
