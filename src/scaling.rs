//! Fitness scaling strategies.
//!
//! Selection operators (notably roulette wheel) want positive fitness
//! values that grow with desirability. Scaling normalizes an arbitrary
//! objective range into that space while preserving the relative order
//! of individuals; the unscaled function stays available as the
//! "original fitness" for statistics and for computing the scaling
//! offsets themselves.
//!
//! Both strategies are generation-relative: the `ori_fmin`/`ori_fmax`
//! terms are the *current generation's* cached original-fitness
//! statistics, not globally fixed values.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, §4 (fitness scaling)

use crate::error::EngineError;
use crate::types::FitnessFn;
use std::fmt;
use std::str::FromStr;

/// The optimization direction of the objective being scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingTarget {
    /// The objective is maximized: `f' = f − ori_fmin + offset`.
    Max,
    /// The objective is minimized: `f' = ori_fmax − f + offset`.
    Min,
}

impl FromStr for ScalingTarget {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, EngineError> {
        match s {
            "max" => Ok(ScalingTarget::Max),
            "min" => Ok(ScalingTarget::Min),
            other => Err(EngineError::InvalidTarget(other.to_string())),
        }
    }
}

impl fmt::Display for ScalingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingTarget::Max => f.write_str("max"),
            ScalingTarget::Min => f.write_str("min"),
        }
    }
}

/// A transform applied to the raw fitness to control selection pressure.
///
/// Installed on the engine via [`crate::Engine::scale_fitness`]; the raw
/// registered fitness remains the original fitness for statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitnessScaling {
    /// Linear scaling with a fixed selective-pressure offset `ksi`.
    ///
    /// - target=Max: `f' = f − ori_fmin + ksi`
    /// - target=Min: `f' = ori_fmax − f + ksi`
    Linear {
        /// Optimization direction of the raw objective.
        target: ScalingTarget,
        /// Selective pressure adjustment, typically 0.5.
        ksi: f64,
    },

    /// Linear scaling whose offset decays (or grows) geometrically:
    /// `offset = ksi0 * decay^k` with `k = current_generation + 1`.
    ///
    /// A `decay` just below 1 (0.9–0.999) relaxes selective pressure as
    /// the search converges.
    DynamicLinear {
        /// Optimization direction of the raw objective.
        target: ScalingTarget,
        /// Initial selective pressure adjustment, typically 2.
        ksi0: f64,
        /// Geometric decay factor per generation.
        decay: f64,
    },
}

impl FitnessScaling {
    /// Linear scaling with the conventional defaults (`target=max`,
    /// `ksi=0.5`).
    pub fn linear_default() -> Self {
        FitnessScaling::Linear {
            target: ScalingTarget::Max,
            ksi: 0.5,
        }
    }

    /// Dynamic linear scaling with the conventional defaults
    /// (`target=max`, `ksi0=2`, `decay=0.9`).
    pub fn dynamic_default() -> Self {
        FitnessScaling::DynamicLinear {
            target: ScalingTarget::Max,
            ksi0: 2.0,
            decay: 0.9,
        }
    }

    /// The optimization direction this scaling assumes for the raw
    /// objective.
    pub fn target(&self) -> ScalingTarget {
        match self {
            FitnessScaling::Linear { target, .. } => *target,
            FitnessScaling::DynamicLinear { target, .. } => *target,
        }
    }

    /// The selective-pressure offset for the given generation.
    ///
    /// Generation `-1` (the pre-evolution snapshot) maps to `k = 0`,
    /// i.e. the undecayed `ksi0`.
    pub fn offset(&self, generation: i64) -> f64 {
        match self {
            FitnessScaling::Linear { ksi, .. } => *ksi,
            FitnessScaling::DynamicLinear { ksi0, decay, .. } => {
                let k = (generation + 1) as i32;
                ksi0 * decay.powi(k)
            }
        }
    }

    /// Applies the shift formula to one raw value.
    ///
    /// `ori_extremum` is the current generation's original-fitness
    /// minimum when the target is [`ScalingTarget::Max`], and its
    /// maximum when the target is [`ScalingTarget::Min`].
    pub fn apply(&self, raw: f64, ori_extremum: f64, generation: i64) -> f64 {
        let offset = self.offset(generation);
        match self.target() {
            ScalingTarget::Max => raw - ori_extremum + offset,
            ScalingTarget::Min => ori_extremum - raw + offset,
        }
    }
}

/// Negates a fitness function, turning a minimization objective into
/// the maximization form the rest of the machinery assumes.
pub fn minimize<I, F>(fitness: F) -> FitnessFn<I>
where
    F: Fn(&I) -> f64 + Send + Sync + 'static,
{
    Box::new(move |ind| -fitness(ind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_target_from_str() {
        assert_eq!("max".parse::<ScalingTarget>().unwrap(), ScalingTarget::Max);
        assert_eq!("min".parse::<ScalingTarget>().unwrap(), ScalingTarget::Min);
    }

    #[test]
    fn test_invalid_target_is_rejected() {
        let err = "avg".parse::<ScalingTarget>().unwrap_err();
        match err {
            EngineError::InvalidTarget(s) => assert_eq!(s, "avg"),
            other => panic!("expected InvalidTarget, got {other:?}"),
        }
    }

    #[test]
    fn test_linear_scaling_max_shifts_range() {
        // Raw range [2, 10] with ksi=0.5 maps to [0.5, 8.5].
        let scaling = FitnessScaling::Linear {
            target: ScalingTarget::Max,
            ksi: 0.5,
        };
        assert_eq!(scaling.apply(2.0, 2.0, 0), 0.5);
        assert_eq!(scaling.apply(10.0, 2.0, 0), 8.5);
        assert_eq!(scaling.apply(6.0, 2.0, 0), 4.5);
    }

    #[test]
    fn test_linear_scaling_min_inverts() {
        let scaling = FitnessScaling::Linear {
            target: ScalingTarget::Min,
            ksi: 0.5,
        };
        // Lowest raw value becomes the highest scaled value.
        assert_eq!(scaling.apply(2.0, 10.0, 0), 8.5);
        assert_eq!(scaling.apply(10.0, 10.0, 0), 0.5);
    }

    #[test]
    fn test_dynamic_offset_decays_geometrically() {
        let scaling = FitnessScaling::DynamicLinear {
            target: ScalingTarget::Max,
            ksi0: 2.0,
            decay: 0.9,
        };
        // Generation 0 → k=1 → 2 * 0.9 = 1.8
        assert!((scaling.offset(0) - 1.8).abs() < 1e-12);
        // Generation 9 → k=10 → 2 * 0.9^10 ≈ 0.6973568802
        assert!((scaling.offset(9) - 2.0 * 0.9f64.powi(10)).abs() < 1e-12);
        assert!((scaling.offset(9) - 0.6973568802).abs() < 1e-9);
        // Pre-evolution snapshot → k=0 → undecayed ksi0.
        assert!((scaling.offset(-1) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_offset_ignores_generation() {
        let scaling = FitnessScaling::linear_default();
        assert_eq!(scaling.offset(0), scaling.offset(1000));
    }

    #[test]
    fn test_minimize_negates() {
        let f = minimize(|x: &f64| *x);
        assert_eq!(f(&3.0), -3.0);
        assert_eq!(f(&-2.5), 2.5);
    }

    proptest! {
        /// Linear scaling with target=max is monotone: it never reorders
        /// two raw values (float rounding may merge near-ties, so the
        /// guarantee is non-strict).
        #[test]
        fn prop_linear_max_is_monotone(
            a in -1e6f64..1e6,
            b in -1e6f64..1e6,
            lo in -1e6f64..1e6,
            ksi in 0.0f64..10.0,
        ) {
            let (a, b) = if a <= b { (a, b) } else { (b, a) };
            let scaling = FitnessScaling::Linear { target: ScalingTarget::Max, ksi };
            let sa = scaling.apply(a, lo, 0);
            let sb = scaling.apply(b, lo, 0);
            prop_assert!(sa <= sb);
        }

        /// Linear scaling with target=min is antitone: lower raw
        /// objectives never score below higher ones.
        #[test]
        fn prop_linear_min_is_antitone(
            a in -1e6f64..1e6,
            b in -1e6f64..1e6,
            hi in -1e6f64..1e6,
            ksi in 0.0f64..10.0,
        ) {
            let (a, b) = if a <= b { (a, b) } else { (b, a) };
            let scaling = FitnessScaling::Linear { target: ScalingTarget::Min, ksi };
            let sa = scaling.apply(a, hi, 0);
            let sb = scaling.apply(b, hi, 0);
            prop_assert!(sa >= sb);
        }
    }
}
