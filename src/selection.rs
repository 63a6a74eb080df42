//! Built-in genome-agnostic selection operators.
//!
//! Selection only needs fitness values, never genome structure, so these
//! implementations work with any [`Individual`]. Both assume the
//! engine's maximization-oriented effective fitness (higher is better);
//! the scaling strategies in [`crate::scaling`] exist precisely to put
//! arbitrary objectives into that space.
//!
//! Crossover and mutation have no built-ins: they are genome-specific
//! and owned by the caller.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::error::EngineError;
use crate::operators::Selection;
use crate::population::Population;
use crate::types::{Individual, PluginError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;

/// Tournament selection: sample `k` individuals at random, keep the
/// fittest. Two independent tournaments produce the parent pair.
///
/// Higher `k` = stronger selection pressure; k=2 is light, k=3–5 is the
/// typical default.
pub struct TournamentSelection {
    size: usize,
    rng: RefCell<StdRng>,
}

impl TournamentSelection {
    /// Creates a tournament of the given size with a random seed.
    pub fn new(size: usize) -> Self {
        Self::seeded(size, rand::random())
    }

    /// Creates a tournament of the given size with a fixed seed, for
    /// reproducible runs.
    pub fn seeded(size: usize, seed: u64) -> Self {
        Self {
            size: size.max(1),
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick_one<I: Individual>(
        &self,
        population: &Population<I>,
        fitness: &dyn Fn(&I) -> Result<f64, EngineError>,
        rng: &mut StdRng,
    ) -> Result<I, EngineError> {
        let n = population.size();
        assert!(n > 0, "cannot select from empty population");

        let individuals = population.individuals();
        let mut best_idx = rng.random_range(0..n);
        let mut best_f = fitness(&individuals[best_idx])?;
        for _ in 1..self.size {
            let idx = rng.random_range(0..n);
            let f = fitness(&individuals[idx])?;
            if f > best_f {
                best_idx = idx;
                best_f = f;
            }
        }
        Ok(individuals[best_idx].clone())
    }
}

impl<I: Individual> Selection<I> for TournamentSelection {
    fn select(
        &self,
        population: &Population<I>,
        fitness: &dyn Fn(&I) -> Result<f64, EngineError>,
    ) -> Result<(I, I), PluginError> {
        let mut rng = self.rng.borrow_mut();
        let father = self.pick_one(population, fitness, &mut rng)?;
        let mother = self.pick_one(population, fitness, &mut rng)?;
        Ok((father, mother))
    }
}

/// Fitness-proportionate (roulette wheel) selection.
///
/// Selection probability is proportional to fitness. Weights are shifted
/// by the population minimum plus a small epsilon, so the operator stays
/// well-defined even when the effective fitness dips non-positive.
///
/// Susceptible to super-individual dominance when fitness variance is
/// high; pair with a scaling strategy to control pressure.
pub struct RouletteWheelSelection {
    rng: RefCell<StdRng>,
}

impl RouletteWheelSelection {
    /// Creates a roulette wheel with a random seed.
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Creates a roulette wheel with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn spin<I: Individual>(&self, individuals: &[I], weights: &[f64], rng: &mut StdRng) -> I {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return individuals[rng.random_range(0..individuals.len())].clone();
        }
        let threshold = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for (ind, &w) in individuals.iter().zip(weights) {
            cumulative += w;
            if cumulative > threshold {
                return ind.clone();
            }
        }
        // floating-point fallback
        individuals[individuals.len() - 1].clone()
    }
}

impl Default for RouletteWheelSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Individual> Selection<I> for RouletteWheelSelection {
    fn select(
        &self,
        population: &Population<I>,
        fitness: &dyn Fn(&I) -> Result<f64, EngineError>,
    ) -> Result<(I, I), PluginError> {
        let individuals = population.individuals();
        assert!(!individuals.is_empty(), "cannot select from empty population");

        let mut values = Vec::with_capacity(individuals.len());
        for ind in individuals {
            values.push(fitness(ind)?);
        }
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);

        let epsilon = 1e-10;
        let weights: Vec<f64> = values.iter().map(|&f| f - min + epsilon).collect();

        let mut rng = self.rng.borrow_mut();
        let father = self.spin(individuals, &weights, &mut rng);
        let mother = self.spin(individuals, &weights, &mut rng);
        Ok((father, mother))
    }
}
