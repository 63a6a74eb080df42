//! Population storage and aggregate fitness statistics.
//!
//! A [`Population`] is an ordered collection of individuals, replaced
//! wholesale by the engine at every generation. The statistics queries
//! (`max`, `min`, `mean`) evaluate a supplied fitness closure over every
//! individual currently held; they propagate evaluation errors and do
//! not guard against empty populations (an empty population is a caller
//! error, see the panics sections below).

use crate::error::EngineError;
use crate::types::Individual;

/// The current generation's collection of individuals.
///
/// Conceptually fixed-size, but generational replacement pairs parents
/// off: a population of odd size `S` shrinks to `2 * (S / 2)` on its
/// first replacement and stays even thereafter.
#[derive(Debug, Clone)]
pub struct Population<I: Individual> {
    individuals: Vec<I>,
}

impl<I: Individual> Population<I> {
    /// Creates a population from an initial set of individuals.
    pub fn new(individuals: Vec<I>) -> Self {
        Self { individuals }
    }

    /// Number of individuals currently held.
    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population holds no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The individuals, in order.
    pub fn individuals(&self) -> &[I] {
        &self.individuals
    }

    /// Returns the individual at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&I> {
        self.individuals.get(index)
    }

    /// Consumes the population, yielding its individuals.
    pub fn into_individuals(self) -> Vec<I> {
        self.individuals
    }

    /// Replaces the whole generation with `next`.
    ///
    /// Individuals are never mutated in place; breeding produces a new
    /// set and the engine installs it here.
    pub(crate) fn replace(&mut self, next: Vec<I>) {
        self.individuals = next;
    }

    /// Maximum fitness over all individuals.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn max<F>(&self, mut fitness: F) -> Result<f64, EngineError>
    where
        F: FnMut(&I) -> Result<f64, EngineError>,
    {
        assert!(!self.individuals.is_empty(), "population must not be empty");
        let mut best = f64::NEG_INFINITY;
        for ind in &self.individuals {
            best = best.max(fitness(ind)?);
        }
        Ok(best)
    }

    /// Minimum fitness over all individuals.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn min<F>(&self, mut fitness: F) -> Result<f64, EngineError>
    where
        F: FnMut(&I) -> Result<f64, EngineError>,
    {
        assert!(!self.individuals.is_empty(), "population must not be empty");
        let mut worst = f64::INFINITY;
        for ind in &self.individuals {
            worst = worst.min(fitness(ind)?);
        }
        Ok(worst)
    }

    /// Arithmetic mean fitness over all individuals.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn mean<F>(&self, mut fitness: F) -> Result<f64, EngineError>
    where
        F: FnMut(&I) -> Result<f64, EngineError>,
    {
        assert!(!self.individuals.is_empty(), "population must not be empty");
        let mut sum = 0.0;
        for ind in &self.individuals {
            sum += fitness(ind)?;
        }
        Ok(sum / self.individuals.len() as f64)
    }

    /// The individual with the highest fitness. Ties break arbitrarily.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn best_individual<F>(&self, mut fitness: F) -> Result<&I, EngineError>
    where
        F: FnMut(&I) -> Result<f64, EngineError>,
    {
        assert!(!self.individuals.is_empty(), "population must not be empty");
        let mut best = &self.individuals[0];
        let mut best_f = fitness(best)?;
        for ind in &self.individuals[1..] {
            let f = fitness(ind)?;
            if f > best_f {
                best = ind;
                best_f = f;
            }
        }
        Ok(best)
    }

    /// The individual with the lowest fitness. Ties break arbitrarily.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn worst_individual<F>(&self, mut fitness: F) -> Result<&I, EngineError>
    where
        F: FnMut(&I) -> Result<f64, EngineError>,
    {
        assert!(!self.individuals.is_empty(), "population must not be empty");
        let mut worst = &self.individuals[0];
        let mut worst_f = fitness(worst)?;
        for ind in &self.individuals[1..] {
            let f = fitness(ind)?;
            if f < worst_f {
                worst = ind;
                worst_f = f;
            }
        }
        Ok(worst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Gene(f64);

    impl Individual for Gene {
        type Decoded = f64;
        fn decode(&self) -> f64 {
            self.0
        }
    }

    fn make_population(values: &[f64]) -> Population<Gene> {
        Population::new(values.iter().map(|&v| Gene(v)).collect())
    }

    fn by_value(g: &Gene) -> Result<f64, EngineError> {
        Ok(g.0)
    }

    #[test]
    fn test_max_min_mean() {
        let pop = make_population(&[2.0, 10.0, 4.0, 8.0]);
        assert_eq!(pop.max(by_value).unwrap(), 10.0);
        assert_eq!(pop.min(by_value).unwrap(), 2.0);
        assert_eq!(pop.mean(by_value).unwrap(), 6.0);
    }

    #[test]
    fn test_best_and_worst_individual() {
        let pop = make_population(&[2.0, 10.0, 4.0]);
        assert_eq!(pop.best_individual(by_value).unwrap().0, 10.0);
        assert_eq!(pop.worst_individual(by_value).unwrap().0, 2.0);
    }

    #[test]
    fn test_single_individual_statistics() {
        let pop = make_population(&[3.5]);
        assert_eq!(pop.max(by_value).unwrap(), 3.5);
        assert_eq!(pop.min(by_value).unwrap(), 3.5);
        assert_eq!(pop.mean(by_value).unwrap(), 3.5);
    }

    #[test]
    fn test_fitness_error_propagates() {
        let pop = make_population(&[1.0, 2.0]);
        let result = pop.max(|g| {
            if g.0 > 1.5 {
                Err(EngineError::InvalidFitness { value: f64::NAN })
            } else {
                Ok(g.0)
            }
        });
        assert!(matches!(result, Err(EngineError::InvalidFitness { .. })));
    }

    #[test]
    #[should_panic(expected = "population must not be empty")]
    fn test_empty_population_panics() {
        let pop: Population<Gene> = Population::new(vec![]);
        let _ = pop.max(by_value);
    }

    #[test]
    fn test_replace_installs_new_generation() {
        let mut pop = make_population(&[1.0, 2.0, 3.0]);
        pop.replace(vec![Gene(9.0), Gene(8.0)]);
        assert_eq!(pop.size(), 2);
        assert_eq!(pop.get(0), Some(&Gene(9.0)));
    }
}
