//! On-the-fly analysis plugins.
//!
//! Analyses observe the evolution without influencing it. Their
//! lifecycle is `setup → register_step* → finalize`: setup and an
//! initial snapshot (generation −1) fire once before the loop,
//! `register_step` fires at the plugin's interval cadence, and
//! `finalize` runs exactly once per [`crate::Engine::run`] invocation on
//! every exit path, normal or failing.

use crate::population::Population;
use crate::types::{Individual, PluginError};
use log::info;

/// Observer invoked at a configurable cadence during evolution.
///
/// Plugins are registered with [`crate::Engine::register_analysis`];
/// registration order fixes invocation order for every lifecycle stage.
pub trait OnTheFlyAnalysis<I: Individual>: Send {
    /// How often `register_step` fires: every generation `g` with
    /// `g % interval == 0`. Must be at least 1; registration rejects
    /// zero intervals.
    fn interval(&self) -> usize {
        1
    }

    /// Called once before the loop with the generation budget.
    fn setup(&mut self, _target_generations: usize) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called for the pre-evolution snapshot (generation −1) and then
    /// for every generation matching the interval cadence.
    fn register_step(
        &mut self,
        generation: i64,
        population: &Population<I>,
    ) -> Result<(), PluginError>;

    /// Called exactly once when the run ends, whatever the outcome.
    ///
    /// A failing finalize never prevents the remaining plugins'
    /// finalize from running.
    fn finalize(&mut self, _population: &Population<I>) -> Result<(), PluginError> {
        Ok(())
    }
}

/// Built-in analysis that reports progress through the `log` facade.
///
/// With a fitness closure attached it logs the population's max and
/// mean fitness each step; without one it logs only generation and
/// population size.
pub struct ProgressLogger<I: Individual> {
    interval: usize,
    fitness: Option<Box<dyn Fn(&I) -> f64 + Send + Sync>>,
}

impl<I: Individual> ProgressLogger<I> {
    /// Logs generation and population size every `interval` generations.
    pub fn new(interval: usize) -> Self {
        Self {
            interval,
            fitness: None,
        }
    }

    /// Attaches a fitness closure so each step also reports max and
    /// mean fitness.
    pub fn with_fitness<F>(mut self, fitness: F) -> Self
    where
        F: Fn(&I) -> f64 + Send + Sync + 'static,
    {
        self.fitness = Some(Box::new(fitness));
        self
    }
}

impl<I: Individual> OnTheFlyAnalysis<I> for ProgressLogger<I> {
    fn interval(&self) -> usize {
        self.interval
    }

    fn setup(&mut self, target_generations: usize) -> Result<(), PluginError> {
        info!("evolution starting, budget: {target_generations} generations");
        Ok(())
    }

    fn register_step(
        &mut self,
        generation: i64,
        population: &Population<I>,
    ) -> Result<(), PluginError> {
        match &self.fitness {
            Some(f) => {
                let max = population.max(|i| Ok(f(i)))?;
                let mean = population.mean(|i| Ok(f(i)))?;
                info!(
                    "generation {generation}: size={}, fmax={max:.6}, fmean={mean:.6}",
                    population.size()
                );
            }
            None => {
                info!("generation {generation}: size={}", population.size());
            }
        }
        Ok(())
    }

    fn finalize(&mut self, population: &Population<I>) -> Result<(), PluginError> {
        info!("evolution finished with {} individuals", population.size());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Gene(f64);

    impl Individual for Gene {
        type Decoded = f64;
        fn decode(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_default_interval_is_every_generation() {
        let logger: ProgressLogger<Gene> = ProgressLogger::new(1);
        assert_eq!(OnTheFlyAnalysis::<Gene>::interval(&logger), 1);
    }

    #[test]
    fn test_progress_logger_steps_without_error() {
        let mut logger = ProgressLogger::new(2).with_fitness(|g: &Gene| g.0);
        let pop = Population::new(vec![Gene(1.0), Gene(3.0)]);
        logger.setup(10).unwrap();
        logger.register_step(-1, &pop).unwrap();
        logger.register_step(0, &pop).unwrap();
        logger.finalize(&pop).unwrap();
    }
}
