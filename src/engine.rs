//! The evolutionary search engine.
//!
//! [`Engine`] composes a population, the three operator plugins, an
//! optional fitness scaling, and any number of analysis plugins into the
//! generation loop: select parents → cross → mutate → install the new
//! generation → notify analyses → repeat, until the generation budget or
//! the wall-clock budget (whichever triggers first) is exhausted.
//!
//! Execution is single-threaded and strictly sequential: one generation
//! fully completes before the next begins, and the timeout is sampled
//! only at generation boundaries. Any error raised mid-run is logged
//! with generation context, analysis finalization still runs on every
//! plugin, then the error surfaces to the caller.

use crate::analysis::OnTheFlyAnalysis;
use crate::config::RunConfig;
use crate::error::EngineError;
use crate::operators::{Crossover, Mutation, Selection};
use crate::population::Population;
use crate::scaling::{FitnessScaling, ScalingTarget};
use crate::stats::{memoize, StatsCache};
use crate::types::{FitnessFn, Individual};
use log::{debug, error};
use std::time::Instant;

/// Result of one [`Engine::run`] invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Number of generation replacements performed.
    pub generations_completed: usize,

    /// Whether the run stopped because the global timeout elapsed.
    pub timed_out: bool,
}

/// Plugin-driven evolutionary search engine.
///
/// `I` is the individual (genome) type; `M` is an optional opaque
/// domain mapping passed through to mutation operators, `()` when
/// unused.
///
/// # Usage
///
/// ```ignore
/// let mut engine = Engine::new(population, selection, crossover, mutation);
/// engine.register_fitness(|ind: &TxSequence| score(ind));
/// engine.scale_fitness(FitnessScaling::linear_default());
/// engine.register_analysis(Box::new(ProgressLogger::new(10)))?;
/// let outcome = engine.run(&RunConfig::default().with_target_generations(200))?;
/// let survivors = engine.into_population();
/// ```
pub struct Engine<I: Individual, M = ()> {
    population: Population<I>,
    selection: Box<dyn Selection<I>>,
    crossover: Box<dyn Crossover<I>>,
    mutation: Box<dyn Mutation<I, M>>,
    analysis: Vec<Box<dyn OnTheFlyAnalysis<I>>>,
    raw_fitness: Option<FitnessFn<I>>,
    scaling: Option<FitnessScaling>,
    mapping: Option<M>,
    current_generation: i64,
    stats: StatsCache,
}

impl<I: Individual, M> Engine<I, M> {
    /// Composes an engine from its population and operator plugins.
    ///
    /// Capability checking happens at the type level; the remaining
    /// runtime requirements (a registered fitness, valid analysis
    /// intervals, a valid [`RunConfig`]) fail with
    /// [`EngineError::Configuration`] before any breeding work.
    pub fn new(
        population: Population<I>,
        selection: Box<dyn Selection<I>>,
        crossover: Box<dyn Crossover<I>>,
        mutation: Box<dyn Mutation<I, M>>,
    ) -> Self {
        Self {
            population,
            selection,
            crossover,
            mutation,
            analysis: Vec::new(),
            raw_fitness: None,
            scaling: None,
            mapping: None,
            current_generation: -1,
            stats: StatsCache::default(),
        }
    }

    /// Attaches an opaque domain mapping, readable by mutation
    /// operators via [`Engine::mapping`]. The engine itself never
    /// interprets it.
    pub fn with_mapping(mut self, mapping: M) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Registers the raw fitness function.
    ///
    /// Every evaluation is validated: a non-finite result fails with
    /// [`EngineError::InvalidFitness`] at that evaluation. The raw
    /// function doubles as the original fitness used by scaling
    /// strategies and the `ori_*` statistics.
    pub fn register_fitness<F>(&mut self, fitness: F)
    where
        F: Fn(&I) -> f64 + Send + Sync + 'static,
    {
        self.raw_fitness = Some(Box::new(fitness));
    }

    /// Installs a scaling transform on the registered fitness.
    ///
    /// Selection then sees the scaled values while the `ori_*`
    /// statistics keep reporting the raw objective.
    pub fn scale_fitness(&mut self, scaling: FitnessScaling) {
        self.scaling = Some(scaling);
    }

    /// Registers an analysis plugin. Registration order fixes the
    /// invocation order of every lifecycle stage.
    pub fn register_analysis(
        &mut self,
        plugin: Box<dyn OnTheFlyAnalysis<I>>,
    ) -> Result<(), EngineError> {
        if plugin.interval() == 0 {
            return Err(EngineError::Configuration(
                "analysis interval must be at least 1".into(),
            ));
        }
        self.analysis.push(plugin);
        Ok(())
    }

    /// The current population. After [`Engine::run`] returns (or
    /// fails), this is the last installed generation.
    pub fn population(&self) -> &Population<I> {
        &self.population
    }

    /// Consumes the engine, yielding the last installed population.
    pub fn into_population(self) -> Population<I> {
        self.population
    }

    /// Index of the generation currently being bred; −1 before the
    /// loop has started.
    pub fn current_generation(&self) -> i64 {
        self.current_generation
    }

    /// The domain mapping passthrough, if one was attached.
    pub fn mapping(&self) -> Option<&M> {
        self.mapping.as_ref()
    }

    /// Evaluates the effective fitness of one individual: validated
    /// raw fitness, scaled when a scaling strategy is installed.
    pub fn fitness(&self, individual: &I) -> Result<f64, EngineError> {
        let raw = self.original_fitness(individual)?;
        match self.scaling {
            None => Ok(raw),
            Some(scaling) => {
                let extremum = match scaling.target() {
                    ScalingTarget::Max => self.ori_fmin()?,
                    ScalingTarget::Min => self.ori_fmax()?,
                };
                Ok(scaling.apply(raw, extremum, self.current_generation))
            }
        }
    }

    /// Evaluates the original (unscaled) fitness of one individual,
    /// with validation.
    pub fn original_fitness(&self, individual: &I) -> Result<f64, EngineError> {
        let fitness = self.raw_fitness.as_ref().ok_or_else(|| {
            EngineError::Configuration("no fitness function registered".into())
        })?;
        let value = fitness(individual);
        if !value.is_finite() {
            return Err(EngineError::InvalidFitness { value });
        }
        Ok(value)
    }

    /// Maximum effective fitness of the current generation (cached).
    pub fn fmax(&self) -> Result<f64, EngineError> {
        memoize(&self.stats.fmax, || {
            self.population.max(|i| self.fitness(i))
        })
    }

    /// Minimum effective fitness of the current generation (cached).
    pub fn fmin(&self) -> Result<f64, EngineError> {
        memoize(&self.stats.fmin, || {
            self.population.min(|i| self.fitness(i))
        })
    }

    /// Mean effective fitness of the current generation (cached).
    pub fn fmean(&self) -> Result<f64, EngineError> {
        memoize(&self.stats.fmean, || {
            self.population.mean(|i| self.fitness(i))
        })
    }

    /// Maximum original fitness of the current generation (cached).
    pub fn ori_fmax(&self) -> Result<f64, EngineError> {
        memoize(&self.stats.ori_fmax, || {
            self.population.max(|i| self.original_fitness(i))
        })
    }

    /// Minimum original fitness of the current generation (cached).
    pub fn ori_fmin(&self) -> Result<f64, EngineError> {
        memoize(&self.stats.ori_fmin, || {
            self.population.min(|i| self.original_fitness(i))
        })
    }

    /// Mean original fitness of the current generation (cached).
    pub fn ori_fmean(&self) -> Result<f64, EngineError> {
        memoize(&self.stats.ori_fmean, || {
            self.population.mean(|i| self.original_fitness(i))
        })
    }

    /// Runs the generation loop.
    ///
    /// The loop continues while fewer than
    /// [`RunConfig::target_generations`] replacements have completed
    /// and the [`RunConfig::global_timeout`] (if any) has not elapsed;
    /// whichever budget triggers first ends the run. The timeout is
    /// sampled once per generation at the loop top; there is no
    /// mid-generation abort.
    ///
    /// Every registered analysis plugin's `finalize` runs exactly once
    /// before this method returns, on success and on every failure
    /// path. Finalization is isolated per plugin: one failing finalize
    /// never prevents the rest from running. If the run itself failed,
    /// that error is returned and finalize failures are only logged;
    /// otherwise the first finalize failure is returned.
    pub fn run(&mut self, config: &RunConfig) -> Result<RunOutcome, EngineError> {
        let outcome = self.evolve(config);
        if let Err(e) = &outcome {
            error!(
                "evolution failed at generation {}: {e}",
                self.current_generation
            );
        }
        let finalized = self.finalize_analysis();
        match outcome {
            Err(e) => Err(e),
            Ok(outcome) => finalized.map(|()| outcome),
        }
    }

    fn evolve(&mut self, config: &RunConfig) -> Result<RunOutcome, EngineError> {
        config.validate()?;
        if self.raw_fitness.is_none() {
            return Err(EngineError::Configuration(
                "no fitness function registered".into(),
            ));
        }

        let target = config.target_generations;

        // A repeat run starts from the pre-evolution context, not from
        // the previous run's last generation.
        self.current_generation = -1;
        self.stats.reset_all();

        // Setup and the pre-evolution snapshot, in registration order.
        {
            let population = &self.population;
            for plugin in &mut self.analysis {
                plugin
                    .setup(target)
                    .map_err(|e| EngineError::from_analysis("setup", e))?;
                plugin
                    .register_step(-1, population)
                    .map_err(|e| EngineError::from_analysis("register_step", e))?;
            }
        }

        let loop_started = Instant::now();
        let mut timed_out = false;
        let mut generation = 0usize;

        while generation < target {
            // The only cancellation point: sampled once per generation,
            // so a long generation may overshoot the budget.
            if let Some(limit) = config.global_timeout {
                if loop_started.elapsed() >= limit {
                    timed_out = true;
                    debug!("global timeout reached after {generation} generations");
                    break;
                }
            }

            self.current_generation = generation as i64;
            self.stats.reset_all();

            let offspring = self.breed()?;
            self.population.replace(offspring);
            // Statistics queried from here on must see the new
            // generation, not values cached while breeding from the
            // old one.
            self.stats.reset_all();

            let population = &self.population;
            for plugin in &mut self.analysis {
                if generation % plugin.interval() == 0 {
                    plugin
                        .register_step(generation as i64, population)
                        .map_err(|e| EngineError::from_analysis("register_step", e))?;
                }
            }

            generation += 1;
        }

        Ok(RunOutcome {
            generations_completed: generation,
            timed_out,
        })
    }

    /// Breeds one full generation of offspring from the current
    /// population: `size / 2` pair steps, each selecting two parents,
    /// crossing them, and mutating every child with engine context.
    ///
    /// An odd-sized population pairs off to `2 * (size / 2)` children
    /// (assuming two children per cross) and stays even thereafter.
    fn breed(&self) -> Result<Vec<I>, EngineError> {
        let generation = self.current_generation;
        let pairs = self.population.size() / 2;
        let fitness = |individual: &I| self.fitness(individual);

        let mut offspring = Vec::with_capacity(pairs * 2);
        for _ in 0..pairs {
            let (father, mother) = self
                .selection
                .select(&self.population, &fitness)
                .map_err(|e| EngineError::from_operator(generation, e))?;
            let children = self
                .crossover
                .cross(&father, &mother)
                .map_err(|e| EngineError::from_operator(generation, e))?;
            for child in children {
                let child = self
                    .mutation
                    .mutate(child, self)
                    .map_err(|e| EngineError::from_operator(generation, e))?;
                offspring.push(child);
            }
        }
        Ok(offspring)
    }

    /// Finalizes every analysis plugin, isolating failures so each
    /// plugin's `finalize` is attempted exactly once.
    fn finalize_analysis(&mut self) -> Result<(), EngineError> {
        let population = &self.population;
        let mut first_error = None;
        for plugin in &mut self.analysis {
            if let Err(e) = plugin.finalize(population) {
                let e = EngineError::from_analysis("finalize", e);
                error!("analysis finalization failed: {e}");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
