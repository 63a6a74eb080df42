//! Operator plugin contracts: selection, crossover, mutation.
//!
//! Operators are the breeding strategies the engine invokes once per
//! pair, per generation. They are supplied by the caller (the engine
//! knows nothing about what a genome encodes) and must treat the
//! population and engine references they receive as read-only: operators
//! construct new individuals, they never reach into the live collection.
//!
//! Stateful operators (e.g. those carrying an RNG) use interior
//! mutability; the engine is single-threaded, so a `RefCell` is enough.
//! See [`crate::selection`] for built-in, genome-agnostic selections.

use crate::engine::Engine;
use crate::error::EngineError;
use crate::population::Population;
use crate::types::{Individual, PluginError};

/// Picks two parents from the population for one breeding step.
pub trait Selection<I: Individual>: Send {
    /// Selects a parent pair.
    ///
    /// `fitness` is the engine's effective fitness: validated and, when
    /// a scaling strategy is installed, scaled into a
    /// maximization-oriented space (higher is better). Evaluation
    /// errors must be propagated, not swallowed.
    fn select(
        &self,
        population: &Population<I>,
        fitness: &dyn Fn(&I) -> Result<f64, EngineError>,
    ) -> Result<(I, I), PluginError>;
}

/// Recombines two parents into offspring.
pub trait Crossover<I: Individual>: Send {
    /// Produces the children of one parent pair, typically two.
    fn cross(&self, parent_a: &I, parent_b: &I) -> Result<Vec<I>, PluginError>;
}

/// Perturbs a single child.
///
/// Mutation receives the engine itself so generation-aware strategies
/// can read [`Engine::current_generation`], the cached statistics, or
/// the domain mapping passthrough and adapt their behavior.
pub trait Mutation<I: Individual, M = ()>: Send {
    /// Returns the (possibly) mutated individual.
    fn mutate(&self, individual: I, engine: &Engine<I, M>) -> Result<I, PluginError>;
}
