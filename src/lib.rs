//! Generic, plugin-driven evolutionary search engine.
//!
//! Given a population of candidate individuals, pluggable selection,
//! crossover, and mutation operators, a fitness function, and optional
//! on-the-fly analysis hooks, the [`Engine`] breeds new generations to
//! drive fitness toward an optimum, subject to a generation budget
//! and/or a wall-clock timeout. The engine knows nothing about what an
//! individual's genome encodes: in its home setting it evolves fuzz
//! inputs (transaction sequences against a target contract), but any
//! domain that can implement [`Individual`] and the operator traits can
//! use it.
//!
//! # Core Traits
//!
//! - [`Individual`]: an opaque genome with a `decode` operation
//! - [`Selection`], [`Crossover`], [`Mutation`]: breeding operators
//! - [`OnTheFlyAnalysis`]: observers with a guaranteed-finalize lifecycle
//!
//! # Key Types
//!
//! - [`Engine`]: the generation loop, fitness pipeline, and statistics
//! - [`Population`]: the current generation plus max/min/mean queries
//! - [`FitnessScaling`]: linear and decaying selective-pressure transforms
//! - [`RunConfig`] / [`RunOutcome`]: per-run termination parameters and
//!   result
//!
//! # Execution model
//!
//! Single-threaded, synchronous, cooperative: one generation strictly
//! completes before the next begins, and the only cancellation point is
//! the timeout check at each generation boundary. All mutable state is
//! owned by the engine instance; plugins receive read-only views.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod operators;
pub mod population;
pub mod scaling;
pub mod selection;
mod stats;
pub mod types;

pub use analysis::{OnTheFlyAnalysis, ProgressLogger};
pub use config::RunConfig;
pub use engine::{Engine, RunOutcome};
pub use error::EngineError;
pub use operators::{Crossover, Mutation, Selection};
pub use population::Population;
pub use scaling::{minimize, FitnessScaling, ScalingTarget};
pub use selection::{RouletteWheelSelection, TournamentSelection};
pub use types::{FitnessFn, Individual, PluginError};
