//! Core trait and type definitions shared across the engine.
//!
//! The central contract is [`Individual`]: the engine treats genomes as
//! opaque values and only ever clones, selects, and replaces them.
//! Decoding a genome into its domain meaning is the business of
//! collaborators (fitness functions, analysis plugins), never of the
//! engine itself.

/// A candidate solution in the population.
///
/// The engine never inspects or mutates an individual in place; operators
/// construct new individuals and the engine replaces the population
/// wholesale each generation.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct TxSequence {
///     calls: Vec<u8>,
/// }
///
/// impl Individual for TxSequence {
///     type Decoded = Vec<u8>;
///     fn decode(&self) -> Vec<u8> { self.calls.clone() }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// The domain value this genome encodes.
    type Decoded;

    /// Decodes the genome into its domain meaning.
    ///
    /// Called by collaborators, not by the engine.
    fn decode(&self) -> Self::Decoded;
}

/// A raw fitness function: a pure mapping from individual to scalar
/// desirability.
///
/// The engine validates every returned value at evaluation time: a
/// non-finite result (NaN or infinite) fails the evaluation with
/// [`EngineError::InvalidFitness`](crate::EngineError::InvalidFitness).
pub type FitnessFn<I> = Box<dyn Fn(&I) -> f64 + Send + Sync>;

/// Error type produced by operator and analysis plugins.
///
/// Plugins own their failure types; the engine boxes them, logs them
/// with generation context, and re-raises them after finalization. An
/// [`EngineError`](crate::EngineError) crossing a plugin boundary (for example an invalid
/// fitness value observed inside a selection operator) is flattened
/// back into itself rather than double-wrapped.
pub type PluginError = Box<dyn std::error::Error + Send + Sync + 'static>;
