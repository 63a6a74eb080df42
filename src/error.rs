//! Error taxonomy for the engine.
//!
//! Every failure is fatal to the running evolution: errors are logged
//! with generation context, analysis finalization still runs, then the
//! error surfaces to the caller. Nothing is retried or silently skipped.

use crate::types::PluginError;
use thiserror::Error;

/// Errors produced by the engine and its fitness pipeline.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A missing or malformed engine dependency: no fitness function
    /// registered, a zero analysis interval, an invalid run
    /// configuration. Raised before or at loop start.
    #[error("engine configuration error: {0}")]
    Configuration(String),

    /// A fitness evaluation produced a non-finite value. Raised at the
    /// first offending evaluation, never at registration.
    #[error("fitness value is invalid (value: {value}, expected a finite f64)")]
    InvalidFitness {
        /// The offending value (NaN or infinite).
        value: f64,
    },

    /// A scaling target spelling outside `max`/`min`.
    #[error("invalid scaling target ({0}), expected \"max\" or \"min\"")]
    InvalidTarget(String),

    /// A selection, crossover, or mutation operator failed mid-loop.
    #[error("operator failed at generation {generation}: {source}")]
    Operator {
        /// Generation being bred when the operator failed.
        generation: i64,
        #[source]
        source: PluginError,
    },

    /// An analysis plugin failed during setup, a step, or finalization.
    #[error("analysis plugin failed during {stage}: {source}")]
    Analysis {
        /// Lifecycle stage: `"setup"`, `"register_step"`, or `"finalize"`.
        stage: &'static str,
        #[source]
        source: PluginError,
    },
}

impl EngineError {
    /// Wraps an operator failure, flattening an `EngineError` that was
    /// propagated through the plugin boundary (e.g. an invalid fitness
    /// value observed inside a selection operator) back into itself.
    pub(crate) fn from_operator(generation: i64, source: PluginError) -> Self {
        match source.downcast::<EngineError>() {
            Ok(inner) => *inner,
            Err(source) => EngineError::Operator { generation, source },
        }
    }

    /// Wraps an analysis plugin failure with its lifecycle stage.
    pub(crate) fn from_analysis(stage: &'static str, source: PluginError) -> Self {
        match source.downcast::<EngineError>() {
            Ok(inner) => *inner,
            Err(source) => EngineError::Analysis { stage, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_wrap_preserves_engine_error() {
        let inner: PluginError = Box::new(EngineError::InvalidFitness { value: f64::NAN });
        let wrapped = EngineError::from_operator(3, inner);
        assert!(matches!(wrapped, EngineError::InvalidFitness { .. }));
    }

    #[test]
    fn test_operator_wrap_foreign_error() {
        let inner: PluginError = "selector ran dry".into();
        let wrapped = EngineError::from_operator(7, inner);
        match wrapped {
            EngineError::Operator { generation, .. } => assert_eq!(generation, 7),
            other => panic!("expected Operator, got {other:?}"),
        }
    }

    #[test]
    fn test_analysis_wrap_carries_stage() {
        let inner: PluginError = "disk full".into();
        let wrapped = EngineError::from_analysis("finalize", inner);
        let msg = wrapped.to_string();
        assert!(msg.contains("finalize"), "message should name the stage: {msg}");
    }
}
