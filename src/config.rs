//! Run configuration.
//!
//! [`RunConfig`] carries the termination parameters for one
//! [`crate::Engine::run`] invocation. Everything is an explicit field:
//! there are no environment-variable toggles.

use crate::error::EngineError;
use std::time::Duration;

/// Termination parameters for one evolution run.
///
/// # Defaults
///
/// ```
/// use evoforge::RunConfig;
///
/// let config = RunConfig::default();
/// assert_eq!(config.target_generations, 100);
/// assert!(config.global_timeout.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evoforge::RunConfig;
/// use std::time::Duration;
///
/// let config = RunConfig::default()
///     .with_target_generations(500)
///     .with_global_timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Number of generations to breed. The run stops once this many
    /// replacements have completed, unless the timeout fires first.
    pub target_generations: usize,

    /// Optional wall-clock budget for the whole run.
    ///
    /// Sampled once per generation, at the loop top, against the time
    /// the loop started. This is the only cancellation point: a single
    /// expensive generation can overshoot the budget arbitrarily.
    ///
    /// `None` disables time-based termination (the default).
    pub global_timeout: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_generations: 100,
            global_timeout: None,
        }
    }
}

impl RunConfig {
    /// Sets the generation budget.
    pub fn with_target_generations(mut self, n: usize) -> Self {
        self.target_generations = n;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_global_timeout(mut self, timeout: Duration) -> Self {
        self.global_timeout = Some(timeout);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.global_timeout == Some(Duration::ZERO) {
            return Err(EngineError::Configuration(
                "global_timeout must be positive or None".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.target_generations, 100);
        assert!(config.global_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = RunConfig::default()
            .with_target_generations(250)
            .with_global_timeout(Duration::from_millis(500));
        assert_eq!(config.target_generations, 250);
        assert_eq!(config.global_timeout, Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = RunConfig::default().with_global_timeout(Duration::ZERO);
        assert!(matches!(
            config.validate(),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_generations_is_valid() {
        // A zero budget is a legal no-op run, not a configuration error.
        let config = RunConfig::default().with_target_generations(0);
        assert!(config.validate().is_ok());
    }
}
