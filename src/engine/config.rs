//! Generator configuration.
//!
//! [`GeneratorConfig`] picks the selection strategy and the status stamped
//! on generated assignments.

use crate::model::AssignmentStatus;

/// Built-in selection strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// First eligible candidate in roster order.
    #[default]
    FirstFit,
    /// Seeded uniform pick among eligible candidates. Requires a seed.
    SeededShuffle,
}

/// Configuration for [`AssignmentGenerator`](super::AssignmentGenerator).
///
/// # Defaults
///
/// ```
/// use u_assign::engine::{GeneratorConfig, StrategyKind};
/// use u_assign::model::AssignmentStatus;
///
/// let config = GeneratorConfig::default();
/// assert_eq!(config.strategy, StrategyKind::FirstFit);
/// assert_eq!(config.initial_status, AssignmentStatus::Proposed);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_assign::engine::{GeneratorConfig, StrategyKind};
///
/// let config = GeneratorConfig::default()
///     .with_strategy(StrategyKind::SeededShuffle)
///     .with_seed(2024);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratorConfig {
    pub strategy: StrategyKind,

    /// Seed for [`StrategyKind::SeededShuffle`]. Ignored by first-fit.
    pub seed: Option<u64>,

    /// Status given to every generated assignment.
    pub initial_status: AssignmentStatus,
}

impl GeneratorConfig {
    /// Sets the selection strategy.
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the seed for seeded strategies.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the status of generated assignments.
    pub fn with_initial_status(mut self, status: AssignmentStatus) -> Self {
        self.initial_status = status;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.strategy == StrategyKind::SeededShuffle && self.seed.is_none() {
            return Err("seeded_shuffle strategy requires a seed".into());
        }
        if self.initial_status == AssignmentStatus::Cancelled {
            return Err("initial_status cannot be cancelled".into());
        }
        Ok(())
    }
}
