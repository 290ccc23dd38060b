//! Assignment generation.
//!
//! [`AssignmentGenerator`] walks a [`Program`](crate::model::Program) part by
//! part, resolving each rule from its [`RuleCatalog`](crate::rules::RuleCatalog)
//! and staffing it from a classified roster. The run is greedy and single
//! pass: a part that cannot be staffed is skipped, never backtracked.

mod batch;
mod config;
mod orchestrator;

pub use batch::GenerationJob;
pub use config::{GeneratorConfig, StrategyKind};
pub use orchestrator::{AssignmentGenerator, PartDiagnostic, RunContext, RunOutcome};
