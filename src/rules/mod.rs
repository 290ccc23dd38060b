//! Eligibility rules and the catalog that maps part types to them.
//!
//! Rules are plain data. A [`RuleCatalog`] is built once and passed by
//! reference into the generator; nothing mutates it at runtime.

mod catalog;
mod types;

pub use catalog::{ResolvedRule, RuleCatalog, RuleVariant};
pub use types::{AssignmentRule, AssistantRelation, Qualification, SexConstraint};
