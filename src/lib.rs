//! Rule-driven assignment engine for weekly meeting programs.
//!
//! Given an ordered program of parts and a roster of participants, the
//! engine staffs each part with a principal (and an assistant where the
//! part requires one) while never booking anyone twice in the same week.
//!
//! - **Rules**: [`rules::RuleCatalog`] maps part types to eligibility rules
//!   (sex constraint, qualification tier, assistant requirement).
//! - **Roster**: [`roster::classify`] partitions participants into ordered
//!   candidate pools.
//! - **Selection**: [`select::Selector`] filters a pool and hands the
//!   choice to a [`select::SelectionStrategy`]; first-fit is the baseline.
//! - **Engine**: [`engine::AssignmentGenerator`] runs the single-pass,
//!   greedy loop and records a compliance snapshot per assignment.
//! - **Ingest**: [`ingest`] turns loosely shaped JSON records into typed
//!   input at the edge.
//!
//! # Architecture
//!
//! The core is synchronous, performs no I/O and keeps no state between
//! calls. Persistence and notification of the generated assignments are
//! the caller's concern.

pub mod engine;
pub mod error;
pub mod ingest;
pub mod model;
pub mod roster;
pub mod rules;
pub mod select;

pub use error::{AssignError, IngestError};
