//! Input and output data of the engine.
//!
//! - [`Participant`]: roster member (read-only within a run)
//! - [`Program`] / [`ProgramPart`]: the ordered parts of one week
//! - [`Assignment`]: output record with its [`ComplianceSnapshot`]

mod assignment;
mod participant;
mod program;

pub use assignment::{
    Assignment, AssignmentStatus, ComplianceSnapshot, PartRef, QualificationSummary,
};
pub use participant::{Flag, Participant, ParticipantId, Privilege, Sex};
pub use program::{Program, ProgramPart};
