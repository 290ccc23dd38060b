//! Generated assignments and their audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::participant::{Participant, ParticipantId, Sex};
use super::program::ProgramPart;
use crate::rules::{AssignmentRule, RuleVariant};

/// Lifecycle tag of an assignment. The engine only ever emits the
/// configured initial status; later transitions belong to the persistence
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Proposed,
    Confirmed,
    Completed,
    Cancelled,
}

/// Reference to the part an assignment covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRef {
    pub ordinal: u32,
    pub part_type: String,
    pub title: String,
}

impl From<&ProgramPart> for PartRef {
    fn from(part: &ProgramPart) -> Self {
        Self {
            ordinal: part.ordinal,
            part_type: part.part_type.clone(),
            title: part.title.clone(),
        }
    }
}

/// Qualification facts about a participant at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationSummary {
    pub participant_id: ParticipantId,
    pub sex: Sex,
    pub publisher: bool,
    pub baptized: bool,
    pub elder: bool,
    pub ministerial_servant: bool,
}

impl From<&Participant> for QualificationSummary {
    fn from(p: &Participant) -> Self {
        Self {
            participant_id: p.id.clone(),
            sex: p.sex,
            publisher: p.publisher,
            baptized: p.baptized,
            elder: p.is_elder(),
            ministerial_servant: p.is_ministerial_servant(),
        }
    }
}

/// Which rule was applied and who satisfied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSnapshot {
    /// Catalog key the rule was resolved from.
    pub rule_key: String,
    /// Sub-variant chosen for ambiguous part types.
    pub variant: Option<RuleVariant>,
    pub rule: AssignmentRule,
    pub principal: QualificationSummary,
    pub assistant: Option<QualificationSummary>,
    /// Set when the rule required an assistant and none was eligible.
    pub assistant_missing: bool,
    /// Name of the selection strategy that made the picks.
    pub strategy: String,
}

/// A participant (and optional assistant) bound to one part.
///
/// Never mutated after creation; a correction is a new assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub part: PartRef,
    pub principal: ParticipantId,
    pub assistant: Option<ParticipantId>,
    pub status: AssignmentStatus,
    pub created_at: DateTime<Utc>,
    pub compliance: ComplianceSnapshot,
}

impl Assignment {
    /// Ids occupying this assignment, principal first.
    pub fn participant_ids(&self) -> impl Iterator<Item = &ParticipantId> {
        std::iter::once(&self.principal).chain(self.assistant.iter())
    }
}
