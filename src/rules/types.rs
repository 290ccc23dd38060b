//! Eligibility rule definitions.

use serde::{Deserialize, Serialize};

use crate::model::{Participant, Sex};

/// Which sexes may take the principal role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SexConstraint {
    MaleOnly,
    Both,
}

impl SexConstraint {
    pub fn admits(self, sex: Sex) -> bool {
        match self {
            SexConstraint::MaleOnly => sex == Sex::Male,
            SexConstraint::Both => true,
        }
    }
}

/// Allowed relationship between assistant and principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantRelation {
    #[default]
    SameSex,
    /// Same sex, or linked to the principal in the family graph.
    SameSexOrFamily,
}

/// A predicate the principal must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualification {
    Publisher,
    /// Male holding the elder or ministerial-servant tag.
    QualifiedMale,
    Elder,
    Baptized,
}

impl Qualification {
    pub fn check(self, p: &Participant) -> bool {
        match self {
            Qualification::Publisher => p.publisher,
            Qualification::QualifiedMale => p.is_qualified_male(),
            Qualification::Elder => p.is_elder(),
            Qualification::Baptized => p.baptized,
        }
    }

    /// Whether this predicate gates on the elder/ministerial-servant tier.
    pub fn is_tier_two(self) -> bool {
        matches!(self, Qualification::QualifiedMale | Qualification::Elder)
    }
}

/// Eligibility rule of one part type.
///
/// # Examples
///
/// ```
/// use u_assign::rules::{AssignmentRule, AssistantRelation, Qualification};
///
/// let rule = AssignmentRule::both(vec![Qualification::Publisher])
///     .with_assistant(AssistantRelation::SameSex);
/// assert!(rule.assistant_required);
/// assert!(!rule.requires_tier_two());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRule {
    pub sex: SexConstraint,
    pub assistant_required: bool,
    pub assistant_relation: AssistantRelation,
    pub qualifications: Vec<Qualification>,
}

impl AssignmentRule {
    /// Male-only rule without assistant.
    pub fn male_only(qualifications: Vec<Qualification>) -> Self {
        Self {
            sex: SexConstraint::MaleOnly,
            assistant_required: false,
            assistant_relation: AssistantRelation::default(),
            qualifications,
        }
    }

    /// Rule open to both sexes, without assistant.
    pub fn both(qualifications: Vec<Qualification>) -> Self {
        Self {
            sex: SexConstraint::Both,
            ..Self::male_only(qualifications)
        }
    }

    /// Requires an assistant with the given relationship.
    pub fn with_assistant(mut self, relation: AssistantRelation) -> Self {
        self.assistant_required = true;
        self.assistant_relation = relation;
        self
    }

    pub fn requires_tier_two(&self) -> bool {
        self.qualifications.iter().any(|q| q.is_tier_two())
    }

    /// Sex constraint and every qualification predicate hold for `p`.
    pub fn admits(&self, p: &Participant) -> bool {
        self.sex.admits(p.sex) && self.qualifications.iter().all(|q| q.check(p))
    }
}
