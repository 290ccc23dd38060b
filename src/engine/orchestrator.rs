//! Assignment generation loop.
//!
//! # Algorithm
//!
//! 1. Validate the program; an invalid program is the only hard failure
//! 2. Classify the roster once
//! 3. For each part, in program order:
//!    a. Resolve the rule (unknown type → skip part)
//!    b. Select the principal (nobody eligible → skip part)
//!    c. Select the assistant when required (nobody eligible → keep going
//!       without one)
//!    d. Record the assignment and mark its participants as used
//! 4. Return the assignments, possibly fewer than the parts

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::config::{GeneratorConfig, StrategyKind};
use crate::error::AssignError;
use crate::model::{
    Assignment, ComplianceSnapshot, PartRef, Participant, ParticipantId, Program,
    QualificationSummary,
};
use crate::roster::{classify, FamilyGraph};
use crate::rules::RuleCatalog;
use crate::select::{FirstFit, SeededShuffle, SelectionStrategy, Selector};

/// Per-call inputs that are not part of the program or roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    /// Timestamp stamped on every generated assignment.
    pub generated_at: DateTime<Utc>,
    /// Family links for `same_sex_or_family` assistants.
    pub family: FamilyGraph,
}

impl RunContext {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            family: FamilyGraph::new(),
        }
    }

    /// Context stamped with the current wall-clock time.
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    pub fn with_family(mut self, family: FamilyGraph) -> Self {
        self.family = family;
        self
    }
}

/// A condition that affected one part but did not fail the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartDiagnostic {
    /// The part type is not in the catalog; no assignment.
    RuleNotFound { ordinal: u32, part_type: String },
    /// Nobody satisfied the rule; no assignment.
    NoEligiblePrincipal { ordinal: u32, rule_key: String },
    /// The rule wanted an assistant but none was eligible; the assignment
    /// exists without one.
    NoEligibleAssistant {
        ordinal: u32,
        principal: ParticipantId,
    },
}

impl PartDiagnostic {
    pub fn ordinal(&self) -> u32 {
        match self {
            PartDiagnostic::RuleNotFound { ordinal, .. }
            | PartDiagnostic::NoEligiblePrincipal { ordinal, .. }
            | PartDiagnostic::NoEligibleAssistant { ordinal, .. } => *ordinal,
        }
    }

    /// Whether the part ended up without an assignment.
    pub fn is_skip(&self) -> bool {
        !matches!(self, PartDiagnostic::NoEligibleAssistant { .. })
    }
}

/// Assignments of one run plus what went wrong along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub assignments: Vec<Assignment>,
    pub diagnostics: Vec<PartDiagnostic>,
    /// Number of parts in the program.
    pub part_count: usize,
}

impl RunOutcome {
    /// Every part received an assignment.
    pub fn is_complete(&self) -> bool {
        self.assignments.len() == self.part_count
    }

    /// Ordinals of parts that produced no assignment.
    pub fn unstaffed_parts(&self) -> Vec<u32> {
        self.diagnostics
            .iter()
            .filter(|d| d.is_skip())
            .map(PartDiagnostic::ordinal)
            .collect()
    }
}

/// Generates assignments for weekly programs.
///
/// Holds only immutable configuration; every call owns its own exclusion
/// set, so one generator can serve concurrent calls.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use u_assign::engine::{AssignmentGenerator, GeneratorConfig, RunContext};
/// use u_assign::model::{Participant, Program, ProgramPart, Sex};
/// use u_assign::rules::RuleCatalog;
///
/// let generator = AssignmentGenerator::new(RuleCatalog::standard(), GeneratorConfig::default())
///     .unwrap();
/// let program = Program::new(vec![ProgramPart::new(1, "bible_reading", "Bible Reading")]);
/// let roster = vec![Participant::new("1", "Lucas", Sex::Male)];
/// let ctx = RunContext::new(Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap());
///
/// let assignments = generator.generate(&program, &roster, &ctx).unwrap();
/// assert_eq!(assignments.len(), 1);
/// assert_eq!(assignments[0].principal.as_str(), "1");
/// ```
pub struct AssignmentGenerator {
    catalog: RuleCatalog,
    config: GeneratorConfig,
    strategy: Box<dyn SelectionStrategy>,
}

impl AssignmentGenerator {
    /// Creates a generator, rejecting an invalid configuration.
    pub fn new(catalog: RuleCatalog, config: GeneratorConfig) -> Result<Self, AssignError> {
        config.validate().map_err(AssignError::Config)?;
        let strategy: Box<dyn SelectionStrategy> = match (config.strategy, config.seed) {
            (StrategyKind::SeededShuffle, Some(seed)) => Box::new(SeededShuffle::new(seed)),
            _ => Box::new(FirstFit),
        };
        Ok(Self {
            catalog,
            config,
            strategy,
        })
    }

    /// Replaces the built-in strategy with a custom one.
    pub fn with_strategy(mut self, strategy: Box<dyn SelectionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates assignments for `program` from `roster`.
    ///
    /// Only an invalid program is an error. Parts that cannot be staffed
    /// are left out; compare the result length with the part count to
    /// detect an incomplete week.
    pub fn generate(
        &self,
        program: &Program,
        roster: &[Participant],
        ctx: &RunContext,
    ) -> Result<Vec<Assignment>, AssignError> {
        self.generate_with_report(program, roster, ctx)
            .map(|outcome| outcome.assignments)
    }

    /// Like [`generate`](Self::generate), also returning per-part diagnostics.
    pub fn generate_with_report(
        &self,
        program: &Program,
        roster: &[Participant],
        ctx: &RunContext,
    ) -> Result<RunOutcome, AssignError> {
        program.validate().map_err(AssignError::InvalidInput)?;

        let buckets = classify(roster);
        let selector = Selector::new(self.strategy.as_ref());
        let mut used: HashSet<ParticipantId> = HashSet::new();
        let mut assignments = Vec::with_capacity(program.parts.len());
        let mut diagnostics = Vec::new();

        for part in &program.parts {
            let Some(resolved) = self.catalog.resolve(part) else {
                warn!(
                    ordinal = part.ordinal,
                    part_type = %part.part_type,
                    "no rule for part type; skipping part"
                );
                diagnostics.push(PartDiagnostic::RuleNotFound {
                    ordinal: part.ordinal,
                    part_type: part.part_type.clone(),
                });
                continue;
            };
            let rule = resolved.rule;

            let Some(principal) =
                selector.select_principal(rule, &buckets, &used, part.ordinal)
            else {
                warn!(
                    ordinal = part.ordinal,
                    rule = resolved.key,
                    "no eligible principal; skipping part"
                );
                diagnostics.push(PartDiagnostic::NoEligiblePrincipal {
                    ordinal: part.ordinal,
                    rule_key: resolved.key.to_owned(),
                });
                continue;
            };

            let assistant = if rule.assistant_required {
                let picked = selector.select_assistant(
                    rule,
                    &buckets,
                    principal,
                    &used,
                    &ctx.family,
                    part.ordinal,
                );
                if picked.is_none() {
                    warn!(
                        ordinal = part.ordinal,
                        principal = %principal.id,
                        "no eligible assistant; assigning without one"
                    );
                    diagnostics.push(PartDiagnostic::NoEligibleAssistant {
                        ordinal: part.ordinal,
                        principal: principal.id.clone(),
                    });
                }
                picked
            } else {
                None
            };

            debug!(
                ordinal = part.ordinal,
                rule = resolved.key,
                principal = %principal.id,
                assistant = ?assistant.map(|a| a.id.as_str()),
                "part assigned"
            );

            used.insert(principal.id.clone());
            if let Some(a) = assistant {
                used.insert(a.id.clone());
            }

            assignments.push(Assignment {
                part: PartRef::from(part),
                principal: principal.id.clone(),
                assistant: assistant.map(|a| a.id.clone()),
                status: self.config.initial_status,
                created_at: ctx.generated_at,
                compliance: ComplianceSnapshot {
                    rule_key: resolved.key.to_owned(),
                    variant: resolved.variant,
                    rule: rule.clone(),
                    principal: QualificationSummary::from(principal),
                    assistant: assistant.map(QualificationSummary::from),
                    assistant_missing: rule.assistant_required && assistant.is_none(),
                    strategy: selector.strategy_name().to_owned(),
                },
            });
        }

        info!(
            assigned = assignments.len(),
            parts = program.parts.len(),
            roster = roster.len(),
            "assignment run finished"
        );

        Ok(RunOutcome {
            assignments,
            diagnostics,
            part_count: program.parts.len(),
        })
    }
}
