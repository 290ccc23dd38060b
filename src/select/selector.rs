//! Principal and assistant selection.

use std::collections::HashSet;

use super::strategy::{PickContext, Role, SelectionStrategy};
use crate::model::{Participant, ParticipantId};
use crate::roster::{Buckets, FamilyGraph};
use crate::rules::{AssignmentRule, AssistantRelation, SexConstraint};

/// Builds candidate pools for a rule and delegates the final choice to a
/// [`SelectionStrategy`].
pub struct Selector<'s> {
    strategy: &'s dyn SelectionStrategy,
}

impl<'s> Selector<'s> {
    pub fn new(strategy: &'s dyn SelectionStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Candidates eligible as principal, in pool order.
    ///
    /// Pool: `qualified_males` for tier-two rules, `male_publishers` for
    /// other male-only rules, males then females otherwise. Used
    /// participants and anyone the rule does not admit are dropped.
    pub fn principal_candidates<'a>(
        rule: &AssignmentRule,
        buckets: &Buckets<'a>,
        used: &HashSet<ParticipantId>,
    ) -> Vec<&'a Participant> {
        let pool: Vec<&'a Participant> = if rule.requires_tier_two() {
            buckets.qualified_males.clone()
        } else {
            match rule.sex {
                SexConstraint::MaleOnly => buckets.male_publishers.clone(),
                SexConstraint::Both => buckets
                    .male_publishers
                    .iter()
                    .chain(buckets.female_publishers.iter())
                    .copied()
                    .collect(),
            }
        };

        pool.into_iter()
            .filter(|p| !used.contains(&p.id))
            .filter(|p| rule.admits(p))
            .collect()
    }

    /// Candidates eligible as assistant to `principal`, in pool order.
    ///
    /// Same-sex publishers first; for `same_sex_or_family`, publishers of
    /// the other sex linked to the principal follow. Qualified males are
    /// never assistants, on either branch.
    pub fn assistant_candidates<'a>(
        rule: &AssignmentRule,
        buckets: &Buckets<'a>,
        principal: &Participant,
        used: &HashSet<ParticipantId>,
        family: &FamilyGraph,
    ) -> Vec<&'a Participant> {
        let available = |p: &Participant| p.id != principal.id && !used.contains(&p.id);

        let mut pool: Vec<&'a Participant> = buckets
            .publishers_of(principal.sex)
            .iter()
            .filter(|p| available(**p))
            .copied()
            .collect();

        if rule.assistant_relation == AssistantRelation::SameSexOrFamily && !family.is_empty() {
            pool.extend(
                buckets
                    .all
                    .iter()
                    .filter(|p| available(**p))
                    .filter(|p| p.sex != principal.sex && p.publisher && !p.is_qualified_male())
                    .filter(|p| family.are_linked(&principal.id, &p.id))
                    .copied(),
            );
        }

        pool
    }

    /// Picks the principal for a part, or `None` if no one is eligible.
    pub fn select_principal<'a>(
        &self,
        rule: &AssignmentRule,
        buckets: &Buckets<'a>,
        used: &HashSet<ParticipantId>,
        part_ordinal: u32,
    ) -> Option<&'a Participant> {
        let candidates = Self::principal_candidates(rule, buckets, used);
        let ctx = PickContext {
            part_ordinal,
            role: Role::Principal,
        };
        self.strategy
            .pick(&candidates, &ctx)
            .and_then(|i| candidates.get(i).copied())
    }

    /// Picks an assistant for `principal`, or `None` if the pool is empty.
    pub fn select_assistant<'a>(
        &self,
        rule: &AssignmentRule,
        buckets: &Buckets<'a>,
        principal: &Participant,
        used: &HashSet<ParticipantId>,
        family: &FamilyGraph,
        part_ordinal: u32,
    ) -> Option<&'a Participant> {
        let candidates = Self::assistant_candidates(rule, buckets, principal, used, family);
        let ctx = PickContext {
            part_ordinal,
            role: Role::Assistant,
        };
        self.strategy
            .pick(&candidates, &ctx)
            .and_then(|i| candidates.get(i).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Privilege, Sex};
    use crate::roster::classify;
    use crate::rules::Qualification;
    use crate::select::FirstFit;

    fn roster() -> Vec<Participant> {
        vec![
            Participant::new("m1", "M1", Sex::Male),
            Participant::new("f1", "F1", Sex::Female),
            Participant::new("e1", "E1", Sex::Male).with_privilege(Privilege::Elder),
            Participant::new("s1", "S1", Sex::Male).with_privilege(Privilege::MinisterialServant),
            Participant::new("m2", "M2", Sex::Male),
            Participant::new("f2", "F2", Sex::Female),
        ]
    }

    fn used(ids: &[&str]) -> HashSet<ParticipantId> {
        ids.iter().map(|s| ParticipantId::new(*s)).collect()
    }

    #[test]
    fn test_principal_male_only() {
        let roster = roster();
        let b = classify(&roster);
        let sel = Selector::new(&FirstFit);
        let rule = AssignmentRule::male_only(vec![Qualification::Publisher]);

        let p = sel.select_principal(&rule, &b, &used(&[]), 1).unwrap();
        assert_eq!(p.id.as_str(), "m1");

        let p = sel.select_principal(&rule, &b, &used(&["m1"]), 1).unwrap();
        assert_eq!(p.id.as_str(), "m2");

        assert!(sel.select_principal(&rule, &b, &used(&["m1", "m2"]), 1).is_none());
    }

    #[test]
    fn test_principal_tier_two() {
        let roster = roster();
        let b = classify(&roster);
        let sel = Selector::new(&FirstFit);

        let talk = AssignmentRule::male_only(vec![Qualification::QualifiedMale]);
        assert_eq!(sel.select_principal(&talk, &b, &used(&[]), 1).unwrap().id.as_str(), "e1");
        assert_eq!(
            sel.select_principal(&talk, &b, &used(&["e1"]), 1).unwrap().id.as_str(),
            "s1"
        );

        let elder_only = AssignmentRule::male_only(vec![Qualification::Elder]);
        assert!(sel.select_principal(&elder_only, &b, &used(&["e1"]), 1).is_none());
    }

    #[test]
    fn test_principal_both_males_first() {
        let roster = roster();
        let b = classify(&roster);
        let rule = AssignmentRule::both(vec![Qualification::Publisher]);
        let ids: Vec<&str> = Selector::principal_candidates(&rule, &b, &used(&[]))
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["m1", "m2", "f1", "f2"]);
    }

    #[test]
    fn test_principal_predicate_filters_pool() {
        let roster = vec![
            Participant::new("f1", "F1", Sex::Female).with_baptized(false),
            Participant::new("f2", "F2", Sex::Female),
        ];
        let b = classify(&roster);
        let rule = AssignmentRule::both(vec![Qualification::Baptized]);
        let p = Selector::new(&FirstFit)
            .select_principal(&rule, &b, &used(&[]), 1)
            .unwrap();
        assert_eq!(p.id.as_str(), "f2");
    }

    #[test]
    fn test_assistant_same_sex() {
        let roster = roster();
        let b = classify(&roster);
        let sel = Selector::new(&FirstFit);
        let rule = AssignmentRule::both(vec![Qualification::Publisher])
            .with_assistant(AssistantRelation::SameSex);

        let f1 = &roster[1];
        let a = sel
            .select_assistant(&rule, &b, f1, &used(&["f1"]), &FamilyGraph::new(), 2)
            .unwrap();
        assert_eq!(a.id.as_str(), "f2");

        // Principal is excluded even when not yet marked used.
        let a = sel
            .select_assistant(&rule, &b, f1, &used(&[]), &FamilyGraph::new(), 2)
            .unwrap();
        assert_eq!(a.id.as_str(), "f2");

        assert!(sel
            .select_assistant(&rule, &b, f1, &used(&["f1", "f2"]), &FamilyGraph::new(), 2)
            .is_none());
    }

    #[test]
    fn test_assistant_family_branch() {
        let roster = roster();
        let b = classify(&roster);
        let sel = Selector::new(&FirstFit);
        let family = FamilyGraph::new().with_link("f1", "m2");
        let f1 = &roster[1];
        let used = used(&["f1", "f2"]);

        let rule = AssignmentRule::both(vec![Qualification::Publisher])
            .with_assistant(AssistantRelation::SameSexOrFamily);
        let a = sel.select_assistant(&rule, &b, f1, &used, &family, 2).unwrap();
        assert_eq!(a.id.as_str(), "m2");

        // Plain same-sex rules ignore the graph.
        let rule = AssignmentRule::both(vec![Qualification::Publisher])
            .with_assistant(AssistantRelation::SameSex);
        assert!(sel.select_assistant(&rule, &b, f1, &used, &family, 2).is_none());
    }

    #[test]
    fn test_assistant_family_after_same_sex() {
        let roster = roster();
        let b = classify(&roster);
        let family = FamilyGraph::new().with_link("f1", "m1");
        let rule = AssignmentRule::both(vec![Qualification::Publisher])
            .with_assistant(AssistantRelation::SameSexOrFamily);
        let ids: Vec<&str> =
            Selector::assistant_candidates(&rule, &b, &roster[1], &used(&[]), &family)
                .iter()
                .map(|p| p.id.as_str())
                .collect();
        assert_eq!(ids, vec!["f2", "m1"]);
    }

    #[test]
    fn test_assistant_family_skips_qualified_males() {
        let roster = roster();
        let b = classify(&roster);
        let sel = Selector::new(&FirstFit);
        let family = FamilyGraph::new().with_link("f1", "e1").with_link("f1", "s1");
        let rule = AssignmentRule::both(vec![Qualification::Publisher])
            .with_assistant(AssistantRelation::SameSexOrFamily);

        let a = sel.select_assistant(&rule, &b, &roster[1], &used(&["f2"]), &family, 2);
        assert!(a.is_none());
    }
}
