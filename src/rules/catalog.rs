//! Part-type → rule lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{AssignmentRule, AssistantRelation, Qualification};
use crate::model::ProgramPart;

/// Sub-variant of an ambiguous part type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleVariant {
    Talk,
    Demonstration,
}

/// One catalog entry.
#[derive(Debug, Clone)]
enum Entry {
    Fixed(AssignmentRule),
    /// A type that is either a talk or a demonstration, decided by keywords
    /// in the part's instructions.
    Variant {
        title_markers: Vec<String>,
        talk_keywords: Vec<String>,
        demonstration_keywords: Vec<String>,
        talk: AssignmentRule,
        demonstration: AssignmentRule,
    },
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRule<'a> {
    /// Catalog key the rule came from.
    pub key: &'a str,
    pub variant: Option<RuleVariant>,
    pub rule: &'a AssignmentRule,
}

/// Immutable table of eligibility rules, keyed by part type.
///
/// The catalog is a value: build one with [`RuleCatalog::standard`] or
/// assemble a custom one and hand it to the generator.
///
/// # Examples
///
/// ```
/// use u_assign::rules::{AssignmentRule, Qualification, RuleCatalog, RuleVariant};
///
/// let catalog = RuleCatalog::standard();
/// let resolved = catalog
///     .lookup("explaining_beliefs", Some("Give a talk on ..."))
///     .unwrap();
/// assert_eq!(resolved.variant, Some(RuleVariant::Talk));
///
/// let custom = RuleCatalog::new()
///     .with_rule("reading", AssignmentRule::male_only(vec![Qualification::Publisher]));
/// assert!(custom.lookup("reading", None).is_some());
/// assert!(custom.lookup("talk", None).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    entries: BTreeMap<String, Entry>,
}

impl RuleCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The midweek meeting rule set.
    pub fn standard() -> Self {
        use AssistantRelation::{SameSex, SameSexOrFamily};
        use Qualification::{Elder, Publisher, QualifiedMale};

        let qualified_talk = || AssignmentRule::male_only(vec![QualifiedMale]);
        let demonstration =
            || AssignmentRule::both(vec![Publisher]).with_assistant(SameSexOrFamily);

        Self::new()
            .with_rule("treasures_talk", qualified_talk())
            .with_rule("spiritual_gems", qualified_talk())
            .with_rule("bible_reading", AssignmentRule::male_only(vec![Publisher]))
            .with_rule("starting", demonstration())
            .with_rule("following_up", demonstration())
            .with_rule("making_disciples", demonstration())
            .with_rule("talk", qualified_talk())
            .with_variant(
                "explaining_beliefs",
                &["beliefs", "crenças"],
                &["talk", "discurso"],
                &["demonstration", "demonstração"],
                qualified_talk(),
                AssignmentRule::both(vec![Publisher]).with_assistant(SameSex),
            )
            .with_rule("living_part", qualified_talk())
            .with_rule("local_needs", AssignmentRule::male_only(vec![Elder]))
            .with_rule(
                "congregation_bible_study",
                AssignmentRule::male_only(vec![Elder]),
            )
    }

    /// Adds (or replaces) a fixed rule.
    pub fn with_rule(mut self, part_type: impl Into<String>, rule: AssignmentRule) -> Self {
        self.entries.insert(part_type.into(), Entry::Fixed(rule));
        self
    }

    /// Adds (or replaces) an ambiguous type with talk/demonstration variants.
    ///
    /// `title_markers` let a part whose type is not in the catalog still
    /// resolve to this entry when its title mentions one of them.
    /// Keywords are matched as whole words of the instructions. A
    /// demonstration keyword wins over a talk keyword, since demonstration
    /// instructions often mention talking; with neither present the
    /// demonstration variant applies.
    pub fn with_variant(
        mut self,
        part_type: impl Into<String>,
        title_markers: &[&str],
        talk_keywords: &[&str],
        demonstration_keywords: &[&str],
        talk: AssignmentRule,
        demonstration: AssignmentRule,
    ) -> Self {
        self.entries.insert(
            part_type.into(),
            Entry::Variant {
                title_markers: lowercased(title_markers),
                talk_keywords: lowercased(talk_keywords),
                demonstration_keywords: lowercased(demonstration_keywords),
                talk,
                demonstration,
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the rule for a part type, using `instructions` to pick a
    /// variant when the type is ambiguous. `None` means "unknown type".
    pub fn lookup(&self, part_type: &str, instructions: Option<&str>) -> Option<ResolvedRule<'_>> {
        let (key, entry) = self.entries.get_key_value(part_type)?;
        Some(Self::resolve_entry(key, entry, instructions))
    }

    /// Resolves the rule for a program part.
    ///
    /// Direct lookup by type first; failing that, an ambiguous entry whose
    /// title marker appears in the part title.
    pub fn resolve(&self, part: &ProgramPart) -> Option<ResolvedRule<'_>> {
        let instructions = part.instructions.as_deref();
        if let Some(found) = self.lookup(&part.part_type, instructions) {
            return Some(found);
        }

        let title = part.title.to_lowercase();
        self.entries
            .iter()
            .find(|(_, entry)| match entry {
                Entry::Variant { title_markers, .. } => {
                    title_markers.iter().any(|m| title.contains(m.as_str()))
                }
                Entry::Fixed(_) => false,
            })
            .map(|(key, entry)| Self::resolve_entry(key, entry, instructions))
    }

    fn resolve_entry<'a>(
        key: &'a str,
        entry: &'a Entry,
        instructions: Option<&str>,
    ) -> ResolvedRule<'a> {
        match entry {
            Entry::Fixed(rule) => ResolvedRule {
                key,
                variant: None,
                rule,
            },
            Entry::Variant {
                talk_keywords,
                demonstration_keywords,
                talk,
                demonstration,
                ..
            } => {
                let text = instructions.unwrap_or_default().to_lowercase();
                let words: Vec<&str> = text
                    .split(|c: char| !c.is_alphanumeric())
                    .filter(|w| !w.is_empty())
                    .collect();
                let mentions =
                    |keys: &[String]| keys.iter().any(|k| words.contains(&k.as_str()));
                let is_talk = !mentions(demonstration_keywords) && mentions(talk_keywords);
                if is_talk {
                    ResolvedRule {
                        key,
                        variant: Some(RuleVariant::Talk),
                        rule: talk,
                    }
                } else {
                    ResolvedRule {
                        key,
                        variant: Some(RuleVariant::Demonstration),
                        rule: demonstration,
                    }
                }
            }
        }
    }
}

fn lowercased(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::SexConstraint;

    #[test]
    fn test_direct_lookup() {
        let catalog = RuleCatalog::standard();
        let r = catalog.lookup("bible_reading", None).unwrap();
        assert_eq!(r.key, "bible_reading");
        assert_eq!(r.variant, None);
        assert_eq!(r.rule.sex, SexConstraint::MaleOnly);
        assert!(!r.rule.assistant_required);
    }

    #[test]
    fn test_unknown_type() {
        let catalog = RuleCatalog::standard();
        assert!(catalog.lookup("karaoke", None).is_none());
    }

    #[test]
    fn test_beliefs_talk_variant() {
        let catalog = RuleCatalog::standard();
        let r = catalog
            .lookup("explaining_beliefs", Some("Discurso. Use o brochura ..."))
            .unwrap();
        assert_eq!(r.variant, Some(RuleVariant::Talk));
        assert_eq!(r.rule.sex, SexConstraint::MaleOnly);
        assert!(!r.rule.assistant_required);
        assert!(r.rule.requires_tier_two());
    }

    #[test]
    fn test_beliefs_demonstration_variant() {
        let catalog = RuleCatalog::standard();
        let r = catalog
            .lookup("explaining_beliefs", Some("Demonstration. Ask a question"))
            .unwrap();
        assert_eq!(r.variant, Some(RuleVariant::Demonstration));
        assert_eq!(r.rule.sex, SexConstraint::Both);
        assert!(r.rule.assistant_required);

        // No instructions at all falls back to the demonstration shape.
        let r = catalog.lookup("explaining_beliefs", None).unwrap();
        assert_eq!(r.variant, Some(RuleVariant::Demonstration));
    }

    #[test]
    fn test_beliefs_demonstration_mentioning_talk() {
        let catalog = RuleCatalog::standard();
        for text in [
            "Demonstration. Start a conversation and talk about the hope",
            "Demonstração. Não fazer um discurso.",
        ] {
            let r = catalog.lookup("explaining_beliefs", Some(text)).unwrap();
            assert_eq!(r.variant, Some(RuleVariant::Demonstration), "{text}");
            assert_eq!(r.rule.sex, SexConstraint::Both);
        }
    }

    #[test]
    fn test_beliefs_keywords_match_whole_words() {
        let catalog = RuleCatalog::standard();
        let r = catalog
            .lookup("explaining_beliefs", Some("Keep talking with the householder"))
            .unwrap();
        assert_eq!(r.variant, Some(RuleVariant::Demonstration));

        let r = catalog
            .lookup("explaining_beliefs", Some("Discurso: lição 3"))
            .unwrap();
        assert_eq!(r.variant, Some(RuleVariant::Talk));
    }

    #[test]
    fn test_resolve_by_title_marker() {
        let catalog = RuleCatalog::standard();
        let part = ProgramPart::new(5, "student_part", "Explaining Your Beliefs")
            .with_instructions("Talk. th study 14");
        let r = catalog.resolve(&part).unwrap();
        assert_eq!(r.key, "explaining_beliefs");
        assert_eq!(r.variant, Some(RuleVariant::Talk));
    }

    #[test]
    fn test_resolve_prefers_direct_type() {
        let catalog = RuleCatalog::standard();
        let part = ProgramPart::new(1, "bible_reading", "Beliefs in Genesis");
        assert_eq!(catalog.resolve(&part).unwrap().key, "bible_reading");
    }

    #[test]
    fn test_custom_catalog_replaces_rule() {
        let catalog = RuleCatalog::standard()
            .with_rule("talk", AssignmentRule::both(vec![Qualification::Publisher]));
        let r = catalog.lookup("talk", None).unwrap();
        assert_eq!(r.rule.sex, SexConstraint::Both);
        assert_eq!(catalog.len(), RuleCatalog::standard().len());
    }
}
