//! Family links between participants.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::ParticipantId;

/// Symmetric participant → relatives graph.
///
/// Consulted only by the `same_sex_or_family` assistant branch. An empty
/// graph makes that branch behave exactly like `same_sex`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyGraph {
    links: BTreeMap<ParticipantId, BTreeSet<ParticipantId>>,
}

impl FamilyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links two participants in both directions. Self-links are ignored.
    pub fn link(&mut self, a: ParticipantId, b: ParticipantId) {
        if a == b {
            return;
        }
        self.links.entry(a.clone()).or_default().insert(b.clone());
        self.links.entry(b).or_default().insert(a);
    }

    /// Builder form of [`link`](Self::link).
    pub fn with_link(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.link(ParticipantId::new(a), ParticipantId::new(b));
        self
    }

    pub fn are_linked(&self, a: &ParticipantId, b: &ParticipantId) -> bool {
        self.links.get(a).is_some_and(|set| set.contains(b))
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
