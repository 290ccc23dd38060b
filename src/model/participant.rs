//! Roster members.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a participant, as issued by the roster store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Declared sex of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Normalizes a raw sex token.
    ///
    /// Accepts the canonical (`male`/`female`) and localized
    /// (`masculino`/`feminino`) spellings, case-insensitively. Anything else
    /// maps to [`Sex::Male`] with `recognized = false` so the caller can log it.
    pub fn from_token(token: &str) -> (Self, bool) {
        match token.trim().to_lowercase().as_str() {
            "male" | "masculino" => (Sex::Male, true),
            "female" | "feminino" => (Sex::Female, true),
            _ => (Sex::Male, false),
        }
    }
}

/// Congregation privilege held by a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privilege {
    Elder,
    MinisterialServant,
}

impl Privilege {
    /// Parses a privilege tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "elder" | "anciao" | "ancião" => Some(Privilege::Elder),
            "ministerial_servant" | "servo_ministerial" => Some(Privilege::MinisterialServant),
            _ => None,
        }
    }
}

/// Tri-state boolean used for roster flags whose value may be missing.
///
/// Only the ingestion boundary deals in `Flag`; it is resolved to a plain
/// `bool` before a [`Participant`] is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    #[default]
    Unknown,
    Yes,
    No,
}

impl From<Option<bool>> for Flag {
    fn from(v: Option<bool>) -> Self {
        match v {
            Some(true) => Flag::Yes,
            Some(false) => Flag::No,
            None => Flag::Unknown,
        }
    }
}

/// A member of the roster. Read-only for the duration of a run.
///
/// # Examples
///
/// ```
/// use u_assign::model::{Participant, Privilege, Sex};
///
/// let p = Participant::new("p1", "João", Sex::Male).with_privilege(Privilege::Elder);
/// assert!(p.is_qualified_male());
/// assert!(p.publisher);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub sex: Sex,
    #[serde(default)]
    pub privileges: BTreeSet<Privilege>,
    pub publisher: bool,
    pub baptized: bool,
}

impl Participant {
    /// Creates a baptized publisher with no privileges.
    pub fn new(id: impl Into<String>, name: impl Into<String>, sex: Sex) -> Self {
        Self {
            id: ParticipantId::new(id),
            name: name.into(),
            sex,
            privileges: BTreeSet::new(),
            publisher: true,
            baptized: true,
        }
    }

    /// Adds a privilege tag.
    pub fn with_privilege(mut self, privilege: Privilege) -> Self {
        self.privileges.insert(privilege);
        self
    }

    /// Sets the publisher flag.
    pub fn with_publisher(mut self, publisher: bool) -> Self {
        self.publisher = publisher;
        self
    }

    /// Sets the baptized flag.
    pub fn with_baptized(mut self, baptized: bool) -> Self {
        self.baptized = baptized;
        self
    }

    /// Whether the declared sex is male.
    pub fn is_male(&self) -> bool {
        self.sex == Sex::Male
    }

    /// Whether the participant holds the elder tag.
    pub fn is_elder(&self) -> bool {
        self.privileges.contains(&Privilege::Elder)
    }

    /// Whether the participant holds the ministerial-servant tag.
    pub fn is_ministerial_servant(&self) -> bool {
        self.privileges.contains(&Privilege::MinisterialServant)
    }

    /// Male holding either the elder or the ministerial-servant tag.
    pub fn is_qualified_male(&self) -> bool {
        self.is_male() && (self.is_elder() || self.is_ministerial_servant())
    }
}
