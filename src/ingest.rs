//! Typed ingestion boundary for loosely shaped roster and program records.
//!
//! Records arrive as JSON from the roster and program providers. They are
//! parsed here, once, into model types; the engine never inspects raw
//! records. Missing tri-state flags are resolved by an explicit
//! [`UnknownFlagPolicy`] instead of an implicit default.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{AssignError, IngestError};
use crate::model::{Flag, Participant, ParticipantId, Privilege, Program, ProgramPart, Sex};

/// How to resolve a flag that is absent from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownFlagPolicy {
    AssumeYes,
    AssumeNo,
    /// Reject the record.
    Reject,
}

impl UnknownFlagPolicy {
    fn resolve(self, flag: Flag, index: usize, field: &'static str) -> Result<bool, IngestError> {
        match (flag, self) {
            (Flag::Yes, _) => Ok(true),
            (Flag::No, _) => Ok(false),
            (Flag::Unknown, UnknownFlagPolicy::AssumeYes) => Ok(true),
            (Flag::Unknown, UnknownFlagPolicy::AssumeNo) => Ok(false),
            (Flag::Unknown, UnknownFlagPolicy::Reject) => {
                Err(IngestError::UnresolvedFlag { index, field })
            }
        }
    }
}

/// Ingestion settings.
///
/// # Examples
///
/// ```
/// use u_assign::ingest::{IngestConfig, UnknownFlagPolicy};
///
/// let config = IngestConfig::default()
///     .with_unknown_publisher(UnknownFlagPolicy::Reject)
///     .with_strict_records(true);
/// assert_eq!(config.unknown_baptized, UnknownFlagPolicy::AssumeNo);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Resolution of a missing `publisher` flag.
    pub unknown_publisher: UnknownFlagPolicy,
    /// Resolution of a missing `baptized` flag.
    pub unknown_baptized: UnknownFlagPolicy,
    /// Fail on a malformed roster record instead of skipping it.
    pub strict_records: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            unknown_publisher: UnknownFlagPolicy::AssumeYes,
            unknown_baptized: UnknownFlagPolicy::AssumeNo,
            strict_records: false,
        }
    }
}

impl IngestConfig {
    /// Sets the policy for a missing publisher flag.
    pub fn with_unknown_publisher(mut self, policy: UnknownFlagPolicy) -> Self {
        self.unknown_publisher = policy;
        self
    }

    /// Sets the policy for a missing baptized flag.
    pub fn with_unknown_baptized(mut self, policy: UnknownFlagPolicy) -> Self {
        self.unknown_baptized = policy;
        self
    }

    /// Sets whether a malformed roster record fails the call instead of
    /// being skipped.
    pub fn with_strict_records(mut self, strict: bool) -> Self {
        self.strict_records = strict;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

#[derive(Deserialize)]
struct RawParticipant {
    id: RawId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    sex: Option<String>,
    #[serde(default)]
    privileges: Vec<String>,
    #[serde(default)]
    publisher: Option<bool>,
    #[serde(default)]
    baptized: Option<bool>,
}

#[derive(Deserialize)]
struct RawPart {
    #[serde(default)]
    ordinal: Option<u32>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration_minutes: Option<u32>,
    part_type: String,
    #[serde(default)]
    instructions: Option<String>,
}

/// Parses a roster.
///
/// A value that is not an array is an empty roster. Malformed records are
/// skipped with a warning, or fail the call when `strict_records` is set.
pub fn parse_roster(value: &Value, config: &IngestConfig) -> Result<Vec<Participant>, IngestError> {
    let Some(records) = value.as_array() else {
        warn!("roster is not a list; treating as empty");
        return Ok(Vec::new());
    };

    let mut roster = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match parse_participant(index, record, config) {
            Ok(p) => roster.push(p),
            Err(err) if !config.strict_records => {
                warn!(index, error = %err, "skipping roster record");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(roster)
}

/// Parses a roster from JSON text.
pub fn parse_roster_str(text: &str, config: &IngestConfig) -> Result<Vec<Participant>, IngestError> {
    let value: Value = serde_json::from_str(text)?;
    parse_roster(&value, config)
}

fn parse_participant(
    index: usize,
    record: &Value,
    config: &IngestConfig,
) -> Result<Participant, IngestError> {
    if !record.is_object() {
        return Err(IngestError::NotAnObject { index });
    }
    let raw = RawParticipant::deserialize(record).map_err(|e| IngestError::Malformed {
        index,
        reason: e.to_string(),
    })?;

    let id = match raw.id {
        RawId::Text(s) if !s.trim().is_empty() => s,
        RawId::Text(_) => {
            return Err(IngestError::Malformed {
                index,
                reason: "empty id".into(),
            })
        }
        RawId::Number(n) => n.to_string(),
    };

    let token = raw.sex.unwrap_or_default();
    let (sex, recognized) = Sex::from_token(&token);
    if !recognized {
        warn!(index, id = %id, token = %token, "unrecognized sex; treating as male");
    }

    let privileges = raw
        .privileges
        .iter()
        .filter_map(|tag| Privilege::from_tag(tag))
        .collect();

    Ok(Participant {
        id: ParticipantId(id),
        name: raw.name.unwrap_or_default(),
        sex,
        privileges,
        publisher: config
            .unknown_publisher
            .resolve(raw.publisher.into(), index, "publisher")?,
        baptized: config
            .unknown_baptized
            .resolve(raw.baptized.into(), index, "baptized")?,
    })
}

/// Parses a program.
///
/// The value must be an object whose `parts` field is a list of part
/// records; anything else is `invalid_input`. Parts without an ordinal get
/// their 1-based list position.
pub fn parse_program(value: &Value) -> Result<Program, AssignError> {
    let parts = value
        .get("parts")
        .and_then(Value::as_array)
        .ok_or_else(|| AssignError::InvalidInput("program parts must be a list".into()))?;

    let week_of = match value.get("week_of") {
        None | Some(Value::Null) => None,
        Some(v) => Some(
            v.as_str()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| AssignError::InvalidInput("week_of must be YYYY-MM-DD".into()))?,
        ),
    };

    let parts = parts
        .iter()
        .enumerate()
        .map(|(index, record)| parse_part(index, record))
        .collect::<Result<Vec<_>, _>>()
        .map_err(IngestError::into_invalid_input)?;

    let program = Program { week_of, parts };
    program.validate().map_err(AssignError::InvalidInput)?;
    Ok(program)
}

/// Parses a program from JSON text.
pub fn parse_program_str(text: &str) -> Result<Program, AssignError> {
    let value: Value = serde_json::from_str(text).map_err(IngestError::from)?;
    parse_program(&value)
}

fn parse_part(index: usize, record: &Value) -> Result<ProgramPart, IngestError> {
    if !record.is_object() {
        return Err(IngestError::NotAnObject { index });
    }
    let raw = RawPart::deserialize(record).map_err(|e| IngestError::Malformed {
        index,
        reason: e.to_string(),
    })?;
    let fallback_ordinal = u32::try_from(index + 1).map_err(|_| IngestError::Malformed {
        index,
        reason: "too many parts".into(),
    })?;

    Ok(ProgramPart {
        ordinal: raw.ordinal.unwrap_or(fallback_ordinal),
        title: raw.title.unwrap_or_else(|| raw.part_type.clone()),
        duration_minutes: raw.duration_minutes.unwrap_or(0),
        part_type: raw.part_type,
        instructions: raw.instructions,
    })
}
