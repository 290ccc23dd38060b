//! Weekly meeting program.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One scheduled segment of a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramPart {
    /// Position within the week; strictly increasing across a program.
    pub ordinal: u32,
    pub title: String,
    pub duration_minutes: u32,
    /// Identifier used to look up the part's rule.
    pub part_type: String,
    /// Free text that may disambiguate sub-variants of a type.
    #[serde(default)]
    pub instructions: Option<String>,
}

impl ProgramPart {
    /// Creates a part with no duration and no instructions.
    pub fn new(ordinal: u32, part_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            ordinal,
            title: title.into(),
            duration_minutes: 0,
            part_type: part_type.into(),
            instructions: None,
        }
    }

    /// Sets the duration in minutes.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Sets the free-text instructions.
    pub fn with_instructions(mut self, text: impl Into<String>) -> Self {
        self.instructions = Some(text.into());
        self
    }
}

/// An ordered list of parts for one week.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub week_of: Option<NaiveDate>,
    pub parts: Vec<ProgramPart>,
}

impl Program {
    /// Creates a program with no week date.
    pub fn new(parts: Vec<ProgramPart>) -> Self {
        Self {
            week_of: None,
            parts,
        }
    }

    /// Sets the week the program belongs to.
    pub fn with_week_of(mut self, date: NaiveDate) -> Self {
        self.week_of = Some(date);
        self
    }

    /// Checks that the program has at least one part and that ordinals are
    /// strictly increasing.
    pub fn validate(&self) -> Result<(), String> {
        if self.parts.is_empty() {
            return Err("program has no parts".into());
        }
        for pair in self.parts.windows(2) {
            if pair[1].ordinal <= pair[0].ordinal {
                return Err(format!(
                    "part ordinals out of order: {} follows {}",
                    pair[1].ordinal, pair[0].ordinal
                ));
            }
        }
        Ok(())
    }
}
