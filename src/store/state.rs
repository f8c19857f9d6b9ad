use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::availability::{validate_side, IntervalEntry, Side, MAX_INTERVALS_PER_SIDE};
use crate::error::{Error, Result};
use crate::matcher::{find_suggestions, Interval, OverlapPolicy, Suggestion};

pub const DEFAULT_LABEL_YOU: &str = "You";
pub const DEFAULT_LABEL_THEM: &str = "GPT";

/// Both availability lists plus the display labels of the two sides.
///
/// This is the JSON document used for exports, share links and the session
/// cookie. Missing fields fall back to their defaults when loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvailabilityState {
    pub you: Vec<IntervalEntry>,
    pub them: Vec<IntervalEntry>,
    pub label_you: String,
    pub label_them: String,
}

impl Default for AvailabilityState {
    fn default() -> Self {
        Self {
            you: Vec::new(),
            them: Vec::new(),
            label_you: DEFAULT_LABEL_YOU.to_string(),
            label_them: DEFAULT_LABEL_THEM.to_string(),
        }
    }
}

impl AvailabilityState {
    /// Parses a JSON document and validates every interval in it.
    pub fn from_json(json: &str) -> Result<Self> {
        let state: Self = serde_json::from_str(json)?;
        state.validate()?;
        Ok(state)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_side(Side::You, &self.you)?;
        validate_side(Side::Them, &self.them)
    }

    pub fn entries(&self, side: Side) -> &[IntervalEntry] {
        match side {
            Side::You => &self.you,
            Side::Them => &self.them,
        }
    }

    fn entries_mut(&mut self, side: Side) -> &mut Vec<IntervalEntry> {
        match side {
            Side::You => &mut self.you,
            Side::Them => &mut self.them,
        }
    }

    pub fn label(&self, side: Side) -> &str {
        match side {
            Side::You => &self.label_you,
            Side::Them => &self.label_them,
        }
    }

    /// Appends an already validated entry.
    pub fn add(&mut self, side: Side, entry: IntervalEntry) -> Result<()> {
        let entries = self.entries_mut(side);
        if entries.len() >= MAX_INTERVALS_PER_SIDE {
            return Err(Error::TooManyIntervals {
                side: side.to_string(),
                limit: MAX_INTERVALS_PER_SIDE,
            });
        }
        entries.push(entry);
        Ok(())
    }

    /// Removes the entry with `id`, returning whether anything was removed.
    pub fn remove(&mut self, side: Side, id: &str) -> bool {
        let entries = self.entries_mut(side);
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        entries.len() != before
    }

    pub fn replace(&mut self, side: Side, entries: Vec<IntervalEntry>) {
        *self.entries_mut(side) = entries;
    }

    /// Sets the labels, keeping the default for any that is blank.
    pub fn set_labels(&mut self, label_you: &str, label_them: &str) {
        self.label_you = non_blank_or(label_you, DEFAULT_LABEL_YOU);
        self.label_them = non_blank_or(label_them, DEFAULT_LABEL_THEM);
    }

    pub fn intervals(&self, side: Side) -> Vec<Interval<Weekday>> {
        self.entries(side).iter().map(IntervalEntry::to_interval).collect()
    }

    /// Matches "you" against "them".
    pub fn suggestions(&self, min_duration: u32, policy: OverlapPolicy) -> Result<Vec<Suggestion<Weekday>>> {
        find_suggestions(&self.intervals(Side::You), &self.intervals(Side::Them), min_duration, policy)
    }
}

fn non_blank_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
