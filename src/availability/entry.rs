use std::fmt;

use chrono::Weekday;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matcher::Interval;

use super::time::{parse_day, parse_time_to_minutes};
use super::validation::validate_interval;

/// One of the two parties being matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    You,
    Them,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::You => f.write_str("you"),
            Side::Them => f.write_str("them"),
        }
    }
}

/// A stored availability interval; the id is only used to remove entries again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalEntry {
    pub id: String,
    pub day: Weekday,
    pub start_min: u32,
    pub end_min: u32,
}

impl IntervalEntry {
    pub fn new(day: Weekday, start_min: u32, end_min: u32) -> Self {
        Self {
            id: new_entry_id(),
            day,
            start_min,
            end_min,
        }
    }

    pub fn to_interval(&self) -> Interval<Weekday> {
        Interval::new(self.day, self.start_min, self.end_min)
    }
}

/// Interval as typed into the form: a day label and two HH:MM strings.
#[derive(Debug, Clone, Deserialize)]
pub struct IntervalRequest {
    pub day: String,
    pub start: String,
    pub end: String,
}

impl IntervalRequest {
    /// Parses and validates the request into a fresh entry.
    pub fn into_entry(self) -> Result<IntervalEntry> {
        let day = parse_day(&self.day)?;
        let start = parse_time_to_minutes(&self.start)?;
        let end = parse_time_to_minutes(&self.end)?;
        validate_interval(day, start, end)?;
        Ok(IntervalEntry::new(day, start, end))
    }
}

/// Random 8-character lowercase id for an entry.
pub fn new_entry_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// Availability used by the "fill with sample" action.
pub fn sample_availability() -> Vec<IntervalEntry> {
    vec![
        IntervalEntry::new(Weekday::Mon, 8 * 60, 12 * 60),
        IntervalEntry::new(Weekday::Tue, 14 * 60, 18 * 60),
        IntervalEntry::new(Weekday::Thu, 10 * 60, 13 * 60),
    ]
}
