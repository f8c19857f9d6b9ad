use serde::{Deserialize, Serialize};

/// Number of minutes in a day label; the largest valid end minute.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A span of declared availability within one day label.
///
/// `day` is only ever compared for equality. Minutes are offsets from the
/// start of that day, `start_minute < end_minute <= MINUTES_PER_DAY` for
/// well-formed values. Validation happens before intervals reach the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<D> {
    pub day: D,
    pub start_minute: u32,
    pub end_minute: u32,
}

/// Intersection of one interval from each side sharing a day label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap<D> {
    pub day: D,
    pub start_minute: u32,
    pub end_minute: u32,
}

/// A fixed-length candidate meeting slot carved out of an overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion<D> {
    pub day: D,
    pub start_minute: u32,
    pub end_minute: u32,
}

impl<D> Interval<D> {
    pub fn new(day: D, start_minute: u32, end_minute: u32) -> Self {
        Self { day, start_minute, end_minute }
    }
}

impl<D> Overlap<D> {
    pub fn new(day: D, start_minute: u32, end_minute: u32) -> Self {
        Self { day, start_minute, end_minute }
    }

    pub fn duration(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }
}

impl<D> Suggestion<D> {
    pub fn new(day: D, start_minute: u32, end_minute: u32) -> Self {
        Self { day, start_minute, end_minute }
    }

    pub fn duration(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }
}
