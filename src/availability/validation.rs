use std::fmt::Display;

use crate::error::{Error, Result};
use crate::matcher::MINUTES_PER_DAY;

use super::entry::{IntervalEntry, Side};

/// Upper bound on intervals per side; intersection is quadratic in the list sizes.
pub const MAX_INTERVALS_PER_SIDE: usize = 200;

/// Checks `start < end <= 1440`.
pub fn validate_interval(day: impl Display, start: u32, end: u32) -> Result<()> {
    if start >= end || end > MINUTES_PER_DAY {
        return Err(Error::InvalidInterval {
            day: day.to_string(),
            start,
            end,
        });
    }
    Ok(())
}

/// Converts a caller-supplied meeting length into the matcher's unsigned minutes.
pub fn validate_duration(minutes: i64) -> Result<u32> {
    if minutes <= 0 {
        return Err(Error::InvalidDuration { minutes });
    }
    u32::try_from(minutes).map_err(|_| Error::InvalidDuration { minutes })
}

/// Validates every entry of one side plus the list size.
pub fn validate_side(side: Side, entries: &[IntervalEntry]) -> Result<()> {
    if entries.len() > MAX_INTERVALS_PER_SIDE {
        return Err(Error::TooManyIntervals {
            side: side.to_string(),
            limit: MAX_INTERVALS_PER_SIDE,
        });
    }
    for entry in entries {
        validate_interval(entry.day, entry.start_min, entry.end_min)?;
    }
    Ok(())
}
