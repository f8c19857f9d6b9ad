use super::types::{Overlap, Suggestion};
use crate::error::{Error, Result};

/// Splits an overlap into back-to-back slots of exactly `min_duration` minutes.
///
/// The first slot starts at the beginning of the overlap. A tail shorter than
/// `min_duration` is dropped, so every slot is bookable at the requested length.
/// A zero duration is rejected.
pub fn tile<D: Clone>(overlap: &Overlap<D>, min_duration: u32) -> Result<Vec<Suggestion<D>>> {
    if min_duration == 0 {
        return Err(Error::InvalidDuration { minutes: 0 });
    }

    let mut slots = Vec::new();
    let mut cursor = overlap.start_minute;
    // Written as a difference so huge durations cannot overflow `cursor + min_duration`.
    while overlap.end_minute.saturating_sub(cursor) >= min_duration {
        slots.push(Suggestion::new(overlap.day.clone(), cursor, cursor + min_duration));
        cursor += min_duration;
    }

    Ok(slots)
}

/// Tiles each overlap in order and concatenates the slots.
pub fn tile_all<D: Clone>(overlaps: &[Overlap<D>], min_duration: u32) -> Result<Vec<Suggestion<D>>> {
    if min_duration == 0 {
        return Err(Error::InvalidDuration { minutes: 0 });
    }

    let mut suggestions = Vec::new();
    for overlap in overlaps {
        suggestions.extend(tile(overlap, min_duration)?);
    }
    Ok(suggestions)
}
