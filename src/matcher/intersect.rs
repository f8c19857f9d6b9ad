use super::types::{Interval, Overlap};

/// Computes every pairwise overlap between two availability lists.
///
/// Each interval of `side_a` is compared with each interval of `side_b` that
/// shares its day label. An overlap is emitted only when it has positive
/// length, so intervals that merely touch produce nothing. Results follow the
/// nested iteration order and are not deduplicated.
pub fn intersect<D: PartialEq + Clone>(side_a: &[Interval<D>], side_b: &[Interval<D>]) -> Vec<Overlap<D>> {
    let mut overlaps = Vec::new();

    for a in side_a {
        for b in side_b.iter().filter(|b| b.day == a.day) {
            let start = a.start_minute.max(b.start_minute);
            let end = a.end_minute.min(b.end_minute);
            if end > start {
                overlaps.push(Overlap::new(a.day.clone(), start, end));
            }
        }
    }

    overlaps
}
