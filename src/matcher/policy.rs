use serde::{Deserialize, Serialize};

use super::types::Overlap;

/// What to do with overlaps that cover the same wall-clock time more than once.
///
/// Several interval pairs can agree on the same window. `KeepAll` keeps every
/// one of them, so the same slot is suggested once per agreeing pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    #[default]
    KeepAll,
    /// Drop exact repeats, keeping the first occurrence.
    Distinct,
    /// Union overlapping or touching windows per day.
    Merge,
}

pub fn apply_policy<D: PartialEq + Clone>(overlaps: Vec<Overlap<D>>, policy: OverlapPolicy) -> Vec<Overlap<D>> {
    match policy {
        OverlapPolicy::KeepAll => overlaps,
        OverlapPolicy::Distinct => distinct(overlaps),
        OverlapPolicy::Merge => merge(overlaps),
    }
}

fn distinct<D: PartialEq>(overlaps: Vec<Overlap<D>>) -> Vec<Overlap<D>> {
    let mut kept: Vec<Overlap<D>> = Vec::with_capacity(overlaps.len());
    for overlap in overlaps {
        if !kept.contains(&overlap) {
            kept.push(overlap);
        }
    }
    kept
}

/// Day labels carry no ordering, so days are grouped by first appearance.
fn merge<D: PartialEq + Clone>(overlaps: Vec<Overlap<D>>) -> Vec<Overlap<D>> {
    let mut by_day: Vec<(D, Vec<(u32, u32)>)> = Vec::new();
    for overlap in overlaps {
        match by_day.iter_mut().find(|(day, _)| *day == overlap.day) {
            Some((_, spans)) => spans.push((overlap.start_minute, overlap.end_minute)),
            None => by_day.push((overlap.day, vec![(overlap.start_minute, overlap.end_minute)])),
        }
    }

    let mut merged = Vec::new();
    for (day, mut spans) in by_day {
        spans.sort_unstable();
        let mut current: Option<(u32, u32)> = None;
        for (start, end) in spans {
            current = match current {
                Some((cur_start, cur_end)) if start <= cur_end => Some((cur_start, cur_end.max(end))),
                Some((cur_start, cur_end)) => {
                    merged.push(Overlap::new(day.clone(), cur_start, cur_end));
                    Some((start, end))
                }
                None => Some((start, end)),
            };
        }
        if let Some((start, end)) = current {
            merged.push(Overlap::new(day.clone(), start, end));
        }
    }
    merged
}
