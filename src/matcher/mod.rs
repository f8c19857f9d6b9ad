pub mod types;
pub mod intersect;
pub mod tile;
pub mod policy;

pub use types::{Interval, Overlap, Suggestion, MINUTES_PER_DAY};
pub use intersect::intersect;
pub use tile::{tile, tile_all};
pub use policy::{apply_policy, OverlapPolicy};

use crate::error::Result;

/// Runs the whole pipeline: intersect both sides, apply the overlap policy, tile.
pub fn find_suggestions<D: PartialEq + Clone>(
    side_a: &[Interval<D>],
    side_b: &[Interval<D>],
    min_duration: u32,
    policy: OverlapPolicy,
) -> Result<Vec<Suggestion<D>>> {
    let overlaps = apply_policy(intersect(side_a, side_b), policy);
    tile_all(&overlaps, min_duration)
}
