pub mod entry;
pub mod time;
pub mod validation;

pub use entry::{new_entry_id, sample_availability, IntervalEntry, IntervalRequest, Side};
pub use time::{minutes_to_time_string, parse_day, parse_time_to_minutes};
pub use validation::{validate_duration, validate_interval, validate_side, MAX_INTERVALS_PER_SIDE};
