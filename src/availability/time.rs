use chrono::Weekday;

use crate::error::{Error, Result};
use crate::matcher::MINUTES_PER_DAY;

/// Parses a time string (HH:MM) to minutes since the start of the day.
/// `24:00` is accepted as the end of the day.
pub fn parse_time_to_minutes(time_str: &str) -> Result<u32> {
    let invalid = || Error::InvalidTime(time_str.to_string());

    let (hours, minutes) = time_str.trim().split_once(':').ok_or_else(invalid)?;
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(hours) || hours.len() > 2 || !digits(minutes) || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 24 || minutes >= 60 {
        return Err(invalid());
    }

    let total = hours * 60 + minutes;
    if total > MINUTES_PER_DAY {
        return Err(invalid());
    }
    Ok(total)
}

/// Formats minutes since the start of the day as HH:MM (`1440` is `24:00`).
pub fn minutes_to_time_string(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parses a weekday label such as `Mon` or `monday`.
pub fn parse_day(day: &str) -> Result<Weekday> {
    day.trim().parse().map_err(|_| Error::InvalidDay(day.to_string()))
}
