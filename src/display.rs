use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Weekday;
use serde::Serialize;

use crate::availability::minutes_to_time_string;
use crate::error::Result;
use crate::matcher::Suggestion;
use crate::store::AvailabilityState;

/// Formats a suggestion as it is copied to the clipboard: `Mon 09:00 - 09:30`
pub fn format_suggestion<D: std::fmt::Display>(suggestion: &Suggestion<D>) -> String {
    format!(
        "{} {} - {}",
        suggestion.day,
        minutes_to_time_string(suggestion.start_minute),
        minutes_to_time_string(suggestion.end_minute)
    )
}

/// Suggestion as returned by the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionView {
    pub day: Weekday,
    pub start: String,
    pub end: String,
    pub text: String,
}

impl From<&Suggestion<Weekday>> for SuggestionView {
    fn from(suggestion: &Suggestion<Weekday>) -> Self {
        Self {
            day: suggestion.day,
            start: minutes_to_time_string(suggestion.start_minute),
            end: minutes_to_time_string(suggestion.end_minute),
            text: format_suggestion(suggestion),
        }
    }
}

/// Writes suggestions to a file, one per line, with a header naming both sides.
pub fn write_suggestions_to_file<P: AsRef<Path>>(
    state: &AvailabilityState,
    suggestions: &[Suggestion<Weekday>],
    filename: P,
) -> Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "** {} + {} **", state.label_you, state.label_them)?;
    for suggestion in suggestions {
        writeln!(file, "{}", format_suggestion(suggestion))?;
    }

    Ok(())
}

/// Prints suggestions in a readable format
pub fn print_suggestions(state: &AvailabilityState, suggestions: &[Suggestion<Weekday>]) {
    println!("\n=== Suggestions: {} + {} ===", state.label_you, state.label_them);
    println!(
        "{} has {} interval(s), {} has {} interval(s)",
        state.label_you,
        state.you.len(),
        state.label_them,
        state.them.len()
    );

    if suggestions.is_empty() {
        println!("No overlaps found.");
        return;
    }

    println!("Total suggestions: {}", suggestions.len());
    for (index, suggestion) in suggestions.iter().enumerate() {
        println!("  {:>3}. {}", index + 1, format_suggestion(suggestion));
    }
}
