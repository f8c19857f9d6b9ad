use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::availability::{new_entry_id, parse_day, parse_time_to_minutes, validate_interval, IntervalEntry};
use crate::error::{Error, Result};

/// Loads one side's availability from a CSV file.
///
/// The header must name `day`, `start` and `end` columns (any order, case
/// insensitive); an `id` column is optional. Times are HH:MM. Rows with an
/// empty day are skipped, any other bad row fails the whole load.
pub fn load_availability<P: AsRef<Path>>(csv_path: P) -> Result<Vec<IntervalEntry>> {
    let file = std::fs::File::open(csv_path.as_ref())?;
    let entries = read_availability(file)?;
    debug!(path = %csv_path.as_ref().display(), count = entries.len(), "loaded availability csv");
    Ok(entries)
}

/// Reads availability CSV from any reader; see [`load_availability`].
pub fn read_availability<R: Read>(input: R) -> Result<Vec<IntervalEntry>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let required = |name: &str| {
        column(name).ok_or_else(|| Error::CsvRow {
            row: 1,
            message: format!("header has no '{name}' column"),
        })
    };
    let day_col = required("day")?;
    let start_col = required("start")?;
    let end_col = required("end")?;
    let id_col = column("id");

    let mut entries = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1.
        let row = index + 2;

        let day = record.get(day_col).unwrap_or("");
        if day.is_empty() {
            continue;
        }

        let row_error = |e: Error| Error::CsvRow {
            row,
            message: e.to_string(),
        };
        let day = parse_day(day).map_err(row_error)?;
        let start = parse_time_to_minutes(record.get(start_col).unwrap_or("")).map_err(row_error)?;
        let end = parse_time_to_minutes(record.get(end_col).unwrap_or("")).map_err(row_error)?;
        validate_interval(day, start, end).map_err(row_error)?;

        let id = id_col
            .and_then(|col| record.get(col))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(new_entry_id);

        entries.push(IntervalEntry {
            id,
            day,
            start_min: start,
            end_min: end,
        });
    }

    Ok(entries)
}
