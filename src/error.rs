use thiserror::Error;

/// Errors raised while validating, loading or matching availability.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid interval on {day}: start {start} must be before end {end} (max 1440)")]
    InvalidInterval { day: String, start: u32, end: u32 },

    #[error("Meeting duration must be a positive number of minutes, got {minutes}")]
    InvalidDuration { minutes: i64 },

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Unknown day '{0}'")]
    InvalidDay(String),

    #[error("Too many intervals for {side}: limit is {limit}")]
    TooManyIntervals { side: String, limit: usize },

    #[error("Invalid share link: {0}")]
    ShareLink(String),

    #[error("Invalid CSV row {row}: {message}")]
    CsvRow { row: usize, message: String },

    #[error("Session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error was caused by bad caller input rather than the environment.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Session(_))
    }
}
