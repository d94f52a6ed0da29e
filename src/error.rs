//! Error types shared by the fetch, parse and aggregation stages.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScorecardError>;

#[derive(Error, Debug)]
pub enum ScorecardError {
    /// The data for a year could not be retrieved or did not have the
    /// expected shape. `year` is `None` when the failure happened while
    /// loading the whole archive.
    #[error("fetch failed{}: {reason}", .year.map(|y| format!(" for {y}")).unwrap_or_default())]
    Fetch { year: Option<i32>, reason: String },

    #[error("no shadow record for {whistle_pig} in {year} and no live substitute")]
    Configuration { whistle_pig: String, year: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScorecardError {
    pub fn fetch(year: i32, reason: impl Into<String>) -> Self {
        ScorecardError::Fetch {
            year: Some(year),
            reason: reason.into(),
        }
    }

    /// Whether the source failed to deliver a usable record.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ScorecardError::Fetch { .. }
                | ScorecardError::Io(_)
                | ScorecardError::Csv(_)
                | ScorecardError::Http(_)
        )
    }
}
