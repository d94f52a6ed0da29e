//! Year source backed by tabulated CSV archives.
//!
//! [`CsvArchive`] combines the deviation archive, the live prediction archive
//! and the built-in [`HistoricalRecords`](crate::history::HistoricalRecords)
//! into [`YearRecord`](crate::analyzers::types::YearRecord)s.

mod source;

pub use source::CsvArchive;

/// Whistle-pigs graded by default, in report column order.
pub const WHISTLE_PIGS: &[&str] = &["wally", "phil", "snerd"];
