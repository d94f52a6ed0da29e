//! Trait for anything that can produce a [`YearRecord`].

use crate::analyzers::types::YearRecord;
use crate::error::Result;

/// Abstraction over the provider of per-year observations and deviations.
///
/// The aggregator only ever talks to this trait, so tests can hand it a
/// closure instead of a real archive.
pub trait YearSource {
    /// Returns the record for `year`, or a fetch/configuration error.
    fn fetch(&self, year: i32) -> Result<YearRecord>;
}

impl<F> YearSource for F
where
    F: Fn(i32) -> Result<YearRecord>,
{
    fn fetch(&self, year: i32) -> Result<YearRecord> {
        self(year)
    }
}
