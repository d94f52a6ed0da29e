//! Hard-coded shadow histories for whistle-pigs without a live source.

use crate::analyzers::types::Shadow;
use crate::error::{Result, ScorecardError};
use std::collections::BTreeMap;

/// Punxsutawney Phil, from the Groundhog Club's published prediction history.
/// `true` means he saw his shadow.
static PHIL: &[(i32, Option<bool>)] = &[
    (2000, Some(true)),
    (2001, Some(true)),
    (2002, Some(true)),
    (2003, Some(true)),
    (2004, Some(true)),
    (2005, Some(true)),
    (2006, Some(true)),
    (2007, Some(false)),
    (2008, Some(true)),
    (2009, Some(true)),
    (2010, Some(true)),
    (2011, Some(false)),
    (2012, Some(true)),
    (2013, Some(false)),
    (2014, Some(true)),
    (2015, Some(true)),
    (2016, Some(false)),
    (2017, Some(true)),
    (2018, Some(true)),
    (2019, Some(false)),
];

/// Snerd of Garner, as reported by the News & Observer. Mortimer made the
/// call from 2007 to 2014; nobody did before that.
static SNERD: &[(i32, Option<bool>)] = &[
    (2000, None),
    (2001, None),
    (2002, None),
    (2003, None),
    (2004, None),
    (2005, None),
    (2006, None),
    (2007, Some(true)),
    (2008, Some(false)),
    (2009, Some(false)),
    (2010, Some(true)),
    (2011, Some(false)),
    (2012, Some(true)),
    (2013, Some(true)),
    (2014, Some(true)),
    (2015, Some(false)),
    (2016, Some(false)),
    (2017, Some(true)),
    (2018, Some(true)),
    (2019, Some(true)),
];

/// Immutable per-whistle-pig lookup tables, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct HistoricalRecords {
    tables: BTreeMap<String, BTreeMap<i32, Shadow>>,
}

impl HistoricalRecords {
    /// The built-in tables for `phil` and `snerd`.
    pub fn builtin() -> Self {
        Self::default()
            .with_table("phil", PHIL)
            .with_table("snerd", SNERD)
    }

    pub fn with_table(mut self, whistle_pig: &str, rows: &[(i32, Option<bool>)]) -> Self {
        let table = rows.iter().map(|(y, s)| (*y, Shadow::from(*s))).collect();
        self.tables.insert(whistle_pig.to_string(), table);
        self
    }

    /// Whether `whistle_pig` has a table at all.
    pub fn covers(&self, whistle_pig: &str) -> bool {
        self.tables.contains_key(whistle_pig)
    }

    /// Inclusive year range of the table for `whistle_pig`.
    pub fn bounds(&self, whistle_pig: &str) -> Option<(i32, i32)> {
        let table = self.tables.get(whistle_pig)?;
        let first = table.keys().next()?;
        let last = table.keys().next_back()?;
        Some((*first, *last))
    }

    /// Looks up the recorded observation. A year the table does not hold is a
    /// configuration error rather than `Unknown`.
    pub fn shadow(&self, whistle_pig: &str, year: i32) -> Result<Shadow> {
        self.tables
            .get(whistle_pig)
            .and_then(|t| t.get(&year))
            .copied()
            .ok_or_else(|| ScorecardError::Configuration {
                whistle_pig: whistle_pig.to_string(),
                year,
            })
    }
}
