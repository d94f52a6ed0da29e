use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::analyzers::types::{AGGREGATE_LOCATION, Shadow, YearRecord};
use crate::analyzers::utility::mean;
use crate::error::{Result, ScorecardError};
use crate::fetch::{HttpClient, load_source};
use crate::history::HistoricalRecords;
use crate::parser::{parse_deviations, parse_predictions};
use crate::services::YearSource;

use super::WHISTLE_PIGS;

pub struct CsvArchive {
    roster: Vec<String>,
    history: HistoricalRecords,
    predictions: BTreeMap<(i32, String), Shadow>,
    deviations: BTreeMap<i32, Vec<(String, f64)>>,
}

impl CsvArchive {
    /// Builds an archive from raw CSV documents using the default roster and
    /// the built-in histories.
    pub fn from_bytes(deviations: &[u8], predictions: &[u8]) -> Result<Self> {
        let mut archive = Self {
            roster: WHISTLE_PIGS.iter().map(|s| s.to_string()).collect(),
            history: HistoricalRecords::builtin(),
            predictions: BTreeMap::new(),
            deviations: BTreeMap::new(),
        };

        for row in parse_predictions(predictions)? {
            let key = (row.year, row.whistle_pig);
            if archive.predictions.insert(key.clone(), row.shadow).is_some() {
                return Err(ScorecardError::fetch(
                    key.0,
                    format!("duplicate prediction for {}", key.1),
                ));
            }
        }

        for row in parse_deviations(deviations)? {
            if row.location == AGGREGATE_LOCATION {
                return Err(ScorecardError::fetch(
                    row.year,
                    format!("'{AGGREGATE_LOCATION}' is computed and cannot appear in the archive"),
                ));
            }
            let table = archive.deviations.entry(row.year).or_default();
            if table.iter().any(|(loc, _)| *loc == row.location) {
                return Err(ScorecardError::fetch(
                    row.year,
                    format!("duplicate deviation for {}", row.location),
                ));
            }
            table.push((row.location, row.deviation));
        }

        debug!(
            years = archive.deviations.len(),
            predictions = archive.predictions.len(),
            "Archive indexed"
        );

        Ok(archive)
    }

    /// Loads both documents from files or URLs.
    #[tracing::instrument(skip(client))]
    pub fn load<C: HttpClient + ?Sized>(
        client: &C,
        deviations: &str,
        predictions: &str,
    ) -> Result<Self> {
        let deviation_bytes = load_source(client, deviations)?;
        let prediction_bytes = load_source(client, predictions)?;
        let archive = Self::from_bytes(&deviation_bytes, &prediction_bytes)?;

        info!(
            years = archive.deviations.len(),
            first = ?archive.deviations.keys().next(),
            last = ?archive.deviations.keys().next_back(),
            "Archive loaded"
        );
        Ok(archive)
    }

    /// Replaces the whistle-pigs to grade. Repeated names are kept once, at
    /// their first position.
    pub fn with_roster<I, S>(mut self, roster: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roster.clear();
        for name in roster.into_iter().map(Into::into) {
            if !self.roster.contains(&name) {
                self.roster.push(name);
            }
        }
        self
    }

    pub fn with_history(mut self, history: HistoricalRecords) -> Self {
        self.history = history;
        self
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Historical table first; the live archive substitutes for years the
    /// table does not hold.
    fn shadow(&self, whistle_pig: &str, year: i32) -> Result<Shadow> {
        let live = self
            .predictions
            .get(&(year, whistle_pig.to_string()))
            .copied();

        if self.history.covers(whistle_pig) {
            return match self.history.shadow(whistle_pig, year) {
                Ok(shadow) => Ok(shadow),
                Err(e) => match live {
                    Some(shadow) => {
                        warn!(whistle_pig, year, "Outside history, using live prediction");
                        Ok(shadow)
                    }
                    None => Err(e),
                },
            };
        }

        live.ok_or_else(|| {
            ScorecardError::fetch(year, format!("no prediction for {whistle_pig}"))
        })
    }
}

impl YearSource for CsvArchive {
    #[tracing::instrument(level = "debug", skip(self))]
    fn fetch(&self, year: i32) -> Result<YearRecord> {
        let table = self
            .deviations
            .get(&year)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ScorecardError::fetch(year, "missing deviation table"))?;

        let mut record = YearRecord::new(year);
        for whistle_pig in &self.roster {
            let shadow = self.shadow(whistle_pig, year)?;
            record = record.with_shadow(whistle_pig, shadow);
        }

        for (location, deviation) in table {
            record = record.with_location(location, *deviation);
        }

        let values: Vec<f64> = table.iter().map(|(_, d)| *d).collect();
        record = record.with_location(AGGREGATE_LOCATION, mean(&values));

        debug!(locations = record.locations().len(), "Year record assembled");
        Ok(record)
    }
}
