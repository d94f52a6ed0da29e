//! Data types used by the grading and aggregation pipeline.

use serde::Serialize;
use std::collections::HashMap;

/// Name of the synthetic location holding the mean deviation across all real
/// locations of a year.
pub const AGGREGATE_LOCATION: &str = "metro mean";

/// A whistle-pig's reported observation on Groundhog Day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shadow {
    /// Saw its shadow: six more weeks of winter, colder than normal.
    SawShadow,
    /// No shadow: early spring, warmer than normal.
    NoShadow,
    /// No prediction on record for that year.
    Unknown,
}

impl Shadow {
    pub fn is_known(self) -> bool {
        self != Shadow::Unknown
    }
}

impl From<Option<bool>> for Shadow {
    fn from(saw: Option<bool>) -> Self {
        match saw {
            Some(true) => Shadow::SawShadow,
            Some(false) => Shadow::NoShadow,
            None => Shadow::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    Pass,
    Fail,
    Push,
    Unknown,
}

/// Observed mean temperature deviation from normal for one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationReading {
    pub location: String,
    pub deviation: f64,
}

/// Everything known about a single year: each whistle-pig's observation and
/// each location's deviation, both in source order.
///
/// Both collections are keyed by name. Setting a name that is already present
/// replaces its value in place, so a whistle-pig or location never appears
/// twice in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRecord {
    pub year: i32,
    shadows: Vec<(String, Shadow)>,
    locations: Vec<LocationReading>,
}

impl YearRecord {
    pub fn new(year: i32) -> Self {
        YearRecord {
            year,
            shadows: Vec::new(),
            locations: Vec::new(),
        }
    }

    pub fn with_shadow(mut self, whistle_pig: &str, shadow: Shadow) -> Self {
        match self.shadows.iter_mut().find(|(name, _)| name == whistle_pig) {
            Some(entry) => entry.1 = shadow,
            None => self.shadows.push((whistle_pig.to_string(), shadow)),
        }
        self
    }

    pub fn with_location(mut self, location: &str, deviation: f64) -> Self {
        match self.locations.iter_mut().find(|r| r.location == location) {
            Some(reading) => reading.deviation = deviation,
            None => self.locations.push(LocationReading {
                location: location.to_string(),
                deviation,
            }),
        }
        self
    }

    pub fn shadows(&self) -> &[(String, Shadow)] {
        &self.shadows
    }

    pub fn locations(&self) -> &[LocationReading] {
        &self.locations
    }

    pub fn shadow(&self, whistle_pig: &str) -> Shadow {
        self.shadows
            .iter()
            .find(|(name, _)| name == whistle_pig)
            .map(|(_, s)| *s)
            .unwrap_or(Shadow::Unknown)
    }

    pub fn deviation(&self, location: &str) -> Option<f64> {
        self.locations
            .iter()
            .find(|r| r.location == location)
            .map(|r| r.deviation)
    }
}

/// Pass / at-bat counts for one (whistle-pig, location) pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub correct: u32,
    pub at_bats: u32,
}

impl Tally {
    pub fn record(&mut self, grade: Grade) {
        match grade {
            Grade::Pass => {
                self.correct += 1;
                self.at_bats += 1;
            }
            Grade::Fail => self.at_bats += 1,
            Grade::Push | Grade::Unknown => {}
        }
    }

    pub fn failures(&self) -> u32 {
        self.at_bats - self.correct
    }

    /// Share of correct calls in percent, `None` when nothing was graded.
    pub fn percent(&self) -> Option<f64> {
        if self.at_bats == 0 {
            None
        } else {
            Some(100.0 * self.correct as f64 / self.at_bats as f64)
        }
    }
}

/// Whether every whistle-pig with a known observation agreed in `year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearAgreement {
    pub year: i32,
    pub agreed: bool,
}

/// Result of aggregating a run of years.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Scorecard {
    /// Whistle-pigs in the order first seen.
    pub whistle_pigs: Vec<String>,
    /// Locations in the order first seen.
    pub locations: Vec<String>,
    pub tallies: HashMap<(String, String), Tally>,
    pub agreement: Vec<YearAgreement>,
}

impl Scorecard {
    pub fn tally(&self, whistle_pig: &str, location: &str) -> Tally {
        self.tallies
            .get(&(whistle_pig.to_string(), location.to_string()))
            .copied()
            .unwrap_or_default()
    }

    pub fn years_processed(&self) -> usize {
        self.agreement.len()
    }

    pub fn agreement_count(&self) -> usize {
        self.agreement.iter().filter(|a| a.agreed).count()
    }
}
