//! Report rendering for scorecards and single years.
//!
//! Supports a plain-text table and a JSON document. Rendering never computes
//! new values; it only formats what the aggregator produced.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

use crate::analyzers::grade::grade;
use crate::analyzers::types::{Grade, Scorecard, Shadow, Tally, YearAgreement, YearRecord};
use crate::analyzers::utility::round_percent;
use crate::error::Result;

const LOCATION_WIDTH: usize = 20;
const CELL_WIDTH: usize = 12;

/// Text for one (whistle-pig, location) cell: `correct/total (NN%)` or `no data`.
pub fn format_cell(tally: &Tally) -> String {
    match tally.percent() {
        Some(p) => format!("{}/{} ({}%)", tally.correct, tally.at_bats, round_percent(p)),
        None => "no data".to_string(),
    }
}

/// Renders the scorecard as a table with one row per location, followed by
/// the agreement summary line.
pub fn render(scorecard: &Scorecard) -> String {
    let loc_width = scorecard
        .locations
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(LOCATION_WIDTH);

    let mut out = String::new();

    let mut header = format!("{:<loc_width$}", "location");
    for whistle_pig in &scorecard.whistle_pigs {
        let _ = write!(header, " {:<CELL_WIDTH$}", whistle_pig);
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for location in &scorecard.locations {
        let mut row = format!("{:<loc_width$}", location);
        for whistle_pig in &scorecard.whistle_pigs {
            let cell = format_cell(&scorecard.tally(whistle_pig, location));
            let _ = write!(row, " {:<CELL_WIDTH$}", cell);
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "{} {}/{}",
        scorecard.whistle_pigs.join(", "),
        scorecard.agreement_count(),
        scorecard.years_processed()
    );

    out
}

/// Tally row of the JSON report.
#[derive(Serialize)]
pub struct TallyEntry<'a> {
    pub location: &'a str,
    pub whistle_pig: &'a str,
    pub correct: u32,
    pub at_bats: u32,
    pub percent: Option<i64>,
}

/// JSON form of a scorecard.
#[derive(Serialize)]
pub struct ScorecardReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub whistle_pigs: &'a [String],
    pub locations: &'a [String],
    pub tallies: Vec<TallyEntry<'a>>,
    pub agreement: &'a [YearAgreement],
    pub agreement_count: usize,
}

impl<'a> ScorecardReport<'a> {
    pub fn new(scorecard: &'a Scorecard) -> Self {
        let mut tallies = Vec::new();
        for location in &scorecard.locations {
            for whistle_pig in &scorecard.whistle_pigs {
                let tally = scorecard.tally(whistle_pig, location);
                tallies.push(TallyEntry {
                    location: location.as_str(),
                    whistle_pig: whistle_pig.as_str(),
                    correct: tally.correct,
                    at_bats: tally.at_bats,
                    percent: tally.percent().map(round_percent),
                });
            }
        }

        ScorecardReport {
            generated_at: Utc::now(),
            whistle_pigs: &scorecard.whistle_pigs,
            locations: &scorecard.locations,
            tallies,
            agreement: &scorecard.agreement,
            agreement_count: scorecard.agreement_count(),
        }
    }
}

/// Renders the scorecard as pretty-printed JSON.
pub fn render_json(scorecard: &Scorecard) -> Result<String> {
    let report = ScorecardReport::new(scorecard);
    Ok(serde_json::to_string_pretty(&report)?)
}

fn shadow_label(shadow: Shadow) -> &'static str {
    match shadow {
        Shadow::SawShadow => "saw shadow",
        Shadow::NoShadow => "no shadow",
        Shadow::Unknown => "unknown",
    }
}

/// Lists one year's observations and the grade of every
/// (whistle-pig, location) pair.
pub fn render_year(record: &YearRecord) -> String {
    let loc_width = record
        .locations()
        .iter()
        .map(|r| r.location.chars().count())
        .max()
        .unwrap_or(0)
        .max(LOCATION_WIDTH);

    let mut out = String::new();
    let _ = writeln!(out, "{}", record.year);
    for (whistle_pig, shadow) in record.shadows() {
        let _ = writeln!(out, "  {whistle_pig}: {}", shadow_label(*shadow));
    }
    out.push('\n');

    let mut header = format!("{:<loc_width$} {:>9}", "location", "deviation");
    for (whistle_pig, _) in record.shadows() {
        let _ = write!(header, " {:<CELL_WIDTH$}", whistle_pig);
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for reading in record.locations() {
        let mut row = format!("{:<loc_width$} {:>9.2}", reading.location, reading.deviation);
        for (_, shadow) in record.shadows() {
            let g = grade(reading.deviation, *shadow);
            let _ = write!(row, " {:<CELL_WIDTH$}", format!("{g:?}"));
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out
}

/// Grades of one year keyed by (whistle-pig, location), for callers that want
/// the values rather than text.
pub fn year_grades(record: &YearRecord) -> Vec<(String, String, Grade)> {
    let mut grades = Vec::new();
    for (whistle_pig, shadow) in record.shadows() {
        for reading in record.locations() {
            grades.push((
                whistle_pig.clone(),
                reading.location.clone(),
                grade(reading.deviation, *shadow),
            ));
        }
    }
    grades
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::add_year;

    fn scorecard() -> Scorecard {
        let mut card = Scorecard::default();
        for year in 2000..2010 {
            // Six cold years, four warm years.
            let dev = if year < 2006 { -1.0 } else { 1.0 };
            let record = YearRecord::new(year)
                .with_shadow("x", Shadow::SawShadow)
                .with_shadow("y", Shadow::Unknown)
                .with_location("Raleigh", dev);
            add_year(&mut card, &record);
        }
        card
    }

    #[test]
    fn test_format_cell() {
        let t = Tally {
            correct: 6,
            at_bats: 10,
        };
        assert_eq!(format_cell(&t), "6/10 (60%)");
        assert_eq!(format_cell(&Tally::default()), "no data");

        let t = Tally {
            correct: 2,
            at_bats: 3,
        };
        assert_eq!(format_cell(&t), "2/3 (67%)");
    }

    #[test]
    fn test_render_table() {
        let text = render(&scorecard());
        let lines: Vec<_> = text.lines().collect();

        assert!(lines[0].starts_with("location"));
        assert!(lines[0].contains('x'));
        assert!(lines[0].ends_with('y'));
        assert!(lines[1].starts_with("Raleigh"));
        assert!(lines[1].contains("6/10 (60%)"));
        assert!(lines[1].ends_with("no data"));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "x, y 10/10");
    }

    #[test]
    fn test_render_empty_scorecard() {
        let text = render(&Scorecard::default());
        assert_eq!(text, "location\n\n 0/0\n");
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&scorecard()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["agreement_count"], 10);
        assert_eq!(value["tallies"][0]["whistle_pig"], "x");
        assert_eq!(value["tallies"][0]["percent"], 60);
        assert!(value["tallies"][1]["percent"].is_null());
        assert_eq!(value["agreement"][0]["year"], 2000);
    }

    #[test]
    fn test_render_year() {
        let record = YearRecord::new(2012)
            .with_shadow("phil", Shadow::SawShadow)
            .with_shadow("snerd", Shadow::Unknown)
            .with_location("Raleigh", 3.4)
            .with_location("Cary", 0.0);

        let text = render_year(&record);
        assert!(text.starts_with("2012\n"));
        assert!(text.contains("phil: saw shadow"));
        assert!(text.contains("snerd: unknown"));

        let raleigh = text.lines().find(|l| l.starts_with("Raleigh")).unwrap();
        assert!(raleigh.contains("3.40"));
        assert!(raleigh.contains("Fail"));
        assert!(raleigh.contains("Unknown"));

        let cary = text.lines().find(|l| l.starts_with("Cary")).unwrap();
        assert!(cary.contains("Push"));
    }

    #[test]
    fn test_year_grades() {
        let record = YearRecord::new(2012)
            .with_shadow("snerd", Shadow::SawShadow)
            .with_location("Raleigh", 3.4);
        let grades = year_grades(&record);
        assert_eq!(
            grades,
            vec![("snerd".to_string(), "Raleigh".to_string(), Grade::Fail)]
        );
    }
}
