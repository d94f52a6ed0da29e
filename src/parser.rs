//! CSV parsers for the deviation and prediction archives.

use serde::Deserialize;

use crate::analyzers::types::Shadow;
use crate::error::{Result, ScorecardError};

/// One row of the deviation archive, after cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviationRow {
    pub year: i32,
    pub location: String,
    pub deviation: f64,
}

/// One row of the live prediction archive, after interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub year: i32,
    pub whistle_pig: String,
    pub shadow: Shadow,
}

#[derive(Debug, Deserialize)]
struct RawDeviation {
    year: i32,
    location: String,
    temperature_difference: String,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    year: i32,
    whistle_pig: String,
    prediction: String,
}

/// Parses `year,location,temperature_difference` rows.
///
/// Values may carry a degree suffix (`"-1.2° F"`). Rows with an empty
/// difference are blank table rows and are skipped.
///
/// # Errors
///
/// Returns an error on malformed CSV or a difference that is not a finite number.
pub fn parse_deviations(bytes: &[u8]) -> Result<Vec<DeviationRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let raw: RawDeviation = result?;
        let Some(deviation) = parse_temperature(&raw.temperature_difference)
            .map_err(|reason| ScorecardError::fetch(raw.year, reason))?
        else {
            continue;
        };
        rows.push(DeviationRow {
            year: raw.year,
            location: raw.location,
            deviation,
        });
    }

    Ok(rows)
}

/// Parses `year,whistle_pig,prediction` rows.
///
/// # Errors
///
/// Returns an error on malformed CSV or prediction text that names neither
/// winter nor spring.
pub fn parse_predictions(bytes: &[u8]) -> Result<Vec<PredictionRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let raw: RawPrediction = result?;
        let shadow = interpret_prediction(&raw.prediction).ok_or_else(|| {
            ScorecardError::fetch(
                raw.year,
                format!(
                    "unparseable prediction for {}: '{}'",
                    raw.whistle_pig, raw.prediction
                ),
            )
        })?;
        rows.push(PredictionRow {
            year: raw.year,
            whistle_pig: raw.whistle_pig.to_lowercase(),
            shadow,
        });
    }

    Ok(rows)
}

/// Reads a forecast sentence such as "an early spring" or "six more weeks of
/// winter". Winter wins when both words appear.
pub fn interpret_prediction(text: &str) -> Option<Shadow> {
    let text = text.to_lowercase();
    if text.contains("winter") {
        Some(Shadow::SawShadow)
    } else if text.contains("spring") {
        Some(Shadow::NoShadow)
    } else {
        None
    }
}

/// `Ok(None)` for a blank cell.
fn parse_temperature(cell: &str) -> std::result::Result<Option<f64>, String> {
    let cleaned = cell
        .trim()
        .trim_end_matches('F')
        .trim_end()
        .trim_end_matches('°')
        .trim();
    if cleaned.is_empty() {
        return Ok(None);
    }

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(format!("unparseable temperature difference '{cell}'")),
    }
}
