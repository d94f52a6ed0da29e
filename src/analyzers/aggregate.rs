use crate::analyzers::grade::grade;
use crate::analyzers::types::{Scorecard, Shadow, YearAgreement, YearRecord};
use crate::error::Result;
use crate::services::YearSource;
use std::collections::HashSet;
use tracing::{debug, info};

/// Fetches every year in order and folds it into a [`Scorecard`].
///
/// The first failing fetch aborts the run; a scorecard with silently skipped
/// years would misstate the win rates.
#[tracing::instrument(skip_all)]
pub fn aggregate<S, I>(years: I, source: &S) -> Result<Scorecard>
where
    S: YearSource + ?Sized,
    I: IntoIterator<Item = i32>,
{
    let mut scorecard = Scorecard::default();

    for year in years {
        let record = source.fetch(year)?;
        add_year(&mut scorecard, &record);
    }

    info!(
        years = scorecard.years_processed(),
        agreed = scorecard.agreement_count(),
        "Scorecard aggregated"
    );

    Ok(scorecard)
}

/// Folds one year's record into the running scorecard.
pub fn add_year(scorecard: &mut Scorecard, record: &YearRecord) {
    let agreed = agrees(record);
    scorecard.agreement.push(YearAgreement {
        year: record.year,
        agreed,
    });

    for reading in record.locations() {
        if !scorecard.locations.contains(&reading.location) {
            scorecard.locations.push(reading.location.clone());
        }
    }

    for (whistle_pig, shadow) in record.shadows() {
        if !scorecard.whistle_pigs.contains(whistle_pig) {
            scorecard.whistle_pigs.push(whistle_pig.clone());
        }

        for reading in record.locations() {
            let g = grade(reading.deviation, *shadow);
            scorecard
                .tallies
                .entry((whistle_pig.clone(), reading.location.clone()))
                .or_default()
                .record(g);
        }
    }

    debug!(
        year = record.year,
        agreed,
        locations = record.locations().len(),
        "Year graded"
    );
}

/// True iff the known observations of the year collapse to exactly one value.
/// A year where nobody has a known observation does not count as agreement.
pub fn agrees(record: &YearRecord) -> bool {
    let observations: HashSet<Shadow> = record
        .shadows()
        .iter()
        .map(|(_, s)| *s)
        .filter(|s| s.is_known())
        .collect();

    observations.len() == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScorecardError;

    fn record(year: i32, shadows: &[(&str, Shadow)], locations: &[(&str, f64)]) -> YearRecord {
        let mut r = YearRecord::new(year);
        for (name, shadow) in shadows {
            r = r.with_shadow(name, *shadow);
        }
        for (loc, dev) in locations {
            r = r.with_location(loc, *dev);
        }
        r
    }

    #[test]
    fn test_disagreement_with_unknown() {
        let r = record(
            2010,
            &[
                ("a", Shadow::SawShadow),
                ("b", Shadow::NoShadow),
                ("c", Shadow::Unknown),
            ],
            &[],
        );
        assert!(!agrees(&r));
    }

    #[test]
    fn test_agreement_ignores_unknown() {
        let r = record(
            2010,
            &[("a", Shadow::NoShadow), ("b", Shadow::Unknown), ("c", Shadow::NoShadow)],
            &[],
        );
        assert!(agrees(&r));
    }

    #[test]
    fn test_all_unknown_is_not_agreement() {
        let r = record(2001, &[("a", Shadow::Unknown), ("b", Shadow::Unknown)], &[]);
        assert!(!agrees(&r));
    }

    #[test]
    fn test_aggregate_counts_pass_and_fail() {
        let source = |year: i32| -> Result<YearRecord> {
            // Cold in even years, warm in odd years, zero in 2005.
            let dev = match year {
                2005 => 0.0,
                y if y % 2 == 0 => -1.0,
                _ => 1.0,
            };
            Ok(record(
                year,
                &[("x", Shadow::SawShadow), ("y", Shadow::Unknown)],
                &[("Raleigh", dev)],
            ))
        };

        let card = aggregate(2000..2010, &source).unwrap();

        let x = card.tally("x", "Raleigh");
        assert_eq!(x.correct, 5);
        assert_eq!(x.at_bats, 9);

        let y = card.tally("y", "Raleigh");
        assert_eq!(y.at_bats, 0);
        assert!(card.tallies.contains_key(&("y".to_string(), "Raleigh".to_string())));

        assert_eq!(card.years_processed(), 10);
        assert_eq!(card.agreement_count(), 10);
        assert_eq!(card.whistle_pigs, vec!["x", "y"]);
        assert_eq!(card.locations, vec!["Raleigh"]);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let source = |year: i32| -> Result<YearRecord> {
            Ok(record(
                year,
                &[("a", Shadow::SawShadow), ("b", Shadow::NoShadow)],
                &[("Raleigh", (year % 3) as f64 - 1.0), ("Durham", 0.5)],
            ))
        };

        let first = aggregate(2000..2020, &source).unwrap();
        let second = aggregate(2000..2020, &source).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tally_invariants_hold() {
        let source = |year: i32| -> Result<YearRecord> {
            let shadow = if year % 4 == 0 { Shadow::Unknown } else { Shadow::NoShadow };
            Ok(record(
                year,
                &[("a", shadow)],
                &[("Raleigh", (year % 5) as f64 - 2.0)],
            ))
        };

        let card = aggregate(2000..2020, &source).unwrap();
        for tally in card.tallies.values() {
            assert_eq!(tally.at_bats, tally.correct + tally.failures());
            assert!(tally.at_bats as usize <= card.years_processed());
        }
    }

    #[test]
    fn test_fetch_error_aborts_run() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let source = |year: i32| -> Result<YearRecord> {
            calls.set(calls.get() + 1);
            if year == 2003 {
                Err(ScorecardError::fetch(year, "missing deviation table"))
            } else {
                Ok(record(year, &[("a", Shadow::SawShadow)], &[("Raleigh", -1.0)]))
            }
        };

        let err = aggregate(2000..2020, &source).unwrap_err();
        assert!(matches!(err, ScorecardError::Fetch { year: Some(2003), .. }));
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_repeated_names_count_once_per_year() {
        let r = record(
            2012,
            &[("phil", Shadow::SawShadow), ("phil", Shadow::SawShadow)],
            &[("Raleigh", 1.0), ("metro mean", 1.0), ("metro mean", -3.0)],
        );

        let mut card = Scorecard::default();
        add_year(&mut card, &r);

        assert_eq!(card.whistle_pigs, vec!["phil"]);
        assert_eq!(card.locations, vec!["Raleigh", "metro mean"]);
        let metro = card.tally("phil", "metro mean");
        assert_eq!(metro.at_bats, 1);
        assert_eq!(metro.correct, 1);
        assert!(metro.at_bats as usize <= card.years_processed());
    }

    #[test]
    fn test_agreement_preserves_year_order() {
        let source = |year: i32| -> Result<YearRecord> {
            let b = if year == 2001 { Shadow::NoShadow } else { Shadow::SawShadow };
            Ok(record(year, &[("a", Shadow::SawShadow), ("b", b)], &[]))
        };

        let card = aggregate([2000, 2001, 2002], &source).unwrap();
        let bits: Vec<_> = card.agreement.iter().map(|a| (a.year, a.agreed)).collect();
        assert_eq!(bits, vec![(2000, true), (2001, false), (2002, true)]);
    }
}
