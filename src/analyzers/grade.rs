use crate::analyzers::types::{Grade, Shadow};
use std::cmp::Ordering;

/// Grades a shadow observation against the observed deviation from normal.
///
/// | Shadow    | deviation < 0 | deviation == 0 | deviation > 0 |
/// |-----------|---------------|----------------|---------------|
/// | SawShadow | Pass          | Push           | Fail          |
/// | NoShadow  | Fail          | Push           | Pass          |
/// | Unknown   | Unknown       | Unknown        | Unknown       |
///
/// A NaN deviation cannot be compared against zero and grades as `Unknown`.
pub fn grade(deviation: f64, shadow: Shadow) -> Grade {
    if shadow == Shadow::Unknown {
        return Grade::Unknown;
    }

    match (deviation.partial_cmp(&0.0), shadow) {
        (None, _) => Grade::Unknown,
        (Some(Ordering::Equal), _) => Grade::Push,
        (Some(Ordering::Less), Shadow::SawShadow) => Grade::Pass,
        (Some(Ordering::Greater), Shadow::SawShadow) => Grade::Fail,
        (Some(Ordering::Greater), _) => Grade::Pass,
        (Some(Ordering::Less), _) => Grade::Fail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_saw_shadow() {
        assert_eq!(grade(-1.5, Shadow::SawShadow), Grade::Pass);
        assert_eq!(grade(0.1, Shadow::SawShadow), Grade::Fail);
        assert_eq!(grade(0.0, Shadow::SawShadow), Grade::Push);
    }

    #[test]
    fn test_grade_no_shadow() {
        assert_eq!(grade(2.0, Shadow::NoShadow), Grade::Pass);
        assert_eq!(grade(-0.2, Shadow::NoShadow), Grade::Fail);
        assert_eq!(grade(0.0, Shadow::NoShadow), Grade::Push);
    }

    #[test]
    fn test_grade_unknown_takes_priority() {
        for d in [-3.0, -0.0, 0.0, 4.2, f64::NAN] {
            assert_eq!(grade(d, Shadow::Unknown), Grade::Unknown);
        }
    }

    #[test]
    fn test_negative_zero_is_push() {
        assert_eq!(grade(-0.0, Shadow::SawShadow), Grade::Push);
    }

    #[test]
    fn test_nan_is_unknown() {
        assert_eq!(grade(f64::NAN, Shadow::NoShadow), Grade::Unknown);
    }
}
