//! Prediction grading and scorecard aggregation.
//!
//! This module grades each whistle-pig's shadow against every location's
//! temperature deviation, tallies passes and at-bats across years, and
//! records whether the whistle-pigs agreed with each other each year.

pub mod aggregate;
pub mod grade;
pub mod types;
pub mod utility;
