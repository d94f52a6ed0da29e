pub mod year_source;

pub use year_source::YearSource;
