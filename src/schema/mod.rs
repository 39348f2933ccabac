//! The relational model the station data is meant to be loaded into:
//! lookup tables plus one daily-record table for UK stations and one for
//! overseas stations. Only the Rust types live here; nothing is persisted.

pub mod data_tables;
pub mod static_tables;

use thiserror::Error;

use crate::units::UnitError;

pub use data_tables::{LocalData, OverseasData};
pub use static_tables::{
    Beaufort, BeaufortUnit, Cardinal3, CardinalDirection, Direction, LocationName, LocationRow,
};

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unknown location `{0}`")]
    UnknownLocation(String),
    #[error("unknown Beaufort label `{0}`")]
    UnknownBeaufort(String),
    #[error("invalid cardinal direction `{0}`")]
    InvalidCardinal(String),
    #[error("row has {found} fields, expected {expected}")]
    WrongFieldCount { found: usize, expected: usize },
    #[error("{column}: value is missing")]
    Missing { column: &'static str },
    #[error("{column}: `{value}` is not a number")]
    InvalidNumber { column: &'static str, value: String },
    #[error("{year}-{month}-{day} is not a valid date")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("{column}: {source}")]
    OutOfRange {
        column: &'static str,
        #[source]
        source: UnitError,
    },
    #[error("{column}: {source}")]
    InvalidLabel {
        column: &'static str,
        #[source]
        source: Box<ParseError>,
    },
}

/// Placeholder cells that mean "no observation".
pub(crate) fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || cell == "-" || cell.eq_ignore_ascii_case("n/a")
}
