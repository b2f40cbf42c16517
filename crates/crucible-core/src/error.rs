//! Error types for grid ingestion.

use std::num::ParseIntError;

use thiserror::Error;

use crate::geom::Point;

/// A cost grid could not be built from its input.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("grid is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cost character {ch:?} at {pos}")]
    InvalidDigit { ch: char, pos: Point },

    #[error("negative cost {value} at {pos}")]
    NegativeCost { value: i64, pos: Point },

    #[error("cost {value} at {pos} does not fit in 32 bits")]
    CostTooLarge { value: i64, pos: Point },

    #[error("grid dimension {0} exceeds the addressable coordinate range")]
    TooLarge(usize),

    #[error("failed to read grid: {0}")]
    Io(#[from] std::io::Error),
}

/// A `"x,y"` coordinate string could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePointError {
    #[error("expected \"x,y\", got {0:?}")]
    MissingComma(String),

    #[error("invalid coordinate in {input:?}: {source}")]
    InvalidCoordinate {
        input: String,
        #[source]
        source: ParseIntError,
    },
}
