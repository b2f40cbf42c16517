//! Error types for path queries.

use crucible_core::{Point, Range};
use thiserror::Error;

/// A query was rejected before or during the search.
///
/// An unreachable destination is not an error; it is reported as `None` by
/// the query methods.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("invalid run bounds: need 1 <= min ({min}) <= max ({max})")]
    InvalidRunBounds { min: u32, max: u32 },

    #[error("start {point} is outside the grid {bounds}")]
    StartOutOfBounds { point: Point, bounds: Range },

    #[error("end {point} is outside the grid {bounds}")]
    EndOutOfBounds { point: Point, bounds: Range },

    #[error("search cancelled after {iterations} iterations")]
    Cancelled { iterations: u64 },
}
