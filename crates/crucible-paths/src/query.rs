use crucible_core::{CostGrid, Point};

use crate::error::SolveError;

/// Inclusive bounds on the length of a straight run.
///
/// `max` is the number of consecutive steps allowed along one heading before
/// a turn is mandatory. `min` is the number of steps that must be taken
/// along a heading before the traveller may turn or stop at the
/// destination; `min == 1` imposes no minimum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunBounds {
    pub min: u32,
    pub max: u32,
}

impl RunBounds {
    /// Straight runs of at most three steps.
    pub const DEFAULT_MAX: u32 = 3;

    /// Bounds with both a minimum and a maximum run. Requires
    /// `1 <= min <= max`.
    pub fn new(min: u32, max: u32) -> Result<Self, SolveError> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Bounds with only a maximum run. Requires `max >= 1`.
    pub fn at_most(max: u32) -> Result<Self, SolveError> {
        Self::new(1, max)
    }

    /// Check `1 <= min <= max`. Fields are public, so the solver re-checks
    /// before every search.
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.min == 0 || self.min > self.max {
            return Err(SolveError::InvalidRunBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Whether a run of `run` steps may end here (turn or stop).
    #[inline]
    pub fn may_turn(&self, run: u32) -> bool {
        run >= self.min
    }
}

impl Default for RunBounds {
    fn default() -> Self {
        Self {
            min: 1,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// A single path query: where to start, where to go, and the run bounds.
///
/// ```
/// use crucible_core::Point;
/// use crucible_paths::Query;
///
/// let q = Query::new(Point::ZERO).to(Point::new(4, 4)).max_run(3);
/// assert_eq!(q.bounds.max, 3);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    pub start: Point,
    /// Destination; `None` means the grid's bottom-right cell.
    pub end: Option<Point>,
    pub bounds: RunBounds,
}

impl Query {
    /// A query from `start` to the bottom-right cell with default bounds.
    pub fn new(start: Point) -> Self {
        Self {
            start,
            end: None,
            bounds: RunBounds::default(),
        }
    }

    /// Set an explicit destination.
    pub fn to(mut self, end: Point) -> Self {
        self.end = Some(end);
        self
    }

    /// Replace the run bounds.
    pub fn bounds(mut self, bounds: RunBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the maximum run, keeping the minimum.
    pub fn max_run(mut self, max: u32) -> Self {
        self.bounds.max = max;
        self
    }

    /// Set the minimum run, keeping the maximum.
    pub fn min_run(mut self, min: u32) -> Self {
        self.bounds.min = min;
        self
    }

    /// The destination for `grid`, resolving the bottom-right default.
    pub fn end_for(&self, grid: &CostGrid) -> Point {
        self.end.unwrap_or_else(|| grid.bottom_right())
    }

    /// Validate the query against `grid` and return the resolved endpoints.
    pub(crate) fn resolve(&self, grid: &CostGrid) -> Result<(Point, Point), SolveError> {
        self.bounds.validate()?;
        if !grid.contains(self.start) {
            return Err(SolveError::StartOutOfBounds {
                point: self.start,
                bounds: grid.bounds(),
            });
        }
        let end = self.end_for(grid);
        if !grid.contains(end) {
            return Err(SolveError::EndOutOfBounds {
                point: end,
                bounds: grid.bounds(),
            });
        }
        Ok((self.start, end))
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new(Point::ZERO)
    }
}
