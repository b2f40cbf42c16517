//! Minimum-cost paths on weighted grids under a turning constraint.
//!
//! A traveller crosses a [`CostGrid`], paying each cell's cost on entry. It
//! may take at most [`RunBounds::max`] consecutive steps in one heading
//! before it must turn, may never reverse, and (optionally) must take at
//! least [`RunBounds::min`] steps in a heading before turning or stopping.
//!
//! The search is a uniform-cost (Dijkstra) search over the augmented state
//! space `(position, heading, run)` rather than over bare cells: the same
//! cell is revisited under different headings and run lengths because what
//! is reachable from it differs.
//!
//! All queries go through [`CrucibleRange`], which owns and reuses its
//! state-node array and frontier so that repeated queries do not
//! reallocate. [`solve`] is a one-shot shortcut.
//!
//! ```
//! use crucible_core::{CostGrid, Point};
//! use crucible_paths::{CrucibleRange, Query, RunBounds};
//!
//! let grid: CostGrid = "2413\n3215\n3255".parse().unwrap();
//! let mut cr = CrucibleRange::new();
//! let cost = cr.cost(&grid, &Query::new(Point::ZERO)).unwrap();
//! assert!(cost.is_some());
//!
//! let strict = Query::new(Point::ZERO).bounds(RunBounds::new(4, 10).unwrap());
//! assert_eq!(cr.cost(&grid, &strict).unwrap(), None);
//! ```

mod batch;
mod error;
mod observer;
mod query;
mod range;
mod route;
mod search;
mod state;

pub use batch::solve_batch;
pub use error::SolveError;
pub use observer::{CancelToken, Cancellable, NoopObserver, ProgressLog, SearchObserver};
pub use query::{Query, RunBounds};
pub use range::{CrucibleRange, SearchStats};
pub use route::Route;
pub use state::SearchState;

use crucible_core::{CostGrid, Point};

/// One-shot query: minimum cost from `start` to `end` (bottom-right when
/// `None`) with straight runs of at most `max_run` steps.
///
/// Returns `Ok(None)` if the destination cannot be reached.
pub fn solve(
    grid: &CostGrid,
    max_run: u32,
    start: Point,
    end: Option<Point>,
) -> Result<Option<u64>, SolveError> {
    let query = Query {
        start,
        end,
        bounds: RunBounds::at_most(max_run)?,
    };
    CrucibleRange::new().cost(grid, &query)
}
