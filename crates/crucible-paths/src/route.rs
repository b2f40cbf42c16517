use crucible_core::{CostGrid, Direction, Point};

use crate::query::RunBounds;

/// A minimum-cost route returned by
/// [`CrucibleRange::route`](crate::CrucibleRange::route).
///
/// `cells` runs from the start to the destination inclusive, and
/// `moves[i]` is the step from `cells[i]` to `cells[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub cost: u64,
    pub cells: Vec<Point>,
    pub moves: Vec<Direction>,
}

impl Route {
    /// First cell of the route.
    pub fn start(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    /// Last cell of the route.
    pub fn end(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    /// Straight runs as `(heading, length)` pairs, in order.
    pub fn runs(&self) -> Vec<(Direction, u32)> {
        let mut runs: Vec<(Direction, u32)> = Vec::new();
        for &m in &self.moves {
            match runs.last_mut() {
                Some((d, n)) if *d == m => *n += 1,
                _ => runs.push((m, 1)),
            }
        }
        runs
    }

    /// Length of the longest straight run (0 for an empty route).
    pub fn longest_run(&self) -> u32 {
        self.runs().iter().map(|&(_, n)| n).max().unwrap_or(0)
    }

    /// Whether any move immediately undoes the previous one.
    pub fn has_reversal(&self) -> bool {
        self.moves.windows(2).any(|w| w[1] == w[0].reverse())
    }

    /// Whether every straight run lies within `bounds`.
    pub fn respects(&self, bounds: &RunBounds) -> bool {
        self.runs()
            .iter()
            .all(|&(_, n)| n >= bounds.min && n <= bounds.max)
    }

    /// Re-walk the route over `grid`, summing entry costs of every cell
    /// after the first. Returns `None` if the route leaves the grid or a
    /// move does not connect consecutive cells.
    pub fn replay_cost(&self, grid: &CostGrid) -> Option<u64> {
        if self.cells.len() != self.moves.len() + 1 {
            return None;
        }
        let mut total = 0u64;
        for (pair, &m) in self.cells.windows(2).zip(&self.moves) {
            if pair[0].step(m) != pair[1] {
                return None;
            }
            total += u64::from(grid.cost(pair[1])?);
        }
        Some(total)
    }

    /// The moves as a compact string, e.g. `"RRDRU"`.
    pub fn moves_string(&self) -> String {
        self.moves.iter().map(|d| d.to_string()).collect()
    }
}
