use std::collections::{BinaryHeap, HashMap};

use crucible_core::{CostGrid, Direction, Point};

use crate::query::RunBounds;
use crate::state::{Node, NodeRef, SearchState};

/// Counters describing the most recent query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Frontier pops, including stale duplicates.
    pub iterations: u64,
    /// States whose cost was finalised.
    pub settled: u64,
    /// Frontier pushes, including the four seeds.
    pub pushed: u64,
}

// ---------------------------------------------------------------------------
// StateLayout
// ---------------------------------------------------------------------------

/// Dense numbering of every (cell, heading, run) state of one query.
///
/// Runs are capped at the longer grid side: a state with run `r` has
/// already moved `r - 1` cells in a straight line, so longer runs cannot
/// exist regardless of the requested maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct StateLayout {
    pub(crate) width: usize,
    pub(crate) cells: usize,
    pub(crate) run_cap: u32,
}

impl StateLayout {
    pub(crate) fn new(grid: &CostGrid, bounds: RunBounds) -> Self {
        let longest = grid.width().max(grid.height());
        let run_cap = u32::try_from(longest).map_or(bounds.max, |l| bounds.max.min(l));
        Self {
            width: grid.width(),
            cells: grid.len(),
            run_cap,
        }
    }

    /// Number of distinct states.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.cells
            .saturating_mul(4)
            .saturating_mul(self.run_cap as usize)
    }

    /// Flat index of a state. `run` must be in `1..=run_cap`.
    #[inline]
    pub(crate) fn idx(&self, cell: usize, heading: Direction, run: u32) -> usize {
        (cell * 4 + heading.index()) * self.run_cap as usize + (run - 1) as usize
    }

    /// Inverse of [`idx`](Self::idx).
    #[inline]
    pub(crate) fn state(&self, idx: usize) -> SearchState {
        let cap = self.run_cap as usize;
        let run = (idx % cap) as u32 + 1;
        let rest = idx / cap;
        let heading = Direction::from_index(rest % 4);
        let cell = rest / 4;
        let pos = Point::new((cell % self.width) as i32, (cell / self.width) as i32);
        SearchState::new(pos, heading, run)
    }
}

// ---------------------------------------------------------------------------
// NodeStore
// ---------------------------------------------------------------------------

/// State-space size above which nodes live in a hash map instead of a dense
/// array. A dense slot costs 24 bytes whether or not the search reaches it.
pub(crate) const DENSE_LIMIT: usize = 1 << 20;

/// Per-state bookkeeping for one query, keyed by [`StateLayout::idx`].
pub(crate) enum NodeStore {
    /// One slot per state. Slots stamped with an older generation count as
    /// unvisited.
    Dense { nodes: Vec<Node>, generation: u32 },
    /// Only the states the current query has touched.
    Sparse(HashMap<usize, Node>),
}

impl Default for NodeStore {
    fn default() -> Self {
        NodeStore::Dense {
            nodes: Vec::new(),
            generation: 0,
        }
    }
}

impl NodeStore {
    /// Number of nodes held.
    pub(crate) fn len(&self) -> usize {
        match self {
            NodeStore::Dense { nodes, .. } => nodes.len(),
            NodeStore::Sparse(map) => map.len(),
        }
    }

    pub(crate) fn is_sparse(&self) -> bool {
        matches!(self, NodeStore::Sparse(_))
    }

    /// The node at `idx`, if the current query has touched it.
    pub(crate) fn get(&self, idx: usize) -> Option<&Node> {
        match self {
            NodeStore::Dense { nodes, generation } => {
                nodes.get(idx).filter(|n| n.generation == *generation)
            }
            NodeStore::Sparse(map) => map.get(&idx),
        }
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut Node> {
        match self {
            NodeStore::Dense { nodes, generation } => {
                let cur = *generation;
                nodes.get_mut(idx).filter(|n| n.generation == cur)
            }
            NodeStore::Sparse(map) => map.get_mut(&idx),
        }
    }

    /// The node at `idx`, created unvisited if the current query has not
    /// touched it yet.
    pub(crate) fn slot(&mut self, idx: usize) -> &mut Node {
        match self {
            NodeStore::Dense { nodes, generation } => {
                let n = &mut nodes[idx];
                if n.generation != *generation {
                    *n = Node {
                        generation: *generation,
                        ..Node::default()
                    };
                }
                n
            }
            NodeStore::Sparse(map) => map.entry(idx).or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// CrucibleRange
// ---------------------------------------------------------------------------

/// Turn-constrained shortest-path solver.
///
/// `CrucibleRange` owns the node store and the frontier so that repeated
/// queries reuse their allocations. Small state spaces use a dense array
/// where a new query only bumps a generation counter; larger ones switch to
/// a hash map holding just the states the search reaches. Each query is
/// independent; nothing is shared between solvers, so separate instances
/// can run on separate threads.
pub struct CrucibleRange {
    pub(crate) store: NodeStore,
    pub(crate) frontier: BinaryHeap<NodeRef>,
    pub(crate) layout: StateLayout,
    pub(crate) stats: SearchStats,
    dense_limit: usize,
}

impl Default for CrucibleRange {
    fn default() -> Self {
        Self {
            store: NodeStore::default(),
            frontier: BinaryHeap::new(),
            layout: StateLayout::default(),
            stats: SearchStats::default(),
            dense_limit: DENSE_LIMIT,
        }
    }
}

impl CrucibleRange {
    /// Create a solver with empty caches. They grow on first use.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_dense_limit(dense_limit: usize) -> Self {
        Self {
            dense_limit,
            ..Self::default()
        }
    }

    /// Counters for the most recent query.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Number of state nodes currently held: the dense array length, or
    /// the states the last query touched when the sparse store is in use.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.len()
    }

    /// Pick the node store for `grid` under `bounds` and start a new query.
    pub(crate) fn prepare(&mut self, grid: &CostGrid, bounds: RunBounds) {
        self.layout = StateLayout::new(grid, bounds);
        let needed = self.layout.len();

        if needed > self.dense_limit {
            log::debug!("{needed} states exceed the dense limit, using a sparse node store");
            match &mut self.store {
                NodeStore::Sparse(map) => map.clear(),
                store => *store = NodeStore::Sparse(HashMap::new()),
            }
            return;
        }

        match &mut self.store {
            NodeStore::Dense { nodes, generation } if nodes.len() >= needed => {
                *generation = generation.wrapping_add(1);
                if *generation == 0 {
                    // Wrapped: stale nodes could now alias the new generation.
                    nodes.fill(Node::default());
                    *generation = 1;
                }
            }
            store => {
                *store = NodeStore::Dense {
                    nodes: vec![Node::default(); needed],
                    generation: 1,
                }
            }
        }
    }
}
