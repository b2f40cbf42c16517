use crucible_core::{Direction, Point};

/// A node of the augmented search graph.
///
/// The traveller stands at `pos` and is committed to stepping along
/// `heading`; that step will be the `run`-th consecutive one in this
/// heading. Two states are the same node iff all three fields match, so one
/// grid cell is visited once per (heading, run) combination.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchState {
    pub pos: Point,
    pub heading: Direction,
    pub run: u32,
}

impl SearchState {
    #[inline]
    pub const fn new(pos: Point, heading: Direction, run: u32) -> Self {
        Self { pos, heading, run }
    }

    /// The cell this state steps into.
    #[inline]
    pub fn target(&self) -> Point {
        self.pos.step(self.heading)
    }
}

// ---------------------------------------------------------------------------
// Internal node for the priority-queue search
// ---------------------------------------------------------------------------

/// Sentinel parent index for seed states.
pub(crate) const NO_PARENT: usize = usize::MAX;

#[derive(Clone)]
pub(crate) struct Node {
    /// Best known accumulated cost.
    pub(crate) cost: u64,
    /// Index of the state that produced `cost`.
    pub(crate) parent: usize,
    /// Query stamp, used by the dense store only.
    pub(crate) generation: u32,
    pub(crate) settled: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            cost: u64::MAX,
            parent: NO_PARENT,
            generation: 0,
            settled: false,
        }
    }
}

/// Frontier entry: a node index and the cost it was pushed with, ordered so
/// that `BinaryHeap` (a max-heap) pops the smallest cost first. Ties are
/// left to the heap.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) cost: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.cost.cmp(&self.cost)
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
