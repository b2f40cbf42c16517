use crucible_core::{CostGrid, Direction, Point};

use crate::CrucibleRange;
use crate::error::SolveError;
use crate::observer::{NoopObserver, SearchObserver};
use crate::query::Query;
use crate::range::SearchStats;
use crate::route::Route;
use crate::state::{NO_PARENT, NodeRef};

/// How a search ended.
enum Outcome {
    /// `start == end` and no minimum run applies: nothing to do.
    AlreadyThere,
    /// The destination was entered from the state at node `last`.
    Found { cost: u64, last: usize },
    Unreachable,
}

impl CrucibleRange {
    /// Minimum cost of travelling from `query.start` to the destination.
    ///
    /// The start cell's own cost is never charged; every entered cell is.
    /// Returns `Ok(None)` if no route satisfies the run bounds.
    pub fn cost(&mut self, grid: &CostGrid, query: &Query) -> Result<Option<u64>, SolveError> {
        self.cost_with(grid, query, &mut NoopObserver)
    }

    /// [`cost`](Self::cost) with an observer for progress and cancellation.
    pub fn cost_with<O: SearchObserver>(
        &mut self,
        grid: &CostGrid,
        query: &Query,
        observer: &mut O,
    ) -> Result<Option<u64>, SolveError> {
        Ok(match self.search(grid, query, observer)? {
            Outcome::AlreadyThere => Some(0),
            Outcome::Found { cost, .. } => Some(cost),
            Outcome::Unreachable => None,
        })
    }

    /// A minimum-cost route, reconstructed from the predecessor recorded in
    /// each settled state. Returns `Ok(None)` if the destination is
    /// unreachable.
    pub fn route(&mut self, grid: &CostGrid, query: &Query) -> Result<Option<Route>, SolveError> {
        self.route_with(grid, query, &mut NoopObserver)
    }

    /// [`route`](Self::route) with an observer for progress and cancellation.
    pub fn route_with<O: SearchObserver>(
        &mut self,
        grid: &CostGrid,
        query: &Query,
        observer: &mut O,
    ) -> Result<Option<Route>, SolveError> {
        Ok(match self.search(grid, query, observer)? {
            Outcome::AlreadyThere => Some(Route {
                cost: 0,
                cells: vec![query.start],
                moves: Vec::new(),
            }),
            Outcome::Found { cost, last } => Some(self.walk_back(query.start, cost, last)),
            Outcome::Unreachable => None,
        })
    }

    /// Rebuild the route ending with the step taken from node `last`.
    fn walk_back(&self, start: Point, cost: u64, last: usize) -> Route {
        let mut moves = Vec::new();
        let mut ci = last;
        while ci != NO_PARENT {
            moves.push(self.layout.state(ci).heading);
            ci = self.store.get(ci).map_or(NO_PARENT, |n| n.parent);
        }
        moves.reverse();

        let mut cells = Vec::with_capacity(moves.len() + 1);
        cells.push(start);
        let mut p = start;
        for &m in &moves {
            p = p.step(m);
            cells.push(p);
        }
        Route { cost, cells, moves }
    }

    /// Uniform-cost search over (position, heading, run) states.
    ///
    /// Frontier duplicates are resolved lazily: an entry whose node was
    /// already settled, or whose pushed cost is stale, is skipped on pop.
    fn search<O: SearchObserver>(
        &mut self,
        grid: &CostGrid,
        query: &Query,
        observer: &mut O,
    ) -> Result<Outcome, SolveError> {
        let (start, end) = query.resolve(grid)?;
        let bounds = query.bounds;
        self.stats = SearchStats::default();

        // The empty route only counts when no minimum run applies.
        if start == end && bounds.min <= 1 {
            log::trace!("query {start} -> {end} is trivial");
            observer.on_found(0, 0);
            return Ok(Outcome::AlreadyThere);
        }

        self.prepare(grid, bounds);
        let layout = self.layout;
        let costs = grid.cells();
        let start_cell = grid.index(start).ok_or(SolveError::StartOutOfBounds {
            point: start,
            bounds: grid.bounds(),
        })?;

        log::debug!(
            "searching {start} -> {end} on {}x{} grid, runs {}..={} ({} states, {} store)",
            grid.width(),
            grid.height(),
            bounds.min,
            bounds.max,
            layout.len(),
            if self.store.is_sparse() { "sparse" } else { "dense" }
        );

        let mut frontier = std::mem::take(&mut self.frontier);
        frontier.clear();

        // One seed per heading, so the first move is unconstrained.
        for heading in Direction::ALL {
            let si = layout.idx(start_cell, heading, 1);
            let n = self.store.slot(si);
            n.cost = 0;
            n.parent = NO_PARENT;
            frontier.push(NodeRef { idx: si, cost: 0 });
        }
        self.stats.pushed = 4;

        let mut iterations = 0u64;
        let outcome = loop {
            let Some(current) = frontier.pop() else {
                observer.on_exhausted(iterations);
                break Outcome::Unreachable;
            };
            iterations += 1;
            observer.on_pop(iterations);
            if observer.is_cancelled() {
                self.stats.iterations = iterations;
                frontier.clear();
                self.frontier = frontier;
                log::debug!("search cancelled after {iterations} iterations");
                return Err(SolveError::Cancelled { iterations });
            }

            let ci = current.idx;
            let Some(node) = self.store.get_mut(ci) else {
                continue;
            };
            if node.settled || current.cost > node.cost {
                continue;
            }
            node.settled = true;
            self.stats.settled += 1;

            let state = layout.state(ci);
            observer.on_settle(state, current.cost);

            let next = state.target();
            let Some(next_cell) = grid.index(next) else {
                continue;
            };
            let new_cost = current.cost + u64::from(costs[next_cell]);

            if next == end && bounds.may_turn(state.run) {
                observer.on_found(new_cost, iterations);
                break Outcome::Found {
                    cost: new_cost,
                    last: ci,
                };
            }

            for heading in Direction::ALL {
                if heading == state.heading.reverse() {
                    continue;
                }
                let run = if heading == state.heading {
                    state.run + 1
                } else if bounds.may_turn(state.run) {
                    1
                } else {
                    continue;
                };
                if run > bounds.max || run > layout.run_cap {
                    continue;
                }

                let ni = layout.idx(next_cell, heading, run);
                let n = self.store.slot(ni);
                if n.settled || new_cost >= n.cost {
                    continue;
                }
                n.cost = new_cost;
                n.parent = ci;
                frontier.push(NodeRef {
                    idx: ni,
                    cost: new_cost,
                });
                self.stats.pushed += 1;
            }
        };

        self.stats.iterations = iterations;
        frontier.clear();
        self.frontier = frontier;

        log::debug!(
            "search {start} -> {end} finished: {}, {:?}",
            match outcome {
                Outcome::Found { cost, .. } => format!("cost {cost}"),
                _ => "unreachable".to_string(),
            },
            self.stats
        );
        Ok(outcome)
    }
}
