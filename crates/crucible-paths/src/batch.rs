use crucible_core::CostGrid;
use rayon::prelude::*;

use crate::CrucibleRange;
use crate::error::SolveError;
use crate::query::Query;

/// Solve independent queries in parallel. Each rayon worker reuses one
/// [`CrucibleRange`] across the jobs it picks up. Results are returned in
/// job order.
///
/// `workers == None` runs on rayon's global pool. Explicit values build a
/// dedicated pool, clamped to `[1, 64]` threads.
pub fn solve_batch(
    jobs: &[(&CostGrid, Query)],
    workers: Option<usize>,
) -> Vec<Result<Option<u64>, SolveError>> {
    if jobs.is_empty() {
        return Vec::new();
    }
    log::debug!("solving {} queries", jobs.len());

    let run = || -> Vec<Result<Option<u64>, SolveError>> {
        jobs.par_iter()
            .map_init(CrucibleRange::new, |cr, (grid, query)| cr.cost(grid, query))
            .collect()
    };

    let Some(n) = workers else {
        return run();
    };
    match rayon::ThreadPoolBuilder::new()
        .num_threads(n.clamp(1, 64))
        .build()
    {
        Ok(pool) => pool.install(run),
        Err(e) => {
            log::warn!("could not build a {n}-thread pool ({e}), using the global pool");
            run()
        }
    }
}
