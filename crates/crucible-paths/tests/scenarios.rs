use crucible_core::{CostGrid, Direction, Point};
use crucible_paths::{CrucibleRange, ProgressLog, Query, RunBounds, SolveError, solve};

const SAMPLE: &str = "\
2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

const STRIPES: &str = "\
111111111111
999999999991
999999999991
999999999991
999999999991
";

fn sample() -> CostGrid {
    SAMPLE.parse().unwrap()
}

#[test]
fn sample_grid_with_max_run_three() {
    assert_eq!(solve(&sample(), 3, Point::ZERO, None), Ok(Some(102)));
}

#[test]
fn sample_grid_with_runs_four_to_ten() {
    let mut cr = CrucibleRange::new();
    let query = Query::new(Point::ZERO).bounds(RunBounds::new(4, 10).unwrap());
    assert_eq!(cr.cost(&sample(), &query), Ok(Some(94)));
}

#[test]
fn stripes_grid_minimum_run_forces_long_route() {
    let grid: CostGrid = STRIPES.parse().unwrap();
    let mut cr = CrucibleRange::new();
    let strict = Query::new(Point::ZERO).bounds(RunBounds::new(4, 10).unwrap());
    assert_eq!(cr.cost(&grid, &strict), Ok(Some(71)));
    let route = cr.route(&grid, &strict).unwrap().unwrap();
    assert!(route.respects(&strict.bounds));
    assert_eq!(route.replay_cost(&grid), Some(71));

    // Without a minimum the traveller can cut through the 9s sooner.
    assert_eq!(cr.cost(&grid, &Query::new(Point::ZERO)), Ok(Some(59)));
}

#[test]
fn sample_route_is_consistent() {
    let grid = sample();
    let mut cr = CrucibleRange::new();
    let query = Query::new(Point::ZERO);
    let route = cr.route(&grid, &query).unwrap().unwrap();

    assert_eq!(route.cost, 102);
    assert_eq!(route.start(), Some(Point::ZERO));
    assert_eq!(route.end(), Some(grid.bottom_right()));
    assert_eq!(route.moves.len() + 1, route.cells.len());
    assert!(route.longest_run() <= 3);
    assert!(!route.has_reversal());
    assert_eq!(route.replay_cost(&grid), Some(102));
}

#[test]
fn explicit_endpoints() {
    let grid = sample();
    let mut cr = CrucibleRange::new();
    let back = Query::new(grid.bottom_right()).to(Point::ZERO);
    assert_eq!(cr.cost(&grid, &back), Ok(Some(101)));
    let inner = Query::new(Point::new(6, 6)).to(Point::new(0, 12));
    assert_eq!(cr.cost(&grid, &inner), Ok(Some(52)));
}

#[test]
fn trivial_and_tiny_grids() {
    let one: CostGrid = "5".parse().unwrap();
    assert_eq!(solve(&one, 3, Point::ZERO, Some(Point::ZERO)), Ok(Some(0)));
    assert_eq!(solve(&one, 3, Point::ZERO, None), Ok(Some(0)));

    let pair = CostGrid::from_rows(&[[3, 7]]).unwrap();
    assert_eq!(solve(&pair, 3, Point::ZERO, Some(Point::new(1, 0))), Ok(Some(7)));
    // Walking back charges the start cell of the reversed query.
    assert_eq!(solve(&pair, 3, Point::new(1, 0), Some(Point::ZERO)), Ok(Some(3)));
}

#[test]
fn straight_corridor_beyond_max_run_is_unreachable() {
    let corridor = CostGrid::from_rows(&[[1, 1, 1, 1, 1]]).unwrap();
    let end = Some(Point::new(4, 0));
    assert_eq!(solve(&corridor, 2, Point::ZERO, end), Ok(None));
    assert_eq!(solve(&corridor, 3, Point::ZERO, end), Ok(None));
    assert_eq!(solve(&corridor, 4, Point::ZERO, end), Ok(Some(4)));
}

#[test]
fn unreachable_is_distinct_from_zero_cost() {
    let zeros = CostGrid::from_rows(&[[0, 0, 0, 0]]).unwrap();
    assert_eq!(solve(&zeros, 3, Point::ZERO, None), Ok(Some(0)));
    assert_eq!(solve(&zeros, 2, Point::ZERO, None), Ok(None));
}

#[test]
fn minimum_run_on_single_cell_is_unreachable() {
    let one: CostGrid = "7".parse().unwrap();
    let mut cr = CrucibleRange::new();
    let query = Query::new(Point::ZERO).bounds(RunBounds::new(4, 10).unwrap());
    assert_eq!(cr.cost(&one, &query), Ok(None));
    assert_eq!(cr.route(&one, &query), Ok(None));
}

#[test]
fn invalid_parameters_are_rejected() {
    let grid = sample();
    assert_eq!(
        solve(&grid, 0, Point::ZERO, None),
        Err(SolveError::InvalidRunBounds { min: 1, max: 0 })
    );
    assert!(matches!(
        solve(&grid, 3, Point::new(13, 0), None),
        Err(SolveError::StartOutOfBounds { .. })
    ));
    assert!(matches!(
        solve(&grid, 3, Point::ZERO, Some(Point::new(0, 13))),
        Err(SolveError::EndOutOfBounds { .. })
    ));

    let mut cr = CrucibleRange::new();
    let inverted = Query::new(Point::ZERO).bounds(RunBounds { min: 5, max: 4 });
    assert_eq!(
        cr.cost(&grid, &inverted),
        Err(SolveError::InvalidRunBounds { min: 5, max: 4 })
    );
}

#[test]
fn max_run_one_zigzags() {
    let grid = CostGrid::from_fn(4, 4, |_| 1).unwrap();
    let mut cr = CrucibleRange::new();
    let route = cr
        .route(&grid, &Query::new(Point::ZERO).max_run(1))
        .unwrap()
        .unwrap();
    assert_eq!(route.cost, 6);
    assert_eq!(route.longest_run(), 1);
    for pair in route.moves.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
    assert!(route.moves.iter().all(|&m| m == Direction::Right || m == Direction::Down));
}

#[test]
fn progress_observer_does_not_change_result() {
    let grid = sample();
    let mut cr = CrucibleRange::new();
    let query = Query::new(Point::ZERO);
    let mut progress = ProgressLog::new(10);
    let observed = cr.cost_with(&grid, &query, &mut progress);
    let stats = cr.stats();
    assert_eq!(observed, Ok(Some(102)));
    assert!(stats.iterations >= stats.settled);
    assert!(stats.settled > 0);
}
