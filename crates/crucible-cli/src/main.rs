//! `crucible`: print the minimum cost of crossing a digit grid under a
//! straight-run limit.
//!
//! Usage:
//!   crucible input.txt
//!   crucible input.txt --max-run 10 --min-run 4
//!   crucible input.txt --start 0,0 --end 12,12 --route
//!
//! Exit status is 0 with the cost on stdout, 2 if the destination cannot be
//! reached, and 1 for unreadable input or invalid parameters.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crucible_core::{CostGrid, GridError, Point};
use crucible_paths::{CrucibleRange, ProgressLog, Query, RunBounds, SolveError};
use thiserror::Error;

/// Minimum-cost path across a digit grid with bounded straight runs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid file: one row per line, one digit (0-9) per cell
    input: PathBuf,

    /// Maximum consecutive steps in one direction
    #[arg(long, default_value_t = RunBounds::DEFAULT_MAX)]
    max_run: u32,

    /// Minimum consecutive steps before turning or stopping
    #[arg(long, default_value_t = 1)]
    min_run: u32,

    /// Start cell as "x,y"
    #[arg(long, default_value = "0,0")]
    start: Point,

    /// Destination cell as "x,y" (default: bottom-right)
    #[arg(long)]
    end: Option<Point>,

    /// Also print the route's moves to stderr
    #[arg(long)]
    route: bool,

    /// Log search progress every N iterations (enables info logging)
    #[arg(long, value_name = "N")]
    progress: Option<u64>,
}

#[derive(Error, Debug)]
enum Failure {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Exit status for a finished run: 0 on success, 2 if the destination is
/// unreachable, 1 for bad input or parameters.
fn exit_code(result: &Result<Option<u64>, Failure>) -> u8 {
    match result {
        Ok(Some(_)) => 0,
        Ok(None) => 2,
        Err(_) => 1,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let default_filter = if args.progress.is_some() { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = run(&args);
    match &result {
        Ok(Some(cost)) => println!("{cost}"),
        Ok(None) => eprintln!("error: no route satisfies the run bounds"),
        Err(Failure::Grid(e)) => eprintln!("error: {}: {e}", args.input.display()),
        Err(Failure::Solve(e)) => eprintln!("error: {e}"),
    }
    ExitCode::from(exit_code(&result))
}

fn run(args: &Args) -> Result<Option<u64>, Failure> {
    let grid = CostGrid::open(&args.input)?;
    log::info!(
        "loaded {}x{} grid from {}",
        grid.width(),
        grid.height(),
        args.input.display()
    );

    let query = Query {
        start: args.start,
        end: args.end,
        bounds: RunBounds::new(args.min_run, args.max_run)?,
    };

    let mut cr = CrucibleRange::new();
    let mut progress = ProgressLog::new(args.progress.unwrap_or(ProgressLog::DEFAULT_EVERY));

    let cost = if args.route {
        let route = cr.route_with(&grid, &query, &mut progress)?;
        if let Some(route) = &route {
            eprintln!("{} moves: {}", route.moves.len(), route.moves_string());
        }
        route.map(|r| r.cost)
    } else {
        cr.cost_with(&grid, &query, &mut progress)?
    };

    log::debug!("{:?}", cr.stats());
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_grid(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("crucible-cli-{}-{name}", std::process::id()));
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["crucible", "grid.txt"]).unwrap();
        assert_eq!(args.max_run, 3);
        assert_eq!(args.min_run, 1);
        assert_eq!(args.start, Point::ZERO);
        assert_eq!(args.end, None);
        assert!(!args.route);
    }

    #[test]
    fn parses_points_and_bounds() {
        let args = Args::try_parse_from([
            "crucible", "grid.txt", "--max-run", "10", "--min-run", "4", "--start", "1,2",
            "--end", "3,4",
        ])
        .unwrap();
        assert_eq!(args.max_run, 10);
        assert_eq!(args.min_run, 4);
        assert_eq!(args.start, Point::new(1, 2));
        assert_eq!(args.end, Some(Point::new(3, 4)));
        assert!(Args::try_parse_from(["crucible", "grid.txt", "--start", "12"]).is_err());
        assert!(Args::try_parse_from(["crucible"]).is_err());
    }

    #[test]
    fn run_reports_cost_and_unreachable() {
        let path = write_grid("ok", "2413\n3215\n3255\n");
        let mut args = Args::try_parse_from(["crucible", "grid.txt"]).unwrap();
        args.input = path.clone();
        assert!(matches!(run(&args), Ok(Some(_))));

        args.route = true;
        assert!(matches!(run(&args), Ok(Some(_))));

        args.min_run = 4;
        args.max_run = 10;
        assert!(matches!(run(&args), Ok(None)));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn run_rejects_bad_input() {
        let path = write_grid("bad", "12\n3\n");
        let mut args = Args::try_parse_from(["crucible", "grid.txt"]).unwrap();
        args.input = path.clone();
        assert!(matches!(run(&args), Err(Failure::Grid(GridError::Ragged { .. }))));

        args.input = PathBuf::from("/nonexistent/crucible.txt");
        assert!(matches!(run(&args), Err(Failure::Grid(GridError::Io(_)))));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn exit_codes_follow_outcome() {
        assert_eq!(exit_code(&Ok(Some(0))), 0);
        assert_eq!(exit_code(&Ok(Some(102))), 0);
        assert_eq!(exit_code(&Ok(None)), 2);
        assert_eq!(exit_code(&Err(Failure::Grid(GridError::Empty))), 1);
        assert_eq!(
            exit_code(&Err(Failure::Solve(SolveError::InvalidRunBounds { min: 0, max: 0 }))),
            1
        );

        let path = write_grid("exit", "11\n11\n");
        let mut args = Args::try_parse_from(["crucible", "grid.txt"]).unwrap();
        args.input = path.clone();
        assert_eq!(exit_code(&run(&args)), 0);
        args.min_run = 3;
        assert_eq!(exit_code(&run(&args)), 2);
        args.min_run = 5;
        assert_eq!(exit_code(&run(&args)), 1);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn run_rejects_bad_parameters() {
        let path = write_grid("params", "19\n91\n");
        let mut args = Args::try_parse_from(["crucible", "grid.txt", "--max-run", "0"]).unwrap();
        args.input = path.clone();
        assert!(matches!(
            run(&args),
            Err(Failure::Solve(SolveError::InvalidRunBounds { .. }))
        ));

        args.max_run = 3;
        args.end = Some(Point::new(5, 5));
        assert!(matches!(
            run(&args),
            Err(Failure::Solve(SolveError::EndOutOfBounds { .. }))
        ));
        std::fs::remove_file(path).unwrap();
    }
}
