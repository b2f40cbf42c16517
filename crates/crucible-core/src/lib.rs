//! **crucible-core** provides core types for turn-constrained path search on
//! weighted grids.
//!
//! This crate provides the foundational types shared by the *crucible*
//! crates: geometry primitives ([`Point`], [`Range`], [`Direction`]) and the
//! validated, immutable [`CostGrid`] together with its text ingestion.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::{GridError, ParsePointError};
pub use geom::{Direction, Point, Range};
pub use grid::CostGrid;
