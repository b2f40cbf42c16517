//! The [`CostGrid`] type: an immutable rectangular matrix of entry costs.
//!
//! Every cell holds the non-negative cost charged when a traveller *enters*
//! it. A `CostGrid` is validated once at construction (non-empty,
//! rectangular, no negative costs) and is read-only afterwards, so solvers
//! can index it without re-checking.
//!
//! The text format is one row per line, one decimal digit per cell:
//!
//! ```text
//! 2413
//! 3215
//! 3255
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::GridError;
use crate::geom::{Point, Range};

/// An immutable, non-empty, rectangular grid of cell entry costs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CostGrid {
    cells: Vec<u32>,
    width: usize,
    height: usize,
}

impl CostGrid {
    /// Build a grid from rows of signed integers.
    ///
    /// Fails on empty input, zero-width or ragged rows, negative costs and
    /// costs that do not fit in a `u32`.
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if width == 0 {
            return Err(GridError::Empty);
        }
        check_dimensions(width, rows.len())?;

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                if value < 0 {
                    return Err(GridError::NegativeCost { value, pos });
                }
                let cost =
                    u32::try_from(value).map_err(|_| GridError::CostTooLarge { value, pos })?;
                cells.push(cost);
            }
        }

        Ok(Self {
            cells,
            width,
            height: rows.len(),
        })
    }

    /// Build a `width` x `height` grid by evaluating `f` at every point in
    /// row-major order.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(Point) -> u32,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        check_dimensions(width, height)?;
        let cells = Range::new(0, 0, width as i32, height as i32)
            .iter()
            .map(&mut f)
            .collect();
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Parse the digit text format.
    ///
    /// Blank lines before the first row and after the last row are ignored,
    /// as are `\r` line endings. A blank line between rows is a ragged row.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let body = s.trim_matches(|c| c == '\n' || c == '\r');
        let mut cells = Vec::new();
        let mut width = 0;
        let mut height = 0;

        for (y, line) in body.lines().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let before = cells.len();
            for (x, ch) in line.chars().enumerate() {
                let digit = ch.to_digit(10).ok_or(GridError::InvalidDigit {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                cells.push(digit);
            }
            let found = cells.len() - before;
            if y == 0 {
                width = found;
            } else if found != width {
                return Err(GridError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            height += 1;
        }

        if width == 0 {
            return Err(GridError::Empty);
        }
        check_dimensions(width, height)?;
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Read the digit text format from a buffered reader.
    pub fn read<R: BufRead>(mut reader: R) -> Result<Self, GridError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Open and parse a grid file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The grid rectangle, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Whether `p` is a cell of this grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.index(p).is_some()
    }

    /// The bottom-right cell, the default destination of a query.
    #[inline]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.width as i32 - 1, self.height as i32 - 1)
    }

    /// Entry cost of the cell at `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn cost(&self, p: Point) -> Option<u32> {
        self.index(p).map(|i| self.cells[i])
    }

    /// All costs in row-major order.
    #[inline]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Row-major flat index of `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height {
            Some(p.y as usize * self.width + p.x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`index`](Self::index). `i` must be `< self.len()`.
    #[inline]
    pub fn point(&self, i: usize) -> Point {
        Point::new((i % self.width) as i32, (i / self.width) as i32)
    }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u32]> + '_ {
        self.cells.chunks_exact(self.width)
    }
}

impl FromStr for CostGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CostGrid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Route through `from_rows` so a deserialized grid is validated like
        // any other.
        #[derive(serde::Deserialize)]
        struct Raw {
            cells: Vec<i64>,
            width: usize,
            height: usize,
        }

        let raw = <Raw as serde::Deserialize>::deserialize(deserializer)?;
        if raw.width == 0 || raw.cells.len() != raw.width * raw.height {
            return Err(serde::de::Error::custom(format!(
                "{} cells do not form a {}x{} grid",
                raw.cells.len(),
                raw.width,
                raw.height
            )));
        }
        let rows: Vec<&[i64]> = raw.cells.chunks(raw.width).collect();
        Self::from_rows(rows.as_slice()).map_err(serde::de::Error::custom)
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), GridError> {
    for dim in [width, height] {
        if i32::try_from(dim).is_err() {
            return Err(GridError::TooLarge(dim));
        }
    }
    Ok(())
}
