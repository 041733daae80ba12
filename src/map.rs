//! Occupancy grid: the static wall/open map the rays are traced through.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

pub const WALL_SYMBOL: char = '#';
pub const OPEN_SYMBOL: char = '.';
pub const COMMENT_MARKER: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
}

impl Cell {
    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            WALL_SYMBOL => Some(Cell::Wall),
            OPEN_SYMBOL => Some(Cell::Open),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Wall => WALL_SYMBOL,
            Cell::Open => OPEN_SYMBOL,
        }
    }
}

/// Failures while turning a map source into an [`OccupancyGrid`].
///
/// Line and column numbers are 1-based and refer to the raw source text.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("unable to read map file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("map contains no rows")]
    Empty,

    #[error("inconsistent row length on line {line}: expected {expected} cells, found {found}")]
    InconsistentRowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid symbol {symbol:?} on line {line}, column {column}")]
    InvalidSymbol {
        line: usize,
        column: usize,
        symbol: char,
    },
}

/// Rectangular wall/open grid, addressed as (column, row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>, // row-major, width * height
}

impl OccupancyGrid {
    /// Parses the `#`/`.` text format. Blank lines and `;` comment lines are skipped.
    pub fn parse(source: &str) -> Result<Self, MapError> {
        let mut width = 0usize;
        let mut height = 0usize;
        let mut cells = Vec::new();

        for (idx, raw) in source.lines().enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.is_empty() || line.starts_with(COMMENT_MARKER) {
                continue;
            }

            let row_start = cells.len();
            for (col, symbol) in line.chars().enumerate() {
                let cell = Cell::from_symbol(symbol).ok_or(MapError::InvalidSymbol {
                    line: idx + 1,
                    column: col + 1,
                    symbol,
                })?;
                cells.push(cell);
            }

            let found = cells.len() - row_start;
            if height == 0 {
                width = found;
            } else if found != width {
                return Err(MapError::InconsistentRowLength {
                    line: idx + 1,
                    expected: width,
                    found,
                });
            }
            height += 1;
        }

        if height == 0 {
            return Err(MapError::Empty);
        }

        debug!(width, height, "parsed occupancy grid");
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Reads and parses a map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// In-bounds cell read; `None` outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Anything outside the grid counts as a wall, so traversal always terminates.
    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_none_or(|cell| cell == Cell::Wall)
    }

    /// `preferred` if it lies in an open cell, otherwise the centre of the first open
    /// cell in row-major order.
    pub fn spawn_point(&self, preferred: [f64; 2]) -> Option<[f64; 2]> {
        let px = preferred[0].floor();
        let py = preferred[1].floor();
        if px.is_finite() && py.is_finite() && !self.is_wall(px as i32, py as i32) {
            return Some(preferred);
        }

        let idx = self.cells.iter().position(|&cell| cell == Cell::Open)?;
        let x = idx % self.width;
        let y = idx / self.width;
        Some([x as f64 + 0.5, y as f64 + 0.5])
    }
}

impl FromStr for OccupancyGrid {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
