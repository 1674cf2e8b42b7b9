use crate::consts;
use rand::Rng;
use std::fmt;
use thiserror::Error;

/// A grid-aligned position, in pixel offsets from the top-left corner of the
/// grid.
///
/// Values are signed so that a head stepping off the top or left edge can be
/// represented before it is wrapped back onto the grid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64) -> Position {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The dimensions of the playing field: `rows × cols` square cells, each
/// `block_size` pixels on a side.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Grid {
    rows: u16,
    cols: u16,
    block_size: u16,
}

impl Grid {
    /// Construct a grid, rejecting any zero dimension.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `rows`, `cols`, or `block_size` is zero.
    pub fn new(rows: u16, cols: u16, block_size: u16) -> Result<Grid, GridError> {
        if rows == 0 {
            return Err(GridError::NotPositive("rows"));
        }
        if cols == 0 {
            return Err(GridError::NotPositive("cols"));
        }
        if block_size == 0 {
            return Err(GridError::NotPositive("block size"));
        }
        Ok(Grid {
            rows,
            cols,
            block_size,
        })
    }

    pub fn rows(self) -> u16 {
        self.rows
    }

    pub fn cols(self) -> u16 {
        self.cols
    }

    pub fn block_size(self) -> u16 {
        self.block_size
    }

    /// Width of the grid in pixels (`cols * block_size`)
    pub fn width(self) -> i64 {
        i64::from(self.cols) * self.block()
    }

    /// Height of the grid in pixels (`rows * block_size`)
    pub fn height(self) -> i64 {
        i64::from(self.rows) * self.block()
    }

    pub(crate) fn block(self) -> i64 {
        i64::from(self.block_size)
    }

    /// Return the position of the cell in column `col` and row `row`
    pub fn cell(self, col: u16, row: u16) -> Position {
        Position::new(
            i64::from(col) * self.block(),
            i64::from(row) * self.block(),
        )
    }

    /// Return the `(column, row)` of the cell at `pos`, or `None` if `pos` is
    /// off the grid.
    pub fn cell_of(self, pos: Position) -> Option<(u16, u16)> {
        if !self.contains(pos) {
            return None;
        }
        let col = u16::try_from(pos.x / self.block()).ok()?;
        let row = u16::try_from(pos.y / self.block()).ok()?;
        Some((col, row))
    }

    /// Test whether `pos` lies within `[0, width) × [0, height)`
    pub fn contains(self, pos: Position) -> bool {
        (0..self.width()).contains(&pos.x) && (0..self.height()).contains(&pos.y)
    }

    /// Bring a position that has stepped at most one cell off an edge back
    /// onto the opposite edge.
    pub fn wrap(self, pos: Position) -> Position {
        Position {
            x: wrap_axis(pos.x, self.width(), self.block()),
            y: wrap_axis(pos.y, self.height(), self.block()),
        }
    }

    /// The cell at which a new snake's head is placed: column 5, row 5, or
    /// the last column/row on grids too small for that.
    pub fn start_position(self) -> Position {
        self.cell(
            consts::START_CELL.min(self.cols - 1),
            consts::START_CELL.min(self.rows - 1),
        )
    }

    /// Sample a cell uniformly at random, column before row.
    pub fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Position {
        let col = rng.random_range(0..self.cols);
        let row = rng.random_range(0..self.rows);
        self.cell(col, row)
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid {
            rows: consts::DEFAULT_ROWS,
            cols: consts::DEFAULT_COLS,
            block_size: consts::DEFAULT_BLOCK_SIZE,
        }
    }
}

fn wrap_axis(v: i64, extent: i64, block: i64) -> i64 {
    if v < 0 {
        extent - block
    } else if v >= extent {
        0
    } else {
        v
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum GridError {
    #[error("grid {0} must be positive")]
    NotPositive(&'static str),
}
