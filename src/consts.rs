//! Engine defaults
use std::time::Duration;

/// Default number of rows in the grid
pub(crate) const DEFAULT_ROWS: u16 = 20;

/// Default number of columns in the grid
pub(crate) const DEFAULT_COLS: u16 = 20;

/// Default side length of a grid cell, in pixels
pub(crate) const DEFAULT_BLOCK_SIZE: u16 = 25;

/// Column & row of the cell at which the snake's head starts
pub(crate) const START_CELL: u16 = 5;

/// Default number of obstacles placed at the start of a game
pub(crate) const DEFAULT_OBSTACLES: usize = 5;

/// Time between ticks before any food has been eaten
pub(crate) const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);

/// Lower bound on the time between ticks, however fast the snake gets
pub(crate) const DEFAULT_MIN_TICK_PERIOD: Duration = Duration::from_millis(40);

/// Speed multiplier at the start of a game
pub(crate) const INITIAL_SPEED: f64 = 1.0;

/// How much the speed multiplier increases upon eating a food
pub(crate) const SPEED_INCREMENT: f64 = 0.1;
