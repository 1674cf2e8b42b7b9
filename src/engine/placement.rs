//! Random placement of food and obstacles.
//!
//! Placement never looks at what already occupies a cell: food may land on
//! the snake or an obstacle, and obstacles may coincide with each other or
//! with the snake's starting cell.
use super::grid::{Grid, Position};
use rand::Rng;

/// Choose a cell for the food, uniformly over the whole grid
pub(crate) fn place_food<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Position {
    grid.random_cell(rng)
}

/// Choose `count` obstacle cells, each independently and uniformly over the
/// whole grid
pub(crate) fn generate_obstacles<R: Rng + ?Sized>(
    grid: Grid,
    count: usize,
    rng: &mut R,
) -> Vec<Position> {
    std::iter::repeat_with(|| grid.random_cell(&mut *rng))
        .take(count)
        .collect()
}
