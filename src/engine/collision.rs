use super::grid::{Grid, Position};
use std::collections::VecDeque;
use std::fmt;

/// What the snake's head ran into
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Collision {
    /// The head landed on an obstacle
    Obstacle,

    /// The head left the grid.  Wrapping makes this unreachable in practice.
    OutOfBounds,

    /// The head landed on the snake's own body
    Body,
}

impl Collision {
    fn as_str(self) -> &'static str {
        match self {
            Collision::Obstacle => "hit an obstacle",
            Collision::OutOfBounds => "left the grid",
            Collision::Body => "hit its own body",
        }
    }
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Check the head against the obstacles, the grid bounds, and the body, in
/// that order, and report the first thing it collides with.
pub(super) fn detect(
    grid: Grid,
    head: Position,
    body: &VecDeque<Position>,
    obstacles: &[Position],
) -> Option<Collision> {
    if obstacles.contains(&head) {
        Some(Collision::Obstacle)
    } else if !grid.contains(head) {
        Some(Collision::OutOfBounds)
    } else if body.contains(&head) {
        Some(Collision::Body)
    } else {
        None
    }
}
