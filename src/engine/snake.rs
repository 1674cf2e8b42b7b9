use super::direction::Direction;
use super::grid::{Grid, Position};
use std::collections::VecDeque;

/// Snake state.
///
/// Positions are grid-aligned pixel offsets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The cells previously occupied by the head, with the most recent at the
    /// front
    pub(super) body: VecDeque<Position>,

    /// The direction the snake will move on the next tick; `None` while the
    /// snake is standing still
    pub(super) velocity: Option<Direction>,

    /// The direction the snake moved on the last tick
    pub(super) heading: Option<Direction>,
}

impl Snake {
    /// Create a motionless snake with its head at `head` and an empty body
    pub(super) fn new(head: Position) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            velocity: None,
            heading: None,
        }
    }

    pub(super) fn head(&self) -> Position {
        self.head
    }

    pub(super) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// The current velocity as a unit vector; `(0, 0)` while motionless
    pub(super) fn velocity(&self) -> (i64, i64) {
        self.velocity.map_or((0, 0), Direction::unit)
    }

    /// Steer the snake towards `direction`.  The request is refused (and
    /// `false` returned) if it would reverse either the current velocity or
    /// the direction of the last move.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        let reverses = |d: Option<Direction>| d.is_some_and(|d| d.reverse() == direction);
        if reverses(self.velocity) || reverses(self.heading) {
            return false;
        }
        self.velocity = Some(direction);
        true
    }

    /// Move the head one cell along the current velocity, wrapping around
    /// the edges of `grid`.  The old head becomes the first body segment; the
    /// last segment is dropped unless `grow` is true.
    pub(super) fn advance(&mut self, grid: Grid, grow: bool) {
        let next = match self.velocity {
            Some(d) => d.step(self.head, grid.block()),
            None => self.head,
        };
        self.body.push_front(self.head);
        if !grow {
            let _ = self.body.pop_back();
        }
        self.head = grid.wrap(next);
        self.heading = self.velocity;
    }
}
