use super::collision::Collision;
use super::grid::Position;

/// A read-only view of the engine state, produced after every tick for the
/// rendering and UI layers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    /// The position of the snake's head
    pub head: Position,

    /// The snake's body segments, most recent first
    pub body: Vec<Position>,

    /// The position of the food
    pub food: Position,

    /// The positions of the obstacles
    pub obstacles: Vec<Position>,

    /// The number of foods eaten so far
    pub score: u32,

    /// Whether the game has ended
    pub game_over: bool,

    /// What ended the game, if it has ended
    pub cause: Option<Collision>,
}
