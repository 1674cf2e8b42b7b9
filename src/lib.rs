//! A snake simulation on a toroidal grid.
//!
//! The [`engine`] module holds the whole game: an [`Engine`] owns the snake,
//! the food, the obstacles, and the score, and advances them one cell per
//! call to [`Engine::tick()`].  Each tick returns a [`Snapshot`] for a front
//! end to draw.  Steering is done with [`Engine::set_direction()`].
//!
//! [`config`] reads engine settings from a TOML file.
pub mod config;
mod consts;
pub mod engine;
pub use crate::engine::{Direction, Engine, Snapshot};
