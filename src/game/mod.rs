//! Tile grid, compiled-in levels and the snake simulation that runs on them.

mod grid;
pub mod level;
mod session;
mod snake;

pub use grid::{Grid, Position};
pub use level::LEVEL_COUNT;
pub use session::{GameSession, SimEvent};
pub use snake::Direction;
