//! Maze carving, shortest-route search and an agent that walks the route, with a terminal front
//! end.
//!
//! The library core is independent of the terminal: [`grid`] holds the maze, [`generator`] carves
//! it with a randomized depth-first search, [`pathfinding`] finds a shortest route with a
//! breadth-first search and [`follow`] walks an agent along it one frame at a time. The [`App`]
//! type drives all of them from a Ratatui interface.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod config;
pub mod error;
mod events;
pub mod follow;
pub mod generator;
pub mod grid;
pub mod highlight;
pub mod logging;
pub mod pathfinding;
mod types;
mod ui;

pub use app::App;
pub use config::{Args, Config};
pub use error::MazeError;
