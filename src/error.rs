//! Error type shared by the grid, the maze carver and the path finder.

use thiserror::Error;

use crate::grid::Coord;

/// Failures reported by the maze core.
///
/// None of these are used for ordinary control flow: out-of-bounds lookups through
/// [`Grid::cell`](crate::grid::Grid::cell) return [`None`], and this enumeration only surfaces when
/// an operation cannot give a meaningful answer for the coordinates it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    /// A coordinate lies outside the grid extents.
    #[error("coordinate {0} lies outside the grid")]
    OutOfBounds(Coord),
    /// Two cells that do not share an edge were asked to share a passage.
    ///
    /// This indicates a bug in the caller; the carver only ever pairs orthogonal neighbors.
    #[error("cells {from} and {to} are not orthogonally adjacent")]
    InvalidAdjacency {
        /// Cell the passage was carved from.
        from: Coord,
        /// Cell the passage was carved towards.
        to: Coord,
    },
    /// A breadth-first search drained its queue without reaching the goal.
    #[error("no open route leads from {start} to {goal}")]
    NoPathFound {
        /// Cell the search was seeded with.
        start: Coord,
        /// Cell the search was looking for.
        goal: Coord,
    },
    /// A path follower was given a speed or cell size that is not a positive finite number.
    ///
    /// Such a follower could never close the distance to a waypoint and would stay moving forever.
    #[error("follower {0} must be a positive finite number")]
    InvalidMotion(&'static str),
}
