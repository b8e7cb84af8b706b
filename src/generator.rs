//! Maze carving module.
//!
//! This module contains the randomized depth-first carver. It walks the grid with an explicit
//! stack rather than recursion, so the depth it can reach is bounded by the number of cells and
//! not by the call stack. The carver can be driven to completion in one call with [`carve`] or
//! advanced one iteration at a time with [`Carver::step`] when the host wants to animate it.

use rand::{seq::SliceRandom as _, Rng};
use tracing::debug;

use crate::{
    error::MazeError,
    grid::{Coord, Grid},
    highlight::{Highlight, Tint},
};

/// Cell every maze is carved from.
pub const ORIGIN: Coord = Coord::new(0, 0);

/// Outcome of a single carving iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveStep {
    /// A passage was opened and the carver moved into a fresh cell.
    Advanced {
        /// Cell the passage was opened from.
        from: Coord,
        /// Cell the carver moved into.
        to: Coord,
    },
    /// The top cell had no unvisited neighbors left and was popped.
    Backtracked(Coord),
    /// The stack is empty; every cell reachable from [`ORIGIN`] has been carved into.
    Finished,
}

/// Resumable state of a depth-first carve.
///
/// This structure holds everything the carving loop needs between two iterations, so the host can
/// interleave steps with frames when it animates generation. The carver keeps its own visited set
/// sized to the grid it was created for; grid cells carry no traversal state of their own.
#[derive(Debug, Clone)]
pub struct Carver {
    /// Path from [`ORIGIN`] to the cell currently being extended.
    ///
    /// This field holds the cells of the current branch, the top being the one the next step
    /// extends or pops. The carve is finished once it is empty, and it never holds more cells than
    /// the grid has.
    stack: Vec<Coord>,
    /// Visited flags in the grid's row-major order.
    ///
    /// This field marks every cell that has been pushed at least once. A cell is marked when it is
    /// pushed, so no cell is ever pushed twice.
    visited: Vec<bool>,
    /// Number of walls knocked down so far.
    ///
    /// This field grows by one per advancing step and reaches `width * height - 1` on a finished
    /// carve.
    opened: usize,
}

impl Carver {
    /// Prepares a carve of `grid` starting at [`ORIGIN`].
    ///
    /// An empty grid yields a carver that is already finished.
    pub fn new(grid: &Grid) -> Self {
        let mut visited = vec![false; grid.len()];
        let mut stack = Vec::with_capacity(grid.len());

        if let Some(seen) = grid.index(ORIGIN).and_then(|idx| visited.get_mut(idx)) {
            *seen = true;
            stack.push(ORIGIN);
        }

        Self {
            stack,
            visited,
            opened: 0,
        }
    }

    /// Returns whether the carve has run to completion.
    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of passages opened so far.
    pub const fn passages_opened(&self) -> usize {
        self.opened
    }

    /// Cell on top of the stack, if any.
    pub fn current(&self) -> Option<Coord> {
        self.stack.last().copied()
    }

    /// Runs one iteration of the carving loop.
    ///
    /// The top of the stack is peeked, not popped. Its unvisited in-bounds neighbors are gathered
    /// without looking at walls, since no wall around an unvisited cell has been touched yet. One
    /// of them is picked uniformly at random, the wall between is removed and the chosen cell is
    /// pushed. When there is no candidate the top is popped instead.
    ///
    /// # Errors
    ///
    /// This function may return errors from [`Grid::remove_wall_between`] if the carver is driven
    /// against a grid other than the one it was created for.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        sink: &mut dyn Highlight,
    ) -> Result<CarveStep, MazeError> {
        let Some(&current) = self.stack.last() else {
            return Ok(CarveStep::Finished);
        };

        let view = &*grid;
        let candidates: Vec<Coord> = view
            .neighbors(current)
            .filter(|&next| !self.is_visited(view, next))
            .collect();

        if let Some(&next) = candidates.choose(rng) {
            grid.remove_wall_between(current, next)?;
            self.mark_visited(grid, next);
            self.stack.push(next);
            self.opened += 1;

            sink.tint(current, Tint::Visited);
            sink.tint(next, Tint::Current);

            return Ok(CarveStep::Advanced {
                from: current,
                to: next,
            });
        }

        let _ = self.stack.pop();
        sink.tint(current, Tint::Visited);
        match self.stack.last() {
            Some(&below) => sink.tint(below, Tint::Backtrack),
            None => {
                debug!(passages = self.opened, "maze carving finished");
                sink.clear();
            }
        }

        Ok(CarveStep::Backtracked(current))
    }

    /// Returns whether `coord` has been reached; anything outside the grid counts as reached.
    fn is_visited(&self, grid: &Grid, coord: Coord) -> bool {
        grid.index(coord)
            .and_then(|idx| self.visited.get(idx))
            .copied()
            .unwrap_or(true)
    }

    /// Records that `coord` has been reached.
    fn mark_visited(&mut self, grid: &Grid, coord: Coord) {
        if let Some(seen) = grid.index(coord).and_then(|idx| self.visited.get_mut(idx)) {
            *seen = true;
        }
    }
}

/// Carves a perfect maze into `grid` in one go.
///
/// The result is a spanning tree over the cells: every cell is reachable from [`ORIGIN`] and
/// exactly `width * height - 1` passages are opened. Returns the number of passages opened.
///
/// # Errors
///
/// This function may return errors from [`Carver::step`].
pub fn carve<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    sink: &mut dyn Highlight,
) -> Result<usize, MazeError> {
    let mut carver = Carver::new(grid);
    while !carver.is_finished() {
        let _ = carver.step(grid, rng, sink)?;
    }

    Ok(carver.passages_opened())
}

/// Builds a fresh `width` by `height` grid and carves a maze into it.
///
/// # Errors
///
/// This function may return errors from [`carve`].
pub fn generate<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    rng: &mut R,
    sink: &mut dyn Highlight,
) -> Result<Grid, MazeError> {
    let mut grid = Grid::new(width, height);
    let opened = carve(&mut grid, rng, sink)?;
    debug!(width, height, opened, "generated maze");

    Ok(grid)
}
