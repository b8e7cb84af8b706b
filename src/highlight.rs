//! Visualization hooks for the carver and the path finder.
//!
//! The maze core reports which cells it is working on through the [`Highlight`] trait. Nothing
//! reads those notifications back, so plugging in [`NoHighlight`] never changes the maze that is
//! carved or the path that is found.

use crate::grid::{Coord, Grid};

/// Visual state a cell can be painted with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tint {
    /// Untouched floor.
    #[default]
    Plain,
    /// Cell on top of the carving stack.
    Current,
    /// Cell the carver has already reached.
    Visited,
    /// Cell the carver is backing out of.
    Backtrack,
    /// Cell on the route the agent is about to walk.
    Path,
}

/// Sink for visualization notifications.
pub trait Highlight {
    /// Paints `coord` with `tint`.
    fn tint(&mut self, coord: Coord, tint: Tint);

    /// Returns every cell to [`Tint::Plain`].
    fn clear(&mut self);
}

/// Highlight sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighlight;

impl Highlight for NoHighlight {
    fn tint(&mut self, _coord: Coord, _tint: Tint) {}

    fn clear(&mut self) {}
}

/// Per-cell tint storage read back by the terminal renderer.
///
/// This structure holds the last tint each cell was given. The algorithms only write to it through
/// [`Highlight`], and the renderer reads it back once per frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TintMap {
    /// Row length of the grid the map was sized for.
    width: usize,
    /// Number of rows of the grid the map was sized for.
    height: usize,
    /// Tints stored row by row, bottom row first.
    ///
    /// This field uses the same layout as the grid's cells. Tints for coordinates outside the map
    /// are dropped rather than stored.
    tints: Vec<Tint>,
}

impl TintMap {
    /// Creates a map sized for `grid` with every cell plain.
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            tints: vec![Tint::Plain; grid.len()],
        }
    }

    /// Tint of `coord`; cells outside the map read as [`Tint::Plain`].
    pub fn get(&self, coord: Coord) -> Tint {
        self.slot(coord)
            .and_then(|idx| self.tints.get(idx))
            .copied()
            .unwrap_or_default()
    }

    /// Every non-plain cell together with its tint.
    pub fn tinted(&self) -> impl Iterator<Item = (Coord, Tint)> + '_ {
        self.tints
            .iter()
            .enumerate()
            .filter(|(_, tint)| **tint != Tint::Plain)
            .filter_map(|(idx, tint)| {
                let x = idx.checked_rem(self.width)?;
                let z = idx.checked_div(self.width)?;
                Some((Coord::new(x, z), *tint))
            })
    }

    /// Storage slot for `coord`.
    const fn slot(&self, coord: Coord) -> Option<usize> {
        if coord.x < self.width && coord.z < self.height {
            Some(coord.z * self.width + coord.x)
        } else {
            None
        }
    }
}

impl Highlight for TintMap {
    fn tint(&mut self, coord: Coord, tint: Tint) {
        if let Some(slot) = self.slot(coord).and_then(|idx| self.tints.get_mut(idx)) {
            *slot = tint;
        }
    }

    fn clear(&mut self) {
        self.tints.fill(Tint::Plain);
    }
}
