//! Grid model module.
//!
//! This module contains the data-only description of a maze: a fixed rectangle of cells, each
//! carrying four wall flags. Every lookup is bounds-checked and answers [`None`] outside the grid,
//! so the carver and the path finder can probe neighbors without validating coordinates first.

use std::fmt;

use crate::error::MazeError;

/// Integer coordinates of a cell.
///
/// `x` grows towards [`Direction::Right`] and `z` grows towards [`Direction::Top`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Column of the cell.
    pub x: usize,
    /// Row of the cell, counted from the bottom edge.
    pub z: usize,
}

impl Coord {
    /// Builds a coordinate pair.
    pub const fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }

    /// Returns the coordinate one step away in `dir`.
    ///
    /// Only underflow and overflow are checked here; whether the result lies inside a particular
    /// grid is for [`Grid::neighbor`] to decide.
    pub fn step(self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::Left => self.x.checked_sub(1).map(|x| Self::new(x, self.z)),
            Direction::Right => self.x.checked_add(1).map(|x| Self::new(x, self.z)),
            Direction::Bottom => self.z.checked_sub(1).map(|z| Self::new(self.x, z)),
            Direction::Top => self.z.checked_add(1).map(|z| Self::new(self.x, z)),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.z)
    }
}

/// Cardinal direction of a wall or of a step between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards decreasing `x`.
    Left,
    /// Towards increasing `x`.
    Right,
    /// Towards decreasing `z`.
    Bottom,
    /// Towards increasing `z`.
    Top,
}

impl Direction {
    /// Every direction, in the order neighbors are enumerated.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Bottom, Self::Top];

    /// Returns the direction pointing back the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Top => Self::Bottom,
        }
    }

    /// Returns the direction of `to` as seen from `from`.
    ///
    /// The answer is [`None`] unless the two coordinates are exactly one cardinal step apart, which
    /// rules out diagonal pairs, distant pairs and a coordinate paired with itself.
    pub fn between(from: Coord, to: Coord) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|&dir| from.step(dir) == Some(to))
    }

    /// Bit used for this direction inside [`Walls`].
    const fn bit(self) -> u8 {
        match self {
            Self::Left => 0b0001,
            Self::Right => 0b0010,
            Self::Bottom => 0b0100,
            Self::Top => 0b1000,
        }
    }
}

/// The four wall flags of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Walls(u8);

impl Default for Walls {
    fn default() -> Self {
        Self::ALL
    }
}

impl Walls {
    /// Every wall standing, the state of a freshly created cell.
    pub const ALL: Self = Self(0b1111);
    /// No wall standing.
    pub const NONE: Self = Self(0);

    /// Returns whether the wall facing `dir` is standing.
    pub const fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    /// Knocks down the wall facing `dir`.
    pub const fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    /// Number of walls still standing.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

/// A single maze cell.
///
/// Cells hold no traversal state; the carver and the path finder each keep their own visited set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Position of the cell in its grid.
    coord: Coord,
    /// Walls still standing around the cell.
    walls: Walls,
}

impl Cell {
    /// Position of the cell in its grid.
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// Walls still standing around the cell.
    pub const fn walls(&self) -> Walls {
        self.walls
    }

    /// Returns whether the wall facing `dir` is standing.
    pub const fn has_wall(&self, dir: Direction) -> bool {
        self.walls.contains(dir)
    }
}

/// Fixed-size rectangle of cells.
///
/// A grid is created once per generation cycle and never resized; regenerating a maze means
/// building a new grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    ///
    /// This field holds the extent along `x`. It is zero only when the whole grid is empty, since
    /// a zero extent on either axis collapses both.
    width: usize,
    /// Number of rows.
    ///
    /// This field holds the extent along `z`, with the same empty-grid rule as the width.
    height: usize,
    /// Cells stored row by row, bottom row first.
    ///
    /// This field holds exactly `width * height` cells, and the cell at `(x, z)` lives at index
    /// `z * width + x`. Both sides of every passage are kept in step by
    /// [`Grid::remove_wall_between`], which is the only way a wall ever comes down.
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid whose cells all have their four walls standing.
    ///
    /// A zero `width` or `height` produces an empty grid, which is valid and simply has no cells.
    pub fn new(width: usize, height: usize) -> Self {
        let (width, height) = if width == 0 || height == 0 {
            (0, 0)
        } else {
            (width, height)
        };
        let cells = (0..height)
            .flat_map(|z| {
                (0..width).map(move |x| Cell {
                    coord: Coord::new(x, z),
                    walls: Walls::ALL,
                })
            })
            .collect();

        Self {
            width,
            height,
            cells,
        }
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns whether `coord` lies inside the grid.
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.z < self.height
    }

    /// Returns the position of `coord` in row-major order, or [`None`] outside the grid.
    ///
    /// Traversal code uses this to size and address its own per-cell bookkeeping.
    pub fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.z * self.width + coord.x)
    }

    /// Looks a cell up by coordinates.
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).and_then(|idx| self.cells.get(idx))
    }

    /// Looks a cell up by signed coordinates, answering [`None`] for anything off the grid.
    ///
    /// This is the entry point for hosts that derive coordinates from world positions and may
    /// produce negative values.
    pub fn get_cell(&self, x: i64, z: i64) -> Option<&Cell> {
        let x = usize::try_from(x).ok()?;
        let z = usize::try_from(z).ok()?;
        self.cell(Coord::new(x, z))
    }

    /// Mutable lookup used by wall removal.
    fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.index(coord).and_then(|idx| self.cells.get_mut(idx))
    }

    /// Iterates over every cell, row by row from the bottom.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Walls still standing around `coord`.
    pub fn walls(&self, coord: Coord) -> Option<Walls> {
        self.cell(coord).map(Cell::walls)
    }

    /// Returns whether the wall of `coord` facing `dir` is standing.
    pub fn has_wall(&self, coord: Coord, dir: Direction) -> Option<bool> {
        self.cell(coord).map(|cell| cell.has_wall(dir))
    }

    /// Neighbor of `coord` in `dir`, regardless of walls.
    pub fn neighbor(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        coord.step(dir).filter(|&next| self.contains(next))
    }

    /// In-bounds neighbors of `coord`, regardless of walls.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(coord, dir))
    }

    /// Neighbors of `coord` reachable through a knocked-down wall.
    ///
    /// Neighbors come out in [`Direction::ALL`] order. A coordinate outside the grid has no open
    /// neighbors.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let walls = self.walls(coord).unwrap_or(Walls::ALL);
        Direction::ALL
            .into_iter()
            .filter(move |&dir| !walls.contains(dir))
            .filter_map(move |dir| self.neighbor(coord, dir))
    }

    /// Opens a passage between two orthogonally adjacent cells.
    ///
    /// The wall of `from` facing `to` and the wall of `to` facing `from` are both knocked down so
    /// the two sides of the edge always agree.
    ///
    /// # Errors
    ///
    /// - [`MazeError::OutOfBounds`] if either coordinate lies outside the grid
    /// - [`MazeError::InvalidAdjacency`] if the cells do not share an edge
    pub fn remove_wall_between(&mut self, from: Coord, to: Coord) -> Result<(), MazeError> {
        if let Some(outside) = [from, to].into_iter().find(|&coord| !self.contains(coord)) {
            return Err(MazeError::OutOfBounds(outside));
        }
        let dir = Direction::between(from, to).ok_or(MazeError::InvalidAdjacency { from, to })?;

        if let Some(cell) = self.cell_mut(from) {
            cell.walls.remove(dir);
        }
        if let Some(cell) = self.cell_mut(to) {
            cell.walls.remove(dir.opposite());
        }

        Ok(())
    }

    /// Number of open passages between cells, each shared edge counted once.
    ///
    /// Border walls never count since they have no cell on their far side.
    pub fn open_passages(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                [Direction::Right, Direction::Top]
                    .into_iter()
                    .filter(|&dir| {
                        !cell.has_wall(dir) && self.neighbor(cell.coord, dir).is_some()
                    })
                    .count()
            })
            .sum()
    }
}
