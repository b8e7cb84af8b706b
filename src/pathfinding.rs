//! Pathfinding module.
//!
//! This module contains the breadth-first search that routes an agent across a carved maze and the
//! [`Path`] type it hands back to the caller.

use std::collections::VecDeque;

use tracing::debug;

use crate::{
    error::MazeError,
    grid::{Coord, Grid},
    highlight::{Highlight, Tint},
};

/// Ordered route from a start cell to a goal cell, both included.
///
/// A path is produced fresh by every search and owned by whoever asked for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    /// Waypoints, start first.
    cells: Vec<Coord>,
}

impl FromIterator<Coord> for Path {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Path {
    /// Waypoints of the route, start first.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the route has no waypoints.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of steps between waypoints.
    pub fn edges(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Waypoint at `index`.
    pub fn get(&self, index: usize) -> Option<Coord> {
        self.cells.get(index).copied()
    }

    /// First waypoint.
    pub fn first(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    /// Last waypoint.
    pub fn last(&self) -> Option<Coord> {
        self.cells.last().copied()
    }

    /// Paints every waypoint with `tint`.
    pub fn highlight(&self, sink: &mut dyn Highlight, tint: Tint) {
        for &coord in &self.cells {
            sink.tint(coord, tint);
        }
    }
}

/// Finds a shortest route from `start` to `goal` through open walls.
///
/// The search keeps its own visited set, so it neither mutates the grid nor depends on anything a
/// previous carve or search left behind. Cells are marked visited when they are enqueued and the
/// search stops as soon as the goal is dequeued. The route is then rebuilt by following parent
/// links back from the goal.
///
/// Among several routes of the same length the one returned depends on neighbor enumeration order;
/// callers should not rely on a particular one.
///
/// # Errors
///
/// - [`MazeError::OutOfBounds`] if `start` or `goal` lies outside the grid
/// - [`MazeError::NoPathFound`] if no open route connects the two cells
pub fn find_path(grid: &Grid, start: Coord, goal: Coord) -> Result<Path, MazeError> {
    let start_idx = grid.index(start).ok_or(MazeError::OutOfBounds(start))?;
    if !grid.contains(goal) {
        return Err(MazeError::OutOfBounds(goal));
    }

    let mut visited = vec![false; grid.len()];
    let mut parents: Vec<Option<Coord>> = vec![None; grid.len()];
    let mut queue = VecDeque::from([start]);
    if let Some(seen) = visited.get_mut(start_idx) {
        *seen = true;
    }

    let mut found = false;
    let mut expanded = 0_usize;
    while let Some(current) = queue.pop_front() {
        if current == goal {
            found = true;
            break;
        }
        expanded += 1;

        for next in grid.open_neighbors(current) {
            let Some(idx) = grid.index(next) else {
                continue;
            };
            match visited.get_mut(idx) {
                Some(seen) if !*seen => *seen = true,
                _ => continue,
            }
            if let Some(parent) = parents.get_mut(idx) {
                *parent = Some(current);
            }
            queue.push_back(next);
        }
    }

    if !found {
        return Err(MazeError::NoPathFound { start, goal });
    }

    let mut cells = vec![goal];
    let mut cursor = goal;
    while let Some(parent) = grid
        .index(cursor)
        .and_then(|idx| parents.get(idx).copied().flatten())
    {
        cells.push(parent);
        cursor = parent;
    }
    cells.reverse();

    debug!(%start, %goal, expanded, edges = cells.len() - 1, "breadth-first search done");

    Ok(Path { cells })
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::{
        generator::generate,
        grid::Direction,
        highlight::{NoHighlight, TintMap},
    };

    /// Unit-weight Bellman-Ford distances from `start`, used as an independent baseline.
    fn relaxed_distances(grid: &Grid, start: Coord) -> Vec<Option<usize>> {
        let mut dist = vec![None; grid.len()];
        if let Some(slot) = grid.index(start).and_then(|idx| dist.get_mut(idx)) {
            *slot = Some(0);
        }

        for _ in 0..grid.len() {
            let mut changed = false;
            for cell in grid.cells() {
                let Some(here) = grid.index(cell.coord()).and_then(|idx| dist.get(idx).copied())
                else {
                    continue;
                };
                let Some(here) = here else {
                    continue;
                };
                for next in grid.open_neighbors(cell.coord()) {
                    if let Some(slot) = grid.index(next).and_then(|idx| dist.get_mut(idx)) {
                        if slot.is_none_or(|known| here + 1 < known) {
                            *slot = Some(here + 1);
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }

        dist
    }

    /// Asserts that consecutive waypoints are adjacent and joined by an open wall.
    fn assert_walkable(grid: &Grid, path: &Path) {
        for pair in path.cells().windows(2) {
            let [from, to] = pair else {
                unreachable!("windows(2) always yields pairs");
            };
            let dir = Direction::between(*from, *to)
                .unwrap_or_else(|| panic!("{from} and {to} should be adjacent"));
            assert_eq!(
                grid.has_wall(*from, dir),
                Some(false),
                "wall between {from} and {to} should be open"
            );
        }
    }

    /// Knocks down every wall of a grid.
    fn open_field(width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height);
        for z in 0..height {
            for x in 0..width {
                let here = Coord::new(x, z);
                for dir in [Direction::Right, Direction::Top] {
                    if let Some(next) = grid.neighbor(here, dir) {
                        grid.remove_wall_between(here, next)
                            .expect("neighbors should be adjacent");
                    }
                }
            }
        }
        grid
    }

    #[test]
    fn test_four_by_four_corner_to_corner() {
        let mut rng = StdRng::seed_from_u64(4);
        let grid = generate(4, 4, &mut rng, &mut NoHighlight).expect("carving should succeed");

        let path = find_path(&grid, Coord::new(0, 0), Coord::new(3, 3))
            .expect("a carved maze is fully connected");

        assert!(!path.is_empty(), "path should not be empty");
        assert_eq!(path.first(), Some(Coord::new(0, 0)));
        assert_eq!(path.last(), Some(Coord::new(3, 3)));
        assert_walkable(&grid, &path);
    }

    #[test]
    fn test_single_cell_path() {
        let grid = Grid::new(1, 1);
        let origin = Coord::new(0, 0);

        let path = find_path(&grid, origin, origin).expect("start is the goal");

        assert_eq!(path.cells(), &[origin]);
        assert_eq!(path.edges(), 0);
    }

    #[test]
    fn test_matches_baseline_distance_in_mazes() {
        for seed in 0..6 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(5, 4, &mut rng, &mut NoHighlight).expect("carving should succeed");
            let start = Coord::new(0, 0);
            let baseline = relaxed_distances(&grid, start);

            for goal in grid.cells().map(|cell| cell.coord()) {
                let path = find_path(&grid, start, goal).expect("maze is connected");
                let expected = grid
                    .index(goal)
                    .and_then(|idx| baseline.get(idx).copied().flatten());

                assert_eq!(Some(path.edges()), expected, "distance to {goal}");
                assert_walkable(&grid, &path);
            }
        }
    }

    #[test]
    fn test_matches_baseline_distance_with_cycles() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut grid = generate(5, 5, &mut rng, &mut NoHighlight).expect("carving should succeed");
        for (from, to) in [
            (Coord::new(1, 1), Coord::new(2, 1)),
            (Coord::new(1, 1), Coord::new(1, 2)),
            (Coord::new(3, 3), Coord::new(3, 4)),
            (Coord::new(0, 4), Coord::new(1, 4)),
            (Coord::new(4, 0), Coord::new(4, 1)),
        ] {
            grid.remove_wall_between(from, to)
                .expect("cells should be adjacent");
        }
        let start = Coord::new(2, 2);
        let baseline = relaxed_distances(&grid, start);

        for goal in grid.cells().map(|cell| cell.coord()) {
            let path = find_path(&grid, start, goal).expect("maze is connected");
            let expected = grid
                .index(goal)
                .and_then(|idx| baseline.get(idx).copied().flatten());

            assert_eq!(Some(path.edges()), expected, "distance to {goal}");
            assert_walkable(&grid, &path);
        }
    }

    #[test]
    fn test_open_field_distance_is_manhattan() {
        let grid = open_field(4, 3);

        let path = find_path(&grid, Coord::new(0, 0), Coord::new(3, 2)).expect("field is open");

        assert_eq!(path.edges(), 5);
        assert_walkable(&grid, &path);
    }

    #[test]
    fn test_repeated_searches_agree() {
        let mut rng = StdRng::seed_from_u64(21);
        let grid = generate(8, 8, &mut rng, &mut NoHighlight).expect("carving should succeed");

        let first = find_path(&grid, Coord::new(0, 0), Coord::new(7, 7)).expect("connected");
        let second = find_path(&grid, Coord::new(0, 0), Coord::new(7, 7)).expect("connected");

        assert_eq!(first.edges(), second.edges());
        assert_eq!(first, second);
    }

    #[test]
    fn test_walled_off_goal_reports_no_path() {
        let grid = Grid::new(3, 3);
        let start = Coord::new(0, 0);
        let goal = Coord::new(2, 2);

        assert_eq!(
            find_path(&grid, start, goal),
            Err(MazeError::NoPathFound { start, goal })
        );
    }

    #[test]
    fn test_out_of_bounds_endpoints() {
        let grid = Grid::new(2, 2);

        assert_eq!(
            find_path(&grid, Coord::new(2, 0), Coord::new(0, 0)),
            Err(MazeError::OutOfBounds(Coord::new(2, 0)))
        );
        assert_eq!(
            find_path(&grid, Coord::new(0, 0), Coord::new(0, 5)),
            Err(MazeError::OutOfBounds(Coord::new(0, 5)))
        );
        assert_eq!(
            find_path(&Grid::new(0, 0), Coord::new(0, 0), Coord::new(0, 0)),
            Err(MazeError::OutOfBounds(Coord::new(0, 0)))
        );
    }

    #[test]
    fn test_path_highlight() {
        let grid = open_field(3, 1);
        let mut tints = TintMap::for_grid(&grid);
        let path = find_path(&grid, Coord::new(0, 0), Coord::new(2, 0)).expect("field is open");

        path.highlight(&mut tints, Tint::Path);

        assert_eq!(tints.tinted().count(), 3);
        assert_eq!(tints.get(Coord::new(1, 0)), Tint::Path);
    }
}
