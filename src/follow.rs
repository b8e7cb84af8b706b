//! Path following module.
//!
//! This module walks an agent along a [`Path`] at constant speed. The follower never schedules
//! anything itself: the host calls [`PathFollower::update`] once per frame with the time elapsed
//! since the previous one, and each call moves the agent a bounded distance.

use tracing::{debug, trace};

use crate::{error::MazeError, grid::Coord, pathfinding::Path};

/// Distance below which the agent counts as standing on a waypoint.
pub const ARRIVAL_EPSILON: f64 = 0.01;

/// Point on the maze floor in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    /// Horizontal axis, aligned with [`Coord::x`].
    pub x: f64,
    /// Depth axis, aligned with [`Coord::z`].
    pub z: f64,
}

impl Position {
    /// Builds a position.
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Straight-line distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Moves towards `target` by at most `max_delta`, stopping exactly on it rather than past it.
    pub fn move_towards(self, target: Self, max_delta: f64) -> Self {
        let remaining = self.distance(target);
        if remaining <= max_delta {
            return target;
        }
        if max_delta <= 0.0 || !remaining.is_finite() {
            return self;
        }

        let scale = max_delta / remaining;
        Self::new(
            (target.x - self.x).mul_add(scale, self.x),
            (target.z - self.z).mul_add(scale, self.z),
        )
    }
}

/// Whether the agent is walking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FollowerState {
    /// Standing still, ready to accept a new path.
    #[default]
    Idle,
    /// Walking towards the waypoint at the current index.
    Moving,
}

/// Agent that walks a path one frame at a time.
///
/// This structure holds everything needed to move an agent along a route found by the path finder:
/// the route itself, how far along it the agent has come and where it stands in world units. It
/// knows nothing about grids or highlights, so the host decides what a reset should repaint.
#[derive(Debug, Clone)]
pub struct PathFollower {
    /// Current state of the walk.
    ///
    /// This field starts off [`FollowerState::Idle`], switches to [`FollowerState::Moving`] when a
    /// path is accepted and falls back to idle once the last waypoint is reached or the walk is
    /// reset.
    state: FollowerState,
    /// Route being walked.
    ///
    /// This field holds the cells handed over by [`PathFollower::start`]. It is empty when no walk
    /// was ever started or after a reset took it back.
    path: Path,
    /// Index of the waypoint the agent is heading for.
    ///
    /// This field only grows during a walk and equals the path length once the agent has arrived.
    index: usize,
    /// Current agent position.
    position: Position,
    /// Position the agent returns to on reset.
    home: Position,
    /// Distance covered per second of elapsed time.
    ///
    /// This field is always a positive finite number, so every walk eventually ends.
    speed: f64,
    /// World distance between the centers of two adjacent cells.
    ///
    /// This field is always a positive finite number. It scales grid coordinates into waypoint
    /// positions and back again in [`PathFollower::nearest_cell`].
    cell_size: f64,
}

impl PathFollower {
    /// Creates an idle follower standing on the origin cell.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidMotion`] if `speed` or `cell_size` is not a
    /// positive finite number.
    pub fn new(speed: f64, cell_size: f64) -> Result<Self, MazeError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(MazeError::InvalidMotion("speed"));
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(MazeError::InvalidMotion("cell size"));
        }

        Ok(Self {
            state: FollowerState::Idle,
            path: Path::default(),
            index: 0,
            position: Position::default(),
            home: Position::default(),
            speed,
            cell_size,
        })
    }

    /// Current state of the walk.
    pub const fn state(&self) -> FollowerState {
        self.state
    }

    /// Index of the waypoint the agent is heading for, or the path length once it has arrived.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Current agent position.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Route currently held by the follower.
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// World distance between the centers of two adjacent cells.
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// World position of the center of `coord`.
    pub fn waypoint_position(&self, coord: Coord) -> Position {
        Position::new(
            coord.x as f64 * self.cell_size,
            coord.z as f64 * self.cell_size,
        )
    }

    /// Cell the agent is standing closest to.
    ///
    /// Returns [`None`] when the agent stands off the negative edges of the maze or the cell size
    /// is degenerate.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Both values are checked to be finite and non-negative before the cast."
    )]
    pub fn nearest_cell(&self) -> Option<Coord> {
        let x = (self.position.x / self.cell_size).round();
        let z = (self.position.z / self.cell_size).round();

        (x.is_finite() && z.is_finite() && x >= 0.0 && z >= 0.0)
            .then(|| Coord::new(x as usize, z as usize))
    }

    /// Starts walking `path`.
    ///
    /// Only an idle follower accepts a path, and only a non-empty one. Returns whether the walk
    /// started; a rejected path is dropped.
    pub fn start(&mut self, path: Path) -> bool {
        if self.state != FollowerState::Idle || path.is_empty() {
            return false;
        }

        debug!(waypoints = path.len(), "starting walk");
        self.path = path;
        self.index = 0;
        self.state = FollowerState::Moving;
        true
    }

    /// Advances the walk by `dt` seconds.
    ///
    /// The agent moves towards the current waypoint by at most `speed * dt`. Once it is within
    /// [`ARRIVAL_EPSILON`] it snaps onto the waypoint and heads for the next one, so a single call
    /// never carries it past a waypoint. When the last waypoint is reached the follower goes idle
    /// with the index equal to the path length. A `dt` that is not a positive finite number moves
    /// nothing, and a step too large to represent is capped at [`f64::MAX`].
    pub fn update(&mut self, dt: f64) -> FollowerState {
        if self.state == FollowerState::Idle {
            return self.state;
        }
        let Some(waypoint) = self.path.get(self.index) else {
            self.state = FollowerState::Idle;
            return self.state;
        };

        let target = self.waypoint_position(waypoint);
        let budget = if dt.is_finite() && dt > 0.0 {
            (self.speed * dt).min(f64::MAX)
        } else {
            0.0
        };
        self.position = self.position.move_towards(target, budget);

        if self.position.distance(target) < ARRIVAL_EPSILON {
            self.position = target;
            self.index += 1;
            trace!(%waypoint, index = self.index, "waypoint reached");

            if self.index >= self.path.len() {
                debug!(%waypoint, "destination reached");
                self.state = FollowerState::Idle;
            }
        }

        self.state
    }

    /// Abandons the walk and puts the agent back home.
    ///
    /// Returns the discarded path so the caller can clear whatever it highlighted for it.
    pub fn reset(&mut self) -> Path {
        self.state = FollowerState::Idle;
        self.index = 0;
        self.position = self.home;
        std::mem::take(&mut self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tolerance for floating-point comparisons in tests.
    const TOLERANCE: f64 = 1e-9;

    /// Builds a path from coordinate pairs.
    fn path_of(cells: &[(usize, usize)]) -> Path {
        cells.iter().map(|&(x, z)| Coord::new(x, z)).collect()
    }

    /// Builds an idle follower on cells two units apart.
    fn idle_follower(speed: f64) -> PathFollower {
        PathFollower::new(speed, 2.0).expect("test speeds are valid")
    }

    /// L-shaped route out of the origin.
    fn corner_path() -> Path {
        path_of(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)])
    }

    #[test]
    fn test_start_requires_idle_and_non_empty_path() {
        let mut follower = idle_follower(3.0);

        assert!(!follower.start(Path::default()), "empty path is rejected");
        assert_eq!(follower.state(), FollowerState::Idle);

        assert!(follower.start(corner_path()), "idle follower accepts a path");
        assert_eq!(follower.state(), FollowerState::Moving);
        assert_eq!(follower.index(), 0);

        assert!(
            !follower.start(path_of(&[(0, 0)])),
            "moving follower rejects a new path"
        );
        assert_eq!(follower.path(), &corner_path());
    }

    #[test]
    fn test_walk_converges_for_any_step_size() {
        for dt in [0.001, 0.016, 0.1, 0.5, 3.0, 1000.0] {
            let mut follower = idle_follower(3.0);
            let path = corner_path();
            let waypoints = path.len();
            assert!(follower.start(path), "walk should start");

            let mut ticks = 0;
            while follower.state() == FollowerState::Moving {
                let before = follower.position();
                let index = follower.index();
                let target = follower.waypoint_position(
                    follower.path().get(index).expect("moving follower has a waypoint"),
                );

                let _ = follower.update(dt);

                let travelled = before.distance(follower.position());
                assert!(
                    travelled <= before.distance(target) + TOLERANCE,
                    "dt {dt}: moved {travelled} but waypoint was {} away",
                    before.distance(target)
                );
                ticks += 1;
                assert!(ticks < 1_000_000, "dt {dt}: walk should terminate");
            }

            assert_eq!(follower.index(), waypoints, "dt {dt}: index after walk");
            let goal = follower.waypoint_position(Coord::new(2, 2));
            assert!(
                follower.position().distance(goal) < TOLERANCE,
                "dt {dt}: agent should stand on the goal"
            );
        }
    }

    #[test]
    fn test_rejects_motion_that_never_arrives() {
        for speed in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                PathFollower::new(speed, 2.0).err(),
                Some(MazeError::InvalidMotion("speed")),
                "speed {speed}"
            );
        }
        for cell_size in [0.0, -2.0, f64::NAN, f64::NEG_INFINITY] {
            assert_eq!(
                PathFollower::new(3.0, cell_size).err(),
                Some(MazeError::InvalidMotion("cell size")),
                "cell size {cell_size}"
            );
        }
    }

    #[test]
    fn test_huge_steps_still_finish_the_walk() {
        let mut follower = PathFollower::new(f64::MAX, 2.0).expect("largest speed is valid");
        assert!(follower.start(path_of(&[(0, 0), (1, 0)])), "walk should start");

        for _ in 0..10 {
            let _ = follower.update(10.0);
        }

        assert_eq!(follower.state(), FollowerState::Idle);
        assert_eq!(follower.index(), 2);
        assert_eq!(follower.nearest_cell(), Some(Coord::new(1, 0)));
    }

    #[test]
    fn test_update_while_idle_does_nothing() {
        let mut follower = idle_follower(3.0);

        assert_eq!(follower.update(1.0), FollowerState::Idle);
        assert_eq!(follower.position(), Position::default());
    }

    #[test]
    fn test_degenerate_time_steps_do_not_move() {
        let mut follower = idle_follower(3.0);
        assert!(follower.start(path_of(&[(0, 0), (1, 0)])), "walk should start");
        let _ = follower.update(1.0);
        let parked = follower.position();

        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(follower.update(dt), FollowerState::Moving);
            assert_eq!(follower.position(), parked, "dt {dt} should not move the agent");
        }
    }

    #[test]
    fn test_reset_discards_walk() {
        let mut follower = idle_follower(1.0);
        assert!(follower.start(corner_path()), "walk should start");
        for _ in 0..5 {
            let _ = follower.update(0.7);
        }

        let discarded = follower.reset();

        assert_eq!(discarded, corner_path());
        assert_eq!(follower.state(), FollowerState::Idle);
        assert_eq!(follower.index(), 0);
        assert_eq!(follower.position(), Position::default());
        assert!(follower.path().is_empty(), "path should be dropped");
    }

    #[test]
    fn test_nearest_cell_rounds_position() {
        let mut follower = idle_follower(1.0);
        assert_eq!(follower.nearest_cell(), Some(Coord::new(0, 0)));

        assert!(follower.start(path_of(&[(0, 0), (1, 0)])), "walk should start");
        let _ = follower.update(1.0);
        let _ = follower.update(1.2);

        assert_eq!(follower.nearest_cell(), Some(Coord::new(1, 0)));
    }

    #[test]
    fn test_move_towards_never_overshoots() {
        let origin = Position::new(0.0, 0.0);
        let target = Position::new(3.0, 4.0);

        let partial = origin.move_towards(target, 2.5);
        let exact = origin.move_towards(target, 10.0);

        assert!((partial.distance(origin) - 2.5).abs() < TOLERANCE, "moved 2.5 units");
        assert!((partial.distance(target) - 2.5).abs() < TOLERANCE, "2.5 units remain");
        assert_eq!(exact, target);
        assert_eq!(origin.move_towards(target, 0.0), origin);
    }
}
