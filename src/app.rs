//! Core application state and logic.

use std::time::Instant;

use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng as _};
use ratatui::DefaultTerminal;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    events,
    follow::{FollowerState, PathFollower},
    generator::{self, Carver},
    grid::{Coord, Grid},
    highlight::{Highlight as _, NoHighlight, Tint, TintMap},
    pathfinding,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the maze and Crossterm events will help writing to. It is also the host of
/// the maze core: it owns the grid and hands it to the carver and the path finder explicitly, one
/// phase at a time.
pub struct App {
    /// Application exit flag.
    ///
    /// This field is set to `true` when the user wants to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Settings the application was started with, as toggled from the options menu since.
    pub(crate) config: Config,
    /// Random generator driving every carve, seeded once from the configuration.
    pub(crate) rng: StdRng,
    /// Maze currently on screen.
    pub(crate) grid: Grid,
    /// Carve in progress when generation is animated.
    ///
    /// While this field holds a carver, pathfinding is refused so generation and search never
    /// overlap on the same grid.
    pub(crate) carver: Option<Carver>,
    /// Cell highlights read by the renderer.
    pub(crate) tints: TintMap,
    /// Agent walking the maze.
    pub(crate) follower: PathFollower,
    /// Message shown below the maze.
    pub(crate) status: String,
    /// Time of the previous frame, used to compute the follower's time step.
    pub(crate) last_frame: Instant,
    /// Time of the previous animated carving step.
    pub(crate) last_carve_step: Instant,
}

impl App {
    /// Creates the application and carves its first maze.
    ///
    /// # Errors
    ///
    /// This function may return errors from [`PathFollower::new`] when the configured speed or
    /// cell size is unusable, and from [`App::regenerate`].
    pub fn new(config: Config) -> Result<Self> {
        info!(
            seed = config.seed,
            width = config.width,
            height = config.height,
            "starting"
        );
        let now = Instant::now();
        let grid = Grid::new(config.width, config.height);

        let mut app = Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            rng: StdRng::seed_from_u64(config.seed),
            tints: TintMap::for_grid(&grid),
            grid,
            carver: None,
            follower: PathFollower::new(config.speed, config.cell_size)?,
            status: String::new(),
            last_frame: now,
            last_carve_step: now,
            config,
        };
        app.regenerate()?;

        Ok(app)
    }

    /// Runs the main loop of the application.
    ///
    /// This function draws a frame, handles user input and advances the animations, until the exit
    /// condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    /// - errors from [`App::tick`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
            self.tick(Instant::now())?;
        }

        Ok(())
    }

    /// Throws the current maze away and carves a new one.
    ///
    /// Any walk in progress is abandoned. When animation is enabled the carve is only prepared
    /// here and advanced by [`App::tick`].
    ///
    /// # Errors
    ///
    /// This function may return errors from [`generator::carve`].
    pub(crate) fn regenerate(&mut self) -> Result<()> {
        let _ = self.follower.reset();
        self.grid = Grid::new(self.config.width, self.config.height);
        self.tints = TintMap::for_grid(&self.grid);

        if self.config.animate {
            self.carver = Some(Carver::new(&self.grid));
            self.last_carve_step = Instant::now();
            self.status = "carving...".to_owned();
            debug!("animated carve prepared");
        } else {
            self.carver = None;
            let opened = generator::carve(&mut self.grid, &mut self.rng, &mut NoHighlight)?;
            info!(opened, "maze carved");
            self.status = format!("maze carved: {opened} passages");
        }

        Ok(())
    }

    /// Cell the agent is sent to: the corner opposite the origin.
    pub(crate) const fn goal(&self) -> Coord {
        Coord::new(
            self.grid.width().saturating_sub(1),
            self.grid.height().saturating_sub(1),
        )
    }

    /// Searches a route from the agent's cell to the goal and starts walking it.
    ///
    /// Nothing happens while the agent is walking. A failed search is logged and reported in the
    /// status line rather than treated as fatal.
    pub(crate) fn start_pathfinding(&mut self) {
        if self.carver.is_some() {
            self.status = "wait for the carving to finish".to_owned();
            return;
        }
        if self.follower.state() == FollowerState::Moving {
            return;
        }

        let Some(start) = self
            .follower
            .nearest_cell()
            .filter(|&coord| self.grid.contains(coord))
        else {
            warn!("agent is not standing on the maze");
            self.status = "the agent is not standing on the maze".to_owned();
            return;
        };
        let goal = self.goal();

        match pathfinding::find_path(&self.grid, start, goal) {
            Ok(path) => {
                info!(%start, %goal, edges = path.edges(), "path found");
                self.tints.clear();
                if self.config.show_path {
                    path.highlight(&mut self.tints, Tint::Path);
                }
                self.status = format!("path found: {} steps", path.edges());
                let _ = self.follower.start(path);
            }
            Err(err) => {
                warn!(%err, "pathfinding failed");
                self.status = err.to_string();
            }
        }
    }

    /// Stops the agent, puts it back on the origin and clears its route highlight.
    pub(crate) fn reset_follower(&mut self) {
        let discarded = self.follower.reset();
        discarded.highlight(&mut self.tints, Tint::Plain);
        info!(waypoints = discarded.len(), "agent reset");
        self.status = "agent reset".to_owned();
    }

    /// Advances the carving animation and the agent to `now`.
    ///
    /// # Errors
    ///
    /// This function may return errors from [`Carver::step`].
    pub(crate) fn tick(&mut self, now: Instant) -> Result<()> {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let carve_due =
            now.saturating_duration_since(self.last_carve_step) >= self.config.step_delay;
        let carve_finished = match self.carver.as_mut() {
            Some(carver) if carve_due => {
                self.last_carve_step = now;
                let _ = carver.step(&mut self.grid, &mut self.rng, &mut self.tints)?;
                carver.is_finished()
            }
            _ => false,
        };
        if carve_finished {
            self.carver = None;
            let opened = self.grid.open_passages();
            info!(opened, "animated carve finished");
            self.status = format!("maze carved: {opened} passages");
        }

        let before = self.follower.state();
        let after = self.follower.update(elapsed.as_secs_f64());
        if before == FollowerState::Moving && after == FollowerState::Idle {
            info!("agent reached the goal");
            self.status = "goal reached".to_owned();
        }

        Ok(())
    }
}
