//! Command-line arguments and the validated configuration built from them.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::{ensure, Report, Result};

/// Largest accepted maze extent, in cells, along either axis.
///
/// The maze is drawn one terminal cell per wall or floor tile, so anything larger would not fit a
/// terminal anyway.
pub const MAX_EXTENT: usize = 200;

/// Command-line arguments of the binary.
#[derive(Debug, Clone, Parser)]
#[command(
    version,
    about = "Carve a maze, find the shortest route across it and watch an agent walk it."
)]
pub struct Args {
    /// Number of maze columns.
    #[arg(long, default_value_t = 10)]
    pub width: usize,
    /// Number of maze rows.
    #[arg(long, default_value_t = 10)]
    pub height: usize,
    /// Seed for the maze carver; a random seed is drawn and logged when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// World distance between the centers of two adjacent cells.
    #[arg(long, default_value_t = 2.0)]
    pub cell_size: f64,
    /// Agent speed in world units per second.
    #[arg(long, default_value_t = 3.0)]
    pub speed: f64,
    /// Animate the carving one step at a time.
    #[arg(long)]
    pub animate: bool,
    /// Delay between two animated carving steps, in milliseconds.
    #[arg(long, default_value_t = 50)]
    pub step_delay_ms: u64,
    /// Do not highlight the route before the agent walks it.
    #[arg(long)]
    pub hide_path: bool,
    /// File to write logs to; logging stays off without it since the terminal belongs to the UI.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of maze columns.
    pub width: usize,
    /// Number of maze rows.
    pub height: usize,
    /// Seed the carver's random generator starts from.
    pub seed: u64,
    /// World distance between the centers of two adjacent cells.
    pub cell_size: f64,
    /// Agent speed in world units per second.
    pub speed: f64,
    /// Whether carving is animated.
    pub animate: bool,
    /// Delay between two animated carving steps.
    pub step_delay: Duration,
    /// Whether the route is highlighted before the agent walks it.
    pub show_path: bool,
    /// Log destination, if any.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            seed: 0,
            cell_size: 2.0,
            speed: 3.0,
            animate: false,
            step_delay: Duration::from_millis(50),
            show_path: true,
            log_file: None,
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = Report;

    /// Checks the arguments and fills in a random seed when none was given.
    ///
    /// # Errors
    ///
    /// This function returns an error if the maze extents exceed [`MAX_EXTENT`] or if the cell
    /// size or speed is not a positive finite number.
    fn try_from(args: Args) -> Result<Self> {
        ensure!(
            args.width <= MAX_EXTENT && args.height <= MAX_EXTENT,
            "maze extents must not exceed {MAX_EXTENT}, got {}x{}",
            args.width,
            args.height
        );
        ensure!(
            args.cell_size.is_finite() && args.cell_size > 0.0,
            "cell size must be a positive number, got {}",
            args.cell_size
        );
        ensure!(
            args.speed.is_finite() && args.speed > 0.0,
            "speed must be a positive number, got {}",
            args.speed
        );

        Ok(Self {
            width: args.width,
            height: args.height,
            seed: args.seed.unwrap_or_else(rand::random),
            cell_size: args.cell_size,
            speed: args.speed,
            animate: args.animate,
            step_delay: Duration::from_millis(args.step_delay_ms),
            show_path: !args.hide_path,
            log_file: args.log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parses a command line made of `extra` after the binary name.
    fn parse(extra: &[&str]) -> Result<Config> {
        let args = Args::try_parse_from(std::iter::once("mazetrail").chain(extra.iter().copied()))?;
        Config::try_from(args)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--seed", "7"]).expect("defaults should be valid");

        assert_eq!(
            config,
            Config {
                seed: 7,
                ..Config::default()
            }
        );
    }

    #[test]
    fn test_all_flags() {
        let config = parse(&[
            "--width",
            "4",
            "--height",
            "6",
            "--seed",
            "99",
            "--cell-size",
            "1.5",
            "--speed",
            "8",
            "--animate",
            "--step-delay-ms",
            "5",
            "--hide-path",
            "--log-file",
            "run.log",
        ])
        .expect("arguments should be valid");

        assert_eq!(config.width, 4);
        assert_eq!(config.height, 6);
        assert_eq!(config.seed, 99);
        assert!((config.cell_size - 1.5).abs() < f64::EPSILON, "cell size");
        assert!((config.speed - 8.0).abs() < f64::EPSILON, "speed");
        assert!(config.animate, "animation requested");
        assert_eq!(config.step_delay, Duration::from_millis(5));
        assert!(!config.show_path, "path preview disabled");
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn test_zero_extent_is_accepted() {
        let config = parse(&["--width", "0"]).expect("an empty maze is valid");

        assert_eq!(config.width, 0);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(parse(&["--speed", "0"]).is_err(), "zero speed");
        assert!(parse(&["--speed", "-2"]).is_err(), "negative speed");
        assert!(parse(&["--cell-size", "NaN"]).is_err(), "NaN cell size");
        assert!(parse(&["--width", "201"]).is_err(), "oversized maze");
        assert!(parse(&["--height", "-1"]).is_err(), "negative extent");
    }
}
