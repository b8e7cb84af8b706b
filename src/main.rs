//! This crate contains the source code for the mazetrail binary.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazetrail::{logging, App, Args, Config};

fn main() -> Result<()> {
    install()?;

    let config = Config::try_from(Args::parse())?;
    logging::init(config.log_file.as_deref())?;

    let mut terminal = ratatui::init();
    let result = App::new(config).and_then(|mut app| app.run(&mut terminal));
    ratatui::restore();

    result
}
