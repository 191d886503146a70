//! This crate contains the source code for the binary for the game labyrunner.

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
use labyrunner::{config::Config, init_logging, App};

fn main() -> Result<()> {
    install()?;

    let config = Config::parse();
    config.validate()?;

    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }

    let mut terminal = ratatui::init();
    let result = App::new(&config).run(&mut terminal);
    ratatui::restore();

    result
}
