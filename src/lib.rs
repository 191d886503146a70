//! This crate contains the game logic for the labyrunner maze runner.
//!
//! A perfect maze is carved into a [`grid::Grid`] by [`maze::generate`], sprinkled with hazards and
//! rewards, and then a randomized depth-first search from [`pathfinding`] produces the route a
//! runner is replayed along. The [`session::Session`] owns every piece of state a run touches and
//! advances the replay one cell per timer tick, applying each cell to the [`player::Player`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod animation;
pub mod config;
pub mod grid;
pub mod maze;
pub mod pathfinding;
pub mod player;
pub mod session;

mod app;
mod events;
mod logging;
mod types;
mod ui;

pub use app::App;
pub use logging::init as init_logging;
