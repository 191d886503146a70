//! Command-line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::{ensure, Result};

use crate::{
    animation::DEFAULT_TICK_MS,
    maze::{Scatter, DEFAULT_HAZARD_PERCENT, DEFAULT_REWARD_PERCENT},
    player::{Player, DEFAULT_DAMAGE, DEFAULT_HEAL, DEFAULT_MAX_HEALTH},
};

/// Default number of maze columns.
pub const DEFAULT_WIDTH: usize = 41;

/// Default number of maze rows.
pub const DEFAULT_HEIGHT: usize = 21;

/// Settings for a labyrunner session.
///
/// All magnitudes (maze size, damage, healing, densities and replay speed) are tunable here; none
/// of them is baked into the game logic.
#[derive(Clone, Debug, Parser, PartialEq, Eq)]
#[command(version, about)]
pub struct Config {
    /// Number of maze columns; must be odd and at least 3.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,
    /// Number of maze rows; must be odd and at least 3.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,
    /// Health of the runner at the start of every run.
    #[arg(long, default_value_t = DEFAULT_MAX_HEALTH)]
    pub max_health: u32,
    /// Health lost on every hazard cell.
    #[arg(long, default_value_t = DEFAULT_DAMAGE)]
    pub damage: u32,
    /// Health regained on every reward cell.
    #[arg(long, default_value_t = DEFAULT_HEAL)]
    pub heal: u32,
    /// Percentage of corridor cells turned into hazards.
    #[arg(long, default_value_t = DEFAULT_HAZARD_PERCENT)]
    pub hazard_percent: u8,
    /// Percentage of corridor cells turned into rewards.
    #[arg(long, default_value_t = DEFAULT_REWARD_PERCENT)]
    pub reward_percent: u8,
    /// Delay between two replay steps in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,
    /// Seed for the random source; mazes and runs are reproducible when set.
    #[arg(long)]
    pub seed: Option<u64>,
    /// File to write diagnostic logs to.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_health: DEFAULT_MAX_HEALTH,
            damage: DEFAULT_DAMAGE,
            heal: DEFAULT_HEAL,
            hazard_percent: DEFAULT_HAZARD_PERCENT,
            reward_percent: DEFAULT_REWARD_PERCENT,
            tick_ms: DEFAULT_TICK_MS,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Checks the preconditions the maze generator and the replay rely on.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    /// - A maze dimension is even or smaller than 3
    /// - Both dimensions are 3, leaving a single room for both entrance and exit
    /// - The maximum health, the damage, the healing or the tick delay is zero
    /// - The hazard and reward densities add up to more than 100%
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            ensure!(
                value >= 3 && value % 2 == 1,
                "invalid maze {name} {value}: must be odd and at least 3"
            );
        }
        ensure!(
            self.width > 3 || self.height > 3,
            "invalid maze size 3x3: entrance and exit would share the only room"
        );
        ensure!(self.max_health > 0, "invalid max health: must be positive");
        ensure!(self.damage > 0, "invalid damage: must be positive");
        ensure!(self.heal > 0, "invalid heal: must be positive");
        ensure!(self.tick_ms > 0, "invalid tick delay: must be positive");
        ensure!(
            u16::from(self.hazard_percent) + u16::from(self.reward_percent) <= 100,
            "invalid densities: hazard and reward percentages exceed 100"
        );

        Ok(())
    }

    /// Returns the hazard and reward densities.
    #[must_use]
    pub const fn scatter(&self) -> Scatter {
        Scatter {
            hazard_percent: self.hazard_percent,
            reward_percent: self.reward_percent,
        }
    }

    /// Returns the delay between two replay ticks.
    #[must_use]
    pub const fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Returns a fresh player built from the configured health values.
    #[must_use]
    pub fn player(&self) -> Player {
        Player::new(self.max_health, self.damage, self.heal)
    }
}
