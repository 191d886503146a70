//! Player state machine module.
//!
//! The player is the runner being replayed through the maze. It tracks health and the current level
//! and reacts to the cells it steps on. Every change is reported as a [`Status`] snapshot through a
//! [`StatusDisplay`], which is how the interface learns about it.

use color_eyre::eyre::{ensure, Result};
use tracing::{debug, info};

use crate::grid::CellKind;

/// Default maximum health of a new player.
pub const DEFAULT_MAX_HEALTH: u32 = 100;

/// Default health lost when stepping on a hazard.
pub const DEFAULT_DAMAGE: u32 = 15;

/// Default health regained when stepping on a reward.
pub const DEFAULT_HEAL: u32 = 10;

/// Life state of the player, derived from its health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Life {
    /// Health is above zero.
    Alive,
    /// Health reached zero; cell interactions are ignored until a reset.
    Dead,
}

/// Result of a single cell interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// The player was already dead, so nothing happened.
    Ignored,
    /// The cell does not affect health, or healing found the player at full health.
    Unchanged,
    /// A hazard removed health but the player survived.
    Damaged,
    /// A reward restored health.
    Healed,
    /// A hazard brought health to zero.
    Died,
}

impl Interaction {
    /// Returns whether the interaction mutated the player.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        matches!(self, Self::Damaged | Self::Healed | Self::Died)
    }
}

/// Snapshot of the values shown on the status display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status {
    /// Current level, starting at 1.
    pub level: u32,
    /// Current health, between 0 and the maximum.
    pub health: u32,
}

/// Receiver of player status updates.
pub trait StatusDisplay {
    /// Shows a new status snapshot.
    fn publish(&mut self, status: Status);
}

/// In-memory status display that keeps the latest snapshot for the interface to draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusBoard {
    /// Most recently published snapshot.
    status: Status,
}

impl StatusBoard {
    /// Returns the latest published snapshot.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }
}

impl StatusDisplay for StatusBoard {
    fn publish(&mut self, status: Status) {
        self.status = status;
    }
}

/// Health and level tracker for the runner.
///
/// The player is alive exactly when its health is above zero. Damage and healing amounts are fixed
/// for the lifetime of the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    /// Health restored on reset and the cap for healing.
    max_health: u32,
    /// Current health.
    health: u32,
    /// Current level.
    level: u32,
    /// Health lost per hazard.
    damage: u32,
    /// Health regained per reward.
    heal: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEALTH, DEFAULT_DAMAGE, DEFAULT_HEAL)
    }
}

impl Player {
    /// Creates a player at full health on level 1.
    ///
    /// A maximum health of zero is raised to one so a fresh player always starts alive.
    #[must_use]
    pub fn new(max_health: u32, damage: u32, heal: u32) -> Self {
        let max_health = max_health.max(1);

        Self {
            max_health,
            health: max_health,
            level: 1,
            damage,
            heal,
        }
    }

    /// Returns the maximum health.
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Returns the current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Returns the current level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Returns the life state derived from the current health.
    #[must_use]
    pub const fn life(&self) -> Life {
        if self.health > 0 {
            Life::Alive
        } else {
            Life::Dead
        }
    }

    /// Returns whether the player is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        matches!(self.life(), Life::Alive)
    }

    /// Returns the snapshot to publish on the status display.
    #[must_use]
    pub const fn status(&self) -> Status {
        Status {
            level: self.level,
            health: self.health,
        }
    }

    /// Applies the effect of stepping on a cell of the given kind.
    ///
    /// Hazards remove the damage amount, flooring health at zero; reaching zero kills the player. A
    /// player without damage or healing amounts is left unchanged by hazards or rewards.
    /// Rewards add the heal amount, capped at the maximum. Any other kind leaves the player as is,
    /// and so does every kind once the player is dead.
    pub fn interact(&mut self, kind: CellKind) -> Interaction {
        if !self.is_alive() {
            return Interaction::Ignored;
        }

        match kind {
            CellKind::Hazard => {
                let damaged = self.health.saturating_sub(self.damage);
                if damaged == self.health {
                    return Interaction::Unchanged;
                }

                self.health = damaged;
                if self.is_alive() {
                    debug!(health = self.health, "player damaged");
                    Interaction::Damaged
                } else {
                    info!(level = self.level, "player died");
                    Interaction::Died
                }
            }
            CellKind::Reward => {
                let healed = self.health.saturating_add(self.heal).min(self.max_health);
                if healed == self.health {
                    Interaction::Unchanged
                } else {
                    self.health = healed;
                    debug!(health = self.health, "player healed");
                    Interaction::Healed
                }
            }
            CellKind::Wall
            | CellKind::Path
            | CellKind::Entrance
            | CellKind::Exit
            | CellKind::Trail => Interaction::Unchanged,
        }
    }

    /// Moves the player to the next level.
    ///
    /// # Errors
    ///
    /// This function returns an error if the player is dead.
    pub fn advance_level(&mut self) -> Result<u32> {
        ensure!(self.is_alive(), "failed to advance level: player is dead");

        self.level += 1;
        info!(level = self.level, "level cleared");

        Ok(self.level)
    }

    /// Restores full health and returns the player to level 1, reviving it if needed.
    pub fn reset(&mut self) {
        self.health = self.max_health;
        self.level = 1;
    }
}
