//! Game session module.
//!
//! A [`Session`] owns everything a run touches: the current maze, the player, the replay in flight,
//! the tick timer, the status display and the random source. The interface only talks to the
//! session through its methods, which keeps the whole game loop testable without a terminal.

use std::time::{Duration, Instant};

use color_eyre::eyre::{bail, Result};
use rand::{rngs::SmallRng, SeedableRng as _};
use tracing::{debug, info, warn};

use crate::{
    animation::{Replay, Timer},
    config::Config,
    grid::{CellKind, Grid, Position},
    maze::{self, Scatter},
    pathfinding::{self, Path},
    player::{Interaction, Player, StatusDisplay},
};

/// Result of pressing Start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// A replay of the given number of cells was scheduled.
    Started {
        /// Number of cells in the replayed path.
        length: usize,
    },
    /// A replay is already in flight; nothing changed.
    Busy,
    /// The maze had no route from entrance to exit and was regenerated.
    NoPath,
}

/// Result of one replay step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The runner stepped on a cell and the next step was scheduled.
    Advanced {
        /// Cell the runner stepped on.
        position: Position,
        /// Effect of the cell on the player.
        interaction: Interaction,
    },
    /// The runner died; the player was reset and a new maze generated.
    Died,
    /// The runner reached the exit; the player moved to `level` and a new maze was generated.
    Cleared {
        /// Level reached by the player.
        level: u32,
    },
}

/// Owner of the maze, the player and the replay driving them.
///
/// Only one replay runs at a time and only one tick is ever pending, so every step finishes its
/// player update and maze replacement before the next step can start.
#[derive(Debug)]
pub struct Session<D> {
    /// Columns of every generated maze.
    width: usize,
    /// Rows of every generated maze.
    height: usize,
    /// Hazard and reward densities of every generated maze.
    scatter: Scatter,
    /// Delay between two replay steps.
    tick_delay: Duration,
    /// Current maze.
    grid: Grid,
    /// Runner state.
    player: Player,
    /// Replay in flight, if any.
    replay: Option<Replay>,
    /// Scheduler of the next replay step.
    timer: Timer,
    /// Receiver of player status updates.
    display: D,
    /// Random source for mazes and searches.
    rng: SmallRng,
}

impl<D: StatusDisplay> Session<D> {
    /// Creates a session with a freshly generated maze.
    ///
    /// The random source is seeded from the configuration when a seed is given and from the
    /// operating system otherwise.
    pub fn new(config: &Config, display: D) -> Self {
        let mut rng = config
            .seed
            .map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);
        let grid = maze::generate(config.width, config.height, config.scatter(), &mut rng);

        Self::with_grid(config, grid, display, rng)
    }

    /// Creates a session that starts on the given maze instead of a generated one.
    ///
    /// Later mazes are generated with the configured size. The initial status is published right
    /// away so the display never shows stale values.
    pub fn with_grid(config: &Config, grid: Grid, display: D, rng: SmallRng) -> Self {
        let mut session = Self {
            width: config.width,
            height: config.height,
            scatter: config.scatter(),
            tick_delay: config.tick_delay(),
            grid,
            player: config.player(),
            replay: None,
            timer: Timer::new(),
            display,
            rng,
        };
        session.publish();

        session
    }

    /// Returns the current maze.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the player.
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Returns the status display.
    pub const fn display(&self) -> &D {
        &self.display
    }

    /// Returns the delay between two replay steps.
    pub const fn tick_delay(&self) -> Duration {
        self.tick_delay
    }

    /// Returns whether a replay is in flight, which disables Start.
    pub const fn is_busy(&self) -> bool {
        self.replay.is_some()
    }

    /// Returns how long the host loop may wait before the next step is due.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    /// Solves the current maze and schedules the replay of the solution.
    ///
    /// Does nothing while a replay is in flight. A maze without a route from entrance to exit is
    /// discarded and replaced by a new one.
    pub fn start(&mut self, now: Instant) -> StartOutcome {
        if self.is_busy() {
            return StartOutcome::Busy;
        }

        let path = self
            .grid
            .find(CellKind::Entrance)
            .zip(self.grid.find(CellKind::Exit))
            .and_then(|(entrance, exit)| {
                pathfinding::find_path(&self.grid, entrance, exit, &mut self.rng)
            });

        match path {
            Some(path) => self.play(path, now),
            None => {
                warn!("maze has no route from entrance to exit, regenerating");
                self.regenerate();
                StartOutcome::NoPath
            }
        }
    }

    /// Schedules the replay of a given path with its first step due at `now`.
    ///
    /// Like [`Session::start`], this does nothing while a replay is in flight. An empty path has
    /// nothing to replay and is reported as [`StartOutcome::NoPath`] without touching the maze.
    pub fn play(&mut self, path: Path, now: Instant) -> StartOutcome {
        if self.is_busy() {
            return StartOutcome::Busy;
        }
        if path.is_empty() {
            return StartOutcome::NoPath;
        }

        let length = path.len();
        debug!(length, "replay scheduled");
        self.replay = Some(Replay::new(path));
        let _ = self.timer.schedule(now);

        StartOutcome::Started { length }
    }

    /// Runs the next replay step if its tick is due at `now`.
    ///
    /// A step marks its cell as trail, applies the cell to the player and then either schedules the
    /// following step, or ends the replay on death (reset and new maze) or on the last cell (next
    /// level and new maze).
    ///
    /// # Errors
    ///
    /// This function returns an error if the replayed path leaves the maze.
    pub fn tick(&mut self, now: Instant) -> Result<Option<TickOutcome>> {
        if self.timer.poll(now).is_none() {
            return Ok(None);
        }

        let Some((position, is_last)) = self.replay.as_mut().and_then(|replay| {
            let position = replay.current()?;
            let is_last = replay.is_last();
            replay.advance();
            Some((position, is_last))
        }) else {
            self.replay = None;
            return Ok(None);
        };

        let Some(kind) = self.grid.kind(position) else {
            self.finish();
            bail!("failed to replay path: {position:?} is outside the maze");
        };
        self.grid.set_kind(position, CellKind::Trail);

        let interaction = self.player.interact(kind);
        if interaction.is_mutation() {
            self.publish();
        }

        if !self.player.is_alive() {
            self.finish();
            self.player.reset();
            self.publish();
            self.regenerate();
            return Ok(Some(TickOutcome::Died));
        }

        if is_last {
            let level = self.player.advance_level()?;
            self.publish();
            self.finish();
            self.regenerate();
            return Ok(Some(TickOutcome::Cleared { level }));
        }

        let _ = self.timer.schedule(now + self.tick_delay);

        Ok(Some(TickOutcome::Advanced {
            position,
            interaction,
        }))
    }

    /// Cancels any replay in flight, resets the player and generates a new maze.
    pub fn reset(&mut self) {
        if let Some(handle) = self.timer.cancel() {
            debug!(?handle, "cancelled pending tick");
        }
        self.replay = None;
        self.player.reset();
        self.publish();
        self.regenerate();
        info!("session reset");
    }

    /// Ends the replay in flight and drops its pending tick.
    fn finish(&mut self) {
        let _ = self.timer.cancel();
        self.replay = None;
    }

    /// Replaces the maze with a freshly generated one.
    fn regenerate(&mut self) {
        self.grid = maze::generate(self.width, self.height, self.scatter, &mut self.rng);
    }

    /// Sends the player status to the display.
    fn publish(&mut self) {
        self.display.publish(self.player.status());
    }
}
