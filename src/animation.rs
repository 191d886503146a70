//! Replay timing module.
//!
//! This module contains the pieces the session uses to replay a path one cell per tick: a
//! single-slot [`Timer`] whose pending tick can be cancelled through its [`TickHandle`], and the
//! [`Replay`] cursor that remembers how far along the path the runner is.

use std::time::{Duration, Instant};

use crate::{grid::Position, pathfinding::Path};

/// Default delay between two replay ticks in milliseconds.
///
/// A lower value makes the runner move faster; a higher value makes each step easier to follow.
pub const DEFAULT_TICK_MS: u64 = 30;

/// Identifier of one scheduled tick.
///
/// Every call to [`Timer::schedule`] hands out a new handle. Once its tick fired or was cancelled a
/// handle is stale and never fires again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Tick scheduled on a timer but not yet fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending {
    /// Handle given out when the tick was scheduled.
    handle: TickHandle,
    /// Earliest instant at which the tick may fire.
    due: Instant,
}

/// Single-slot tick scheduler.
///
/// At most one tick is outstanding at any time; scheduling a new tick replaces the pending one.
/// The host loop polls the timer and runs the replay step whenever a tick fires.
#[derive(Debug, Default)]
pub struct Timer {
    /// Tick waiting to fire, if any.
    pending: Option<Pending>,
    /// Identifier for the next handle.
    next_handle: u64,
}

impl Timer {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            next_handle: 0,
        }
    }

    /// Schedules a tick for `due`, replacing any pending tick, and returns its handle.
    pub fn schedule(&mut self, due: Instant) -> TickHandle {
        let handle = TickHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.pending = Some(Pending { handle, due });

        handle
    }

    /// Cancels the pending tick, returning its handle if there was one.
    pub fn cancel(&mut self) -> Option<TickHandle> {
        self.pending.take().map(|pending| pending.handle)
    }

    /// Fires the pending tick if it is due at `now`.
    ///
    /// A fired tick is removed from the timer, so each handle fires at most once.
    pub fn poll(&mut self, now: Instant) -> Option<TickHandle> {
        match self.pending {
            Some(pending) if pending.due <= now => {
                self.pending = None;
                Some(pending.handle)
            }
            _ => None,
        }
    }

    /// Returns how long the host may wait before the pending tick is due.
    ///
    /// Returns [`None`] when nothing is pending and [`Duration::ZERO`] when the tick is overdue.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|pending| pending.due.saturating_duration_since(now))
    }
}

/// Cursor over a path being replayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replay {
    /// Path being replayed.
    path: Path,
    /// Index of the cell the next tick visits.
    index: usize,
}

impl Replay {
    /// Starts a replay at the first cell of the path.
    #[must_use]
    pub const fn new(path: Path) -> Self {
        Self { path, index: 0 }
    }

    /// Returns the cell the next tick visits, if the replay is not past its end.
    #[must_use]
    pub fn current(&self) -> Option<Position> {
        self.path.get(self.index)
    }

    /// Returns whether the cell the next tick visits is the last one of the path.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.path.len()
    }

    /// Moves the cursor to the following cell.
    pub fn advance(&mut self) {
        self.index += 1;
    }
}
