//! Pathfinding algorithm module.
//!
//! This module contains the depth-first search the runner uses to walk from the entrance of a maze
//! to its exit. The search keeps its own stack of frames instead of recursing, so long corridors
//! cannot exhaust the call stack, and each frame tries its four directions in a freshly shuffled
//! order so the same maze yields different-looking runs.

use rand::{seq::SliceRandom as _, Rng};
use tracing::{debug, warn};

use crate::grid::{Direction, Grid, Position};

/// Ordered, non-empty walk from an entrance to an exit.
///
/// Consecutive positions are 4-adjacent and no position repeats. A path is never modified after
/// the search returns it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path(Vec<Position>);

impl Path {
    /// Wraps a sequence of positions in a path.
    ///
    /// This performs no validation; the finder only ever builds contiguous, simple paths, and
    /// replays of hand-made paths are useful in tests and demos.
    #[must_use]
    pub const fn new(positions: Vec<Position>) -> Self {
        Self(positions)
    }

    /// Returns the positions of the path in walking order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.0
    }

    /// Returns the number of cells in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the path has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the position at the given step, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Position> {
        self.0.get(index).copied()
    }
}

/// Search state for one cell on the current walk.
struct Frame {
    /// Cell this frame explores from.
    position: Position,
    /// Directions in the order this frame tries them.
    directions: [Direction; 4],
    /// Index of the next direction to try.
    next: usize,
}

impl Frame {
    /// Creates a frame with its own shuffled direction order.
    fn new<R: Rng + ?Sized>(position: Position, rng: &mut R) -> Self {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);

        Self {
            position,
            directions,
            next: 0,
        }
    }

    /// Returns the next untried direction, if any remain.
    fn next_direction(&mut self) -> Option<Direction> {
        let direction = self.directions.get(self.next).copied();
        self.next += 1;
        direction
    }
}

/// Finds a path from `entrance` to `exit` with a randomized depth-first search.
///
/// Walls are never entered and every cell is entered at most once per call. When a frame runs out
/// of directions its cell is dropped from the walk and the search resumes at the previous cell.
/// Returns [`None`] when the entrance is not passable or the exit cannot be reached; generated
/// mazes always connect the two, but the caller still has to cope with the failure.
pub fn find_path<R: Rng + ?Sized>(
    grid: &Grid,
    entrance: Position,
    exit: Position,
    rng: &mut R,
) -> Option<Path> {
    if !grid.is_passable(entrance) || !grid.is_passable(exit) {
        warn!(?entrance, ?exit, "search endpoints are not passable");
        return None;
    }
    if entrance == exit {
        return Some(Path::new(vec![entrance]));
    }

    let mut visited = vec![false; grid.width() * grid.height()];
    let _ = mark(&mut visited, grid, entrance);
    let mut stack = vec![Frame::new(entrance, rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(direction) = frame.next_direction() else {
            // Dead end: unwind to the previous choice point.
            let _ = stack.pop();
            continue;
        };
        let Some(next) = grid.step(frame.position, direction, 1) else {
            continue;
        };

        if !grid.is_passable(next) || !mark(&mut visited, grid, next) {
            continue;
        }

        if next == exit {
            let mut positions: Vec<Position> = stack.iter().map(|frame| frame.position).collect();
            positions.push(next);
            debug!(length = positions.len(), "found path");

            return Some(Path::new(positions));
        }

        stack.push(Frame::new(next, rng));
    }

    debug!(?entrance, ?exit, "search exhausted without reaching the exit");
    None
}

/// Marks a position as visited, returning `false` if it already was.
fn mark(visited: &mut [bool], grid: &Grid, (column, row): Position) -> bool {
    match visited.get_mut(row * grid.width() + column) {
        Some(seen) if !*seen => {
            *seen = true;
            true
        }
        _ => false,
    }
}
