//! Maze generation module.
//!
//! This module carves perfect mazes with a randomized, iterative depth-first walk over the "room"
//! cells of a grid (cells whose coordinates are both odd) and then scatters hazard and reward cells
//! over the carved corridors.

use rand::{
    seq::{IndexedRandom as _, SliceRandom as _},
    Rng,
};
use tracing::debug;

use crate::grid::{CellKind, Direction, Grid, Position};

/// Distance between two neighbouring rooms.
const ROOM_STRIDE: isize = 2;

/// Position of the first room and of the entrance of every generated maze.
pub const ENTRANCE: Position = (1, 1);

/// Default share of corridor cells turned into hazards.
pub const DEFAULT_HAZARD_PERCENT: u8 = 2;

/// Default share of corridor cells turned into rewards.
pub const DEFAULT_REWARD_PERCENT: u8 = 1;

/// Densities for hazard and reward scattering, as whole percentages of the corridor cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scatter {
    /// Share of corridor cells that become hazards.
    pub hazard_percent: u8,
    /// Share of corridor cells that become rewards.
    pub reward_percent: u8,
}

impl Default for Scatter {
    fn default() -> Self {
        Self {
            hazard_percent: DEFAULT_HAZARD_PERCENT,
            reward_percent: DEFAULT_REWARD_PERCENT,
        }
    }
}

impl Scatter {
    /// Returns how many hazards and rewards to place among `available` corridor cells.
    ///
    /// The two counts together never exceed `available`; hazards are served first.
    #[must_use]
    pub fn counts(self, available: usize) -> (usize, usize) {
        let hazards = (available * usize::from(self.hazard_percent) / 100).min(available);
        let rewards =
            (available * usize::from(self.reward_percent) / 100).min(available - hazards);

        (hazards, rewards)
    }
}

/// Returns the exit position of a maze of the given size.
#[must_use]
pub const fn exit_for(width: usize, height: usize) -> Position {
    (width.saturating_sub(2), height.saturating_sub(2))
}

/// Generates a complete maze: carved corridors, entrance, exit, hazards and rewards.
///
/// Both dimensions are expected to be odd and at least 3. Other sizes still produce a grid but
/// the exit is not guaranteed to be reachable.
pub fn generate<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    scatter: Scatter,
    rng: &mut R,
) -> Grid {
    let mut grid = carve(width, height, rng);
    self::scatter(&mut grid, scatter, rng);

    debug!(
        width,
        height,
        hazards = grid.count(CellKind::Hazard),
        rewards = grid.count(CellKind::Reward),
        "generated maze"
    );

    grid
}

/// Carves a perfect maze over a fresh all-wall grid and marks its entrance and exit.
///
/// The walk starts on the room at `(1, 1)`. While the stack of open rooms is not empty, the room
/// on top looks for unvisited rooms two cells away in each direction, picks one uniformly at
/// random, opens the wall between them and pushes it; a room without candidates is popped. Every
/// room ends up visited exactly once, so the corridors form a spanning tree.
pub fn carve<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::new(width, height);

    if !is_room(&grid, ENTRANCE) {
        return grid;
    }

    open_room(&mut grid, ENTRANCE);
    let mut stack = vec![ENTRANCE];

    while let Some(&current) = stack.last() {
        let candidates: Vec<Position> = Direction::ALL
            .into_iter()
            .filter_map(|direction| grid.step(current, direction, ROOM_STRIDE))
            .filter(|&room| {
                is_room(&grid, room) && grid.get(room).is_some_and(|cell| !cell.visited)
            })
            .collect();

        if let Some(&next) = candidates.choose(rng) {
            let between = ((current.0 + next.0) / 2, (current.1 + next.1) / 2);
            grid.set_kind(between, CellKind::Path);
            open_room(&mut grid, next);
            stack.push(next);
        } else {
            let _ = stack.pop();
        }
    }

    grid.set_kind(ENTRANCE, CellKind::Entrance);
    grid.set_kind(exit_for(width, height), CellKind::Exit);

    grid
}

/// Turns a random share of the plain corridor cells into hazards and rewards.
///
/// Entrance and exit are never candidates. The candidates are shuffled once; the first block of
/// the shuffled list becomes hazards and the following block rewards, so no cell is assigned
/// twice.
pub fn scatter<R: Rng + ?Sized>(grid: &mut Grid, scatter: Scatter, rng: &mut R) {
    let mut candidates: Vec<Position> = grid
        .cells()
        .filter(|cell| cell.kind == CellKind::Path)
        .map(|cell| cell.position)
        .collect();
    candidates.shuffle(rng);

    let (hazards, rewards) = scatter.counts(candidates.len());
    for (index, position) in candidates.into_iter().take(hazards + rewards).enumerate() {
        let kind = if index < hazards {
            CellKind::Hazard
        } else {
            CellKind::Reward
        };
        grid.set_kind(position, kind);
    }
}

/// Returns whether the position is a carvable room inside the outer wall.
fn is_room(grid: &Grid, (column, row): Position) -> bool {
    (1..=grid.width().saturating_sub(2)).contains(&column)
        && (1..=grid.height().saturating_sub(2)).contains(&row)
}

/// Marks a room as carved and visited.
fn open_room(grid: &mut Grid, position: Position) {
    if let Some(cell) = grid.get_mut(position) {
        cell.kind = CellKind::Path;
        cell.visited = true;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::{rngs::SmallRng, RngCore, SeedableRng as _};

    use super::*;

    /// Random source whose every draw is zero, so every random choice picks the first option.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, destination: &mut [u8]) {
            destination.fill(0);
        }
    }

    /// Sizes exercised by the structural tests.
    const SIZES: [(usize, usize); 6] = [(3, 3), (5, 5), (7, 5), (5, 9), (21, 11), (41, 21)];

    /// Counts the passable cells reachable from the entrance.
    fn reachable_from_entrance(grid: &Grid) -> usize {
        let mut seen = vec![ENTRANCE];
        let mut queue = VecDeque::from([ENTRANCE]);

        while let Some(current) = queue.pop_front() {
            for direction in Direction::ALL {
                if let Some(next) = grid.step(current, direction, 1) {
                    if grid.is_passable(next) && !seen.contains(&next) {
                        seen.push(next);
                        queue.push_back(next);
                    }
                }
            }
        }

        seen.len()
    }

    #[test]
    fn test_fixed_draws_give_exact_five_by_five_layout() {
        let grid = generate(5, 5, Scatter::default(), &mut ZeroRng);

        assert_eq!(grid.to_string(), "#####\n#S..#\n###.#\n#..E#\n#####");

        let expected = [
            [CellKind::Wall; 5],
            [
                CellKind::Wall,
                CellKind::Entrance,
                CellKind::Path,
                CellKind::Path,
                CellKind::Wall,
            ],
            [
                CellKind::Wall,
                CellKind::Wall,
                CellKind::Wall,
                CellKind::Path,
                CellKind::Wall,
            ],
            [
                CellKind::Wall,
                CellKind::Path,
                CellKind::Path,
                CellKind::Exit,
                CellKind::Wall,
            ],
            [CellKind::Wall; 5],
        ];
        for (row, kinds) in expected.iter().enumerate() {
            for (column, kind) in kinds.iter().enumerate() {
                assert_eq!(
                    grid.kind((column, row)),
                    Some(*kind),
                    "unexpected kind at ({column}, {row})"
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let first = generate(21, 11, Scatter::default(), &mut SmallRng::seed_from_u64(42));
        let second = generate(21, 11, Scatter::default(), &mut SmallRng::seed_from_u64(42));

        assert_eq!(first, second, "a fixed seed should reproduce the maze");
    }

    #[test]
    fn test_carved_rooms_form_spanning_tree() {
        for (width, height) in SIZES {
            for seed in 0..16 {
                let grid = carve(width, height, &mut SmallRng::seed_from_u64(seed));
                let rooms = ((width - 1) / 2) * ((height - 1) / 2);
                let passable = grid.cells().filter(|cell| cell.kind.is_passable()).count();

                // A tree over n rooms has n - 1 connecting cells.
                assert_eq!(
                    passable,
                    2 * rooms - 1,
                    "{width}x{height} seed {seed} should have no cycles"
                );
                assert_eq!(
                    reachable_from_entrance(&grid),
                    passable,
                    "{width}x{height} seed {seed} should have no isolated regions"
                );
            }
        }
    }

    #[test]
    fn test_every_room_is_visited() {
        let grid = carve(15, 9, &mut SmallRng::seed_from_u64(3));

        for cell in grid.cells() {
            let is_room = cell.position.0 % 2 == 1 && cell.position.1 % 2 == 1;
            assert_eq!(cell.visited, is_room, "{:?}", cell.position);
            if is_room {
                assert!(cell.kind.is_passable(), "room {:?} should be open", cell.position);
            }
        }
    }

    #[test]
    fn test_outer_border_stays_wall() {
        let grid = generate(21, 11, Scatter::default(), &mut SmallRng::seed_from_u64(9));

        for cell in grid.cells() {
            let (column, row) = cell.position;
            if column == 0 || row == 0 || column == 20 || row == 10 {
                assert_eq!(cell.kind, CellKind::Wall, "{:?}", cell.position);
            }
        }
    }

    #[test]
    fn test_entrance_and_exit_placement() {
        // A 3x3 grid has a single room, which ends up as the exit.
        for (width, height) in SIZES.into_iter().filter(|&size| size != (3, 3)) {
            for seed in 0..8 {
                let scatter = Scatter {
                    hazard_percent: 40,
                    reward_percent: 40,
                };
                let grid = generate(width, height, scatter, &mut SmallRng::seed_from_u64(seed));

                assert_eq!(grid.kind(ENTRANCE), Some(CellKind::Entrance));
                assert_eq!(grid.kind(exit_for(width, height)), Some(CellKind::Exit));
                assert_eq!(grid.count(CellKind::Entrance), 1);
                assert_eq!(grid.count(CellKind::Exit), 1);
            }
        }
    }

    #[test]
    fn test_scatter_counts_and_disjointness() {
        let mut grid = carve(41, 21, &mut SmallRng::seed_from_u64(5));
        let available = grid.count(CellKind::Path);
        let scatter = Scatter {
            hazard_percent: 10,
            reward_percent: 5,
        };

        super::scatter(&mut grid, scatter, &mut SmallRng::seed_from_u64(6));

        let (hazards, rewards) = scatter.counts(available);
        assert!(hazards > 0 && rewards > 0, "densities should place some cells");
        assert_eq!(grid.count(CellKind::Hazard), hazards);
        assert_eq!(grid.count(CellKind::Reward), rewards);
        assert_eq!(
            grid.count(CellKind::Path) + hazards + rewards,
            available,
            "scattering should only relabel corridor cells"
        );
    }

    #[test]
    fn test_scatter_counts_never_exceed_available() {
        let scatter = Scatter {
            hazard_percent: 80,
            reward_percent: 70,
        };

        for available in [0, 1, 7, 100, 1234] {
            let (hazards, rewards) = scatter.counts(available);
            assert!(hazards + rewards <= available, "{available}");
        }

        assert_eq!(Scatter::default().counts(100), (2, 1));
        assert_eq!(Scatter::default().counts(5), (0, 0));
    }

    #[test]
    fn test_undersized_grid_is_left_as_walls() {
        let grid = carve(2, 2, &mut ZeroRng);

        assert_eq!(grid.count(CellKind::Wall), 4);
    }
}
