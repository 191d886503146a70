//! Grid model for the labyrinth.
//!
//! This module contains the cell and grid types the maze generator writes into, the path finder
//! walks over and the user interface paints. A grid is plain data: it has no behavior beyond
//! lookups, neighbour arithmetic and a compact text form used for debugging and tests.

use std::{fmt, str::FromStr};

use color_eyre::eyre::{bail, ensure, Report};

/// Grid coordinate as `(column, row)`.
pub type Position = (usize, usize);

/// Kind of a single grid cell.
///
/// Every cell holds exactly one kind. Only [`CellKind::Wall`] blocks movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Solid wall, never entered.
    Wall,
    /// Carved corridor.
    Path,
    /// Starting cell of the maze, at `(1, 1)` for generated mazes.
    Entrance,
    /// Goal cell of the maze, at `(width - 2, height - 2)` for generated mazes.
    Exit,
    /// Corridor cell that damages the player.
    Hazard,
    /// Corridor cell that heals the player.
    Reward,
    /// Corridor cell already walked by the current replay.
    Trail,
}

impl CellKind {
    /// Every cell kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Wall,
        Self::Path,
        Self::Entrance,
        Self::Exit,
        Self::Hazard,
        Self::Reward,
        Self::Trail,
    ];

    /// Returns whether a walker may stand on a cell of this kind.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Returns the character used for this kind in the text form of a [`Grid`].
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Path => '.',
            Self::Entrance => 'S',
            Self::Exit => 'E',
            Self::Hazard => 'H',
            Self::Reward => 'R',
            Self::Trail => '*',
        }
    }

    /// Parses a character of the text form back into a cell kind.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Path),
            'S' => Some(Self::Entrance),
            'E' => Some(Self::Exit),
            'H' => Some(Self::Hazard),
            'R' => Some(Self::Reward),
            '*' => Some(Self::Trail),
            _ => None,
        }
    }
}

/// Single cell record of a [`Grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Coordinate of the cell inside its grid.
    pub position: Position,
    /// What currently occupies the cell.
    pub kind: CellKind,
    /// Carving mark, only meaningful while the maze is being generated.
    pub visited: bool,
}

/// Cardinal step directions on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards row zero.
    North,
    /// Towards the last column.
    East,
    /// Towards the last row.
    South,
    /// Towards column zero.
    West,
}

impl Direction {
    /// All four directions, clockwise from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the unit `(column, row)` offset of this direction.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Rectangular collection of cells indexed by `(column, row)`.
///
/// Cells are stored row-major. Reads outside the grid return [`None`] and writes outside the grid
/// are ignored, so callers never have to guard their own arithmetic against the borders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Row-major cell storage, `width * height` long.
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of the given size where every cell is a wall.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let cells = (0..height)
            .flat_map(|row| {
                (0..width).map(move |column| Cell {
                    position: (column, row),
                    kind: CellKind::Wall,
                    visited: false,
                })
            })
            .collect();

        Self {
            width,
            height,
            cells,
        }
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, (column, row): Position) -> bool {
        column < self.width && row < self.height
    }

    /// Maps a position to its index in the cell storage.
    const fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.1 * self.width + position.0)
        } else {
            None
        }
    }

    /// Returns the cell at the position, if any.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&Cell> {
        self.index(position).and_then(|index| self.cells.get(index))
    }

    /// Returns a mutable reference to the cell at the position, if any.
    pub fn get_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.index(position)
            .and_then(move |index| self.cells.get_mut(index))
    }

    /// Returns the kind of the cell at the position, if any.
    #[must_use]
    pub fn kind(&self, position: Position) -> Option<CellKind> {
        self.get(position).map(|cell| cell.kind)
    }

    /// Overwrites the kind of the cell at the position. Positions outside the grid are ignored.
    pub fn set_kind(&mut self, position: Position, kind: CellKind) {
        if let Some(cell) = self.get_mut(position) {
            cell.kind = kind;
        }
    }

    /// Returns whether the cell at the position exists and is not a wall.
    #[must_use]
    pub fn is_passable(&self, position: Position) -> bool {
        self.kind(position).is_some_and(CellKind::is_passable)
    }

    /// Returns the position `distance` steps away in `direction`, if it lies inside the grid.
    #[must_use]
    pub fn step(
        &self,
        (column, row): Position,
        direction: Direction,
        distance: isize,
    ) -> Option<Position> {
        let (delta_column, delta_row) = direction.offset();
        let target = (
            column.checked_add_signed(delta_column * distance)?,
            row.checked_add_signed(delta_row * distance)?,
        );

        self.contains(target).then_some(target)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Returns the position of the first cell of the given kind in row-major order.
    #[must_use]
    pub fn find(&self, kind: CellKind) -> Option<Position> {
        self.cells
            .iter()
            .find(|cell| cell.kind == kind)
            .map(|cell| cell.position)
    }

    /// Counts the cells of the given kind.
    #[must_use]
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|cell| cell.kind == kind).count()
    }
}

/// Returns whether two positions are 4-adjacent.
#[must_use]
pub const fn are_adjacent(first: Position, second: Position) -> bool {
    first.0.abs_diff(second.0) + first.1.abs_diff(second.1) == 1
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if index > 0 {
                writeln!(formatter)?;
            }
            for cell in row {
                write!(formatter, "{}", cell.kind.symbol())?;
            }
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = Report;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = input.lines().collect();
        let width = lines.first().map_or(0, |line| line.chars().count());

        ensure!(width > 0, "failed to parse grid from empty input");

        let mut grid = Self::new(width, lines.len());
        for (row, line) in lines.iter().enumerate() {
            ensure!(
                line.chars().count() == width,
                "failed to parse grid: row {row} is not {width} cells wide"
            );

            for (column, symbol) in line.chars().enumerate() {
                let Some(kind) = CellKind::from_symbol(symbol) else {
                    bail!("failed to parse grid: unknown cell symbol {symbol:?} at ({column}, {row})");
                };
                grid.set_kind((column, row), kind);
            }
        }

        Ok(grid)
    }
}
