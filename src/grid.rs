use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// True when `other` lies in the same row or the same column.
    pub fn shares_axis_with(&self, other: &Position) -> bool {
        self.row == other.row || self.col == other.col
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One square of the grid.
///
/// Position and obstacle flag are static for the lifetime of a search. The
/// cost fields belong to whichever search last ran on the owning grid and
/// are `None` until that search reaches the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    obstacle: bool,
    cost: Option<u32>,
    estimate: Option<u32>,
    predecessor: Option<Position>,
}

impl Cell {
    fn new(position: Position) -> Self {
        Cell {
            position,
            obstacle: false,
            cost: None,
            estimate: None,
            predecessor: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }

    /// Best known cost from the start (g).
    pub fn cost(&self) -> Option<u32> {
        self.cost
    }

    /// Heuristic estimate to the goal (h).
    pub fn estimate(&self) -> Option<u32> {
        self.estimate
    }

    /// Frontier priority (f = g + h), defined once both parts are.
    pub fn priority(&self) -> Option<u32> {
        Some(self.cost? + self.estimate?)
    }

    /// The cell the best known cost was reached from.
    pub fn predecessor(&self) -> Option<Position> {
        self.predecessor
    }

    pub(crate) fn record(&mut self, cost: u32, estimate: u32, predecessor: Option<Position>) {
        debug_assert!(
            self.cost.map_or(true, |old| cost <= old),
            "cost of {} regressed from {:?} to {}",
            self.position,
            self.cost,
            cost
        );
        self.cost = Some(cost);
        self.estimate = Some(estimate);
        self.predecessor = predecessor;
    }

    fn clear_search_state(&mut self) {
        self.cost = None;
        self.estimate = None;
        self.predecessor = None;
    }
}

/// Fixed-size square grid of cells addressed by (row, column).
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    cell_width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a `size` x `size` grid with no obstacles.
    ///
    /// `cell_width` is a rendering hint carried for the host; it does not
    /// affect the search. Values below one are raised to one.
    pub fn new(size: usize, cell_width: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidSize { size });
        }

        let cells = (0..size)
            .flat_map(|row| (0..size).map(move |col| Cell::new(Position::new(row, col))))
            .collect();

        Ok(Grid {
            size,
            cell_width: cell_width.max(1),
            cells,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub(crate) fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).map(move |i| &mut self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every in-bounds cell whose row and column are each within one of
    /// `pos`, excluding `pos` itself, in row-major order.
    pub fn neighbors(&self, pos: &Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(8);
        let (row, col) = (pos.row as i64, pos.col as i64);
        let size = self.size as i64;

        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = row + dr;
                let nc = col + dc;

                if nr >= 0 && nr < size && nc >= 0 && nc < size {
                    neighbors.push(Position::new(nr as usize, nc as usize));
                }
            }
        }
        neighbors
    }

    pub fn set_obstacle(&mut self, pos: Position, obstacle: bool) -> Result<()> {
        let size = self.size;
        let cell = self
            .cell_mut(pos)
            .ok_or(Error::CoordinateOutOfBounds { position: pos, size })?;
        cell.obstacle = obstacle;
        Ok(())
    }

    /// Out-of-range positions are never obstacles.
    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_obstacle)
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.obstacle).count()
    }

    pub fn clear_obstacles(&mut self) {
        for cell in &mut self.cells {
            cell.obstacle = false;
        }
    }

    /// Forgets every cost and predecessor left by a previous search.
    /// Obstacle flags are untouched.
    pub fn reset_search_state(&mut self) {
        for cell in &mut self.cells {
            cell.clear_search_state();
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.size + pos.col)
    }
}
