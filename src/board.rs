use crate::algorithms::common::StepRole;
use crate::grid::{Grid, Position};
use std::fmt::Write as _;

/// What a cell currently shows on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Obstacle,
    Start,
    Goal,
    Frontier,
    Visited,
    Path,
}

impl CellState {
    pub fn glyph(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Obstacle => '#',
            CellState::Start => 'S',
            CellState::Goal => 'G',
            CellState::Frontier => 'o',
            CellState::Visited => 'x',
            CellState::Path => '*',
        }
    }
}

/// Display model of a grid during a search, fed by step notifications.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cell_width: usize,
    states: Vec<CellState>,
}

impl Board {
    pub fn new(grid: &Grid, start: Position, goal: Position) -> Self {
        let mut states: Vec<CellState> = grid
            .cells()
            .iter()
            .map(|cell| {
                if cell.is_obstacle() {
                    CellState::Obstacle
                } else {
                    CellState::Empty
                }
            })
            .collect();

        let size = grid.size();
        if let Some(i) = index(size, start) {
            states[i] = CellState::Start;
        }
        if let Some(i) = index(size, goal) {
            states[i] = CellState::Goal;
        }

        Board {
            size,
            cell_width: grid.cell_width(),
            states,
        }
    }

    pub fn state(&self, pos: Position) -> Option<CellState> {
        index(self.size, pos).map(|i| self.states[i])
    }

    /// Start and goal markers are never overwritten.
    pub fn apply(&mut self, pos: Position, role: StepRole) {
        let next = match role {
            StepRole::Expanded => CellState::Visited,
            StepRole::Frontier => CellState::Frontier,
        };
        self.set(pos, next);
    }

    pub fn mark_path(&mut self, path: &[Position]) {
        for &pos in path {
            self.set(pos, CellState::Path);
        }
    }

    pub fn count(&self, state: CellState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }

    /// Text picture of the board, with a legend and row/column rulers.
    pub fn render(&self) -> String {
        let width = self.cell_width;
        let mut out = String::new();
        out.push_str("Legend: S=Start, G=Goal, #=Obstacle, o=Frontier, x=Visited, *=Path, .=Empty\n");

        out.push_str("   ");
        for col in 0..self.size {
            let _ = write!(out, "{:<width$}", col % 10, width = width);
        }
        out.push('\n');

        for row in 0..self.size {
            let _ = write!(out, "{:2} ", row);
            for col in 0..self.size {
                let glyph = self.states[row * self.size + col].glyph();
                let _ = write!(out, "{:<width$}", glyph, width = width);
            }
            out.push('\n');
        }
        out
    }

    fn set(&mut self, pos: Position, next: CellState) {
        if let Some(i) = index(self.size, pos) {
            if !matches!(self.states[i], CellState::Start | CellState::Goal) {
                self.states[i] = next;
            }
        }
    }
}

fn index(size: usize, pos: Position) -> Option<usize> {
    (pos.row < size && pos.col < size).then(|| pos.row * size + pos.col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set_obstacle(Position::new(1, 1), true).unwrap();
        Board::new(&grid, Position::new(0, 0), Position::new(2, 2))
    }

    #[test]
    fn initial_states_come_from_the_grid() {
        let board = board();
        assert_eq!(board.state(Position::new(0, 0)), Some(CellState::Start));
        assert_eq!(board.state(Position::new(2, 2)), Some(CellState::Goal));
        assert_eq!(board.state(Position::new(1, 1)), Some(CellState::Obstacle));
        assert_eq!(board.count(CellState::Empty), 6);
        assert_eq!(board.state(Position::new(3, 0)), None);
    }

    #[test]
    fn roles_map_to_states_but_spare_endpoints() {
        let mut board = board();
        board.apply(Position::new(0, 1), StepRole::Frontier);
        assert_eq!(board.state(Position::new(0, 1)), Some(CellState::Frontier));
        board.apply(Position::new(0, 1), StepRole::Expanded);
        assert_eq!(board.state(Position::new(0, 1)), Some(CellState::Visited));

        board.apply(Position::new(0, 0), StepRole::Expanded);
        assert_eq!(board.state(Position::new(0, 0)), Some(CellState::Start));
    }

    #[test]
    fn path_marking_skips_endpoints() {
        let mut board = board();
        board.mark_path(&[Position::new(0, 0), Position::new(1, 2), Position::new(2, 2)]);
        assert_eq!(board.state(Position::new(1, 2)), Some(CellState::Path));
        assert_eq!(board.count(CellState::Path), 1);
    }

    #[test]
    fn render_pads_cells_to_width() {
        let text = board().render();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1], "   0 1 2 ");
        assert_eq!(rows[2], " 0 S . . ");
        assert_eq!(rows[3], " 1 . # . ");
        assert_eq!(rows[4], " 2 . . G ");
    }
}
