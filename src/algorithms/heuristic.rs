use crate::grid::Position;

/// Cost of a move along a row or column.
pub const ORTHOGONAL_COST: u32 = 10;
/// Cost of a diagonal move, 10 * sqrt(2) rounded down.
pub const DIAGONAL_COST: u32 = 14;

/// Cost of stepping between two adjacent cells.
pub fn step_cost(from: Position, to: Position) -> u32 {
    if from.shares_axis_with(&to) {
        ORTHOGONAL_COST
    } else {
        DIAGONAL_COST
    }
}

/// Estimate of the remaining cost from a cell to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Floored Euclidean distance in raw cell units. Far below the step
    /// costs, so the search behaves close to Dijkstra.
    Euclidean,
    /// Floored Euclidean distance in step-cost units (x10).
    #[default]
    ScaledEuclidean,
    /// Exact cost of the cheapest obstacle-free 8-way route. Never
    /// overestimates.
    Octile,
}

impl Heuristic {
    pub fn estimate(self, from: Position, to: Position) -> u32 {
        let dr = from.row.abs_diff(to.row) as u64;
        let dc = from.col.abs_diff(to.col) as u64;

        match self {
            Heuristic::Euclidean => isqrt(dr * dr + dc * dc) as u32,
            Heuristic::ScaledEuclidean => {
                let scale = ORTHOGONAL_COST as u64;
                isqrt(scale * scale * (dr * dr + dc * dc)) as u32
            }
            Heuristic::Octile => {
                let diagonal = dr.min(dc);
                let straight = dr.max(dc) - diagonal;
                (diagonal * DIAGONAL_COST as u64 + straight * ORTHOGONAL_COST as u64) as u32
            }
        }
    }
}

// floor(sqrt(n)) without float rounding surprises on perfect squares.
fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut x = (n as f64).sqrt() as u64;
    while x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}
