use crate::algorithms::heuristic::Heuristic;
use crate::grid::Position;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Step-by-step best-first search on a square grid", long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 20)]
    pub grid_size: usize,

    /// Characters used to draw one cell.
    #[arg(long, default_value_t = 2)]
    pub cell_width: usize,

    /// Start cell as ROW,COL.
    #[arg(long, value_parser = parse_position)]
    pub start: Option<Position>,

    /// Goal cell as ROW,COL. Defaults to the far corner.
    #[arg(long, value_parser = parse_position)]
    pub goal: Option<Position>,

    /// Obstacle cell as ROW,COL; repeat for more.
    #[arg(long = "obstacle", value_parser = parse_position)]
    pub obstacles: Vec<Position>,

    /// Random obstacles placed in addition to the explicit ones.
    #[arg(long, default_value_t = 0)]
    pub num_obstacles: usize,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = HeuristicKind::ScaledEuclidean)]
    pub heuristic: HeuristicKind,

    #[arg(long, default_value_t = 30)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    /// Abort the search after this many milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Do not mark the reconstructed route on the final board.
    #[arg(long, default_value_t = false)]
    pub no_path: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicKind {
    /// Raw cell distance, not scaled to move costs.
    Euclidean,
    /// Cell distance scaled to move costs.
    ScaledEuclidean,
    /// Exact diagonal-aware move cost.
    Octile,
}

impl From<HeuristicKind> for Heuristic {
    fn from(kind: HeuristicKind) -> Self {
        match kind {
            HeuristicKind::Euclidean => Heuristic::Euclidean,
            HeuristicKind::ScaledEuclidean => Heuristic::ScaledEuclidean,
            HeuristicKind::Octile => Heuristic::Octile,
        }
    }
}

/// Parses `ROW,COL` (whitespace around either part is ignored).
pub fn parse_position(s: &str) -> Result<Position, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL but got '{}'", s))?;
    let row = row
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid row '{}': {}", row.trim(), e))?;
    let col = col
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid column '{}': {}", col.trim(), e))?;
    Ok(Position::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_parse_with_optional_spaces() {
        assert_eq!(parse_position("3,4"), Ok(Position::new(3, 4)));
        assert_eq!(parse_position(" 0 , 12 "), Ok(Position::new(0, 12)));
    }

    #[test]
    fn malformed_positions_are_rejected() {
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,1").is_err());
        assert!(parse_position("-1,2").is_err());
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let config = Config::parse_from(["grid_pathfinder"]);
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.cell_width, 2);
        assert_eq!(config.heuristic, HeuristicKind::ScaledEuclidean);
        assert!(config.obstacles.is_empty());
        assert!(config.start.is_none());
    }

    #[test]
    fn repeated_obstacles_are_collected() {
        let config = Config::parse_from([
            "grid_pathfinder",
            "--grid-size",
            "5",
            "--obstacle",
            "1,1",
            "--obstacle",
            "2,3",
            "--heuristic",
            "octile",
            "--start",
            "0,4",
        ]);
        assert_eq!(config.obstacles, vec![Position::new(1, 1), Position::new(2, 3)]);
        assert_eq!(config.start, Some(Position::new(0, 4)));
        assert_eq!(Heuristic::from(config.heuristic), Heuristic::Octile);
    }
}
