use crate::algorithms::common::Outcome;
use std::fmt;
use std::time::Duration;

/// Counters maintained by a search session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expansions: usize,
    pub frontier_insertions: usize,
    /// Frontier members whose cost dropped after they were inserted.
    pub cost_improvements: usize,
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn average_expansion_time(&self) -> Duration {
        if self.expansions == 0 {
            Duration::from_nanos(0)
        } else {
            self.elapsed / self.expansions as u32
        }
    }
}

/// Summary the host prints after a search.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: Outcome,
    pub stats: SearchStats,
    pub grid_size: usize,
    pub num_obstacles: usize,
    /// Cost recorded at the goal.
    pub path_cost: Option<u32>,
    /// Number of moves along the reconstructed route.
    pub path_moves: Option<usize>,
    /// Cheapest possible cost on the same grid, from an independent search.
    pub optimal_cost: Option<u32>,
}

impl SearchReport {
    /// Ratio of found cost to optimal cost; 1.0 means the route is optimal.
    pub fn route_efficiency(&self) -> Option<f64> {
        match (self.path_cost, self.optimal_cost) {
            (Some(found), Some(optimal)) if optimal > 0 => Some(found as f64 / optimal as f64),
            (Some(0), Some(0)) => Some(1.0),
            _ => None,
        }
    }

    /// Share of open cells the search expanded.
    pub fn coverage(&self) -> f64 {
        let open = (self.grid_size * self.grid_size).saturating_sub(self.num_obstacles);
        if open == 0 {
            0.0
        } else {
            self.stats.expansions as f64 / open as f64
        }
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Succeeded(goal) => writeln!(f, "Outcome: goal {} reached", goal)?,
            Outcome::Exhausted => writeln!(f, "Outcome: no path exists")?,
            Outcome::Cancelled => writeln!(f, "Outcome: cancelled")?,
            Outcome::TimedOut => writeln!(f, "Outcome: timed out")?,
        }
        writeln!(f, "Grid: {}x{}", self.grid_size, self.grid_size)?;
        writeln!(f, "Number of Obstacles: {}", self.num_obstacles)?;
        writeln!(f, "Cells expanded: {}", self.stats.expansions)?;
        writeln!(f, "Frontier insertions: {}", self.stats.frontier_insertions)?;
        writeln!(f, "Cost improvements: {}", self.stats.cost_improvements)?;
        writeln!(f, "Coverage: {:.1}%", self.coverage() * 100.0)?;

        if let Some(cost) = self.path_cost {
            writeln!(f, "Path cost: {}", cost)?;
        }
        if let Some(moves) = self.path_moves {
            writeln!(f, "Path moves: {}", moves)?;
        }
        if let Some(optimal) = self.optimal_cost {
            writeln!(f, "Optimal cost: {}", optimal)?;
        }
        if let Some(efficiency) = self.route_efficiency() {
            writeln!(f, "Route Efficiency: {:.3}", efficiency)?;
            if efficiency > 1.0 {
                writeln!(f, "Note: heuristic overestimated; route is longer than optimal")?;
            }
        }

        writeln!(f, "Search time: {:.2?}", self.stats.elapsed)?;
        writeln!(
            f,
            "Average expansion time: {:.2?}",
            self.stats.average_expansion_time()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    fn report(path_cost: Option<u32>, optimal_cost: Option<u32>) -> SearchReport {
        SearchReport {
            outcome: Outcome::Succeeded(Position::new(4, 4)),
            stats: SearchStats {
                expansions: 5,
                frontier_insertions: 12,
                cost_improvements: 1,
                elapsed: Duration::from_micros(50),
            },
            grid_size: 5,
            num_obstacles: 5,
            path_cost,
            path_moves: Some(4),
            optimal_cost,
        }
    }

    #[test]
    fn efficiency_compares_found_and_optimal_cost() {
        assert_eq!(report(Some(56), Some(56)).route_efficiency(), Some(1.0));
        assert_eq!(report(Some(60), Some(40)).route_efficiency(), Some(1.5));
        assert_eq!(report(None, Some(40)).route_efficiency(), None);
    }

    #[test]
    fn coverage_ignores_obstacles() {
        assert!((report(None, None).coverage() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn display_lists_the_key_figures() {
        let text = report(Some(56), Some(56)).to_string();
        assert!(text.contains("goal (4, 4) reached"));
        assert!(text.contains("Cells expanded: 5"));
        assert!(text.contains("Path cost: 56"));
        assert!(text.contains("Route Efficiency: 1.000"));
    }

    #[test]
    fn average_expansion_time_handles_zero() {
        assert_eq!(SearchStats::default().average_expansion_time(), Duration::ZERO);
    }
}
