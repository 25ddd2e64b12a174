use crate::config::Config;
use crate::error::{Endpoint, EndpointFault, Error, Result};
use crate::grid::{Grid, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

/// A validated start/goal/obstacle layout, ready to become a [`Grid`].
#[derive(Debug, Clone)]
pub struct Scenario {
    pub grid_size: usize,
    pub cell_width: usize,
    pub start: Position,
    pub goal: Position,
    pub obstacles: FxHashSet<Position>,
}

impl Scenario {
    /// Builds a scenario with no obstacles, start and goal in opposite
    /// corners.
    pub fn open(grid_size: usize, cell_width: usize) -> Result<Self> {
        if grid_size == 0 {
            return Err(Error::InvalidSize { size: grid_size });
        }
        Ok(Scenario {
            grid_size,
            cell_width,
            start: Position::new(0, 0),
            goal: Position::new(grid_size - 1, grid_size - 1),
            obstacles: FxHashSet::default(),
        })
    }

    /// Validates every coordinate in `config` and places the requested
    /// random obstacles.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut scenario = Self::open(config.grid_size, config.cell_width)?;
        scenario.start = config.start.unwrap_or(scenario.start);
        scenario.goal = config.goal.unwrap_or(scenario.goal);
        scenario.check_endpoint(scenario.start, Endpoint::Start)?;
        scenario.check_endpoint(scenario.goal, Endpoint::Goal)?;

        for &pos in &config.obstacles {
            scenario.add_obstacle(pos)?;
        }

        if config.num_obstacles > 0 {
            let seed = config.seed.unwrap_or_else(rand::random);
            let placed = scenario.scatter_obstacles(config.num_obstacles, seed);
            debug!(seed, placed, requested = config.num_obstacles, "random obstacles placed");
            if placed < config.num_obstacles {
                warn!(
                    placed,
                    requested = config.num_obstacles,
                    "grid too crowded for the requested obstacle count"
                );
            }
        }

        Ok(scenario)
    }

    pub fn add_obstacle(&mut self, pos: Position) -> Result<()> {
        if pos.row >= self.grid_size || pos.col >= self.grid_size {
            return Err(Error::CoordinateOutOfBounds {
                position: pos,
                size: self.grid_size,
            });
        }
        if pos == self.start || pos == self.goal {
            return Err(Error::ObstacleOnEndpoint { position: pos });
        }
        self.obstacles.insert(pos);
        Ok(())
    }

    /// Places up to `count` obstacles on free cells, never on the start or
    /// goal. Gives up after `count * 10` draws; returns how many were placed.
    pub fn scatter_obstacles(&mut self, count: usize, seed: u64) -> usize {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut placed = 0;
        let mut attempts = 0;
        let max_attempts = count * 10;

        while placed < count && attempts < max_attempts {
            let pos = Position::new(
                rng.gen_range(0..self.grid_size),
                rng.gen_range(0..self.grid_size),
            );
            if pos != self.start && pos != self.goal && self.obstacles.insert(pos) {
                placed += 1;
            }
            attempts += 1;
        }
        placed
    }

    pub fn create_grid(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.grid_size, self.cell_width)?;
        for &pos in &self.obstacles {
            grid.set_obstacle(pos, true)?;
        }
        Ok(grid)
    }

    fn check_endpoint(&self, position: Position, role: Endpoint) -> Result<()> {
        if position.row >= self.grid_size || position.col >= self.grid_size {
            return Err(Error::InvalidEndpoint {
                role,
                position,
                reason: EndpointFault::OutOfBounds,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["grid_pathfinder"];
        argv.extend_from_slice(args);
        Config::parse_from(argv)
    }

    #[test]
    fn defaults_to_opposite_corners() {
        let scenario = Scenario::from_config(&config(&["--grid-size", "7"])).unwrap();
        assert_eq!(scenario.start, Position::new(0, 0));
        assert_eq!(scenario.goal, Position::new(6, 6));
        assert!(scenario.obstacles.is_empty());
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = Scenario::from_config(&config(&["--grid-size", "0"])).unwrap_err();
        assert_eq!(err, Error::InvalidSize { size: 0 });
    }

    #[test]
    fn goal_outside_grid_is_rejected() {
        let err = Scenario::from_config(&config(&["--grid-size", "5", "--goal", "5,0"]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEndpoint {
                role: Endpoint::Goal,
                reason: EndpointFault::OutOfBounds,
                ..
            }
        ));
    }

    #[test]
    fn obstacles_are_bounds_checked() {
        let err = Scenario::from_config(&config(&["--grid-size", "4", "--obstacle", "2,9"]))
            .unwrap_err();
        assert_eq!(
            err,
            Error::CoordinateOutOfBounds {
                position: Position::new(2, 9),
                size: 4
            }
        );
    }

    #[test]
    fn obstacle_on_start_is_rejected() {
        let err = Scenario::from_config(&config(&["--obstacle", "0,0"])).unwrap_err();
        assert_eq!(
            err,
            Error::ObstacleOnEndpoint {
                position: Position::new(0, 0)
            }
        );
    }

    #[test]
    fn seeded_scatter_is_reproducible_and_spares_endpoints() {
        let args = ["--grid-size", "12", "--num-obstacles", "30", "--seed", "7"];
        let a = Scenario::from_config(&config(&args)).unwrap();
        let b = Scenario::from_config(&config(&args)).unwrap();
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.obstacles.len(), 30);
        assert!(!a.obstacles.contains(&a.start));
        assert!(!a.obstacles.contains(&a.goal));
    }

    #[test]
    fn scatter_stops_when_the_grid_is_full() {
        let mut scenario = Scenario::open(2, 1).unwrap();
        let placed = scenario.scatter_obstacles(10, 1);
        assert!(placed <= 2);
        assert!(!scenario.obstacles.contains(&scenario.start));
    }

    #[test]
    fn grid_carries_the_obstacles() {
        let scenario =
            Scenario::from_config(&config(&["--grid-size", "3", "--obstacle", "1,1"])).unwrap();
        let grid = scenario.create_grid().unwrap();
        assert_eq!(grid.size(), 3);
        assert!(grid.is_obstacle(Position::new(1, 1)));
        assert_eq!(grid.obstacle_count(), 1);
    }
}
