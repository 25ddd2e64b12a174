use crate::algorithms::a_star::{SearchOptions, SearchSession, Step};
use crate::algorithms::common::{CancelToken, Outcome, StepObserver, StepRole};
use crate::algorithms::heuristic::{step_cost, Heuristic};
use crate::board::Board;
use crate::config::Config;
use crate::error::Result;
use crate::grid::{Cell, Grid, Position};
use crate::scenario::Scenario;
use crate::statistics::SearchReport;
use pathfinding::prelude::astar;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Observer that keeps a [`Board`] in sync with the search and draws it.
///
/// Output failures are logged once and then drawing stops; they never
/// reach the search.
pub struct TerminalRenderer<W: Write> {
    board: Board,
    out: W,
    enabled: bool,
    delay: Duration,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(board: Board, out: W, enabled: bool, delay: Duration) -> Self {
        TerminalRenderer {
            board,
            out,
            enabled,
            delay,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Redraws the whole board under `header`, then waits out the frame delay.
    pub fn draw_frame(&mut self, header: &str) {
        if !self.enabled {
            return;
        }
        if let Err(err) = self.write_frame(header) {
            warn!(error = %err, "rendering failed; continuing without visualization");
            self.enabled = false;
            return;
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    pub fn into_parts(self) -> (Board, W) {
        (self.board, self.out)
    }

    fn write_frame(&mut self, header: &str) -> io::Result<()> {
        // Clear the terminal and home the cursor.
        write!(self.out, "\x1B[2J\x1B[1;1H")?;
        writeln!(self.out, "=== GRID PATHFINDER ===")?;
        writeln!(self.out, "{}", header)?;
        write!(self.out, "{}", self.board.render())?;
        self.out.flush()
    }
}

impl<W: Write> StepObserver for TerminalRenderer<W> {
    fn on_step(&mut self, position: Position, role: StepRole) {
        self.board.apply(position, role);
    }
}

/// Host side of a search: owns the configuration, the scenario and the
/// render loop, and calls into the engine one step at a time.
pub struct Simulation {
    config: Config,
    scenario: Scenario,
    cancel: CancelToken,
}

impl Simulation {
    pub fn new(config: Config) -> Result<Self> {
        let scenario = Scenario::from_config(&config)?;
        Ok(Self::with_scenario(config, scenario))
    }

    pub fn with_scenario(config: Config, scenario: Scenario) -> Self {
        Simulation {
            config,
            scenario,
            cancel: CancelToken::new(),
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Token that stops the running search at its next iteration.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn run(&self) -> Result<SearchReport> {
        let (report, _board, _out) = self.run_with_output(io::stdout())?;
        Ok(report)
    }

    /// Runs the search, drawing to `out`, and returns the report together
    /// with the final board.
    pub fn run_with_output<W: Write>(&self, out: W) -> Result<(SearchReport, Board, W)> {
        let (start, goal) = (self.scenario.start, self.scenario.goal);
        let mut grid = self.scenario.create_grid()?;

        let heuristic = Heuristic::from(self.config.heuristic);
        let options = SearchOptions {
            heuristic,
            cancel: Some(self.cancel.clone()),
            timeout: self.config.timeout_ms.map(Duration::from_millis),
        };

        let mut renderer = TerminalRenderer::new(
            Board::new(&grid, start, goal),
            out,
            !self.config.no_visualization,
            Duration::from_millis(self.config.delay_ms),
        );

        info!(
            grid_size = grid.size(),
            obstacles = grid.obstacle_count(),
            %start,
            %goal,
            ?heuristic,
            "starting search"
        );

        let mut session = SearchSession::new(&mut grid, start, goal, options)?;
        renderer.draw_frame(&format!("Heuristic: {:?} | Step: 0", heuristic));

        let mut steps = 0usize;
        let outcome = loop {
            match session.step(&mut renderer) {
                Step::Continue => {
                    steps += 1;
                    let header = format!(
                        "Heuristic: {:?} | Step: {} | Expanded: {} | Frontier: {}",
                        heuristic,
                        steps,
                        session.stats().expansions,
                        session.frontier_len()
                    );
                    renderer.draw_frame(&header);
                }
                Step::Done(outcome) => break outcome,
            }
        };

        let stats = session.stats().clone();
        let path = if self.config.no_path {
            None
        } else {
            session.path()
        };
        drop(session);

        let path_cost = match outcome {
            Outcome::Succeeded(reached) => grid.cell(reached).and_then(Cell::cost),
            _ => None,
        };
        if let Some(path) = &path {
            renderer.board_mut().mark_path(path);
        }

        let report = SearchReport {
            outcome,
            stats,
            grid_size: grid.size(),
            num_obstacles: grid.obstacle_count(),
            path_cost,
            path_moves: path.as_ref().map(|p| p.len().saturating_sub(1)),
            optimal_cost: optimal_cost(&grid, start, goal),
        };

        match outcome {
            Outcome::Succeeded(_) => info!(cost = ?path_cost, "goal reached"),
            Outcome::Exhausted => info!("frontier exhausted; goal unreachable"),
            Outcome::Cancelled => warn!("search cancelled"),
            Outcome::TimedOut => warn!("search timed out"),
        }

        renderer.draw_frame("=== SEARCH COMPLETE ===");
        let (board, out) = renderer.into_parts();
        Ok((report, board, out))
    }
}

/// Cheapest route cost from `start` to `goal`, computed independently with
/// the `pathfinding` crate. `None` when no route exists.
pub fn optimal_cost(grid: &Grid, start: Position, goal: Position) -> Option<u32> {
    astar(
        &start,
        |p| {
            grid.neighbors(p)
                .into_iter()
                .filter(|n| !grid.is_obstacle(*n))
                .map(|n| (n, step_cost(*p, n)))
                .collect::<Vec<_>>()
        },
        |p| Heuristic::Octile.estimate(*p, goal),
        |p| *p == goal,
    )
    .map(|(_, cost)| cost)
}
