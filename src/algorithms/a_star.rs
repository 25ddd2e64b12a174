use crate::algorithms::common::{CancelToken, Outcome, StepObserver, StepRole};
use crate::algorithms::frontier::Frontier;
use crate::algorithms::heuristic::{step_cost, Heuristic};
use crate::error::{Endpoint, EndpointFault, Error, Result};
use crate::grid::{Cell, Grid, Position};
use crate::statistics::SearchStats;
use rustc_hash::FxHashSet;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Tunables for a single search.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub heuristic: Heuristic,
    /// Checked once per iteration; a raised token ends the search as
    /// [`Outcome::Cancelled`].
    pub cancel: Option<CancelToken>,
    /// Wall-clock budget measured from the first step.
    pub timeout: Option<Duration>,
}

/// Lifecycle of a [`SearchSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Running,
    Succeeded,
    Exhausted,
    Cancelled,
    TimedOut,
}

impl SearchState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SearchState::Idle | SearchState::Running)
    }
}

impl From<Outcome> for SearchState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Succeeded(_) => SearchState::Succeeded,
            Outcome::Exhausted => SearchState::Exhausted,
            Outcome::Cancelled => SearchState::Cancelled,
            Outcome::TimedOut => SearchState::TimedOut,
        }
    }
}

/// Result of advancing a session by one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Done(Outcome),
}

/// One best-first search over a grid, from validation to a terminal outcome.
///
/// The session borrows the grid exclusively, so no other search can touch
/// its cost fields until the session is dropped. Sessions are one-shot:
/// once finished, further steps report the same outcome.
pub struct SearchSession<'g> {
    grid: &'g mut Grid,
    start: Position,
    goal: Position,
    options: SearchOptions,
    frontier: Frontier,
    visited: FxHashSet<Position>,
    stats: SearchStats,
    state: SearchState,
    outcome: Option<Outcome>,
    started_at: Option<Instant>,
}

impl<'g> SearchSession<'g> {
    /// Validates the endpoints, clears any previous search state on `grid`
    /// and seeds the frontier with `start`.
    ///
    /// On error the grid is left exactly as it was.
    pub fn new(
        grid: &'g mut Grid,
        start: Position,
        goal: Position,
        options: SearchOptions,
    ) -> Result<Self> {
        check_endpoint(grid, start, Endpoint::Start)?;
        check_endpoint(grid, goal, Endpoint::Goal)?;

        grid.reset_search_state();

        let estimate = options.heuristic.estimate(start, goal);
        if let Some(cell) = grid.cell_mut(start) {
            cell.record(0, estimate, None);
        }

        let mut frontier = Frontier::new();
        frontier.push(start, estimate);

        debug!(%start, %goal, heuristic = ?options.heuristic, "search session created");

        Ok(SearchSession {
            grid,
            start,
            goal,
            options,
            frontier,
            visited: FxHashSet::default(),
            stats: SearchStats::default(),
            state: SearchState::Idle,
            outcome: None,
            started_at: None,
        })
    }

    /// Performs one iteration: pop, close, notify, test for the goal, relax
    /// the neighbors.
    pub fn step<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> Step {
        if let Some(outcome) = self.outcome {
            return Step::Done(outcome);
        }

        if self.state == SearchState::Idle {
            self.state = SearchState::Running;
            self.started_at = Some(Instant::now());

            if self.start == self.goal {
                return self.finish(Outcome::Succeeded(self.goal));
            }
        }

        if self.options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return self.finish(Outcome::Cancelled);
        }

        if let (Some(limit), Some(started_at)) = (self.options.timeout, self.started_at) {
            if started_at.elapsed() >= limit {
                return self.finish(Outcome::TimedOut);
            }
        }

        let Some(current) = self.frontier.pop() else {
            return self.finish(Outcome::Exhausted);
        };

        self.visited.insert(current);
        self.stats.expansions += 1;
        trace!(position = %current, "expanding");
        observer.on_step(current, StepRole::Expanded);

        if current == self.goal {
            return self.finish(Outcome::Succeeded(current));
        }

        let Some(current_cost) = self.grid.cell(current).and_then(Cell::cost) else {
            return Step::Continue;
        };

        for neighbor in self.grid.neighbors(&current) {
            if self.visited.contains(&neighbor) {
                continue;
            }
            if self.grid.is_obstacle(neighbor) {
                continue;
            }

            let tentative = current_cost + step_cost(current, neighbor);
            let in_frontier = self.frontier.contains(&neighbor);
            let Some(cell) = self.grid.cell_mut(neighbor) else {
                continue;
            };
            let improves = cell.cost().map_or(true, |known| tentative < known);

            if improves || !in_frontier {
                let estimate = self.options.heuristic.estimate(neighbor, self.goal);
                cell.record(tentative, estimate, Some(current));
                self.frontier.push(neighbor, tentative + estimate);

                if in_frontier {
                    self.stats.cost_improvements += 1;
                } else {
                    self.stats.frontier_insertions += 1;
                    observer.on_step(neighbor, StepRole::Frontier);
                }
            }
        }

        Step::Continue
    }

    /// Steps until a terminal outcome.
    pub fn run<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> Outcome {
        loop {
            if let Step::Done(outcome) = self.step(observer) {
                return outcome;
            }
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    pub fn is_visited(&self, pos: &Position) -> bool {
        self.visited.contains(pos)
    }

    pub fn visited(&self) -> impl Iterator<Item = &Position> + '_ {
        self.visited.iter()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Route from the start to the goal, once the search has succeeded.
    pub fn path(&self) -> Option<Vec<Position>> {
        match self.outcome {
            Some(Outcome::Succeeded(goal)) => Some(reconstruct_path(&*self.grid, goal)),
            _ => None,
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Step {
        self.outcome = Some(outcome);
        self.state = outcome.into();
        self.stats.elapsed = self.started_at.map(|t| t.elapsed()).unwrap_or_default();
        debug!(
            ?outcome,
            expansions = self.stats.expansions,
            frontier_insertions = self.stats.frontier_insertions,
            "search finished"
        );
        Step::Done(outcome)
    }
}

fn check_endpoint(grid: &Grid, position: Position, role: Endpoint) -> Result<()> {
    let reason = if !grid.contains(position) {
        EndpointFault::OutOfBounds
    } else if grid.is_obstacle(position) {
        EndpointFault::Obstacle
    } else {
        return Ok(());
    };
    Err(Error::InvalidEndpoint {
        role,
        position,
        reason,
    })
}

/// Searches `grid` from `start` to `goal` with default options.
pub fn run<O: StepObserver + ?Sized>(
    grid: &mut Grid,
    start: Position,
    goal: Position,
    observer: &mut O,
) -> Result<Outcome> {
    run_with_options(grid, start, goal, SearchOptions::default(), observer)
}

pub fn run_with_options<O: StepObserver + ?Sized>(
    grid: &mut Grid,
    start: Position,
    goal: Position,
    options: SearchOptions,
    observer: &mut O,
) -> Result<Outcome> {
    let mut session = SearchSession::new(grid, start, goal, options)?;
    Ok(session.run(observer))
}

/// Follows predecessors back from `goal` and returns the route in
/// start-to-goal order. Empty when `goal` was never reached.
pub fn reconstruct_path(grid: &Grid, goal: Position) -> Vec<Position> {
    if grid.cell(goal).and_then(Cell::cost).is_none() {
        return Vec::new();
    }

    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = grid.cell(current).and_then(Cell::predecessor) {
        path.push(prev);
        current = prev;
        // Predecessor chains are acyclic; this only guards a corrupted grid.
        if path.len() > grid.cells().len() {
            return Vec::new();
        }
    }
    path.reverse();
    path
}
