use crate::grid::Position;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What just happened to a cell during a search step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepRole {
    /// The cell was popped from the frontier and closed.
    Expanded,
    /// The cell was discovered and entered the frontier.
    Frontier,
}

/// Hook invoked synchronously for every expansion and frontier insertion.
///
/// Observers only see positions, so they cannot reshape the grid while a
/// search is running. Anything fallible inside an observer has to be dealt
/// with there; the engine never looks at a result.
pub trait StepObserver {
    fn on_step(&mut self, position: Position, role: StepRole);
}

impl<F> StepObserver for F
where
    F: FnMut(Position, StepRole),
{
    fn on_step(&mut self, position: Position, role: StepRole) {
        self(position, role)
    }
}

pub struct NoOpObserver;

impl StepObserver for NoOpObserver {
    fn on_step(&mut self, _position: Position, _role: StepRole) {}
}

/// Terminal result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The goal was expanded.
    Succeeded(Position),
    /// The frontier ran dry before the goal was reached.
    Exhausted,
    /// A [`CancelToken`] was raised.
    Cancelled,
    /// The configured timeout elapsed.
    TimedOut,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }
}

/// Shared flag a host can raise to stop a running search.
///
/// The engine polls it once per iteration.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
