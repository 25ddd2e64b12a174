//! Step-by-step best-first search on a square grid.
//!
//! A [`Grid`] owns the cells and their obstacle flags. A
//! [`SearchSession`](algorithms::a_star::SearchSession) runs one search over
//! it, reporting every expansion and frontier insertion to a
//! [`StepObserver`]. The [`simulation`] module is the terminal host that
//! builds grids from [`config::Config`] and draws each step.

pub mod algorithms;
pub mod board;
pub mod config;
pub mod error;
pub mod grid;
pub mod scenario;
pub mod simulation;
pub mod statistics;

pub use algorithms::a_star::{
    reconstruct_path, run, run_with_options, SearchOptions, SearchSession, SearchState, Step,
};
pub use algorithms::common::{CancelToken, NoOpObserver, Outcome, StepObserver, StepRole};
pub use algorithms::heuristic::Heuristic;
pub use error::{Error, Result};
pub use grid::{Cell, Grid, Position};
