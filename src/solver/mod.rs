// Solver backends: concrete engines behind one trait seam

pub mod exhaustive;

#[cfg(feature = "solver")]
pub mod cbc;
#[cfg(feature = "solver")]
pub mod factory;
#[cfg(feature = "solver")]
pub mod highs;

pub use exhaustive::ExhaustiveSolver;

#[cfg(feature = "solver")]
pub use cbc::CbcSolver;
#[cfg(feature = "solver")]
pub use factory::{Backend, SolverFactory};
#[cfg(feature = "solver")]
pub use highs::HighsSolver;

use std::time::Duration;

use crate::domain::{SolveConfig, SolveError};
use crate::model::BoolProblem;

/// Engine-facing slice of the configuration.
#[derive(Debug, Clone, Default)]
pub struct SolverSettings {
    pub time_limit: Option<f64>,
    pub workers: Option<usize>,
    pub verbose: bool,
}

impl From<&SolveConfig> for SolverSettings {
    fn from(config: &SolveConfig) -> Self {
        Self {
            time_limit: config.time_limit_seconds,
            workers: config.worker_count,
            verbose: false,
        }
    }
}

/// What the engine itself reported, before the orchestrator classifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawStatus {
    /// Proven optimal.
    Optimal,
    /// Proven infeasible.
    Infeasible,
    /// Stopped on the time limit; `values` may or may not decode to a
    /// complete solution.
    TimeLimit,
}

/// Raw outcome of one engine invocation.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: RawStatus,
    /// One value per variable for Optimal/TimeLimit, empty for Infeasible.
    pub values: Vec<f64>,
    pub solve_time: Duration,
}

/// Contract every solving engine adapter fulfills. The core invokes a
/// backend exactly once per solve and never retries or mutates the model on
/// a degraded outcome.
pub trait SolverBackend: Send + Sync {
    fn solve(&self, problem: &BoolProblem, settings: &SolverSettings)
        -> Result<SolveOutcome, SolveError>;

    fn name(&self) -> &str;
}
