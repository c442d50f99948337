//! Presswork assigns production items to service providers at minimum total
//! cost, under bundle cohesion, per-category diversification caps, and
//! per-method capacity limits. Business entities are translated into a
//! boolean program which is handed to a discrete solver backend; the solved
//! values are read back into a verified assignment report.

// Domain layer: entities, validated store, solve results
pub mod domain;

// Model construction: entities -> boolean program
pub mod model;

// Solver adapters: concrete implementations of SolverBackend
pub mod solver;

// Application layer: orchestration, extraction, verification
pub mod application;

// I/O boundary: problem loading and result export
pub mod io;

pub use application::AllocationService;
pub use domain::{
    Assignment, Bundle, CostEntry, DataError, EntityStore, Item, Provider, SolveConfig,
    SolveError, SolveReport, SolveStatus,
};
pub use solver::{ExhaustiveSolver, SolverBackend, SolverSettings};

#[cfg(feature = "solver")]
pub use solver::{Backend, CbcSolver, HighsSolver, SolverFactory};
