use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Outcome of one solve invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolveStatus {
    /// Proven optimal within the time budget.
    Optimal,
    /// Valid solution found, optimality unproven (time limit hit).
    Feasible,
    /// Proven that no solution satisfies all constraints.
    Infeasible,
    /// No solution found before the time limit; feasibility unresolved.
    Unknown,
}

impl SolveStatus {
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::Feasible => write!(f, "FEASIBLE"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolveStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// One item's chosen (provider, method) pair and its cost contribution.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub item: String,
    pub provider: String,
    pub method: String,
    pub quantity: u32,
    pub unit_cost: f64,
    pub total_cost: f64,
}

/// Full solve report: status, objective, timings and aggregates. Assignments
/// are present only for OPTIMAL/FEASIBLE outcomes, never partially populated.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub status: SolveStatus,
    pub objective_value: Option<f64>,
    pub best_bound: Option<f64>,
    pub gap: Option<f64>,
    pub solve_time_seconds: f64,
    pub assignments: Vec<Assignment>,
    pub total_items: usize,
    pub total_quantity: u64,
    /// provider -> method -> capacity utilization percentage.
    pub provider_utilization: BTreeMap<String, BTreeMap<String, f64>>,
    /// category -> provider -> assigned item count (bundles counted once).
    pub category_distribution: BTreeMap<String, BTreeMap<String, u32>>,
}

impl SolveReport {
    /// Report for an outcome without a usable solution.
    pub fn without_solution(status: SolveStatus, solve_time_seconds: f64) -> Self {
        Self {
            status,
            objective_value: None,
            best_bound: None,
            gap: None,
            solve_time_seconds,
            assignments: Vec::new(),
            total_items: 0,
            total_quantity: 0,
            provider_utilization: BTreeMap::new(),
            category_distribution: BTreeMap::new(),
        }
    }
}
