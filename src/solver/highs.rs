// HiGHS adapter. Builds a RowProblem (variables first, then constraint
// rows), applies the time/thread options, and maps the model status onto the
// raw status vocabulary.

use std::time::Instant;

use highs::{HighsModelStatus, RowProblem, Sense};

use crate::domain::SolveError;
use crate::model::{BoolProblem, Cmp};

use super::{RawStatus, SolveOutcome, SolverBackend, SolverSettings};

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBackend for HighsSolver {
    fn solve(
        &self,
        problem: &BoolProblem,
        settings: &SolverSettings,
    ) -> Result<SolveOutcome, SolveError> {
        let start = Instant::now();

        // Objective coefficients are attached at column creation.
        let mut cost_by_var = vec![0.0; problem.num_vars()];
        for &(var, coeff) in problem.objective() {
            cost_by_var[var.index()] += coeff;
        }

        let mut pb = RowProblem::default();
        let cols: Vec<_> = cost_by_var
            .iter()
            .map(|&cost| pb.add_integer_column(cost, 0.0..=1.0))
            .collect();

        for constraint in problem.constraints() {
            let terms: Vec<_> = constraint
                .terms
                .iter()
                .map(|&(var, coeff)| (cols[var.index()], coeff))
                .collect();
            match constraint.cmp {
                Cmp::Le => pb.add_row(..=constraint.rhs, &terms),
                Cmp::Eq => pb.add_row(constraint.rhs..=constraint.rhs, &terms),
                Cmp::Ge => pb.add_row(constraint.rhs.., &terms),
            }
        }

        let mut model = pb.optimise(Sense::Minimise);
        model.set_option("output_flag", settings.verbose);
        if let Some(limit) = settings.time_limit {
            model.set_option("time_limit", limit);
        }
        if let Some(workers) = settings.workers {
            model.set_option("parallel", "on");
            model.set_option("threads", workers as i32);
        }

        let solved = model.solve();
        let solve_time = start.elapsed();

        match solved.status() {
            HighsModelStatus::Optimal => Ok(SolveOutcome {
                status: RawStatus::Optimal,
                values: solved.get_solution().columns().to_vec(),
                solve_time,
            }),
            HighsModelStatus::Infeasible => Ok(SolveOutcome {
                status: RawStatus::Infeasible,
                values: Vec::new(),
                solve_time,
            }),
            HighsModelStatus::ReachedTimeLimit => Ok(SolveOutcome {
                status: RawStatus::TimeLimit,
                // Best incumbent, if any; the orchestrator decides whether
                // it decodes to a complete assignment.
                values: solved.get_solution().columns().to_vec(),
                solve_time,
            }),
            status => Err(SolveError::Backend {
                backend: self.name().to_string(),
                message: format!("HiGHS returned status {status:?}"),
            }),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
