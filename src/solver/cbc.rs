// COIN-OR CBC adapter via good_lp. Translates the boolean program into a
// good_lp model and maps the resolution result back onto the raw status
// vocabulary.

use std::time::Instant;

use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolution, SolverModel, Variable as GoodLpVariable,
};

use crate::domain::SolveError;
use crate::model::{BoolProblem, Cmp};

use super::{RawStatus, SolveOutcome, SolverBackend, SolverSettings};

pub struct CbcSolver;

impl CbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBackend for CbcSolver {
    fn solve(
        &self,
        problem: &BoolProblem,
        settings: &SolverSettings,
    ) -> Result<SolveOutcome, SolveError> {
        let start = Instant::now();

        let mut vars = variables!();
        let lp_vars: Vec<GoodLpVariable> = (0..problem.num_vars())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let mut objective: Expression = 0.into();
        for &(var, coeff) in problem.objective() {
            objective += coeff * lp_vars[var.index()];
        }

        let mut model = vars.minimise(objective).using(coin_cbc::coin_cbc);

        for constraint in problem.constraints() {
            let mut lhs: Expression = 0.into();
            for &(var, coeff) in &constraint.terms {
                lhs += coeff * lp_vars[var.index()];
            }
            model = match constraint.cmp {
                Cmp::Le => model.with(lhs.leq(constraint.rhs)),
                Cmp::Eq => model.with(lhs.eq(constraint.rhs)),
                Cmp::Ge => model.with(lhs.geq(constraint.rhs)),
            };
        }

        model.set_parameter("logLevel", if settings.verbose { "1" } else { "0" });
        if let Some(limit) = settings.time_limit {
            model.set_parameter("sec", &format!("{limit}"));
        }
        if let Some(workers) = settings.workers {
            model.set_parameter("threads", &workers.to_string());
        }

        match model.solve() {
            Ok(solution) => {
                let values: Vec<f64> = lp_vars.iter().map(|&v| solution.value(v)).collect();
                let solve_time = start.elapsed();
                // CBC reports success for the best incumbent when it stops
                // on the time budget; only a finish inside the budget is a
                // proof of optimality.
                let status = match settings.time_limit {
                    Some(limit) if solve_time.as_secs_f64() >= limit => RawStatus::TimeLimit,
                    _ => RawStatus::Optimal,
                };
                Ok(SolveOutcome {
                    status,
                    values,
                    solve_time,
                })
            }
            Err(ResolutionError::Infeasible) => Ok(SolveOutcome {
                status: RawStatus::Infeasible,
                values: Vec::new(),
                solve_time: start.elapsed(),
            }),
            Err(error) => Err(SolveError::Backend {
                backend: self.name().to_string(),
                message: format!("{error:?}"),
            }),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }
}
