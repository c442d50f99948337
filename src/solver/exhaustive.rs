use std::time::Instant;

use crate::domain::SolveError;
use crate::model::BoolProblem;

use super::{RawStatus, SolveOutcome, SolverBackend, SolverSettings};

/// Feasibility tolerance when checking candidate vectors; everything here is
/// exactly 0/1 so this only absorbs float summation noise.
const EPS: f64 = 1e-6;

/// Exact enumeration over all 0/1 vectors. Proves optimality or
/// infeasibility on instances small enough to enumerate, with no native
/// solver library. Used by the test suite and usable for tiny inputs.
pub struct ExhaustiveSolver {
    max_vars: u32,
}

impl ExhaustiveSolver {
    pub fn new() -> Self {
        Self { max_vars: 24 }
    }

    /// Raise or lower the enumeration limit. The mask is a `u64`, so the
    /// limit is capped at 63 variables regardless of the requested value.
    pub fn with_max_vars(max_vars: u32) -> Self {
        Self {
            max_vars: max_vars.min(63),
        }
    }
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBackend for ExhaustiveSolver {
    fn solve(
        &self,
        problem: &BoolProblem,
        _settings: &SolverSettings,
    ) -> Result<SolveOutcome, SolveError> {
        let n = problem.num_vars();
        if n > self.max_vars as usize {
            return Err(SolveError::ProblemTooLarge(format!(
                "{} variables exceed the enumeration limit of {}",
                n, self.max_vars
            )));
        }

        let start = Instant::now();
        let mut best: Option<(f64, Vec<f64>)> = None;
        let mut values = vec![0.0; n];

        for mask in 0u64..(1u64 << n) {
            for (i, value) in values.iter_mut().enumerate() {
                *value = ((mask >> i) & 1) as f64;
            }
            if !problem
                .constraints()
                .iter()
                .all(|c| c.is_satisfied(&values, EPS))
            {
                continue;
            }
            let objective = problem.objective_value(&values);
            if best.as_ref().map_or(true, |(b, _)| objective < *b) {
                best = Some((objective, values.clone()));
            }
        }

        Ok(match best {
            Some((_, values)) => SolveOutcome {
                status: RawStatus::Optimal,
                values,
                solve_time: start.elapsed(),
            },
            None => SolveOutcome {
                status: RawStatus::Infeasible,
                values: Vec::new(),
                solve_time: start.elapsed(),
            },
        })
    }

    fn name(&self) -> &str {
        "exhaustive"
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Cmp, VarId};

    use super::*;

    #[test]
    fn finds_the_cheapest_feasible_vector() {
        let mut problem = BoolProblem::new();
        let a = problem.new_var("a".into());
        let b = problem.new_var("b".into());
        problem.add_constraint("one".into(), vec![(a, 1.0), (b, 1.0)], Cmp::Eq, 1.0);
        problem.add_objective_term(a, 10.0);
        problem.add_objective_term(b, 7.0);

        let outcome = ExhaustiveSolver::new()
            .solve(&problem, &SolverSettings::default())
            .unwrap();
        assert_eq!(outcome.status, RawStatus::Optimal);
        assert_eq!(outcome.values, vec![0.0, 1.0]);
    }

    #[test]
    fn reports_infeasibility() {
        let mut problem = BoolProblem::new();
        let a = problem.new_var("a".into());
        problem.add_constraint("want_two".into(), vec![(a, 1.0)], Cmp::Eq, 2.0);

        let outcome = ExhaustiveSolver::new()
            .solve(&problem, &SolverSettings::default())
            .unwrap();
        assert_eq!(outcome.status, RawStatus::Infeasible);
        assert!(outcome.values.is_empty());
    }

    #[test]
    fn refuses_oversized_problems() {
        let mut problem = BoolProblem::new();
        for i in 0..30 {
            problem.new_var(format!("v{i}"));
        }
        let err = ExhaustiveSolver::new()
            .solve(&problem, &SolverSettings::default())
            .unwrap_err();
        assert!(matches!(err, SolveError::ProblemTooLarge(_)));
    }

    #[test]
    fn enumeration_limit_never_exceeds_the_mask_width() {
        let mut problem = BoolProblem::new();
        for i in 0..64 {
            problem.new_var(format!("v{i}"));
        }
        // A limit above 63 would shift the mask out of range.
        let err = ExhaustiveSolver::with_max_vars(200)
            .solve(&problem, &SolverSettings::default())
            .unwrap_err();
        assert!(matches!(err, SolveError::ProblemTooLarge(_)));
    }

    #[test]
    fn var_id_indices_line_up_with_values() {
        let mut problem = BoolProblem::new();
        let v = problem.new_var("v".into());
        assert_eq!(v, VarId(0));
    }
}
