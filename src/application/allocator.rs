use std::sync::Arc;

use crate::domain::{EntityStore, SolveError, SolveReport, SolveStatus};
use crate::model;
use crate::solver::{RawStatus, SolverBackend, SolverSettings};

use super::{extract, verify};

/// Orchestrates one solve: build the model, invoke the backend once,
/// classify its status, extract and verify the assignment. Each invocation
/// owns its private model; the store is read-only throughout.
pub struct AllocationService {
    backend: Arc<dyn SolverBackend>,
}

impl AllocationService {
    pub fn new(backend: Arc<dyn SolverBackend>) -> Self {
        Self { backend }
    }

    pub fn solve(&self, store: &EntityStore) -> Result<SolveReport, SolveError> {
        let model = model::build(store)?;
        let settings = SolverSettings::from(store.config());

        tracing::info!(
            backend = self.backend.name(),
            variables = model.problem.num_vars(),
            constraints = model.problem.constraints().len(),
            time_limit = ?settings.time_limit,
            "invoking solver"
        );
        let outcome = self.backend.solve(&model.problem, &settings)?;
        let solve_time = outcome.solve_time.as_secs_f64();
        tracing::info!(status = ?outcome.status, solve_time, "solver returned");

        let report = match outcome.status {
            RawStatus::Infeasible => {
                SolveReport::without_solution(SolveStatus::Infeasible, solve_time)
            }
            RawStatus::Optimal => {
                let assignments = extract::extract_strict(store, &model.vars, &outcome.values)?;
                self.checked_report(store, SolveStatus::Optimal, assignments, solve_time)?
            }
            RawStatus::TimeLimit => {
                match extract::try_extract(store, &model.vars, &outcome.values) {
                    Some(assignments) => {
                        self.checked_report(store, SolveStatus::Feasible, assignments, solve_time)?
                    }
                    None => SolveReport::without_solution(SolveStatus::Unknown, solve_time),
                }
            }
        };

        tracing::info!(
            status = %report.status,
            objective = ?report.objective_value,
            "solve finished"
        );
        Ok(report)
    }

    fn checked_report(
        &self,
        store: &EntityStore,
        status: SolveStatus,
        assignments: Vec<crate::domain::Assignment>,
        solve_time: f64,
    ) -> Result<SolveReport, SolveError> {
        let violations = verify::check(store, &assignments);
        if !violations.is_empty() {
            return Err(SolveError::InconsistentSolution(violations.join("; ")));
        }
        Ok(extract::build_report(store, status, assignments, solve_time))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use crate::domain::{CostEntry, Item, Provider, SolveConfig};
    use crate::model::BoolProblem;
    use crate::solver::{ExhaustiveSolver, SolveOutcome};

    use super::*;

    fn store() -> EntityStore {
        EntityStore::new(
            vec![Item::new("i1", "acme", 10, vec!["offset".into()])],
            vec![],
            vec![
                Provider::new("p1", BTreeMap::from([("offset".into(), 100)])),
                Provider::new("p2", BTreeMap::from([("offset".into(), 100)])),
            ],
            vec![
                CostEntry::new("i1", "p1", "offset", 3.0),
                CostEntry::new("i1", "p2", "offset", 2.0),
            ],
            SolveConfig::default(),
        )
        .unwrap()
    }

    /// Backend that always hits its deadline, handing back whatever
    /// incumbent it was constructed with.
    struct StalledSolver {
        incumbent: Vec<f64>,
    }

    impl SolverBackend for StalledSolver {
        fn solve(
            &self,
            _problem: &BoolProblem,
            _settings: &SolverSettings,
        ) -> Result<SolveOutcome, SolveError> {
            Ok(SolveOutcome {
                status: RawStatus::TimeLimit,
                values: self.incumbent.clone(),
                solve_time: Duration::from_secs(1),
            })
        }

        fn name(&self) -> &str {
            "stalled"
        }
    }

    #[test]
    fn picks_the_cheaper_provider() {
        let service = AllocationService::new(Arc::new(ExhaustiveSolver::new()));
        let report = service.solve(&store()).unwrap();

        assert_eq!(report.status, SolveStatus::Optimal);
        assert_eq!(report.objective_value, Some(20.0));
        assert_eq!(report.assignments[0].provider, "p2");
    }

    #[test]
    fn time_limit_with_a_usable_incumbent_is_feasible() {
        // i1's variables are p1 then p2 in store order; select p1.
        let backend = StalledSolver {
            incumbent: vec![1.0, 0.0],
        };
        let report = AllocationService::new(Arc::new(backend))
            .solve(&store())
            .unwrap();

        assert_eq!(report.status, SolveStatus::Feasible);
        assert_eq!(report.objective_value, Some(30.0));
        assert_eq!(report.best_bound, None);
        assert_eq!(report.assignments[0].provider, "p1");
    }

    #[test]
    fn time_limit_without_an_incumbent_is_unknown() {
        let backend = StalledSolver {
            incumbent: Vec::new(),
        };
        let report = AllocationService::new(Arc::new(backend))
            .solve(&store())
            .unwrap();

        assert_eq!(report.status, SolveStatus::Unknown);
        assert_eq!(report.objective_value, None);
        assert!(report.assignments.is_empty());
    }
}
