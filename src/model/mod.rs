// Model construction: business entities -> boolean program

pub mod constraints;
pub mod objective;
pub mod problem;
pub mod symmetry;
pub mod variables;

pub use problem::{BoolProblem, Cmp, LinearConstraint, VarId};
pub use variables::{AssignVar, VariableMap};

use crate::domain::{EntityStore, SolveError};

/// A fully assembled model: the boolean program handed to a backend, plus
/// the variable registry needed to decode its solution.
#[derive(Debug)]
pub struct AllocationModel {
    pub problem: BoolProblem,
    pub vars: VariableMap,
}

/// Build the complete model: variables, the four constraint families, the
/// objective, and (when enabled) symmetry breaking.
pub fn build(store: &EntityStore) -> Result<AllocationModel, SolveError> {
    let mut problem = BoolProblem::new();
    let vars = VariableMap::build(store, &mut problem)?;

    constraints::add_assignment_uniqueness(store, &mut problem, &vars);
    constraints::add_bundle_cohesion(store, &mut problem, &vars);
    constraints::add_category_diversification(store, &mut problem, &vars);
    constraints::add_capacity(store, &mut problem, &vars);
    objective::add_objective(store, &mut problem, &vars);

    if store.config().enable_symmetry_breaking {
        symmetry::add_symmetry_breaking(store, &mut problem, &vars);
    }

    tracing::debug!(
        variables = problem.num_vars(),
        assignment_variables = vars.assignment_var_count(),
        constraints = problem.constraints().len(),
        "model built"
    );

    Ok(AllocationModel { problem, vars })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::domain::{CostEntry, Item, Provider, SolveConfig};

    use super::*;

    #[test]
    fn symmetry_rows_follow_the_config_flag() {
        let items = vec![Item::new("i1", "acme", 5, vec!["offset".into()])];
        let providers = vec![
            Provider::new("p1", BTreeMap::from([("offset".into(), 100)])),
            Provider::new("p2", BTreeMap::from([("offset".into(), 100)])),
        ];
        let costs = vec![
            CostEntry::new("i1", "p1", "offset", 2.0),
            CostEntry::new("i1", "p2", "offset", 2.0),
        ];

        let mut config = SolveConfig::default();
        config.enable_symmetry_breaking = false;
        let store = EntityStore::new(
            items.clone(),
            vec![],
            providers.clone(),
            costs.clone(),
            config,
        )
        .unwrap();
        let without = build(&store).unwrap();

        let store =
            EntityStore::new(items, vec![], providers, costs, SolveConfig::default()).unwrap();
        let with = build(&store).unwrap();

        assert_eq!(
            with.problem.constraints().len(),
            without.problem.constraints().len() + 1
        );
    }
}
