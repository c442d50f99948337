use crate::domain::EntityStore;

use super::problem::BoolProblem;
use super::variables::VariableMap;

/// Minimize total cost: unit cost × quantity per chosen combination. The
/// only objective; tie-breaking is left to the backend's search order.
pub fn add_objective(store: &EntityStore, problem: &mut BoolProblem, vars: &VariableMap) {
    for (i_idx, item) in store.items().iter().enumerate() {
        let quantity = f64::from(item.quantity);
        for av in vars.item_vars(i_idx) {
            problem.add_objective_term(av.var, av.unit_cost * quantity);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::domain::{CostEntry, Item, Provider, SolveConfig};

    use super::*;

    #[test]
    fn coefficients_are_cost_times_quantity() {
        let store = EntityStore::new(
            vec![Item::new("i1", "acme", 5, vec!["offset".into()])],
            vec![],
            vec![Provider::new(
                "p1",
                BTreeMap::from([("offset".into(), 100)]),
            )],
            vec![CostEntry::new("i1", "p1", "offset", 2.5)],
            SolveConfig::default(),
        )
        .unwrap();
        let mut problem = BoolProblem::new();
        let vars = VariableMap::build(&store, &mut problem).unwrap();
        add_objective(&store, &mut problem, &vars);

        assert_eq!(problem.objective().len(), 1);
        assert_eq!(problem.objective()[0].1, 12.5);
    }
}
