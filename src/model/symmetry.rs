use std::collections::HashMap;

use crate::domain::EntityStore;

use super::problem::{BoolProblem, Cmp, VarId};
use super::variables::VariableMap;

/// Tolerance for cost comparisons when detecting interchangeable providers.
/// Costs travel through floats, so exact binary equality would split
/// genuinely symmetric providers over rounding noise.
pub const COST_EPS: f64 = 1e-6;

/// Partition providers into equivalence classes of interchangeable ones:
/// identical capacity vectors (exact, they are integers) and identical cost
/// vectors over every (item, method), including which combinations are
/// costed at all. Classes keep the stable input order and only classes with
/// two or more members are returned. Pure data partitioning; nothing here
/// touches the solver.
pub fn provider_symmetry_classes(store: &EntityStore, eps: f64) -> Vec<Vec<usize>> {
    let mut by_capacity: HashMap<Vec<(String, u32)>, Vec<usize>> = HashMap::new();
    for (p_idx, provider) in store.providers().iter().enumerate() {
        let signature: Vec<(String, u32)> = provider
            .capacity
            .iter()
            .map(|(m, &c)| (m.clone(), c))
            .collect();
        by_capacity.entry(signature).or_default().push(p_idx);
    }

    let mut groups: Vec<Vec<usize>> = by_capacity.into_values().collect();
    // HashMap iteration order is arbitrary; order classes by first member.
    groups.sort_by_key(|g| g[0]);

    let mut classes = Vec::new();
    for group in groups {
        // Split each capacity group by cost equivalence.
        let mut subclasses: Vec<Vec<usize>> = Vec::new();
        for p_idx in group {
            match subclasses
                .iter_mut()
                .find(|sub| costs_equivalent(store, sub[0], p_idx, eps))
            {
                Some(sub) => sub.push(p_idx),
                None => subclasses.push(vec![p_idx]),
            }
        }
        classes.extend(subclasses.into_iter().filter(|sub| sub.len() >= 2));
    }
    classes
}

fn costs_equivalent(store: &EntityStore, a: usize, b: usize, eps: f64) -> bool {
    for (i_idx, item) in store.items().iter().enumerate() {
        for method in &item.methods {
            match (
                store.unit_cost(i_idx, a, method),
                store.unit_cost(i_idx, b, method),
            ) {
                (None, None) => {}
                (Some(ca), Some(cb)) if (ca - cb).abs() <= eps => {}
                _ => return false,
            }
        }
    }
    true
}

/// Within each equivalence class, impose a total order on assigned quantity
/// (provider i carries at least as much as provider i+1) so the solver never
/// explores permutation-equivalent solutions.
pub fn add_symmetry_breaking(store: &EntityStore, problem: &mut BoolProblem, vars: &VariableMap) {
    for class in provider_symmetry_classes(store, COST_EPS) {
        for pair in class.windows(2) {
            let (first, second) = (pair[0], pair[1]);
            let mut terms: Vec<(VarId, f64)> = Vec::new();
            for i_idx in 0..store.items().len() {
                let quantity = f64::from(store.item(i_idx).quantity);
                for var in vars.item_vars_at(i_idx, first) {
                    terms.push((var, quantity));
                }
                for var in vars.item_vars_at(i_idx, second) {
                    terms.push((var, -quantity));
                }
            }
            if !terms.is_empty() {
                problem.add_constraint(
                    format!(
                        "symmetry_{}_{}",
                        store.provider(first).id,
                        store.provider(second).id
                    ),
                    terms,
                    Cmp::Ge,
                    0.0,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::domain::{CostEntry, Item, Provider, SolveConfig};

    use super::*;

    fn store_with_costs(costs: Vec<CostEntry>, capacities: Vec<(&str, u32)>) -> EntityStore {
        let providers = capacities
            .into_iter()
            .map(|(id, cap)| Provider::new(id, BTreeMap::from([("offset".into(), cap)])))
            .collect();
        EntityStore::new(
            vec![Item::new("i1", "acme", 5, vec!["offset".into()])],
            vec![],
            providers,
            costs,
            SolveConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn identical_providers_form_one_class() {
        let store = store_with_costs(
            vec![
                CostEntry::new("i1", "p1", "offset", 2.0),
                CostEntry::new("i1", "p2", "offset", 2.0),
                CostEntry::new("i1", "p3", "offset", 9.0),
            ],
            vec![("p1", 100), ("p2", 100), ("p3", 100)],
        );
        let classes = provider_symmetry_classes(&store, COST_EPS);
        assert_eq!(classes, vec![vec![0, 1]]);
    }

    #[test]
    fn rounding_noise_does_not_split_a_class() {
        let store = store_with_costs(
            vec![
                CostEntry::new("i1", "p1", "offset", 2.0),
                CostEntry::new("i1", "p2", "offset", 2.0 + 1e-9),
            ],
            vec![("p1", 100), ("p2", 100)],
        );
        assert_eq!(provider_symmetry_classes(&store, COST_EPS).len(), 1);
    }

    #[test]
    fn differing_capacity_or_cost_presence_breaks_symmetry() {
        // Different capacity.
        let store = store_with_costs(
            vec![
                CostEntry::new("i1", "p1", "offset", 2.0),
                CostEntry::new("i1", "p2", "offset", 2.0),
            ],
            vec![("p1", 100), ("p2", 200)],
        );
        assert!(provider_symmetry_classes(&store, COST_EPS).is_empty());

        // Same capacity, one uncosted combination.
        let store = store_with_costs(
            vec![CostEntry::new("i1", "p1", "offset", 2.0)],
            vec![("p1", 100), ("p2", 100)],
        );
        assert!(provider_symmetry_classes(&store, COST_EPS).is_empty());
    }

    #[test]
    fn ordering_constraints_are_emitted_per_consecutive_pair() {
        let store = store_with_costs(
            vec![
                CostEntry::new("i1", "p1", "offset", 2.0),
                CostEntry::new("i1", "p2", "offset", 2.0),
                CostEntry::new("i1", "p3", "offset", 2.0),
            ],
            vec![("p1", 100), ("p2", 100), ("p3", 100)],
        );
        let mut problem = BoolProblem::new();
        let vars = VariableMap::build(&store, &mut problem).unwrap();
        add_symmetry_breaking(&store, &mut problem, &vars);

        let names: Vec<&str> = problem
            .constraints()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["symmetry_p1_p2", "symmetry_p2_p3"]);
        let c = &problem.constraints()[0];
        assert_eq!(c.cmp, Cmp::Ge);
        assert_eq!(c.terms.len(), 2);
        assert_eq!(c.terms[0].1, 5.0);
        assert_eq!(c.terms[1].1, -5.0);
    }
}
