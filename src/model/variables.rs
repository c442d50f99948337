use std::collections::HashMap;

use crate::domain::{EntityStore, SolveError};

use super::problem::{BoolProblem, VarId};

/// One admissible (provider, method) choice for an item.
#[derive(Debug, Clone)]
pub struct AssignVar {
    pub provider: usize,
    pub method: String,
    pub var: VarId,
    pub unit_cost: f64,
}

/// Registry of all decision variables, indexed by item and by
/// (provider, method) so constraint assembly never scans the full set.
#[derive(Debug)]
pub struct VariableMap {
    /// item index -> admissible assignment variables, in provider order.
    by_item: Vec<Vec<AssignVar>>,
    /// (provider index, method) -> [(item index, var)], for capacity rows.
    by_provider_method: HashMap<(usize, String), Vec<(usize, VarId)>>,
    /// bundle index -> provider index -> y[bundle,provider].
    bundle_provider: Vec<Vec<VarId>>,
}

impl VariableMap {
    /// Create one boolean variable per (item, provider, method) combination
    /// that is admissible: non-zero capacity, method admitted by the item,
    /// and a cost entry present. Combinations failing any of these get no
    /// variable at all, which keeps the model proportional to the costed
    /// combinations rather than the full cross-product.
    ///
    /// Fails fast with `UnassignableItem` if pruning leaves an item with no
    /// variable, so an impossible input never reaches the solver.
    pub fn build(store: &EntityStore, problem: &mut BoolProblem) -> Result<Self, SolveError> {
        let mut by_item = Vec::with_capacity(store.items().len());
        let mut by_provider_method: HashMap<(usize, String), Vec<(usize, VarId)>> = HashMap::new();

        for (i_idx, item) in store.items().iter().enumerate() {
            let mut vars = Vec::new();
            for (p_idx, provider) in store.providers().iter().enumerate() {
                for method in &item.methods {
                    if provider.capacity_for(method) == 0 {
                        continue;
                    }
                    let Some(unit_cost) = store.unit_cost(i_idx, p_idx, method) else {
                        continue;
                    };
                    let var = problem.new_var(format!("x_{}_{}_{}", item.id, provider.id, method));
                    vars.push(AssignVar {
                        provider: p_idx,
                        method: method.clone(),
                        var,
                        unit_cost,
                    });
                    by_provider_method
                        .entry((p_idx, method.clone()))
                        .or_default()
                        .push((i_idx, var));
                }
            }
            if vars.is_empty() {
                return Err(SolveError::UnassignableItem {
                    item: item.id.clone(),
                });
            }
            by_item.push(vars);
        }

        // Bundle indicators: shared by the cohesion and diversification
        // constraint families, allocated exactly once here.
        let mut bundle_provider = Vec::with_capacity(store.bundles().len());
        for bundle in store.bundles() {
            let per_provider = store
                .providers()
                .iter()
                .map(|provider| problem.new_var(format!("y_{}_{}", bundle.id, provider.id)))
                .collect();
            bundle_provider.push(per_provider);
        }

        Ok(Self {
            by_item,
            by_provider_method,
            bundle_provider,
        })
    }

    pub fn item_vars(&self, item_idx: usize) -> &[AssignVar] {
        &self.by_item[item_idx]
    }

    /// Variables of an item at one provider (across methods). Their sum is
    /// 0/1 under the uniqueness constraint and acts as the item's presence
    /// indicator at that provider.
    pub fn item_vars_at(&self, item_idx: usize, provider_idx: usize) -> Vec<VarId> {
        self.by_item[item_idx]
            .iter()
            .filter(|av| av.provider == provider_idx)
            .map(|av| av.var)
            .collect()
    }

    pub fn provider_method_vars(&self, provider_idx: usize, method: &str) -> &[(usize, VarId)] {
        self.by_provider_method
            .get(&(provider_idx, method.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn bundle_var(&self, bundle_idx: usize, provider_idx: usize) -> VarId {
        self.bundle_provider[bundle_idx][provider_idx]
    }

    pub fn assignment_var_count(&self) -> usize {
        self.by_item.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::domain::{Bundle, CostEntry, Item, Provider, SolveConfig};

    use super::*;

    fn two_provider_store() -> EntityStore {
        EntityStore::new(
            vec![
                Item::new("i1", "acme", 5, vec!["offset".into(), "digital".into()]),
                Item::new("i2", "acme", 3, vec!["offset".into()]).in_bundle("k1"),
            ],
            vec![Bundle::new("k1", vec!["i2".into()])],
            vec![
                Provider::new(
                    "p1",
                    BTreeMap::from([("offset".into(), 100), ("digital".into(), 50)]),
                ),
                Provider::new("p2", BTreeMap::from([("offset".into(), 100)])),
            ],
            vec![
                CostEntry::new("i1", "p1", "offset", 1.0),
                CostEntry::new("i1", "p1", "digital", 2.0),
                CostEntry::new("i1", "p2", "offset", 3.0),
                CostEntry::new("i2", "p1", "offset", 4.0),
                // no cost for (i2, p2, offset): combination stays infeasible
            ],
            SolveConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn prunes_to_costed_admissible_combinations() {
        let store = two_provider_store();
        let mut problem = BoolProblem::new();
        let vars = VariableMap::build(&store, &mut problem).unwrap();

        assert_eq!(vars.item_vars(0).len(), 3);
        assert_eq!(vars.item_vars(1).len(), 1);
        assert_eq!(vars.assignment_var_count(), 4);
        // plus one bundle indicator per provider
        assert_eq!(problem.num_vars(), 4 + 2);
        assert_eq!(vars.provider_method_vars(0, "offset").len(), 2);
        assert_eq!(vars.provider_method_vars(1, "digital").len(), 0);
        assert_eq!(vars.item_vars_at(0, 0).len(), 2);
    }

    #[test]
    fn item_without_any_combination_fails_fast() {
        let store = EntityStore::new(
            vec![Item::new("i1", "acme", 5, vec!["gravure".into()])],
            vec![],
            vec![Provider::new(
                "p1",
                BTreeMap::from([("offset".into(), 100)]),
            )],
            vec![],
            SolveConfig::default(),
        )
        .unwrap();
        let mut problem = BoolProblem::new();
        let err = VariableMap::build(&store, &mut problem).unwrap_err();
        assert!(matches!(err, SolveError::UnassignableItem { .. }));
    }
}
