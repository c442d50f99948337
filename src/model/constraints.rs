use crate::domain::EntityStore;

use super::problem::{BoolProblem, Cmp, VarId};
use super::variables::VariableMap;

/// Each item takes exactly one (provider, method) combination.
pub fn add_assignment_uniqueness(
    store: &EntityStore,
    problem: &mut BoolProblem,
    vars: &VariableMap,
) {
    for (i_idx, item) in store.items().iter().enumerate() {
        let terms: Vec<(VarId, f64)> = vars
            .item_vars(i_idx)
            .iter()
            .map(|av| (av.var, 1.0))
            .collect();
        problem.add_constraint(format!("assign_{}", item.id), terms, Cmp::Eq, 1.0);
    }
}

/// All items of a bundle share one provider, while each member may still use
/// a different method there. For every (bundle, provider, member) the
/// member's method-sum at that provider is tied to the shared indicator
/// `y[bundle,provider]`, which enforces equality across all members without
/// pairwise constraints. The indicators of a bundle additionally sum to 1;
/// implied by member uniqueness, but stated to tighten the relaxation.
pub fn add_bundle_cohesion(store: &EntityStore, problem: &mut BoolProblem, vars: &VariableMap) {
    for (b_idx, bundle) in store.bundles().iter().enumerate() {
        for (p_idx, provider) in store.providers().iter().enumerate() {
            let y = vars.bundle_var(b_idx, p_idx);
            for &i_idx in store.bundle_members(b_idx) {
                let mut terms: Vec<(VarId, f64)> = vars
                    .item_vars_at(i_idx, p_idx)
                    .into_iter()
                    .map(|v| (v, 1.0))
                    .collect();
                // A member with no variable at this provider pins y to 0.
                terms.push((y, -1.0));
                problem.add_constraint(
                    format!(
                        "bundle_{}_{}_{}",
                        bundle.id,
                        provider.id,
                        store.item(i_idx).id
                    ),
                    terms,
                    Cmp::Eq,
                    0.0,
                );
            }
        }
        let terms: Vec<(VarId, f64)> = (0..store.providers().len())
            .map(|p_idx| (vars.bundle_var(b_idx, p_idx), 1.0))
            .collect();
        problem.add_constraint(
            format!("bundle_{}_one_provider", bundle.id),
            terms,
            Cmp::Eq,
            1.0,
        );
    }
}

/// At most `max_items_per_category_per_provider` items of one category at
/// one provider, where a whole bundle counts as a single item. For each
/// (category, provider) the count is the sum of the indicators of the
/// distinct bundles touching the category plus the method-sums of the
/// category's unbundled items, never the individual bundled items, which
/// would over-count by the bundle's size. Bundle indicators are reused from
/// the cohesion family, so a bundle spanning several categories is counted
/// once per category without new variables.
pub fn add_category_diversification(
    store: &EntityStore,
    problem: &mut BoolProblem,
    vars: &VariableMap,
) {
    let cap = f64::from(store.config().max_items_per_category_per_provider);

    for (category, item_idxs) in store.categories() {
        // Distinct bundles with at least one member of this category, in
        // first-touch order, and the category's unbundled items.
        let mut bundles: Vec<usize> = Vec::new();
        let mut standalone: Vec<usize> = Vec::new();
        for &i_idx in item_idxs {
            match store.bundle_of(i_idx) {
                Some(b_idx) => {
                    if !bundles.contains(&b_idx) {
                        bundles.push(b_idx);
                    }
                }
                None => standalone.push(i_idx),
            }
        }

        for (p_idx, provider) in store.providers().iter().enumerate() {
            let mut terms: Vec<(VarId, f64)> = Vec::new();
            for &b_idx in &bundles {
                terms.push((vars.bundle_var(b_idx, p_idx), 1.0));
            }
            for &i_idx in &standalone {
                for var in vars.item_vars_at(i_idx, p_idx) {
                    terms.push((var, 1.0));
                }
            }
            if !terms.is_empty() {
                problem.add_constraint(
                    format!("category_{}_{}", category, provider.id),
                    terms,
                    Cmp::Le,
                    cap,
                );
            }
        }
    }
}

/// Per (provider, method): assigned quantities must fit the capacity.
pub fn add_capacity(store: &EntityStore, problem: &mut BoolProblem, vars: &VariableMap) {
    for (p_idx, provider) in store.providers().iter().enumerate() {
        for (method, &capacity) in &provider.capacity {
            let terms: Vec<(VarId, f64)> = vars
                .provider_method_vars(p_idx, method)
                .iter()
                .map(|&(i_idx, var)| (var, f64::from(store.item(i_idx).quantity)))
                .collect();
            if !terms.is_empty() {
                problem.add_constraint(
                    format!("capacity_{}_{}", provider.id, method),
                    terms,
                    Cmp::Le,
                    f64::from(capacity),
                );
            }
        }
    }
}
