use std::collections::HashMap;

use crate::domain::{Assignment, EntityStore};

/// Re-check a finished assignment set against every constraint family,
/// independently of the model that produced it. Returns human-readable
/// violations; an empty list means the solution is consistent. The
/// orchestrator treats any violation as a model-construction defect.
pub fn check(store: &EntityStore, assignments: &[Assignment]) -> Vec<String> {
    let mut violations = Vec::new();

    let mut by_item: HashMap<&str, Vec<&Assignment>> = HashMap::new();
    for a in assignments {
        by_item.entry(a.item.as_str()).or_default().push(a);
    }

    // Uniqueness and admissibility.
    for item in store.items() {
        match by_item.get(item.id.as_str()).map(Vec::as_slice) {
            Some([a]) => {
                if !item.admits(&a.method) {
                    violations.push(format!(
                        "item '{}' assigned inadmissible method '{}'",
                        item.id, a.method
                    ));
                }
                let known = store
                    .item_idx(&item.id)
                    .zip(store.provider_idx(&a.provider))
                    .and_then(|(i, p)| store.unit_cost(i, p, &a.method));
                if known.is_none() {
                    violations.push(format!(
                        "item '{}' assigned uncosted combination ({}, {})",
                        item.id, a.provider, a.method
                    ));
                }
            }
            Some(multiple) => violations.push(format!(
                "item '{}' assigned {} times",
                item.id,
                multiple.len()
            )),
            None => violations.push(format!("item '{}' has no assignment", item.id)),
        }
    }

    let provider_of: HashMap<&str, &str> = assignments
        .iter()
        .map(|a| (a.item.as_str(), a.provider.as_str()))
        .collect();

    // Bundle cohesion.
    for (b_idx, bundle) in store.bundles().iter().enumerate() {
        let providers: Vec<&str> = store
            .bundle_members(b_idx)
            .iter()
            .filter_map(|&i| provider_of.get(store.item(i).id.as_str()).copied())
            .collect();
        if providers.windows(2).any(|w| w[0] != w[1]) {
            violations.push(format!("bundle '{}' is split across providers", bundle.id));
        }
    }

    // Category diversification, counting each bundle once.
    let cap = store.config().max_items_per_category_per_provider;
    for (category, item_idxs) in store.categories() {
        let mut count_at: HashMap<&str, u32> = HashMap::new();
        let mut counted_bundles = Vec::new();
        for &i_idx in item_idxs {
            let item = store.item(i_idx);
            let Some(&provider) = provider_of.get(item.id.as_str()) else {
                continue;
            };
            if let Some(b_idx) = store.bundle_of(i_idx) {
                if counted_bundles.contains(&(b_idx, provider)) {
                    continue;
                }
                counted_bundles.push((b_idx, provider));
            }
            *count_at.entry(provider).or_default() += 1;
        }
        for (provider, count) in count_at {
            if count > cap {
                violations.push(format!(
                    "category '{}' has {} items at provider '{}' (cap {})",
                    category, count, provider, cap
                ));
            }
        }
    }

    // Capacity.
    let mut load: HashMap<(&str, &str), u64> = HashMap::new();
    for a in assignments {
        *load.entry((a.provider.as_str(), a.method.as_str())).or_default() +=
            u64::from(a.quantity);
    }
    for ((provider, method), quantity) in load {
        let capacity = store
            .provider_idx(provider)
            .map(|p| store.provider(p).capacity_for(method))
            .unwrap_or(0);
        if quantity > u64::from(capacity) {
            violations.push(format!(
                "provider '{}' method '{}' loaded {} over capacity {}",
                provider, method, quantity, capacity
            ));
        }
    }

    violations
}
