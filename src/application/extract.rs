use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::domain::{Assignment, EntityStore, SolveError, SolveReport, SolveStatus};
use crate::model::VariableMap;

/// Read solved variable values back into one (provider, method) choice per
/// item. By construction exactly one variable per item is 1; any deviation
/// is a defect in model construction, so the strict path aborts instead of
/// producing a silently wrong assignment.
pub fn extract_strict(
    store: &EntityStore,
    vars: &VariableMap,
    values: &[f64],
) -> Result<Vec<Assignment>, SolveError> {
    decode(store, vars, values).map_err(SolveError::InconsistentSolution)
}

/// Lenient decoding for time-limited outcomes: an incumbent that does not
/// decode to a complete integral assignment yields `None`, which the
/// orchestrator reports as UNKNOWN rather than as an error.
pub fn try_extract(
    store: &EntityStore,
    vars: &VariableMap,
    values: &[f64],
) -> Option<Vec<Assignment>> {
    decode(store, vars, values).ok()
}

fn decode(
    store: &EntityStore,
    vars: &VariableMap,
    values: &[f64],
) -> Result<Vec<Assignment>, String> {
    let mut assignments = Vec::with_capacity(store.items().len());
    for (i_idx, item) in store.items().iter().enumerate() {
        let chosen: Vec<_> = vars
            .item_vars(i_idx)
            .iter()
            .filter(|av| values.get(av.var.index()).copied().unwrap_or(0.0) > 0.5)
            .collect();
        let av = match chosen.as_slice() {
            [one] => *one,
            [] => return Err(format!("item '{}' has no selected variable", item.id)),
            _ => {
                return Err(format!(
                    "item '{}' has {} selected variables",
                    item.id,
                    chosen.len()
                ))
            }
        };
        let unit_cost = av.unit_cost;
        assignments.push(Assignment {
            item: item.id.clone(),
            provider: store.provider(av.provider).id.clone(),
            method: av.method.clone(),
            quantity: item.quantity,
            unit_cost,
            total_cost: unit_cost * f64::from(item.quantity),
        });
    }
    Ok(assignments)
}

/// Assemble the final report: objective, utilization and distribution
/// aggregates over a complete assignment set.
pub fn build_report(
    store: &EntityStore,
    status: SolveStatus,
    assignments: Vec<Assignment>,
    solve_time_seconds: f64,
) -> SolveReport {
    let objective_value: f64 = assignments.iter().map(|a| a.total_cost).sum();
    let total_quantity: u64 = assignments.iter().map(|a| u64::from(a.quantity)).sum();
    let provider_utilization = utilization(store, &assignments);
    let category_distribution = distribution(store, &assignments);

    SolveReport {
        status,
        objective_value: Some(objective_value),
        best_bound: if status == SolveStatus::Optimal {
            Some(objective_value)
        } else {
            None
        },
        gap: if status == SolveStatus::Optimal {
            Some(0.0)
        } else {
            None
        },
        solve_time_seconds,
        total_items: assignments.len(),
        total_quantity,
        assignments,
        provider_utilization,
        category_distribution,
    }
}

/// Capacity utilization percentage per (provider, method).
fn utilization(
    store: &EntityStore,
    assignments: &[Assignment],
) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut used: HashMap<(&str, &str), u64> = HashMap::new();
    for a in assignments {
        *used
            .entry((a.provider.as_str(), a.method.as_str()))
            .or_default() += u64::from(a.quantity);
    }

    let mut result: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for provider in store.providers() {
        let per_method = result.entry(provider.id.clone()).or_default();
        for (method, &capacity) in &provider.capacity {
            let quantity = used
                .get(&(provider.id.as_str(), method.as_str()))
                .copied()
                .unwrap_or(0);
            let pct = if capacity > 0 {
                quantity as f64 / f64::from(capacity) * 100.0
            } else {
                0.0
            };
            per_method.insert(method.clone(), pct);
        }
    }
    result
}

/// Assigned items per (category, provider), bundles counted once.
fn distribution(
    store: &EntityStore,
    assignments: &[Assignment],
) -> BTreeMap<String, BTreeMap<String, u32>> {
    let provider_of: HashMap<&str, &str> = assignments
        .iter()
        .map(|a| (a.item.as_str(), a.provider.as_str()))
        .collect();

    let mut result: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
    for (category, item_idxs) in store.categories() {
        let per_provider = result.entry(category.to_string()).or_default();
        let mut counted_bundles = Vec::new();
        for &i_idx in item_idxs {
            let item = store.item(i_idx);
            let Some(&provider) = provider_of.get(item.id.as_str()) else {
                continue;
            };
            if let Some(b_idx) = store.bundle_of(i_idx) {
                if counted_bundles.contains(&b_idx) {
                    continue;
                }
                counted_bundles.push(b_idx);
            }
            *per_provider.entry(provider.to_string()).or_default() += 1;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::domain::{Bundle, CostEntry, Item, Provider, SolveConfig};
    use crate::model;

    use super::*;

    fn store() -> EntityStore {
        EntityStore::new(
            vec![
                Item::new("i1", "acme", 5, vec!["offset".into()]).in_bundle("k1"),
                Item::new("i2", "acme", 3, vec!["offset".into()]).in_bundle("k1"),
            ],
            vec![Bundle::new("k1", vec!["i1".into(), "i2".into()])],
            vec![Provider::new(
                "p1",
                BTreeMap::from([("offset".into(), 100)]),
            )],
            vec![
                CostEntry::new("i1", "p1", "offset", 10.0),
                CostEntry::new("i2", "p1", "offset", 10.0),
            ],
            SolveConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn strict_extraction_rejects_unselected_items() {
        let store = store();
        let model = model::build(&store).unwrap();
        let values = vec![0.0; model.problem.num_vars()];
        let err = extract_strict(&store, &model.vars, &values).unwrap_err();
        assert!(matches!(err, SolveError::InconsistentSolution(_)));
        assert!(try_extract(&store, &model.vars, &values).is_none());
    }

    #[test]
    fn report_aggregates_count_a_bundle_once() {
        let store = store();
        // both items at p1 with the single method
        let assignments = vec![
            Assignment {
                item: "i1".into(),
                provider: "p1".into(),
                method: "offset".into(),
                quantity: 5,
                unit_cost: 10.0,
                total_cost: 50.0,
            },
            Assignment {
                item: "i2".into(),
                provider: "p1".into(),
                method: "offset".into(),
                quantity: 3,
                unit_cost: 10.0,
                total_cost: 30.0,
            },
        ];
        let report = build_report(&store, SolveStatus::Optimal, assignments, 0.1);

        assert_eq!(report.objective_value, Some(80.0));
        assert_eq!(report.best_bound, Some(80.0));
        assert_eq!(report.total_quantity, 8);
        assert_eq!(report.provider_utilization["p1"]["offset"], 8.0);
        // One bundle, so one item against the category count.
        assert_eq!(report.category_distribution["acme"]["p1"], 1);
    }
}
