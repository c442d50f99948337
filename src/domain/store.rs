use std::collections::{BTreeMap, HashMap, HashSet};

use super::entities::{normalize_method, Bundle, CostEntry, Item, Provider, SolveConfig};
use super::error::DataError;

/// Validated, immutable collections of entities plus the lookup indices the
/// model builder needs. Construction performs all structural validation;
/// once built, a store is never mutated.
#[derive(Debug)]
pub struct EntityStore {
    items: Vec<Item>,
    bundles: Vec<Bundle>,
    providers: Vec<Provider>,
    config: SolveConfig,

    item_index: HashMap<String, usize>,
    provider_index: HashMap<String, usize>,
    bundle_index: HashMap<String, usize>,

    /// Member item indices per bundle, in bundle order.
    bundle_members: Vec<Vec<usize>>,
    /// Bundle index per item, if bundled.
    bundle_of: Vec<Option<usize>>,
    /// Item indices per category, in input order. BTreeMap keeps iteration
    /// deterministic across runs.
    items_by_category: BTreeMap<String, Vec<usize>>,
    /// (item index, provider index, method) -> unit cost.
    costs: HashMap<(usize, usize, String), f64>,
}

impl EntityStore {
    pub fn new(
        items: Vec<Item>,
        bundles: Vec<Bundle>,
        providers: Vec<Provider>,
        costs: Vec<CostEntry>,
        config: SolveConfig,
    ) -> Result<Self, DataError> {
        let mut items = items;
        for item in &mut items {
            let methods = std::mem::take(&mut item.methods);
            let mut seen = HashSet::new();
            item.methods = methods
                .into_iter()
                .map(normalize_method)
                .filter(|m| seen.insert(m.clone()))
                .collect();
        }
        let providers: Vec<Provider> = providers
            .into_iter()
            .map(|p| Provider::new(p.id, p.capacity))
            .collect();

        let item_index = index_ids(&items, "item", |i: &Item| &i.id)?;
        let provider_index = index_ids(&providers, "provider", |p: &Provider| &p.id)?;
        let bundle_index = index_ids(&bundles, "bundle", |b: &Bundle| &b.id)?;

        for item in &items {
            if item.quantity == 0 {
                return Err(DataError::NonPositiveQuantity {
                    item: item.id.clone(),
                });
            }
            if item.methods.is_empty() {
                return Err(DataError::NoMethods {
                    item: item.id.clone(),
                });
            }
        }

        let mut bundle_of: Vec<Option<usize>> = vec![None; items.len()];
        let mut bundle_members: Vec<Vec<usize>> = Vec::with_capacity(bundles.len());
        for (b_idx, bundle) in bundles.iter().enumerate() {
            if bundle.items.is_empty() {
                return Err(DataError::EmptyBundle {
                    bundle: bundle.id.clone(),
                });
            }
            let mut members = Vec::with_capacity(bundle.items.len());
            for member_id in &bundle.items {
                let i_idx = *item_index.get(member_id).ok_or_else(|| {
                    DataError::DanglingReference {
                        kind: "bundle",
                        id: bundle.id.clone(),
                        target_kind: "item",
                        target: member_id.clone(),
                    }
                })?;
                if bundle_of[i_idx].is_some() {
                    return Err(DataError::ItemInMultipleBundles {
                        item: member_id.clone(),
                    });
                }
                if items[i_idx].bundle.as_deref() != Some(bundle.id.as_str()) {
                    return Err(DataError::BundleMismatch {
                        item: member_id.clone(),
                        bundle: bundle.id.clone(),
                    });
                }
                bundle_of[i_idx] = Some(b_idx);
                members.push(i_idx);
            }
            bundle_members.push(members);
        }
        // Items claiming a bundle must actually be listed by it.
        for (i_idx, item) in items.iter().enumerate() {
            if let Some(bundle_id) = &item.bundle {
                let b_idx = *bundle_index.get(bundle_id).ok_or_else(|| {
                    DataError::DanglingReference {
                        kind: "item",
                        id: item.id.clone(),
                        target_kind: "bundle",
                        target: bundle_id.clone(),
                    }
                })?;
                if bundle_of[i_idx] != Some(b_idx) {
                    return Err(DataError::BundleMismatch {
                        item: item.id.clone(),
                        bundle: bundle_id.clone(),
                    });
                }
            }
        }

        let mut cost_map: HashMap<(usize, usize, String), f64> =
            HashMap::with_capacity(costs.len());
        for entry in costs {
            let method = normalize_method(entry.method);
            let i_idx =
                *item_index
                    .get(&entry.item)
                    .ok_or_else(|| DataError::DanglingReference {
                        kind: "cost entry",
                        id: entry.item.clone(),
                        target_kind: "item",
                        target: entry.item.clone(),
                    })?;
            let p_idx = *provider_index.get(&entry.provider).ok_or_else(|| {
                DataError::DanglingReference {
                    kind: "cost entry",
                    id: entry.item.clone(),
                    target_kind: "provider",
                    target: entry.provider.clone(),
                }
            })?;
            if entry.unit_cost < 0.0 || !entry.unit_cost.is_finite() {
                return Err(DataError::NegativeCost {
                    item: entry.item,
                    provider: entry.provider,
                    method,
                });
            }
            if cost_map
                .insert((i_idx, p_idx, method.clone()), entry.unit_cost)
                .is_some()
            {
                return Err(DataError::DuplicateCostEntry {
                    item: entry.item,
                    provider: entry.provider,
                    method,
                });
            }
        }

        let mut items_by_category: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i_idx, item) in items.iter().enumerate() {
            items_by_category
                .entry(item.category.clone())
                .or_default()
                .push(i_idx);
        }

        Ok(Self {
            items,
            bundles,
            providers,
            config,
            item_index,
            provider_index,
            bundle_index,
            bundle_members,
            bundle_of,
            items_by_category,
            costs: cost_map,
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    pub fn item(&self, idx: usize) -> &Item {
        &self.items[idx]
    }

    pub fn provider(&self, idx: usize) -> &Provider {
        &self.providers[idx]
    }

    pub fn item_idx(&self, id: &str) -> Option<usize> {
        self.item_index.get(id).copied()
    }

    pub fn provider_idx(&self, id: &str) -> Option<usize> {
        self.provider_index.get(id).copied()
    }

    pub fn bundle_idx(&self, id: &str) -> Option<usize> {
        self.bundle_index.get(id).copied()
    }

    /// Member item indices of a bundle.
    pub fn bundle_members(&self, bundle_idx: usize) -> &[usize] {
        &self.bundle_members[bundle_idx]
    }

    /// Bundle index of an item, if it is bundled.
    pub fn bundle_of(&self, item_idx: usize) -> Option<usize> {
        self.bundle_of[item_idx]
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.items_by_category
            .iter()
            .map(|(category, idxs)| (category.as_str(), idxs.as_slice()))
    }

    pub fn unit_cost(&self, item_idx: usize, provider_idx: usize, method: &str) -> Option<f64> {
        self.costs
            .get(&(item_idx, provider_idx, method.to_string()))
            .copied()
    }

    pub fn cost_entry_count(&self) -> usize {
        self.costs.len()
    }
}

fn index_ids<T>(
    entities: &[T],
    kind: &'static str,
    id_of: impl Fn(&T) -> &String,
) -> Result<HashMap<String, usize>, DataError> {
    let mut index = HashMap::with_capacity(entities.len());
    for (idx, entity) in entities.iter().enumerate() {
        if index.insert(id_of(entity).clone(), idx).is_some() {
            return Err(DataError::DuplicateId {
                kind,
                id: id_of(entity).clone(),
            });
        }
    }
    Ok(index)
}
