use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A unit of production work: one item to be produced in `quantity` copies
/// using one of its admissible processing methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    /// Grouping label subject to the diversification cap (e.g. a brand).
    pub category: String,
    pub quantity: u32,
    /// Admissible processing methods, e.g. ["offset", "digital"].
    pub methods: Vec<String>,
    /// Bundle this item belongs to, if any.
    #[serde(default)]
    pub bundle: Option<String>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        quantity: u32,
        methods: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            quantity,
            methods: methods.into_iter().map(normalize_method).collect(),
            bundle: None,
        }
    }

    pub fn in_bundle(mut self, bundle: impl Into<String>) -> Self {
        self.bundle = Some(bundle.into());
        self
    }

    pub fn admits(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }
}

/// A set of items that must all be produced by the same provider
/// (members may still use different methods at that provider).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    pub id: String,
    pub items: Vec<String>,
}

impl Bundle {
    pub fn new(id: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            id: id.into(),
            items,
        }
    }
}

/// A service provider with per-method production capacity.
/// Methods absent from the map have zero capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub capacity: BTreeMap<String, u32>,
}

impl Provider {
    pub fn new(id: impl Into<String>, capacity: BTreeMap<String, u32>) -> Self {
        let capacity = capacity
            .into_iter()
            .map(|(m, c)| (normalize_method(m), c))
            .collect();
        Self {
            id: id.into(),
            capacity,
        }
    }

    pub fn capacity_for(&self, method: &str) -> u32 {
        self.capacity.get(method).copied().unwrap_or(0)
    }
}

/// Unit cost of producing one copy of an item at a provider with a method.
/// The absence of an entry makes that combination infeasible, not free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEntry {
    pub item: String,
    pub provider: String,
    pub method: String,
    pub unit_cost: f64,
}

impl CostEntry {
    pub fn new(
        item: impl Into<String>,
        provider: impl Into<String>,
        method: impl Into<String>,
        unit_cost: f64,
    ) -> Self {
        Self {
            item: item.into(),
            provider: provider.into(),
            method: normalize_method(method.into()),
            unit_cost,
        }
    }
}

/// Solve-time configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveConfig {
    /// Maximum items of one category per provider; a bundle counts as one
    /// item regardless of its member count.
    #[serde(default = "default_category_cap")]
    pub max_items_per_category_per_provider: u32,
    #[serde(default)]
    pub time_limit_seconds: Option<f64>,
    #[serde(default)]
    pub worker_count: Option<usize>,
    #[serde(default = "default_true")]
    pub enable_symmetry_breaking: bool,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            max_items_per_category_per_provider: default_category_cap(),
            time_limit_seconds: None,
            worker_count: None,
            enable_symmetry_breaking: true,
        }
    }
}

fn default_category_cap() -> u32 {
    4
}

fn default_true() -> bool {
    true
}

/// Method labels are compared case-insensitively everywhere; normalize once
/// at the boundary.
pub(crate) fn normalize_method(method: impl Into<String>) -> String {
    method.into().trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_are_normalized() {
        let item = Item::new("i1", "acme", 10, vec!["  Offset ".into(), "DIGITAL".into()]);
        assert!(item.admits("offset"));
        assert!(item.admits("digital"));
        assert!(!item.admits("gravure"));
    }

    #[test]
    fn absent_capacity_is_zero() {
        let provider = Provider::new("p1", BTreeMap::from([("offset".into(), 500)]));
        assert_eq!(provider.capacity_for("offset"), 500);
        assert_eq!(provider.capacity_for("digital"), 0);
    }

    #[test]
    fn config_defaults() {
        let config: SolveConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_items_per_category_per_provider, 4);
        assert!(config.enable_symmetry_breaking);
        assert!(config.time_limit_seconds.is_none());
    }
}
