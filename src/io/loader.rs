use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{Bundle, CostEntry, EntityStore, Item, Provider, SolveConfig};

use super::IoError;

/// On-disk problem document: all entities plus optional configuration in one
/// JSON file.
#[derive(Debug, Deserialize)]
pub struct ProblemFile {
    pub items: Vec<Item>,
    #[serde(default)]
    pub bundles: Vec<Bundle>,
    pub providers: Vec<Provider>,
    pub costs: Vec<CostEntry>,
    #[serde(default)]
    pub config: SolveConfig,
}

impl ProblemFile {
    pub fn into_store(self) -> Result<EntityStore, IoError> {
        Ok(EntityStore::new(
            self.items,
            self.bundles,
            self.providers,
            self.costs,
            self.config,
        )?)
    }
}

/// Load and validate a problem file.
pub fn load_problem(path: &Path) -> Result<EntityStore, IoError> {
    let file = File::open(path)?;
    let problem: ProblemFile = serde_json::from_reader(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        items = problem.items.len(),
        bundles = problem.bundles.len(),
        providers = problem.providers.len(),
        costs = problem.costs.len(),
        "problem loaded"
    );
    problem.into_store()
}
