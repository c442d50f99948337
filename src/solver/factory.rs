use std::sync::Arc;

use super::{CbcSolver, HighsSolver, SolverBackend};

/// Which solving engine to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Pick the default engine (HiGHS).
    #[default]
    Auto,
    CoinCbc,
    Highs,
}

impl Backend {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "auto" => Some(Backend::Auto),
            "cbc" | "coin_cbc" => Some(Backend::CoinCbc),
            "highs" => Some(Backend::Highs),
            _ => None,
        }
    }
}

/// Factory for creating solver backends.
pub struct SolverFactory;

impl SolverFactory {
    pub fn create(backend: Backend) -> Arc<dyn SolverBackend> {
        match backend {
            Backend::Auto | Backend::Highs => Arc::new(HighsSolver::new()),
            Backend::CoinCbc => Arc::new(CbcSolver::new()),
        }
    }

    pub fn default_backend() -> Arc<dyn SolverBackend> {
        Self::create(Backend::Auto)
    }
}
