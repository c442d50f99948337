/// Structural errors in the input data, detected before model construction.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{kind} '{id}' references unknown {target_kind} '{target}'")]
    DanglingReference {
        kind: &'static str,
        id: String,
        target_kind: &'static str,
        target: String,
    },

    #[error("item '{item}' and bundle '{bundle}' disagree on membership")]
    BundleMismatch { item: String, bundle: String },

    #[error("item '{item}' belongs to more than one bundle")]
    ItemInMultipleBundles { item: String },

    #[error("item '{item}' has non-positive quantity")]
    NonPositiveQuantity { item: String },

    #[error("item '{item}' lists no processing methods")]
    NoMethods { item: String },

    #[error("negative unit cost for ({item}, {provider}, {method})")]
    NegativeCost {
        item: String,
        provider: String,
        method: String,
    },

    #[error("duplicate cost entry for ({item}, {provider}, {method})")]
    DuplicateCostEntry {
        item: String,
        provider: String,
        method: String,
    },

    #[error("bundle '{bundle}' is empty")]
    EmptyBundle { bundle: String },
}

/// Errors raised while building the model or solving it.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error(transparent)]
    Data(#[from] DataError),

    /// Pruning infeasibility: the item admits no costed (provider, method)
    /// combination at all. Distinct from solver-level infeasibility and
    /// reported before any solve attempt.
    #[error("item '{item}' has no admissible (provider, method) combination")]
    UnassignableItem { item: String },

    #[error("solver backend '{backend}' failed: {message}")]
    Backend { backend: String, message: String },

    #[error("model too large for this backend: {0}")]
    ProblemTooLarge(String),

    /// A solved model whose values do not decode to exactly one choice per
    /// item, or whose decoded assignment violates a constraint. This is a
    /// defect in model construction and aborts the run.
    #[error("inconsistent solution: {0}")]
    InconsistentSolution(String),
}
