// I/O boundary: problem-file loading and result export. The core never
// formats or persists anything itself; these are its external collaborators.

pub mod export;
pub mod loader;

pub use export::{write_assignments_csv, write_report_json};
pub use loader::{load_problem, ProblemFile};

use crate::domain::DataError;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed problem file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("assignment references unknown item '{0}'")]
    UnknownAssignmentItem(String),
}
