// Domain module: business entities, validated store, and solve results

pub mod entities;
pub mod error;
pub mod report;
pub mod store;

pub use entities::{Bundle, CostEntry, Item, Provider, SolveConfig};
pub use error::{DataError, SolveError};
pub use report::{Assignment, SolveReport, SolveStatus};
pub use store::EntityStore;
