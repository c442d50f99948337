use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::domain::{EntityStore, SolveReport};

use super::IoError;

#[derive(Debug, Serialize)]
struct AssignmentRow<'a> {
    item_id: &'a str,
    category: &'a str,
    bundle_id: &'a str,
    provider_id: &'a str,
    method: &'a str,
    quantity: u32,
    unit_cost: f64,
    total_cost: f64,
}

/// Write one CSV row per assignment, enriched with the item's category and
/// bundle, sorted by (provider, item) for stable diffs between runs.
pub fn write_assignments_csv(
    path: &Path,
    store: &EntityStore,
    report: &SolveReport,
) -> Result<(), IoError> {
    let mut ordered: Vec<_> = report.assignments.iter().collect();
    ordered.sort_by(|a, b| (&a.provider, &a.item).cmp(&(&b.provider, &b.item)));

    let mut writer = csv::Writer::from_path(path)?;
    for a in ordered {
        let item = store
            .item_idx(&a.item)
            .map(|i| store.item(i))
            .ok_or_else(|| IoError::UnknownAssignmentItem(a.item.clone()))?;
        writer.serialize(AssignmentRow {
            item_id: &a.item,
            category: &item.category,
            bundle_id: item.bundle.as_deref().unwrap_or(""),
            provider_id: &a.provider,
            method: &a.method,
            quantity: a.quantity,
            unit_cost: a.unit_cost,
            total_cost: a.total_cost,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the full report (status, objective, aggregates, assignments) as
/// pretty JSON.
pub fn write_report_json(path: &Path, report: &SolveReport) -> Result<(), IoError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;
    Ok(())
}
