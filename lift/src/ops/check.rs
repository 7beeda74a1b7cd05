//! Check operation - diagnostics without output.

use std::path::Path;

use asynclift_codegen::Pipeline;
use asynclift_snapshot::Snapshot;
use eyre::{Context, Result};

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the full pipeline and keeps its diagnostics and per-member summaries;
/// generated units are counted but not written.
pub fn check(snapshot: &Snapshot, snapshot_path: &Path) -> Result<CheckReport> {
    let ctx = Pipeline::new()
        .run(&snapshot.table, snapshot.options.clone())
        .wrap_err("Validation failed")?;

    Ok(CheckReport {
        snapshot_path: snapshot_path.to_path_buf(),
        error_count: ctx.error_count(),
        warning_count: ctx.warning_count(),
        unit_count: ctx.units.len(),
        members: ctx.reports(),
        diagnostics: ctx.diagnostics,
    })
}
