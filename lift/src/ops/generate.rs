//! Generate operation - writes extension units for a snapshot.

use std::{collections::HashSet, path::Path};

use asynclift_codegen::{GeneratedUnit, Pipeline};
use asynclift_snapshot::Snapshot;
use eyre::{Context, Result};

use crate::{
    reports::{GenerateReport, GenerationResult, PreviewFile, WrittenResult},
    timer::PhaseTimer,
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory generated units are written to.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Units are written even when some members were rejected; the rejected
/// members are reported as diagnostics.
pub fn generate(snapshot: &Snapshot, opts: GenerateOptions) -> Result<GenerateReport> {
    let pipeline = Pipeline::new().plugin(PhaseTimer::new());
    let ctx = pipeline
        .run(&snapshot.table, snapshot.options.clone())
        .wrap_err("Pipeline failed")?;

    let diagnostics: Vec<String> = ctx.diagnostics.iter().map(|d| d.to_string()).collect();
    let declarations = ctx.units.iter().map(|u| u.declarations).sum();

    let result = if opts.dry_run {
        GenerationResult::Preview(
            ctx.units
                .iter()
                .map(|unit| PreviewFile {
                    path: unit.file_name.clone(),
                    content: unit.content.clone(),
                })
                .collect(),
        )
    } else {
        let files = write_units(&ctx.units, opts.output_dir)?;

        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            files,
        })
    };

    Ok(GenerateReport {
        diagnostics,
        declarations,
        result,
    })
}

/// Write every unit into `output_dir`, returning the file names in order.
///
/// Fails rather than overwrite a file written earlier in the same call.
fn write_units(units: &[GeneratedUnit], output_dir: &Path) -> Result<Vec<String>> {
    std::fs::create_dir_all(output_dir)
        .wrap_err_with(|| format!("Failed to create {}", output_dir.display()))?;

    let mut written = HashSet::with_capacity(units.len());
    let mut files = Vec::with_capacity(units.len());
    for unit in units {
        let path = output_dir.join(&unit.file_name);
        eyre::ensure!(
            written.insert(path.clone()),
            "Refusing to overwrite {}: two units share the file name",
            path.display()
        );
        std::fs::write(&path, &unit.content)
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), declarations = unit.declarations, "wrote unit");
        files.push(unit.file_name.clone());
    }
    Ok(files)
}
