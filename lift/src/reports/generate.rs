//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Rendered diagnostics, in pipeline order.
    pub diagnostics: Vec<String>,
    /// Declarations across all units.
    pub declarations: usize,
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Units were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// Result when units were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// File names of the written units.
    pub files: Vec<String>,
}

/// A unit in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.diagnostics {
            out.warning(diagnostic);
        }
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        match &self.result {
            GenerationResult::Written(written) => {
                out.key_value("Generated", &written.output_dir.display().to_string());
                for file in &written.files {
                    out.added_item(file);
                }
                out.newline();
                out.preformatted(&format!(
                    "{} unit{}, {} declaration{}",
                    written.files.len(),
                    plural(written.files.len()),
                    self.declarations,
                    plural(self.declarations)
                ));
            }
            GenerationResult::Preview(files) => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
                out.divider("Summary");
                out.preformatted(&format!(
                    "{} unit{} would be generated",
                    files.len(),
                    plural(files.len())
                ));
            }
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
