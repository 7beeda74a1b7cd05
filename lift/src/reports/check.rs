//! Check command report data structures.

use std::path::PathBuf;

use asynclift_codegen::pipeline::{Diagnostic, MemberReport};
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from a check run.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub snapshot_path: PathBuf,
    pub error_count: usize,
    pub warning_count: usize,
    /// Units the snapshot would produce.
    pub unit_count: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub members: Vec<MemberReport>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.error_count == 0
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.diagnostics {
            out.warning(&diagnostic.to_string());
        }
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        let lifted = self.members.iter().filter(|m| !m.rejected).count();
        let summary = format!(
            "{} of {} marked method(s) lifted into {} unit(s)",
            lifted,
            self.members.len(),
            self.unit_count
        );
        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.snapshot_path.display()));
        } else {
            out.preformatted(&format!(
                "✗ {} has {} error(s)",
                self.snapshot_path.display(),
                self.error_count
            ));
        }
        out.preformatted(&format!("  {}", summary));
    }
}
