//! State shared by the phases of one run.

use asynclift_symbols::{Location, SymbolQuery, TypeHandle};
use serde::Serialize;

use super::diagnostic::{Diagnostic, Severity};
use crate::{
    GeneratedUnit,
    config::{GenerationConfig, GeneratorOptions, MemberOverrides},
    descriptor::MemberDescriptor,
    shape::Shape,
};

/// A type with at least one marked method.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub owner: TypeHandle,
    pub config: GenerationConfig,
    /// Marked methods, in declaration order.
    pub members: Vec<CandidateMember>,
    /// File name of the unit written by the synthesize phase.
    pub unit: Option<String>,
}

/// A marked method and what the pipeline decided about it.
#[derive(Debug, Clone)]
pub struct CandidateMember {
    pub descriptor: MemberDescriptor,
    pub overrides: MemberOverrides,
    /// Set by the validate phase when any rule failed.
    pub rejected: bool,
    /// Set by the classify phase.
    pub shape: Option<Shape>,
    /// Declarations written by the synthesize phase.
    pub declarations: usize,
}

impl CandidateMember {
    pub fn new(descriptor: MemberDescriptor, overrides: MemberOverrides) -> Self {
        Self {
            descriptor,
            overrides,
            rejected: false,
            shape: None,
            declarations: 0,
        }
    }
}

/// Summary of one marked method after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberReport {
    pub member: String,
    pub location: Option<Location>,
    pub shape: Option<Shape>,
    pub rejected: bool,
    pub declarations: usize,
}

/// Everything a run has found so far. Phases fill it in order; the symbol
/// table is only ever read.
pub struct GenerationContext<'a> {
    pub symbols: &'a dyn SymbolQuery,
    pub options: GeneratorOptions,
    /// Populated by the discover phase.
    pub candidates: Vec<Candidate>,
    /// Populated by the synthesize phase.
    pub units: Vec<GeneratedUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(symbols: &'a dyn SymbolQuery, options: GeneratorOptions) -> Self {
        Self {
            symbols,
            options,
            candidates: Vec::new(),
            units: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Diagnostics of one severity, in the order they were added.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.with_severity(Severity::Warning).count()
    }

    /// Per-member summaries, in discovery order.
    pub fn reports(&self) -> Vec<MemberReport> {
        self.candidates
            .iter()
            .flat_map(|c| c.members.iter())
            .map(|m| MemberReport {
                member: m.descriptor.qualified_name.clone(),
                location: m.descriptor.location.clone(),
                shape: m.shape,
                rejected: m.rejected,
                declarations: m.declarations,
            })
            .collect()
    }
}

impl std::fmt::Debug for GenerationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationContext")
            .field("options", &self.options)
            .field("candidates", &self.candidates)
            .field("units", &self.units)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use asynclift_symbols::SymbolTable;

    use super::*;

    #[test]
    fn test_fresh_context_is_empty() {
        let table = SymbolTable::new("App");
        let ctx = GenerationContext::new(&table, GeneratorOptions::default());

        assert!(ctx.candidates.is_empty());
        assert!(ctx.units.is_empty());
        assert!(ctx.reports().is_empty());
    }

    #[test]
    fn test_counts_by_severity() {
        let table = SymbolTable::new("App");
        let mut ctx = GenerationContext::new(&table, GeneratorOptions::default());
        assert!(!ctx.has_errors());

        ctx.add_diagnostic(Diagnostic::info("discover", "zero"));
        ctx.add_diagnostic(Diagnostic::usage("first"));
        ctx.add_diagnostic(Diagnostic::warning("classify", "second"));

        assert!(ctx.has_errors());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 1);
        let infos: Vec<&str> = ctx
            .with_severity(Severity::Info)
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(infos, ["zero"]);
    }
}
