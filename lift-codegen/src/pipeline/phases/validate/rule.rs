//! Rule trait for member validation.

use asynclift_symbols::SymbolQuery;

use crate::{descriptor::MemberDescriptor, pipeline::Diagnostic};

/// Information about a validation rule.
#[derive(Debug, Clone)]
pub struct RuleInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A rule a marked method must satisfy to be lifted.
pub trait Rule: Send + Sync {
    /// The name of this rule.
    fn name(&self) -> &'static str;

    /// A human-readable description of what this rule checks.
    fn description(&self) -> &'static str;

    /// Check one member and add any diagnostics.
    fn check(
        &self,
        symbols: &dyn SymbolQuery,
        member: &MemberDescriptor,
        diagnostics: &mut Vec<Diagnostic>,
    );

    /// Get information about this rule.
    fn info(&self) -> RuleInfo {
        RuleInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
