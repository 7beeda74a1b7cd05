//! Validate phase - checks every discovered member against the usage rules.

mod rule;
pub mod rules;

use asynclift_symbols::SymbolQuery;
use eyre::Result;
pub use rule::{Rule, RuleInfo};
pub use rules::{ByValueParametersRule, ByValueReturnRule, InstanceMemberRule, VisibleMemberRule};

use crate::{
    descriptor::MemberDescriptor,
    pipeline::{Diagnostic, GenerationContext, Phase},
};

/// Check one member against the default rules.
///
/// Every rule runs; the result holds one diagnostic per violation.
pub fn validate(symbols: &dyn SymbolQuery, member: &MemberDescriptor) -> Vec<Diagnostic> {
    ValidatePhase::new().check(symbols, member)
}

/// Phase that validates members using configurable rules.
///
/// Unlike a fatal check, a failing member is only marked rejected: the run
/// continues and the other members of the same type are still generated.
pub struct ValidatePhase {
    rules: Vec<Box<dyn Rule>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default rules.
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(InstanceMemberRule),
                Box::new(ByValueReturnRule),
                Box::new(VisibleMemberRule),
                Box::new(ByValueParametersRule),
            ],
        }
    }

    /// Create a validate phase with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the validation phase.
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Get the names of all rules that will be run.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Get information about all rules that will be run.
    pub fn rule_info(&self) -> Vec<RuleInfo> {
        self.rules.iter().map(|r| r.info()).collect()
    }

    /// Run every rule against one member.
    pub fn check(&self, symbols: &dyn SymbolQuery, member: &MemberDescriptor) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for rule in &self.rules {
            rule.check(symbols, member, &mut diagnostics);
        }
        diagnostics
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Reject marked methods that cannot be lifted"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let symbols = ctx.symbols;

        for candidate in ctx.candidates.iter_mut() {
            for member in candidate.members.iter_mut() {
                let found = self.check(symbols, &member.descriptor);
                if found.is_empty() {
                    continue;
                }

                member.rejected = found.iter().any(|d| d.severity.is_error());
                tracing::debug!(
                    member = %member.descriptor.qualified_name,
                    violations = found.len(),
                    rejected = member.rejected,
                    "member validated with diagnostics"
                );
                ctx.diagnostics.extend(found);
            }
        }

        Ok(())
    }
}
