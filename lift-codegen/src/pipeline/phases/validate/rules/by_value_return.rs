//! Rule rejecting by-reference returns.

use asynclift_symbols::SymbolQuery;

use super::{super::Rule, usage};
use crate::{descriptor::MemberDescriptor, pipeline::Diagnostic};

/// Rule that forbids `ref` and `ref readonly` returns, which cannot cross an
/// `await`.
pub struct ByValueReturnRule;

impl Rule for ByValueReturnRule {
    fn name(&self) -> &'static str {
        "by-value-return"
    }

    fn description(&self) -> &'static str {
        "Lifted methods must return by value"
    }

    fn check(
        &self,
        _symbols: &dyn SymbolQuery,
        member: &MemberDescriptor,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if member.returns_by_ref {
            diagnostics.push(usage(
                member,
                format!(
                    "method '{}' returns by reference; lifted methods must return by value",
                    member.qualified_name
                ),
            ));
        }
    }
}
