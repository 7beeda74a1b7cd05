//! Rule rejecting by-reference parameters.

use asynclift_symbols::SymbolQuery;

use super::{super::Rule, usage};
use crate::{descriptor::MemberDescriptor, pipeline::Diagnostic};

/// Rule that forbids `in`, `out`, `ref` and `ref readonly` parameters; async
/// methods cannot declare them.
pub struct ByValueParametersRule;

impl Rule for ByValueParametersRule {
    fn name(&self) -> &'static str {
        "by-value-parameters"
    }

    fn description(&self) -> &'static str {
        "Lifted methods cannot take in, out or ref parameters"
    }

    fn check(
        &self,
        _symbols: &dyn SymbolQuery,
        member: &MemberDescriptor,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let offending: Vec<&str> = member
            .parameters
            .iter()
            .filter(|p| p.ref_kind.is_by_reference())
            .map(|p| p.identifier.as_str())
            .collect();

        if !offending.is_empty() {
            diagnostics.push(usage(
                member,
                format!(
                    "method '{}' has by-reference parameters ({}); lifted methods must take parameters by value",
                    member.qualified_name,
                    offending.join(", ")
                ),
            ));
        }
    }
}
