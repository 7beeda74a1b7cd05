//! Rule rejecting static members.

use asynclift_symbols::SymbolQuery;

use super::{super::Rule, usage};
use crate::{descriptor::MemberDescriptor, pipeline::Diagnostic};

/// Rule that requires an instance method: the generated code calls the
/// member on the awaited receiver.
pub struct InstanceMemberRule;

impl Rule for InstanceMemberRule {
    fn name(&self) -> &'static str {
        "instance-member"
    }

    fn description(&self) -> &'static str {
        "Only instance methods can be lifted"
    }

    fn check(
        &self,
        _symbols: &dyn SymbolQuery,
        member: &MemberDescriptor,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if member.is_static {
            diagnostics.push(usage(
                member,
                format!(
                    "method '{}' is static; only instance methods can be lifted",
                    member.qualified_name
                ),
            ));
        }
    }
}
