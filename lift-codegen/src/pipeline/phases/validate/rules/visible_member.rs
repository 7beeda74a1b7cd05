//! Rule rejecting members the generated extensions cannot reach.

use asynclift_symbols::{Accessibility, SymbolQuery, TypeHandle};

use super::{super::Rule, usage};
use crate::{descriptor::MemberDescriptor, pipeline::Diagnostic};

/// Rule that requires at least internal accessibility for the member and
/// every enclosing type.
///
/// For an explicit interface implementation the implementing method is
/// always private; the interface member and the interface's own containment
/// chain are checked instead.
pub struct VisibleMemberRule;

impl Rule for VisibleMemberRule {
    fn name(&self) -> &'static str {
        "visible-member"
    }

    fn description(&self) -> &'static str {
        "Lifted methods and their containing types must be at least internal"
    }

    fn check(
        &self,
        symbols: &dyn SymbolQuery,
        member: &MemberDescriptor,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let (accessibility, scope) = match &member.explicit_contract {
            Some(contract) => (contract.member_accessibility, contract.contract.definition),
            None => (member.accessibility, member.owner),
        };

        if !is_visible(symbols, accessibility, scope) {
            diagnostics.push(usage(
                member,
                format!(
                    "method '{}' is not visible outside its containing type; it and every enclosing type must be at least internal",
                    member.qualified_name
                ),
            ));
        }
    }
}

fn is_visible(symbols: &dyn SymbolQuery, accessibility: Accessibility, scope: TypeHandle) -> bool {
    accessibility.is_at_least_internal()
        && symbols
            .containing_chain(scope)
            .iter()
            .all(|h| symbols.type_def(*h).accessibility.is_at_least_internal())
}

#[cfg(test)]
mod tests {
    use asynclift_symbols::{MethodDef, NamedType, TypeDef};

    use super::*;
    use crate::pipeline::phases::validate::rules::fixture::{Fixture, marked};

    fn check(f: &Fixture, owner: TypeHandle) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        VisibleMemberRule.check(&f.table, &f.describe(owner), &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_internal_member_passes() {
        let mut f = Fixture::new();
        let task = f.core.task_ref();
        let owner = f.add(TypeDef::class("Demo", "Person").method(marked(
            MethodDef::new("Save", task).accessibility(Accessibility::Internal),
        )));

        assert!(check(&f, owner).is_empty());
    }

    #[test]
    fn test_private_member_fails() {
        let mut f = Fixture::new();
        let task = f.core.task_ref();
        let owner = f.add(
            TypeDef::class("Demo", "Person")
                .public()
                .method(marked(MethodDef::new("Save", task))),
        );

        assert_eq!(check(&f, owner).len(), 1);
    }

    #[test]
    fn test_private_enclosing_type_fails() {
        let mut f = Fixture::new();
        let task = f.core.task_ref();
        let outer = f.add(TypeDef::class("Demo", "Outer").public());
        let inner = f.add(
            TypeDef::class("Demo", "Inner")
                .accessibility(Accessibility::Private)
                .nested_in(outer)
                .method(marked(MethodDef::new("Save", task).public())),
        );

        let diagnostics = check(&f, inner);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("Demo.Outer.Inner.Save"));
    }

    #[test]
    fn test_explicit_implementation_uses_contract() {
        let mut f = Fixture::new();
        let task = f.core.task_ref();
        let contract = f.add(TypeDef::interface("Demo", "ISaver").public());
        let owner = f.add(
            TypeDef::class("Demo", "Person").public().method(marked(
                MethodDef::new("Demo.ISaver.Save", task)
                    .identifier("Save")
                    .implements(NamedType::new(contract, Vec::new()), Accessibility::Public),
            )),
        );

        assert!(check(&f, owner).is_empty());
    }

    #[test]
    fn test_explicit_implementation_of_hidden_contract_fails() {
        let mut f = Fixture::new();
        let task = f.core.task_ref();
        let outer = f.add(TypeDef::class("Demo", "Host").public());
        let contract = f.add(
            TypeDef::interface("Demo", "ISaver")
                .accessibility(Accessibility::Private)
                .nested_in(outer),
        );
        let owner = f.add(
            TypeDef::class("Demo", "Person").public().method(marked(
                MethodDef::new("Demo.Host.ISaver.Save", task)
                    .identifier("Save")
                    .implements(NamedType::new(contract, Vec::new()), Accessibility::Public),
            )),
        );

        assert_eq!(check(&f, owner).len(), 1);
    }
}
