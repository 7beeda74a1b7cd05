//! Turns a validated, classified member into an [`ExtensionMethod`].

use asynclift_symbols::{Accessibility, SymbolQuery, TypeRef};

use super::{ExtensionMethod, ParamSpec, Statement, TypeParamSpec};
use crate::{
    config::MemberOverrides,
    descriptor::MemberDescriptor,
    shape::{Shape, match_async_sequence, match_sequence},
};

const TASK: &str = "System.Threading.Tasks.Task";
const ASYNC_ENUMERABLE: &str = "System.Collections.Generic.IAsyncEnumerable";

const RECEIVER_NAME: &str = "receiver";
const LOCAL_NAME: &str = "instance";
const ITEM_NAME: &str = "item";

/// Build the declaration lifting `member` onto `receiver`.
///
/// `receiver` is the qualified name of the container definition; it is
/// applied to the owning type.
pub fn synthesize(
    symbols: &dyn SymbolQuery,
    member: &MemberDescriptor,
    shape: Shape,
    overrides: &MemberOverrides,
    receiver: &str,
) -> ExtensionMethod {
    let mut taken: Vec<String> = member
        .parameters
        .iter()
        .map(|p| p.identifier.trim_start_matches('@').to_string())
        .collect();
    let receiver_name = claim_name(RECEIVER_NAME, &mut taken);
    let local = claim_name(LOCAL_NAME, &mut taken);

    let mut parameters = vec![ParamSpec {
        attributes: Vec::new(),
        modifier: Some("this"),
        ty: format!("{}<{}>", receiver, member.owner_display),
        name: receiver_name.clone(),
        default: None,
    }];
    parameters.extend(member.parameters.iter().map(|p| ParamSpec {
        attributes: if overrides.include_attributes {
            p.attributes.clone()
        } else {
            Vec::new()
        },
        modifier: p.is_params.then_some("params"),
        ty: p.ty.clone(),
        name: p.identifier.clone(),
        default: p.default.clone(),
    }));

    let mut body = vec![Statement::AwaitReceiver {
        local: local.clone(),
        cast: member
            .explicit_contract
            .as_ref()
            .map(|c| symbols.display_named(&c.contract)),
        receiver: receiver_name,
    }];
    let call = forwarded_call(member, &local);
    body.push(match shape {
        Shape::AsyncSequence | Shape::Sequence => Statement::Relay {
            is_async: shape == Shape::AsyncSequence,
            item: claim_name(ITEM_NAME, &mut taken),
            source: call,
        },
        // Task, ValueTask and non-generic builder types carry no result.
        Shape::Deferred if !has_type_arguments(&member.return_type) => Statement::Await(call),
        Shape::Deferred => Statement::ReturnAwait(call),
        Shape::PlainValue if member.return_type.is_void() => Statement::Expression(call),
        Shape::PlainValue => Statement::Return(call),
    });

    let (attributes, return_attributes) = if overrides.include_attributes {
        (member.attributes.clone(), member.return_attributes.clone())
    } else {
        (Vec::new(), Vec::new())
    };

    ExtensionMethod {
        attributes,
        return_attributes,
        modifiers: modifiers(symbols, member),
        return_type: return_type(symbols, member, shape),
        name: overrides
            .name
            .clone()
            .unwrap_or_else(|| member.identifier.clone()),
        type_parameters: member
            .type_parameters
            .iter()
            .map(|t| TypeParamSpec {
                name: t.name.clone(),
                constraints: t.constraints(),
            })
            .collect(),
        parameters,
        body,
    }
}

fn has_type_arguments(ty: &TypeRef) -> bool {
    matches!(ty, TypeRef::Named(named) if !named.args.is_empty())
}

/// C# modifier keywords for a declared accessibility.
pub fn accessibility_keyword(accessibility: Accessibility) -> Option<&'static str> {
    match accessibility {
        Accessibility::Public => Some("public"),
        Accessibility::Internal | Accessibility::ProtectedOrInternal => Some("internal"),
        Accessibility::Protected => Some("protected"),
        Accessibility::ProtectedAndInternal => Some("private protected"),
        Accessibility::Private => Some("private"),
        Accessibility::NotApplicable => None,
    }
}

fn modifiers(symbols: &dyn SymbolQuery, member: &MemberDescriptor) -> Vec<&'static str> {
    let accessibility = match &member.explicit_contract {
        Some(contract) => symbols.type_def(contract.contract.definition).accessibility,
        None => member.accessibility,
    };

    let mut modifiers: Vec<&'static str> =
        accessibility_keyword(accessibility).into_iter().collect();
    modifiers.push("static");
    modifiers.push("async");
    modifiers
}

fn return_type(symbols: &dyn SymbolQuery, member: &MemberDescriptor, shape: Shape) -> String {
    let original = &member.return_type;
    match shape {
        Shape::Deferred | Shape::AsyncSequence => symbols.display(original),
        Shape::Sequence => {
            let item = match_sequence(symbols, original)
                .or_else(|| match_async_sequence(symbols, original))
                .map(|m| symbols.display(&m.item))
                .unwrap_or_else(|| "object".to_string());
            format!("{}<{}>", ASYNC_ENUMERABLE, item)
        }
        Shape::PlainValue if original.is_void() => TASK.to_string(),
        Shape::PlainValue => format!("{}<{}>", TASK, symbols.display(original)),
    }
}

/// `local.Identifier<OwnTypeParams>(args)`
fn forwarded_call(member: &MemberDescriptor, local: &str) -> String {
    let type_args: Vec<&str> = member
        .own_type_parameters()
        .map(|t| t.name.as_str())
        .collect();
    let type_args = if type_args.is_empty() {
        String::new()
    } else {
        format!("<{}>", type_args.join(", "))
    };
    let args: Vec<&str> = member
        .parameters
        .iter()
        .map(|p| p.identifier.as_str())
        .collect();

    format!(
        "{}.{}{}({})",
        local,
        member.identifier,
        type_args,
        args.join(", ")
    )
}

/// Pick `base`, or `base` with the smallest numeric suffix, that is not yet
/// taken, and reserve it.
fn claim_name(base: &str, taken: &mut Vec<String>) -> String {
    let name = if !taken.iter().any(|t| t == base) {
        base.to_string()
    } else {
        (1..)
            .map(|i| format!("{}{}", base, i))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    };
    taken.push(name.clone());
    name
}
