//! Capability predicates over return types.
//!
//! Each predicate inspects one return type and, on success, hands back the
//! symbols that made it match so callers can report or reuse them.

use asynclift_symbols::{SymbolQuery, TypeHandle, TypeRef};

use super::well_known::{
    ASYNC_ENUMERABLE_OF_T, ASYNC_METHOD_BUILDER, ENUMERABLE_OF_T, TASK, TASK_OF_T, VALUE_TASK,
    VALUE_TASK_OF_T, WellKnownTypes,
};

/// Evidence that a return type is a deferred container.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredMatch {
    /// The matched definition.
    pub definition: TypeHandle,
    /// The builder named by `[AsyncMethodBuilder(typeof(B))]` for custom
    /// containers; `None` for the built-in ones.
    pub builder: Option<TypeRef>,
}

/// Evidence that a return type is a (synchronous or asynchronous) sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceMatch {
    /// The matched sequence interface definition.
    pub definition: TypeHandle,
    /// The item type argument.
    pub item: TypeRef,
}

/// Matches `Task`, `ValueTask`, `Task<T>` and `ValueTask<T>` by identity.
pub fn match_builtin_deferred(symbols: &dyn SymbolQuery, ty: &TypeRef) -> Option<DeferredMatch> {
    let named = ty.as_named()?;
    let candidates: &[&str] = match symbols.type_def(named.definition).arity() {
        0 => &[TASK, VALUE_TASK],
        1 => &[TASK_OF_T, VALUE_TASK_OF_T],
        _ => return None,
    };

    let known = WellKnownTypes::new(symbols);
    candidates
        .iter()
        .filter_map(|name| known.resolve(name))
        .find(|handle| *handle == named.definition)
        .map(|definition| DeferredMatch {
            definition,
            builder: None,
        })
}

/// Matches task-like types declared with an async method builder.
///
/// The builder type is returned as written; it is not checked for the
/// members a real builder needs.
pub fn match_custom_deferred(symbols: &dyn SymbolQuery, ty: &TypeRef) -> Option<DeferredMatch> {
    if ty.is_void() {
        return None;
    }
    let named = ty.as_named()?;
    let def = symbols.type_def(named.definition);
    if def.arity() >= 2 {
        return None;
    }

    def.attributes
        .iter()
        .filter(|attribute| attribute.is(ASYNC_METHOD_BUILDER) && attribute.args.len() == 1)
        .find_map(|attribute| attribute.args[0].as_type().cloned())
        .map(|builder| DeferredMatch {
            definition: named.definition,
            builder: Some(builder),
        })
}

/// Matches `IAsyncEnumerable<T>` from any module.
pub fn match_async_sequence(symbols: &dyn SymbolQuery, ty: &TypeRef) -> Option<SequenceMatch> {
    match_sequence_interface(symbols, ty, ASYNC_ENUMERABLE_OF_T)
}

/// Matches `IEnumerable<T>` from any module.
pub fn match_sequence(symbols: &dyn SymbolQuery, ty: &TypeRef) -> Option<SequenceMatch> {
    match_sequence_interface(symbols, ty, ENUMERABLE_OF_T)
}

fn match_sequence_interface(
    symbols: &dyn SymbolQuery,
    ty: &TypeRef,
    metadata_name: &str,
) -> Option<SequenceMatch> {
    let named = ty.as_named()?;
    if symbols.type_def(named.definition).arity() != 1 {
        return None;
    }

    let found = WellKnownTypes::new(symbols).find_in_all_modules(metadata_name);
    if !found.contains(&named.definition) {
        return None;
    }

    Some(SequenceMatch {
        definition: named.definition,
        item: named.own_args(1).first()?.clone(),
    })
}
