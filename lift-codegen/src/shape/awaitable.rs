//! The awaiting contract.
//!
//! A type can be awaited when it exposes a parameterless `GetAwaiter`
//! (declared on it or on a base type, or as a visible extension method)
//! whose result has a readable `bool IsCompleted`, a
//! `void OnCompleted(<delegate>)` and a parameterless `GetResult`.
//!
//! The check is descriptive: classification never depends on it.

use asynclift_symbols::{
    MethodDef, NamedType, SymbolQuery, TypeDef, TypeHandle, TypeKind, TypeParameterDef, TypeRef,
};

use super::well_known::{BOOLEAN, WellKnownTypes};

/// Where the matched `GetAwaiter` was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwaiterSource {
    /// Declared on the type or one of its bases.
    Declared(TypeHandle),
    /// A visible extension method.
    Extension,
}

/// Evidence that a type satisfies the awaiting contract.
#[derive(Debug, Clone, PartialEq)]
pub struct AwaitMatch {
    pub source: AwaiterSource,
    /// Return type of `GetAwaiter`.
    pub awaiter: TypeRef,
    /// Return type of `GetResult`, i.e. the value of the `await` expression.
    pub result: TypeRef,
}

/// Check the awaiting contract for a type.
pub fn match_awaitable(symbols: &dyn SymbolQuery, ty: &TypeRef) -> Option<AwaitMatch> {
    if matches!(ty, TypeRef::Dynamic) {
        return None;
    }
    let named = ty.as_named()?;

    for (owner, binding) in base_chain(symbols, named) {
        let def = symbols.type_def(owner);
        let declared = def
            .methods
            .iter()
            .filter(|m| is_get_awaiter(m) && !m.is_static && m.parameters.is_empty());
        for method in declared {
            let awaiter = bind(&method.return_type, def, &binding.args);
            if let Some(result) = verify_awaiter(symbols, &awaiter) {
                return Some(AwaitMatch {
                    source: AwaiterSource::Declared(owner),
                    awaiter,
                    result,
                });
            }
        }
    }

    let chain: Vec<TypeHandle> = base_chain(symbols, named).into_iter().map(|(h, _)| h).collect();
    symbols
        .extension_methods("GetAwaiter")
        .into_iter()
        .filter(|m| m.parameters.len() == 1)
        .filter(|m| {
            m.parameters[0]
                .ty
                .as_named()
                .is_some_and(|receiver| chain.contains(&receiver.definition))
        })
        .find_map(|method| {
            verify_awaiter(symbols, &method.return_type).map(|result| AwaitMatch {
                source: AwaiterSource::Extension,
                awaiter: method.return_type.clone(),
                result,
            })
        })
}

fn is_get_awaiter(method: &MethodDef) -> bool {
    method.name == "GetAwaiter"
}

/// Returns the `GetResult` type when the awaiter shape is complete.
fn verify_awaiter(symbols: &dyn SymbolQuery, awaiter: &TypeRef) -> Option<TypeRef> {
    let named = awaiter.as_named()?;
    let def = symbols.type_def(named.definition);
    let boolean = WellKnownTypes::new(symbols).resolve(BOOLEAN);

    let is_completed = def.properties.iter().any(|p| {
        p.name == "IsCompleted"
            && p.has_getter
            && !p.is_static
            && boolean.is_some()
            && p.ty.as_named().map(|n| n.definition) == boolean
    });
    if !is_completed {
        tracing::trace!(awaiter = %symbols.display(awaiter), "missing IsCompleted");
        return None;
    }

    let on_completed = def.methods.iter().any(|m| {
        m.name == "OnCompleted"
            && m.return_type.is_void()
            && m.parameters.len() == 1
            && m.parameters[0]
                .ty
                .as_named()
                .is_some_and(|p| symbols.type_def(p.definition).kind == TypeKind::Delegate)
    });
    if !on_completed {
        tracing::trace!(awaiter = %symbols.display(awaiter), "missing OnCompleted");
        return None;
    }

    def.methods
        .iter()
        .find(|m| m.name == "GetResult" && m.parameters.is_empty())
        .map(|m| bind(&m.return_type, def, &named.args))
}

/// The type followed by its base types, each with the arguments it is
/// constructed with.
fn base_chain(symbols: &dyn SymbolQuery, named: &NamedType) -> Vec<(TypeHandle, NamedType)> {
    let mut chain = vec![(named.definition, named.clone())];
    let mut current = named.clone();
    while let Some(base) = &symbols.type_def(current.definition).base {
        if chain.iter().any(|(h, _)| *h == base.definition) {
            break;
        }
        let def = symbols.type_def(current.definition);
        let bound = NamedType::new(
            base.definition,
            base.args
                .iter()
                .map(|arg| bind(arg, def, &current.args))
                .collect(),
        );
        chain.push((bound.definition, bound.clone()));
        current = bound;
    }
    chain
}

/// Substitute the own type parameters of `def` with `args`.
fn bind(ty: &TypeRef, def: &TypeDef, args: &[TypeRef]) -> TypeRef {
    let params: &[TypeParameterDef] = &def.type_parameters;
    let own = if args.len() >= params.len() {
        &args[args.len() - params.len()..]
    } else {
        return ty.clone();
    };

    match ty {
        TypeRef::Parameter(name) => params
            .iter()
            .position(|p| &p.name == name)
            .map(|i| own[i].clone())
            .unwrap_or_else(|| ty.clone()),
        TypeRef::Named(named) => TypeRef::Named(NamedType::new(
            named.definition,
            named.args.iter().map(|a| bind(a, def, args)).collect(),
        )),
        TypeRef::Array(element) => TypeRef::array(bind(element, def, args)),
        TypeRef::Annotated(inner) => TypeRef::annotated(bind(inner, def, args)),
        TypeRef::Void | TypeRef::Dynamic => ty.clone(),
    }
}
