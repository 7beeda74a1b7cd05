//! Generation configuration.
//!
//! Resolution happens in two steps: the raw adapters in [`marker`] pull
//! positional values out of the marker attributes, then
//! [`GenerationConfig::resolve`] and [`MemberOverrides::resolve`] merge them
//! with the [`GeneratorOptions`] defaults.

mod marker;
mod options;

use asynclift_symbols::{AttributeData, SymbolQuery, TypeHandle, TypeRef};
pub use marker::{MemberMarkerArgs, TypeMarkerArgs};
pub use options::GeneratorOptions;

/// Type-level configuration, resolved once per candidate type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Namespace the unit is written into.
    pub namespace: String,
    /// Receiver container definitions, by qualified name without arguments.
    /// Never empty.
    pub receivers: Vec<String>,
    /// Name of the generated static class and of the unit.
    pub unit_name: String,
}

impl GenerationConfig {
    /// Resolve the configuration of `owner` from its type marker, if any.
    pub fn resolve(
        symbols: &dyn SymbolQuery,
        options: &GeneratorOptions,
        owner: TypeHandle,
        marker: Option<&AttributeData>,
    ) -> Self {
        let args = marker
            .map(|m| TypeMarkerArgs::from_values(&m.args))
            .unwrap_or_default();
        let def = symbols.type_def(owner);

        let namespace = if def.namespace.is_empty() {
            options.default_namespace.clone()
        } else {
            def.namespace.clone()
        };

        let mut receivers: Vec<String> = args
            .receivers
            .iter()
            .map(|r| receiver_name(symbols, r))
            .collect();
        if receivers.is_empty() {
            receivers.push(options.default_receiver.clone());
        }

        let unit_name = args
            .unit_name
            .unwrap_or_else(|| format!("{}{}", def.name, options.unit_suffix));

        Self {
            namespace,
            receivers,
            unit_name,
        }
    }
}

/// Member-level overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberOverrides {
    /// Replaces the member identifier in the generated declaration.
    pub name: Option<String>,
    /// Copy non-marker attributes onto the generated declaration.
    pub include_attributes: bool,
}

impl MemberOverrides {
    pub fn resolve(marker: &AttributeData) -> Self {
        let args = MemberMarkerArgs::from_values(&marker.args);
        Self {
            name: args.name,
            include_attributes: args.include_attributes,
        }
    }
}

/// Resolve both configuration levels for one marked member.
pub fn resolve(
    symbols: &dyn SymbolQuery,
    options: &GeneratorOptions,
    owner: TypeHandle,
    type_marker: Option<&AttributeData>,
    member_marker: &AttributeData,
) -> (GenerationConfig, MemberOverrides) {
    (
        GenerationConfig::resolve(symbols, options, owner, type_marker),
        MemberOverrides::resolve(member_marker),
    )
}

fn receiver_name(symbols: &dyn SymbolQuery, receiver: &TypeRef) -> String {
    match receiver.as_named() {
        Some(named) => symbols.qualified_name(named.definition),
        None => symbols.display(receiver),
    }
}
