//! Raw marker arguments.
//!
//! Marker attributes come in overloads that only ever add trailing optional
//! parameters, so the richest overload's first optional value is always the
//! last positional argument. Reading from the end keeps every overload
//! working without knowing which one was applied.

use asynclift_symbols::{TypeRef, TypedConstant};

/// Arguments of the type marker:
/// `(params Type[] receivers)` or `(string unitName, params Type[] receivers)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMarkerArgs {
    pub unit_name: Option<String>,
    pub receivers: Vec<TypeRef>,
}

impl TypeMarkerArgs {
    pub fn from_values(values: &[TypedConstant]) -> Self {
        let receivers = from_end(values, 0)
            .and_then(TypedConstant::as_array)
            .map(|items| items.iter().filter_map(|i| i.as_type().cloned()).collect())
            .unwrap_or_default();
        let unit_name = from_end(values, 1).and_then(supplied_text);

        Self {
            unit_name,
            receivers,
        }
    }
}

/// Arguments of the method marker:
/// `(bool includeAttributes = false)` or
/// `(string name, bool includeAttributes = false)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberMarkerArgs {
    pub name: Option<String>,
    pub include_attributes: bool,
}

impl MemberMarkerArgs {
    pub fn from_values(values: &[TypedConstant]) -> Self {
        Self {
            name: from_end(values, 1).and_then(supplied_text),
            include_attributes: from_end(values, 0)
                .and_then(TypedConstant::as_bool)
                .unwrap_or(false),
        }
    }
}

fn from_end(values: &[TypedConstant], offset: usize) -> Option<&TypedConstant> {
    values.len().checked_sub(offset + 1).map(|i| &values[i])
}

/// Trimmed text, or `None` when missing or blank.
fn supplied_text(value: &TypedConstant) -> Option<String> {
    let text = value.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}
