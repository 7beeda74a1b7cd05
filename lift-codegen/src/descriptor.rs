//! Member descriptors: everything later phases need to know about one marked
//! method, extracted from the symbol table once.

use asynclift_symbols::{
    Accessibility, AttributeData, ConstantValue, ExplicitImplementation, Location, MethodDef,
    ParameterDef, PrimaryConstraint, RefKind, SymbolQuery, TypeHandle, TypeKind, TypeParameterDef,
    TypeRef,
};
use indexmap::IndexMap;

/// A marked method, ready for validation and synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDescriptor {
    /// The type declaring the method.
    pub owner: TypeHandle,
    /// The owning type applied to its own type parameters, e.g.
    /// `Demo.Nested<X>.Name<U>`.
    pub owner_display: String,
    /// `Namespace.Type.Method`, for messages.
    pub qualified_name: String,
    pub name: String,
    /// Source identifier token, used for the forwarded call.
    pub identifier: String,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub returns_by_ref: bool,
    pub explicit_contract: Option<ExplicitImplementation>,
    pub parameters: Vec<ParameterDescriptor>,
    /// Own type parameters first, then those of each enclosing type from the
    /// innermost outward. Names are unique.
    pub type_parameters: Vec<TypeParameterDescriptor>,
    pub return_type: TypeRef,
    pub marker: AttributeData,
    /// Rendered non-marker attributes, without brackets.
    pub attributes: Vec<String>,
    /// Rendered return attributes, without brackets or target.
    pub return_attributes: Vec<String>,
    pub location: Option<Location>,
}

/// A parameter of a marked method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Rendered attributes, without brackets.
    pub attributes: Vec<String>,
    pub is_params: bool,
    pub ref_kind: RefKind,
    /// Rendered type.
    pub ty: String,
    pub identifier: String,
    /// Rendered default value.
    pub default: Option<String>,
}

/// A type parameter available to a marked method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameterDescriptor {
    pub name: String,
    /// Declared on the method itself rather than an enclosing type.
    pub on_member: bool,
    pub primary: Option<PrimaryConstraint>,
    /// Rendered constraint types, in declaration order.
    pub constraint_types: Vec<String>,
    pub constructor_constraint: bool,
}

impl TypeParameterDescriptor {
    /// Constraint clause items: primary, then secondary, then `new()`.
    pub fn constraints(&self) -> Vec<String> {
        let mut items = Vec::new();
        if let Some(primary) = self.primary {
            items.push(primary.keyword().to_string());
        }
        items.extend(self.constraint_types.iter().cloned());
        if self.constructor_constraint {
            items.push("new()".to_string());
        }
        items
    }
}

impl MemberDescriptor {
    /// Describe `method` of `owner`, or `None` if it does not carry the
    /// marker.
    pub fn build(
        symbols: &dyn SymbolQuery,
        owner: TypeHandle,
        method: &MethodDef,
        marker_class: &str,
    ) -> Option<Self> {
        let marker = method.find_attribute(marker_class)?.clone();
        let type_parameters = collect_type_parameters(symbols, owner, method);

        let parameters = method
            .parameters
            .iter()
            .map(|p| describe_parameter(symbols, p, &type_parameters))
            .collect();

        Some(Self {
            owner,
            owner_display: symbols.display_definition(owner),
            qualified_name: format!("{}.{}", symbols.qualified_name(owner), method.name),
            name: method.name.clone(),
            identifier: method.identifier.clone(),
            accessibility: method.accessibility,
            is_static: method.is_static,
            returns_by_ref: method.returns_by_ref,
            explicit_contract: method.explicit_implementation.clone(),
            parameters,
            type_parameters,
            return_type: method.return_type.clone(),
            attributes: method
                .attributes
                .iter()
                .filter(|a| !a.is(marker_class))
                .map(|a| symbols.display_attribute(a))
                .collect(),
            return_attributes: method
                .return_attributes
                .iter()
                .map(|a| symbols.display_attribute(a))
                .collect(),
            location: marker.location.clone().or_else(|| method.location.clone()),
            marker,
        })
    }

    /// Type parameters declared on the method itself.
    pub fn own_type_parameters(&self) -> impl Iterator<Item = &TypeParameterDescriptor> {
        self.type_parameters.iter().filter(|p| p.on_member)
    }
}

fn collect_type_parameters(
    symbols: &dyn SymbolQuery,
    owner: TypeHandle,
    method: &MethodDef,
) -> Vec<TypeParameterDescriptor> {
    let own = method.type_parameters.iter().map(|p| (p, true));
    let inherited = symbols
        .containing_chain(owner)
        .into_iter()
        .flat_map(move |h| symbols.type_def(h).type_parameters.iter())
        .map(|p| (p, false));

    let mut scopes: IndexMap<&str, TypeParameterDescriptor> = IndexMap::new();
    for (param, on_member) in own.chain(inherited) {
        scopes
            .entry(param.name.as_str())
            .or_insert_with(|| describe_type_parameter(symbols, param, on_member));
    }
    scopes.into_values().collect()
}

fn describe_type_parameter(
    symbols: &dyn SymbolQuery,
    param: &TypeParameterDef,
    on_member: bool,
) -> TypeParameterDescriptor {
    TypeParameterDescriptor {
        name: param.name.clone(),
        on_member,
        primary: param.primary,
        constraint_types: param
            .constraint_types
            .iter()
            .map(|t| symbols.display(t))
            .collect(),
        constructor_constraint: param.constructor_constraint,
    }
}

fn describe_parameter(
    symbols: &dyn SymbolQuery,
    param: &ParameterDef,
    type_parameters: &[TypeParameterDescriptor],
) -> ParameterDescriptor {
    ParameterDescriptor {
        attributes: param
            .attributes
            .iter()
            .map(|a| symbols.display_attribute(a))
            .collect(),
        is_params: param.is_params,
        ref_kind: param.ref_kind,
        ty: symbols.display(&param.ty),
        identifier: param.name.clone(),
        default: param
            .default
            .as_ref()
            .map(|value| render_default(symbols, &param.ty, value, type_parameters)),
    }
}

/// Render an explicit default value for a parameter of type `ty`.
fn render_default(
    symbols: &dyn SymbolQuery,
    ty: &TypeRef,
    value: &ConstantValue,
    type_parameters: &[TypeParameterDescriptor],
) -> String {
    if value.is_null() && null_is_default(symbols, ty, type_parameters) {
        return "default".to_string();
    }

    let is_enum = ty
        .as_named()
        .is_some_and(|named| symbols.type_def(named.definition).kind == TypeKind::Enum);
    if let (true, Some(integer)) = (is_enum, value.as_integer()) {
        let enum_type = symbols.display(ty);
        return if integer < 0 {
            format!("({})({})", enum_type, integer)
        } else {
            format!("({}){}", enum_type, integer)
        };
    }

    value.to_literal()
}

/// Whether a `null` default has to be spelled `default` for this type.
fn null_is_default(
    symbols: &dyn SymbolQuery,
    ty: &TypeRef,
    type_parameters: &[TypeParameterDescriptor],
) -> bool {
    match ty {
        TypeRef::Named(named) => {
            symbols.type_def(named.definition).kind.is_value_type()
                && symbols.metadata_name(named.definition) != "System.Nullable`1"
        }
        TypeRef::Parameter(name) => type_parameters
            .iter()
            .find(|p| &p.name == name)
            .is_none_or(|p| {
                !matches!(
                    p.primary,
                    Some(PrimaryConstraint::ReferenceType | PrimaryConstraint::NullableReferenceType)
                )
            }),
        TypeRef::Annotated(inner) => {
            matches!(inner.as_ref(), TypeRef::Parameter(_))
                && null_is_default(symbols, inner, type_parameters)
        }
        _ => false,
    }
}
