//! Type definitions and their members.

use serde::{Deserialize, Serialize};

use crate::{
    Accessibility, ConstantValue, ModuleId, NamedType, TypeHandle, TypeKind, TypeRef,
    TypedConstant,
};

/// Where a symbol or attribute application appears in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// An attribute applied to a type, method, return value or parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeData {
    /// Fully qualified metadata name of the attribute class.
    pub class: String,
    /// Positional constructor arguments, in declaration order.
    pub args: Vec<TypedConstant>,
    /// Named property/field arguments.
    pub named: Vec<(String, TypedConstant)>,
    /// The application site.
    pub location: Option<Location>,
}

impl AttributeData {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            args: Vec::new(),
            named: Vec::new(),
            location: None,
        }
    }

    /// Add a positional argument.
    pub fn arg(mut self, arg: TypedConstant) -> Self {
        self.args.push(arg);
        self
    }

    /// Add a named argument.
    pub fn named_arg(mut self, name: impl Into<String>, arg: TypedConstant) -> Self {
        self.named.push((name.into(), arg));
        self
    }

    /// Set the application site.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns true if the attribute class has the given qualified name.
    pub fn is(&self, class: &str) -> bool {
        self.class == class
    }
}

/// Primary constraint of a type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryConstraint {
    NotNull,
    ReferenceType,
    NullableReferenceType,
    Unmanaged,
    ValueType,
}

impl PrimaryConstraint {
    /// The constraint keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::NotNull => "notnull",
            Self::ReferenceType => "class",
            Self::NullableReferenceType => "class?",
            Self::Unmanaged => "unmanaged",
            Self::ValueType => "struct",
        }
    }
}

/// A type parameter declared on a type or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameterDef {
    pub name: String,
    pub primary: Option<PrimaryConstraint>,
    pub constraint_types: Vec<TypeRef>,
    pub constructor_constraint: bool,
}

impl TypeParameterDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary: None,
            constraint_types: Vec::new(),
            constructor_constraint: false,
        }
    }

    pub fn primary(mut self, constraint: PrimaryConstraint) -> Self {
        self.primary = Some(constraint);
        self
    }

    pub fn constraint(mut self, ty: TypeRef) -> Self {
        self.constraint_types.push(ty);
        self
    }

    pub fn new_constraint(mut self) -> Self {
        self.constructor_constraint = true;
        self
    }
}

/// How a parameter is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
    RefReadonly,
}

impl RefKind {
    /// Returns true for every by-reference passing mode.
    pub fn is_by_reference(&self) -> bool {
        !matches!(self, RefKind::None)
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDef {
    /// Source identifier, verbatim prefix included.
    pub name: String,
    pub ty: TypeRef,
    pub ref_kind: RefKind,
    pub is_params: bool,
    /// Explicit default value, if the parameter is optional.
    pub default: Option<ConstantValue>,
    pub attributes: Vec<AttributeData>,
}

impl ParameterDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            ref_kind: RefKind::None,
            is_params: false,
            default: None,
            attributes: Vec::new(),
        }
    }

    pub fn ref_kind(mut self, kind: RefKind) -> Self {
        self.ref_kind = kind;
        self
    }

    pub fn params(mut self) -> Self {
        self.is_params = true;
        self
    }

    pub fn default_value(mut self, value: ConstantValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// The interface member a method implements explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplicitImplementation {
    /// The implemented interface.
    pub contract: NamedType,
    /// Declared accessibility of the implemented interface member.
    pub member_accessibility: Accessibility,
}

/// A method declared on a type.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    /// Metadata name.
    pub name: String,
    /// Source identifier token (no interface qualifier, verbatim prefix kept).
    pub identifier: String,
    pub accessibility: Accessibility,
    pub is_static: bool,
    /// Declared with `this` on its first parameter.
    pub is_extension: bool,
    pub returns_by_ref: bool,
    pub explicit_implementation: Option<ExplicitImplementation>,
    pub type_parameters: Vec<TypeParameterDef>,
    pub parameters: Vec<ParameterDef>,
    pub return_type: TypeRef,
    pub attributes: Vec<AttributeData>,
    pub return_attributes: Vec<AttributeData>,
    pub location: Option<Location>,
}

impl MethodDef {
    /// Create a private instance method.
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        let name = name.into();
        Self {
            identifier: name.clone(),
            name,
            accessibility: Accessibility::Private,
            is_static: false,
            is_extension: false,
            returns_by_ref: false,
            explicit_implementation: None,
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type,
            attributes: Vec::new(),
            return_attributes: Vec::new(),
            location: None,
        }
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn public(self) -> Self {
        self.accessibility(Accessibility::Public)
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark as a static extension method.
    pub fn extension(mut self) -> Self {
        self.is_static = true;
        self.is_extension = true;
        self
    }

    pub fn by_ref_return(mut self) -> Self {
        self.returns_by_ref = true;
        self
    }

    pub fn implements(mut self, contract: NamedType, member_accessibility: Accessibility) -> Self {
        self.explicit_implementation = Some(ExplicitImplementation {
            contract,
            member_accessibility,
        });
        self
    }

    pub fn type_param(mut self, param: TypeParameterDef) -> Self {
        self.type_parameters.push(param);
        self
    }

    pub fn param(mut self, param: ParameterDef) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn return_attribute(mut self, attribute: AttributeData) -> Self {
        self.return_attributes.push(attribute);
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// The first attribute of the given class, if applied.
    pub fn find_attribute(&self, class: &str) -> Option<&AttributeData> {
        self.attributes.iter().find(|a| a.is(class))
    }
}

/// A property declared on a type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    pub name: String,
    pub ty: TypeRef,
    pub has_getter: bool,
    pub is_static: bool,
}

impl PropertyDef {
    /// Create a readable instance property.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            has_getter: true,
            is_static: false,
        }
    }

    pub fn write_only(mut self) -> Self {
        self.has_getter = false;
        self
    }
}

/// A type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    /// Owning module, assigned when the type is added to a table.
    pub module: ModuleId,
    /// Dotted namespace; empty for the global namespace.
    pub namespace: String,
    /// Simple name without arity.
    pub name: String,
    pub kind: TypeKind,
    pub accessibility: Accessibility,
    pub containing: Option<TypeHandle>,
    pub type_parameters: Vec<TypeParameterDef>,
    pub base: Option<NamedType>,
    pub attributes: Vec<AttributeData>,
    pub methods: Vec<MethodDef>,
    pub properties: Vec<PropertyDef>,
    pub location: Option<Location>,
}

impl TypeDef {
    /// Create an internal type definition.
    pub fn new(kind: TypeKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: ModuleId(0),
            namespace: namespace.into(),
            name: name.into(),
            kind,
            accessibility: Accessibility::Internal,
            containing: None,
            type_parameters: Vec::new(),
            base: None,
            attributes: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            location: None,
        }
    }

    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, namespace, name)
    }

    pub fn struct_(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(TypeKind::Struct, namespace, name)
    }

    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, namespace, name)
    }

    pub fn delegate(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(TypeKind::Delegate, namespace, name)
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn public(self) -> Self {
        self.accessibility(Accessibility::Public)
    }

    /// Nest this type inside another one.
    pub fn nested_in(mut self, containing: TypeHandle) -> Self {
        self.containing = Some(containing);
        self
    }

    pub fn type_param(mut self, param: TypeParameterDef) -> Self {
        self.type_parameters.push(param);
        self
    }

    pub fn base(mut self, base: NamedType) -> Self {
        self.base = Some(base);
        self
    }

    pub fn attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Number of type parameters declared on this type itself.
    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }

    /// Simple name with a backtick arity suffix for generic types.
    pub fn metadata_name(&self) -> String {
        match self.arity() {
            0 => self.name.clone(),
            n => format!("{}`{}", self.name, n),
        }
    }

    /// The first attribute of the given class, if applied.
    pub fn find_attribute(&self, class: &str) -> Option<&AttributeData> {
        self.attributes.iter().find(|a| a.is(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_name() {
        let plain = TypeDef::class("System.Threading.Tasks", "Task");
        assert_eq!(plain.metadata_name(), "Task");

        let generic = plain.type_param(TypeParameterDef::new("TResult"));
        assert_eq!(generic.metadata_name(), "Task`1");
    }

    #[test]
    fn test_method_defaults() {
        let method = MethodDef::new("Run", TypeRef::Void);
        assert_eq!(method.identifier, "Run");
        assert_eq!(method.accessibility, Accessibility::Private);
        assert!(!method.is_static);

        let ext = MethodDef::new("GetAwaiter", TypeRef::Void).extension();
        assert!(ext.is_static && ext.is_extension);
    }

    #[test]
    fn test_ref_kind() {
        assert!(!RefKind::None.is_by_reference());
        assert!(RefKind::Out.is_by_reference());
        assert!(RefKind::RefReadonly.is_by_reference());
    }

    #[test]
    fn test_primary_constraint_keywords() {
        assert_eq!(PrimaryConstraint::NullableReferenceType.keyword(), "class?");
        assert_eq!(PrimaryConstraint::ValueType.keyword(), "struct");
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new("Person.cs", 12, 6).to_string(), "Person.cs:12:6");
    }
}
