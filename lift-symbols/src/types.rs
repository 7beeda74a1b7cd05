//! Type identities and type references.

use serde::{Deserialize, Serialize};

/// Identity of a type definition inside a [`SymbolTable`](crate::SymbolTable).
///
/// Two references denote the same definition exactly when their handles are
/// equal; display names play no part in identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHandle(pub(crate) u32);

impl TypeHandle {
    /// Position of the definition in its table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a module (the current compilation or a referenced assembly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub(crate) u32);

impl ModuleId {
    /// Position of the module in its table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Declared accessibility of a symbol.
///
/// Variants are ordered from least to most visible, so `a < b` reads as
/// "`a` is more restrictive than `b`".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    NotApplicable,
    Private,
    /// `private protected`
    ProtectedAndInternal,
    Protected,
    #[default]
    Internal,
    /// `protected internal`
    ProtectedOrInternal,
    Public,
}

impl Accessibility {
    /// Returns true if the symbol is visible to other types of its module.
    pub fn is_at_least_internal(&self) -> bool {
        *self >= Accessibility::Internal
    }

    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotApplicable => "not_applicable",
            Self::Private => "private",
            Self::ProtectedAndInternal => "protected_and_internal",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::ProtectedOrInternal => "protected_or_internal",
            Self::Public => "public",
        }
    }
}

/// Kind of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

impl TypeKind {
    /// Returns true for structs and enums.
    pub fn is_value_type(&self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::Enum)
    }
}

/// A reference to a type as it appears in a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// The "no value" return type.
    Void,
    /// `dynamic`.
    Dynamic,
    /// A (possibly constructed) named type.
    Named(NamedType),
    /// A type parameter in scope, by name.
    Parameter(String),
    /// A single-dimensional array.
    Array(Box<TypeRef>),
    /// A nullable annotation on a reference type (`string?`, `T?`).
    Annotated(Box<TypeRef>),
}

impl TypeRef {
    /// Create a named type reference.
    pub fn named(definition: TypeHandle, args: Vec<TypeRef>) -> Self {
        Self::Named(NamedType::new(definition, args))
    }

    /// Create a type parameter reference.
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::Parameter(name.into())
    }

    /// Create an array type.
    pub fn array(element: TypeRef) -> Self {
        Self::Array(Box::new(element))
    }

    /// Add a nullable annotation.
    pub fn annotated(inner: TypeRef) -> Self {
        Self::Annotated(Box::new(inner))
    }

    /// Returns true for the "no value" type.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// The named type behind this reference, looking through nullable
    /// annotations.
    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            Self::Named(named) => Some(named),
            Self::Annotated(inner) => inner.as_named(),
            _ => None,
        }
    }
}

/// A named type together with its type arguments.
///
/// `args` holds the arguments of the whole containment chain, outermost type
/// first, so `Outer<A>.Inner<B>` is stored as `[A, B]` on `Inner`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedType {
    pub definition: TypeHandle,
    pub args: Vec<TypeRef>,
}

impl NamedType {
    pub fn new(definition: TypeHandle, args: Vec<TypeRef>) -> Self {
        Self { definition, args }
    }

    /// The trailing `arity` arguments, i.e. those belonging to the definition
    /// itself rather than to its containing types.
    pub fn own_args(&self, arity: usize) -> &[TypeRef] {
        let start = self.args.len().saturating_sub(arity);
        &self.args[start..]
    }
}
