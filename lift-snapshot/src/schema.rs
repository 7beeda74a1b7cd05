//! Serde schema of a snapshot file.
//!
//! ```toml
//! core_library = true
//!
//! [generator]
//! default_namespace = "Generated"
//!
//! [[modules]]
//! name = "App"
//! current = true
//!
//! [[modules.types]]
//! namespace = "Demo"
//! name = "Person"
//! accessibility = "public"
//!
//! [[modules.types.methods]]
//! name = "Save"
//! accessibility = "public"
//! returns = "System.Threading.Tasks.Task"
//! attributes = [{ class = "AsyncLift.LiftAttribute", location = "Person.cs:4:6" }]
//! ```
//!
//! Types are written as type expressions, see [`crate::typeexpr`].

use asynclift_codegen::GeneratorOptions;
use asynclift_symbols::{Accessibility, ConstantValue, RefKind, TypeKind};
use serde::Deserialize;

/// Root of a snapshot file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotSchema {
    /// Seed the well-known core library as a referenced module.
    #[serde(default)]
    pub core_library: bool,

    #[serde(default)]
    pub generator: GeneratorOptions,

    #[serde(default)]
    pub modules: Vec<ModuleSchema>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSchema {
    pub name: String,

    /// Exactly one module is the compilation being generated for.
    #[serde(default)]
    pub current: bool,

    #[serde(default)]
    pub types: Vec<TypeSchema>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeSchema {
    /// Ignored for nested types, which use their containing type's namespace.
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Metadata name of the containing type in the same module, e.g.
    /// ``Demo.Outer`1``.
    pub containing: Option<String>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterSchema>,
    /// Base type expression.
    pub base: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeSchema>,
    #[serde(default)]
    pub methods: Vec<MethodSchema>,
    #[serde(default)]
    pub properties: Vec<PropertySchema>,
    pub location: Option<String>,
}

/// A type parameter, either just a name or a table with constraints.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TypeParameterSchema {
    Name(String),
    Constrained(ConstrainedTypeParameter),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstrainedTypeParameter {
    pub name: String,
    /// `class`, `class?`, `struct`, `unmanaged` or `notnull`.
    pub primary: Option<String>,
    /// Constraint type expressions.
    #[serde(default)]
    pub constraints: Vec<String>,
    /// The `new()` constraint.
    #[serde(default, rename = "new")]
    pub constructor: bool,
}

impl TypeParameterSchema {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Constrained(param) => &param.name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodSchema {
    /// Metadata name; for explicit implementations the qualified form.
    pub name: String,
    /// Source identifier, defaults to the name.
    pub identifier: Option<String>,
    #[serde(default = "private")]
    pub accessibility: Accessibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub extension: bool,
    #[serde(default)]
    pub ref_return: bool,
    /// Return type expression.
    #[serde(default = "void")]
    pub returns: String,
    /// Explicitly implemented interface.
    pub implements: Option<ImplementsSchema>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterSchema>,
    #[serde(default)]
    pub parameters: Vec<ParameterSchema>,
    #[serde(default)]
    pub attributes: Vec<AttributeSchema>,
    #[serde(default)]
    pub return_attributes: Vec<AttributeSchema>,
    pub location: Option<String>,
}

fn private() -> Accessibility {
    Accessibility::Private
}

fn void() -> String {
    "void".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImplementsSchema {
    /// Interface type expression.
    pub interface: String,
    /// Accessibility of the implemented interface member.
    #[serde(default = "public")]
    pub accessibility: Accessibility,
}

fn public() -> Accessibility {
    Accessibility::Public
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, rename = "ref")]
    pub ref_kind: RefKind,
    #[serde(default)]
    pub params: bool,
    pub default: Option<ValueSchema>,
    #[serde(default)]
    pub attributes: Vec<AttributeSchema>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySchema {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default = "yes")]
    pub getter: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

fn yes() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeSchema {
    /// Metadata name of the attribute class.
    pub class: String,
    #[serde(default)]
    pub args: Vec<ValueSchema>,
    #[serde(default)]
    pub named: Vec<NamedArgumentSchema>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamedArgumentSchema {
    pub name: String,
    pub value: ValueSchema,
}

/// An attribute argument or default value.
///
/// Plain TOML values map to `bool`, `int` (or `long` when out of range),
/// `double` and `string`. Other constants use the explicit
/// `{ kind = "...", value = ... }` form, and `{ type = "..." }` is a
/// `typeof` argument.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValueSchema {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Array(Vec<ValueSchema>),
    Type {
        #[serde(rename = "type")]
        ty: String,
    },
    Typed(ConstantValue),
}
