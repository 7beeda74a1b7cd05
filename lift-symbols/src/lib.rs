//! Symbol model for the asynclift generator.
//!
//! This crate describes the compilation the generator reads from: type
//! definitions, their members and attributes, and the [`SymbolQuery`]
//! service through which every lookup goes. [`SymbolTable`] is the in-memory
//! implementation used by the host and by tests.
//!
//! # Architecture
//!
//! ```text
//! snapshot (TOML) → asynclift-snapshot (loading) → asynclift-symbols (SymbolTable) → codegen
//! ```

mod constant;
pub mod corelib;
mod members;
mod query;
mod table;
mod types;

pub use constant::{ConstantValue, TypedConstant, escape};
pub use corelib::CoreTypes;
pub use members::{
    AttributeData, ExplicitImplementation, Location, MethodDef, ParameterDef, PrimaryConstraint,
    PropertyDef, RefKind, TypeDef, TypeParameterDef,
};
pub use query::{SymbolQuery, keyword_for};
pub use table::SymbolTable;
pub use types::{Accessibility, ModuleId, NamedType, TypeHandle, TypeKind, TypeRef};
