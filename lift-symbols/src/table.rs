//! In-memory symbol table.

use std::collections::HashMap;

use crate::{MethodDef, ModuleId, SymbolQuery, TypeDef, TypeHandle};

#[derive(Debug, Clone)]
struct ModuleData {
    name: String,
    types: Vec<TypeHandle>,
}

/// An owned snapshot of a compilation's symbols.
///
/// The first module is the current compilation; every other module is a
/// reference of it.
///
/// # Example
///
/// ```
/// use asynclift_symbols::{SymbolQuery, SymbolTable, TypeDef};
///
/// let mut table = SymbolTable::new("App");
/// let app = table.current_module();
/// let person = table.add_type(app, TypeDef::class("Demo", "Person").public());
///
/// assert_eq!(table.type_in_module(app, "Demo.Person"), Some(person));
/// ```
#[derive(Debug, Clone)]
pub struct SymbolTable {
    modules: Vec<ModuleData>,
    types: Vec<TypeDef>,
    index: HashMap<(ModuleId, String), TypeHandle>,
}

impl SymbolTable {
    /// Create a table whose current compilation has the given name.
    pub fn new(current_module: impl Into<String>) -> Self {
        Self {
            modules: vec![ModuleData {
                name: current_module.into(),
                types: Vec::new(),
            }],
            types: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a referenced module.
    pub fn add_module(&mut self, name: impl Into<String>) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        self.modules.push(ModuleData {
            name: name.into(),
            types: Vec::new(),
        });
        id
    }

    /// Find a module by name.
    pub fn module_by_name(&self, name: &str) -> Option<ModuleId> {
        self.modules
            .iter()
            .position(|m| m.name == name)
            .map(|i| ModuleId(i as u32))
    }

    /// Add a type definition to a module.
    ///
    /// Nested types take the namespace of their containing type. A later
    /// definition with the same metadata name in the same module replaces the
    /// earlier one in lookups.
    pub fn add_type(&mut self, module: ModuleId, mut def: TypeDef) -> TypeHandle {
        def.module = module;
        if let Some(outer) = def.containing {
            def.namespace = self.types[outer.index()].namespace.clone();
        }

        let handle = TypeHandle(self.types.len() as u32);
        self.types.push(def);

        let name = self.metadata_name(handle);
        self.index.insert((module, name), handle);
        self.modules[module.index()].types.push(handle);
        handle
    }

    /// Mutable access to a definition, e.g. to add members that refer back
    /// to types registered later.
    pub fn type_def_mut(&mut self, handle: TypeHandle) -> &mut TypeDef {
        &mut self.types[handle.index()]
    }

    /// Number of type definitions across all modules.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl SymbolQuery for SymbolTable {
    fn current_module(&self) -> ModuleId {
        ModuleId(0)
    }

    fn referenced_modules(&self) -> Vec<ModuleId> {
        (1..self.modules.len()).map(|i| ModuleId(i as u32)).collect()
    }

    fn module_name(&self, module: ModuleId) -> &str {
        &self.modules[module.index()].name
    }

    fn types_in_module(&self, module: ModuleId) -> Vec<TypeHandle> {
        self.modules
            .get(module.index())
            .map(|m| m.types.clone())
            .unwrap_or_default()
    }

    fn type_in_module(&self, module: ModuleId, metadata_name: &str) -> Option<TypeHandle> {
        self.index.get(&(module, metadata_name.to_string())).copied()
    }

    fn type_def(&self, handle: TypeHandle) -> &TypeDef {
        &self.types[handle.index()]
    }

    fn extension_methods(&self, name: &str) -> Vec<&MethodDef> {
        self.types
            .iter()
            .flat_map(|t| t.methods.iter())
            .filter(|m| m.is_extension && m.name == name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TypeParameterDef, TypeRef};

    #[test]
    fn test_modules() {
        let mut table = SymbolTable::new("App");
        let lib = table.add_module("Lib");

        assert_eq!(table.current_module(), ModuleId(0));
        assert_eq!(table.referenced_modules(), vec![lib]);
        assert_eq!(table.module_name(lib), "Lib");
        assert_eq!(table.module_by_name("Lib"), Some(lib));
        assert_eq!(table.module_by_name("Missing"), None);
    }

    #[test]
    fn test_lookup_is_per_module() {
        let mut table = SymbolTable::new("App");
        let lib = table.add_module("Lib");
        let list = table.add_type(
            lib,
            TypeDef::class("Demo", "List").type_param(TypeParameterDef::new("T")),
        );

        assert_eq!(table.type_in_module(lib, "Demo.List`1"), Some(list));
        assert_eq!(table.type_in_module(table.current_module(), "Demo.List`1"), None);
        assert_eq!(table.types_in_module(lib), vec![list]);
    }

    #[test]
    fn test_nested_type_takes_outer_namespace() {
        let mut table = SymbolTable::new("App");
        let app = table.current_module();
        let outer = table.add_type(app, TypeDef::class("Demo", "Outer"));
        let inner = table.add_type(app, TypeDef::class("Ignored", "Inner").nested_in(outer));

        assert_eq!(table.type_def(inner).namespace, "Demo");
        assert_eq!(table.type_in_module(app, "Demo.Outer+Inner"), Some(inner));
    }

    #[test]
    fn test_extension_methods() {
        let mut table = SymbolTable::new("App");
        let app = table.current_module();
        table.add_type(
            app,
            TypeDef::class("Demo", "Extensions")
                .method(MethodDef::new("GetAwaiter", TypeRef::Void).extension())
                .method(MethodDef::new("GetAwaiter", TypeRef::Void)),
        );

        assert_eq!(table.extension_methods("GetAwaiter").len(), 1);
        assert!(table.extension_methods("Other").is_empty());
    }
}
