//! Identity lookups for the well-known types classification relies on.

use asynclift_symbols::{Accessibility, SymbolQuery, TypeHandle};
use indexmap::IndexSet;

pub const TASK: &str = "System.Threading.Tasks.Task";
pub const TASK_OF_T: &str = "System.Threading.Tasks.Task`1";
pub const VALUE_TASK: &str = "System.Threading.Tasks.ValueTask";
pub const VALUE_TASK_OF_T: &str = "System.Threading.Tasks.ValueTask`1";
pub const ENUMERABLE_OF_T: &str = "System.Collections.Generic.IEnumerable`1";
pub const ASYNC_ENUMERABLE_OF_T: &str = "System.Collections.Generic.IAsyncEnumerable`1";
pub const ASYNC_METHOD_BUILDER: &str = "System.Runtime.CompilerServices.AsyncMethodBuilderAttribute";
pub const BOOLEAN: &str = "System.Boolean";

/// Resolves well-known metadata names against a symbol query service.
///
/// Only public definitions are ever returned, so an internal type that
/// happens to share a well-known name never counts as the real thing.
#[derive(Clone, Copy)]
pub struct WellKnownTypes<'a> {
    symbols: &'a dyn SymbolQuery,
}

impl<'a> WellKnownTypes<'a> {
    pub fn new(symbols: &'a dyn SymbolQuery) -> Self {
        Self { symbols }
    }

    /// Resolve a name the way the compiler binds it from the current
    /// compilation.
    pub fn resolve(&self, metadata_name: &str) -> Option<TypeHandle> {
        self.symbols
            .well_known_type(metadata_name)
            .filter(|handle| self.is_public(*handle))
    }

    /// Every public definition with the given metadata name, searching the
    /// current compilation and then each reference in order.
    pub fn find_in_all_modules(&self, metadata_name: &str) -> IndexSet<TypeHandle> {
        let mut modules = vec![self.symbols.current_module()];
        modules.extend(self.symbols.referenced_modules());

        modules
            .into_iter()
            .filter_map(|module| self.symbols.type_in_module(module, metadata_name))
            .filter(|handle| self.is_public(*handle))
            .collect()
    }

    fn is_public(&self, handle: TypeHandle) -> bool {
        self.symbols.type_def(handle).accessibility == Accessibility::Public
    }
}

#[cfg(test)]
mod tests {
    use asynclift_symbols::{SymbolTable, TypeDef, TypeParameterDef, corelib};

    use super::*;

    #[test]
    fn test_resolve_skips_non_public() {
        let mut table = SymbolTable::new("App");
        let app = table.current_module();
        table.add_type(app, TypeDef::class("System.Threading.Tasks", "Task"));

        let known = WellKnownTypes::new(&table);
        assert_eq!(known.resolve(TASK), None);
    }

    #[test]
    fn test_find_in_all_modules() {
        let mut table = SymbolTable::new("App");
        let core = corelib::install(&mut table);
        let interactive = table.add_module("System.Interactive.Async");
        let polyfill = table.add_type(
            interactive,
            TypeDef::interface("System.Collections.Generic", "IAsyncEnumerable")
                .public()
                .type_param(TypeParameterDef::new("T")),
        );
        let hidden = table.add_module("Hidden");
        table.add_type(
            hidden,
            TypeDef::interface("System.Collections.Generic", "IAsyncEnumerable")
                .type_param(TypeParameterDef::new("T")),
        );

        let found = WellKnownTypes::new(&table).find_in_all_modules(ASYNC_ENUMERABLE_OF_T);
        let found: Vec<_> = found.into_iter().collect();
        assert_eq!(found, vec![core.async_enumerable, polyfill]);
    }
}
