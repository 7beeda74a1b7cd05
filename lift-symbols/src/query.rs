//! The symbol query service consumed by the generator.

use crate::{
    AttributeData, MethodDef, ModuleId, NamedType, TypeDef, TypeHandle, TypeRef, TypedConstant,
};

/// Read-only access to a compilation's symbols.
///
/// The generator never mutates symbols; every query must be answerable from a
/// single snapshot. Handles passed to these methods are always handles that
/// the same service produced.
pub trait SymbolQuery {
    /// The module being compiled.
    fn current_module(&self) -> ModuleId;

    /// Every module referenced by the current compilation, excluding it.
    fn referenced_modules(&self) -> Vec<ModuleId>;

    /// Display name of a module.
    fn module_name(&self, module: ModuleId) -> &str;

    /// Types declared in a module, in declaration order.
    fn types_in_module(&self, module: ModuleId) -> Vec<TypeHandle>;

    /// Look up a type by fully qualified metadata name
    /// (e.g. ``System.Collections.Generic.IEnumerable`1``) in one module.
    fn type_in_module(&self, module: ModuleId, metadata_name: &str) -> Option<TypeHandle>;

    /// The definition behind a handle.
    fn type_def(&self, handle: TypeHandle) -> &TypeDef;

    /// Extension methods with the given name visible to the current
    /// compilation.
    fn extension_methods(&self, name: &str) -> Vec<&MethodDef>;

    /// Resolve a well-known type the way the compiler does: a definition in
    /// the current module wins, otherwise the match must be unique among the
    /// referenced modules.
    fn well_known_type(&self, metadata_name: &str) -> Option<TypeHandle> {
        if let Some(handle) = self.type_in_module(self.current_module(), metadata_name) {
            return Some(handle);
        }

        let mut found = None;
        for module in self.referenced_modules() {
            if let Some(handle) = self.type_in_module(module, metadata_name) {
                if found.is_some() {
                    return None;
                }
                found = Some(handle);
            }
        }
        found
    }

    /// The type itself followed by each enclosing type, innermost first.
    fn containing_chain(&self, handle: TypeHandle) -> Vec<TypeHandle> {
        let mut chain = vec![handle];
        let mut current = self.type_def(handle).containing;
        while let Some(outer) = current {
            chain.push(outer);
            current = self.type_def(outer).containing;
        }
        chain
    }

    /// Fully qualified metadata name, nested types joined with `+`.
    fn metadata_name(&self, handle: TypeHandle) -> String {
        let chain = self.containing_chain(handle);
        let names: Vec<String> = chain
            .iter()
            .rev()
            .map(|h| self.type_def(*h).metadata_name())
            .collect();
        qualify(&self.outermost(handle).namespace, &names.join("+"))
    }

    /// Source-style name of a definition without type arguments
    /// (e.g. `System.Threading.Tasks.Task`).
    fn qualified_name(&self, handle: TypeHandle) -> String {
        let chain = self.containing_chain(handle);
        let names: Vec<&str> = chain
            .iter()
            .rev()
            .map(|h| self.type_def(*h).name.as_str())
            .collect();
        qualify(&self.outermost(handle).namespace, &names.join("."))
    }

    /// Source-style name of a definition applied to its own type parameters
    /// (e.g. `App.Outer<X>.Inner<U>`).
    fn display_definition(&self, handle: TypeHandle) -> String {
        self.display(&TypeRef::Named(NamedType::new(handle, Vec::new())))
    }

    /// Render a type reference in C# syntax.
    fn display(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Void => "void".to_string(),
            TypeRef::Dynamic => "dynamic".to_string(),
            TypeRef::Parameter(name) => name.clone(),
            TypeRef::Array(element) => format!("{}[]", self.display(element)),
            TypeRef::Annotated(inner) => format!("{}?", self.display(inner)),
            TypeRef::Named(named) => self.display_named(named),
        }
    }

    /// Render a named type in C# syntax.
    fn display_named(&self, named: &NamedType) -> String {
        let def = self.type_def(named.definition);
        if def.containing.is_none() && def.namespace == "System" {
            if let Some(keyword) = keyword_for(&def.metadata_name()) {
                return keyword.to_string();
            }
            if def.metadata_name() == "Nullable`1" && named.args.len() == 1 {
                return format!("{}?", self.display(&named.args[0]));
            }
        }

        let chain: Vec<TypeHandle> = self
            .containing_chain(named.definition)
            .into_iter()
            .rev()
            .collect();
        let total: usize = chain.iter().map(|h| self.type_def(*h).arity()).sum();
        let bound = named.args.len() == total;

        let mut offset = 0;
        let mut parts = Vec::with_capacity(chain.len());
        for handle in &chain {
            let level = self.type_def(*handle);
            let arity = level.arity();
            let mut part = level.name.clone();
            if arity > 0 {
                let args: Vec<String> = if bound {
                    named.args[offset..offset + arity]
                        .iter()
                        .map(|a| self.display(a))
                        .collect()
                } else {
                    level.type_parameters.iter().map(|p| p.name.clone()).collect()
                };
                part.push('<');
                part.push_str(&args.join(", "));
                part.push('>');
            }
            offset += arity;
            parts.push(part);
        }

        qualify(&self.outermost(named.definition).namespace, &parts.join("."))
    }

    /// Render an attribute application the way it would be written in source,
    /// without the surrounding brackets.
    fn display_attribute(&self, attribute: &AttributeData) -> String {
        let class = attribute.class.replace('+', ".");
        let mut args: Vec<String> = attribute
            .args
            .iter()
            .map(|a| self.display_constant(a))
            .collect();
        args.extend(
            attribute
                .named
                .iter()
                .map(|(name, value)| format!("{} = {}", name, self.display_constant(value))),
        );

        if args.is_empty() {
            class
        } else {
            format!("{}({})", class, args.join(", "))
        }
    }

    /// Render an attribute argument.
    fn display_constant(&self, constant: &TypedConstant) -> String {
        match constant {
            TypedConstant::Value(value) => value.to_literal(),
            TypedConstant::Type(ty) => format!("typeof({})", self.display(ty)),
            TypedConstant::Array(items) if items.is_empty() => "new object[] { }".to_string(),
            TypedConstant::Array(items) => {
                let items: Vec<String> = items.iter().map(|i| self.display_constant(i)).collect();
                format!("new[] {{ {} }}", items.join(", "))
            }
        }
    }

    /// Returns true if the reference denotes a struct or enum.
    fn is_value_type(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Named(named) => self.type_def(named.definition).kind.is_value_type(),
            _ => false,
        }
    }

    /// The outermost type of a containment chain.
    fn outermost(&self, handle: TypeHandle) -> &TypeDef {
        let mut def = self.type_def(handle);
        while let Some(outer) = def.containing {
            def = self.type_def(outer);
        }
        def
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}

/// C# keyword for a special `System` type, by metadata name.
pub fn keyword_for(metadata_name: &str) -> Option<&'static str> {
    let keyword = match metadata_name {
        "Boolean" => "bool",
        "Byte" => "byte",
        "SByte" => "sbyte",
        "Char" => "char",
        "Decimal" => "decimal",
        "Double" => "double",
        "Single" => "float",
        "Int16" => "short",
        "UInt16" => "ushort",
        "Int32" => "int",
        "UInt32" => "uint",
        "Int64" => "long",
        "UInt64" => "ulong",
        "IntPtr" => "nint",
        "UIntPtr" => "nuint",
        "Object" => "object",
        "String" => "string",
        _ => return None,
    };
    Some(keyword)
}
