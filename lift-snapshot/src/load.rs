//! Turns a parsed [`SnapshotSchema`] into a [`SymbolTable`].
//!
//! Loading runs in two passes. The first registers every type of every
//! module so that member signatures can refer to types declared later in
//! the file; the second resolves base types, constraints, attributes and
//! members.

use asynclift_symbols::{
    AttributeData, ConstantValue, Location, MethodDef, ModuleId, NamedType, ParameterDef,
    PrimaryConstraint, PropertyDef, SymbolQuery, SymbolTable, TypeDef, TypeHandle,
    TypeParameterDef, TypeRef, TypedConstant, corelib,
};

use crate::error::{Result, SourceContext};
use crate::schema::{
    AttributeSchema, MethodSchema, ModuleSchema, SnapshotSchema, TypeParameterSchema, TypeSchema,
    ValueSchema,
};
use crate::typeexpr::{self, TypeExpr};

/// Build the symbol table described by `schema`.
pub(crate) fn load(schema: &SnapshotSchema, ctx: &SourceContext) -> Result<SymbolTable> {
    let current = current_module(&schema.modules, ctx)?;

    let mut table = SymbolTable::new(current.name.as_str());
    if schema.core_library {
        corelib::install(&mut table);
    }

    let mut modules = Vec::with_capacity(schema.modules.len());
    for module in &schema.modules {
        let id = if module.current {
            table.current_module()
        } else if table.module_by_name(&module.name).is_some() {
            return Err(ctx.validation_error(
                format!("module '{}' is declared twice", module.name),
                &module.name,
            ));
        } else {
            table.add_module(module.name.as_str())
        };
        modules.push(id);
    }

    let mut declared = Vec::new();
    for (module, id) in schema.modules.iter().zip(&modules) {
        for ty in &module.types {
            let handle = declare(&mut table, *id, ty, ctx)?;
            declared.push((ty, handle));
        }
    }

    for (ty, handle) in declared {
        define(&mut table, handle, ty, ctx)?;
    }

    Ok(table)
}

fn current_module<'a>(modules: &'a [ModuleSchema], ctx: &SourceContext) -> Result<&'a ModuleSchema> {
    let mut current = modules.iter().filter(|m| m.current);
    match (current.next(), current.next()) {
        (Some(module), None) => Ok(module),
        (None, _) => Err(ctx.validation_error(
            "no module is marked 'current = true'",
            "modules",
        )),
        (Some(_), Some(second)) => Err(ctx.validation_error(
            "exactly one module may be marked 'current = true'",
            &second.name,
        )),
    }
}

/// Register a type with its name, kind, accessibility and type parameter
/// names; everything that needs type resolution is left for [`define`].
fn declare(
    table: &mut SymbolTable,
    module: ModuleId,
    ty: &TypeSchema,
    ctx: &SourceContext,
) -> Result<TypeHandle> {
    let mut def = TypeDef::new(ty.kind, ty.namespace.as_str(), ty.name.as_str())
        .accessibility(ty.accessibility);
    for param in &ty.type_parameters {
        def = def.type_param(TypeParameterDef::new(param.name()));
    }
    if let Some(location) = &ty.location {
        def = def.at(parse_location(location, ctx)?);
    }

    let metadata_name = match &ty.containing {
        Some(containing) => {
            let outer = table
                .type_in_module(module, containing)
                .ok_or_else(|| ctx.unknown_containing_type_error(&ty.name, containing))?;
            def = def.nested_in(outer);
            format!("{}+{}", table.metadata_name(outer), def.metadata_name())
        }
        None if ty.namespace.is_empty() => def.metadata_name(),
        None => format!("{}.{}", ty.namespace, def.metadata_name()),
    };

    if table.type_in_module(module, &metadata_name).is_some() {
        return Err(ctx.duplicate_type_error(&ty.name, table.module_name(module)));
    }

    Ok(table.add_type(module, def))
}

fn define(
    table: &mut SymbolTable,
    handle: TypeHandle,
    ty: &TypeSchema,
    ctx: &SourceContext,
) -> Result<()> {
    let resolver = Resolver::for_type(table, handle, ctx);

    let type_parameters = ty
        .type_parameters
        .iter()
        .map(|param| resolver.type_parameter(param))
        .collect::<Result<Vec<_>>>()?;
    let base = ty
        .base
        .as_deref()
        .map(|base| resolver.named(base))
        .transpose()?;
    let attributes = resolver.attributes(&ty.attributes)?;
    let methods = ty
        .methods
        .iter()
        .map(|method| resolver.method(method))
        .collect::<Result<Vec<_>>>()?;
    let properties = ty
        .properties
        .iter()
        .map(|property| {
            let mut def = PropertyDef::new(property.name.as_str(), resolver.resolve(&property.ty)?);
            def.has_getter = property.getter;
            def.is_static = property.is_static;
            Ok(def)
        })
        .collect::<Result<Vec<_>>>()?;

    let def = table.type_def_mut(handle);
    def.type_parameters = type_parameters;
    def.base = base;
    def.attributes = attributes;
    def.methods = methods;
    def.properties = properties;
    Ok(())
}

/// Resolves type expressions from the point of view of one declaration.
struct Resolver<'a> {
    table: &'a SymbolTable,
    ctx: &'a SourceContext,
    home: ModuleId,
    /// Type parameter names in scope.
    scope: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn for_type(table: &'a SymbolTable, handle: TypeHandle, ctx: &'a SourceContext) -> Self {
        let scope = table
            .containing_chain(handle)
            .iter()
            .flat_map(|h| table.type_def(*h).type_parameters.iter())
            .map(|p| p.name.clone())
            .collect();
        Self {
            table,
            ctx,
            home: table.type_def(handle).module,
            scope,
        }
    }

    fn with_parameters(&self, params: &[TypeParameterSchema]) -> Self {
        let mut scope: Vec<String> = params.iter().map(|p| p.name().to_string()).collect();
        scope.extend(self.scope.iter().cloned());
        Self {
            table: self.table,
            ctx: self.ctx,
            home: self.home,
            scope,
        }
    }

    fn method(&self, method: &MethodSchema) -> Result<MethodDef> {
        let inner = self.with_parameters(&method.type_parameters);

        let mut def = MethodDef::new(method.name.as_str(), inner.resolve(&method.returns)?)
            .accessibility(method.accessibility);
        if let Some(identifier) = &method.identifier {
            def = def.identifier(identifier.as_str());
        }
        if method.is_static {
            def = def.static_();
        }
        if method.extension {
            def = def.extension();
        }
        if method.ref_return {
            def = def.by_ref_return();
        }
        if let Some(implements) = &method.implements {
            def = def.implements(inner.named(&implements.interface)?, implements.accessibility);
        }
        for param in &method.type_parameters {
            def = def.type_param(inner.type_parameter(param)?);
        }
        for param in &method.parameters {
            let ty = inner.resolve(&param.ty)?;
            let mut parameter = ParameterDef::new(param.name.as_str(), ty).ref_kind(param.ref_kind);
            if param.params {
                parameter = parameter.params();
            }
            if let Some(default) = &param.default {
                let value = inner.default_value(default, &parameter)?;
                parameter = parameter.default_value(value);
            }
            for attribute in inner.attributes(&param.attributes)? {
                parameter = parameter.attribute(attribute);
            }
            def = def.param(parameter);
        }
        for attribute in inner.attributes(&method.attributes)? {
            def = def.attribute(attribute);
        }
        for attribute in inner.attributes(&method.return_attributes)? {
            def = def.return_attribute(attribute);
        }
        if let Some(location) = &method.location {
            def = def.at(parse_location(location, self.ctx)?);
        }
        Ok(def)
    }

    fn type_parameter(&self, param: &TypeParameterSchema) -> Result<TypeParameterDef> {
        let constrained = match param {
            TypeParameterSchema::Name(name) => return Ok(TypeParameterDef::new(name.as_str())),
            TypeParameterSchema::Constrained(constrained) => constrained,
        };

        let mut def = TypeParameterDef::new(constrained.name.as_str());
        if let Some(primary) = &constrained.primary {
            def = def.primary(parse_primary(primary, self.ctx)?);
        }
        for constraint in &constrained.constraints {
            def = def.constraint(self.resolve(constraint)?);
        }
        if constrained.constructor {
            def = def.new_constraint();
        }
        Ok(def)
    }

    fn attributes(&self, attributes: &[AttributeSchema]) -> Result<Vec<AttributeData>> {
        attributes.iter().map(|a| self.attribute(a)).collect()
    }

    fn attribute(&self, attribute: &AttributeSchema) -> Result<AttributeData> {
        let mut data = AttributeData::new(attribute.class.as_str());
        for arg in &attribute.args {
            data = data.arg(self.constant(arg)?);
        }
        for named in &attribute.named {
            data = data.named_arg(named.name.as_str(), self.constant(&named.value)?);
        }
        if let Some(location) = &attribute.location {
            data = data.at(parse_location(location, self.ctx)?);
        }
        Ok(data)
    }

    fn constant(&self, value: &ValueSchema) -> Result<TypedConstant> {
        match value {
            ValueSchema::Type { ty } => Ok(TypedConstant::Type(self.resolve(ty)?)),
            ValueSchema::Array(items) => Ok(TypedConstant::Array(
                items
                    .iter()
                    .map(|item| self.constant(item))
                    .collect::<Result<Vec<_>>>()?,
            )),
            scalar => Ok(TypedConstant::Value(scalar_value(scalar).unwrap_or(ConstantValue::Null))),
        }
    }

    /// A parameter default, narrowed to the parameter's numeric type when a
    /// plain TOML number was written.
    fn default_value(&self, value: &ValueSchema, param: &ParameterDef) -> Result<ConstantValue> {
        let value = scalar_value(value).ok_or_else(|| {
            self.ctx.validation_error(
                format!(
                    "default value of parameter '{}' must be a single constant",
                    param.name
                ),
                &param.name,
            )
        })?;
        Ok(self.narrow(value, &param.ty))
    }

    fn narrow(&self, value: ConstantValue, ty: &TypeRef) -> ConstantValue {
        let Some(named) = ty.as_named() else {
            return value;
        };
        let def = self.table.type_def(named.definition);
        if def.namespace != "System" || def.containing.is_some() {
            return value;
        }
        if def.metadata_name() == "Nullable`1" && named.args.len() == 1 {
            return self.narrow(value, &named.args[0]);
        }

        let target = def.metadata_name();
        match value {
            ConstantValue::Int32(v) => {
                narrow_integer(i64::from(v), &target).unwrap_or(ConstantValue::Int32(v))
            }
            ConstantValue::Int64(v) => {
                narrow_integer(v, &target).unwrap_or(ConstantValue::Int64(v))
            }
            ConstantValue::Double(v) if target == "Single" => ConstantValue::Single(v as f32),
            ConstantValue::Double(v) if target == "Decimal" => ConstantValue::Decimal(v.to_string()),
            other => other,
        }
    }

    fn named(&self, text: &str) -> Result<NamedType> {
        match self.resolve(text)? {
            TypeRef::Named(named) => Ok(named),
            _ => Err(self
                .ctx
                .invalid_type_expression_error(text, "expected a class, struct or interface type")),
        }
    }

    fn resolve(&self, text: &str) -> Result<TypeRef> {
        let expr = typeexpr::parse(text)
            .map_err(|e| self.ctx.invalid_type_expression_error(text, e.to_string()))?;
        self.resolve_expr(&expr, text)
    }

    fn resolve_expr(&self, expr: &TypeExpr, text: &str) -> Result<TypeRef> {
        match expr {
            TypeExpr::Void => Ok(TypeRef::Void),
            TypeExpr::Dynamic => Ok(TypeRef::Dynamic),
            TypeExpr::Array(element) => Ok(TypeRef::array(self.resolve_expr(element, text)?)),
            TypeExpr::Nullable(inner) => {
                let inner = self.resolve_expr(inner, text)?;
                if !self.table.is_value_type(&inner) {
                    return Ok(TypeRef::annotated(inner));
                }
                match self.lookup(None, "System.Nullable`1")? {
                    Some(nullable) => Ok(TypeRef::named(nullable, vec![inner])),
                    None => Ok(TypeRef::annotated(inner)),
                }
            }
            TypeExpr::Named { module, name, args } => {
                if module.is_none() && args.is_empty() && self.scope.iter().any(|p| p == name) {
                    return Ok(TypeRef::parameter(name.as_str()));
                }

                let keyword = match module {
                    None => typeexpr::keyword_metadata_name(name),
                    Some(_) => None,
                };
                let metadata_name = keyword.unwrap_or(name);
                let handle = self
                    .lookup(module.as_deref(), metadata_name)?
                    .ok_or_else(|| self.ctx.unknown_type_error(name, text))?;

                let arity: usize = self
                    .table
                    .containing_chain(handle)
                    .iter()
                    .map(|h| self.table.type_def(*h).arity())
                    .sum();
                if args.len() != arity {
                    return Err(self.ctx.invalid_type_expression_error(
                        text,
                        format!(
                            "'{}' takes {} type argument(s) but {} were given",
                            name,
                            arity,
                            args.len()
                        ),
                    ));
                }

                let args = args
                    .iter()
                    .map(|arg| self.resolve_expr(arg, text))
                    .collect::<Result<Vec<_>>>()?;
                Ok(TypeRef::named(handle, args))
            }
        }
    }

    /// Find a type by metadata name: in the pinned module if one is given,
    /// otherwise in the declaring module first and then in every module in
    /// file order.
    fn lookup(&self, module: Option<&str>, metadata_name: &str) -> Result<Option<TypeHandle>> {
        if let Some(module) = module {
            let id = self
                .table
                .module_by_name(module)
                .ok_or_else(|| self.ctx.unknown_module_error(module))?;
            return Ok(self.table.type_in_module(id, metadata_name));
        }

        let mut order = vec![self.home, self.table.current_module()];
        order.extend(self.table.referenced_modules());
        Ok(order
            .into_iter()
            .find_map(|m| self.table.type_in_module(m, metadata_name)))
    }
}

/// Plain values map to `bool`, `int` (`long` when out of range), `double`
/// and `string`; arrays and `typeof` arguments have no scalar form.
fn scalar_value(value: &ValueSchema) -> Option<ConstantValue> {
    match value {
        ValueSchema::Bool(v) => Some(ConstantValue::Bool(*v)),
        ValueSchema::Integer(v) => Some(
            i32::try_from(*v)
                .map(ConstantValue::Int32)
                .unwrap_or(ConstantValue::Int64(*v)),
        ),
        ValueSchema::Float(v) => Some(ConstantValue::Double(*v)),
        ValueSchema::Text(v) => Some(ConstantValue::String(v.clone())),
        ValueSchema::Typed(v) => Some(v.clone()),
        ValueSchema::Array(_) | ValueSchema::Type { .. } => None,
    }
}

fn narrow_integer(value: i64, target: &str) -> Option<ConstantValue> {
    let narrowed = match target {
        "SByte" => ConstantValue::SByte(i8::try_from(value).ok()?),
        "Byte" => ConstantValue::Byte(u8::try_from(value).ok()?),
        "Int16" => ConstantValue::Int16(i16::try_from(value).ok()?),
        "UInt16" => ConstantValue::UInt16(u16::try_from(value).ok()?),
        "Int32" => ConstantValue::Int32(i32::try_from(value).ok()?),
        "UInt32" => ConstantValue::UInt32(u32::try_from(value).ok()?),
        "Int64" => ConstantValue::Int64(value),
        "UInt64" => ConstantValue::UInt64(u64::try_from(value).ok()?),
        "Single" => ConstantValue::Single(value as f32),
        "Double" => ConstantValue::Double(value as f64),
        "Decimal" => ConstantValue::Decimal(value.to_string()),
        _ => return None,
    };
    Some(narrowed)
}

fn parse_primary(keyword: &str, ctx: &SourceContext) -> Result<PrimaryConstraint> {
    match keyword {
        "class" => Ok(PrimaryConstraint::ReferenceType),
        "class?" => Ok(PrimaryConstraint::NullableReferenceType),
        "struct" => Ok(PrimaryConstraint::ValueType),
        "unmanaged" => Ok(PrimaryConstraint::Unmanaged),
        "notnull" => Ok(PrimaryConstraint::NotNull),
        other => Err(ctx.validation_error(
            format!(
                "unknown primary constraint '{}'; expected class, class?, struct, unmanaged or notnull",
                other
            ),
            other,
        )),
    }
}

/// Parse `file:line:column`. The file part may itself contain colons.
fn parse_location(text: &str, ctx: &SourceContext) -> Result<Location> {
    let invalid = || {
        ctx.validation_error(
            format!("invalid location '{}', expected 'file:line:column'", text),
            text,
        )
    };

    let mut parts = text.rsplitn(3, ':');
    let column = parts.next().and_then(|c| c.parse::<u32>().ok());
    let line = parts.next().and_then(|l| l.parse::<u32>().ok());
    let file = parts.next().filter(|f| !f.is_empty());
    match (file, line, column) {
        (Some(file), Some(line), Some(column)) => Ok(Location::new(file, line, column)),
        _ => Err(invalid()),
    }
}
