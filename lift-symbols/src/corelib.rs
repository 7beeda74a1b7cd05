//! Well-known core library types.
//!
//! Seeds a `System.Runtime` module with the types the generator recognizes
//! by identity: the task-like containers and their awaiters, the sequence
//! interfaces, the async method builder attribute and the primitive structs
//! that C# spells with keywords.

use crate::{
    MethodDef, ModuleId, ParameterDef, PropertyDef, SymbolTable, TypeDef, TypeHandle,
    TypeParameterDef, TypeRef,
};

/// Name of the seeded module.
pub const MODULE_NAME: &str = "System.Runtime";

/// Handles of the seeded core library types.
#[derive(Debug, Clone, Copy)]
pub struct CoreTypes {
    pub module: ModuleId,
    pub object: TypeHandle,
    pub boolean: TypeHandle,
    pub char: TypeHandle,
    pub string: TypeHandle,
    pub sbyte: TypeHandle,
    pub byte: TypeHandle,
    pub int16: TypeHandle,
    pub uint16: TypeHandle,
    pub int32: TypeHandle,
    pub uint32: TypeHandle,
    pub int64: TypeHandle,
    pub uint64: TypeHandle,
    pub single: TypeHandle,
    pub double: TypeHandle,
    pub decimal: TypeHandle,
    pub nullable: TypeHandle,
    pub action: TypeHandle,
    pub task: TypeHandle,
    pub task_of_t: TypeHandle,
    pub value_task: TypeHandle,
    pub value_task_of_t: TypeHandle,
    pub task_awaiter: TypeHandle,
    pub task_awaiter_of_t: TypeHandle,
    pub value_task_awaiter: TypeHandle,
    pub value_task_awaiter_of_t: TypeHandle,
    pub enumerable: TypeHandle,
    pub async_enumerable: TypeHandle,
    pub async_method_builder: TypeHandle,
}

impl CoreTypes {
    pub fn bool_ref(&self) -> TypeRef {
        TypeRef::named(self.boolean, Vec::new())
    }

    pub fn int32_ref(&self) -> TypeRef {
        TypeRef::named(self.int32, Vec::new())
    }

    pub fn string_ref(&self) -> TypeRef {
        TypeRef::named(self.string, Vec::new())
    }

    pub fn action_ref(&self) -> TypeRef {
        TypeRef::named(self.action, Vec::new())
    }

    pub fn task_ref(&self) -> TypeRef {
        TypeRef::named(self.task, Vec::new())
    }

    pub fn task_of(&self, result: TypeRef) -> TypeRef {
        TypeRef::named(self.task_of_t, vec![result])
    }

    pub fn value_task_of(&self, result: TypeRef) -> TypeRef {
        TypeRef::named(self.value_task_of_t, vec![result])
    }

    pub fn enumerable_of(&self, item: TypeRef) -> TypeRef {
        TypeRef::named(self.enumerable, vec![item])
    }

    pub fn async_enumerable_of(&self, item: TypeRef) -> TypeRef {
        TypeRef::named(self.async_enumerable, vec![item])
    }
}

/// Install the core library as a referenced module of `table`.
pub fn install(table: &mut SymbolTable) -> CoreTypes {
    let module = table.add_module(MODULE_NAME);
    let mut add = |def: TypeDef| table.add_type(module, def.public());

    let object = add(TypeDef::class("System", "Object"));
    let boolean = add(TypeDef::struct_("System", "Boolean"));
    let char = add(TypeDef::struct_("System", "Char"));
    let string = add(TypeDef::class("System", "String"));
    let sbyte = add(TypeDef::struct_("System", "SByte"));
    let byte = add(TypeDef::struct_("System", "Byte"));
    let int16 = add(TypeDef::struct_("System", "Int16"));
    let uint16 = add(TypeDef::struct_("System", "UInt16"));
    let int32 = add(TypeDef::struct_("System", "Int32"));
    let uint32 = add(TypeDef::struct_("System", "UInt32"));
    let int64 = add(TypeDef::struct_("System", "Int64"));
    let uint64 = add(TypeDef::struct_("System", "UInt64"));
    let single = add(TypeDef::struct_("System", "Single"));
    let double = add(TypeDef::struct_("System", "Double"));
    let decimal = add(TypeDef::struct_("System", "Decimal"));
    let nullable = add(
        TypeDef::struct_("System", "Nullable").type_param(TypeParameterDef::new("T")),
    );
    let action = add(TypeDef::delegate("System", "Action"));

    const TASKS: &str = "System.Threading.Tasks";
    const COMPILER: &str = "System.Runtime.CompilerServices";
    const COLLECTIONS: &str = "System.Collections.Generic";

    let task = add(TypeDef::class(TASKS, "Task"));
    let task_of_t = add(TypeDef::class(TASKS, "Task").type_param(TypeParameterDef::new("TResult")));
    let value_task = add(TypeDef::struct_(TASKS, "ValueTask"));
    let value_task_of_t = add(
        TypeDef::struct_(TASKS, "ValueTask").type_param(TypeParameterDef::new("TResult")),
    );
    let task_awaiter = add(TypeDef::struct_(COMPILER, "TaskAwaiter"));
    let task_awaiter_of_t = add(
        TypeDef::struct_(COMPILER, "TaskAwaiter").type_param(TypeParameterDef::new("TResult")),
    );
    let value_task_awaiter = add(TypeDef::struct_(COMPILER, "ValueTaskAwaiter"));
    let value_task_awaiter_of_t = add(
        TypeDef::struct_(COMPILER, "ValueTaskAwaiter").type_param(TypeParameterDef::new("TResult")),
    );
    let enumerable = add(
        TypeDef::interface(COLLECTIONS, "IEnumerable").type_param(TypeParameterDef::new("T")),
    );
    let async_enumerable = add(
        TypeDef::interface(COLLECTIONS, "IAsyncEnumerable").type_param(TypeParameterDef::new("T")),
    );
    let async_method_builder = add(TypeDef::class(COMPILER, "AsyncMethodBuilderAttribute"));

    let result = || TypeRef::parameter("TResult");
    let bool_ref = TypeRef::named(boolean, Vec::new());
    let action_ref = TypeRef::named(action, Vec::new());

    for (awaiter, get_result) in [
        (task_awaiter, TypeRef::Void),
        (task_awaiter_of_t, result()),
        (value_task_awaiter, TypeRef::Void),
        (value_task_awaiter_of_t, result()),
    ] {
        let def = table.type_def_mut(awaiter);
        def.properties
            .push(PropertyDef::new("IsCompleted", bool_ref.clone()));
        def.methods.push(
            MethodDef::new("OnCompleted", TypeRef::Void)
                .public()
                .param(ParameterDef::new("continuation", action_ref.clone())),
        );
        def.methods
            .push(MethodDef::new("GetResult", get_result).public());
    }

    for (container, awaiter) in [
        (task, TypeRef::named(task_awaiter, Vec::new())),
        (task_of_t, TypeRef::named(task_awaiter_of_t, vec![result()])),
        (value_task, TypeRef::named(value_task_awaiter, Vec::new())),
        (
            value_task_of_t,
            TypeRef::named(value_task_awaiter_of_t, vec![result()]),
        ),
    ] {
        table
            .type_def_mut(container)
            .methods
            .push(MethodDef::new("GetAwaiter", awaiter).public());
    }

    CoreTypes {
        module,
        object,
        boolean,
        char,
        string,
        sbyte,
        byte,
        int16,
        uint16,
        int32,
        uint32,
        int64,
        uint64,
        single,
        double,
        decimal,
        nullable,
        action,
        task,
        task_of_t,
        value_task,
        value_task_of_t,
        task_awaiter,
        task_awaiter_of_t,
        value_task_awaiter,
        value_task_awaiter_of_t,
        enumerable,
        async_enumerable,
        async_method_builder,
    }
}
