//! End-to-end generation over hand-built symbol tables.

use asynclift_codegen::{GeneratorOptions, Pipeline, Shape, pipeline::GenerationContext};
use asynclift_symbols::{
    AttributeData, ConstantValue, CoreTypes, Location, MethodDef, ParameterDef, PrimaryConstraint,
    SymbolQuery, SymbolTable, TypeDef, TypeHandle, TypeParameterDef, TypeRef, TypedConstant,
    corelib,
};
use insta::assert_snapshot;

const MARKER: &str = "AsyncLift.LiftAttribute";
const TYPE_MARKER: &str = "AsyncLift.LiftExtensionsAttribute";

struct Fixture {
    table: SymbolTable,
    core: CoreTypes,
}

impl Fixture {
    fn new() -> Self {
        let mut table = SymbolTable::new("App");
        let core = corelib::install(&mut table);
        Self { table, core }
    }

    fn add(&mut self, def: TypeDef) -> TypeHandle {
        let app = self.table.current_module();
        self.table.add_type(app, def)
    }

    fn run(&self) -> GenerationContext<'_> {
        Pipeline::new()
            .run(&self.table, GeneratorOptions::default())
            .expect("pipeline should succeed")
    }
}

fn marked(method: MethodDef) -> MethodDef {
    method.attribute(AttributeData::new(MARKER))
}

fn text(s: &str) -> TypedConstant {
    TypedConstant::Value(ConstantValue::String(s.to_string()))
}

#[test]
fn test_unmarked_types_generate_nothing() {
    let mut f = Fixture::new();
    let task = f.core.task_ref();
    f.add(
        TypeDef::class("Demo", "Person")
            .public()
            .method(MethodDef::new("Save", task).public()),
    );

    let ctx = f.run();

    assert!(ctx.units.is_empty());
    assert!(ctx.diagnostics.is_empty());
}

#[test]
fn test_deferred_member_on_default_receiver() {
    let mut f = Fixture::new();
    let task = f.core.task_ref();
    f.add(
        TypeDef::class("Demo", "Person")
            .public()
            .attribute(AttributeData::new(TYPE_MARKER).arg(TypedConstant::Array(Vec::new())))
            .method(marked(MethodDef::new("Save", task).public())),
    );

    let ctx = f.run();

    assert!(ctx.diagnostics.is_empty());
    assert_eq!(ctx.units.len(), 1);
    assert_eq!(ctx.units[0].file_name, "PersonGeneratedExtensions.g.cs");
    assert_snapshot!(ctx.units[0].content, @r#"
// <auto-generated/>
#nullable enable
namespace Demo
{
    public static class PersonGeneratedExtensions
    {
        public static async System.Threading.Tasks.Task Save(this System.Threading.Tasks.Task<Demo.Person> receiver)
        {
            var instance = await receiver;
            await instance.Save();
        }
    }
}
#nullable disable
"#);
}

#[test]
fn test_sequence_member_becomes_async_sequence() {
    let mut f = Fixture::new();
    let tags = f.core.enumerable_of(f.core.string_ref());
    f.add(
        TypeDef::class("Demo", "Person")
            .public()
            .method(marked(MethodDef::new("Tags", tags).public())),
    );

    let ctx = f.run();

    assert_eq!(ctx.reports()[0].shape, Some(Shape::Sequence));
    assert_snapshot!(ctx.units[0].content, @r#"
// <auto-generated/>
#nullable enable
namespace Demo
{
    public static class PersonGeneratedExtensions
    {
        public static async System.Collections.Generic.IAsyncEnumerable<string> Tags(this System.Threading.Tasks.Task<Demo.Person> receiver)
        {
            var instance = await receiver;
            foreach (var item in instance.Tags())
            {
                yield return item;
            }
        }
    }
}
#nullable disable
"#);
}

#[test]
fn test_static_member_is_reported_and_siblings_survive() {
    let mut f = Fixture::new();
    let task = f.core.task_ref();
    let name = f.core.string_ref();
    f.add(
        TypeDef::class("Demo", "Person")
            .public()
            .method(
                MethodDef::new("Create", task.clone())
                    .public()
                    .static_()
                    .attribute(AttributeData::new(MARKER).at(Location::new("Person.cs", 7, 6))),
            )
            .method(marked(MethodDef::new("Name", name).public())),
    );

    let ctx = f.run();

    assert_eq!(ctx.diagnostics.len(), 1);
    assert_eq!(
        ctx.diagnostics[0].to_string(),
        "error[AL0001]: method 'Demo.Person.Create' is static; only instance methods can be lifted (at Person.cs:7:6)"
    );
    assert_eq!(ctx.units[0].declarations, 1);
    assert_snapshot!(ctx.units[0].content, @r#"
// <auto-generated/>
#nullable enable
namespace Demo
{
    public static class PersonGeneratedExtensions
    {
        public static async System.Threading.Tasks.Task<string> Name(this System.Threading.Tasks.Task<Demo.Person> receiver)
        {
            var instance = await receiver;
            return instance.Name();
        }
    }
}
#nullable disable
"#);
}

#[test]
fn test_two_violations_produce_two_diagnostics() {
    let mut f = Fixture::new();
    let int = f.core.int32_ref();
    f.add(
        TypeDef::class("Demo", "Buffer")
            .public()
            .method(marked(MethodDef::new("Head", int).static_().by_ref_return().public())),
    );

    let ctx = f.run();

    assert_eq!(ctx.error_count(), 2);
    assert!(ctx.units.is_empty());
    assert!(ctx.reports()[0].rejected);
}

#[test]
fn test_generated_names_avoid_user_parameters() {
    let mut f = Fixture::new();
    let text_ty = f.core.string_ref();
    f.add(
        TypeDef::class("Demo", "Person").public().method(marked(
            MethodDef::new("Rename", TypeRef::Void)
                .public()
                .param(ParameterDef::new("receiver", text_ty.clone()))
                .param(ParameterDef::new("instance", text_ty)),
        )),
    );

    let ctx = f.run();

    assert_snapshot!(ctx.units[0].content, @r#"
// <auto-generated/>
#nullable enable
namespace Demo
{
    public static class PersonGeneratedExtensions
    {
        public static async System.Threading.Tasks.Task Rename(this System.Threading.Tasks.Task<Demo.Person> receiver1, string receiver, string instance)
        {
            var instance1 = await receiver1;
            instance1.Rename(receiver, instance);
        }
    }
}
#nullable disable
"#);
}

#[test]
fn test_generic_members_forward_own_type_arguments() {
    let mut f = Fixture::new();
    let task_of_t = f.core.task_of(TypeRef::parameter("T"));
    let items = f.core.enumerable_of(TypeRef::parameter("T"));
    f.add(
        TypeDef::class("Demo", "Repository")
            .public()
            .type_param(TypeParameterDef::new("TKey"))
            .method(marked(
                MethodDef::new("Find", task_of_t)
                    .public()
                    .type_param(
                        TypeParameterDef::new("T")
                            .primary(PrimaryConstraint::ReferenceType)
                            .new_constraint(),
                    )
                    .param(ParameterDef::new("keys", items)),
            )),
    );

    let ctx = f.run();

    assert_snapshot!(ctx.units[0].content, @r#"
// <auto-generated/>
#nullable enable
namespace Demo
{
    public static class RepositoryGeneratedExtensions
    {
        public static async System.Threading.Tasks.Task<T> Find<T, TKey>(this System.Threading.Tasks.Task<Demo.Repository<TKey>> receiver, System.Collections.Generic.IEnumerable<T> keys)
            where T : class, new()
        {
            var instance = await receiver;
            return await instance.Find<T>(keys);
        }
    }
}
#nullable disable
"#);
}

#[test]
fn test_sequences_from_other_modules_are_recognized() {
    let mut f = Fixture::new();
    let shim = f.table.add_module("Shim");
    let local_enumerable = f.table.add_type(
        shim,
        TypeDef::interface("System.Collections.Generic", "IEnumerable")
            .public()
            .type_param(TypeParameterDef::new("T")),
    );
    let ints = TypeRef::named(local_enumerable, vec![f.core.int32_ref()]);
    f.add(
        TypeDef::class("Demo", "Counter")
            .public()
            .method(marked(MethodDef::new("Values", ints).public())),
    );

    let ctx = f.run();

    assert_eq!(ctx.reports()[0].shape, Some(Shape::Sequence));
    assert!(
        ctx.units[0]
            .content
            .contains("System.Collections.Generic.IAsyncEnumerable<int> Values(")
    );
}

#[test]
fn test_builder_marked_containers_are_deferred() {
    let mut f = Fixture::new();
    let builder = f.add(TypeDef::class("Demo", "LaterBuilder").public());
    let later = f.add(
        TypeDef::struct_("Demo", "Later").public().attribute(
            AttributeData::new("System.Runtime.CompilerServices.AsyncMethodBuilderAttribute")
                .arg(TypedConstant::Type(TypeRef::named(builder, Vec::new()))),
        ),
    );
    f.add(
        TypeDef::class("Demo", "Person").public().method(marked(
            MethodDef::new("Wait", TypeRef::named(later, Vec::new())).public(),
        )),
    );

    let ctx = f.run();

    assert_eq!(ctx.reports()[0].shape, Some(Shape::Deferred));
    assert!(
        ctx.units[0]
            .content
            .contains("public static async Demo.Later Wait(")
    );
    assert!(ctx.units[0].content.contains("await instance.Wait();"));
    assert!(!ctx.units[0].content.contains("return await"));
}

#[test]
fn test_overrides_and_global_namespace() {
    let mut f = Fixture::new();
    let task = f.core.task_ref();
    f.add(
        TypeDef::class("", "Widget")
            .public()
            .attribute(
                AttributeData::new(TYPE_MARKER)
                    .arg(text("  WidgetLifts "))
                    .arg(TypedConstant::Array(Vec::new())),
            )
            .method(
                MethodDef::new("Paint", task)
                    .public()
                    .attribute(AttributeData::new("System.ObsoleteAttribute"))
                    .attribute(
                        AttributeData::new(MARKER)
                            .arg(text("PaintLater"))
                            .arg(TypedConstant::Value(ConstantValue::Bool(true))),
                    ),
            ),
    );

    let ctx = f.run();

    assert_eq!(ctx.units[0].file_name, "WidgetLifts.g.cs");
    assert_snapshot!(ctx.units[0].content, @r#"
// <auto-generated/>
#nullable enable
namespace AsyncLiftExtensions
{
    public static class WidgetLifts
    {
        [System.ObsoleteAttribute]
        public static async System.Threading.Tasks.Task PaintLater(this System.Threading.Tasks.Task<Widget> receiver)
        {
            var instance = await receiver;
            await instance.Paint();
        }
    }
}
#nullable disable
"#);
}

#[test]
fn test_runs_are_deterministic() {
    let mut f = Fixture::new();
    let task = f.core.task_ref();
    let tags = f.core.enumerable_of(f.core.string_ref());
    f.add(
        TypeDef::class("Demo", "Person")
            .public()
            .method(marked(MethodDef::new("Save", task.clone()).public()))
            .method(marked(MethodDef::new("Tags", tags).public()))
            .method(marked(MethodDef::new("Drop", task).public().static_())),
    );
    f.add(
        TypeDef::class("Demo", "Order")
            .public()
            .method(marked(MethodDef::new("Ship", TypeRef::Void).public())),
    );

    let first = f.run();
    let second = f.run();

    assert_eq!(first.units, second.units);
    assert_eq!(first.diagnostics, second.diagnostics);
    let names: Vec<&str> = first.units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["PersonGeneratedExtensions", "OrderGeneratedExtensions"]
    );
}
