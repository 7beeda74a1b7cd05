//! Loading snapshots and generating from them.

use asynclift_codegen::{Pipeline, pipeline::GenerationContext};
use asynclift_snapshot::{Error, Snapshot, SnapshotFile};
use asynclift_symbols::{ConstantValue, SymbolQuery, TypeRef};
use insta::assert_snapshot;

const PEOPLE: &str = r#"
core_library = true

[[modules]]
name = "App"
current = true

[[modules.types]]
namespace = "Demo"
name = "Person"
accessibility = "public"

[[modules.types.methods]]
name = "Latest"
accessibility = "public"
returns = "System.Threading.Tasks.Task`1<Demo.Order>"
attributes = [{ class = "AsyncLift.LiftAttribute" }]

[[modules.types.methods]]
name = "Create"
accessibility = "public"
static = true
returns = "System.Threading.Tasks.Task"
attributes = [{ class = "AsyncLift.LiftAttribute", location = "Person.cs:7:6" }]

[[modules.types]]
namespace = "Demo"
name = "Order"
accessibility = "public"
"#;

fn load(content: &str) -> Snapshot {
    content.parse().expect("snapshot should load")
}

fn generate(snapshot: &Snapshot) -> GenerationContext<'_> {
    Pipeline::new()
        .run(&snapshot.table, snapshot.options.clone())
        .expect("pipeline should succeed")
}

#[test]
fn test_forward_references_resolve() {
    let snapshot = load(PEOPLE);
    let table = &snapshot.table;
    let app = table.current_module();
    let person = table.type_in_module(app, "Demo.Person").expect("person");
    let order = table.type_in_module(app, "Demo.Order").expect("order");

    let latest = &table.type_def(person).methods[0];
    let result = latest.return_type.as_named().expect("named return type");
    assert_eq!(result.args, vec![TypeRef::named(order, Vec::new())]);
}

#[test]
fn test_generation_from_snapshot() {
    let snapshot = load(PEOPLE);
    let ctx = generate(&snapshot);

    assert_eq!(ctx.diagnostics.len(), 1);
    assert_eq!(
        ctx.diagnostics[0].to_string(),
        "error[AL0001]: method 'Demo.Person.Create' is static; only instance methods can be lifted (at Person.cs:7:6)"
    );
    assert_eq!(ctx.units.len(), 1);
    assert_snapshot!(ctx.units[0].content, @r#"
// <auto-generated/>
#nullable enable
namespace Demo
{
    public static class PersonGeneratedExtensions
    {
        public static async System.Threading.Tasks.Task<Demo.Order> Latest(this System.Threading.Tasks.Task<Demo.Person> receiver)
        {
            var instance = await receiver;
            return await instance.Latest();
        }
    }
}
#nullable disable
"#);
}

#[test]
fn test_generator_options_and_defaults() {
    let snapshot = load(
        r#"
        core_library = true

        [generator]
        default_namespace = "Lifted"

        [[modules]]
        name = "App"
        current = true

        [[modules.types]]
        name = "Counter"
        accessibility = "public"
        type_parameters = ["TKey"]

        [[modules.types.methods]]
        name = "Count"
        accessibility = "public"
        returns = "System.Threading.Tasks.Task`1<long>"
        attributes = [{ class = "AsyncLift.LiftAttribute" }]

        [[modules.types.methods.parameters]]
        name = "limit"
        type = "long"
        default = 5
    "#,
    );

    let app = snapshot.table.current_module();
    let counter = snapshot
        .table
        .type_in_module(app, "Counter`1")
        .expect("counter");
    let limit = &snapshot.table.type_def(counter).methods[0].parameters[0];
    assert_eq!(limit.default, Some(ConstantValue::Int64(5)));

    let ctx = generate(&snapshot);
    assert_snapshot!(ctx.units[0].content, @r#"
// <auto-generated/>
#nullable enable
namespace Lifted
{
    public static class CounterGeneratedExtensions
    {
        public static async System.Threading.Tasks.Task<long> Count<TKey>(this System.Threading.Tasks.Task<Counter<TKey>> receiver, long limit = 5L)
        {
            var instance = await receiver;
            return await instance.Count(limit);
        }
    }
}
#nullable disable
"#);
}

#[test]
fn test_nested_types_share_scope_and_namespace() {
    let snapshot = load(
        r#"
        [[modules]]
        name = "App"
        current = true

        [[modules.types]]
        namespace = "Demo"
        name = "Outer"
        type_parameters = ["T"]

        [[modules.types]]
        name = "Inner"
        containing = "Demo.Outer`1"

        [[modules.types.methods]]
        name = "Value"
        returns = "T"
    "#,
    );

    let table = &snapshot.table;
    let app = table.current_module();
    let inner = table
        .type_in_module(app, "Demo.Outer`1+Inner")
        .expect("inner");
    assert_eq!(table.type_def(inner).namespace, "Demo");
    assert_eq!(
        table.type_def(inner).methods[0].return_type,
        TypeRef::parameter("T")
    );
}

#[test]
fn test_nullable_and_module_pinned_types() {
    let snapshot = load(
        r#"
        core_library = true

        [[modules]]
        name = "App"
        current = true

        [[modules.types]]
        namespace = "Demo"
        name = "Person"

        [[modules.types.methods]]
        name = "Age"
        returns = "int?"

        [[modules.types.methods]]
        name = "Nickname"
        returns = "string?"

        [[modules.types.methods]]
        name = "Values"
        returns = "[Shim]System.Collections.Generic.IEnumerable`1<int>"

        [[modules]]
        name = "Shim"

        [[modules.types]]
        namespace = "System.Collections.Generic"
        name = "IEnumerable"
        kind = "interface"
        type_parameters = ["T"]
    "#,
    );

    let table = &snapshot.table;
    let app = table.current_module();
    let person = table.type_def(table.type_in_module(app, "Demo.Person").expect("person"));

    assert_eq!(table.display(&person.methods[0].return_type), "int?");
    assert!(matches!(
        person.methods[0].return_type,
        TypeRef::Named(_)
    ));
    assert!(matches!(
        person.methods[1].return_type,
        TypeRef::Annotated(_)
    ));

    let shim = table.module_by_name("Shim").expect("shim module");
    let values = person.methods[2].return_type.as_named().expect("named");
    assert_eq!(table.type_def(values.definition).module, shim);
}

#[test]
fn test_unknown_type_is_reported() {
    let err = r#"
        [[modules]]
        name = "App"
        current = true

        [[modules.types]]
        name = "Person"

        [[modules.types.methods]]
        name = "Save"
        returns = "System.Threading.Tasks.Task"
    "#
    .parse::<Snapshot>()
    .unwrap_err();

    assert!(matches!(*err, Error::UnknownType { .. }));
    assert_eq!(err.to_string(), "unknown type 'System.Threading.Tasks.Task'");
}

#[test]
fn test_wrong_type_argument_count_is_reported() {
    let err = r#"
        core_library = true

        [[modules]]
        name = "App"
        current = true

        [[modules.types]]
        name = "Person"

        [[modules.types.methods]]
        name = "Save"
        returns = "System.Threading.Tasks.Task`1"
    "#
    .parse::<Snapshot>()
    .unwrap_err();

    assert!(matches!(*err, Error::InvalidTypeExpression { .. }));
}

#[test]
fn test_structural_errors_are_reported() {
    let no_current = r#"
        [[modules]]
        name = "App"
    "#
    .parse::<Snapshot>()
    .unwrap_err();
    assert!(matches!(*no_current, Error::Validation { .. }));

    let duplicate = r#"
        [[modules]]
        name = "App"
        current = true

        [[modules.types]]
        namespace = "Demo"
        name = "Person"

        [[modules.types]]
        namespace = "Demo"
        name = "Person"
    "#
    .parse::<Snapshot>()
    .unwrap_err();
    assert_eq!(
        duplicate.to_string(),
        "type 'Person' is declared twice in module 'App'"
    );

    let orphan = r#"
        [[modules]]
        name = "App"
        current = true

        [[modules.types]]
        name = "Inner"
        containing = "Demo.Outer"
    "#
    .parse::<Snapshot>()
    .unwrap_err();
    assert!(matches!(*orphan, Error::UnknownContainingType { .. }));

    let unknown_module = r#"
        [[modules]]
        name = "App"
        current = true

        [[modules.types]]
        name = "Person"
        base = "[Core]Demo.Entity"
    "#
    .parse::<Snapshot>()
    .unwrap_err();
    assert!(matches!(*unknown_module, Error::UnknownModule { .. }));
}

#[test]
fn test_parse_errors_keep_the_filename() {
    let err = Snapshot::from_str_with_filename("modules = 3", "people.toml").unwrap_err();
    match *err {
        Error::Parse { ref src, .. } => assert_eq!(src.name(), "people.toml"),
        ref other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_snapshot_file_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("people.toml");
    std::fs::write(&path, PEOPLE).expect("write snapshot");

    let file = SnapshotFile::open(&path).expect("open snapshot");
    assert_eq!(file.path(), path.as_path());
    assert_eq!(file.content(), PEOPLE);
    assert!(file.snapshot().table.type_count() > 2);

    let missing = SnapshotFile::open(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(*missing, Error::Io { .. }));
}
