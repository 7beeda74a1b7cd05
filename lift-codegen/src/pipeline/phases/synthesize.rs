//! Synthesize phase - writes one unit per candidate type.

use std::collections::HashSet;

use eyre::Result;

use crate::{
    UnitWriter,
    declaration::synthesize,
    pipeline::{Diagnostic, GenerationContext, Phase},
};

/// Phase that writes the extension declarations of every classified member,
/// once per configured receiver.
///
/// Each candidate type gets its own [`UnitWriter`]; a type whose members
/// were all rejected produces no unit. Class and file names are unique
/// within a run: a class name already used in the same namespace gets a
/// numeric suffix (with a warning), and a file name already used is
/// qualified with the namespace.
pub struct SynthesizePhase;

impl Phase for SynthesizePhase {
    fn name(&self) -> &'static str {
        "synthesize"
    }

    fn description(&self) -> &'static str {
        "Write the generated extension units"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let symbols = ctx.symbols;
        let options = &ctx.options;
        let mut units = Vec::new();
        let mut diagnostics = Vec::new();
        let mut taken = TakenNames::default();

        for candidate in ctx.candidates.iter_mut() {
            let config = &candidate.config;
            let class = taken.class_name(&config.namespace, &config.unit_name);
            let mut writer = UnitWriter::begin(&config.namespace, &class, options.indent);

            for member in candidate.members.iter_mut() {
                let Some(shape) = member.shape else {
                    continue;
                };
                for receiver in &config.receivers {
                    let method = synthesize(
                        symbols,
                        &member.descriptor,
                        shape,
                        &member.overrides,
                        receiver,
                    );
                    writer.push(&method);
                    member.declarations += 1;
                }
            }

            let Some(mut unit) = writer.finish(&options.file_extension) else {
                tracing::debug!(unit = %class, "discarded empty unit");
                continue;
            };

            if class != config.unit_name {
                let mut diagnostic = Diagnostic::warning(
                    self.name(),
                    format!(
                        "class '{}' already exists in namespace '{}'; extensions of '{}' are generated into '{}'",
                        config.unit_name,
                        config.namespace,
                        symbols.display_definition(candidate.owner),
                        class
                    ),
                );
                if let Some(location) = &symbols.type_def(candidate.owner).location {
                    diagnostic = diagnostic.at(location.clone());
                }
                diagnostics.push(diagnostic);
            }

            unit.file_name = taken.file_name(&config.namespace, &unit.file_name);
            taken.claim(&config.namespace, &class, &unit.file_name);
            candidate.unit = Some(unit.file_name.clone());

            tracing::debug!(
                unit = %unit.file_name,
                declarations = unit.declarations,
                "wrote unit"
            );
            units.push(unit);
        }

        ctx.units = units;
        ctx.diagnostics.extend(diagnostics);
        Ok(())
    }
}

/// Class and file names already given to units of this run.
#[derive(Debug, Default)]
struct TakenNames {
    classes: HashSet<(String, String)>,
    files: HashSet<String>,
}

impl TakenNames {
    /// `name`, or `name2`, `name3`... when `namespace` already has it.
    fn class_name(&self, namespace: &str, name: &str) -> String {
        let mut class = name.to_string();
        let mut n = 1;
        while self.classes.contains(&(namespace.to_string(), class.clone())) {
            n += 1;
            class = format!("{}{}", name, n);
        }
        class
    }

    /// `file`, or `file` prefixed with the namespace when already written.
    fn file_name(&self, namespace: &str, file: &str) -> String {
        if !self.files.contains(file) {
            return file.to_string();
        }
        let mut qualified = format!("{}.{}", namespace, file);
        let mut n = 1;
        while self.files.contains(&qualified) {
            n += 1;
            qualified = format!("{}{}.{}", namespace, n, file);
        }
        qualified
    }

    fn claim(&mut self, namespace: &str, class: &str, file: &str) {
        self.classes.insert((namespace.to_string(), class.to_string()));
        self.files.insert(file.to_string());
    }
}

#[cfg(test)]
mod tests {
    use asynclift_symbols::{
        AttributeData, MethodDef, SymbolQuery, SymbolTable, TypeDef, TypeParameterDef, TypeRef,
        TypedConstant, corelib,
    };

    use super::*;
    use crate::{
        config::GeneratorOptions,
        pipeline::phases::{ClassifyPhase, DiscoverPhase, ValidatePhase},
    };

    const MARKER: &str = "AsyncLift.LiftAttribute";

    fn run(table: &SymbolTable) -> GenerationContext<'_> {
        let mut ctx = GenerationContext::new(table, GeneratorOptions::default());
        DiscoverPhase.run(&mut ctx).expect("discover");
        ValidatePhase::new().run(&mut ctx).expect("validate");
        ClassifyPhase.run(&mut ctx).expect("classify");
        SynthesizePhase.run(&mut ctx).expect("synthesize");
        ctx
    }

    #[test]
    fn test_fully_rejected_type_has_no_unit() {
        let mut table = SymbolTable::new("App");
        corelib::install(&mut table);
        let app = table.current_module();
        table.add_type(
            app,
            TypeDef::class("Demo", "Broken").public().method(
                MethodDef::new("Make", TypeRef::Void)
                    .public()
                    .static_()
                    .attribute(AttributeData::new(MARKER)),
            ),
        );

        let ctx = run(&table);

        assert!(ctx.units.is_empty());
        assert_eq!(ctx.error_count(), 1);
    }

    #[test]
    fn test_one_declaration_per_receiver() {
        let mut table = SymbolTable::new("App");
        let core = corelib::install(&mut table);
        let app = table.current_module();
        let receivers = TypedConstant::Array(vec![
            TypedConstant::Type(TypeRef::named(core.task_of_t, Vec::new())),
            TypedConstant::Type(TypeRef::named(core.value_task_of_t, Vec::new())),
        ]);
        table.add_type(
            app,
            TypeDef::class("Demo", "Person")
                .public()
                .attribute(AttributeData::new("AsyncLift.LiftExtensionsAttribute").arg(receivers))
                .method(
                    MethodDef::new("Touch", TypeRef::Void)
                        .public()
                        .attribute(AttributeData::new(MARKER)),
                ),
        );

        let ctx = run(&table);

        assert_eq!(ctx.units.len(), 1);
        let unit = &ctx.units[0];
        assert_eq!(unit.declarations, 2);
        assert!(
            unit.content
                .contains("this System.Threading.Tasks.Task<Demo.Person> receiver")
        );
        assert!(
            unit.content
                .contains("this System.Threading.Tasks.ValueTask<Demo.Person> receiver")
        );
        assert_eq!(ctx.reports()[0].declarations, 2);
    }

    fn marked_type(namespace: &str, name: &str, method: &str) -> TypeDef {
        TypeDef::class(namespace, name).public().method(
            MethodDef::new(method, TypeRef::Void)
                .public()
                .attribute(AttributeData::new(MARKER)),
        )
    }

    #[test]
    fn test_same_name_in_two_namespaces_gets_two_files() {
        let mut table = SymbolTable::new("App");
        corelib::install(&mut table);
        let app = table.current_module();
        table.add_type(app, marked_type("Demo", "Person", "Save"));
        table.add_type(app, marked_type("Other", "Person", "Load"));

        let ctx = run(&table);

        let files: Vec<&str> = ctx.units.iter().map(|u| u.file_name.as_str()).collect();
        assert_eq!(
            files,
            ["PersonGeneratedExtensions.g.cs", "Other.PersonGeneratedExtensions.g.cs"]
        );
        let classes: Vec<&str> = ctx.units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(classes, ["PersonGeneratedExtensions", "PersonGeneratedExtensions"]);
        assert!(ctx.units[0].content.contains("instance.Save()"));
        assert!(ctx.units[1].content.contains("instance.Load()"));
        assert!(ctx.diagnostics.is_empty());
        assert_eq!(
            ctx.candidates[1].unit.as_deref(),
            Some("Other.PersonGeneratedExtensions.g.cs")
        );
    }

    #[test]
    fn test_generic_twin_gets_numbered_class() {
        let mut table = SymbolTable::new("App");
        corelib::install(&mut table);
        let app = table.current_module();
        table.add_type(app, marked_type("Demo", "Repo", "Flush"));
        table.add_type(
            app,
            marked_type("Demo", "Repo", "Store").type_param(TypeParameterDef::new("T")),
        );

        let ctx = run(&table);

        let files: Vec<&str> = ctx.units.iter().map(|u| u.file_name.as_str()).collect();
        assert_eq!(
            files,
            ["RepoGeneratedExtensions.g.cs", "RepoGeneratedExtensions2.g.cs"]
        );
        assert!(
            ctx.units[1]
                .content
                .contains("public static class RepoGeneratedExtensions2")
        );
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(
            ctx.diagnostics[0].message,
            "class 'RepoGeneratedExtensions' already exists in namespace 'Demo'; extensions of 'Demo.Repo<T>' are generated into 'RepoGeneratedExtensions2'"
        );
    }

    #[test]
    fn test_taken_file_names() {
        let mut taken = TakenNames::default();
        taken.claim("Demo", "A", "A.g.cs");
        taken.claim("Other", "A", "Other.A.g.cs");

        assert_eq!(taken.file_name("Third", "B.g.cs"), "B.g.cs");
        assert_eq!(taken.file_name("Third", "A.g.cs"), "Third.A.g.cs");
        assert_eq!(taken.file_name("Other", "A.g.cs"), "Other2.A.g.cs");
        assert_eq!(taken.class_name("Demo", "A"), "A2");
        assert_eq!(taken.class_name("Third", "A"), "A");
    }
}
