//! Explain operation - how the pipeline sees each marked method.

use std::path::Path;

use asynclift_codegen::{
    Pipeline, Shape,
    pipeline::phases::{ValidatePhase, validate},
    shape::{AwaiterSource, match_awaitable},
};
use asynclift_snapshot::Snapshot;
use eyre::{Context, Result};

use crate::reports::{
    AwaitInfo, ExplainReport, MemberExplanation, PhaseInfo, RuleInfo, TypeExplanation,
};

/// Execute the explain operation.
pub fn explain(snapshot: &Snapshot, snapshot_path: &Path) -> Result<ExplainReport> {
    let pipeline = Pipeline::new();

    let phases = pipeline
        .phase_info()
        .into_iter()
        .map(|p| PhaseInfo {
            name: p.name.to_string(),
            description: p.description.to_string(),
        })
        .collect();
    let rules = ValidatePhase::new()
        .rule_info()
        .into_iter()
        .map(|r| RuleInfo {
            name: r.name.to_string(),
            description: r.description.to_string(),
        })
        .collect();

    let ctx = pipeline
        .run(&snapshot.table, snapshot.options.clone())
        .wrap_err("Pipeline failed")?;
    let symbols = ctx.symbols;

    let types = ctx
        .candidates
        .iter()
        .map(|candidate| TypeExplanation {
            name: symbols.display_definition(candidate.owner),
            unit: candidate
                .unit
                .clone()
                .unwrap_or_else(|| "none".to_string()),
            namespace: candidate.config.namespace.clone(),
            receivers: candidate.config.receivers.clone(),
            members: candidate
                .members
                .iter()
                .map(|member| {
                    let descriptor = &member.descriptor;
                    let awaiting = match member.shape {
                        Some(Shape::Deferred) => match_awaitable(symbols, &descriptor.return_type)
                            .map(|matched| AwaitInfo {
                                awaiter: symbols.display(&matched.awaiter),
                                result: symbols.display(&matched.result),
                                source: match matched.source {
                                    AwaiterSource::Declared(handle) => {
                                        format!("declared on {}", symbols.display_definition(handle))
                                    }
                                    AwaiterSource::Extension => "extension method".to_string(),
                                },
                            }),
                        _ => None,
                    };
                    MemberExplanation {
                        name: descriptor.qualified_name.clone(),
                        returns: symbols.display(&descriptor.return_type),
                        location: descriptor.location.as_ref().map(|l| l.to_string()),
                        shape: member.shape,
                        awaiting,
                        declarations: member.declarations,
                        diagnostics: validate(symbols, descriptor)
                            .iter()
                            .map(|d| d.to_string())
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect();

    Ok(ExplainReport {
        snapshot_path: snapshot_path.to_path_buf(),
        current_module: symbols.module_name(symbols.current_module()).to_string(),
        phases,
        rules,
        types,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::fixture;

    #[test]
    fn test_explains_members() {
        let report = explain(&fixture::people(), Path::new("people.toml")).expect("explain");

        assert_eq!(report.current_module, "App");
        assert_eq!(report.phases.len(), 4);
        assert_eq!(report.rules.len(), 4);
        assert_eq!(report.types.len(), 1);

        let person = &report.types[0];
        assert_eq!(person.name, "Demo.Person");
        assert_eq!(person.unit, "PersonGeneratedExtensions.g.cs");

        let save = &person.members[0];
        assert_eq!(save.shape, Some(Shape::Deferred));
        let awaiting = save.awaiting.as_ref().expect("Task is awaitable");
        assert_eq!(awaiting.result, "void");
        assert_eq!(
            awaiting.source,
            "declared on System.Threading.Tasks.Task"
        );

        let create = &person.members[2];
        assert_eq!(create.shape, None);
        assert_eq!(create.declarations, 0);
        assert_eq!(create.diagnostics.len(), 1);
    }
}
