//! Classify phase - decides the shape of each accepted member.

use eyre::Result;

use crate::{
    pipeline::{GenerationContext, Phase},
    shape::{Shape, classify, match_awaitable},
};

/// Phase that classifies the return type of every member that passed
/// validation.
pub struct ClassifyPhase;

impl Phase for ClassifyPhase {
    fn name(&self) -> &'static str {
        "classify"
    }

    fn description(&self) -> &'static str {
        "Classify return types as plain, deferred, sequence or async sequence"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let symbols = ctx.symbols;

        let members = ctx
            .candidates
            .iter_mut()
            .flat_map(|c| c.members.iter_mut())
            .filter(|m| !m.rejected);

        for member in members {
            let return_type = &member.descriptor.return_type;
            let shape = classify(symbols, return_type);

            if shape == Shape::Deferred && match_awaitable(symbols, return_type).is_none() {
                tracing::debug!(
                    member = %member.descriptor.qualified_name,
                    "deferred return type does not expose an awaiter"
                );
            }
            tracing::debug!(
                member = %member.descriptor.qualified_name,
                shape = %shape,
                "classified member"
            );
            member.shape = Some(shape);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use asynclift_symbols::{
        AttributeData, MethodDef, SymbolQuery, SymbolTable, TypeDef, TypeRef, corelib,
    };

    use super::*;
    use crate::{
        config::GeneratorOptions,
        pipeline::phases::{DiscoverPhase, ValidatePhase},
    };

    const MARKER: &str = "AsyncLift.LiftAttribute";

    #[test]
    fn test_shapes_are_recorded() {
        let mut table = SymbolTable::new("App");
        let core = corelib::install(&mut table);
        let app = table.current_module();
        let marker = || AttributeData::new(MARKER);

        table.add_type(
            app,
            TypeDef::class("Demo", "Person")
                .public()
                .method(
                    MethodDef::new("Name", core.string_ref())
                        .public()
                        .attribute(marker()),
                )
                .method(
                    MethodDef::new("Load", core.task_of(core.int32_ref()))
                        .public()
                        .attribute(marker()),
                )
                .method(
                    MethodDef::new("Tags", core.enumerable_of(core.string_ref()))
                        .public()
                        .attribute(marker()),
                )
                .method(
                    MethodDef::new("Stream", core.async_enumerable_of(core.string_ref()))
                        .public()
                        .attribute(marker()),
                )
                .method(
                    MethodDef::new("Hidden", TypeRef::Void)
                        .static_()
                        .attribute(marker()),
                ),
        );

        let mut ctx = GenerationContext::new(&table, GeneratorOptions::default());
        DiscoverPhase.run(&mut ctx).expect("discover");
        ValidatePhase::new().run(&mut ctx).expect("validate");
        ClassifyPhase.run(&mut ctx).expect("classify");

        let shapes: Vec<Option<Shape>> = ctx.candidates[0]
            .members
            .iter()
            .map(|m| m.shape)
            .collect();
        assert_eq!(
            shapes,
            vec![
                Some(Shape::PlainValue),
                Some(Shape::Deferred),
                Some(Shape::Sequence),
                Some(Shape::AsyncSequence),
                None,
            ]
        );
    }
}
