//! Discover phase - finds marked methods in the current module.

use eyre::Result;

use crate::{
    config::{GenerationConfig, MemberOverrides},
    descriptor::MemberDescriptor,
    pipeline::{Candidate, CandidateMember, GenerationContext, Phase},
};

/// Phase that collects every type of the current module with at least one
/// marked method.
///
/// Types are visited in declaration order and methods in member order, so
/// the output of later phases is stable for a given snapshot.
pub struct DiscoverPhase;

impl Phase for DiscoverPhase {
    fn name(&self) -> &'static str {
        "discover"
    }

    fn description(&self) -> &'static str {
        "Find marked methods and resolve their configuration"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let symbols = ctx.symbols;
        let options = &ctx.options;
        let mut candidates = Vec::new();

        for owner in symbols.types_in_module(symbols.current_module()) {
            let def = symbols.type_def(owner);
            let members: Vec<CandidateMember> = def
                .methods
                .iter()
                .filter_map(|m| MemberDescriptor::build(symbols, owner, m, &options.method_marker))
                .map(|descriptor| {
                    let overrides = MemberOverrides::resolve(&descriptor.marker);
                    CandidateMember::new(descriptor, overrides)
                })
                .collect();

            if members.is_empty() {
                continue;
            }

            let config = GenerationConfig::resolve(
                symbols,
                options,
                owner,
                def.find_attribute(&options.type_marker),
            );
            tracing::debug!(
                owner = %symbols.qualified_name(owner),
                members = members.len(),
                unit = %config.unit_name,
                "discovered candidate type"
            );

            candidates.push(Candidate {
                owner,
                config,
                members,
                unit: None,
            });
        }

        ctx.candidates = candidates;
        Ok(())
    }
}
