//! Runs phases in order with plugin hooks around each.

use asynclift_symbols::SymbolQuery;
use eyre::Result;

use super::{
    GenerationContext, Phase, PhaseInfo, Plugin,
    phases::{ClassifyPhase, DiscoverPhase, SynthesizePhase, ValidatePhase},
};
use crate::config::GeneratorOptions;

/// Drives generation over one symbol table.
///
/// ```
/// use asynclift_codegen::{GeneratorOptions, Pipeline};
/// use asynclift_symbols::SymbolTable;
///
/// let table = SymbolTable::new("App");
/// let ctx = Pipeline::new().run(&table, GeneratorOptions::default())?;
/// assert!(ctx.units.is_empty());
/// # Ok::<(), eyre::Report>(())
/// ```
pub struct Pipeline {
    validation: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// The built-in phases with the default rule set and no plugins.
    pub fn new() -> Self {
        Self {
            validation: ValidatePhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Replace the validate phase, e.g. to run a different rule set.
    pub fn validation(mut self, validation: ValidatePhase) -> Self {
        self.validation = validation;
        self
    }

    /// Append a phase after `synthesize`.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Register a plugin; hooks run in registration order.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Every phase this pipeline runs, in order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        self.all_phases().map(|p| p.info()).collect()
    }

    /// Run discover, validate, classify and synthesize, then any added
    /// phases.
    ///
    /// Diagnostics never abort the run; the returned context carries them.
    /// An `Err` means a phase or plugin failed outright.
    pub fn run<'a>(
        &self,
        symbols: &'a dyn SymbolQuery,
        options: GeneratorOptions,
    ) -> Result<GenerationContext<'a>> {
        let mut ctx = GenerationContext::new(symbols, options);

        for phase in self.all_phases() {
            self.run_phase(phase, &mut ctx)?;
        }

        tracing::debug!(
            units = ctx.units.len(),
            errors = ctx.error_count(),
            "generation finished"
        );
        Ok(ctx)
    }

    fn all_phases(&self) -> impl Iterator<Item = &dyn Phase> {
        let builtin: [&dyn Phase; 4] = [
            &DiscoverPhase,
            &self.validation,
            &ClassifyPhase,
            &SynthesizePhase,
        ];
        builtin
            .into_iter()
            .chain(self.phases.iter().map(|p| p.as_ref()))
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let name = phase.name();
        self.plugins
            .iter()
            .try_for_each(|plugin| plugin.on_before_phase(name, ctx))?;

        tracing::trace!(phase = name, "running phase");
        phase.run(ctx)?;

        self.plugins
            .iter()
            .try_for_each(|plugin| plugin.on_after_phase(name, ctx))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use asynclift_symbols::SymbolTable;

    use super::*;
    use crate::pipeline::Diagnostic;

    /// Logs every hook call as `before:<phase>` or `after:<phase>`.
    #[derive(Default, Clone)]
    struct HookLog(Arc<Mutex<Vec<String>>>);

    impl HookLog {
        fn events(&self) -> Vec<String> {
            self.0.lock().expect("lock").clone()
        }
    }

    impl Plugin for HookLog {
        fn name(&self) -> &'static str {
            "hook-log"
        }

        fn on_before_phase(&self, phase: &str, _ctx: &mut GenerationContext<'_>) -> Result<()> {
            self.0.lock().expect("lock").push(format!("before:{}", phase));
            Ok(())
        }

        fn on_after_phase(&self, phase: &str, _ctx: &mut GenerationContext<'_>) -> Result<()> {
            self.0.lock().expect("lock").push(format!("after:{}", phase));
            Ok(())
        }
    }

    struct Failing;

    impl Plugin for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn on_after_phase(&self, phase: &str, _ctx: &mut GenerationContext<'_>) -> Result<()> {
            eyre::ensure!(phase != "validate", "stop after {}", phase);
            Ok(())
        }
    }

    struct Note;

    impl Phase for Note {
        fn name(&self) -> &'static str {
            "note"
        }

        fn description(&self) -> &'static str {
            "Adds an info diagnostic"
        }

        fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
            ctx.add_diagnostic(Diagnostic::info("note", "ran"));
            Ok(())
        }
    }

    #[test]
    fn test_empty_module_generates_nothing() {
        let table = SymbolTable::new("App");
        let ctx = Pipeline::new()
            .run(&table, GeneratorOptions::default())
            .expect("pipeline should succeed");

        assert!(ctx.candidates.is_empty());
        assert!(ctx.units.is_empty());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_hooks_wrap_each_phase_in_order() {
        let table = SymbolTable::new("App");
        let log = HookLog::default();

        let pipeline = Pipeline::new().phase(Note).plugin(log.clone());
        let ctx = pipeline
            .run(&table, GeneratorOptions::default())
            .expect("pipeline should succeed");

        let events = log.events();
        assert_eq!(events.len(), 10);
        assert_eq!(events[..4], ["before:discover", "after:discover", "before:validate", "after:validate"]);
        assert_eq!(events[8..], ["before:note", "after:note"]);
        assert_eq!(ctx.diagnostics.len(), 1);

        let names: Vec<&str> = pipeline.phase_info().iter().map(|p| p.name).collect();
        assert_eq!(names, ["discover", "validate", "classify", "synthesize", "note"]);
    }

    #[test]
    fn test_plugin_error_stops_the_run() {
        let table = SymbolTable::new("App");
        let log = HookLog::default();

        let result = Pipeline::new()
            .plugin(Failing)
            .plugin(log.clone())
            .run(&table, GeneratorOptions::default());

        let err = result.expect_err("plugin should fail");
        assert_eq!(err.to_string(), "stop after validate");
        assert_eq!(log.events().last().map(String::as_str), Some("before:validate"));
    }
}
