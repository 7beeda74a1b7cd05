use eyre::Result;

use super::GenerationContext;

/// Observes a run from around each phase.
///
/// Both hooks default to doing nothing. An `Err` from either aborts the run.
///
/// ```
/// use asynclift_codegen::pipeline::{GenerationContext, Plugin};
///
/// struct UnitCounter;
///
/// impl Plugin for UnitCounter {
///     fn name(&self) -> &'static str {
///         "unit-counter"
///     }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut GenerationContext<'_>) -> eyre::Result<()> {
///         if phase == "synthesize" {
///             println!("{} unit(s)", ctx.units.len());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut GenerationContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Only called when the phase returned `Ok`.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut GenerationContext<'_>) -> Result<()> {
        Ok(())
    }
}
