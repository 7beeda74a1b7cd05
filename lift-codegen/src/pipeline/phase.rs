use eyre::Result;

use super::GenerationContext;

/// Name and one-line summary of a phase, as listed by `explain`.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// One step of a [`Pipeline`](super::Pipeline) run.
///
/// Problems with the input belong in `ctx.diagnostics`; returning `Err`
/// aborts the whole run.
pub trait Phase: Send + Sync {
    /// Passed to plugin hooks and used as the `phase` of diagnostics.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
