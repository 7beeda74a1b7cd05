//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod explain;
mod generate;
mod output;

pub use check::CheckReport;
pub use explain::{
    AwaitInfo, ExplainReport, MemberExplanation, PhaseInfo, RuleInfo, TypeExplanation,
};
pub use generate::{GenerateReport, GenerationResult, PreviewFile, WrittenResult};
pub use output::{Report, TerminalOutput};

#[cfg(test)]
pub(crate) use output::RecordingOutput;
