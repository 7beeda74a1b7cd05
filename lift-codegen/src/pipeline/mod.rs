//! Generation pipeline.
//!
//! A [`Pipeline`] runs four built-in phases over a read-only symbol table:
//!
//! - discover: find marked methods and resolve their configuration
//! - validate: reject members that cannot be lifted, with diagnostics
//! - classify: decide the [`Shape`](crate::shape::Shape) of each return type
//! - synthesize: write one unit per candidate type
//!
//! Plugins get hooks before and after each phase. Everything a run produces
//! lives in the returned [`GenerationContext`].
//!
//! # Example
//!
//! ```no_run
//! use asynclift_codegen::{GeneratorOptions, pipeline::Pipeline};
//! use asynclift_symbols::SymbolTable;
//!
//! # fn main() -> eyre::Result<()> {
//! let table = SymbolTable::new("App");
//! let ctx = Pipeline::new().run(&table, GeneratorOptions::default())?;
//! for diag in ctx.errors() {
//!     eprintln!("{}", diag);
//! }
//! for unit in &ctx.units {
//!     std::fs::write(&unit.file_name, &unit.content)?;
//! }
//! # Ok(())
//! # }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::{Candidate, CandidateMember, GenerationContext, MemberReport};
pub use diagnostic::{Diagnostic, Severity, USAGE_CATEGORY, USAGE_ID, USAGE_TITLE};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
