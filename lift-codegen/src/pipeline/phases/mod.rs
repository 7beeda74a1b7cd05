//! Built-in pipeline phases.
//!
//! - [`DiscoverPhase`] - collects candidate types and their marked methods
//! - [`ValidatePhase`] - runs validation rules and rejects failing members
//! - [`ClassifyPhase`] - classifies the return type of each accepted member
//! - [`SynthesizePhase`] - writes the generated units

mod classify;
mod discover;
mod synthesize;
mod validate;

pub use classify::ClassifyPhase;
pub use discover::DiscoverPhase;
pub use synthesize::SynthesizePhase;
pub use validate::{
    ByValueParametersRule, ByValueReturnRule, InstanceMemberRule, Rule, RuleInfo, ValidatePhase,
    VisibleMemberRule, validate,
};
