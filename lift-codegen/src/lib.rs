//! Extension method generation for asynclift.
//!
//! Given a read-only [`SymbolQuery`](asynclift_symbols::SymbolQuery), this
//! crate finds methods carrying the lift marker and generates, for each one,
//! a static extension method on an awaitable container of the owning type.
//!
//! # Module Organization
//!
//! - [`builder`] - indentation-aware text building (CodeBuilder, CodeFragment)
//! - [`config`] - generator options and marker-driven configuration
//! - [`descriptor`] - everything synthesis needs to know about one member
//! - [`shape`] - return-type classification and awaiter detection
//! - [`declaration`] - the generated extension method model
//! - [`pipeline`] - discover, validate, classify and synthesize phases

pub mod builder;
pub mod config;
pub mod declaration;
pub mod descriptor;
pub mod pipeline;
pub mod shape;
mod unit;

pub use config::{GenerationConfig, GeneratorOptions, MemberOverrides};
pub use pipeline::{Diagnostic, GenerationContext, Pipeline, Severity};
pub use shape::{Shape, classify};
pub use unit::{GeneratedUnit, UnitWriter};
