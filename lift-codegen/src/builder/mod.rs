//! Indentation-aware text building.
//!
//! Declaration models describe themselves as [`CodeFragment`]s through
//! [`Renderable`]; a [`CodeBuilder`] owns the indentation and applies them.

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
