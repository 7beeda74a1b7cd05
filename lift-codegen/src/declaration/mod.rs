//! Generated extension method declarations.
//!
//! [`synthesize`] builds an [`ExtensionMethod`] from a member descriptor; the
//! model renders itself through [`Renderable`](crate::builder::Renderable).

mod model;
mod synthesize;

pub use model::{ExtensionMethod, ParamSpec, Statement, TypeParamSpec};
pub use synthesize::{accessibility_keyword, synthesize};
