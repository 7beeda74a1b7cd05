//! Return-type shape classification.
//!
//! Classification is a pure function of a return type and the symbol table:
//! nothing is cached between calls, and identity is always decided by
//! [`TypeHandle`](asynclift_symbols::TypeHandle) equality rather than by name.
//!
//! The predicates are checked in a fixed order and the first match wins:
//!
//! 1. [`match_builtin_deferred`] - `Task`, `ValueTask` and their generic forms
//! 2. [`match_custom_deferred`] - task-like types with an async method builder
//! 3. [`match_async_sequence`] - `IAsyncEnumerable<T>`
//! 4. [`match_sequence`] - `IEnumerable<T>`
//!
//! Anything else, `void` included, is a [`Shape::PlainValue`].

mod awaitable;
mod predicates;
mod well_known;

use asynclift_symbols::{SymbolQuery, TypeRef};
pub use awaitable::{AwaitMatch, AwaiterSource, match_awaitable};
pub use predicates::{
    DeferredMatch, SequenceMatch, match_async_sequence, match_builtin_deferred,
    match_custom_deferred, match_sequence,
};
use serde::Serialize;
pub use well_known::WellKnownTypes;

/// How a member's return value is consumed by generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// An ordinary value, or nothing at all.
    PlainValue,
    /// A value that has to be awaited.
    Deferred,
    /// `IEnumerable<T>`.
    Sequence,
    /// `IAsyncEnumerable<T>`.
    AsyncSequence,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::PlainValue => "plain value",
            Shape::Deferred => "deferred",
            Shape::Sequence => "sequence",
            Shape::AsyncSequence => "async sequence",
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a return type.
pub fn classify(symbols: &dyn SymbolQuery, return_type: &TypeRef) -> Shape {
    let shape = if match_builtin_deferred(symbols, return_type).is_some() {
        Shape::Deferred
    } else if let Some(matched) = match_custom_deferred(symbols, return_type) {
        tracing::trace!(
            builder = ?matched.builder.as_ref().map(|b| symbols.display(b)),
            "custom task-like type"
        );
        Shape::Deferred
    } else if match_async_sequence(symbols, return_type).is_some() {
        Shape::AsyncSequence
    } else if match_sequence(symbols, return_type).is_some() {
        Shape::Sequence
    } else {
        Shape::PlainValue
    };

    tracing::trace!(
        return_type = %symbols.display(return_type),
        shape = %shape,
        "classified"
    );
    shape
}
