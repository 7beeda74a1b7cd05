//! Generated units.

use serde::Serialize;

use crate::{
    builder::{CodeBuilder, Indent},
    declaration::ExtensionMethod,
};

const HEADER: &str = "// <auto-generated/>";

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    /// Name of the generated static class.
    pub name: String,
    /// File name the host should use, e.g. `PersonGeneratedExtensions.g.cs`.
    pub file_name: String,
    pub content: String,
    /// Number of declarations in the unit.
    pub declarations: usize,
}

/// Accumulates the declarations of one unit.
///
/// The namespace and class scopes are opened on creation and closed by
/// [`UnitWriter::finish`].
pub struct UnitWriter {
    builder: CodeBuilder,
    name: String,
    declarations: usize,
}

impl UnitWriter {
    pub fn begin(namespace: &str, name: &str, indent: Indent) -> Self {
        let mut builder = CodeBuilder::new(indent);
        builder
            .line(HEADER)
            .line("#nullable enable")
            .line(&format!("namespace {}", namespace))
            .begin_scope()
            .line(&format!("public static class {}", name))
            .begin_scope();

        Self {
            builder,
            name: name.to_string(),
            declarations: 0,
        }
    }

    /// Append a declaration, separated from the previous one by a blank line.
    pub fn push(&mut self, method: &ExtensionMethod) {
        if self.declarations > 0 {
            self.builder.blank();
        }
        self.builder.emit(method);
        self.declarations += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.declarations == 0
    }

    /// Close the scopes and produce the unit, or `None` if nothing was
    /// written.
    pub fn finish(mut self, file_extension: &str) -> Option<GeneratedUnit> {
        if self.is_empty() {
            return None;
        }

        self.builder
            .end_scope()
            .end_scope()
            .line("#nullable disable");

        Some(GeneratedUnit {
            file_name: format!("{}.{}", self.name, file_extension),
            name: self.name,
            content: self.builder.build(),
            declarations: self.declarations,
        })
    }
}
