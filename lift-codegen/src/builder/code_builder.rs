use super::{CodeFragment, Indent, Renderable};

/// Accumulates lines of code at a current indentation depth.
///
/// ```
/// use asynclift_codegen::builder::{CodeBuilder, Indent};
///
/// let mut builder = CodeBuilder::new(Indent::CSHARP);
/// builder
///     .line("namespace Demo")
///     .begin_scope()
///     .line("class Person { }")
///     .end_scope();
///
/// assert_eq!(builder.build(), "namespace Demo\n{\n    class Person { }\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    unit: String,
    depth: usize,
    out: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            unit: indent.unit(),
            depth: 0,
            out: String::new(),
        }
    }

    /// Write `text` at the current depth, followed by a newline.
    pub fn line(&mut self, text: &str) -> &mut Self {
        for _ in 0..self.depth {
            self.out.push_str(&self.unit);
        }
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    /// Never goes below depth zero.
    pub fn dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    pub fn begin_scope(&mut self) -> &mut Self {
        self.line("{").indent()
    }

    pub fn end_scope(&mut self) -> &mut Self {
        self.dedent().line("}")
    }

    /// Apply the fragments of `node` at the current depth.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply(&fragment);
        }
        self
    }

    fn apply(&mut self, fragment: &CodeFragment) {
        match fragment {
            CodeFragment::Line(text) => {
                self.line(text);
            }
            CodeFragment::Blank => {
                self.blank();
            }
            CodeFragment::Scope(body) => {
                self.begin_scope();
                body.iter().for_each(|f| self.apply(f));
                self.end_scope();
            }
            CodeFragment::Indented(body) => {
                self.indent();
                body.iter().for_each(|f| self.apply(f));
                self.dedent();
            }
        }
    }

    pub fn build(self) -> String {
        self.out
    }
}
