/// A piece of generated code, independent of indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeFragment {
    /// One line; the builder adds indentation and the newline.
    Line(String),
    /// An empty line, never indented.
    Blank,
    /// `{`, the body one level deeper, `}`.
    Scope(Vec<CodeFragment>),
    /// The body one level deeper, without braces.
    Indented(Vec<CodeFragment>),
}

impl CodeFragment {
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(text.into())
    }

    pub fn scope(body: Vec<CodeFragment>) -> Self {
        Self::Scope(body)
    }

    pub fn indented(body: Vec<CodeFragment>) -> Self {
        Self::Indented(body)
    }
}

/// Something that can describe itself as code fragments.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl Renderable for CodeFragment {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![self.clone()]
    }
}
