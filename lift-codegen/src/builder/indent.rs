use serde::Deserialize;

/// One level of indentation in generated code.
///
/// Deserializes from `"tab"` or `{ spaces = N }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Indent {
    /// Four spaces, the usual C# style.
    pub const CSHARP: Self = Self::Spaces(4);

    /// The text written for one level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(width) => " ".repeat(usize::from(*width)),
            Self::Tab => "\t".to_string(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CSHARP
    }
}
