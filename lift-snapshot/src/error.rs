use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Box<Error>>;

/// The text and name of the snapshot being loaded. Every error it builds
/// carries both, so miette can point into the file.
#[derive(Debug, Clone)]
pub struct SourceContext {
    text: String,
    name: String,
}

impl SourceContext {
    pub fn new(text: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            name: name.into(),
        }
    }

    fn source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.text.clone())
    }

    /// Best-effort span of a value in the source: the quoted form first,
    /// then any occurrence.
    pub fn span_of(&self, text: &str) -> Option<SourceSpan> {
        if text.is_empty() {
            return None;
        }
        let quoted = format!("\"{}\"", text);
        if let Some(pos) = self.text.find(&quoted) {
            return Some(SourceSpan::from((pos + 1, text.len())));
        }
        self.text
            .find(text)
            .map(|pos| SourceSpan::from((pos, text.len())))
    }

    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.source(),
            span,
            source,
        })
    }

    /// Create a validation error, located at `at` if it can be found.
    pub fn validation_error(&self, message: impl Into<String>, at: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.source(),
            span: self.span_of(at),
            message: message.into(),
        })
    }

    pub fn unknown_type_error(&self, name: &str, expression: &str) -> Box<Error> {
        Box::new(Error::UnknownType {
            src: self.source(),
            span: self.span_of(expression),
            name: name.to_string(),
        })
    }

    pub fn invalid_type_expression_error(
        &self,
        expression: &str,
        reason: impl Into<String>,
    ) -> Box<Error> {
        Box::new(Error::InvalidTypeExpression {
            src: self.source(),
            span: self.span_of(expression),
            expression: expression.to_string(),
            reason: reason.into(),
        })
    }

    pub fn duplicate_type_error(&self, name: &str, module: &str) -> Box<Error> {
        Box::new(Error::DuplicateType {
            src: self.source(),
            span: self.span_of(name),
            name: name.to_string(),
            module: module.to_string(),
        })
    }

    pub fn unknown_module_error(&self, name: &str) -> Box<Error> {
        Box::new(Error::UnknownModule {
            src: self.source(),
            span: self.span_of(name),
            name: name.to_string(),
        })
    }

    pub fn unknown_containing_type_error(&self, name: &str, containing: &str) -> Box<Error> {
        Box::new(Error::UnknownContainingType {
            src: self.source(),
            span: self.span_of(containing),
            name: name.to_string(),
            containing: containing.to_string(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the path of a symbol snapshot written in TOML"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot")]
    #[diagnostic(code(asynclift::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown type '{name}'")]
    #[diagnostic(
        code(asynclift::unknown_type),
        help(
            "use the metadata name with arity, e.g. 'System.Threading.Tasks.Task`1<int>', and set 'core_library = true' for System types"
        )
    )]
    UnknownType {
        #[source_code]
        src: NamedSource<String>,
        #[label("not declared in any module")]
        span: Option<SourceSpan>,
        name: String,
    },

    #[error("invalid type expression '{expression}'")]
    #[diagnostic(code(asynclift::invalid_type_expression), help("{reason}"))]
    InvalidTypeExpression {
        #[source_code]
        src: NamedSource<String>,
        #[label("cannot parse this type")]
        span: Option<SourceSpan>,
        expression: String,
        reason: String,
    },

    #[error("type '{name}' is declared twice in module '{module}'")]
    #[diagnostic(code(asynclift::duplicate_type))]
    DuplicateType {
        #[source_code]
        src: NamedSource<String>,
        #[label("second declaration")]
        span: Option<SourceSpan>,
        name: String,
        module: String,
    },

    #[error("unknown module '{name}'")]
    #[diagnostic(
        code(asynclift::unknown_module),
        help("module references must name a [[modules]] entry")
    )]
    UnknownModule {
        #[source_code]
        src: NamedSource<String>,
        #[label("no such module")]
        span: Option<SourceSpan>,
        name: String,
    },

    #[error("containing type '{containing}' of '{name}' is not declared")]
    #[diagnostic(
        code(asynclift::unknown_containing_type),
        help("declare the containing type earlier in the same module")
    )]
    UnknownContainingType {
        #[source_code]
        src: NamedSource<String>,
        #[label("not declared before this type")]
        span: Option<SourceSpan>,
        name: String,
        containing: String,
    },

    #[error("{message}")]
    #[diagnostic(code(asynclift::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}
