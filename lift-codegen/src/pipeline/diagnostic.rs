//! Problems found while generating.
//!
//! User-facing problems are reported as [`Diagnostic`] records rather than
//! errors; a member with a diagnostic is skipped and the run continues.

use asynclift_symbols::Location;
use serde::Serialize;

/// Identifier shared by every misuse of the lift marker.
pub const USAGE_ID: &str = "AL0001";
/// Category of [`USAGE_ID`] diagnostics.
pub const USAGE_CATEGORY: &str = "Usage";
/// Title of [`USAGE_ID`] diagnostics.
pub const USAGE_TITLE: &str = "Wrong usage of the lift marker";

/// How bad a [`Diagnostic`] is. Only errors reject a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    pub fn is_error(&self) -> bool {
        *self == Self::Error
    }

    pub fn is_warning(&self) -> bool {
        *self == Self::Warning
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported problem, tagged with the phase that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Stable identifier, e.g. `AL0001`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'static str>,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    pub phase: String,
    pub message: String,
    /// Where the problem was found.
    pub location: Option<Location>,
}

impl Diagnostic {
    fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: None,
            severity,
            category: None,
            title: None,
            phase: phase.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    /// An [`USAGE_ID`] error raised by the validate phase.
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            id: Some(USAGE_ID),
            category: Some(USAGE_CATEGORY),
            title: Some(USAGE_TITLE),
            ..Self::error("validate", message)
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(id) = self.id {
            write!(f, "[{}]", id)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}
