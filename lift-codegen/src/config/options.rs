//! Generator-wide options.

use serde::Deserialize;

use crate::builder::Indent;

/// Options that apply to a whole generation run.
///
/// Every field has a default, so an empty table deserializes to
/// [`GeneratorOptions::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Namespace for units whose type lives in the global namespace.
    pub default_namespace: String,
    /// Qualified name of the attribute that marks methods for lifting.
    pub method_marker: String,
    /// Qualified name of the attribute that configures a type.
    pub type_marker: String,
    /// Receiver container used when a type configures none.
    pub default_receiver: String,
    /// Appended to the type name to form the default unit name.
    pub unit_suffix: String,
    /// Extension of generated unit file names, without the leading dot.
    pub file_extension: String,
    pub indent: Indent,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            default_namespace: "AsyncLiftExtensions".to_string(),
            method_marker: "AsyncLift.LiftAttribute".to_string(),
            type_marker: "AsyncLift.LiftExtensionsAttribute".to_string(),
            default_receiver: "System.Threading.Tasks.Task".to_string(),
            unit_suffix: "GeneratedExtensions".to_string(),
            file_extension: "g.cs".to_string(),
            indent: Indent::CSHARP,
        }
    }
}
