//! Explain command report data structures.

use std::path::PathBuf;

use asynclift_codegen::Shape;

use super::output::{Output, Report};

/// Report data explaining a generation run.
#[derive(Debug)]
pub struct ExplainReport {
    pub snapshot_path: PathBuf,
    pub current_module: String,
    pub phases: Vec<PhaseInfo>,
    pub rules: Vec<RuleInfo>,
    pub types: Vec<TypeExplanation>,
}

/// Pipeline phase information.
#[derive(Debug)]
pub struct PhaseInfo {
    pub name: String,
    pub description: String,
}

/// Validation rule information.
#[derive(Debug)]
pub struct RuleInfo {
    pub name: String,
    pub description: String,
}

/// A type with marked methods.
#[derive(Debug)]
pub struct TypeExplanation {
    pub name: String,
    /// File name of the unit generated for the type.
    pub unit: String,
    pub namespace: String,
    pub receivers: Vec<String>,
    pub members: Vec<MemberExplanation>,
}

/// A marked method.
#[derive(Debug)]
pub struct MemberExplanation {
    pub name: String,
    pub returns: String,
    pub location: Option<String>,
    /// `None` when the method was rejected.
    pub shape: Option<Shape>,
    /// How a deferred return value is awaited.
    pub awaiting: Option<AwaitInfo>,
    pub declarations: usize,
    pub diagnostics: Vec<String>,
}

#[derive(Debug)]
pub struct AwaitInfo {
    pub awaiter: String,
    pub result: String,
    /// Where `GetAwaiter` was found.
    pub source: String,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("asynclift pipeline");
        out.newline();

        out.key_value("Input", &self.snapshot_path.display().to_string());
        out.key_value("Current module", &self.current_module);
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Validation Rules");
        for rule in &self.rules {
            out.list_item(&format!("{}: {}", rule.name, rule.description));
        }
        out.newline();

        if self.types.is_empty() {
            out.preformatted("No marked methods found.");
            return;
        }

        for ty in &self.types {
            out.section(&ty.name);
            out.key_value_indented("unit", &format!("{} (namespace {})", ty.unit, ty.namespace));
            out.key_value_indented("receivers", &ty.receivers.join(", "));
            for member in &ty.members {
                out.list_item(&format!("{} -> {}", member.name, member.returns));
                if let Some(location) = &member.location {
                    out.key_value_indented("at", location);
                }
                match member.shape {
                    Some(shape) => out.key_value_indented("shape", shape.as_str()),
                    None => out.key_value_indented("shape", "rejected"),
                }
                if let Some(awaiting) = &member.awaiting {
                    out.key_value_indented(
                        "awaits",
                        &format!(
                            "{} via {} ({})",
                            awaiting.result, awaiting.awaiter, awaiting.source
                        ),
                    );
                }
                out.key_value_indented("declarations", &member.declarations.to_string());
                for diagnostic in &member.diagnostics {
                    out.key_value_indented("problem", diagnostic);
                }
            }
            out.newline();
        }
    }
}
