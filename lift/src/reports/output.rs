//! Where reports are written.

/// A line-oriented sink for reports.
///
/// Implementors only decide where a finished line goes. The layout of
/// titles, sections and list items lives in the provided methods so every
/// sink renders a report the same way.
pub trait Output {
    /// Write one line to standard output.
    fn line(&mut self, text: &str);

    /// Write one line to the error stream.
    fn error_line(&mut self, text: &str);

    fn title(&mut self, text: &str) {
        self.line(text);
        self.line(&"=".repeat(text.chars().count()));
    }

    fn section(&mut self, name: &str) {
        self.line(&format!("{}:", name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.line(&format!("{}: {}", key, value));
    }

    /// A key-value pair nested under a list item.
    fn key_value_indented(&mut self, key: &str, value: &str) {
        self.line(&format!("    {}: {}", key, value));
    }

    fn numbered_item(&mut self, index: usize, text: &str) {
        self.line(&format!("  {}. {}", index, text));
    }

    fn list_item(&mut self, text: &str) {
        self.line(&format!("  - {}", text));
    }

    /// A file that was written.
    fn added_item(&mut self, text: &str) {
        self.line(&format!("  + {}", text));
    }

    fn warning(&mut self, msg: &str) {
        self.error_line(msg);
    }

    fn divider(&mut self, label: &str) {
        self.line(&format!("── {} ──", label));
    }

    /// Multi-line text, written unchanged.
    fn preformatted(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    fn newline(&mut self) {
        self.line("");
    }
}

/// Something that renders itself to an [`Output`].
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Writes to stdout and stderr.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn error_line(&mut self, text: &str) {
        eprintln!("{}", text);
    }
}

/// Keeps rendered lines in memory; error lines get a `! ` prefix.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for RecordingOutput {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn error_line(&mut self, text: &str) {
        self.lines.push(format!("! {}", text));
    }
}
