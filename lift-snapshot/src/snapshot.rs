use std::{path::Path, str::FromStr};

use asynclift_codegen::GeneratorOptions;
use asynclift_symbols::SymbolTable;

use crate::{Error, Result, error::SourceContext, load::load, schema::SnapshotSchema};

/// A loaded symbol snapshot: the compilation to generate for and the
/// generator options it was saved with.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub options: GeneratorOptions,
    pub table: SymbolTable,
}

impl FromStr for Snapshot {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "snapshot.toml")
    }
}

impl Snapshot {
    /// Load a snapshot file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Load a snapshot from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let schema: SnapshotSchema = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        let table = load(&schema, &ctx)?;
        Ok(Self {
            options: schema.generator,
            table,
        })
    }
}
