use std::path::{Path, PathBuf};

use crate::{Error, Result, Snapshot};

/// A snapshot file on disk, kept together with its raw content so callers
/// can render diagnostics against it.
#[derive(Debug)]
pub struct SnapshotFile {
    path: PathBuf,
    content: String,
    snapshot: Snapshot,
}

impl SnapshotFile {
    /// Open and load a snapshot file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let snapshot = Snapshot::from_str_with_filename(&content, &path.display().to_string())?;

        Ok(Self {
            path,
            content,
            snapshot,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the loaded snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Take the loaded snapshot.
    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }
}
