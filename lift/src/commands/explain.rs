use std::path::PathBuf;

use asynclift_snapshot::SnapshotFile;
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    /// Path to the symbol snapshot
    pub snapshot: PathBuf,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let file = SnapshotFile::open(&self.snapshot).unwrap_or_exit();
        let report = ops::explain(file.snapshot(), file.path())?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
