use std::path::PathBuf;

use asynclift_snapshot::SnapshotFile;
use clap::{Args, ValueEnum};
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the symbol snapshot
    pub snapshot: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let file = SnapshotFile::open(&self.snapshot).unwrap_or_exit();
        let report = ops::check(file.snapshot(), file.path())?;

        match self.format {
            Format::Text => report.render(&mut TerminalOutput::new()),
            Format::Json => {
                let json =
                    serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
                println!("{}", json);
            }
        }

        if !report.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
