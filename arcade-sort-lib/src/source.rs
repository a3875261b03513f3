//! Acquisition of the machine listing.
//!
//! The listing is either produced by running the emulator with `-listxml`
//! or read from a previously generated file. Any failure here is fatal for
//! the run: the caller must not write output without a complete listing.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use arcade_sort_core::MachineRecord;
use arcade_sort_xml::parse_listing;

use crate::error::PipelineError;

/// Where the machine listing comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSource {
    /// Run the executable with `-listxml` and capture stdout.
    Command(PathBuf),
    /// Read an existing listing file.
    File(PathBuf),
}

/// A parsed listing together with the raw document it came from.
#[derive(Debug, Clone)]
pub struct Listing {
    pub raw: Vec<u8>,
    pub machines: Vec<MachineRecord>,
}

impl ListingSource {
    /// Pick the source from config values. A listing file takes precedence
    /// over running the emulator.
    pub fn from_paths(mame: Option<&Path>, listing: Option<&Path>) -> Result<Self, PipelineError> {
        match (listing, mame) {
            (Some(file), _) => Ok(Self::File(file.to_path_buf())),
            (None, Some(exe)) => Ok(Self::Command(exe.to_path_buf())),
            (None, None) => Err(PipelineError::config(
                "No machine listing configured: set `mame` or `listing`",
            )),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Command(exe) => format!("{} -listxml", exe.display()),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Produce and parse the listing.
    pub fn load(&self) -> Result<Listing, PipelineError> {
        let raw = match self {
            Self::Command(exe) => run_listxml(exe)?,
            Self::File(path) => std::fs::read(path).map_err(|e| {
                PipelineError::source_unavailable(format!(
                    "Failed to read listing {}: {}",
                    path.display(),
                    e
                ))
            })?,
        };

        let machines = parse_listing(raw.as_slice()).map_err(|e| {
            PipelineError::source_unavailable(format!(
                "Unparsable listing from {}: {}",
                self.describe(),
                e
            ))
        })?;

        log::debug!("Loaded {} machines from {}", machines.len(), self.describe());
        Ok(Listing { raw, machines })
    }
}

fn run_listxml(exe: &Path) -> Result<Vec<u8>, PipelineError> {
    let output = Command::new(exe)
        .arg("-listxml")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| {
            PipelineError::source_unavailable(format!("Failed to run {}: {}", exe.display(), e))
        })?;

    if !output.status.success() {
        return Err(PipelineError::source_unavailable(format!(
            "{} -listxml exited with {}",
            exe.display(),
            output.status
        )));
    }
    Ok(output.stdout)
}
