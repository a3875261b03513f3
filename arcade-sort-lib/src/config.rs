//! Pipeline configuration (`~/.config/arcade-sort/pipeline.toml`).
//!
//! Every variation between runs (family scope, exclusions, the manufacturer
//! priority list, which partition passes to run, sorting) is expressed here
//! rather than in code. [`PipelineConfig::builtin`] reproduces the standard
//! vertical + NAOMI database set.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use arcade_sort_core::{CatalogEntry, ClassifierConfig, MachineRecord, Orientation, safe_key};

use crate::error::PipelineError;

/// Manufacturers that get their own output groups, in tie-break order.
pub const DEFAULT_PRIORITY: &[&str] = &[
    "AMCOE",
    "Atari",
    "Bally",
    "BFM",
    "Capcom",
    "Cave",
    "Data East",
    "Gaelco",
    "IGS",
    "IGT",
    "Irem",
    "Jaleco",
    "Kaneko",
    "Konami",
    "Midway",
    "Namco",
    "Nichibutsu",
    "Nintendo",
    "Novotech",
    "Psikyo",
    "Sammy",
    "Sega",
    "Seibu Kaihatsu",
    "SNK",
    "Taito",
    "Williams",
];

/// NAOMI titles that report a vertical display but are not wanted.
const DEFAULT_NAOMI_EXCLUSIONS: &[&str] = &["quizqgd", "shors2k1", "shorse", "shorsep", "shorsepr"];

/// Canonical path to the pipeline file: `~/.config/arcade-sort/pipeline.toml`.
pub fn config_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("arcade-sort").join("pipeline.toml")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Emulator executable run with `-listxml`.
    pub mame: Option<PathBuf>,
    /// Pre-generated listing file, used instead of running `mame`.
    pub listing: Option<PathBuf>,
    /// Primary HyperSpin database.
    pub catalog: Option<PathBuf>,
    /// Secondary database used to fill in missing genres.
    pub genre_lookup: Option<PathBuf>,
    /// Root of the output hierarchy.
    pub output: PathBuf,
    /// Also write the raw listing as `<output>/mame.xml`.
    pub keep_listing: bool,
    /// File name for the primary catalog with additions merged in.
    pub patched_catalog: Option<String>,
    pub priority: Vec<String>,
    pub additions: Vec<Addition>,
    pub jobs: Vec<JobConfig>,
}

/// The empty configuration. Fields a pipeline file leaves out take these
/// values.
impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mame: None,
            listing: None,
            catalog: None,
            genre_lookup: None,
            output: PathBuf::from("databases"),
            keep_listing: false,
            patched_catalog: None,
            priority: Vec::new(),
            additions: Vec::new(),
            jobs: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// The standard vertical + NAOMI database set for MAME 0.284.
    pub fn builtin() -> Self {
        Self {
            mame: Some(PathBuf::from("mame.exe")),
            listing: None,
            catalog: Some(PathBuf::from("Mame 0.284.xml")),
            genre_lookup: Some(PathBuf::from("Mame 0.284 All games.xml")),
            output: PathBuf::from("databases"),
            keep_listing: true,
            patched_catalog: None,
            priority: DEFAULT_PRIORITY.iter().map(|s| s.to_string()).collect(),
            additions: vec![Addition {
                name: "ddpsdoj".to_string(),
                description: "DoDonPachi SaiDaiOuJou (2012/ 4/20)".to_string(),
                manufacturer: "Cave".to_string(),
                year: "2012".to_string(),
                genre: "Shoot-'Em-Up".to_string(),
                rotate: Some(270),
                ..Addition::default()
            }],
            jobs: vec![
                JobConfig {
                    name: "Mame 0.284 Vertical".to_string(),
                    source: JobSource::Catalog,
                    passes: vec![
                        PassConfig::new(PassKind::Genre, "genres - vertical"),
                        PassConfig::new(PassKind::Manufacturer, "manufacturer - vertical"),
                        PassConfig::new(PassKind::Manufacturer, "manufacturer - shmups")
                            .from_genre("Shoot-'Em-Up"),
                        PassConfig::new(
                            PassKind::ManufacturerGenre,
                            "manufacturer - vertical by genres",
                        ),
                    ],
                    ..JobConfig::default()
                },
                JobConfig {
                    name: "Naomi_Vertical".to_string(),
                    source: JobSource::Machines,
                    // Current dumps qualify the driver with its directory.
                    family_scope: Some("sega/naomi.cpp".to_string()),
                    exclusions: DEFAULT_NAOMI_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
                    backfill: true,
                    passes: vec![PassConfig::new(PassKind::Genre, "genres - naomi")],
                    ..JobConfig::default()
                },
            ],
        }
    }

    /// Load and validate a pipeline file.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents).map_err(|e| match e {
            PipelineError::Config(msg) => {
                PipelineError::config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Load from `explicit` if given (it must exist), else from the default
    /// location if present, else [`PipelineConfig::builtin`].
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, PipelineError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = config_path();
        if default_path.exists() {
            log::debug!("Using pipeline config {}", default_path.display());
            Self::load(&default_path)
        } else {
            log::debug!("No pipeline config found, using built-in defaults");
            Ok(Self::builtin())
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, PipelineError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| PipelineError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, PipelineError> {
        toml::to_string_pretty(self).map_err(|e| PipelineError::config(e.to_string()))
    }

    /// Write the config atomically, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        let serialized = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Reject configurations that cannot produce a consistent output set.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let mut names = HashSet::new();
        for job in &self.jobs {
            if job.name.trim().is_empty() {
                return Err(PipelineError::config("Job with an empty name"));
            }
            if safe_key(&job.name) != job.name.trim() {
                return Err(PipelineError::config(format!(
                    "Job name '{}' is not a valid file name",
                    job.name
                )));
            }
            if !names.insert(job.name.as_str()) {
                return Err(PipelineError::config(format!("Duplicate job name '{}'", job.name)));
            }
            for pass in &job.passes {
                if pass.dir.trim().is_empty() {
                    return Err(PipelineError::config(format!(
                        "Pass in job '{}' has an empty dir",
                        job.name
                    )));
                }
                if pass.from_genre.as_deref().is_some_and(|g| g.trim().is_empty()) {
                    return Err(PipelineError::config(format!(
                        "Pass '{}' in job '{}' chains from an empty genre",
                        pass.dir, job.name
                    )));
                }
                if pass.kind.uses_manufacturer() && self.priority.is_empty() {
                    return Err(PipelineError::config(format!(
                        "Job '{}' partitions by manufacturer but the priority list is empty",
                        job.name
                    )));
                }
            }
        }

        let mut additions = HashSet::new();
        for addition in &self.additions {
            if addition.name.trim().is_empty() {
                return Err(PipelineError::config("Addition with an empty name"));
            }
            if !additions.insert(addition.name.as_str()) {
                return Err(PipelineError::config(format!(
                    "Duplicate addition '{}'",
                    addition.name
                )));
            }
            if let Some(rotate) = addition.rotate {
                if Orientation::from_degrees(rotate).is_none() {
                    return Err(PipelineError::config(format!(
                        "Addition '{}' has invalid rotate {}",
                        addition.name, rotate
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn uses_catalog(&self) -> bool {
        self.patched_catalog.is_some() || self.jobs.iter().any(|j| j.source == JobSource::Catalog)
    }

    pub fn uses_lookup(&self) -> bool {
        self.jobs.iter().any(|j| j.backfill)
    }
}

/// Where a job's candidate entries come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobSource {
    /// Filter the primary catalog.
    #[default]
    Catalog,
    /// Transcribe machine records from the listing.
    Machines,
}

/// One output document plus the partition passes run over it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Output document name, written as `<output>/<name>.xml`.
    pub name: String,
    pub source: JobSource,
    /// Driver source file restricting membership, e.g. `naomi.cpp`.
    pub family_scope: Option<String>,
    pub exclusions: Vec<String>,
    /// Fill blank genres from the genre lookup.
    pub backfill: bool,
    /// Sort entries by key (case-insensitive) before output.
    pub sort: bool,
    pub passes: Vec<PassConfig>,
}

impl JobConfig {
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            family_scope: self.family_scope.clone(),
            exclusions: self.exclusions.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassKind {
    /// `<dir>/<genre>.xml`
    Genre,
    /// `<dir>/<manufacturer> Games.xml`
    Manufacturer,
    /// `<dir>/<manufacturer>/<genre>.xml`
    ManufacturerGenre,
}

impl PassKind {
    pub fn uses_manufacturer(&self) -> bool {
        matches!(self, Self::Manufacturer | Self::ManufacturerGenre)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PassConfig {
    pub kind: PassKind,
    /// Output directory, relative to the output root.
    pub dir: String,
    /// Run the pass over one genre group of the job instead of the whole job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_genre: Option<String>,
}

impl PassConfig {
    pub fn new(kind: PassKind, dir: impl Into<String>) -> Self {
        Self {
            kind,
            dir: dir.into(),
            from_genre: None,
        }
    }

    pub fn from_genre(mut self, genre: impl Into<String>) -> Self {
        self.from_genre = Some(genre.into());
        self
    }
}

/// A hand-authored entry for a title the listing omits or mis-describes.
///
/// Additions are standalone parents: they are classified on their own
/// `rotate`/`source_file` data, never through another title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Addition {
    pub name: String,
    pub description: String,
    pub manufacturer: String,
    pub year: String,
    pub genre: String,
    pub rating: String,
    pub crc: String,
    /// Display rotation in degrees (0, 90, 180, 270).
    pub rotate: Option<u16>,
    pub source_file: Option<String>,
}

impl Addition {
    pub fn entry(&self) -> CatalogEntry {
        CatalogEntry {
            name: self.name.clone(),
            description: self.description.clone(),
            crc: self.crc.clone(),
            manufacturer: self.manufacturer.clone(),
            year: self.year.clone(),
            genre: self.genre.clone(),
            rating: self.rating.clone(),
            enabled: "Yes".to_string(),
            ..CatalogEntry::default()
        }
    }

    /// The machine-side view used for classification.
    pub fn machine(&self) -> MachineRecord {
        MachineRecord {
            name: self.name.clone(),
            orientation: self.rotate.and_then(Orientation::from_degrees),
            source_file: self.source_file.clone().unwrap_or_default(),
            description: self.description.clone(),
            manufacturer: self.manufacturer.clone(),
            year: self.year.clone(),
            genre: self.genre.clone(),
            ..MachineRecord::default()
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
