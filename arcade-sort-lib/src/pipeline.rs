//! Job orchestration.
//!
//! A run has three strictly ordered phases:
//!
//! 1. [`Inputs::load`] reads the listing and catalogs; any failure aborts.
//! 2. [`Pipeline::build`] runs every job (classify, merge, partition) and
//!    renders all documents into an [`OutputSet`] in memory.
//! 3. [`Pipeline::run`] writes the set (unless it is a dry run).

use std::path::{Path, PathBuf};

use arcade_sort_core::{
    CatalogEntry, Classifier, GenreLookup, backfill_genres, collapse_duplicates,
    insert_all_absent, insert_if_absent, partition_by_genre, partition_by_manufacturer,
    partition_by_manufacturer_genre, safe_key, sort_by_key,
};
use arcade_sort_xml::{parse_menu_file, render_menu};

use crate::config::{JobConfig, JobSource, PassConfig, PassKind, PipelineConfig};
use crate::error::PipelineError;
use crate::output::{OutputSet, WriteProgress};
use crate::source::{Listing, ListingSource};

/// Everything read from disk (or the emulator) before any job runs.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub listing: Listing,
    pub catalog: Option<Vec<CatalogEntry>>,
    pub lookup: Option<GenreLookup>,
}

impl Inputs {
    /// Load the inputs the configured jobs need.
    pub fn load(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let source = ListingSource::from_paths(config.mame.as_deref(), config.listing.as_deref())?;
        log::info!("Reading machine listing from {}", source.describe());
        let listing = source.load()?;

        let catalog = if config.uses_catalog() {
            let path = config
                .catalog
                .as_deref()
                .ok_or_else(|| PipelineError::config("A job needs `catalog` but none is set"))?;
            Some(load_menu(path, "catalog")?)
        } else {
            None
        };

        let lookup = if config.uses_lookup() {
            let path = config.genre_lookup.as_deref().ok_or_else(|| {
                PipelineError::config("A job backfills genres but `genre_lookup` is not set")
            })?;
            let entries = load_menu(path, "genre lookup")?;
            Some(GenreLookup::from_entries(&entries))
        } else {
            None
        };

        Ok(Self {
            listing,
            catalog,
            lookup,
        })
    }
}

fn load_menu(path: &Path, what: &str) -> Result<Vec<CatalogEntry>, PipelineError> {
    let entries = parse_menu_file(path).map_err(|e| {
        PipelineError::source_unavailable(format!("Failed to load {} {}: {}", what, path.display(), e))
    })?;
    log::info!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Counts for one job, for the run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobReport {
    pub name: String,
    pub members: usize,
    pub entries: usize,
    pub additions: usize,
    pub backfilled: usize,
    pub documents: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub jobs: Vec<JobReport>,
    pub documents: usize,
    pub written: bool,
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load inputs, build every document, then write them under
    /// `config.output`. Nothing is written if any step fails.
    pub fn run<F>(
        &self,
        dry_run: bool,
        on_written: F,
    ) -> Result<(OutputSet, RunSummary), PipelineError>
    where
        F: FnMut(WriteProgress<'_>),
    {
        let inputs = Inputs::load(&self.config)?;
        let (outputs, mut summary) = self.build(&inputs)?;

        if dry_run {
            log::info!("Dry run: {} documents not written", outputs.len());
        } else {
            outputs.write_to(&self.config.output, on_written)?;
            summary.written = true;
        }
        Ok((outputs, summary))
    }

    /// Run every job over `inputs` and render all output documents.
    pub fn build(&self, inputs: &Inputs) -> Result<(OutputSet, RunSummary), PipelineError> {
        let mut outputs = OutputSet::new();
        let mut summary = RunSummary::default();
        let mut admitted = vec![false; self.config.additions.len()];

        if self.config.keep_listing {
            outputs.push("mame.xml", inputs.listing.raw.clone(), 0)?;
        }

        if let Some(name) = &self.config.patched_catalog {
            let catalog = inputs
                .catalog
                .as_ref()
                .ok_or_else(|| PipelineError::config("`patched_catalog` needs `catalog`"))?;
            let mut patched = collapse_duplicates(catalog.clone());
            let added = insert_all_absent(
                &mut patched,
                self.config.additions.iter().map(|a| a.entry()),
            );
            log::info!("Patched catalog: {} additions inserted", added);
            outputs.push(name.as_str(), render_menu(&patched), patched.len())?;
        }

        for job in &self.config.jobs {
            let report = self.build_job(job, inputs, &mut outputs, &mut admitted)?;
            log::info!(
                "{}: {} entries ({} added, {} genres filled), {} documents",
                report.name,
                report.entries,
                report.additions,
                report.backfilled,
                report.documents,
            );
            summary.jobs.push(report);
        }

        for (addition, admitted) in self.config.additions.iter().zip(&admitted) {
            if !admitted {
                log::warn!(
                    "Addition '{}' was not inserted into any job (no job's classification admits it)",
                    addition.name
                );
            }
        }

        summary.documents = outputs.len();
        Ok((outputs, summary))
    }

    fn build_job(
        &self,
        job: &JobConfig,
        inputs: &Inputs,
        outputs: &mut OutputSet,
        admitted: &mut [bool],
    ) -> Result<JobReport, PipelineError> {
        let classifier = Classifier::new(job.classifier_config());
        let machines = &inputs.listing.machines;
        let membership = classifier.membership(machines);

        let candidates: Vec<CatalogEntry> = match job.source {
            JobSource::Catalog => {
                let catalog = inputs.catalog.as_ref().ok_or_else(|| {
                    PipelineError::config(format!("Job '{}' needs `catalog`", job.name))
                })?;
                catalog.clone()
            }
            JobSource::Machines => machines
                .iter()
                .filter(|m| classifier.in_scope(m))
                .map(CatalogEntry::from_machine)
                .collect(),
        };
        let mut entries = classifier.filter(collapse_duplicates(candidates), &membership);

        let mut added = 0;
        for (i, addition) in self.config.additions.iter().enumerate() {
            if classifier.is_excluded(&addition.name)
                || !classifier.admits_standalone(&addition.machine())
            {
                continue;
            }
            admitted[i] = true;
            if insert_if_absent(&mut entries, addition.entry()) {
                added += 1;
            } else {
                log::warn!(
                    "Addition '{}' is already present in '{}', keeping the existing entry",
                    addition.name,
                    job.name
                );
            }
        }

        let backfilled = if job.backfill {
            let lookup = inputs.lookup.as_ref().ok_or_else(|| {
                PipelineError::config(format!("Job '{}' needs `genre_lookup`", job.name))
            })?;
            backfill_genres(&mut entries, lookup)
        } else {
            0
        };

        if job.sort {
            sort_by_key(&mut entries);
        }

        let before = outputs.len();
        outputs.push(
            format!("{}.xml", job.name.trim()),
            render_menu(&entries),
            entries.len(),
        )?;
        for pass in &job.passes {
            self.render_pass(pass, &entries, outputs)?;
        }

        Ok(JobReport {
            name: job.name.clone(),
            members: membership.len(),
            entries: entries.len(),
            additions: added,
            backfilled,
            documents: outputs.len() - before,
        })
    }

    fn render_pass(
        &self,
        pass: &PassConfig,
        entries: &[CatalogEntry],
        outputs: &mut OutputSet,
    ) -> Result<(), PipelineError> {
        let genres;
        let input: Vec<&CatalogEntry> = match &pass.from_genre {
            None => entries.iter().collect(),
            Some(genre) => {
                genres = partition_by_genre(entries);
                match genres.get(safe_key(genre).as_str()) {
                    Some(group) => group.entries.clone(),
                    None => {
                        log::warn!("No entries in genre '{}' for pass '{}'", genre, pass.dir);
                        return Ok(());
                    }
                }
            }
        };

        let dir = PathBuf::from(pass.dir.trim());
        let priority = self.config.priority.as_slice();

        match pass.kind {
            PassKind::Genre => {
                for group in partition_by_genre(input).groups() {
                    outputs.push(
                        dir.join(format!("{}.xml", group.key)),
                        render_menu(group.iter()),
                        group.len(),
                    )?;
                }
            }
            PassKind::Manufacturer => {
                let makers = partition_by_manufacturer(input, priority);
                log::debug!(
                    "{}: {} entries without a priority manufacturer",
                    pass.dir,
                    makers.excluded()
                );
                for group in makers.groups() {
                    outputs.push(
                        dir.join(format!("{} Games.xml", safe_key(group.key))),
                        render_menu(group.iter()),
                        group.len(),
                    )?;
                }
            }
            PassKind::ManufacturerGenre => {
                for maker in partition_by_manufacturer_genre(input, priority) {
                    let maker_dir = dir.join(safe_key(maker.manufacturer));
                    for group in maker.genres.groups() {
                        outputs.push(
                            maker_dir.join(format!("{}.xml", group.key)),
                            render_menu(group.iter()),
                            group.len(),
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
