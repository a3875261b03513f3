//! The rendered output hierarchy of one run.
//!
//! All documents are rendered into an [`OutputSet`] before anything touches
//! the filesystem, so a failed run never leaves a partial set behind. Each
//! file is written through a temporary sibling and renamed into place.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::error::PipelineError;

/// One complete output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    /// Path relative to the output root.
    pub path: PathBuf,
    pub contents: Vec<u8>,
    /// Number of catalog entries in the document (0 for non-menu files).
    pub entries: usize,
}

/// Reported after each document is written.
#[derive(Debug, Clone, Copy)]
pub struct WriteProgress<'a> {
    pub document: &'a OutputDocument,
    pub index: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default)]
pub struct OutputSet {
    documents: Vec<OutputDocument>,
    /// Lowercased paths, since the output root may be case-insensitive.
    paths: HashSet<String>,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document. Two documents may not share a path (compared without
    /// regard to case), and paths must stay inside the output root.
    pub fn push(
        &mut self,
        path: impl Into<PathBuf>,
        contents: impl Into<Vec<u8>>,
        entries: usize,
    ) -> Result<(), PipelineError> {
        let path = path.into();
        if !is_contained(&path) {
            return Err(PipelineError::output(format!(
                "Output path escapes the output root: {}",
                path.display()
            )));
        }
        if !self.paths.insert(path.to_string_lossy().to_lowercase()) {
            return Err(PipelineError::output(format!(
                "Two documents would be written to {}",
                path.display()
            )));
        }
        self.documents.push(OutputDocument {
            path,
            contents: contents.into(),
            entries,
        });
        Ok(())
    }

    pub fn documents(&self) -> &[OutputDocument] {
        &self.documents
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&OutputDocument> {
        self.documents.iter().find(|d| d.path == path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Write every document under `root`, calling `on_written` after each.
    pub fn write_to<F>(&self, root: &Path, mut on_written: F) -> Result<(), PipelineError>
    where
        F: FnMut(WriteProgress<'_>),
    {
        let total = self.documents.len();
        for (index, doc) in self.documents.iter().enumerate() {
            let target = root.join(&doc.path);
            write_atomic(&target, &doc.contents).map_err(|e| {
                PipelineError::output(format!("Failed to write {}: {}", target.display(), e))
            })?;
            on_written(WriteProgress {
                document: doc,
                index,
                total,
            });
        }
        Ok(())
    }
}

fn is_contained(path: &Path) -> bool {
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

fn write_atomic(target: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut tmp_name = target.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = target.with_file_name(tmp_name);
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, target)
}
