//! Category classification of catalog entries against the machine listing.
//!
//! Membership is computed once from the machine records. Catalog entries are
//! then tested through [`effective_key`], so a clone is classified exactly
//! like its parent, whatever its own display data says.

use std::collections::HashSet;

use crate::model::{CatalogEntry, CategoryMembershipSet, MachineRecord};
use crate::predicates::{effective_key, is_vertical};

/// Classification settings for one pipeline job.
#[derive(Debug, Clone, Default)]
pub struct ClassifierConfig {
    /// Restrict membership to machines from this driver source file
    /// (compared case-insensitively), e.g. `naomi.cpp`.
    pub family_scope: Option<String>,
    /// Identity keys dropped regardless of computed membership.
    pub exclusions: HashSet<String>,
}

impl ClassifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family_scope(mut self, source_file: impl Into<String>) -> Self {
        self.family_scope = Some(source_file.into());
        self
    }

    pub fn exclude<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.extend(keys.into_iter().map(Into::into));
        self
    }
}

/// Decides which machines and catalog entries belong to the vertical category.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// True if the machine comes from the configured hardware family, or if
    /// no family scope is set.
    pub fn in_scope(&self, machine: &MachineRecord) -> bool {
        match &self.config.family_scope {
            Some(scope) => machine.source_file.trim().eq_ignore_ascii_case(scope.trim()),
            None => true,
        }
    }

    /// Evaluate a machine on its own display and source data.
    ///
    /// Used directly for synthetic additions, which are standalone parents
    /// carrying explicit orientation data.
    pub fn admits_standalone(&self, machine: &MachineRecord) -> bool {
        is_vertical(machine.orientation) && self.in_scope(machine)
    }

    pub fn is_excluded(&self, key: &str) -> bool {
        self.config.exclusions.contains(key)
    }

    /// Compute the set of machine keys satisfying the category predicate.
    pub fn membership(&self, machines: &[MachineRecord]) -> CategoryMembershipSet {
        let set: CategoryMembershipSet = machines
            .iter()
            .filter(|m| self.admits_standalone(m))
            .map(|m| m.name.as_str())
            .collect();

        log::debug!(
            "Classified {} of {} machines as members{}",
            set.len(),
            machines.len(),
            self.config
                .family_scope
                .as_deref()
                .map(|s| format!(" (family: {s})"))
                .unwrap_or_default(),
        );
        set
    }

    /// True if the entry (through its clone parent, if any) is a member and
    /// is not on the exclusion list.
    pub fn is_member(&self, entry: &CatalogEntry, membership: &CategoryMembershipSet) -> bool {
        !self.is_excluded(&entry.name) && membership.contains(effective_key(entry))
    }

    /// Keep only member entries, preserving input order.
    pub fn filter<I>(&self, entries: I, membership: &CategoryMembershipSet) -> Vec<CatalogEntry>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut dropped = 0usize;
        let kept: Vec<CatalogEntry> = entries
            .into_iter()
            .filter(|e| {
                let keep = self.is_member(e, membership);
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();

        log::debug!("Kept {} catalog entries, dropped {}", kept.len(), dropped);
        kept
    }

    /// Convenience: compute membership from `machines` and filter `entries`.
    pub fn classify<I>(&self, machines: &[MachineRecord], entries: I) -> Vec<CatalogEntry>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let membership = self.membership(machines);
        self.filter(entries, &membership)
    }
}

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod tests;
