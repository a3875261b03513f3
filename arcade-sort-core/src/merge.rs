//! Idempotent merge and patch operations keyed by identity.
//!
//! Each operation can be applied any number of times to the same
//! collection; only the first application has an observable effect.

use std::collections::{HashMap, HashSet};

use crate::model::CatalogEntry;

/// Append `candidate` unless an entry with the same key already exists.
///
/// Returns `true` if the candidate was inserted.
pub fn insert_if_absent(entries: &mut Vec<CatalogEntry>, candidate: CatalogEntry) -> bool {
    if entries.iter().any(|e| e.name == candidate.name) {
        log::debug!("'{}' already present, not inserted", candidate.name);
        return false;
    }
    entries.push(candidate);
    true
}

/// Insert every candidate whose key is absent, in candidate order.
///
/// Duplicate keys among the candidates themselves are inserted once.
/// Returns the number of entries added.
pub fn insert_all_absent<I>(entries: &mut Vec<CatalogEntry>, candidates: I) -> usize
where
    I: IntoIterator<Item = CatalogEntry>,
{
    let mut present: HashSet<String> = entries.iter().map(|e| e.name.clone()).collect();
    let before = entries.len();
    for candidate in candidates {
        if present.insert(candidate.name.clone()) {
            entries.push(candidate);
        }
    }
    entries.len() - before
}

/// Drop repeated keys, keeping the first occurrence of each in original
/// order.
pub fn collapse_duplicates(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    let total = entries.len();
    let mut seen = HashSet::with_capacity(total);
    let kept: Vec<CatalogEntry> = entries
        .into_iter()
        .filter(|e| seen.insert(e.name.clone()))
        .collect();

    if kept.len() < total {
        log::debug!("Collapsed {} duplicate entries", total - kept.len());
    }
    kept
}

/// Key → genre lookup used to fill in missing genres.
#[derive(Debug, Clone, Default)]
pub struct GenreLookup {
    genres: HashMap<String, String>,
}

impl GenreLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a catalog. Blank genres are skipped; for repeated keys the
    /// first non-blank genre wins.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a CatalogEntry>,
    {
        entries
            .into_iter()
            .map(|e| (e.name.clone(), e.genre.clone()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.genres.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}

impl FromIterator<(String, String)> for GenreLookup {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut genres = HashMap::new();
        for (key, genre) in iter {
            if genre.trim().is_empty() {
                continue;
            }
            genres.entry(key).or_insert(genre);
        }
        Self { genres }
    }
}

/// Copy genres from `lookup` into entries whose genre is blank.
///
/// Entries that already have a genre are never touched, and entries with
/// no lookup match are left as they are. Returns the number filled.
pub fn backfill_genres(entries: &mut [CatalogEntry], lookup: &GenreLookup) -> usize {
    let mut filled = 0;
    for entry in entries.iter_mut().filter(|e| e.has_blank_genre()) {
        if let Some(genre) = lookup.get(&entry.name) {
            entry.genre = genre.to_string();
            filled += 1;
        }
    }
    filled
}

/// Stable ascending sort by key, ignoring case.
pub fn sort_by_key(entries: &mut [CatalogEntry]) {
    entries.sort_by_cached_key(|e| e.name.to_lowercase());
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
