//! Fan-out of a catalog into independent output groups.
//!
//! A [`Partition`] borrows the entries it groups; nothing is copied or
//! mutated. Groups keep first-seen order and entries keep input order, so
//! a group can be fed straight into another pass:
//!
//! ```
//! use arcade_sort_core::{CatalogEntry, partition_by_genre, partition_by_manufacturer};
//!
//! let catalog = vec![
//!     CatalogEntry::new("dfeveron").with_genre("Shooter").with_manufacturer("Cave"),
//!     CatalogEntry::new("pacman").with_genre("Maze").with_manufacturer("Namco"),
//! ];
//! let genres = partition_by_genre(&catalog);
//! let shooters = genres.get("Shooter").unwrap();
//! let by_maker = partition_by_manufacturer(shooters.iter(), &["Cave", "Namco"]);
//! assert_eq!(by_maker.len(), 1);
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::model::CatalogEntry;
use crate::predicates::{pick_priority_manufacturer, safe_key};

/// One output group: a key and the entries routed to it.
#[derive(Debug, Clone)]
pub struct Group<'a, K> {
    pub key: K,
    pub entries: Vec<&'a CatalogEntry>,
}

impl<'a, K> Group<'a, K> {
    /// Iterate the group's entries, e.g. as input to a further pass.
    pub fn iter(&self) -> impl Iterator<Item = &'a CatalogEntry> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The result of one partitioning pass.
#[derive(Debug, Clone)]
pub struct Partition<'a, K> {
    groups: Vec<Group<'a, K>>,
    index: HashMap<K, usize>,
    excluded: usize,
}

impl<'a, K: Eq + Hash + Clone> Partition<'a, K> {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
            excluded: 0,
        }
    }

    fn push(&mut self, key: K, entry: &'a CatalogEntry) {
        match self.index.get(&key) {
            Some(&i) => self.groups[i].entries.push(entry),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push(Group {
                    key,
                    entries: vec![entry],
                });
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&Group<'a, K>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&i| &self.groups[i])
    }

    pub fn groups(&self) -> &[Group<'a, K>] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<Group<'a, K>> {
        self.groups
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|g| &g.key)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of input entries that landed in no group.
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Reorder groups by key. Entry order inside groups is untouched.
    pub fn sort_groups_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&K, &K) -> std::cmp::Ordering,
    {
        self.groups.sort_by(|a, b| compare(&a.key, &b.key));
        self.index = self
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.key.clone(), i))
            .collect();
    }
}

/// Route each entry into the group named by `key_fn`.
///
/// Entries for which `key_fn` returns `None` are left out of every group.
pub fn partition<'a, I, K, F>(entries: I, mut key_fn: F) -> Partition<'a, K>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
    K: Eq + Hash + Clone,
    F: FnMut(&CatalogEntry) -> Option<K>,
{
    let mut result = Partition::new();
    for entry in entries {
        match key_fn(entry) {
            Some(key) => result.push(key, entry),
            None => result.excluded += 1,
        }
    }
    result
}

/// Group by file-safe genre. Blank genres land in `Unknown`; the pass is
/// total over its input.
pub fn partition_by_genre<'a, I>(entries: I) -> Partition<'a, String>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    partition(entries, |e| Some(safe_key(&e.genre)))
}

/// Group by priority manufacturer. Entries with no priority match are
/// excluded. Groups are ordered by rank in `priority`.
pub fn partition_by_manufacturer<'a, 'p, I, S>(entries: I, priority: &'p [S]) -> Partition<'a, &'p str>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
    S: AsRef<str>,
{
    let mut result = partition(entries, |e| pick_priority_manufacturer(&e.manufacturer, priority));
    result.sort_groups_by(|a, b| rank(priority, a).cmp(&rank(priority, b)));
    result
}

/// Genre groups under one manufacturer.
#[derive(Debug, Clone)]
pub struct ManufacturerGenre<'a, 'p> {
    pub manufacturer: &'p str,
    pub genres: Partition<'a, String>,
}

/// Two-level grouping: manufacturer outer, genre inner. Entries with no
/// priority manufacturer are excluded.
pub fn partition_by_manufacturer_genre<'a, 'p, I, S>(
    entries: I,
    priority: &'p [S],
) -> Vec<ManufacturerGenre<'a, 'p>>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
    S: AsRef<str>,
{
    partition_by_manufacturer(entries, priority)
        .into_groups()
        .into_iter()
        .map(|group| ManufacturerGenre {
            manufacturer: group.key,
            genres: partition_by_genre(group.entries),
        })
        .collect()
}

fn rank<S: AsRef<str>>(priority: &[S], name: &str) -> usize {
    priority
        .iter()
        .position(|p| p.as_ref() == name)
        .unwrap_or(usize::MAX)
}

#[cfg(test)]
#[path = "tests/partition_tests.rs"]
mod tests;
