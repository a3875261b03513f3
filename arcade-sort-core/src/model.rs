//! Data model for machine listings and front-end catalogs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::OrientationParseError;

// ── Orientation ─────────────────────────────────────────────────────────────

/// Display rotation of a machine's primary screen, as reported by the
/// `rotate` attribute of its `<display>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Normal,
    Rotated90,
    Rotated180,
    Rotated270,
}

impl Orientation {
    /// Map a rotation in degrees to an orientation.
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Self::Normal),
            90 => Some(Self::Rotated90),
            180 => Some(Self::Rotated180),
            270 => Some(Self::Rotated270),
            _ => None,
        }
    }

    pub fn degrees(&self) -> u16 {
        match self {
            Self::Normal => 0,
            Self::Rotated90 => 90,
            Self::Rotated180 => 180,
            Self::Rotated270 => 270,
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

impl std::str::FromStr for Orientation {
    type Err = OrientationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .ok()
            .and_then(Self::from_degrees)
            .ok_or_else(|| OrientationParseError(s.to_string()))
    }
}

// ── Machine listing ─────────────────────────────────────────────────────────

/// A machine definition from the emulator's `-listxml` dump.
///
/// Never mutated after parsing; the classifier only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineRecord {
    pub name: String,
    /// Parent machine for clones. Parent/clone is two levels deep at most.
    pub cloneof: Option<String>,
    /// `None` when the machine has no display (or an unparsable rotation).
    pub orientation: Option<Orientation>,
    /// Driver source file, e.g. `naomi.cpp`.
    pub source_file: String,
    pub description: String,
    pub manufacturer: String,
    pub year: String,
    pub genre: String,
}

impl MachineRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = source_file.into();
        self
    }

    pub fn with_cloneof(mut self, parent: impl Into<String>) -> Self {
        self.cloneof = Some(parent.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────────

/// A front-end catalog entry (one `<game>` of a HyperSpin menu database).
///
/// Absent fields are empty strings; the serializer writes them as empty
/// elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub index: String,
    pub image: String,
    pub description: String,
    /// Parent key for clones; empty when the entry is a parent.
    pub cloneof: String,
    pub crc: String,
    pub manufacturer: String,
    pub year: String,
    pub genre: String,
    pub rating: String,
    pub enabled: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Transcribe a machine record into an enabled catalog entry.
    pub fn from_machine(machine: &MachineRecord) -> Self {
        Self {
            name: machine.name.clone(),
            description: machine.description.clone(),
            cloneof: machine.cloneof.clone().unwrap_or_default(),
            manufacturer: machine.manufacturer.clone(),
            year: machine.year.clone(),
            genre: machine.genre.clone(),
            enabled: "Yes".to_string(),
            ..Self::default()
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    pub fn with_cloneof(mut self, parent: impl Into<String>) -> Self {
        self.cloneof = parent.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// True if the genre is missing or whitespace only.
    pub fn has_blank_genre(&self) -> bool {
        self.genre.trim().is_empty()
    }
}

// ── Membership ──────────────────────────────────────────────────────────────

/// Identity keys belonging to one coarse category (e.g. vertical machines).
///
/// Derived from the machine listing once per run and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMembershipSet {
    keys: HashSet<String>,
}

impl CategoryMembershipSet {
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Member keys in ascending order.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys.iter().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl<S: Into<String>> FromIterator<S> for CategoryMembershipSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
