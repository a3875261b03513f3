//! Pure predicates and key transforms over raw record attributes.

use crate::model::{CatalogEntry, Orientation};

/// Group identifier used when a derived key is empty.
pub const UNKNOWN_KEY: &str = "Unknown";

/// Characters that may not appear in a filesystem path component.
const ILLEGAL_PATH_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Separators between co-manufacturers in a raw manufacturer field.
const MANUFACTURER_SEPARATORS: &[char] = &['/', '&', '+'];

/// True iff the display is rotated a quarter turn (90° or 270°).
pub fn is_vertical(orientation: Option<Orientation>) -> bool {
    matches!(
        orientation,
        Some(Orientation::Rotated90 | Orientation::Rotated270)
    )
}

/// The key used for category lookups: the clone parent when present,
/// otherwise the entry itself.
pub fn effective_key(entry: &CatalogEntry) -> &str {
    let parent = entry.cloneof.trim();
    if parent.is_empty() {
        &entry.name
    } else {
        parent
    }
}

/// Strip parenthesized annotations like `(licensed)` and surrounding
/// whitespace from one manufacturer token.
pub fn normalize_manufacturer_token(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw.trim();

    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')') else {
            break;
        };
        out.push_str(rest[..open].trim_end());
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Split a raw manufacturer field into normalized co-manufacturer tokens,
/// dropping empty ones.
pub fn manufacturer_tokens(raw: &str) -> Vec<String> {
    raw.split(MANUFACTURER_SEPARATORS)
        .map(normalize_manufacturer_token)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Resolve a raw manufacturer field to one canonical name from `priority`.
///
/// The field is split on `/`, `&` and `+`. When several tokens are known
/// manufacturers, the one ranked first in `priority` wins, regardless of
/// where it appears in `raw`.
pub fn pick_priority_manufacturer<'p, S: AsRef<str>>(
    raw: &str,
    priority: &'p [S],
) -> Option<&'p str> {
    let tokens = manufacturer_tokens(raw);
    priority
        .iter()
        .map(AsRef::as_ref)
        .find(|name| tokens.iter().any(|t| t == name))
}

/// Make `text` usable as a file or directory name.
///
/// Only ever applied to output-group identifiers, never to data fields.
pub fn safe_key(text: &str) -> String {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !ILLEGAL_PATH_CHARS.contains(c))
        .collect();

    if cleaned.is_empty() {
        UNKNOWN_KEY.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
#[path = "tests/predicates_tests.rs"]
mod tests;
