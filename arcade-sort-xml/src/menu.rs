//! HyperSpin menu databases: `<menu>` documents of `<game>` entries.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use arcade_sort_core::CatalogEntry;

use crate::error::XmlError;

/// Genre labels whose apostrophe the front-end expects as `&apos;`.
///
/// Only an exact match is rewritten; any other text keeps its apostrophes.
const APOSTROPHE_GENRES: &[&str] = &["Shoot-'Em-Up", "Beat-'Em-Up"];

/// Parse a menu database.
pub fn parse_menu<R: BufRead>(reader: R) -> Result<Vec<CatalogEntry>, XmlError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut entries = Vec::new();

    let mut saw_menu = false;
    let mut current: Option<CatalogEntry> = None;
    let mut depth = 0usize;
    let mut current_tag = String::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if current.is_some() {
                    depth += 1;
                    if depth == 1 {
                        current_tag = tag_name;
                    }
                } else {
                    match tag_name.as_str() {
                        "menu" => saw_menu = true,
                        "game" => {
                            current = Some(parse_game_attributes(e)?);
                            depth = 0;
                        }
                        _ => {}
                    }
                }
            }
            Event::Empty(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if current.is_none() {
                    match tag_name.as_str() {
                        "menu" => saw_menu = true,
                        "game" => entries.push(parse_game_attributes(e)?),
                        _ => {}
                    }
                }
            }
            Event::Text(ref e) => {
                if depth == 1 {
                    if let Some(ref mut entry) = current {
                        let text = e.unescape()?;
                        if let Some(field) = field_mut(entry, &current_tag) {
                            field.push_str(&text);
                        }
                    }
                }
            }
            Event::End(ref e) => {
                if current.is_some() {
                    if depth == 0 {
                        if e.name().as_ref() == b"game" {
                            if let Some(entry) = current.take() {
                                entries.push(entry);
                            }
                        }
                    } else {
                        depth -= 1;
                        if depth == 0 {
                            current_tag.clear();
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_menu {
        return Err(XmlError::invalid_document("No <menu> root element found"));
    }
    if current.is_some() {
        return Err(XmlError::invalid_document("Menu ended inside a <game> element"));
    }

    log::debug!("Parsed {} menu entries", entries.len());
    Ok(entries)
}

/// Parse a menu database from a file path.
pub fn parse_menu_file(path: &std::path::Path) -> Result<Vec<CatalogEntry>, XmlError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_menu(reader)
}

fn parse_game_attributes(e: &BytesStart<'_>) -> Result<CatalogEntry, XmlError> {
    let mut entry = CatalogEntry::default();

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.to_string();
        match attr.key.as_ref() {
            b"name" => entry.name = value,
            b"index" => entry.index = value,
            b"image" => entry.image = value,
            _ => {}
        }
    }

    if entry.name.is_empty() {
        return Err(XmlError::invalid_document("Game without a name attribute"));
    }
    Ok(entry)
}

fn field_mut<'e>(entry: &'e mut CatalogEntry, tag: &str) -> Option<&'e mut String> {
    match tag {
        "description" => Some(&mut entry.description),
        "cloneof" => Some(&mut entry.cloneof),
        "crc" => Some(&mut entry.crc),
        "manufacturer" => Some(&mut entry.manufacturer),
        "year" => Some(&mut entry.year),
        "genre" => Some(&mut entry.genre),
        "rating" => Some(&mut entry.rating),
        "enabled" => Some(&mut entry.enabled),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Render a complete, self-contained menu document.
pub fn render_menu<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<menu>\n");

    for entry in entries {
        xml.push_str("    <game name=\"");
        xml.push_str(&escape_attr(&entry.name));
        xml.push_str("\" index=\"");
        xml.push_str(&escape_attr(&entry.index));
        xml.push_str("\" image=\"");
        xml.push_str(&escape_attr(&entry.image));
        xml.push_str("\">\n");

        write_tag(&mut xml, "description", &escape_text(&entry.description));
        write_tag(&mut xml, "cloneof", &escape_text(&entry.cloneof));
        write_tag(&mut xml, "crc", &escape_text(&entry.crc));
        write_tag(&mut xml, "manufacturer", &escape_text(&entry.manufacturer));
        write_tag(&mut xml, "year", &escape_text(&entry.year));
        write_tag(&mut xml, "genre", &escape_genre(&entry.genre));
        write_tag(&mut xml, "rating", &escape_text(&entry.rating));
        write_tag(&mut xml, "enabled", &escape_text(&entry.enabled));

        xml.push_str("    </game>\n");
    }

    xml.push_str("</menu>\n");
    xml
}

/// Escape a genre for output, rewriting the apostrophe of the fixed
/// `'Em-Up` labels.
pub fn escape_genre(genre: &str) -> String {
    let escaped = escape_text(genre);
    if APOSTROPHE_GENRES.contains(&genre) {
        escaped.replace('\'', "&apos;")
    } else {
        escaped
    }
}

/// `value` must already be escaped.
fn write_tag(xml: &mut String, tag: &str, value: &str) {
    xml.push_str("        <");
    xml.push_str(tag);
    if value.is_empty() {
        xml.push_str(" />\n");
        return;
    }
    xml.push('>');
    xml.push_str(value);
    xml.push_str("</");
    xml.push_str(tag);
    xml.push_str(">\n");
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
#[path = "tests/menu_tests.rs"]
mod tests;
