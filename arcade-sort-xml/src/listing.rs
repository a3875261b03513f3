use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use arcade_sort_core::{MachineRecord, Orientation};

use crate::error::XmlError;

/// Parse a `-listxml` machine dump.
///
/// Only the attributes the pipeline needs are kept: identity, clone parent,
/// driver source file, the first display's rotation, and the descriptive
/// text fields directly under each `<machine>`. Everything else (ROMs,
/// inputs, DIP switches, ...) is skipped.
pub fn parse_listing<R: BufRead>(reader: R) -> Result<Vec<MachineRecord>, XmlError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut machines = Vec::new();

    let mut current: Option<MachineRecord> = None;
    let mut seen_display = false;
    // Depth below the current <machine>; text is only taken at depth 1.
    let mut depth = 0usize;
    let mut current_tag = String::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if current.is_none() {
                    if is_machine_tag(&tag_name) {
                        current = Some(parse_machine_attributes(e)?);
                        seen_display = false;
                        depth = 0;
                    }
                } else {
                    depth += 1;
                    if depth == 1 {
                        if tag_name == "display" && !seen_display {
                            apply_display(current.as_mut(), e)?;
                            seen_display = true;
                        }
                        current_tag = tag_name;
                    }
                }
            }
            Event::Empty(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if current.is_none() {
                    if is_machine_tag(&tag_name) {
                        machines.push(parse_machine_attributes(e)?);
                    }
                } else if depth == 0 && tag_name == "display" && !seen_display {
                    apply_display(current.as_mut(), e)?;
                    seen_display = true;
                }
            }
            Event::Text(ref e) => {
                if depth == 1 {
                    if let Some(ref mut machine) = current {
                        let text = e.unescape()?;
                        match current_tag.as_str() {
                            "description" => machine.description.push_str(&text),
                            "year" => machine.year.push_str(&text),
                            "manufacturer" => machine.manufacturer.push_str(&text),
                            "genre" => machine.genre.push_str(&text),
                            _ => {}
                        }
                    }
                }
            }
            Event::End(ref e) => {
                if current.is_some() {
                    if depth == 0 {
                        let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                        if is_machine_tag(&tag_name) {
                            if let Some(machine) = current.take() {
                                machines.push(machine);
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

    if current.is_some() {
        return Err(XmlError::invalid_document("Listing ended inside a <machine> element"));
    }
    if machines.is_empty() {
        return Err(XmlError::invalid_document("No machines found in listing"));
    }

    log::debug!("Parsed {} machines from listing", machines.len());
    Ok(machines)
}

/// Parse a `-listxml` dump from a file path.
pub fn parse_listing_file(path: &std::path::Path) -> Result<Vec<MachineRecord>, XmlError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_listing(reader)
}

/// Older dumps use `<game>` where current ones use `<machine>`.
fn is_machine_tag(tag: &str) -> bool {
    tag == "machine" || tag == "game"
}

fn parse_machine_attributes(e: &BytesStart<'_>) -> Result<MachineRecord, XmlError> {
    let mut machine = MachineRecord::default();

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.to_string();
        match attr.key.as_ref() {
            b"name" => machine.name = value,
            b"cloneof" if !value.trim().is_empty() => machine.cloneof = Some(value),
            b"sourcefile" => machine.source_file = value,
            _ => {}
        }
    }

    if machine.name.is_empty() {
        return Err(XmlError::invalid_document("Machine without a name attribute"));
    }
    Ok(machine)
}

fn apply_display(machine: Option<&mut MachineRecord>, e: &BytesStart<'_>) -> Result<(), XmlError> {
    let Some(machine) = machine else {
        return Ok(());
    };

    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"rotate" {
            let value = attr.unescape_value()?;
            match value.parse::<Orientation>() {
                Ok(orientation) => machine.orientation = Some(orientation),
                Err(err) => log::debug!("{}: {}", machine.name, err),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/listing_tests.rs"]
mod tests;
