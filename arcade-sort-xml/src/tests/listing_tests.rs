use super::*;

const SAMPLE_LISTING: &str = r#"<?xml version="1.0"?>
<!DOCTYPE mame [
<!ELEMENT mame (machine+)>
<!ATTLIST mame build CDATA #IMPLIED>
]>
<mame build="0.284" debug="no" mameconfig="10">
    <machine name="1942" sourcefile="capcom/1942.cpp">
        <description>1942 (Revision B)</description>
        <year>1984</year>
        <manufacturer>Capcom</manufacturer>
        <rom name="srb-03.m3" size="16384" crc="d9dafcc3"/>
        <chip type="cpu" tag="maincpu" name="Zilog Z80" clock="4000000"/>
        <display tag="screen" type="raster" rotate="270" width="256" height="224" refresh="60"/>
        <input players="2" coins="2">
            <control type="joy" ways="8"/>
        </input>
        <dipswitch name="Cabinet" tag="DSW0" mask="1">
            <dipvalue name="Upright" value="0" default="yes"/>
        </dipswitch>
        <driver status="good" emulation="good"/>
    </machine>
    <machine name="1942a" sourcefile="capcom/1942.cpp" cloneof="1942" romof="1942">
        <description>1942 (Revision A)</description>
        <year>1984</year>
        <manufacturer>Capcom</manufacturer>
    </machine>
    <machine name="ikaruga" sourcefile="sega/naomi.cpp">
        <description>Ikaruga (GDL-0010)</description>
        <year>2001</year>
        <manufacturer>Treasure &amp; Sega</manufacturer>
        <display tag="screen" type="raster" rotate="90" width="640" height="480" refresh="60"/>
        <display tag="sub" type="lcd" rotate="0" width="48" height="32" refresh="60"/>
    </machine>
    <machine name="neogeo" sourcefile="neogeo/neogeo.cpp" isbios="yes">
        <description>Neo-Geo MV-6F</description>
        <display tag="screen" type="raster" rotate="0" width="320" height="224" refresh="59.185606"/>
    </machine>
    <machine name="ls74" sourcefile="machine/74474.cpp" isdevice="yes" runnable="no"/>
</mame>"#;

#[test]
fn test_parse_listing() {
    let machines = parse_listing(SAMPLE_LISTING.as_bytes()).unwrap();
    assert_eq!(machines.len(), 5);

    let m1942 = &machines[0];
    assert_eq!(m1942.name, "1942");
    assert_eq!(m1942.source_file, "capcom/1942.cpp");
    assert_eq!(m1942.description, "1942 (Revision B)");
    assert_eq!(m1942.year, "1984");
    assert_eq!(m1942.manufacturer, "Capcom");
    assert_eq!(m1942.orientation, Some(Orientation::Rotated270));
    assert_eq!(m1942.cloneof, None);
}

#[test]
fn test_clone_without_display() {
    let machines = parse_listing(SAMPLE_LISTING.as_bytes()).unwrap();
    let clone = &machines[1];
    assert_eq!(clone.cloneof.as_deref(), Some("1942"));
    assert_eq!(clone.orientation, None);
}

#[test]
fn test_first_display_wins_and_text_is_unescaped() {
    let machines = parse_listing(SAMPLE_LISTING.as_bytes()).unwrap();
    let ikaruga = &machines[2];
    assert_eq!(ikaruga.orientation, Some(Orientation::Rotated90));
    assert_eq!(ikaruga.manufacturer, "Treasure & Sega");
}

#[test]
fn test_nested_names_do_not_leak_into_fields() {
    let machines = parse_listing(SAMPLE_LISTING.as_bytes()).unwrap();
    // <dipvalue name=...> and <control> must not touch the machine itself
    assert_eq!(machines[0].name, "1942");
    assert!(machines[0].genre.is_empty());
}

#[test]
fn test_empty_machine_element() {
    let machines = parse_listing(SAMPLE_LISTING.as_bytes()).unwrap();
    let device = &machines[4];
    assert_eq!(device.name, "ls74");
    assert_eq!(device.orientation, None);
}

#[test]
fn test_empty_listing_is_error() {
    let xml = r#"<?xml version="1.0"?><mame build="0.284"></mame>"#;
    assert!(parse_listing(xml.as_bytes()).is_err());
}

#[test]
fn test_truncated_listing_is_error() {
    let xml = r#"<mame><machine name="a"><description>A</description>"#;
    assert!(parse_listing(xml.as_bytes()).is_err());
}

#[test]
fn test_garbage_is_error() {
    assert!(parse_listing("mame: unknown option -listxml".as_bytes()).is_err());
}

#[test]
fn test_unparsable_rotation_is_ignored() {
    let xml = r#"<mame><machine name="odd"><display rotate="45"/></machine></mame>"#;
    let machines = parse_listing(xml.as_bytes()).unwrap();
    assert_eq!(machines[0].orientation, None);
}

#[test]
fn test_parse_listing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mame.xml");
    std::fs::write(&path, SAMPLE_LISTING).unwrap();
    let machines = parse_listing_file(&path).unwrap();
    assert_eq!(machines.len(), 5);
}
