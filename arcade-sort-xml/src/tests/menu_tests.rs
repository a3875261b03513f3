use super::*;

const SAMPLE_MENU: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<menu>
    <header>
        <listname>MAME</listname>
        <lastlistupdate>10/19/2026</lastlistupdate>
        <listversion>0.284</listversion>
        <exporterversion>HyperList</exporterversion>
    </header>
    <game name="ddpdoj" index="true" image="d">
        <description>DoDonPachi Dai-Ou-Jou (V101, Japan)</description>
        <cloneof></cloneof>
        <crc>2a5c1f02</crc>
        <manufacturer>Cave (AMI license)</manufacturer>
        <year>2002</year>
        <genre>Shoot-&apos;Em-Up</genre>
        <rating>Other - NR (Not Rated)</rating>
        <enabled>Yes</enabled>
    </game>
    <game name="ddpdojt" index="" image="">
        <description>DoDonPachi Dai-Ou-Jou Tamashii (V201, China)</description>
        <cloneof>ddpdoj</cloneof>
        <crc />
        <manufacturer>Cave / IGS</manufacturer>
        <year>2010</year>
        <genre>Shoot-'Em-Up</genre>
        <rating />
        <enabled>Yes</enabled>
    </game>
</menu>"#;

#[test]
fn test_parse_menu() {
    let entries = parse_menu(SAMPLE_MENU.as_bytes()).unwrap();
    assert_eq!(entries.len(), 2);

    let doj = &entries[0];
    assert_eq!(doj.name, "ddpdoj");
    assert_eq!(doj.index, "true");
    assert_eq!(doj.image, "d");
    assert_eq!(doj.description, "DoDonPachi Dai-Ou-Jou (V101, Japan)");
    assert_eq!(doj.cloneof, "");
    assert_eq!(doj.crc, "2a5c1f02");
    assert_eq!(doj.manufacturer, "Cave (AMI license)");
    assert_eq!(doj.year, "2002");
    assert_eq!(doj.genre, "Shoot-'Em-Up");
    assert_eq!(doj.rating, "Other - NR (Not Rated)");
    assert_eq!(doj.enabled, "Yes");
}

#[test]
fn test_parse_menu_header_is_skipped() {
    let entries = parse_menu(SAMPLE_MENU.as_bytes()).unwrap();
    assert!(entries.iter().all(|e| e.name != "MAME"));
    assert!(entries.iter().all(|e| e.description != "MAME"));
}

#[test]
fn test_parse_menu_clone_and_empty_elements() {
    let entries = parse_menu(SAMPLE_MENU.as_bytes()).unwrap();
    let tamashii = &entries[1];
    assert_eq!(tamashii.cloneof, "ddpdoj");
    assert_eq!(tamashii.crc, "");
    assert_eq!(tamashii.rating, "");
}

#[test]
fn test_parse_empty_menu() {
    let entries = parse_menu(r#"<?xml version="1.0"?><menu></menu>"#.as_bytes()).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_parse_without_menu_root_is_error() {
    let xml = r#"<?xml version="1.0"?><datafile><game name="x"/></datafile>"#;
    assert!(parse_menu(xml.as_bytes()).is_err());
}

#[test]
fn test_parse_game_without_name_is_error() {
    let xml = r#"<menu><game index=""><description>x</description></game></menu>"#;
    assert!(parse_menu(xml.as_bytes()).is_err());
}

#[test]
fn test_render_menu_layout() {
    let entry = CatalogEntry {
        name: "ddpsdoj".to_string(),
        description: "DoDonPachi SaiDaiOuJou (2012/ 4/20)".to_string(),
        manufacturer: "Cave".to_string(),
        year: "2012".to_string(),
        genre: "Shoot-'Em-Up".to_string(),
        enabled: "Yes".to_string(),
        ..CatalogEntry::default()
    };
    let xml = render_menu([&entry]);
    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<menu>
    <game name="ddpsdoj" index="" image="">
        <description>DoDonPachi SaiDaiOuJou (2012/ 4/20)</description>
        <cloneof />
        <crc />
        <manufacturer>Cave</manufacturer>
        <year>2012</year>
        <genre>Shoot-&apos;Em-Up</genre>
        <rating />
        <enabled>Yes</enabled>
    </game>
</menu>
"#;
    assert_eq!(xml, expected);
}

#[test]
fn test_render_empty_menu() {
    let xml = render_menu(std::iter::empty());
    assert!(xml.ends_with("<menu>\n</menu>\n"));
}

#[test]
fn test_escape_genre_exact_labels_only() {
    assert_eq!(escape_genre("Shoot-'Em-Up"), "Shoot-&apos;Em-Up");
    assert_eq!(escape_genre("Beat-'Em-Up"), "Beat-&apos;Em-Up");
    assert_eq!(escape_genre("Shoot-'Em-Up Clone"), "Shoot-'Em-Up Clone");
    assert_eq!(escape_genre("Rock'n'Roll"), "Rock'n'Roll");
}

#[test]
fn test_render_escapes_markup_but_not_apostrophes() {
    let entry = CatalogEntry::new("a&b")
        .with_description("Tom & Jerry's <Chase>")
        .with_manufacturer("\"Q\" Soft");
    let xml = render_menu([&entry]);
    assert!(xml.contains(r#"<game name="a&amp;b""#));
    assert!(xml.contains("<description>Tom &amp; Jerry's &lt;Chase&gt;</description>"));
    assert!(xml.contains("<manufacturer>\"Q\" Soft</manufacturer>"));
}

#[test]
fn test_rendered_menu_parses_back() {
    let entries = parse_menu(SAMPLE_MENU.as_bytes()).unwrap();
    let xml = render_menu(&entries);
    let reparsed = parse_menu(xml.as_bytes()).unwrap();
    assert_eq!(reparsed, entries);
}

#[test]
fn test_parse_menu_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Mame 0.284.xml");
    std::fs::write(&path, SAMPLE_MENU).unwrap();
    assert_eq!(parse_menu_file(&path).unwrap().len(), 2);
}
