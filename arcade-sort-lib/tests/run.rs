use std::path::Path;

use arcade_sort_lib::*;
use arcade_sort_xml::parse_menu_file;

const LISTING: &str = r#"<?xml version="1.0"?>
<mame build="0.284">
    <machine name="esprade" sourcefile="cave/cv1k.cpp">
        <description>ESP Ra.De.</description>
        <year>1998</year>
        <manufacturer>Atlus / Cave</manufacturer>
        <display type="raster" rotate="270"/>
    </machine>
    <machine name="espradej" sourcefile="cave/cv1k.cpp" cloneof="esprade">
        <description>ESP Ra.De. (Japan)</description>
        <manufacturer>Atlus / Cave</manufacturer>
        <display type="raster" rotate="0"/>
    </machine>
    <machine name="pacman" sourcefile="namco/pacman.cpp">
        <description>Pac-Man</description>
        <manufacturer>Namco</manufacturer>
        <display type="raster" rotate="90"/>
    </machine>
    <machine name="sf2" sourcefile="capcom/cps1.cpp">
        <manufacturer>Capcom</manufacturer>
        <display type="raster" rotate="0"/>
    </machine>
    <machine name="m1" sourcefile="sega/naomi.cpp">
        <description>Naomi Shooter</description>
        <manufacturer>Sega</manufacturer>
        <display type="raster" rotate="90"/>
    </machine>
    <machine name="quizqgd" sourcefile="sega/naomi.cpp">
        <manufacturer>Sega</manufacturer>
        <display type="raster" rotate="90"/>
    </machine>
</mame>
"#;

const CATALOG: &str = r#"<?xml version="1.0"?>
<menu>
    <header><listname>MAME</listname></header>
    <game name="esprade" index="" image="">
        <description>ESP Ra.De.</description>
        <cloneof></cloneof>
        <manufacturer>Atlus / Cave</manufacturer>
        <year>1998</year>
        <genre>Shoot-'Em-Up</genre>
        <enabled>Yes</enabled>
    </game>
    <game name="espradej" index="" image="">
        <description>ESP Ra.De. (Japan)</description>
        <cloneof>esprade</cloneof>
        <manufacturer>Atlus / Cave</manufacturer>
        <genre>Shoot-'Em-Up</genre>
    </game>
    <game name="pacman" index="" image="">
        <description>Pac-Man</description>
        <manufacturer>Namco</manufacturer>
        <genre>Maze</genre>
    </game>
    <game name="sf2" index="" image="">
        <manufacturer>Capcom</manufacturer>
        <genre>Fighter</genre>
    </game>
</menu>
"#;

const LOOKUP: &str = r#"<menu>
    <game name="m1"><genre>Shooter</genre></game>
</menu>
"#;

fn write_inputs(dir: &Path) {
    std::fs::write(dir.join("mame.xml"), LISTING).unwrap();
    std::fs::write(dir.join("catalog.xml"), CATALOG).unwrap();
    std::fs::write(dir.join("lookup.xml"), LOOKUP).unwrap();
}

fn config_for(dir: &Path) -> PipelineConfig {
    let mut config = PipelineConfig::builtin();
    config.mame = None;
    config.listing = Some(dir.join("mame.xml"));
    config.catalog = Some(dir.join("catalog.xml"));
    config.genre_lookup = Some(dir.join("lookup.xml"));
    config.output = dir.join("out");
    config
}

fn names(path: &Path) -> Vec<String> {
    parse_menu_file(path)
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect()
}

#[test]
fn default_pipeline_writes_full_hierarchy() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let pipeline = Pipeline::new(config_for(dir.path())).unwrap();
    let mut written = 0;
    let (_, summary) = pipeline.run(false, |_| written += 1).unwrap();
    assert!(summary.written);
    assert_eq!(written, summary.documents);

    let out = dir.path().join("out");
    assert_eq!(
        names(&out.join("Mame 0.284 Vertical.xml")),
        vec!["esprade", "espradej", "pacman", "ddpsdoj"]
    );
    assert_eq!(
        names(&out.join("genres - vertical").join("Shoot-'Em-Up.xml")),
        vec!["esprade", "espradej", "ddpsdoj"]
    );
    assert_eq!(
        names(&out.join("manufacturer - vertical").join("Namco Games.xml")),
        vec!["pacman"]
    );
    assert_eq!(
        names(&out.join("manufacturer - shmups").join("Cave Games.xml")),
        vec!["esprade", "espradej", "ddpsdoj"]
    );
    assert!(!out.join("manufacturer - shmups").join("Namco Games.xml").exists());
    assert_eq!(
        names(
            &out.join("manufacturer - vertical by genres")
                .join("Namco")
                .join("Maze.xml")
        ),
        vec!["pacman"]
    );

    assert_eq!(names(&out.join("Naomi_Vertical.xml")), vec!["m1"]);
    assert_eq!(
        names(&out.join("genres - naomi").join("Shooter.xml")),
        vec!["m1"]
    );

    let raw = std::fs::read_to_string(out.join("mame.xml")).unwrap();
    assert_eq!(raw, LISTING);

    let shmups = std::fs::read_to_string(
        out.join("manufacturer - shmups").join("Cave Games.xml"),
    )
    .unwrap();
    assert!(shmups.contains("<genre>Shoot-&apos;Em-Up</genre>"));
    assert!(!shmups.contains("<genre>Shoot-'Em-Up</genre>"));
}

#[test]
fn unavailable_listing_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    std::fs::write(dir.path().join("mame.xml"), "<mame><machine name=").unwrap();

    let pipeline = Pipeline::new(config_for(dir.path())).unwrap();
    let result = pipeline.run(false, |_| {});
    assert!(matches!(result, Err(PipelineError::SourceUnavailable(_))));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn missing_lookup_is_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    std::fs::remove_file(dir.path().join("lookup.xml")).unwrap();

    let pipeline = Pipeline::new(config_for(dir.path())).unwrap();
    let result = pipeline.run(false, |_| {});
    assert!(matches!(result, Err(PipelineError::SourceUnavailable(_))));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn dry_run_renders_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let pipeline = Pipeline::new(config_for(dir.path())).unwrap();
    let (outputs, summary) = pipeline.run(true, |_| panic!("nothing is written")).unwrap();
    assert!(!summary.written);
    assert!(outputs.get("Mame 0.284 Vertical.xml").is_some());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn rerun_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let pipeline = Pipeline::new(config_for(dir.path())).unwrap();

    pipeline.run(false, |_| {}).unwrap();
    let first = std::fs::read(dir.path().join("out").join("Mame 0.284 Vertical.xml")).unwrap();
    pipeline.run(false, |_| {}).unwrap();
    let second = std::fs::read(dir.path().join("out").join("Mame 0.284 Vertical.xml")).unwrap();
    assert_eq!(first, second);
}
