use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use arcade_sort_core::{Classifier, ClassifierConfig, MachineRecord};
use arcade_sort_xml::parse_listing_file;

use crate::CliError;

/// Member keys after exclusions, plus how many clones inherit membership.
fn members(classifier: &Classifier, machines: &[MachineRecord]) -> (Vec<String>, usize) {
    let membership = classifier.membership(machines);
    let keys: Vec<String> = membership
        .sorted_keys()
        .into_iter()
        .filter(|k| !classifier.is_excluded(k))
        .map(str::to_string)
        .collect();

    let clones = machines
        .iter()
        .filter(|m| {
            m.cloneof
                .as_deref()
                .is_some_and(|p| keys.binary_search_by(|k| k.as_str().cmp(p)).is_ok())
        })
        .count();

    (keys, clones)
}

/// Print the machines a listing classifies as vertical.
pub(crate) fn run_classify(
    listing: &Path,
    family: Option<String>,
    exclude: Vec<String>,
) -> Result<(), CliError> {
    let machines = parse_listing_file(listing)?;

    let mut config = ClassifierConfig::new().exclude(exclude);
    if let Some(family) = family {
        config = config.family_scope(family);
    }
    let classifier = Classifier::new(config);
    let (keys, clones) = members(&classifier, &machines);

    log::info!(
        "{}",
        format!(
            "{} of {} machines are vertical ({} clones inherit)",
            keys.len(),
            machines.len(),
            clones
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    for key in &keys {
        log::info!("  {}", key);
    }
    Ok(())
}
