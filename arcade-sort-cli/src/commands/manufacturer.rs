use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use arcade_sort_core::{manufacturer_tokens, pick_priority_manufacturer, safe_key};
use arcade_sort_lib::PipelineConfig;

use crate::CliError;

/// Show how a raw manufacturer field resolves against the priority list.
pub(crate) fn run_manufacturer(raw: &str, config: Option<PathBuf>) -> Result<(), CliError> {
    let config = PipelineConfig::resolve(config.as_deref())?;

    let tokens = manufacturer_tokens(raw);
    log::info!("  Input:  {:?}", raw);
    log::info!("  Tokens: {}", tokens.join(", "));

    match pick_priority_manufacturer(raw, &config.priority) {
        Some(name) => {
            log::info!(
                "  Group:  {} {}",
                name.if_supports_color(Stdout, |t| t.green()),
                format!("({} Games.xml)", safe_key(name)).if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Group:  {}",
                "none (not in the priority list)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
    Ok(())
}
