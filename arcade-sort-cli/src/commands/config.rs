use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use arcade_sort_lib::PipelineConfig;
use arcade_sort_lib::config::config_path;

use crate::CliError;

/// Print the effective configuration and where it came from.
pub(crate) fn run_config_show(config: Option<PathBuf>) -> Result<(), CliError> {
    let source = match &config {
        Some(path) => path.display().to_string(),
        None if config_path().exists() => config_path().display().to_string(),
        None => "built-in defaults".to_string(),
    };
    let resolved = PipelineConfig::resolve(config.as_deref())?;

    log::info!(
        "{}",
        "Pipeline Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  Source: {}",
        source.if_supports_color(Stdout, |t| t.cyan()),
    );
    crate::log_blank();
    for line in resolved.to_toml()?.lines() {
        log::info!("{}", line);
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", config_path().display());
    Ok(())
}

/// Write the built-in defaults so they can be edited.
pub(crate) fn run_config_init(force: bool, config: Option<PathBuf>) -> Result<(), CliError> {
    let path = config.unwrap_or_else(config_path);
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    PipelineConfig::builtin().save(&path)?;
    log::info!(
        "{} {}",
        "Wrote default pipeline to".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}
