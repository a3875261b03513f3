//! arcade-sort CLI
//!
//! Builds vertical-screen HyperSpin menu databases from a MAME machine
//! listing and an existing HyperSpin catalog.

mod cli_types;
mod commands;
mod error;
mod logger;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Log an empty line at info level (a visual separator that `--quiet` hides).
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Run { args } => commands::run::run_pipeline(args, cli.quiet),
        Commands::Classify {
            listing,
            family,
            exclude,
        } => commands::classify::run_classify(&listing, family, exclude),
        Commands::Manufacturer { raw, config } => {
            commands::manufacturer::run_manufacturer(&raw, config)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { config } => commands::config::run_config_show(config),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Init { force, config } => commands::config::run_config_init(force, config),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        log::logger().flush();
        std::process::exit(1);
    }
}
