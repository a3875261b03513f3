//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arcade-sort")]
#[command(
    about = "Build vertical-screen HyperSpin databases from a MAME listing",
    long_about = None
)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input and output paths for a pipeline run. Each one overrides the
/// pipeline file.
#[derive(Args, Clone, Default)]
pub(crate) struct RunArgs {
    /// Pipeline file (default: ~/.config/arcade-sort/pipeline.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// MAME executable to run with -listxml
    #[arg(long, conflicts_with = "listing")]
    pub mame: Option<PathBuf>,

    /// Existing -listxml output to read instead of running MAME
    #[arg(long)]
    pub listing: Option<PathBuf>,

    /// Primary HyperSpin database
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// HyperSpin database used to fill in missing genres
    #[arg(long)]
    pub lookup: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show the documents that would be written without writing them
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run every configured job and write the databases
    Run {
        #[command(flatten)]
        args: RunArgs,
    },

    /// List the machines a listing classifies as vertical
    Classify {
        /// -listxml output to classify
        #[arg(long)]
        listing: PathBuf,

        /// Only count machines from this driver source file (e.g. naomi.cpp)
        #[arg(long)]
        family: Option<String>,

        /// Machine names to drop from the result
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
    },

    /// Show which priority manufacturer a raw manufacturer field resolves to
    Manufacturer {
        /// Raw manufacturer text, e.g. "Atlus / Cave"
        raw: String,

        /// Pipeline file providing the priority list
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Manage the pipeline configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the effective configuration as TOML
    Show {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the config file path
    Path,

    /// Write the built-in defaults to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Write here instead of the default location
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
