use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use arcade_sort_lib::{Pipeline, PipelineConfig, RunSummary};

use crate::CliError;
use crate::cli_types::RunArgs;

/// Command-line paths take precedence over the pipeline file.
fn apply_overrides(args: &RunArgs, config: &mut PipelineConfig) {
    if let Some(listing) = &args.listing {
        config.listing = Some(listing.clone());
    }
    if let Some(mame) = &args.mame {
        config.mame = Some(mame.clone());
        config.listing = None;
    }
    if let Some(catalog) = &args.catalog {
        config.catalog = Some(catalog.clone());
    }
    if let Some(lookup) = &args.lookup {
        config.genre_lookup = Some(lookup.clone());
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
}

/// Run the configured pipeline.
pub(crate) fn run_pipeline(args: RunArgs, quiet: bool) -> Result<(), CliError> {
    let mut config = PipelineConfig::resolve(args.config.as_deref())?;
    apply_overrides(&args, &mut config);
    let pipeline = Pipeline::new(config)?;
    let output = pipeline.config().output.clone();

    log::info!(
        "Building databases in: {}",
        output.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if args.dry_run {
        log::info!(
            "{}",
            "Dry run: no files will be written".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let pb = if quiet || args.dry_run {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {wide_msg}")
                .expect("static pattern")
                .progress_chars("=> "),
        );
        pb
    };
    let (outputs, summary) = pipeline.run(args.dry_run, |progress| {
        pb.set_length(progress.total as u64);
        pb.set_message(progress.document.path.display().to_string());
        pb.set_position(progress.index as u64 + 1);
    })?;
    pb.finish_and_clear();
    crate::log_blank();

    if args.dry_run {
        for doc in outputs.documents() {
            log::info!(
                "  {} {}",
                doc.path.display(),
                format!("({} entries)", doc.entries).if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }

    print_summary(&summary, args.dry_run);
    Ok(())
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    crate::log_blank();
    log::info!("{}", "Summary".if_supports_color(Stdout, |t| t.bold()));
    for job in &summary.jobs {
        log::info!(
            "  {:<28} {:>6} entries {:>4} documents",
            job.name,
            job.entries,
            job.documents,
        );
    }
    let verb = if dry_run { "planned" } else { "written" };
    log::info!(
        "  {}",
        format!("{} documents {}", summary.documents, verb)
            .if_supports_color(Stdout, |t| t.green()),
    );
}
