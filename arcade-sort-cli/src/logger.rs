//! Terminal logger behind the `log` facade, with an optional plain-text copy
//! written to `--logfile`.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

use crate::CliError;

pub(crate) struct CliLogger {
    level: LevelFilter,
    timestamps: bool,
    file: Option<Mutex<File>>,
}

impl CliLogger {
    pub(crate) fn new(level: LevelFilter, timestamps: bool, file: Option<File>) -> Self {
        Self {
            level,
            timestamps,
            file: file.map(Mutex::new),
        }
    }

    fn format(&self, record: &Record) -> String {
        let message = record.args().to_string();
        let body = match record.level() {
            Level::Error => format!(
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                message
            ),
            Level::Warn => format!(
                "{} {}",
                "warning:".if_supports_color(Stderr, |t| t.yellow()),
                message
            ),
            Level::Info => message,
            Level::Debug | Level::Trace => {
                format!("{}", message.if_supports_color(Stdout, |t| t.dimmed()))
            }
        };

        if self.timestamps {
            format!("{} {}", chrono::Local::now().format("%H:%M:%S%.3f"), body)
        } else {
            body
        }
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with("arcade_sort")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format(record);

        // Ignore write errors (e.g. stdout piped into `head`).
        match record.level() {
            Level::Error | Level::Warn => {
                let _ = writeln!(std::io::stderr(), "{line}");
            }
            _ => {
                let _ = writeln!(std::io::stdout(), "{line}");
            }
        }

        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{}", strip_ansi_escapes::strip_str(&line));
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Install the global logger for the process.
///
/// `--verbose` wins over `--quiet`.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let file = match logfile {
        Some(path) => Some(File::create(path).map_err(|e| {
            CliError::logging(format!("Failed to create log file {}: {}", path.display(), e))
        })?),
        None => None,
    };

    log::set_boxed_logger(Box::new(CliLogger::new(level, verbose, file)))
        .map_err(|e| CliError::logging(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
