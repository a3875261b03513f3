use thiserror::Error;

use arcade_sort_lib::PipelineError;
use arcade_sort_xml::XmlError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Pipeline run failed
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Listing or menu could not be parsed
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Logger setup failed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }
}
