use thiserror::Error;

use arcade_sort_xml::XmlError;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// The machine listing (or an input catalog) could not be produced or
    /// parsed. Nothing has been written when this is returned.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl PipelineError {
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }
}
