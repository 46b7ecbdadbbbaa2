use std::{error::Error, fmt, io};

use machine_learning::MlErr;

/// The pipeline's result type.
pub type Result<T> = std::result::Result<T, PipelineErr>;

/// Failures of any pipeline stage.
#[derive(Debug)]
pub enum PipelineErr {
    Ml(MlErr),
    Io(io::Error),
    Config(serde_json::Error),
    Render(String),
}

impl fmt::Display for PipelineErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineErr::Ml(e) => write!(f, "machine learning error: {e}"),
            PipelineErr::Io(e) => write!(f, "io error: {e}"),
            PipelineErr::Config(e) => write!(f, "invalid configuration: {e}"),
            PipelineErr::Render(msg) => write!(f, "rendering failed: {msg}"),
        }
    }
}

impl Error for PipelineErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineErr::Ml(e) => Some(e),
            PipelineErr::Io(e) => Some(e),
            PipelineErr::Config(e) => Some(e),
            PipelineErr::Render(_) => None,
        }
    }
}

impl From<MlErr> for PipelineErr {
    fn from(value: MlErr) -> Self {
        Self::Ml(value)
    }
}

impl From<io::Error> for PipelineErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for PipelineErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value)
    }
}
