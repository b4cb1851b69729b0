use dnamatrix_blocks::BlockError;
use std::fmt;
use thiserror::Error;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("An export is already running; wait for it to finish")]
    ExportInProgress,

    #[error("Project error: {0}")]
    Project(#[from] BlockError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        ExportError::Config(err.to_string())
    }
}

impl From<fmt::Error> for ExportError {
    fn from(_: fmt::Error) -> Self {
        ExportError::Render("failed to format document".to_string())
    }
}
