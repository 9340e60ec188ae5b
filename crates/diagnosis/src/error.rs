use preprocess::PreprocessError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiagnoseError>;

#[derive(Debug, Error)]
pub enum DiagnoseError {
    /// Fatal at startup: the pipeline cannot serve without all four models.
    #[error("failed to load classifier '{name}' from {}: {source}", path.display())]
    ModelLoad {
        name: &'static str,
        path: PathBuf,
        source: anyhow::Error,
    },

    #[error("unknown model '{0}', valid models are: Parts, Elbow, Hand, Shoulder")]
    UnknownModel(String),

    #[error(transparent)]
    InvalidInput(#[from] PreprocessError),

    /// Any failure during a classifier invocation. The diagnosis that
    /// triggered it is aborted, never completed with a default label.
    #[error("inference failed: {0}")]
    Inference(anyhow::Error),
}
