use std::io;
use std::path::PathBuf;

use crate::sendgrid::ApiError;

/// Everything that can stop a run. None of these are handled below `main`.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("transport error: {0}")]
    Transport(#[from] ApiError),

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot derive a template name from ref {0:?}")]
    InvalidRef(String),

    #[error("missing configuration: set {0}")]
    MissingConfig(&'static str),
}
