use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaceformError {
    #[error("Invalid users data in {path}: {source}")]
    InvalidUsers {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize form: {0}")]
    Output(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
