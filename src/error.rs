use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatusDbError {
    #[error("Failed to open dpkg status database at {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read dpkg status database: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed dependency \"{token}\": {reason}")]
    MalformedDependency { token: String, reason: String },
    #[error("Malformed Status field: {0}")]
    MalformedStatus(String),
}

impl StatusDbError {
    pub(crate) fn malformed_dep(token: &str, reason: impl Into<String>) -> Self {
        StatusDbError::MalformedDependency {
            token: token.to_owned(),
            reason: reason.into(),
        }
    }
}
