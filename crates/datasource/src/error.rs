use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// A required file is missing, unreadable, or not valid tabular data.
    /// There is no partial-load mode: this halts startup.
    #[error("Data file '{}' is unavailable: {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },
}

impl SourceError {
    pub(crate) fn unavailable(path: &Path, reason: impl Display) -> Self {
        SourceError::DataUnavailable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
