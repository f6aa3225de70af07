//! Loader errors.

use smilink_core::PipelineError;
use std::io;
use std::path::PathBuf;

/// Error returned while collecting, reading or resolving MIB files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A file or directory could not be read.
    #[error("{}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// A file name pattern cannot be used.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The pattern as given.
        pattern: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// The load was cancelled before it finished.
    #[error("load cancelled")]
    Cancelled,
    /// Resolution failed; the model is inside when there is one.
    #[error(transparent)]
    Resolve(#[from] PipelineError),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
