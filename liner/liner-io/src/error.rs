//! Error types for liner file I/O.

use std::path::PathBuf;

use gait_profile::GaitError;
use liner_types::CloudError;
use thiserror::Error;

/// Result type for liner file I/O.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading inputs or writing case output.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// First line does not identify the expected format.
    #[error("{path}: unexpected header {found:?}, expected {expected:?}")]
    BadHeader {
        /// File being read.
        path: PathBuf,
        /// What the header should say.
        expected: &'static str,
        /// What it said.
        found: String,
    },

    /// Column titles do not match the expected layout.
    #[error("{path}: unexpected column titles {found:?}")]
    BadColumns {
        /// File being read.
        path: PathBuf,
        /// The column title line as read.
        found: String,
    },

    /// A record could not be parsed.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A required setting is missing.
    #[error("missing setting {key}")]
    MissingSetting {
        /// Setting name.
        key: &'static str,
    },

    /// The parsed points do not form a valid cloud.
    #[error("invalid geometry: {0}")]
    Cloud(#[from] CloudError),

    /// The parsed samples do not form a valid profile.
    #[error("invalid activity: {0}")]
    Activity(#[from] GaitError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create a `Parse` error for `line`.
    #[must_use]
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// True for errors a caller can fix by supplying a different file.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::BadHeader { .. } | Self::BadColumns { .. })
    }
}

/// Map an open failure to [`IoError::FileNotFound`] where it applies.
pub(crate) fn open_error(path: &std::path::Path, err: std::io::Error) -> IoError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IoError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IoError::Io(err)
    }
}
