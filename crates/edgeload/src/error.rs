//! Error type for a whole case run.

use contact_search::SearchError;
use gait_profile::GaitError;
use liner_io::IoError;
use liner_orient::OrientError;
use liner_reduce::ReduceError;
use thiserror::Error;

/// Result type for case runs.
pub type EdgeLoadResult<T> = Result<T, EdgeLoadError>;

/// Errors that stop a case.
#[derive(Debug, Error)]
pub enum EdgeLoadError {
    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The liner could not be oriented.
    #[error(transparent)]
    Orient(#[from] OrientError),

    /// The region reducer failed.
    #[error(transparent)]
    Reduce(#[from] ReduceError),

    /// The contact search failed.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The activity could not be segmented or the forces timed.
    #[error(transparent)]
    Gait(#[from] GaitError),

    /// The job asks for the geometry's head radius but the header has none.
    #[error("case {case}: head radius set to default but the geometry header declares none")]
    MissingHeadRadius {
        /// Case label.
        case: String,
    },

    /// The job list produced no cases.
    #[error("job list has no cases")]
    NoCases,

    /// Writing the run summary failed.
    #[error("summary serialization failed: {0}")]
    Summary(#[from] serde_json::Error),
}
