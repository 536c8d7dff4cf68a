//! Error types for point cloud construction and lookup.

use thiserror::Error;

use crate::point::PointId;

/// Result type for point cloud operations.
pub type CloudResult<T> = Result<T, CloudError>;

/// Errors raised while building or querying a [`PointCloud`](crate::PointCloud).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CloudError {
    /// A neighbour list references an id that is not in the cloud.
    #[error("malformed geometry: point {point} lists neighbour {neighbor} which does not exist")]
    DanglingNeighbor {
        /// Point carrying the bad reference.
        point: PointId,
        /// The id that could not be resolved.
        neighbor: PointId,
    },

    /// Two points share the same id.
    #[error("malformed geometry: point id {id} appears more than once")]
    DuplicateId {
        /// The repeated id.
        id: PointId,
    },

    /// An id lookup failed.
    #[error("unknown point id {id}")]
    UnknownId {
        /// The id that was requested.
        id: PointId,
    },

    /// A point carries more region labels than the two slots allow.
    #[error("point {point} has {count} region labels (at most 2 are supported)")]
    TooManyLabels {
        /// Point with the oversized label list.
        point: PointId,
        /// Number of labels supplied.
        count: usize,
    },
}
