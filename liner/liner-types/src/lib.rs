//! Core types for liner edge-loading analysis.
//!
//! This crate provides the data model shared by every analysis stage:
//!
//! - [`SurfacePoint`] - A liner surface sample with normal, region labels and adjacency
//! - [`PointCloud`] - Validated, id-indexed store of surface points
//! - [`ContactRecord`], [`ForceRecord`], [`TimedRecord`] - Per-increment results
//!
//! # Coordinate System
//!
//! All positions are in millimetres:
//! - X: anteroposterior, positive anterior
//! - Y: superoinferior, positive superior
//! - Z: mediolateral, positive medial
//!
//! # Example
//!
//! ```
//! use liner_types::{PointCloud, PointId, RegionLabels, SurfacePoint};
//! use nalgebra::{Point3, Vector3};
//!
//! let rim = SurfacePoint::new(PointId::new(1), Point3::new(0.0, 0.0, 25.0), Vector3::z())
//!     .with_regions(RegionLabels::single("EL_1"))
//!     .with_edge(true);
//!
//! let cloud = PointCloud::from_points(vec![rim]).unwrap();
//! assert_eq!(cloud.edge_ids().count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cloud;
mod error;
mod point;
mod record;

pub use cloud::PointCloud;
pub use error::{CloudError, CloudResult};
pub use point::{PointId, RegionLabels, SurfacePoint, ABSENT_LABEL, EDGE_LOADING_PREFIX};
pub use record::{ContactRecord, ForceRecord, TimedRecord};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
