//! Rotation of liner point clouds into their final orientation.
//!
//! This crate provides:
//!
//! - [`Rotation`] - Rigid rotations about the anatomical axes
//! - [`Orientation`] - Lip, inclination, version and tilt angles
//! - [`rotate_liner`] - Rotate a master cloud into a new, oriented cloud
//! - [`RimGraph`] - Rim-only adjacency of the rotated cloud
//!
//! The master cloud is only ever borrowed. Every call produces a new cloud,
//! so one master can feed any number of cases.
//!
//! # Example
//!
//! ```
//! use liner_orient::{rotate_liner, Orientation};
//! use liner_types::{PointCloud, PointId, SurfacePoint};
//! use nalgebra::{Point3, Vector3};
//!
//! let master = PointCloud::from_points(vec![
//!     SurfacePoint::new(PointId::new(1), Point3::new(0.0, 0.0, 25.0), Vector3::z()),
//! ]).unwrap();
//!
//! let oriented = rotate_liner(&master, &Orientation::inclined(90.0)).unwrap();
//! let p = oriented.cloud.get(PointId::new(1)).unwrap();
//! assert!((p.position.y - 25.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod orientation;
mod rim;
mod rotation;

pub use error::{OrientError, OrientResult};
pub use orientation::Orientation;
pub use rim::{RimGraph, RimNode};
pub use rotation::Rotation;

use liner_types::PointCloud;
use tracing::debug;

/// A rotated cloud together with its rim adjacency.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedLiner {
    /// The oriented point cloud.
    pub cloud: PointCloud,
    /// Rim-only adjacency of `cloud`.
    pub rim: RimGraph,
}

/// Rotate `master` into `orientation`.
///
/// Positions and normals go through the same rotation. With every angle at
/// zero the result is an unmodified copy of `master`.
///
/// # Errors
///
/// Returns [`OrientError::NonFiniteAngle`] if any angle is NaN or infinite.
pub fn rotate_liner(master: &PointCloud, orientation: &Orientation) -> OrientResult<RotatedLiner> {
    orientation.validate()?;

    let cloud = match orientation.rotation() {
        Some(rotation) => {
            debug!(
                points = master.len(),
                lip = orientation.lip,
                inclination = orientation.inclination,
                version = orientation.version,
                tilt = orientation.tilt,
                "Rotating liner"
            );
            master.map_geometry(|p, n| (rotation.transform_point(p), rotation.transform_vector(n)))
        }
        None => master.clone(),
    };

    let rim = RimGraph::from_cloud(&cloud);
    Ok(RotatedLiner { cloud, rim })
}
