//! Contact search and contact force resolution.
//!
//! This crate provides:
//!
//! - [`Sweep`] / [`ContactState`] - The shrinking mismatch trajectory
//! - [`ContactSearch`] / [`search_contacts`] - Deepest-penetration search per increment
//! - [`resolve_force`] / [`resolve_forces`] - Axial and resultant force per contact
//!
//! The search is sequential within a case: each increment is warm-started
//! from the previous increment's contact.
//!
//! # Example
//!
//! ```
//! use contact_search::{resolve_forces, search_contacts, ForceParams, SearchParams};
//! use liner_types::{PointCloud, PointId, SurfacePoint};
//! use nalgebra::{Point3, Vector3};
//!
//! // Three points in a row along z.
//! let points = (0..3u32)
//!     .map(|i| {
//!         let mut nb = Vec::new();
//!         if i > 0 { nb.push(PointId::new(i)); }
//!         if i < 2 { nb.push(PointId::new(i + 2)); }
//!         SurfacePoint::new(PointId::new(i + 1), Point3::new(0.0, 0.0, 2.0 * f64::from(i)), Vector3::y())
//!             .with_neighbors(nb)
//!     })
//!     .collect();
//! let cloud = PointCloud::from_points(points).unwrap();
//!
//! let outcome = search_contacts(&cloud, PointId::new(3), &SearchParams::lateral(10.0, 4.0, 2)).unwrap();
//! assert_eq!(outcome.records.len(), 3);
//!
//! let forces = resolve_forces(&outcome.records, &ForceParams::new(100.0, 0.0));
//! assert!(forces.iter().all(|f| f.axial_force.is_finite()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod force;
mod params;
mod result;
mod search;
mod sweep;

pub use error::{SearchError, SearchResult};
pub use force::{elevation, resolve_force, resolve_forces, tangential_force};
pub use params::{ForceParams, SearchParams};
pub use result::SearchOutcome;
pub use search::{search_contacts, ContactSearch};
pub use sweep::{ContactState, Sweep};
