//! Contact force from the remaining mismatch and the surface normal.
//!
//! The springs push the head back with `remaining mismatch × stiffness` per
//! axis. Their planar resultant `T` acts on a surface whose normal rises at
//! elevation `θ` from the transverse plane, so the axial component is
//! `|T tan θ|`, with `|tan θ|` capped at [`ForceParams::max_axial_ratio`].

use liner_types::{ContactRecord, ForceRecord};

use crate::params::ForceParams;

/// Elevation of `normal` above the transverse (x, z) plane, in radians.
#[must_use]
pub fn elevation(normal_x: f64, normal_y: f64, normal_z: f64) -> f64 {
    normal_y.atan2(normal_x.hypot(normal_z))
}

/// Tangential spring force magnitude for a contact (N).
#[must_use]
pub fn tangential_force(contact: &ContactRecord, params: &ForceParams) -> f64 {
    let lateral = contact.lateral_mismatch * params.lateral_stiffness;
    let anterior = contact.anterior_mismatch * params.anterior_stiffness;
    lateral.hypot(anterior)
}

/// Resolve the axial and resultant force for one contact.
///
/// # Example
///
/// ```
/// use contact_search::{resolve_force, ForceParams};
/// use liner_types::{ContactRecord, PointId, SurfacePoint};
/// use nalgebra::{Point3, Vector3};
///
/// let n = Vector3::new(1.0, 1.0, 0.0).normalize();
/// let p = SurfacePoint::new(PointId::new(1), Point3::origin(), n);
/// let contact = ContactRecord::capture(1, &p, 0.0, 2.0);
///
/// let force = resolve_force(&contact, &ForceParams::new(50.0, 0.0));
/// // 45 degree normal: axial equals tangential.
/// assert!((force.axial_force - 100.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn resolve_force(contact: &ContactRecord, params: &ForceParams) -> ForceRecord {
    let tangential = tangential_force(contact, params);
    let theta = elevation(contact.normal.x, contact.normal.y, contact.normal.z);
    // f64::min drops NaN, so a degenerate normal also lands on the cap.
    let ratio = theta.tan().abs().min(params.max_axial_ratio);
    let axial = (tangential * ratio).abs();
    ForceRecord {
        contact: contact.clone(),
        axial_force: axial,
        resultant_force: tangential.hypot(axial),
    }
}

/// Resolve forces for every contact of a sweep.
#[must_use]
pub fn resolve_forces(contacts: &[ContactRecord], params: &ForceParams) -> Vec<ForceRecord> {
    contacts.iter().map(|c| resolve_force(c, params)).collect()
}
