//! Geometric helper functions for 3D collision detection and support
//! checks.
//!
//! This module provides functions for checking intersections between
//! placed items and for calculating overlaps in single dimensions and in
//! the footprint (XZ) plane.

use crate::model::Placement;
use crate::types::Vec3;

/// Checks if two placed items overlap in space.
///
/// Uses Axis-Aligned Bounding Box (AABB) collision detection. Two boxes
/// do NOT overlap when they are separated along at least one axis, so
/// items that merely touch along a shared face are allowed.
///
/// # Parameters
/// * `a` - First placed item
/// * `b` - Second placed item
///
/// # Returns
/// `true` if the items overlap, otherwise `false`
pub fn intersects(a: &Placement, b: &Placement) -> bool {
    // Separating Axis Theorem: the items do NOT overlap when they are
    // completely separated along any axis
    !(a.position.x + a.dims.x <= b.position.x
        || b.position.x + b.dims.x <= a.position.x
        || a.position.y + a.dims.y <= b.position.y
        || b.position.y + b.dims.y <= a.position.y
        || a.position.z + a.dims.z <= b.position.z
        || b.position.z + b.dims.z <= a.position.z)
}

/// Calculates the overlap of two intervals in one dimension.
///
/// # Parameters
/// * `a1` - Start of the first interval
/// * `a2` - End of the first interval
/// * `b1` - Start of the second interval
/// * `b2` - End of the second interval
///
/// # Returns
/// Length of the overlap, at least 0.0
///
/// # Example
/// ```
/// use box_planner::geometry::overlap_1d;
///
/// let overlap = overlap_1d(0.0, 5.0, 3.0, 8.0);
/// assert!((overlap - 2.0).abs() < 1e-9);
/// ```
pub fn overlap_1d(a1: f64, a2: f64, b1: f64, b2: f64) -> f64 {
    (a2.min(b2) - a1.max(b1)).max(0.0)
}

/// Calculates the overlap area of two item footprints in the XZ plane.
///
/// The footprint ignores the vertical extent, so this also measures how
/// much one item would shadow another from above.
///
/// # Parameters
/// * `a` - First placed item
/// * `b` - Second placed item
///
/// # Returns
/// Area of the overlap in the XZ plane
pub fn footprint_overlap(a: &Placement, b: &Placement) -> f64 {
    let overlap_x = overlap_1d(
        a.position.x,
        a.position.x + a.dims.x,
        b.position.x,
        b.position.x + b.dims.x,
    );
    let overlap_z = overlap_1d(
        a.position.z,
        a.position.z + a.dims.z,
        b.position.z,
        b.position.z + b.dims.z,
    );
    overlap_x * overlap_z
}

/// Checks if a point lies inside a placed item (boundaries included).
///
/// # Parameters
/// * `point` - The point to check
/// * `placement` - The placed item
///
/// # Returns
/// `true` if the point lies inside the item
pub fn point_inside(point: Vec3, placement: &Placement) -> bool {
    let p = placement.position;
    let d = placement.dims;

    point.x >= p.x
        && point.x <= p.x + d.x
        && point.y >= p.y
        && point.y <= p.y + d.y
        && point.z >= p.z
        && point.z <= p.z + d.z
}
