//! Common types and traits for 3D geometry.
//!
//! This module defines the reusable building blocks of the placement
//! engine: the `Vec3` value type, axis-aligned bounding boxes, and the
//! orientation permutation table.
//!
//! The coordinate frame is y-up: gravity acts along -y, the container
//! floor is the plane y = 0, and an item's footprint is its extent in the
//! XZ plane.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Global numerical tolerance for floating-point comparisons.
///
/// Used for general numerical operations such as dimension comparisons
/// and overlap area sums.
pub const EPSILON_GENERAL: f64 = 1e-6;

/// Tolerance for height comparisons along the Y axis.
///
/// Slightly larger tolerance for matching an item's base against the top
/// faces of its supporting items.
pub const EPSILON_HEIGHT: f64 = 1e-3;

/// One of the three coordinate axes.
///
/// Used by validation errors to name the offending dimension and for
/// generic component access on [`Vec3`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes in x, y, z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Lowercase axis letter, matching the wire format's field names.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a 3D vector or point in space.
///
/// Used for positions, dimensions, and calculations in 3D space.
/// Serializes as a JSON object `{"x": .., "y": .., "z": ..}`, the triple
/// format the surrounding task service speaks.
///
/// # Examples
/// ```
/// use box_planner::types::Vec3;
///
/// let position = Vec3::new(1.0, 2.0, 3.0);
/// let dimensions = Vec3::new(10.0, 20.0, 30.0);
/// let far_corner = position + dimensions;
/// assert_eq!(far_corner, Vec3::new(11.0, 22.0, 33.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Creates a new 3D vector.
    ///
    /// # Parameters
    /// * `x` - X component (width)
    /// * `y` - Y component (height, the up axis)
    /// * `z` - Z component (depth)
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a zero vector (origin).
    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Returns one component selected by axis.
    #[inline]
    pub const fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Calculates the volume (product of all components).
    ///
    /// Useful for dimension vectors.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.x * self.y * self.z
    }

    /// Calculates the footprint area (X × Z product).
    #[inline]
    pub fn footprint_area(&self) -> f64 {
        self.x * self.z
    }

    /// Checks if all components are positive and finite.
    #[inline]
    pub fn is_valid_dimension(&self) -> bool {
        self.x > 0.0
            && self.y > 0.0
            && self.z > 0.0
            && self.x.is_finite()
            && self.y.is_finite()
            && self.z.is_finite()
    }

    /// Checks if the vector fits within another vector (component-wise <=).
    ///
    /// # Parameters
    /// * `container` - The outer vector (e.g., container dimensions)
    /// * `tolerance` - Numerical tolerance for the comparison
    #[inline]
    pub fn fits_within(&self, container: &Self, tolerance: f64) -> bool {
        self.x <= container.x + tolerance
            && self.y <= container.y + tolerance
            && self.z <= container.z + tolerance
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self::Output {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

/// An axis-aligned orientation: a permutation of an item's original
/// dimensions.
///
/// The six box orientations live in a fixed table, so an orientation is
/// stable across runs and serializes as its table index. Entry
/// `perm[slot]` names the original dimension that ends up on axis slot
/// `slot` (0 = x, 1 = y, 2 = z); index 0 is the identity.
///
/// # Examples
/// ```
/// use box_planner::types::{Orientation, Vec3};
///
/// let dims = Vec3::new(2.0, 6.0, 3.0);
/// // The second upright orientation swaps the x and z extents.
/// let swapped = Orientation::UPRIGHT[1].apply(dims);
/// assert_eq!(swapped, Vec3::new(3.0, 6.0, 2.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Orientation(usize);

impl Orientation {
    const PERMUTATIONS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    /// The identity orientation (original dimensions unchanged).
    pub const IDENTITY: Orientation = Orientation(0);

    /// All six axis-aligned orientations, in table order.
    pub const ALL: [Orientation; 6] = [
        Orientation(0),
        Orientation(1),
        Orientation(2),
        Orientation(3),
        Orientation(4),
        Orientation(5),
    ];

    /// The orientations that keep the original Y extent vertical
    /// (identity and the x/z swap). The only choices for face-up items.
    pub const UPRIGHT: [Orientation; 2] = [Orientation(0), Orientation(5)];

    /// The identity orientation alone, for runs with rotations disabled.
    pub const FIXED: [Orientation; 1] = [Orientation(0)];

    /// Stable index of this orientation in the fixed table.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// The slot-to-source permutation backing this orientation.
    #[inline]
    pub const fn permutation(&self) -> [usize; 3] {
        Self::PERMUTATIONS[self.0]
    }

    /// Applies the orientation to a dimension vector, yielding the
    /// oriented extents.
    #[inline]
    pub fn apply(&self, dims: Vec3) -> Vec3 {
        let d = [dims.x, dims.y, dims.z];
        let p = Self::PERMUTATIONS[self.0];
        Vec3::new(d[p[0]], d[p[1]], d[p[2]])
    }

    /// Whether the orientation leaves the original Y extent on the up axis.
    #[inline]
    pub const fn keeps_up_axis(&self) -> bool {
        Self::PERMUTATIONS[self.0][1] == 1
    }
}

/// Trait for objects with 3D dimensions.
///
/// Provides a common interface for all objects with spatial extent.
pub trait Dimensional {
    /// Returns the dimensions of the object.
    fn dimensions(&self) -> Vec3;

    /// Calculates the volume.
    fn volume(&self) -> f64 {
        self.dimensions().volume()
    }

    /// Calculates the footprint area.
    fn footprint_area(&self) -> f64 {
        self.dimensions().footprint_area()
    }

    /// Checks if this object fits in a container with the given dimensions.
    fn fits_in(&self, container_dims: &Vec3, tolerance: f64) -> bool {
        self.dimensions().fits_within(container_dims, tolerance)
    }
}

/// Trait for objects with a position in 3D space.
///
/// Enables querying position and bounding box calculations.
pub trait Positioned {
    /// Returns the position (minimum corner).
    fn position(&self) -> Vec3;
}

/// Represents an Axis-Aligned Bounding Box (AABB).
///
/// Used for collision detection and overlap calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner (position)
    pub min: Vec3,
    /// Maximum corner (position + dimensions)
    pub max: Vec3,
}

impl BoundingBox {
    /// Creates a new bounding box.
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a bounding box from position and dimensions.
    #[inline]
    pub fn from_position_and_dims(position: Vec3, dims: Vec3) -> Self {
        Self {
            min: position,
            max: position + dims,
        }
    }

    /// Checks if two bounding boxes intersect.
    ///
    /// Implements the Separating Axis Theorem (SAT) for AABBs; boxes that
    /// merely share a face do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.max.x <= other.min.x
            || other.max.x <= self.min.x
            || self.max.y <= other.min.y
            || other.max.y <= self.min.y
            || self.max.z <= other.min.z
            || other.max.z <= self.min.z)
    }

    /// Calculates the overlap length in one dimension.
    #[inline]
    fn overlap_1d(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> f64 {
        (a_max.min(b_max) - a_min.max(b_min)).max(0.0)
    }

    /// Calculates the footprint overlap area in the XZ plane.
    #[inline]
    pub fn footprint_overlap_area(&self, other: &Self) -> f64 {
        let overlap_x = Self::overlap_1d(self.min.x, self.max.x, other.min.x, other.max.x);
        let overlap_z = Self::overlap_1d(self.min.z, self.max.z, other.min.z, other.max.z);
        overlap_x * overlap_z
    }

    /// Checks if a point is inside the bounding box (boundaries included).
    #[inline]
    pub fn contains_point(&self, point: &Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Returns the top (Y maximum).
    #[inline]
    pub fn top_y(&self) -> f64 {
        self.max.y
    }

    /// Returns the center point.
    #[inline]
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Returns the dimensions (width, height, depth).
    #[inline]
    pub fn dimensions(&self) -> Vec3 {
        self.max - self.min
    }
}
