//! Data models for the placement engine.
//!
//! This module defines the fundamental data structures for 3D placement:
//! - `Container`: The rectangular packing space
//! - `Item`: An object to be placed, with handling constraints
//! - `Placement`: An item with its assigned position and orientation
//! - `PlacementResult`: The complete outcome of one engine run
//!
//! All structures implement the traits from the `types` module where they
//! apply.

use serde::{Deserialize, Serialize};

use crate::types::{Axis, BoundingBox, Dimensional, Orientation, Positioned, Vec3};

/// Validation error for placement input data.
///
/// Carries enough structure to tell the caller which object and which
/// axis was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A container dimension is zero, negative, or not finite.
    InvalidContainer { axis: Axis, value: f64 },
    /// An item dimension is zero, negative, or not finite.
    InvalidItemDimension {
        index: usize,
        id: String,
        axis: Axis,
        value: f64,
    },
    /// An item arrived without a usable id.
    MissingItemId { index: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidContainer { axis, value } => write!(
                f,
                "Container dimension {} must be positive and finite, got: {}",
                axis, value
            ),
            ValidationError::InvalidItemDimension {
                index,
                id,
                axis,
                value,
            } => write!(
                f,
                "Item '{}' (index {}) dimension {} must be positive and finite, got: {}",
                id, index, axis, value
            ),
            ValidationError::MissingItemId { index } => {
                write!(f, "Item at index {} has no id", index)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Helper to check a single dimension value (NaN compares false here).
#[inline]
fn dimension_ok(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}

/// Represents the rectangular placement space.
///
/// # Fields
/// * `dims` - Extent along x (width), y (height), z (depth)
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    pub dims: Vec3,
}

impl Container {
    /// Creates a new container with validation.
    ///
    /// # Examples
    /// ```
    /// use box_planner::model::Container;
    /// use box_planner::types::Vec3;
    ///
    /// let container = Container::new(Vec3::new(10.0, 10.0, 10.0));
    /// assert!(container.is_ok());
    ///
    /// let degenerate = Container::new(Vec3::new(10.0, 0.0, 10.0));
    /// assert!(degenerate.is_err());
    /// ```
    pub fn new(dims: Vec3) -> Result<Self, ValidationError> {
        let container = Self { dims };
        container.validate()?;
        Ok(container)
    }

    /// Checks all three dimensions, reporting the first offending axis.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for axis in Axis::ALL {
            let value = self.dims.component(axis);
            if !dimension_ok(value) {
                return Err(ValidationError::InvalidContainer { axis, value });
            }
        }
        Ok(())
    }

    /// Total volume of the container.
    pub fn volume(&self) -> f64 {
        self.dims.volume()
    }

    /// Checks if the given oriented extents fit the empty container.
    pub fn fits(&self, extents: &Vec3, tolerance: f64) -> bool {
        extents.fits_within(&self.dims, tolerance)
    }
}

impl Dimensional for Container {
    fn dimensions(&self) -> Vec3 {
        self.dims
    }
}

/// Represents an object to be placed.
///
/// # Fields
/// * `id` - Opaque external identifier, unique within one request
/// * `name` - Human-readable label, carried through to the result
/// * `dims` - Original (unrotated) dimensions
/// * `face_up` - Item must keep its original up axis vertical
/// * `fragile` - Nothing may rest on top of this item
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(rename = "dimensions")]
    pub dims: Vec3,
    #[serde(default)]
    pub face_up: bool,
    #[serde(default)]
    pub fragile: bool,
}

impl Item {
    /// Creates a new item with both handling flags cleared.
    ///
    /// # Examples
    /// ```
    /// use box_planner::model::Item;
    /// use box_planner::types::Vec3;
    ///
    /// let monitor = Item::new("item0001", "Monitor", Vec3::new(6.0, 4.0, 1.0))
    ///     .with_face_up(true)
    ///     .with_fragile(true);
    /// assert!(monitor.face_up && monitor.fragile);
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>, dims: Vec3) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dims,
            face_up: false,
            fragile: false,
        }
    }

    /// Sets the face-up constraint.
    pub fn with_face_up(mut self, face_up: bool) -> Self {
        self.face_up = face_up;
        self
    }

    /// Sets the fragile constraint.
    pub fn with_fragile(mut self, fragile: bool) -> Self {
        self.fragile = fragile;
        self
    }

    /// Checks id and dimensions; `index` is the item's position in the
    /// request, reported back in the error.
    pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingItemId { index });
        }
        for axis in Axis::ALL {
            let value = self.dims.component(axis);
            if !dimension_ok(value) {
                return Err(ValidationError::InvalidItemDimension {
                    index,
                    id: self.id.clone(),
                    axis,
                    value,
                });
            }
        }
        Ok(())
    }

    /// The orientations this item may take.
    ///
    /// Face-up items only yaw around the vertical axis; with rotations
    /// disabled every item keeps its original orientation.
    pub fn allowed_orientations(&self, allow_rotations: bool) -> &'static [Orientation] {
        if !allow_rotations {
            &Orientation::FIXED
        } else if self.face_up {
            &Orientation::UPRIGHT
        } else {
            &Orientation::ALL
        }
    }
}

impl Dimensional for Item {
    fn dimensions(&self) -> Vec3 {
        self.dims
    }
}

/// A placed item with its assigned position in the container.
///
/// The stored dimensions are the oriented extents, so rendering and
/// collision checks never need to reapply the orientation.
///
/// # Fields
/// * `order_id` - 1-based placement sequence number
/// * `item_id` - Id of the placed item
/// * `name` - Label of the placed item
/// * `position` - Minimum corner in the container
/// * `dims` - Oriented extents along x, y, z
/// * `orientation` - Index of the applied orientation
/// * `face_up` - Handling flag, carried through from the item
/// * `fragile` - Handling flag, carried through from the item
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Placement {
    pub order_id: usize,
    pub item_id: String,
    pub name: String,
    pub position: Vec3,
    #[serde(rename = "dimensions")]
    pub dims: Vec3,
    pub orientation: Orientation,
    pub face_up: bool,
    pub fragile: bool,
}

impl Placement {
    /// Returns the top Y coordinate of the placed item.
    #[inline]
    pub fn top_y(&self) -> f64 {
        self.position.y + self.dims.y
    }

    /// Calculates the bounding box of the placed item.
    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_position_and_dims(self.position, self.dims)
    }
}

impl Positioned for Placement {
    fn position(&self) -> Vec3 {
        self.position
    }
}

impl Dimensional for Placement {
    fn dimensions(&self) -> Vec3 {
        self.dims
    }
}

/// Reason why an item could not be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    /// No allowed orientation fits the empty container.
    ExceedsContainer,
    /// The container fits the item, but no anchor satisfies the
    /// placement rules.
    NoValidPosition,
}

impl UnplacedReason {
    /// Stable machine-readable code for the reason.
    pub const fn code(&self) -> &'static str {
        match self {
            UnplacedReason::ExceedsContainer => "exceeds_container",
            UnplacedReason::NoValidPosition => "no_valid_position",
        }
    }
}

impl std::fmt::Display for UnplacedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnplacedReason::ExceedsContainer => {
                write!(f, "Item exceeds the container in every allowed orientation")
            }
            UnplacedReason::NoValidPosition => {
                write!(f, "No free position satisfies the placement rules")
            }
        }
    }
}

/// An item that could not be placed, with the reason.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnplacedItem {
    pub item_id: String,
    pub reason: UnplacedReason,
}

/// The complete result of one placement run.
///
/// Partial results are data, not errors: a run with unplaced items still
/// returns all successful placements and reports `feasible: false`.
///
/// # Fields
/// * `container` - Dimensions of the container the run used
/// * `placements` - Successful placements in assignment order
/// * `unplaced` - Items that found no position, in input order
/// * `feasible` - True when every requested item was placed
/// * `utilization_percent` - Placed volume over container volume
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacementResult {
    pub container: Vec3,
    pub placements: Vec<Placement>,
    pub unplaced: Vec<UnplacedItem>,
    pub feasible: bool,
    pub utilization_percent: f64,
}

impl PlacementResult {
    /// Builds a result and derives the feasibility and utilization
    /// metrics.
    pub fn new(container: Vec3, placements: Vec<Placement>, unplaced: Vec<UnplacedItem>) -> Self {
        let feasible = unplaced.is_empty();
        let used: f64 = placements.iter().map(|p| p.dims.volume()).sum();
        let total = container.volume();
        let utilization_percent = if total <= 0.0 {
            0.0
        } else {
            (used / total) * 100.0
        };
        Self {
            container,
            placements,
            unplaced,
            feasible,
            utilization_percent,
        }
    }

    /// Number of successfully placed items.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Number of items without a position.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// True when every requested item was placed.
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// Ids of the unplaced items, in input order.
    pub fn unplaced_ids(&self) -> Vec<&str> {
        self.unplaced.iter().map(|u| u.item_id.as_str()).collect()
    }
}
