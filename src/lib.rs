//! Deterministic 3D placement for box planning.
//!
//! Given a rectangular container and a prioritized list of items, the
//! engine assigns non-overlapping positions one item at a time, honoring
//! face-up and fragile handling constraints. The same input always yields
//! the same layout, and items that find no position are reported alongside
//! the successful placements instead of failing the whole run.
//!
//! The coordinate frame is y-up: the container floor is the plane y = 0
//! and gravity acts along -y.
//!
//! # Example
//! ```
//! use box_planner::engine::place;
//! use box_planner::model::{Container, Item};
//! use box_planner::types::Vec3;
//!
//! let container = Container::new(Vec3::new(10.0, 10.0, 10.0))?;
//! let items = vec![
//!     Item::new("item0001", "Crate", Vec3::new(4.0, 4.0, 4.0)),
//!     Item::new("item0002", "Screen", Vec3::new(6.0, 4.0, 1.0)).with_fragile(true),
//! ];
//!
//! let result = place(&container, &items)?;
//! assert!(result.is_feasible());
//! # Ok::<(), box_planner::model::ValidationError>(())
//! ```

pub mod config;
pub mod engine;
pub mod geometry;
pub mod model;
pub mod types;

pub use engine::{
    PlacementConfig, PlacementConfigBuilder, PlacementEvent, place, place_with_config,
    place_with_observer,
};
pub use model::{
    Container, Item, Placement, PlacementResult, UnplacedItem, UnplacedReason, ValidationError,
};
pub use types::Vec3;
