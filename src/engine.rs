//! Placement logic for arranging items inside a single container.
//!
//! This module implements a deterministic first-fit algorithm that places
//! items one by one, in input order, while honoring:
//! - Container bounds and pairwise non-overlap
//! - Support from below (floor or the tops of earlier items)
//! - Face-up items, which only rotate around the vertical axis
//! - Fragile items, which never carry anything on top
//!
//! Candidate positions come from an anchor frontier: the container origin
//! plus corner points derived from every placed item. Anchors are scanned
//! lowest first (y, then z, then x), so items settle toward the origin.
//! Fragile items try their orientations smallest footprint first, keeping
//! floor open for the items after them.

use std::cmp::Ordering;

use crate::geometry::{footprint_overlap, intersects, point_inside};
use crate::model::{
    Container, Item, Placement, PlacementResult, UnplacedItem, UnplacedReason, ValidationError,
};
use crate::types::{EPSILON_GENERAL, EPSILON_HEIGHT, Orientation, Vec3};

/// Configuration for the placement algorithm.
///
/// Contains all tolerances and limits controlling the search behavior.
#[derive(Copy, Clone, Debug)]
pub struct PlacementConfig {
    /// Minimum share of the footprint that must rest on support (0.0 to 1.0)
    pub support_ratio: f64,
    /// Tolerance for height comparisons
    pub height_epsilon: f64,
    /// General numerical tolerance
    pub general_epsilon: f64,
    /// Whether items may be rotated at all
    pub allow_rotations: bool,
}

impl PlacementConfig {
    pub const DEFAULT_SUPPORT_RATIO: f64 = 1.0;
    pub const DEFAULT_HEIGHT_EPSILON: f64 = EPSILON_HEIGHT;
    pub const DEFAULT_GENERAL_EPSILON: f64 = EPSILON_GENERAL;
    pub const DEFAULT_ALLOW_ROTATIONS: bool = true;

    /// Creates a builder for custom configuration.
    pub fn builder() -> PlacementConfigBuilder {
        PlacementConfigBuilder::default()
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            support_ratio: Self::DEFAULT_SUPPORT_RATIO,
            height_epsilon: Self::DEFAULT_HEIGHT_EPSILON,
            general_epsilon: Self::DEFAULT_GENERAL_EPSILON,
            allow_rotations: Self::DEFAULT_ALLOW_ROTATIONS,
        }
    }
}

/// Builder pattern for PlacementConfig.
#[derive(Clone, Debug)]
pub struct PlacementConfigBuilder {
    config: PlacementConfig,
}

impl Default for PlacementConfigBuilder {
    fn default() -> Self {
        Self {
            config: PlacementConfig::default(),
        }
    }
}

impl PlacementConfigBuilder {
    /// Sets the minimum support ratio.
    pub fn support_ratio(mut self, ratio: f64) -> Self {
        self.config.support_ratio = ratio;
        self
    }

    /// Sets the height tolerance.
    pub fn height_epsilon(mut self, epsilon: f64) -> Self {
        self.config.height_epsilon = epsilon;
        self
    }

    /// Sets the general tolerance.
    pub fn general_epsilon(mut self, epsilon: f64) -> Self {
        self.config.general_epsilon = epsilon;
        self
    }

    /// Enables or disables rotations globally.
    pub fn allow_rotations(mut self, allow: bool) -> Self {
        self.config.allow_rotations = allow;
        self
    }

    /// Creates the final configuration.
    pub fn build(self) -> PlacementConfig {
        self.config
    }
}

/// Events emitted while placing, to allow live visualization.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type")]
pub enum PlacementEvent {
    /// An item was placed.
    ItemPlaced {
        id: String,
        order_id: usize,
        position: Vec3,
        dims: Vec3,
        orientation: Orientation,
    },
    /// An item could not be placed.
    ItemRejected {
        id: String,
        dims: Vec3,
        reason_code: String,
        reason_text: String,
    },
    /// Placement finished.
    Finished { placed: usize, unplaced: usize },
}

/// Places items into the container with the default configuration.
///
/// Items are attempted strictly in input order; a failed item is recorded
/// and the search continues with the next one. The same input always
/// produces the same result.
///
/// # Parameters
/// * `container` - The placement space
/// * `items` - The items to place, in priority order
///
/// # Returns
/// `Ok(PlacementResult)` with placements and any unplaced items, or
/// `Err(ValidationError)` when the input is malformed
pub fn place(container: &Container, items: &[Item]) -> Result<PlacementResult, ValidationError> {
    place_with_config(container, items, PlacementConfig::default())
}

/// Placement with a custom configuration.
///
/// Like `place`, but with adjustable parameters.
///
/// # Parameters
/// * `container` - The placement space
/// * `items` - The items to place, in priority order
/// * `config` - Configuration parameters for the algorithm
pub fn place_with_config(
    container: &Container,
    items: &[Item],
    config: PlacementConfig,
) -> Result<PlacementResult, ValidationError> {
    place_with_observer(container, items, config, |_| {})
}

/// Placement with a custom configuration and a live event callback.
///
/// Calls the callback for every placement step (suitable for logging or
/// streaming progress to a client).
pub fn place_with_observer(
    container: &Container,
    items: &[Item],
    config: PlacementConfig,
    mut on_event: impl FnMut(&PlacementEvent),
) -> Result<PlacementResult, ValidationError> {
    container.validate()?;
    for (index, item) in items.iter().enumerate() {
        item.validate(index)?;
    }

    let mut placed: Vec<Placement> = Vec::new();
    let mut unplaced: Vec<UnplacedItem> = Vec::new();
    // The anchor frontier starts with the container origin and grows with
    // every placement.
    let mut anchors: Vec<Vec3> = vec![Vec3::zero()];

    for item in items {
        let orientations = item.allowed_orientations(config.allow_rotations);

        // Quick rejection: the item must fit the empty container in at
        // least one allowed orientation.
        let fits_at_all = orientations
            .iter()
            .any(|o| container.fits(&o.apply(item.dims), config.general_epsilon));
        if !fits_at_all {
            let reason = UnplacedReason::ExceedsContainer;
            on_event(&PlacementEvent::ItemRejected {
                id: item.id.clone(),
                dims: item.dims,
                reason_code: reason.code().to_string(),
                reason_text: reason.to_string(),
            });
            unplaced.push(UnplacedItem {
                item_id: item.id.clone(),
                reason,
            });
            continue;
        }

        match find_position(item, orientations, container, &placed, &anchors, &config) {
            Some(mut placement) => {
                placement.order_id = placed.len() + 1;
                extend_frontier(&mut anchors, &placement, container, &config);
                on_event(&PlacementEvent::ItemPlaced {
                    id: placement.item_id.clone(),
                    order_id: placement.order_id,
                    position: placement.position,
                    dims: placement.dims,
                    orientation: placement.orientation,
                });
                placed.push(placement);
            }
            None => {
                let reason = UnplacedReason::NoValidPosition;
                on_event(&PlacementEvent::ItemRejected {
                    id: item.id.clone(),
                    dims: item.dims,
                    reason_code: reason.code().to_string(),
                    reason_text: reason.to_string(),
                });
                unplaced.push(UnplacedItem {
                    item_id: item.id.clone(),
                    reason,
                });
            }
        }
    }

    on_event(&PlacementEvent::Finished {
        placed: placed.len(),
        unplaced: unplaced.len(),
    });
    Ok(PlacementResult::new(container.dims, placed, unplaced))
}

/// Finds the first valid position for an item.
///
/// Scans the anchor frontier lowest first (y, then z, then x) and tries
/// the allowed orientations in table order at each anchor. Fragile items
/// try their orientations in ascending footprint-area order instead: a
/// fragile footprint is closed to every later item, so it must never
/// cover more floor than necessary. The first candidate that passes all
/// placement rules wins.
///
/// # Returns
/// A candidate placement without an order id, or `None` when no anchor
/// and orientation combination is valid
fn find_position(
    item: &Item,
    orientations: &[Orientation],
    container: &Container,
    placed: &[Placement],
    anchors: &[Vec3],
    config: &PlacementConfig,
) -> Option<Placement> {
    let mut scan: Vec<Vec3> = anchors.to_vec();
    scan.sort_by(anchor_scan_order);

    // Smallest footprint first for fragile items; ties keep table order.
    let mut order: Vec<Orientation> = orientations.to_vec();
    if item.fragile {
        order.sort_by(|a, b| {
            let area_a = a.apply(item.dims).footprint_area();
            let area_b = b.apply(item.dims).footprint_area();
            area_a.partial_cmp(&area_b).unwrap_or(Ordering::Equal)
        });
    }

    for anchor in scan {
        for &orientation in &order {
            let extents = orientation.apply(item.dims);
            if !(anchor + extents).fits_within(&container.dims, config.general_epsilon) {
                continue;
            }

            let candidate = Placement {
                order_id: 0,
                item_id: item.id.clone(),
                name: item.name.clone(),
                position: anchor,
                dims: extents,
                orientation,
                face_up: item.face_up,
                fragile: item.fragile,
            };

            if placed.iter().any(|p| intersects(p, &candidate)) {
                continue;
            }
            if !has_sufficient_support(&candidate, placed, config) {
                continue;
            }
            if !is_center_supported(&candidate, placed, config) {
                continue;
            }
            if covers_fragile(&candidate, placed, config) {
                continue;
            }

            return Some(candidate);
        }
    }
    None
}

/// Scan order for anchors: ascending y, then z, then x.
///
/// Anchor coordinates are finite, so the plain float comparison is a
/// total order here.
fn anchor_scan_order(a: &Vec3, b: &Vec3) -> Ordering {
    a.y.partial_cmp(&b.y)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.z.partial_cmp(&b.z).unwrap_or(Ordering::Equal))
        .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
}

/// Checks if a candidate rests on enough support area.
///
/// Sums the footprint overlap with every non-fragile item whose top face
/// matches the candidate's base height, and compares the covered share
/// against the configured support ratio. Candidates on the floor are
/// always supported.
fn has_sufficient_support(b: &Placement, placed: &[Placement], config: &PlacementConfig) -> bool {
    if b.position.y <= config.height_epsilon {
        return true;
    }

    let mut support_area = 0.0;
    for p in placed {
        if p.fragile {
            continue;
        }
        let diff_y = b.position.y - p.top_y();
        if diff_y.abs() >= config.height_epsilon {
            continue;
        }
        support_area += footprint_overlap(b, p);
    }

    let base_area = b.dims.footprint_area();
    if base_area <= config.general_epsilon {
        return false;
    }

    (support_area / base_area) + config.general_epsilon >= config.support_ratio
}

/// Checks if the candidate's footprint center rests on a supporting item.
///
/// At least one carrying item must lie directly under the projected
/// center point (matching top height, XZ footprint containing the
/// point). Rejects overhangs that pass the area check while the center
/// hangs over a gap.
fn is_center_supported(b: &Placement, placed: &[Placement], config: &PlacementConfig) -> bool {
    if b.position.y <= config.height_epsilon {
        return true;
    }

    let center_x = b.position.x + b.dims.x / 2.0;
    let center_z = b.position.z + b.dims.z / 2.0;

    for p in placed {
        if p.fragile {
            continue;
        }
        if (b.position.y - p.top_y()).abs() > config.height_epsilon {
            continue;
        }
        // Test at the supporter's own top height so the inclusive bounds
        // of point_inside apply cleanly.
        if point_inside(Vec3::new(center_x, p.top_y(), center_z), p) {
            return true;
        }
    }
    false
}

/// Checks if a candidate would sit over a fragile item.
///
/// Fragile items are terminal in their column: any candidate whose
/// footprint overlaps a placed fragile item at or above its top height is
/// rejected, whether it touches or floats.
fn covers_fragile(b: &Placement, placed: &[Placement], config: &PlacementConfig) -> bool {
    placed.iter().any(|p| {
        p.fragile
            && footprint_overlap(b, p) > config.general_epsilon
            && b.position.y >= p.top_y() - config.height_epsilon
    })
}

/// Adds the anchors derived from a new placement to the frontier.
///
/// A placement contributes its far corners at base height, their floor
/// projections, and its top corner. Fragile items contribute no top
/// anchor, so nothing is ever proposed on top of them.
fn extend_frontier(
    anchors: &mut Vec<Vec3>,
    placement: &Placement,
    container: &Container,
    config: &PlacementConfig,
) {
    let p = placement.position;
    let d = placement.dims;

    push_anchor(anchors, Vec3::new(p.x + d.x, p.y, p.z), container, config);
    push_anchor(anchors, Vec3::new(p.x, p.y, p.z + d.z), container, config);
    push_anchor(anchors, Vec3::new(p.x + d.x, 0.0, p.z), container, config);
    push_anchor(anchors, Vec3::new(p.x, 0.0, p.z + d.z), container, config);
    if !placement.fragile {
        push_anchor(
            anchors,
            Vec3::new(p.x, placement.top_y(), p.z),
            container,
            config,
        );
    }
}

/// Inserts an anchor unless it is out of bounds or already known.
fn push_anchor(
    anchors: &mut Vec<Vec3>,
    candidate: Vec3,
    container: &Container,
    config: &PlacementConfig,
) {
    // An anchor flush with a container face can never host an item.
    if candidate.x >= container.dims.x - config.general_epsilon
        || candidate.y >= container.dims.y - config.general_epsilon
        || candidate.z >= container.dims.z - config.general_epsilon
    {
        return;
    }

    let known = anchors.iter().any(|a| {
        (a.x - candidate.x).abs() < config.general_epsilon
            && (a.y - candidate.y).abs() < config.general_epsilon
            && (a.z - candidate.z).abs() < config.general_epsilon
    });
    if !known {
        anchors.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_container(w: f64, h: f64, d: f64) -> Container {
        Container::new(Vec3::new(w, h, d)).unwrap()
    }

    fn test_item(id: &str, w: f64, h: f64, d: f64) -> Item {
        Item::new(id, id, Vec3::new(w, h, d))
    }

    fn assert_invariants(result: &PlacementResult, config: &PlacementConfig) {
        let bounds = result.container;
        for p in &result.placements {
            assert!(
                (p.position + p.dims).fits_within(&bounds, config.general_epsilon),
                "placement {} leaves the container",
                p.item_id
            );
            assert!(p.position.x >= -config.general_epsilon);
            assert!(p.position.y >= -config.general_epsilon);
            assert!(p.position.z >= -config.general_epsilon);
        }

        for (i, a) in result.placements.iter().enumerate() {
            for b in result.placements.iter().skip(i + 1) {
                assert!(
                    !intersects(a, b),
                    "placements {} and {} overlap",
                    a.item_id,
                    b.item_id
                );
            }
        }

        for p in &result.placements {
            if p.position.y <= config.height_epsilon {
                continue;
            }
            let others: Vec<Placement> = result
                .placements
                .iter()
                .filter(|other| other.order_id != p.order_id)
                .cloned()
                .collect();
            assert!(
                has_sufficient_support(p, &others, config),
                "placement {} floats without support",
                p.item_id
            );
        }

        for p in &result.placements {
            if p.face_up {
                assert!(
                    p.orientation.keeps_up_axis(),
                    "placement {} tipped a face-up item",
                    p.item_id
                );
            }
        }
    }

    #[test]
    fn first_item_lands_at_origin() {
        let container = test_container(10.0, 10.0, 10.0);
        let items = vec![test_item("item0001", 4.0, 4.0, 4.0)];

        let result = place(&container, &items).unwrap();
        assert!(result.is_feasible());
        assert_eq!(result.placed_count(), 1);

        let placement = &result.placements[0];
        assert_eq!(placement.position, Vec3::zero());
        assert_eq!(placement.order_id, 1);
        assert_eq!(placement.item_id, "item0001");
        assert!((result.utilization_percent - 6.4).abs() < 1e-9);
    }

    #[test]
    fn empty_item_list_is_trivially_feasible() {
        let container = test_container(10.0, 10.0, 10.0);
        let result = place(&container, &[]).unwrap();

        assert!(result.is_feasible());
        assert_eq!(result.placed_count(), 0);
        assert_eq!(result.unplaced_count(), 0);
        assert!((result.utilization_percent - 0.0).abs() < 1e-9);
    }

    #[test]
    fn identical_inputs_produce_identical_results() {
        let container = test_container(12.0, 9.0, 7.0);
        let items = vec![
            test_item("a", 4.0, 3.0, 4.0),
            test_item("b", 5.0, 2.0, 3.0).with_fragile(true),
            test_item("c", 3.0, 3.0, 3.0).with_face_up(true),
            test_item("d", 6.0, 2.0, 2.0),
        ];

        let first = place(&container, &items).unwrap();
        let second = place(&container, &items).unwrap();

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn second_oversized_item_is_reported_not_fatal() {
        let container = test_container(5.0, 5.0, 5.0);
        let items = vec![
            test_item("item0001", 4.0, 4.0, 4.0),
            test_item("item0002", 4.0, 4.0, 4.0),
        ];

        let result = place(&container, &items).unwrap();
        assert!(!result.is_feasible());
        assert_eq!(result.placed_count(), 1);
        assert_eq!(result.placements[0].position, Vec3::zero());
        assert_eq!(result.unplaced_ids(), vec!["item0002"]);
        assert_eq!(result.unplaced[0].reason, UnplacedReason::NoValidPosition);
    }

    #[test]
    fn search_continues_after_a_failed_item() {
        let container = test_container(6.0, 6.0, 6.0);
        let items = vec![
            test_item("a", 3.0, 3.0, 3.0),
            test_item("too-big", 7.0, 3.0, 3.0),
            test_item("c", 3.0, 3.0, 3.0),
        ];

        let result = place(&container, &items).unwrap();
        assert_eq!(result.placed_count(), 2);
        assert_eq!(result.placements[0].item_id, "a");
        assert_eq!(result.placements[0].order_id, 1);
        assert_eq!(result.placements[1].item_id, "c");
        assert_eq!(result.placements[1].order_id, 2);
        assert_eq!(result.unplaced_ids(), vec!["too-big"]);
        assert_eq!(result.unplaced[0].reason, UnplacedReason::ExceedsContainer);
    }

    #[test]
    fn touching_faces_are_allowed() {
        let container = test_container(10.0, 5.0, 5.0);
        let items = vec![
            test_item("left", 5.0, 5.0, 5.0),
            test_item("right", 5.0, 5.0, 5.0),
        ];

        let result = place(&container, &items).unwrap();
        assert!(result.is_feasible());
        assert_eq!(result.placements[1].position, Vec3::new(5.0, 0.0, 0.0));
        assert_invariants(&result, &PlacementConfig::default());
    }

    #[test]
    fn face_up_item_cannot_lie_down() {
        let container = test_container(10.0, 2.0, 10.0);
        let upright = vec![test_item("tall", 2.0, 6.0, 3.0).with_face_up(true)];

        let result = place(&container, &upright).unwrap();
        assert!(!result.is_feasible());
        assert_eq!(result.unplaced[0].reason, UnplacedReason::ExceedsContainer);

        // The same shape without the constraint tips over and fits.
        let free = vec![test_item("tall", 2.0, 6.0, 3.0)];
        let result = place(&container, &free).unwrap();
        assert!(result.is_feasible());
        let placement = &result.placements[0];
        assert_eq!(placement.dims, Vec3::new(6.0, 2.0, 3.0));
        assert_eq!(placement.orientation.index(), 2);
    }

    #[test]
    fn disabling_rotations_keeps_the_given_orientation() {
        let container = test_container(5.0, 3.0, 5.0);
        let items = vec![test_item("slab", 3.0, 5.0, 3.0)];

        let rotated = place(&container, &items).unwrap();
        assert!(rotated.is_feasible());
        assert!(rotated.placements[0].dims.y <= 3.0 + EPSILON_GENERAL);

        let fixed_config = PlacementConfig::builder().allow_rotations(false).build();
        let fixed = place_with_config(&container, &items, fixed_config).unwrap();
        assert!(!fixed.is_feasible());
        assert_eq!(fixed.unplaced[0].reason, UnplacedReason::ExceedsContainer);
    }

    #[test]
    fn items_stack_when_the_floor_is_full() {
        let container = test_container(4.0, 8.0, 4.0);
        let items = vec![
            test_item("base", 4.0, 4.0, 4.0),
            test_item("top", 4.0, 4.0, 4.0),
        ];

        let result = place(&container, &items).unwrap();
        assert!(result.is_feasible());
        assert_eq!(result.placements[1].position, Vec3::new(0.0, 4.0, 0.0));
        assert_invariants(&result, &PlacementConfig::default());
    }

    #[test]
    fn full_support_spans_several_tops() {
        let container = test_container(8.0, 10.0, 4.0);
        let items = vec![
            test_item("left", 4.0, 4.0, 4.0),
            test_item("right", 4.0, 4.0, 4.0),
            test_item("bridge", 8.0, 4.0, 4.0),
        ];

        let result = place(&container, &items).unwrap();
        assert!(result.is_feasible());

        let bridge = &result.placements[2];
        assert_eq!(bridge.position, Vec3::new(0.0, 4.0, 0.0));
        assert_invariants(&result, &PlacementConfig::default());
    }

    #[test]
    fn partial_support_is_rejected_by_default() {
        // The floor is fully covered by two plinths of different height,
        // so the long item can only lie across the taller one with half
        // of its footprint hanging over the gap.
        let container = test_container(4.0, 8.0, 8.0);
        let items = vec![
            test_item("tall-plinth", 4.0, 4.0, 4.0),
            test_item("short-plinth", 4.0, 2.0, 4.0),
            test_item("beam", 4.0, 4.0, 8.0),
        ];

        let result = place(&container, &items).unwrap();
        assert!(!result.is_feasible());
        assert_eq!(result.unplaced_ids(), vec!["beam"]);
        assert_eq!(result.unplaced[0].reason, UnplacedReason::NoValidPosition);

        // Lowering the required support share lets the overhang through.
        let relaxed = PlacementConfig::builder().support_ratio(0.5).build();
        let result = place_with_config(&container, &items, relaxed).unwrap();
        assert!(result.is_feasible());
        assert_eq!(result.placements[2].position, Vec3::new(0.0, 4.0, 0.0));
        assert_eq!(result.placements[2].dims, Vec3::new(4.0, 4.0, 8.0));
    }

    #[test]
    fn nothing_rests_on_a_fragile_item() {
        let container = test_container(4.0, 8.0, 4.0);
        let items = vec![
            test_item("glass", 4.0, 4.0, 4.0).with_fragile(true),
            test_item("brick", 4.0, 4.0, 4.0),
        ];

        let result = place(&container, &items).unwrap();
        assert!(!result.is_feasible());
        assert_eq!(result.unplaced_ids(), vec!["brick"]);
        assert_eq!(result.unplaced[0].reason, UnplacedReason::NoValidPosition);

        // Without the flag the same pair stacks.
        let tougher = vec![
            test_item("glass", 4.0, 4.0, 4.0),
            test_item("brick", 4.0, 4.0, 4.0),
        ];
        let result = place(&container, &tougher).unwrap();
        assert!(result.is_feasible());
    }

    #[test]
    fn fragile_items_go_beside_instead_of_on_top() {
        let container = test_container(10.0, 10.0, 10.0);
        let items = vec![
            test_item("glass", 4.0, 4.0, 4.0).with_fragile(true),
            test_item("a", 4.0, 4.0, 4.0),
            test_item("b", 4.0, 4.0, 4.0),
        ];

        let result = place(&container, &items).unwrap();
        assert!(result.is_feasible());
        assert_eq!(result.placements[1].position, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(result.placements[2].position, Vec3::new(0.0, 0.0, 4.0));

        let glass = &result.placements[0];
        for p in &result.placements[1..] {
            let cleared = p.position.y >= glass.top_y() - EPSILON_HEIGHT;
            assert!(
                footprint_overlap(p, glass) < EPSILON_GENERAL || !cleared,
                "{} sits over the fragile column",
                p.item_id
            );
        }
        assert_invariants(&result, &PlacementConfig::default());
    }

    #[test]
    fn stacking_beside_a_fragile_column_is_allowed() {
        let container = test_container(8.0, 8.0, 4.0);
        let items = vec![
            test_item("glass", 4.0, 4.0, 4.0).with_fragile(true),
            test_item("base", 4.0, 4.0, 4.0),
            test_item("top", 4.0, 4.0, 4.0),
        ];

        let result = place(&container, &items).unwrap();
        assert!(result.is_feasible());
        // The third item stacks on the plain neighbor, not the glass.
        assert_eq!(result.placements[1].position, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(result.placements[2].position, Vec3::new(4.0, 4.0, 0.0));
        assert_invariants(&result, &PlacementConfig::default());
    }

    #[test]
    fn growing_the_container_preserves_feasibility() {
        let items = vec![
            test_item("a", 3.0, 3.0, 3.0),
            test_item("b", 3.0, 3.0, 3.0),
            test_item("c", 3.0, 3.0, 3.0),
            test_item("d", 3.0, 3.0, 3.0),
        ];

        let snug = place(&test_container(6.0, 3.0, 6.0), &items).unwrap();
        assert!(snug.is_feasible());

        let roomy = place(&test_container(7.0, 4.0, 7.0), &items).unwrap();
        assert!(roomy.is_feasible());
        assert_invariants(&roomy, &PlacementConfig::default());
    }

    #[test]
    fn growing_the_container_keeps_a_fragile_load_feasible() {
        // In the wider container the slab could lie flat across the whole
        // floor; the footprint-first orientation order keeps it narrow so
        // the pebble still finds floor space.
        let items = vec![
            test_item("slab", 4.0, 2.0, 4.0).with_fragile(true),
            test_item("pebble", 1.0, 1.0, 1.0),
        ];

        let narrow = place(&test_container(3.0, 6.0, 4.0), &items).unwrap();
        assert!(narrow.is_feasible());

        let wide = place(&test_container(4.0, 6.0, 4.0), &items).unwrap();
        assert!(wide.is_feasible());
        assert_invariants(&wide, &PlacementConfig::default());
    }

    #[test]
    fn events_mirror_the_result() {
        let container = test_container(5.0, 5.0, 5.0);
        let items = vec![
            test_item("item0001", 4.0, 4.0, 4.0),
            test_item("item0002", 4.0, 4.0, 4.0),
        ];

        let mut events: Vec<PlacementEvent> = Vec::new();
        let result = place_with_observer(
            &container,
            &items,
            PlacementConfig::default(),
            |event| events.push(event.clone()),
        )
        .unwrap();

        assert_eq!(events.len(), 3);
        match &events[0] {
            PlacementEvent::ItemPlaced {
                id,
                order_id,
                position,
                ..
            } => {
                assert_eq!(id, "item0001");
                assert_eq!(*order_id, 1);
                assert_eq!(*position, Vec3::zero());
            }
            other => panic!("unexpected first event: {:?}", other),
        }
        match &events[1] {
            PlacementEvent::ItemRejected {
                id, reason_code, ..
            } => {
                assert_eq!(id, "item0002");
                assert_eq!(reason_code, "no_valid_position");
            }
            other => panic!("unexpected second event: {:?}", other),
        }
        match &events[2] {
            PlacementEvent::Finished { placed, unplaced } => {
                assert_eq!(*placed, result.placed_count());
                assert_eq!(*unplaced, result.unplaced_count());
            }
            other => panic!("unexpected final event: {:?}", other),
        }

        let json = serde_json::to_string(&events[0]).unwrap();
        assert!(json.contains(r#""type":"ItemPlaced""#));
    }

    #[test]
    fn malformed_input_is_an_error_not_a_result() {
        let bad_container = Container {
            dims: Vec3::new(10.0, -1.0, 10.0),
        };
        let items = vec![test_item("a", 1.0, 1.0, 1.0)];
        assert!(place(&bad_container, &items).is_err());

        let container = test_container(10.0, 10.0, 10.0);
        let bad_items = vec![test_item("a", 1.0, 0.0, 1.0)];
        let err = place(&container, &bad_items).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidItemDimension { index: 0, .. }
        ));

        let anonymous = vec![Item::new("", "Ghost", Vec3::new(1.0, 1.0, 1.0))];
        let err = place(&container, &anonymous).unwrap_err();
        assert_eq!(err, ValidationError::MissingItemId { index: 0 });
    }

    #[test]
    fn mixed_load_keeps_all_invariants() {
        let config = PlacementConfig::default();
        let container = test_container(12.0, 10.0, 8.0);
        let items = vec![
            test_item("pallet", 6.0, 2.0, 4.0),
            test_item("crate", 4.0, 4.0, 4.0),
            test_item("screen", 6.0, 4.0, 1.0).with_face_up(true).with_fragile(true),
            test_item("box", 3.0, 3.0, 3.0),
            test_item("bar", 6.0, 2.0, 2.0),
        ];

        let result = place(&container, &items).unwrap();
        assert_eq!(result.placed_count() + result.unplaced_count(), items.len());
        assert_invariants(&result, &config);

        // Order ids are consecutive and follow input order.
        for (i, p) in result.placements.iter().enumerate() {
            assert_eq!(p.order_id, i + 1);
        }
        let input_order: Vec<usize> = result
            .placements
            .iter()
            .map(|p| items.iter().position(|it| it.id == p.item_id).unwrap())
            .collect();
        let mut sorted = input_order.clone();
        sorted.sort();
        assert_eq!(input_order, sorted);

        // The face-up screen keeps its original height upright.
        let screen = result.placements.iter().find(|p| p.item_id == "screen").unwrap();
        assert!((screen.dims.y - 4.0).abs() < EPSILON_GENERAL);
    }
}
