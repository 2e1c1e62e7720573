#![forbid(unsafe_code)]

//! Movement/collision engine: position → [`Impact`].
//!
//! Given the dragged item's current center (already scroll-adjusted into
//! page coordinates) and the captured dimensions, [`compute_impact`] decides
//! which droppable is under the drag, the insertion index inside it, and
//! which resting items must shift to make room. [`move_by`] is the keyboard
//! path: discrete index arithmetic with no pixel geometry.
//!
//! # Invariants
//!
//! 1. The dragged item never appears in `displaced`.
//! 2. Identical input produces identical impacts (no accumulation): a center
//!    exactly on a resting item's midpoint does not cross it, so the
//!    destination stays at the index closer to the source and repeated
//!    identical moves are a fixed point.
//! 3. `displaced` is the contiguous run of items between the source and
//!    destination index, in list order.
//!
//! # Failure Modes
//!
//! - Center over no droppable: `destination: None` (drop there is treated
//!   as cancel-at-location by the state machine).
//! - Missing geometry for a referenced id: same as "no destination" for
//!   this tick, logged at debug level.

use crate::error::DragError;
use crate::sensors::MoveDirection;
use dropkit_core::{
    Axis, DimensionSet, Displaced, DraggableLocation, DroppableDimension, Impact, Position,
};
use tracing::debug;

/// Inputs to one impact computation.
#[derive(Debug, Clone, Copy)]
pub struct ImpactArgs<'a> {
    /// Dragged item center, page coordinates, scroll-adjusted.
    pub center: Position,
    /// Geometry captured at lift.
    pub dimensions: &'a DimensionSet,
    /// Where the drag started.
    pub source: &'a DraggableLocation,
    /// Whether displacements should animate. `false` only for the very
    /// first impact after drag start.
    pub animate: bool,
}

/// Compute the impact for the current dragged-item center.
#[must_use]
pub fn compute_impact(args: ImpactArgs<'_>) -> Impact {
    let Some(over) = droppable_over(args.center, args.dimensions) else {
        return Impact::none();
    };

    if over.id == args.dimensions.draggable().droppable_id {
        in_home(args, over)
    } else {
        in_foreign(args, over)
    }
}

/// The first droppable (registration order) whose active rect contains the
/// center, accounting for container clipping.
fn droppable_over<'a>(center: Position, dimensions: &'a DimensionSet) -> Option<&'a DroppableDimension> {
    dimensions
        .droppables()
        .find(|d| d.active_rect().is_some_and(|rect| rect.contains(center)))
}

/// Reorder within the dragged item's home list.
fn in_home(args: ImpactArgs<'_>, home: &DroppableDimension) -> Impact {
    let dragged_id = &args.dimensions.draggable().id;
    let Some(source_index) = home.index_of(dragged_id) else {
        debug!(error = %DragError::MissingDraggable(dragged_id.clone()), "impact degraded");
        return Impact::none();
    };

    let axis = home.axis;
    let main_center = axis.main(args.center);

    // Forward: resting items after the source whose midpoint the center has
    // passed. A center exactly on a midpoint has not passed it.
    let mut displaced: Vec<Displaced> = home
        .items
        .iter()
        .enumerate()
        .filter(|(index, _)| *index > source_index)
        .take_while(|(_, item)| main_center > midpoint(home, item, axis))
        .map(|(_, item)| displace(item, args.animate))
        .collect();

    if !displaced.is_empty() {
        let destination = DraggableLocation {
            droppable_id: home.id.clone(),
            index: source_index + displaced.len(),
        };
        return Impact {
            destination: Some(destination),
            displaced,
        };
    }

    // Backward: resting items before the source whose midpoint the center
    // has crossed back over. These form a suffix of the prefix, in order.
    displaced = home
        .items
        .iter()
        .enumerate()
        .filter(|(index, _)| *index < source_index)
        .filter(|(_, item)| main_center < midpoint(home, item, axis))
        .map(|(_, item)| displace(item, args.animate))
        .collect();

    let destination = DraggableLocation {
        droppable_id: home.id.clone(),
        index: source_index - displaced.len(),
    };
    Impact {
        destination: Some(destination),
        displaced,
    }
}

/// Insert into a list the dragged item does not belong to.
fn in_foreign(args: ImpactArgs<'_>, target: &DroppableDimension) -> Impact {
    let axis = target.axis;
    let main_center = axis.main(args.center);

    // Insertion index: count of resting items whose midpoint the center has
    // passed. Everything at or after that index shifts to make room.
    let index = target
        .items
        .iter()
        .take_while(|item| main_center > midpoint(target, item, axis))
        .count();

    let displaced = target.items[index..]
        .iter()
        .map(|item| displace(item, args.animate))
        .collect();

    Impact {
        destination: Some(DraggableLocation {
            droppable_id: target.id.clone(),
            index,
        }),
        displaced,
    }
}

fn midpoint(droppable: &DroppableDimension, item: &dropkit_core::DraggableDimension, axis: Axis) -> f64 {
    axis.main(droppable.item_rect(item).center())
}

fn displace(item: &dropkit_core::DraggableDimension, animate: bool) -> Displaced {
    Displaced {
        draggable_id: item.id.clone(),
        should_animate: animate,
    }
}

// ---------------------------------------------------------------------------
// Keyboard moves
// ---------------------------------------------------------------------------

/// Apply a discrete keyboard move to the current impact.
///
/// Main-axis arrows step the index by one within the current droppable;
/// cross-axis arrows jump to the geometrically adjacent droppable on the
/// requested side. A move with nowhere to go returns the impact unchanged.
#[must_use]
pub fn move_by(
    current: &Impact,
    direction: MoveDirection,
    source: &DraggableLocation,
    dimensions: &DimensionSet,
) -> Impact {
    let location = current.destination.clone().unwrap_or_else(|| source.clone());
    let Some(droppable) = dimensions.droppable(&location.droppable_id) else {
        debug!(
            error = %DragError::MissingDroppable(location.droppable_id.clone()),
            "keyboard move degraded"
        );
        return Impact::none();
    };

    match step_for(droppable.axis, direction) {
        Step::Main(delta) => move_on_main_axis(&location, delta, droppable, source, dimensions),
        Step::Cross(delta) => move_across(&location, delta, droppable, source, dimensions),
    }
}

enum Step {
    /// ±1 along the droppable's list order.
    Main(isize),
    /// ±1 toward the adjacent droppable.
    Cross(isize),
}

fn step_for(axis: Axis, direction: MoveDirection) -> Step {
    match (axis, direction) {
        (Axis::Vertical, MoveDirection::Up) => Step::Main(-1),
        (Axis::Vertical, MoveDirection::Down) => Step::Main(1),
        (Axis::Vertical, MoveDirection::Left) => Step::Cross(-1),
        (Axis::Vertical, MoveDirection::Right) => Step::Cross(1),
        (Axis::Horizontal, MoveDirection::Left) => Step::Main(-1),
        (Axis::Horizontal, MoveDirection::Right) => Step::Main(1),
        (Axis::Horizontal, MoveDirection::Up) => Step::Cross(-1),
        (Axis::Horizontal, MoveDirection::Down) => Step::Cross(1),
    }
}

/// Highest valid index in a droppable: the home list already contains the
/// dragged item, a foreign list gains a slot at the end.
fn max_index(droppable: &DroppableDimension, is_home: bool) -> usize {
    if is_home {
        droppable.items.len().saturating_sub(1)
    } else {
        droppable.items.len()
    }
}

fn move_on_main_axis(
    location: &DraggableLocation,
    delta: isize,
    droppable: &DroppableDimension,
    source: &DraggableLocation,
    dimensions: &DimensionSet,
) -> Impact {
    let is_home = droppable.id == source.droppable_id;
    let proposed = location.index.saturating_add_signed(delta);
    let clamped = proposed.min(max_index(droppable, is_home));
    if clamped == location.index {
        // Already at the boundary: nothing to do.
        return Impact {
            destination: Some(location.clone()),
            displaced: displacement(droppable, source, location.index, is_home, dimensions),
        };
    }

    Impact {
        destination: Some(DraggableLocation {
            droppable_id: droppable.id.clone(),
            index: clamped,
        }),
        displaced: displacement(droppable, source, clamped, is_home, dimensions),
    }
}

fn move_across(
    location: &DraggableLocation,
    delta: isize,
    droppable: &DroppableDimension,
    source: &DraggableLocation,
    dimensions: &DimensionSet,
) -> Impact {
    let Some(target) = adjacent_droppable(droppable, delta, dimensions) else {
        return Impact {
            destination: Some(location.clone()),
            displaced: displacement(
                droppable,
                source,
                location.index,
                droppable.id == source.droppable_id,
                dimensions,
            ),
        };
    };

    let is_home = target.id == source.droppable_id;
    let index = location.index.min(max_index(target, is_home));
    Impact {
        destination: Some(DraggableLocation {
            droppable_id: target.id.clone(),
            index,
        }),
        displaced: displacement(target, source, index, is_home, dimensions),
    }
}

/// The nearest droppable strictly on the requested side (by cross-axis
/// center), preferring the smallest cross distance.
fn adjacent_droppable<'a>(
    from: &DroppableDimension,
    delta: isize,
    dimensions: &'a DimensionSet,
) -> Option<&'a DroppableDimension> {
    let axis = from.axis;
    let here = axis.cross(from.client.center());
    dimensions
        .droppables()
        .filter(|d| d.id != from.id)
        .filter_map(|d| {
            let there = axis.cross(d.client.center());
            let offset = there - here;
            let on_requested_side = (delta > 0 && offset > 0.0) || (delta < 0 && offset < 0.0);
            on_requested_side.then(|| (offset.abs(), d))
        })
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, d)| d)
}

/// Displacement for a known destination index, by index arithmetic.
fn displacement(
    droppable: &DroppableDimension,
    source: &DraggableLocation,
    index: usize,
    is_home: bool,
    dimensions: &DimensionSet,
) -> Vec<Displaced> {
    let dragged_id = &dimensions.draggable().id;
    if is_home {
        let s = source.index;
        let range = if index > s { (s + 1)..=index } else { index..=s.saturating_sub(1) };
        if index == s {
            return Vec::new();
        }
        droppable
            .items
            .iter()
            .enumerate()
            .filter(|(i, item)| range.contains(i) && &item.id != dragged_id)
            .map(|(_, item)| displace(item, true))
            .collect()
    } else {
        droppable
            .items
            .get(index..)
            .unwrap_or(&[])
            .iter()
            .map(|item| displace(item, true))
            .collect()
    }
}
