#![forbid(unsafe_code)]
#![allow(dead_code)] // each test binary uses a subset

//! Shared fixtures: two vertical lists side by side, dragging `a-1`.
//!
//! List `a` has four 100x50 items at x 0..100; list `b` has two at
//! x 200..300. The viewport is 1000x600 with 400px of vertical window
//! scroll available. All scroll offsets start at zero, so viewport and
//! page coordinates coincide at lift.

use dropkit_core::{
    Axis, DimensionSet, DraggableDimension, DraggableId, DroppableDimension, DroppableId,
    Position, Rect, ScrollState, Viewport,
};
use dropkit_engine::{
    DragAction, DragController, LifecycleEvent, RecordingObserver, SensorOutput,
};
use std::cell::RefCell;
use std::rc::Rc;
use web_time::Instant;

pub const ITEM_HEIGHT: f64 = 50.0;

pub fn item(id: &str, droppable: &str, index: usize, left: f64) -> DraggableDimension {
    let top = index as f64 * ITEM_HEIGHT;
    DraggableDimension {
        id: DraggableId::new(id),
        droppable_id: DroppableId::new(droppable),
        client: Rect::new(top, left + 100.0, top + ITEM_HEIGHT, left),
    }
}

pub fn list(id: &str, n: usize, left: f64) -> DroppableDimension {
    DroppableDimension {
        id: DroppableId::new(id),
        axis: Axis::Vertical,
        client: Rect::new(0.0, left + 100.0, n as f64 * ITEM_HEIGHT, left),
        frame: None,
        items: (0..n)
            .map(|i| item(&format!("{id}-{i}"), id, i, left))
            .collect(),
    }
}

pub fn viewport(scroll_y: f64, max_y: f64) -> Viewport {
    Viewport {
        frame: Rect::new(scroll_y, 1000.0, scroll_y + 600.0, 0.0),
        scroll: ScrollState::new(Position::new(0.0, scroll_y), Position::new(0.0, max_y)),
    }
}

pub fn dimensions() -> DimensionSet {
    DimensionSet::new(
        item("a-1", "a", 1, 0.0),
        vec![list("a", 4, 0.0), list("b", 2, 200.0)],
        viewport(0.0, 400.0),
    )
}

/// The dragged item's center at lift, viewport coordinates.
pub fn origin() -> Position {
    Position::new(50.0, 75.0)
}

pub fn recording_controller() -> (DragController, Rc<RefCell<Vec<LifecycleEvent>>>) {
    let (observer, events) = RecordingObserver::new();
    (DragController::new(Box::new(observer)), events)
}

/// Forward sensor output to a controller, the way a host event loop would.
/// Lifts snapshot the shared two-list fixture.
pub fn apply(controller: &mut DragController, output: SensorOutput, now: Instant) {
    for action in output.actions {
        match action {
            DragAction::Lift {
                draggable_id,
                origin,
            } => controller.lift(draggable_id, origin, dimensions(), now),
            DragAction::MoveTo { position } => controller.move_to(position),
            DragAction::MoveBy { direction } => controller.move_by(direction),
            DragAction::Drop => controller.drop(),
            DragAction::Cancel => controller.cancel(),
        }
    }
}

/// Count events of each lifecycle kind: (before, start, update, end).
pub fn tally(events: &[LifecycleEvent]) -> (usize, usize, usize, usize) {
    let mut counts = (0, 0, 0, 0);
    for event in events {
        match event {
            LifecycleEvent::BeforeStart(_) => counts.0 += 1,
            LifecycleEvent::Start(_) => counts.1 += 1,
            LifecycleEvent::Update(_) => counts.2 += 1,
            LifecycleEvent::End(_) => counts.3 += 1,
        }
    }
    counts
}
