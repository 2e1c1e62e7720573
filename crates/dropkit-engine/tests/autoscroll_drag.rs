#![forbid(unsafe_code)]

//! Auto-scrolling during a drag: ticks near an edge produce scroll
//! requests, committed scroll feeds back into the impact, and exhausted
//! directions go quiet instead of emitting zero-magnitude deltas.

mod common;

use common::{item, list, recording_controller, viewport};
use dropkit_core::{
    DimensionSet, DraggableId, DraggableLocation, DroppableId, Position, Rect, ScrollFrame,
    ScrollState,
};
use dropkit_engine::{MoveDirection, ScrollRequest};
use web_time::{Duration, Instant};

/// One 20-item list taller than the viewport, dragging `long-1`.
fn long_dimensions() -> DimensionSet {
    DimensionSet::new(
        item("long-1", "long", 1, 0.0),
        vec![list("long", 20, 0.0)],
        viewport(0.0, 400.0),
    )
}

/// Holding near the bottom of the viewport scrolls the window down at full
/// speed once the post-lift grace window has passed.
#[test]
fn holding_near_the_edge_scrolls_the_window() {
    let (mut controller, _events) = recording_controller();
    let t0 = Instant::now();
    controller.lift(
        DraggableId::new("long-1"),
        Some(Position::new(50.0, 75.0)),
        long_dimensions(),
        t0,
    );
    controller.move_to(Position::new(50.0, 595.0));

    let request = controller.tick(t0 + Duration::from_secs(2));
    assert_eq!(
        request,
        Some(ScrollRequest::Window {
            delta: Position::new(0.0, 28.0)
        })
    );
}

/// A committed window scroll moves the effective center, so holding still
/// keeps crossing midpoints and the destination keeps advancing.
#[test]
fn committed_scroll_advances_the_impact() {
    let (mut controller, _events) = recording_controller();
    let t0 = Instant::now();
    controller.lift(
        DraggableId::new("long-1"),
        Some(Position::new(50.0, 75.0)),
        long_dimensions(),
        t0,
    );
    controller.move_to(Position::new(50.0, 595.0));
    assert_eq!(
        controller.impact().and_then(|i| i.destination.clone()),
        Some(DraggableLocation::new("long", 11))
    );

    let later = t0 + Duration::from_secs(2);
    controller.tick(later);
    controller.tick(later);
    assert_eq!(
        controller.impact().and_then(|i| i.destination.clone()),
        Some(DraggableLocation::new("long", 12)),
        "56px of committed scroll crosses the next midpoint"
    );
}

/// A window already at its maximum scroll yields no request at all.
#[test]
fn an_exhausted_window_yields_no_request() {
    let (mut controller, _events) = recording_controller();
    let t0 = Instant::now();
    // window scrolled to its 400px maximum; dragging an item that is
    // visible in the scrolled viewport
    let dims = DimensionSet::new(
        item("long-10", "long", 10, 0.0),
        vec![list("long", 20, 0.0)],
        viewport(400.0, 400.0),
    );
    controller.lift(
        DraggableId::new("long-10"),
        Some(Position::new(50.0, 125.0)),
        dims,
        t0,
    );
    // effective center lands 25px above the visible bottom edge
    controller.move_to(Position::new(50.0, 575.0));

    assert_eq!(controller.tick(t0 + Duration::from_secs(2)), None);
}

/// Right after lift the scroller crawls; it only reaches full speed once
/// the dampening window has passed.
#[test]
fn early_ticks_crawl_under_time_dampening() {
    let (mut controller, _events) = recording_controller();
    let t0 = Instant::now();
    // lifting near the top edge of the viewport enables dampening
    controller.lift(
        DraggableId::new("long-1"),
        Some(Position::new(50.0, 75.0)),
        long_dimensions(),
        t0,
    );
    controller.move_to(Position::new(50.0, 595.0));

    let early = controller.tick(t0 + Duration::from_millis(100));
    assert_eq!(
        early,
        Some(ScrollRequest::Window {
            delta: Position::new(0.0, 1.0)
        })
    );

    let late = controller.tick(t0 + Duration::from_secs(2));
    assert_eq!(
        late,
        Some(ScrollRequest::Window {
            delta: Position::new(0.0, 28.0)
        })
    );
}

/// Keyboard drags move by index, so frame ticks must neither scroll the
/// window under them nor overwrite the stepped destination with pixel
/// geometry, even when the lifted item sits inside a scroll band.
#[test]
fn ticks_leave_keyboard_drags_alone() {
    let (mut controller, _events) = recording_controller();
    let t0 = Instant::now();
    // long-10 spans y 500..550: inside the viewport's bottom scroll band
    let dims = DimensionSet::new(
        item("long-10", "long", 10, 0.0),
        vec![list("long", 20, 0.0)],
        viewport(0.0, 400.0),
    );
    controller.lift(DraggableId::new("long-10"), None, dims, t0);
    controller.move_by(MoveDirection::Up);
    assert_eq!(
        controller.impact().and_then(|i| i.destination.clone()),
        Some(DraggableLocation::new("long", 9))
    );

    assert_eq!(controller.tick(t0 + Duration::from_secs(2)), None);
    assert_eq!(
        controller.impact().and_then(|i| i.destination.clone()),
        Some(DraggableLocation::new("long", 9)),
        "a tick must not disturb a stepped destination"
    );
}

/// Container scrolling is committed to the container's own scroll state:
/// item rects shift and the destination advances while the window stays put.
#[test]
fn container_scroll_commits_to_the_container() {
    let (mut controller, _events) = recording_controller();
    let t0 = Instant::now();

    let mut dims = DimensionSet::new(
        item("long-1", "long", 1, 0.0),
        vec![list("long", 20, 0.0)],
        viewport(0.0, 400.0),
    );
    let id = DroppableId::new("long");
    dims.droppable_mut(&id).expect("fixture droppable").frame = Some(ScrollFrame {
        frame: Rect::new(0.0, 100.0, 300.0, 0.0),
        scroll: ScrollState::new(Position::ZERO, Position::new(0.0, 700.0)),
    });

    controller.lift(
        DraggableId::new("long-1"),
        Some(Position::new(50.0, 75.0)),
        dims,
        t0,
    );
    // near the bottom of the 300px container frame, nowhere near the
    // viewport's own edge
    controller.move_to(Position::new(50.0, 295.0));
    let before = controller
        .impact()
        .and_then(|i| i.destination.clone())
        .expect("over the list");

    let later = t0 + Duration::from_secs(2);
    let request = controller.tick(later);
    match request {
        Some(ScrollRequest::Droppable { id: got, delta }) => {
            assert_eq!(got, id);
            assert_eq!(delta, Position::new(0.0, 28.0));
        }
        other => panic!("expected a container scroll, got {other:?}"),
    }

    controller.tick(later);
    let after = controller
        .impact()
        .and_then(|i| i.destination.clone())
        .expect("still over the list");
    assert!(
        after.index > before.index,
        "container scroll must advance the destination ({} -> {})",
        before.index,
        after.index
    );
}
