#![forbid(unsafe_code)]

//! Lifecycle notifications.
//!
//! The [`DragController`](crate::state::DragController) owns a boxed
//! [`DragObserver`] and calls it synchronously as the drag progresses. Per
//! drag, the order is strict and each fires exactly once, except
//! `on_drag_update` which fires zero or more times:
//!
//! ```text
//! on_before_drag_start → on_drag_start → on_drag_update* → on_drag_end
//! ```
//!
//! A drag that is aborted before it ever moved (still pending) fires
//! nothing at all.

use dropkit_core::{DraggableId, DraggableLocation};
use std::cell::RefCell;
use std::rc::Rc;

/// Why a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The user released the item.
    Drop,
    /// The drag was cancelled (Escape, focus loss, internal fault).
    Cancel,
}

/// Payload for `on_before_drag_start` and `on_drag_start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragStart {
    pub draggable_id: DraggableId,
    pub source: DraggableLocation,
}

/// Payload for `on_drag_update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragUpdate {
    pub draggable_id: DraggableId,
    pub source: DraggableLocation,
    /// Current best-fit destination; `None` when over no droppable.
    pub destination: Option<DraggableLocation>,
}

/// Payload for `on_drag_end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    pub draggable_id: DraggableId,
    pub source: DraggableLocation,
    /// Final destination; `None` signals no reordering.
    pub destination: Option<DraggableLocation>,
    pub reason: DropReason,
}

/// Receiver for drag lifecycle notifications.
///
/// All methods default to no-ops so hosts implement only what they need.
pub trait DragObserver {
    /// The drag is about to start; fired before any geometry is applied.
    fn on_before_drag_start(&mut self, _start: &DragStart) {}

    /// The drag started (first movement after lift).
    fn on_drag_start(&mut self, _start: &DragStart) {}

    /// The computed destination changed.
    fn on_drag_update(&mut self, _update: &DragUpdate) {}

    /// The drag finished, by drop or cancel.
    fn on_drag_end(&mut self, _end: &DragEnd) {}
}

/// An observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl DragObserver for NullObserver {}

/// A recorded lifecycle notification, in firing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    BeforeStart(DragStart),
    Start(DragStart),
    Update(DragUpdate),
    End(DragEnd),
}

/// Records every notification for later inspection. Intended for tests and
/// debugging hosts; the handle returned by [`RecordingObserver::new`] stays
/// valid after the observer is boxed into a controller.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<LifecycleEvent>>>,
}

impl RecordingObserver {
    /// Create an observer and a shared handle onto its event log.
    #[must_use]
    pub fn new() -> (Self, Rc<RefCell<Vec<LifecycleEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                events: Rc::clone(&events),
            },
            events,
        )
    }
}

impl DragObserver for RecordingObserver {
    fn on_before_drag_start(&mut self, start: &DragStart) {
        self.events
            .borrow_mut()
            .push(LifecycleEvent::BeforeStart(start.clone()));
    }

    fn on_drag_start(&mut self, start: &DragStart) {
        self.events
            .borrow_mut()
            .push(LifecycleEvent::Start(start.clone()));
    }

    fn on_drag_update(&mut self, update: &DragUpdate) {
        self.events
            .borrow_mut()
            .push(LifecycleEvent::Update(update.clone()));
    }

    fn on_drag_end(&mut self, end: &DragEnd) {
        self.events
            .borrow_mut()
            .push(LifecycleEvent::End(end.clone()));
    }
}
