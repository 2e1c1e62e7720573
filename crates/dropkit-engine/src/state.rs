#![forbid(unsafe_code)]

//! The drag state machine.
//!
//! [`DragController`] owns the canonical drag state for one drag-and-drop
//! context. It accepts intents from the sensor layer, consults the
//! movement engine and the auto-scroller, and notifies a
//! [`DragObserver`](crate::observer::DragObserver) synchronously.
//!
//! # Phases
//!
//! ```text
//! Idle → Pending → Dragging → DropAnimating → Idle
//!          │            │
//!          └── (abort) ──┴── (cancel) → Idle
//! ```
//!
//! A drag aborted while still pending (drop or cancel before any movement)
//! fires no notifications at all: it is treated as if the drag never
//! happened. From the first movement on, the order is strict:
//! `on_before_drag_start`, `on_drag_start`, zero or more `on_drag_update`
//! (fired when the computed destination changes), one `on_drag_end`.
//!
//! # Coordinates
//!
//! Sensor positions are viewport coordinates; captured rects are page
//! coordinates. The dragged item's effective center is its captured center
//! plus the pointer's travel plus the window scroll accumulated since lift,
//! so impacts stay consistent with what the user sees while auto-scrolling.

use crate::autoscroll::{AutoScrollConfig, AutoScroller, ScrollArgs, ScrollRequest};
use crate::error::DragError;
use crate::movement::{self, ImpactArgs};
use crate::observer::{DragEnd, DragObserver, DragStart, DragUpdate, DropReason};
use crate::sensors::MoveDirection;
use dropkit_core::{DimensionSet, DraggableId, DraggableLocation, Impact, Position};
use tracing::debug;
use web_time::Instant;

/// Externally visible drag phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No drag in progress.
    Idle,
    /// A sensor armed a drag that has not moved yet.
    Pending,
    /// The drag is live.
    Dragging,
    /// Dropped; waiting for the drop animation collaborator.
    DropAnimating,
}

/// How the drag is driven. Decided at lift by the sensor: pointer and touch
/// supply a selection point and move in pixels, keyboard does not and moves
/// by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MovementMode {
    /// Continuous pixel positions; eligible for fluid auto-scrolling.
    Fluid,
    /// Discrete index steps; never fluid-scrolled.
    Snap,
}

#[derive(Debug)]
struct PendingState {
    draggable_id: DraggableId,
    source: DraggableLocation,
    /// Selection point, viewport coordinates.
    origin: Position,
    mode: MovementMode,
    dimensions: DimensionSet,
    lifted_at: Instant,
    use_time_dampening: bool,
}

#[derive(Debug)]
struct DraggingState {
    draggable_id: DraggableId,
    source: DraggableLocation,
    origin: Position,
    mode: MovementMode,
    /// Latest known position, viewport coordinates.
    current: Position,
    dimensions: DimensionSet,
    lifted_at: Instant,
    use_time_dampening: bool,
    impact: Impact,
    /// Destination last delivered through `on_drag_update`.
    notified_destination: Option<DraggableLocation>,
    /// False until the first impact has been computed; suppresses the
    /// initial displacement animation.
    has_computed: bool,
}

impl DraggingState {
    fn from_pending(pending: PendingState, current: Position) -> Self {
        let notified_destination = Some(pending.source.clone());
        Self {
            draggable_id: pending.draggable_id,
            source: pending.source,
            origin: pending.origin,
            mode: pending.mode,
            current,
            dimensions: pending.dimensions,
            lifted_at: pending.lifted_at,
            use_time_dampening: pending.use_time_dampening,
            impact: Impact::none(),
            notified_destination,
            has_computed: false,
        }
    }
}

#[derive(Debug)]
struct DropState {
    draggable_id: DraggableId,
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    Pending(Box<PendingState>),
    Dragging(Box<DraggingState>),
    DropAnimating(Box<DropState>),
}

impl Phase {
    const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending(_) => "pending",
            Self::Dragging(_) => "dragging",
            Self::DropAnimating(_) => "drop-animating",
        }
    }
}

/// The orchestrator for one drag-and-drop context.
///
/// Construct one per context; the controller never uses module-level
/// state, so independent contexts (and tests) cannot interfere.
pub struct DragController {
    phase: Phase,
    observer: Box<dyn DragObserver>,
    scroller: AutoScroller,
}

impl std::fmt::Debug for DragController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("phase", &self.phase.name())
            .finish_non_exhaustive()
    }
}

impl DragController {
    /// Create a controller with default auto-scroll tuning.
    #[must_use]
    pub fn new(observer: Box<dyn DragObserver>) -> Self {
        Self::with_config(observer, AutoScrollConfig::default())
    }

    /// Create a controller with explicit auto-scroll tuning.
    #[must_use]
    pub fn with_config(observer: Box<dyn DragObserver>, config: AutoScrollConfig) -> Self {
        Self {
            phase: Phase::Idle,
            observer,
            scroller: AutoScroller::new(config),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match self.phase {
            Phase::Idle => DragPhase::Idle,
            Phase::Pending(_) => DragPhase::Pending,
            Phase::Dragging(_) => DragPhase::Dragging,
            Phase::DropAnimating(_) => DragPhase::DropAnimating,
        }
    }

    /// Whether a drag is live (started and not yet ended).
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// The current impact, while dragging.
    #[must_use]
    pub fn impact(&self) -> Option<&Impact> {
        match &self.phase {
            Phase::Dragging(state) => Some(&state.impact),
            _ => None,
        }
    }

    /// Arm a drag: capture the snapshot and wait for movement.
    ///
    /// `origin` is the selection point in viewport coordinates; `None`
    /// (keyboard lift) defaults to the dragged item's center. A lift while
    /// any drag is in progress, or with a snapshot that does not contain
    /// the dragged item, is a logged no-op.
    pub fn lift(
        &mut self,
        draggable_id: DraggableId,
        origin: Option<Position>,
        dimensions: DimensionSet,
        now: Instant,
    ) {
        if !matches!(self.phase, Phase::Idle) {
            self.invalid("lift");
            return;
        }
        if dimensions.draggable().id != draggable_id {
            debug!(
                error = %DragError::MissingDraggable(draggable_id),
                "lift rejected: snapshot is for a different draggable"
            );
            return;
        }
        let Some(source) = dimensions.source() else {
            debug!(
                error = %DragError::MissingDroppable(dimensions.draggable().droppable_id.clone()),
                "lift rejected: dragged item not present in its home droppable"
            );
            return;
        };

        let mode = if origin.is_some() {
            MovementMode::Fluid
        } else {
            MovementMode::Snap
        };
        let page_center = dimensions.draggable().client.center();
        let origin = origin
            .unwrap_or_else(|| page_center - dimensions.viewport().scroll.current);
        let use_time_dampening = self.scroller.wants_scroll(
            page_center,
            &dimensions,
            Some(&source.droppable_id),
        );

        self.phase = Phase::Pending(Box::new(PendingState {
            draggable_id,
            source,
            origin,
            mode,
            dimensions,
            lifted_at: now,
            use_time_dampening,
        }));
    }

    /// Continuous movement to a viewport position.
    ///
    /// The first movement after a lift starts the drag: `on_before_drag_start`
    /// and `on_drag_start` fire synchronously before the move is applied.
    pub fn move_to(&mut self, position: Position) {
        match std::mem::take(&mut self.phase) {
            Phase::Pending(pending) => {
                let state = self.start_drag(*pending, position);
                self.phase = Phase::Dragging(state);
            }
            Phase::Dragging(mut state) => {
                state.current = position;
                if let Some(update) = recompute(&mut state) {
                    self.observer.on_drag_update(&update);
                }
                self.phase = Phase::Dragging(state);
            }
            other => {
                self.phase = other;
                self.invalid("move");
            }
        }
    }

    /// A discrete keyboard move.
    pub fn move_by(&mut self, direction: MoveDirection) {
        match std::mem::take(&mut self.phase) {
            Phase::Pending(pending) => {
                let origin = pending.origin;
                let mut state = self.start_drag(*pending, origin);
                apply_keyboard_move(&mut state, direction);
                if let Some(update) = pending_update(&mut state) {
                    self.observer.on_drag_update(&update);
                }
                self.phase = Phase::Dragging(state);
            }
            Phase::Dragging(mut state) => {
                apply_keyboard_move(&mut state, direction);
                if let Some(update) = pending_update(&mut state) {
                    self.observer.on_drag_update(&update);
                }
                self.phase = Phase::Dragging(state);
            }
            other => {
                self.phase = other;
                self.invalid("move");
            }
        }
    }

    /// One scheduling tick at display-refresh cadence.
    ///
    /// Runs the auto-scroller for the latest known position. A committed
    /// scroll is applied to the captured scroll state first, then the
    /// impact is recomputed in the adjusted coordinate space, then the
    /// request is returned for the host to mirror onto the real window or
    /// container. Only fluid drags scroll; for a snap drag the tick is a
    /// no-op.
    pub fn tick(&mut self, now: Instant) -> Option<ScrollRequest> {
        let Phase::Dragging(state) = &mut self.phase else {
            return None;
        };
        // Snap drags are index-driven: fluid scrolling would overwrite the
        // stepped impact with pixel geometry.
        if state.mode == MovementMode::Snap {
            return None;
        }

        let over = state.impact.destination.as_ref().map(|d| d.droppable_id.clone());
        let request = self.scroller.scroll(ScrollArgs {
            center: page_center(state),
            dimensions: &state.dimensions,
            over: over.as_ref(),
            elapsed: now.duration_since(state.lifted_at),
            use_time_dampening: state.use_time_dampening,
        })?;

        match &request {
            ScrollRequest::Window { delta } => {
                state.dimensions.viewport_mut().scroll.scroll_by(*delta);
            }
            ScrollRequest::Droppable { id, delta } => {
                if let Some(frame) = state
                    .dimensions
                    .droppable_mut(id)
                    .and_then(|d| d.frame.as_mut())
                {
                    frame.scroll.scroll_by(*delta);
                }
            }
        }

        if let Some(update) = recompute(state) {
            self.observer.on_drag_update(&update);
        }
        Some(request)
    }

    /// Release the dragged item where it is.
    ///
    /// The current impact is frozen as the final result and `on_drag_end`
    /// fires with `reason: Drop`. The controller stays in `DropAnimating`
    /// until [`finish_drop_animation`](Self::finish_drop_animation).
    pub fn drop(&mut self) {
        match std::mem::take(&mut self.phase) {
            Phase::Dragging(state) => {
                let end = DragEnd {
                    draggable_id: state.draggable_id.clone(),
                    source: state.source.clone(),
                    destination: state.impact.destination.clone(),
                    reason: DropReason::Drop,
                };
                self.observer.on_drag_end(&end);
                self.phase = Phase::DropAnimating(Box::new(DropState {
                    draggable_id: state.draggable_id,
                }));
            }
            Phase::Pending(_) => {
                // Dropped before any movement: the drag never happened.
            }
            other => {
                self.phase = other;
                self.invalid("drop");
            }
        }
    }

    /// The drop animation collaborator reported completion.
    pub fn finish_drop_animation(&mut self) {
        match std::mem::take(&mut self.phase) {
            Phase::DropAnimating(state) => {
                debug!(draggable = %state.draggable_id, "drop finalized");
            }
            other => {
                self.phase = other;
                self.invalid("finish_drop_animation");
            }
        }
    }

    /// Abandon the drag and return to idle immediately.
    ///
    /// Fires `on_drag_end { destination: None, reason: Cancel }` if the
    /// drag had started; a still-pending drag unwinds silently. A cancel
    /// during the drop animation supersedes it and returns to idle without
    /// a second `on_drag_end`.
    pub fn cancel(&mut self) {
        match std::mem::take(&mut self.phase) {
            Phase::Dragging(state) => {
                let end = DragEnd {
                    draggable_id: state.draggable_id.clone(),
                    source: state.source.clone(),
                    destination: None,
                    reason: DropReason::Cancel,
                };
                self.observer.on_drag_end(&end);
            }
            Phase::Pending(_) => {
                // Aborted before any movement: silent.
            }
            Phase::DropAnimating(state) => {
                // The drag already ended; the animation is simply cut short.
                debug!(draggable = %state.draggable_id, "drop animation superseded by cancel");
            }
            other => {
                self.phase = other;
                self.invalid("cancel");
            }
        }
    }

    /// Pending → Dragging: fire the start pair, then compute the first
    /// impact (with displacement animation suppressed).
    fn start_drag(&mut self, pending: PendingState, position: Position) -> Box<DraggingState> {
        let start = DragStart {
            draggable_id: pending.draggable_id.clone(),
            source: pending.source.clone(),
        };
        self.observer.on_before_drag_start(&start);
        self.observer.on_drag_start(&start);

        let mut state = Box::new(DraggingState::from_pending(pending, position));
        if let Some(update) = recompute(&mut state) {
            self.observer.on_drag_update(&update);
        }
        state
    }

    fn invalid(&self, action: &'static str) {
        debug!(
            error = %DragError::InvalidTransition {
                action,
                phase: self.phase.name(),
            },
            "ignored"
        );
    }
}

/// The dragged item's effective center: captured center plus pointer
/// travel plus window scroll accumulated since lift.
fn page_center(state: &DraggingState) -> Position {
    state.dimensions.draggable().client.center()
        + (state.current - state.origin)
        + state.dimensions.viewport().scroll.diff()
}

/// Recompute the impact from pixel geometry; returns the update payload
/// when the destination changed since the last notification.
fn recompute(state: &mut DraggingState) -> Option<DragUpdate> {
    let animate = state.has_computed;
    state.impact = movement::compute_impact(ImpactArgs {
        center: page_center(state),
        dimensions: &state.dimensions,
        source: &state.source,
        animate,
    });
    state.has_computed = true;
    pending_update(state)
}

/// Update payload if the current impact's destination differs from the
/// last one delivered.
fn pending_update(state: &mut DraggingState) -> Option<DragUpdate> {
    if state.impact.destination == state.notified_destination {
        return None;
    }
    state.notified_destination = state.impact.destination.clone();
    Some(DragUpdate {
        draggable_id: state.draggable_id.clone(),
        source: state.source.clone(),
        destination: state.impact.destination.clone(),
    })
}

fn apply_keyboard_move(state: &mut DraggingState, direction: MoveDirection) {
    // Keyboard moves are index arithmetic over the latest impact; the
    // first one starts from the source location.
    let base = if state.has_computed {
        state.impact.clone()
    } else {
        Impact {
            destination: Some(state.source.clone()),
            displaced: Vec::new(),
        }
    };
    state.impact = movement::move_by(&base, direction, &state.source, &state.dimensions);
    state.has_computed = true;
}
