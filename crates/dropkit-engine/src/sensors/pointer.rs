#![forbid(unsafe_code)]

//! Pointer (mouse) sensor.
//!
//! Arms on a primary-button press over a drag handle, but only declares a
//! drag once the pointer travels past a small distance threshold, so plain
//! clicks never become drags. A release before the threshold aborts back to
//! idle without emitting anything.

use super::{Capture, DragAction, SensorKind, SensorOutput};
use dropkit_core::{DraggableId, PointerButton, PointerEvent, PointerKind, Position};
use tracing::debug;

/// Pointer sensor tuning.
#[derive(Debug, Clone)]
pub struct PointerConfig {
    /// Distance (px) the pointer must travel from the press point before a
    /// drag starts. Movement below this keeps the press a potential click.
    pub start_threshold: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self { start_threshold: 5.0 }
    }
}

#[derive(Debug)]
enum Phase {
    Idle,
    Pending {
        origin: Position,
        target: DraggableId,
    },
    Dragging,
}

/// Pointer sensor state machine.
#[derive(Debug)]
pub struct PointerSensor {
    config: PointerConfig,
    phase: Phase,
}

impl Default for PointerSensor {
    fn default() -> Self {
        Self::new(PointerConfig::default())
    }
}

impl PointerSensor {
    /// Create a pointer sensor with the given tuning.
    #[must_use]
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    pub(super) fn process(&mut self, event: &PointerEvent, capture: &mut Capture) -> SensorOutput {
        match (&self.phase, &event.kind) {
            (
                Phase::Idle,
                PointerKind::Down {
                    button: PointerButton::Primary,
                    target: Some(target),
                },
            ) => {
                if let Err(error) = capture.try_claim(SensorKind::Pointer) {
                    debug!(%error, "pointer arm ignored");
                    return SensorOutput::none();
                }
                self.phase = Phase::Pending {
                    origin: event.position,
                    target: target.clone(),
                };
                // The press itself is not claimed: focus and click handling
                // proceed until movement proves drag intent.
                SensorOutput::none()
            }

            (Phase::Pending { origin, target }, PointerKind::Move) => {
                if event.position.distance(*origin) < self.config.start_threshold {
                    return SensorOutput::none();
                }
                let lift = DragAction::Lift {
                    draggable_id: target.clone(),
                    origin: Some(*origin),
                };
                let moved = DragAction::MoveTo {
                    position: event.position,
                };
                self.phase = Phase::Dragging;
                SensorOutput::claimed(vec![lift, moved])
            }

            (Phase::Dragging, PointerKind::Move) => SensorOutput::claimed(vec![DragAction::MoveTo {
                position: event.position,
            }]),

            (Phase::Pending { .. }, PointerKind::Up) => {
                // Released before the threshold: a click, not a drag.
                self.reset(capture);
                SensorOutput::none()
            }

            (Phase::Dragging, PointerKind::Up) => {
                self.reset(capture);
                SensorOutput::claimed(vec![DragAction::Drop])
            }

            _ => SensorOutput::none(),
        }
    }

    /// Cancel from outside (Escape, focus loss).
    pub(super) fn cancel(&mut self, capture: &mut Capture) -> SensorOutput {
        let was_dragging = matches!(self.phase, Phase::Dragging);
        self.reset(capture);
        if was_dragging {
            SensorOutput::claimed(vec![DragAction::Cancel])
        } else {
            SensorOutput::none()
        }
    }

    fn reset(&mut self, capture: &mut Capture) {
        self.phase = Phase::Idle;
        capture.release(SensorKind::Pointer);
    }
}
