#![forbid(unsafe_code)]

//! Touch sensor.
//!
//! A touch is ambiguous between tap, scroll, and drag, so the sensor waits
//! out a long-press dwell before declaring a drag. While pending, the
//! native event is never claimed: a touch that ends early must remain a
//! valid tap, and finger movement means the user is scrolling. Once the
//! dwell elapses the drag starts and every subsequent touch event is
//! claimed, suppressing native scrolling for the rest of the drag.
//!
//! The dwell is polled, not timed: the sensor owns no timer and relies on
//! [`check_long_press`](TouchSensor::check_long_press) being called each
//! tick.

use super::{Capture, DragAction, SensorKind, SensorOutput};
use dropkit_core::{DraggableId, Position, TouchEvent, TouchKind};
use tracing::debug;
use web_time::{Duration, Instant};

/// Touch sensor tuning.
#[derive(Debug, Clone)]
pub struct TouchConfig {
    /// How long the finger must stay down before a drag starts.
    pub long_press: Duration,
    /// How far (px) the finger may wander during the dwell before the
    /// attempt is treated as a scroll and abandoned.
    pub slop: f64,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            long_press: Duration::from_millis(300),
            slop: 5.0,
        }
    }
}

#[derive(Debug)]
enum Phase {
    Idle,
    Pending {
        origin: Position,
        target: DraggableId,
        started_at: Instant,
    },
    Dragging,
}

/// Touch sensor state machine.
#[derive(Debug)]
pub struct TouchSensor {
    config: TouchConfig,
    phase: Phase,
}

impl Default for TouchSensor {
    fn default() -> Self {
        Self::new(TouchConfig::default())
    }
}

impl TouchSensor {
    /// Create a touch sensor with the given tuning.
    #[must_use]
    pub fn new(config: TouchConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    pub(super) fn process(&mut self, event: &TouchEvent, capture: &mut Capture) -> SensorOutput {
        match (&self.phase, &event.kind) {
            (Phase::Idle, TouchKind::Start { target: Some(target) }) => {
                if let Err(error) = capture.try_claim(SensorKind::Touch) {
                    debug!(%error, "touch arm ignored");
                    return SensorOutput::none();
                }
                self.phase = Phase::Pending {
                    origin: event.position,
                    target: target.clone(),
                    started_at: event.time,
                };
                // Never claim the start: the touch may still be a tap.
                SensorOutput::none()
            }

            (Phase::Pending { origin, .. }, TouchKind::Move) => {
                if event.position.distance(*origin) > self.config.slop {
                    // The finger is scrolling, not long-pressing.
                    self.reset(capture);
                }
                SensorOutput::none()
            }

            (Phase::Dragging, TouchKind::Move) => SensorOutput::claimed(vec![DragAction::MoveTo {
                position: event.position,
            }]),

            (Phase::Pending { .. }, TouchKind::End | TouchKind::Cancel) => {
                // Ended before the dwell: a tap. Leaving the event unclaimed
                // lets the platform deliver it as one.
                self.reset(capture);
                SensorOutput::none()
            }

            (Phase::Dragging, TouchKind::End) => {
                self.reset(capture);
                SensorOutput::claimed(vec![DragAction::Drop])
            }

            (Phase::Dragging, TouchKind::Cancel) => {
                self.reset(capture);
                SensorOutput::claimed(vec![DragAction::Cancel])
            }

            _ => SensorOutput::none(),
        }
    }

    /// Poll the dwell. Once `long_press` has elapsed with the finger still
    /// down and stationary, the drag starts at the touch origin.
    pub(super) fn check_long_press(&mut self, now: Instant, _capture: &mut Capture) -> SensorOutput {
        let Phase::Pending {
            origin,
            target,
            started_at,
        } = &self.phase
        else {
            return SensorOutput::none();
        };
        if now.duration_since(*started_at) < self.config.long_press {
            return SensorOutput::none();
        }

        let lift = DragAction::Lift {
            draggable_id: target.clone(),
            origin: Some(*origin),
        };
        let moved = DragAction::MoveTo { position: *origin };
        self.phase = Phase::Dragging;
        SensorOutput::claimed(vec![lift, moved])
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
        capture.release(SensorKind::Touch);
    }
}
