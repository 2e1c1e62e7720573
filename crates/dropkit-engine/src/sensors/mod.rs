#![forbid(unsafe_code)]

//! Input sensors: raw events → drag intents.
//!
//! Each input type (pointer, touch, keyboard) is an independent state
//! machine that enforces its own "intent to drag" heuristic. All three are
//! gated through one shared [`Capture`] slot: only the sensor holding the
//! slot may emit actions, and a second sensor trying to arm while one is
//! capturing is silently ignored.
//!
//! # Invariants
//!
//! 1. At most one sensor captures at a time.
//! 2. A sensor that aborts before its drag started emits nothing and does
//!    not claim the native event (`suppress_default` stays `false`), so
//!    taps and clicks reach the platform untouched.
//! 3. Releasing capture (drop, cancel, abort) restores default behavior;
//!    a false start never blocks a later independent attempt.
//! 4. Escape and window blur cancel whichever sensor is capturing.

mod keyboard;
mod pointer;
mod touch;

pub use keyboard::KeyboardSensor;
pub use pointer::{PointerConfig, PointerSensor};
pub use touch::{TouchConfig, TouchSensor};

use crate::error::DragError;
use dropkit_core::{DraggableId, InputEvent, KeyCode, Position};
use tracing::debug;
use web_time::Instant;

/// A drag intent emitted by a sensor, consumed by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum DragAction {
    /// Begin a drag for `draggable_id`. `origin` is the selection point in
    /// viewport coordinates; `None` for keyboard lifts, where the host
    /// substitutes the item center.
    Lift {
        draggable_id: DraggableId,
        origin: Option<Position>,
    },

    /// Continuous movement to a viewport position.
    MoveTo { position: Position },

    /// A discrete keyboard move.
    MoveBy { direction: MoveDirection },

    /// Release the dragged item where it is.
    Drop,

    /// Abandon the drag.
    Cancel,
}

/// Direction of a discrete keyboard move. The state machine maps this onto
/// the droppable's axis (main-axis step or cross-axis jump).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

/// What one event produced: zero or more actions, plus whether the native
/// event should be suppressed (preventDefault-equivalent).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensorOutput {
    pub actions: Vec<DragAction>,
    pub suppress_default: bool,
}

impl SensorOutput {
    /// Nothing happened; the platform keeps the event.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Actions produced while capturing; the native event is claimed.
    #[must_use]
    pub fn claimed(actions: Vec<DragAction>) -> Self {
        Self {
            actions,
            suppress_default: true,
        }
    }
}

/// The three sensor types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Pointer,
    Touch,
    Keyboard,
}

impl SensorKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Touch => "touch",
            Self::Keyboard => "keyboard",
        }
    }
}

/// The single capture slot shared by all sensors.
#[derive(Debug, Default)]
pub(crate) struct Capture {
    holder: Option<SensorKind>,
}

impl Capture {
    /// Claim the slot. Re-claiming by the current holder is fine; a claim
    /// while another sensor holds it is a conflict.
    pub(crate) fn try_claim(&mut self, kind: SensorKind) -> Result<(), DragError> {
        match self.holder {
            None => {
                self.holder = Some(kind);
                Ok(())
            }
            Some(holder) if holder == kind => Ok(()),
            Some(holder) => Err(DragError::SensorConflict {
                attempted: kind.name(),
                holder: holder.name(),
            }),
        }
    }

    /// Release the slot if `kind` holds it.
    pub(crate) fn release(&mut self, kind: SensorKind) {
        if self.holder == Some(kind) {
            self.holder = None;
        }
    }

    /// Current holder, if any.
    #[must_use]
    pub(crate) fn holder(&self) -> Option<SensorKind> {
        self.holder
    }
}

/// Tuning for all sensors.
#[derive(Debug, Clone, Default)]
pub struct SensorConfig {
    pub pointer: PointerConfig,
    pub touch: TouchConfig,
}

/// Owns the three sensors and the capture slot; routes events.
#[derive(Debug, Default)]
pub struct SensorSet {
    capture: Capture,
    pointer: PointerSensor,
    touch: TouchSensor,
    keyboard: KeyboardSensor,
}

impl SensorSet {
    /// Create a sensor set with the given tuning.
    #[must_use]
    pub fn new(config: SensorConfig) -> Self {
        Self {
            capture: Capture::default(),
            pointer: PointerSensor::new(config.pointer),
            touch: TouchSensor::new(config.touch),
            keyboard: KeyboardSensor::default(),
        }
    }

    /// Process one normalized input event.
    pub fn process(&mut self, event: &InputEvent) -> SensorOutput {
        match event {
            InputEvent::Pointer(pointer) => self.pointer.process(pointer, &mut self.capture),
            InputEvent::Touch(touch) => self.touch.process(touch, &mut self.capture),
            InputEvent::Key(key) => {
                // Escape cancels whichever sensor is capturing.
                if key.code == KeyCode::Escape {
                    match self.capture.holder() {
                        Some(SensorKind::Pointer) => {
                            return self.pointer.cancel(&mut self.capture);
                        }
                        Some(SensorKind::Touch) => {
                            return self.touch.cancel(&mut self.capture);
                        }
                        Some(SensorKind::Keyboard) | None => {}
                    }
                }
                self.keyboard.process(key, &mut self.capture)
            }
            InputEvent::Focus(false) => self.cancel_active(),
            InputEvent::Focus(true) => SensorOutput::none(),
        }
    }

    /// Poll the touch long-press dwell. Call once per tick.
    pub fn check_long_press(&mut self, now: Instant) -> SensorOutput {
        self.touch.check_long_press(now, &mut self.capture)
    }

    /// Whether any sensor currently holds the capture slot.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.capture.holder().is_some()
    }

    /// Cancel whatever is in flight (window blur, host teardown).
    pub fn cancel_active(&mut self) -> SensorOutput {
        let output = match self.capture.holder() {
            Some(SensorKind::Pointer) => self.pointer.cancel(&mut self.capture),
            Some(SensorKind::Touch) => self.touch.cancel(&mut self.capture),
            Some(SensorKind::Keyboard) => self.keyboard.cancel(&mut self.capture),
            None => SensorOutput::none(),
        };
        if self.capture.holder().is_some() {
            debug!("capture slot not released on cancel; forcing reset");
            self.capture = Capture::default();
        }
        output
    }
}
