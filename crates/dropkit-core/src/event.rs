#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! Hosts normalize platform input (DOM events, winit events, test drivers)
//! into these types before feeding them to the engine's sensors.
//!
//! # Design Notes
//!
//! - Pointer and touch positions are viewport (client) coordinates; the
//!   engine converts to page coordinates with the captured window scroll.
//! - Press events carry the hit-test result (`target`): the draggable whose
//!   drag handle the press landed on, if any. Hit testing is the host's job.
//! - Every event carries the platform timestamp so sensors can measure
//!   dwell times without owning a clock.

use crate::geometry::Position;
use crate::id::DraggableId;
use bitflags::bitflags;
use web_time::Instant;

/// Canonical input event consumed by the sensor layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A pointer (mouse) event.
    Pointer(PointerEvent),

    /// A touch event (single tracked touch point).
    Touch(TouchEvent),

    /// A keyboard event.
    Key(KeyEvent),

    /// Window focus gained or lost.
    ///
    /// `false` (focus lost) cancels any active drag.
    Focus(bool),
}

/// A pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,

    /// Pointer position in viewport coordinates.
    pub position: Position,

    /// When the event occurred.
    pub time: Instant,
}

/// Pointer event kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerKind {
    /// A button was pressed. `target` is the draggable under the pointer,
    /// if the press landed on a drag handle.
    Down {
        button: PointerButton,
        target: Option<DraggableId>,
    },

    /// The pointer moved.
    Move,

    /// The pressed button was released.
    Up,
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// The primary button (usually left). Only this button starts a drag.
    Primary,
    /// The secondary button (usually right).
    Secondary,
    /// Any other button.
    Auxiliary,
}

/// A touch event for the single tracked touch point.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    /// What happened.
    pub kind: TouchKind,

    /// Touch position in viewport coordinates. For `End`/`Cancel` this is
    /// the last known position.
    pub position: Position,

    /// When the event occurred.
    pub time: Instant,
}

/// Touch event kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TouchKind {
    /// A finger came down. `target` is the draggable under the touch, if
    /// the touch landed on a drag handle.
    Start { target: Option<DraggableId> },

    /// The finger moved.
    Move,

    /// The finger lifted.
    End,

    /// The platform cancelled the touch (e.g. an incoming call).
    Cancel,
}

/// A key press.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The draggable whose drag handle currently has focus, if any.
    pub target: Option<DraggableId>,

    /// When the event occurred.
    pub time: Instant,
}

impl KeyEvent {
    /// Create a key event with no modifiers and no focused handle.
    #[must_use]
    pub fn new(code: KeyCode, time: Instant) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            target: None,
            time,
        }
    }

    /// Attach the focused drag handle.
    #[must_use]
    pub fn with_target(mut self, target: DraggableId) -> Self {
        self.target = Some(target);
        self
    }

    /// Attach modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// The subset of key codes the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Space: activation key (lift, then drop).
    Space,
    /// Escape: cancel.
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Any key the engine does not interpret.
    Other,
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
        const SUPER = 1 << 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_builders() {
        let t = Instant::now();
        let ev = KeyEvent::new(KeyCode::Space, t)
            .with_target(DraggableId::new("item-1"))
            .with_modifiers(Modifiers::SHIFT);
        assert_eq!(ev.code, KeyCode::Space);
        assert_eq!(ev.target.as_ref().map(DraggableId::as_str), Some("item-1"));
        assert!(ev.modifiers.contains(Modifiers::SHIFT));
        assert!(!ev.modifiers.contains(Modifiers::CTRL));
    }
}
