#![forbid(unsafe_code)]

//! Keyboard sensor.
//!
//! Space on a focused drag handle lifts; arrow keys emit discrete move
//! intents; Space again drops; Escape cancels. There is no pending phase
//! here: the activation key is unambiguous drag intent, so the sensor goes
//! straight to dragging. The drag still only "starts" (for lifecycle
//! purposes) on the first arrow key, when the state machine sees movement.

use super::{Capture, DragAction, MoveDirection, SensorKind, SensorOutput};
use dropkit_core::{KeyCode, KeyEvent};
use tracing::debug;

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    Dragging,
}

/// Keyboard sensor state machine.
#[derive(Debug, Default)]
pub struct KeyboardSensor {
    phase: Phase,
}

impl KeyboardSensor {
    pub(super) fn process(&mut self, event: &KeyEvent, capture: &mut Capture) -> SensorOutput {
        match (&self.phase, event.code) {
            (Phase::Idle, KeyCode::Space) => {
                let Some(target) = &event.target else {
                    return SensorOutput::none();
                };
                if let Err(error) = capture.try_claim(SensorKind::Keyboard) {
                    debug!(%error, "keyboard arm ignored");
                    return SensorOutput::none();
                }
                self.phase = Phase::Dragging;
                // origin: None — the host substitutes the item center.
                SensorOutput::claimed(vec![DragAction::Lift {
                    draggable_id: target.clone(),
                    origin: None,
                }])
            }

            (Phase::Dragging, KeyCode::Space) => {
                self.reset(capture);
                SensorOutput::claimed(vec![DragAction::Drop])
            }

            (Phase::Dragging, KeyCode::Escape) => {
                self.reset(capture);
                SensorOutput::claimed(vec![DragAction::Cancel])
            }

            (Phase::Dragging, code) => match arrow(code) {
                Some(direction) => {
                    SensorOutput::claimed(vec![DragAction::MoveBy { direction }])
                }
                None => SensorOutput::none(),
            },

            (Phase::Idle, _) => SensorOutput::none(),
        }
    }

    /// Cancel from outside (focus loss).
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
        capture.release(SensorKind::Keyboard);
    }
}

fn arrow(code: KeyCode) -> Option<MoveDirection> {
    match code {
        KeyCode::ArrowUp => Some(MoveDirection::Up),
        KeyCode::ArrowDown => Some(MoveDirection::Down),
        KeyCode::ArrowLeft => Some(MoveDirection::Left),
        KeyCode::ArrowRight => Some(MoveDirection::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropkit_core::DraggableId;
    use web_time::Instant;

    fn key(code: KeyCode, target: Option<&str>) -> KeyEvent {
        let mut event = KeyEvent::new(code, Instant::now());
        if let Some(id) = target {
            event = event.with_target(DraggableId::new(id));
        }
        event
    }

    #[test]
    fn space_lifts_arrows_move_space_drops() {
        let mut sensor = KeyboardSensor::default();
        let mut capture = Capture::default();

        let lift = sensor.process(&key(KeyCode::Space, Some("item")), &mut capture);
        assert_eq!(
            lift.actions,
            vec![DragAction::Lift {
                draggable_id: DraggableId::new("item"),
                origin: None,
            }]
        );
        assert_eq!(capture.holder(), Some(SensorKind::Keyboard));

        let moved = sensor.process(&key(KeyCode::ArrowDown, None), &mut capture);
        assert_eq!(
            moved.actions,
            vec![DragAction::MoveBy {
                direction: MoveDirection::Down
            }]
        );

        let dropped = sensor.process(&key(KeyCode::Space, None), &mut capture);
        assert_eq!(dropped.actions, vec![DragAction::Drop]);
        assert_eq!(capture.holder(), None);
    }

    #[test]
    fn space_without_a_focused_handle_does_nothing() {
        let mut sensor = KeyboardSensor::default();
        let mut capture = Capture::default();
        let output = sensor.process(&key(KeyCode::Space, None), &mut capture);
        assert_eq!(output, SensorOutput::none());
        assert_eq!(capture.holder(), None);
    }

    #[test]
    fn escape_cancels() {
        let mut sensor = KeyboardSensor::default();
        let mut capture = Capture::default();
        sensor.process(&key(KeyCode::Space, Some("item")), &mut capture);
        let output = sensor.process(&key(KeyCode::Escape, None), &mut capture);
        assert_eq!(output.actions, vec![DragAction::Cancel]);
        assert_eq!(capture.holder(), None);
    }

    #[test]
    fn unrelated_keys_are_ignored_while_dragging() {
        let mut sensor = KeyboardSensor::default();
        let mut capture = Capture::default();
        sensor.process(&key(KeyCode::Space, Some("item")), &mut capture);
        let output = sensor.process(&key(KeyCode::Other, None), &mut capture);
        assert!(output.actions.is_empty());
        assert_eq!(capture.holder(), Some(SensorKind::Keyboard));
    }
}
