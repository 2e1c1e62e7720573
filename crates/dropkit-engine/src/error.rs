#![forbid(unsafe_code)]

//! Internal error taxonomy.
//!
//! These errors never cross the public API. Each variant maps to a fixed
//! degradation policy: invalid transitions and sensor conflicts are no-ops,
//! missing geometry means "no valid destination" for that tick, and an
//! exhausted scroll direction is the "no scroll" signal. They exist so the
//! policies are named, logged, and testable rather than scattered booleans.

use dropkit_core::{DraggableId, DroppableId};
use thiserror::Error;

/// Everything that can go wrong inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    /// An operation was requested in a phase that does not permit it.
    #[error("invalid transition: {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    /// A referenced draggable has no captured dimension.
    #[error("no captured dimension for draggable {0}")]
    MissingDraggable(DraggableId),

    /// A referenced droppable has no captured dimension.
    #[error("no captured dimension for droppable {0}")]
    MissingDroppable(DroppableId),

    /// A sensor tried to arm while another sensor was capturing.
    #[error("sensor conflict: {attempted} tried to capture while {holder} holds the slot")]
    SensorConflict {
        attempted: &'static str,
        holder: &'static str,
    },

    /// The requested scroll direction has no remaining distance.
    #[error("scroll exhausted")]
    ScrollExhausted,
}
