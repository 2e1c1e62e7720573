#![forbid(unsafe_code)]

//! The computed outcome of a drag position.
//!
//! An [`Impact`] is recomputed on every move tick. `destination: None` means
//! the dragged item is not over any valid droppable; a drop there is treated
//! as a cancel-at-that-location by policy.

use crate::id::{DraggableId, DroppableId};
use serde::{Deserialize, Serialize};

/// A slot inside a droppable: which list, which index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraggableLocation {
    pub droppable_id: DroppableId,
    pub index: usize,
}

impl DraggableLocation {
    /// Create a location.
    #[must_use]
    pub fn new(droppable_id: impl Into<DroppableId>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
        }
    }
}

/// A neighboring item that must visually shift to make room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Displaced {
    pub draggable_id: DraggableId,

    /// Whether the shift should animate. `false` only for the very first
    /// impact after drag start, to avoid an unwanted initial transition.
    pub should_animate: bool,
}

/// The engine's computed outcome for the current position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Impact {
    /// Best-fit destination, or `None` when not over any valid droppable.
    pub destination: Option<DraggableLocation>,

    /// Ordered items between the source and destination index that shift
    /// to make room. Never contains the dragged item itself.
    pub displaced: Vec<Displaced>,
}

impl Impact {
    /// An impact with no destination and nothing displaced.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}
