#![forbid(unsafe_code)]

//! Core: geometry, ids, input events, and captured dimensions.
//!
//! # Role in dropkit
//! `dropkit-core` is the value-type layer. It owns the coordinate model,
//! the normalized input events the sensors consume, and the geometry
//! snapshot (`DimensionSet`) the engine reasons over during a drag.
//!
//! # Primary responsibilities
//! - **Position / Rect / Axis**: pure 2D arithmetic in page coordinates.
//! - **InputEvent**: canonical pointer, touch, and key events with timestamps.
//! - **Dimensions**: the read-mostly geometry snapshot captured at lift,
//!   where only scroll offsets mutate for the duration of a drag.
//! - **Impact**: the computed destination and displaced neighbors for the
//!   current drag position.
//!
//! # How it fits in the system
//! The engine (`dropkit-engine`) consumes `dropkit-core` events and
//! dimensions and drives application callbacks. Rendering and measurement
//! live outside both crates; hosts build a `DimensionSet` from whatever
//! they measure and feed events in.

pub mod dimension;
pub mod event;
pub mod geometry;
pub mod id;
pub mod impact;

pub use dimension::{
    DimensionSet, DraggableDimension, DroppableDimension, ScrollFrame, ScrollState, Viewport,
};
pub use event::{InputEvent, KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerKind, TouchEvent, TouchKind};
pub use geometry::{Axis, Position, Rect};
pub use id::{DraggableId, DroppableId};
pub use impact::{Displaced, DraggableLocation, Impact};
