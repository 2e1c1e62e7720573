#![forbid(unsafe_code)]

//! Engine: input sensors, collision engine, auto-scroller, and the drag
//! state machine.
//!
//! # Role in dropkit
//! `dropkit-engine` turns normalized input events into one authoritative
//! drag timeline. Hosts wire it up in three places:
//!
//! 1. Feed [`dropkit_core::InputEvent`]s into a [`SensorSet`] and forward
//!    the [`DragAction`]s it emits to a [`DragController`].
//! 2. Call [`DragController::tick`] once per animation frame and apply the
//!    [`ScrollRequest`] it returns to the real window/container.
//! 3. Implement [`DragObserver`] to receive lifecycle notifications for
//!    rendering and accessibility announcements.
//!
//! # Concurrency model
//! Single-threaded and event-driven. The engine holds no timers and spawns
//! nothing; all waiting is expressed as "call me again" (`tick`,
//! [`SensorSet::check_long_press`]). Exactly one drag is active per
//! controller; a `lift` during an active drag is silently rejected.
//!
//! # Failure policy
//! No public operation panics or returns an error. Calls that are invalid
//! for the current phase are no-ops logged at debug level; missing geometry
//! degrades to "no valid destination"; any internal inconsistency cancels
//! the drag rather than leaving the interaction indeterminate.

pub mod autoscroll;
pub mod error;
pub mod movement;
pub mod observer;
pub mod sensors;
pub mod state;

pub use autoscroll::{AutoScrollConfig, ScrollRequest};
pub use error::DragError;
pub use observer::{DragEnd, DragObserver, DragStart, DragUpdate, DropReason, LifecycleEvent, NullObserver, RecordingObserver};
pub use sensors::{DragAction, MoveDirection, SensorConfig, SensorKind, SensorOutput, SensorSet};
pub use state::{DragController, DragPhase};
