#![forbid(unsafe_code)]

//! Captured geometry for one drag.
//!
//! A [`DimensionSet`] is measured by the host at lift and handed to the
//! engine. It is read-mostly for the duration of the drag: the only fields
//! that mutate are the [`ScrollState`]s, and only via scroll deltas the
//! auto-scroller commits. Everything is discarded at drag end; there is no
//! cross-drag caching.
//!
//! # Invariants
//!
//! 1. Rects are page coordinates as measured at lift; they are never
//!    re-measured mid-drag.
//! 2. The visible position of an item inside a scrolled container is its
//!    captured rect shifted by the container's accumulated scroll diff.
//! 3. `ScrollState.current` stays within `[0, max]` on both axes.

use crate::geometry::{Axis, Position, Rect};
use crate::id::{DraggableId, DroppableId};
use crate::impact::DraggableLocation;
use ahash::AHashMap;

/// Scroll offsets of a scrollable element or the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Offset at capture time.
    pub initial: Position,
    /// Current offset.
    pub current: Position,
    /// Maximum offset (document or content extent minus frame size).
    pub max: Position,
}

impl ScrollState {
    /// Capture a scroll state; `initial` is set to `current`.
    #[must_use]
    pub fn new(current: Position, max: Position) -> Self {
        Self {
            initial: current,
            current,
            max,
        }
    }

    /// Accumulated scroll since capture.
    #[inline]
    #[must_use]
    pub fn diff(&self) -> Position {
        self.current - self.initial
    }

    /// Clamp a requested change to the remaining scrollable distance.
    ///
    /// Returns `None` when every non-zero component of the request points in
    /// an exhausted direction, so callers can distinguish "nothing to do"
    /// from a clamped-but-real scroll.
    #[must_use]
    pub fn clamp_change(&self, change: Position) -> Option<Position> {
        if change.is_zero() {
            return None;
        }
        let clamp_axis = |current: f64, max: f64, delta: f64| delta.clamp(-current, max - current);
        let clamped = Position::new(
            clamp_axis(self.current.x, self.max.x, change.x),
            clamp_axis(self.current.y, self.max.y, change.y),
        );
        if clamped.is_zero() { None } else { Some(clamped) }
    }

    /// Apply a committed scroll delta, clamped to `[0, max]`.
    pub fn scroll_by(&mut self, delta: Position) {
        self.current = Position::new(
            (self.current.x + delta.x).clamp(0.0, self.max.x),
            (self.current.y + delta.y).clamp(0.0, self.max.y),
        );
    }
}

/// A scrollable container wrapping a droppable.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollFrame {
    /// Visible window of the container, page coordinates at capture.
    pub frame: Rect,
    /// Scroll offsets of the container.
    pub scroll: ScrollState,
}

/// Captured geometry of one draggable item.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggableDimension {
    pub id: DraggableId,
    /// The droppable this item belonged to at capture.
    pub droppable_id: DroppableId,
    /// Border-box rect, page coordinates at capture.
    pub client: Rect,
}

/// Captured geometry of one droppable list.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppableDimension {
    pub id: DroppableId,
    pub axis: Axis,
    /// Border-box rect, page coordinates at capture.
    pub client: Rect,
    /// Present when the droppable lives inside a scrollable container.
    pub frame: Option<ScrollFrame>,
    /// Contained items in list order, including the dragged item itself
    /// for its home droppable.
    pub items: Vec<DraggableDimension>,
}

impl DroppableDimension {
    /// Accumulated container scroll since capture.
    #[must_use]
    pub fn scroll_diff(&self) -> Position {
        self.frame
            .as_ref()
            .map_or(Position::ZERO, |f| f.scroll.diff())
    }

    /// The rect used for hit testing: the captured client rect clipped by
    /// the container frame when one exists. `None` when fully clipped.
    #[must_use]
    pub fn active_rect(&self) -> Option<Rect> {
        match &self.frame {
            Some(f) => self.client.intersect(&f.frame),
            None => Some(self.client),
        }
    }

    /// Where an item inside this droppable currently sits, accounting for
    /// container scroll since capture.
    #[must_use]
    pub fn item_rect(&self, item: &DraggableDimension) -> Rect {
        item.client.shift(-self.scroll_diff())
    }

    /// Index of an item by id.
    #[must_use]
    pub fn index_of(&self, id: &DraggableId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }
}

/// The window's visible frame and scroll offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Visible window, page coordinates at capture.
    pub frame: Rect,
    /// Window scroll offsets.
    pub scroll: ScrollState,
}

impl Viewport {
    /// The currently visible rect, shifted by scroll since capture.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        self.frame.shift(self.scroll.diff())
    }
}

/// The full geometry snapshot for one drag: the dragged item, every
/// registered droppable, and the viewport.
///
/// Created fresh at lift, owned by the drag state machine, discarded at
/// drag end.
#[derive(Debug, Clone)]
pub struct DimensionSet {
    draggable: DraggableDimension,
    droppables: AHashMap<DroppableId, DroppableDimension>,
    order: Vec<DroppableId>,
    viewport: Viewport,
}

impl DimensionSet {
    /// Assemble a snapshot. Droppable registration order is preserved for
    /// hit-test iteration; a duplicate droppable id keeps the first entry.
    #[must_use]
    pub fn new(
        draggable: DraggableDimension,
        droppables: Vec<DroppableDimension>,
        viewport: Viewport,
    ) -> Self {
        let mut map = AHashMap::with_capacity(droppables.len());
        let mut order = Vec::with_capacity(droppables.len());
        for droppable in droppables {
            if !map.contains_key(&droppable.id) {
                order.push(droppable.id.clone());
                map.insert(droppable.id.clone(), droppable);
            }
        }
        Self {
            draggable,
            droppables: map,
            order,
            viewport,
        }
    }

    /// The dragged item's captured dimension.
    #[inline]
    #[must_use]
    pub fn draggable(&self) -> &DraggableDimension {
        &self.draggable
    }

    /// Look up a droppable by id.
    #[must_use]
    pub fn droppable(&self, id: &DroppableId) -> Option<&DroppableDimension> {
        self.droppables.get(id)
    }

    /// Mutable lookup, for committing container scroll.
    #[must_use]
    pub fn droppable_mut(&mut self, id: &DroppableId) -> Option<&mut DroppableDimension> {
        self.droppables.get_mut(id)
    }

    /// Iterate droppables in registration order.
    pub fn droppables(&self) -> impl Iterator<Item = &DroppableDimension> {
        self.order.iter().filter_map(|id| self.droppables.get(id))
    }

    /// The viewport snapshot.
    #[inline]
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable viewport, for committing window scroll.
    #[inline]
    #[must_use]
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The dragged item's home droppable, if it was captured.
    #[must_use]
    pub fn home(&self) -> Option<&DroppableDimension> {
        self.droppables.get(&self.draggable.droppable_id)
    }

    /// Where the drag started: home droppable and index at capture.
    #[must_use]
    pub fn source(&self) -> Option<DraggableLocation> {
        let home = self.home()?;
        let index = home.index_of(&self.draggable.id)?;
        Some(DraggableLocation {
            droppable_id: home.id.clone(),
            index,
        })
    }
}
