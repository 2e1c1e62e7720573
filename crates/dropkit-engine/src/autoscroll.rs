#![forbid(unsafe_code)]

//! Fluid auto-scroller.
//!
//! Once per tick the scroller decides whether the droppable's scroll
//! container or the window should scroll, and by how much. Speed scales
//! with proximity to the edge of the scrollable rect and is time-dampened
//! for a grace window after lift, so a drag that starts near an edge does
//! not immediately launch into a fast scroll.
//!
//! # Invariants
//!
//! 1. Container scrolling is attempted before window scrolling; a container
//!    at its limit falls through to the window.
//! 2. A request in an exhausted direction yields `None`, never a
//!    zero-magnitude delta, so callers can tell "nothing to do" from
//!    "blocked".
//! 3. Each axis is decided independently; a corner drag can scroll both.
//!
//! # Failure Modes
//!
//! - Degenerate (zero-span) scrollable rects produce no scroll.
//! - An `over` id with no captured dimension is ignored for this tick.

use crate::error::DragError;
use dropkit_core::{Axis, DimensionSet, DroppableId, Position, Rect};
use tracing::trace;
use web_time::Duration;

/// Tuning for the fluid scroller.
#[derive(Debug, Clone)]
pub struct AutoScrollConfig {
    /// Scrolling starts when the center is within this fraction of the
    /// span from an edge.
    pub start_from_fraction: f64,
    /// Full speed is reached within this fraction of the span.
    pub max_at_fraction: f64,
    /// Maximum scroll per tick, in pixels.
    pub max_pixel_scroll: f64,
    /// Time dampening stops this long after lift.
    pub stop_dampening_after: Duration,
    /// Speed stays at a crawl until this long after lift, then ramps.
    pub accelerate_after: Duration,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            start_from_fraction: 0.25,
            max_at_fraction: 0.05,
            max_pixel_scroll: 28.0,
            stop_dampening_after: Duration::from_millis(1200),
            accelerate_after: Duration::from_millis(360),
        }
    }
}

/// Quadratic ease for proximity and dampening curves.
fn ease(t: f64) -> f64 {
    t * t
}

/// A scroll the host should apply. The engine has already committed the
/// same delta to its captured scroll state.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollRequest {
    /// Scroll the window by `delta`.
    Window { delta: Position },
    /// Scroll a droppable's container by `delta`.
    Droppable { id: DroppableId, delta: Position },
}

/// Inputs to one scroll decision.
#[derive(Debug, Clone, Copy)]
pub struct ScrollArgs<'a> {
    /// Dragged item center, page coordinates, scroll-adjusted.
    pub center: Position,
    /// Geometry captured at lift.
    pub dimensions: &'a DimensionSet,
    /// The droppable currently under the drag, if any.
    pub over: Option<&'a DroppableId>,
    /// Time since lift.
    pub elapsed: Duration,
    /// Whether the post-lift grace dampening applies to this drag.
    pub use_time_dampening: bool,
}

/// Stateless scroll decision maker.
#[derive(Debug, Clone, Default)]
pub struct AutoScroller {
    config: AutoScrollConfig,
}

impl AutoScroller {
    /// Create a scroller with the given tuning.
    #[must_use]
    pub fn new(config: AutoScrollConfig) -> Self {
        Self { config }
    }

    /// Decide the scroll for this tick, if any.
    pub fn scroll(&self, args: ScrollArgs<'_>) -> Option<ScrollRequest> {
        if let Some(request) = self.droppable_scroll(args) {
            return Some(request);
        }
        self.window_scroll(args)
    }

    /// Whether the lift position already wants a scroll. Decides, at lift,
    /// whether time dampening applies to the drag.
    #[must_use]
    pub fn wants_scroll(&self, center: Position, dimensions: &DimensionSet, over: Option<&DroppableId>) -> bool {
        let from_droppable = over
            .and_then(|id| dimensions.droppable(id))
            .and_then(|d| d.frame.as_ref())
            .is_some_and(|f| !self.change_for_rect(&f.frame, center).is_zero());
        from_droppable
            || !self
                .change_for_rect(&dimensions.viewport().visible_rect(), center)
                .is_zero()
    }

    fn droppable_scroll(&self, args: ScrollArgs<'_>) -> Option<ScrollRequest> {
        let droppable = args.dimensions.droppable(args.over?)?;
        let frame = droppable.frame.as_ref()?;
        let raw = self.change_for_rect(&frame.frame, args.center);
        let wanted = self.dampen(raw, args.elapsed, args.use_time_dampening);
        let Some(delta) = frame.scroll.clamp_change(wanted) else {
            if !wanted.is_zero() {
                trace!(droppable = %droppable.id, error = %DragError::ScrollExhausted, "container scroll blocked");
            }
            return None;
        };
        Some(ScrollRequest::Droppable {
            id: droppable.id.clone(),
            delta,
        })
    }

    fn window_scroll(&self, args: ScrollArgs<'_>) -> Option<ScrollRequest> {
        let viewport = args.dimensions.viewport();
        let raw = self.change_for_rect(&viewport.visible_rect(), args.center);
        let wanted = self.dampen(raw, args.elapsed, args.use_time_dampening);
        let Some(delta) = viewport.scroll.clamp_change(wanted) else {
            if !wanted.is_zero() {
                trace!(error = %DragError::ScrollExhausted, "window scroll blocked");
            }
            return None;
        };
        Some(ScrollRequest::Window { delta })
    }

    /// Proximity-scaled change for a scrollable rect, both axes.
    fn change_for_rect(&self, rect: &Rect, center: Position) -> Position {
        let change =
            |axis: Axis| self.axis_change(axis.start(rect), axis.end(rect), axis.main(center));
        Position::new(change(Axis::Horizontal), change(Axis::Vertical))
    }

    /// Signed speed on one axis: positive toward the end edge.
    fn axis_change(&self, start: f64, end: f64, coord: f64) -> f64 {
        let span = end - start;
        if span <= 0.0 {
            return 0.0;
        }
        if coord > (start + end) / 2.0 {
            self.speed(span, end - coord)
        } else {
            -self.speed(span, coord - start)
        }
    }

    /// Speed from distance to the nearest edge. Past the edge means full
    /// speed; outside the threshold band means none.
    fn speed(&self, span: f64, distance_to_edge: f64) -> f64 {
        let start_band = span * self.config.start_from_fraction;
        let max_band = span * self.config.max_at_fraction;
        if distance_to_edge >= start_band {
            return 0.0;
        }
        if distance_to_edge <= max_band {
            return self.config.max_pixel_scroll;
        }
        let progress = 1.0 - (distance_to_edge - max_band) / (start_band - max_band);
        self.config.max_pixel_scroll * ease(progress)
    }

    /// Scale a change down during the post-lift grace window. Magnitudes
    /// ramp from a 1px crawl up to full speed; sign is preserved and a
    /// non-zero request never dampens to zero.
    fn dampen(&self, change: Position, elapsed: Duration, enabled: bool) -> Position {
        if !enabled || elapsed >= self.config.stop_dampening_after {
            return change;
        }
        let scale = if elapsed < self.config.accelerate_after {
            0.0
        } else {
            let ramp = self.config.stop_dampening_after - self.config.accelerate_after;
            ease((elapsed - self.config.accelerate_after).as_secs_f64() / ramp.as_secs_f64())
        };
        let component = |value: f64| {
            if value == 0.0 {
                0.0
            } else {
                let magnitude = (value.abs() * scale).max(1.0).min(value.abs());
                magnitude.copysign(value)
            }
        };
        Position::new(component(change.x), component(change.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropkit_core::{
        Axis, DimensionSet, DraggableDimension, DraggableId, DroppableDimension, Rect,
        ScrollFrame, ScrollState, Viewport,
    };

    fn scroller() -> AutoScroller {
        AutoScroller::default()
    }

    /// A 1000x600 viewport with vertical scroll room in both directions.
    fn dimensions(window_scroll: Position, max: Position) -> DimensionSet {
        let draggable = DraggableDimension {
            id: DraggableId::new("item"),
            droppable_id: "list".into(),
            client: Rect::new(0.0, 100.0, 50.0, 0.0),
        };
        let droppable = DroppableDimension {
            id: "list".into(),
            axis: Axis::Vertical,
            client: Rect::new(0.0, 100.0, 400.0, 0.0),
            frame: None,
            items: vec![draggable.clone()],
        };
        DimensionSet::new(
            draggable,
            vec![droppable],
            Viewport {
                frame: Rect::new(0.0, 1000.0, 600.0, 0.0),
                scroll: ScrollState::new(window_scroll, max),
            },
        )
    }

    fn args<'a>(dims: &'a DimensionSet, center: Position) -> ScrollArgs<'a> {
        ScrollArgs {
            center,
            dimensions: dims,
            over: None,
            elapsed: Duration::from_secs(5),
            use_time_dampening: false,
        }
    }

    #[test]
    fn center_of_viewport_requests_nothing() {
        let dims = dimensions(Position::ZERO, Position::new(0.0, 1000.0));
        assert_eq!(scroller().scroll(args(&dims, Position::new(500.0, 300.0))), None);
    }

    #[test]
    fn near_bottom_edge_scrolls_down() {
        let dims = dimensions(Position::ZERO, Position::new(0.0, 1000.0));
        let request = scroller().scroll(args(&dims, Position::new(500.0, 595.0)));
        match request {
            Some(ScrollRequest::Window { delta }) => {
                assert_eq!(delta.x, 0.0);
                assert_eq!(delta.y, 28.0, "inside the max band means full speed");
            }
            other => panic!("expected window scroll, got {other:?}"),
        }
    }

    #[test]
    fn speed_eases_with_proximity() {
        let s = scroller();
        // span 600: band starts at 150 from the edge, max within 30.
        assert_eq!(s.speed(600.0, 200.0), 0.0);
        assert_eq!(s.speed(600.0, 10.0), 28.0);
        let mid = s.speed(600.0, 90.0);
        assert!(mid > 0.0 && mid < 28.0, "eased speed in band: {mid}");
        // monotonic: closer is never slower
        assert!(s.speed(600.0, 60.0) >= mid);
    }

    #[test]
    fn exhausted_direction_yields_none_not_zero() {
        // Window already at max downward scroll.
        let dims = dimensions(Position::new(0.0, 1000.0), Position::new(0.0, 1000.0));
        assert_eq!(scroller().scroll(args(&dims, Position::new(500.0, 595.0))), None);
    }

    #[test]
    fn remaining_distance_clamps_the_delta() {
        let dims = dimensions(Position::new(0.0, 995.0), Position::new(0.0, 1000.0));
        let request = scroller().scroll(args(&dims, Position::new(500.0, 595.0)));
        assert_eq!(
            request,
            Some(ScrollRequest::Window {
                delta: Position::new(0.0, 5.0)
            })
        );
    }

    #[test]
    fn container_is_tried_before_window() {
        let mut dims = dimensions(Position::ZERO, Position::new(0.0, 1000.0));
        let id: DroppableId = "list".into();
        dims.droppable_mut(&id).unwrap().frame = Some(ScrollFrame {
            frame: Rect::new(0.0, 100.0, 200.0, 0.0),
            scroll: ScrollState::new(Position::ZERO, Position::new(0.0, 300.0)),
        });
        let mut a = args(&dims, Position::new(50.0, 195.0));
        a.over = Some(&id);
        match scroller().scroll(a) {
            Some(ScrollRequest::Droppable { id: got, delta }) => {
                assert_eq!(got, id);
                assert!(delta.y > 0.0);
            }
            other => panic!("expected droppable scroll, got {other:?}"),
        }
    }

    #[test]
    fn exhausted_container_falls_through_to_window() {
        let mut dims = dimensions(Position::ZERO, Position::new(0.0, 1000.0));
        let id: DroppableId = "list".into();
        dims.droppable_mut(&id).unwrap().frame = Some(ScrollFrame {
            frame: Rect::new(400.0, 100.0, 600.0, 0.0),
            scroll: ScrollState::new(Position::new(0.0, 300.0), Position::new(0.0, 300.0)),
        });
        // Near the bottom of both the container frame and the viewport.
        let mut a = args(&dims, Position::new(50.0, 595.0));
        a.over = Some(&id);
        match scroller().scroll(a) {
            Some(ScrollRequest::Window { delta }) => assert!(delta.y > 0.0),
            other => panic!("expected window fallthrough, got {other:?}"),
        }
    }

    #[test]
    fn dampening_ramps_from_crawl_to_full() {
        let s = scroller();
        let full = Position::new(0.0, 28.0);
        // before accelerate_after: a 1px crawl
        let early = s.dampen(full, Duration::from_millis(100), true);
        assert_eq!(early, Position::new(0.0, 1.0));
        // mid-ramp: between crawl and full
        let mid = s.dampen(full, Duration::from_millis(800), true);
        assert!(mid.y > 1.0 && mid.y < 28.0, "mid ramp: {}", mid.y);
        // after the window: untouched
        let late = s.dampen(full, Duration::from_millis(1500), true);
        assert_eq!(late, full);
        // dampening disabled: untouched
        assert_eq!(s.dampen(full, Duration::from_millis(100), false), full);
    }

    #[test]
    fn dampening_preserves_sign() {
        let s = scroller();
        let up = s.dampen(Position::new(0.0, -28.0), Duration::from_millis(100), true);
        assert_eq!(up, Position::new(0.0, -1.0));
    }

    #[test]
    fn wants_scroll_detects_lift_in_band() {
        let dims = dimensions(Position::ZERO, Position::new(0.0, 1000.0));
        let s = scroller();
        assert!(s.wants_scroll(Position::new(500.0, 595.0), &dims, None));
        assert!(!s.wants_scroll(Position::new(500.0, 300.0), &dims, None));
    }
}
