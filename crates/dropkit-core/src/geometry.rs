#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are `f64` page coordinates (origin at the document's
//! top-left, y growing downward). [`Position`] arithmetic is pure; [`Rect`]
//! maintains non-negative width and height by construction.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// A 2D point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }

    /// Whether both components are zero.
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Position {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle described by its four edges.
///
/// Invariant: `right >= left` and `bottom >= top`, so [`Rect::width`] and
/// [`Rect::height`] are always non-negative. Construct via [`Rect::new`]
/// (debug-asserted) or [`Rect::from_points`] (normalizing).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Rect {
    /// Create a rectangle from edge coordinates.
    #[must_use]
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        debug_assert!(right >= left, "rect right < left");
        debug_assert!(bottom >= top, "rect bottom < top");
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create a rectangle spanning two corner positions, in any order.
    #[must_use]
    pub fn from_points(a: Position, b: Position) -> Self {
        Self {
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
            left: a.x.min(b.x),
        }
    }

    /// Width (non-negative).
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height (non-negative).
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Position {
        Position::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// Check if a position is inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Translate by a delta.
    #[must_use]
    pub fn shift(&self, delta: Position) -> Self {
        Self {
            top: self.top + delta.y,
            right: self.right + delta.x,
            bottom: self.bottom + delta.y,
            left: self.left + delta.x,
        }
    }

    /// Compute the intersection with another rectangle, if any overlap exists.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        let left = self.left.max(other.left);
        if right >= left && bottom >= top {
            Some(Self {
                top,
                right,
                bottom,
                left,
            })
        } else {
            None
        }
    }
}

/// The primary scroll/stacking axis of a droppable list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Items stack top-to-bottom; the main coordinate is `y`.
    Vertical,
    /// Items stack left-to-right; the main coordinate is `x`.
    Horizontal,
}

impl Axis {
    /// The main-axis component of a position.
    #[inline]
    #[must_use]
    pub fn main(self, p: Position) -> f64 {
        match self {
            Self::Vertical => p.y,
            Self::Horizontal => p.x,
        }
    }

    /// The cross-axis component of a position.
    #[inline]
    #[must_use]
    pub fn cross(self, p: Position) -> f64 {
        match self {
            Self::Vertical => p.x,
            Self::Horizontal => p.y,
        }
    }

    /// The rect edge where the axis starts (top or left).
    #[inline]
    #[must_use]
    pub fn start(self, r: &Rect) -> f64 {
        match self {
            Self::Vertical => r.top,
            Self::Horizontal => r.left,
        }
    }

    /// The rect edge where the axis ends (bottom or right).
    #[inline]
    #[must_use]
    pub fn end(self, r: &Rect) -> f64 {
        match self {
            Self::Vertical => r.bottom,
            Self::Horizontal => r.right,
        }
    }
}
