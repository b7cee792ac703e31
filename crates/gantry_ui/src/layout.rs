//! Layout value types: points, rectangles, dock margins and padding.
//!
//! Everything here is integer pixels. Sizes are never allowed to go below
//! zero: every operation that could shrink a rectangle floors at zero.

use serde::Deserialize;

/// A point (or delta) in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// X position (left edge).
    pub x: i32,
    /// Y position (top edge).
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from position and size.
    #[must_use]
    pub const fn from_pos_size(pos: Point, size: (i32, i32)) -> Self {
        Self::new(pos.x, pos.y, size.0, size.1)
    }

    /// Returns the top-left corner.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Returns the bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns the top-right corner.
    #[must_use]
    pub const fn top_right(&self) -> Point {
        Point::new(self.right(), self.y)
    }

    /// Returns the bottom-left corner.
    #[must_use]
    pub const fn bottom_left(&self) -> Point {
        Point::new(self.x, self.bottom())
    }

    /// Returns the bottom-right corner.
    #[must_use]
    pub const fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Returns the center point (rounded toward the origin).
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Returns true if the rectangle has no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns true if the point is inside the rectangle.
    ///
    /// The left/top edges are inclusive, right/bottom exclusive.
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns true if `other` lies entirely within this rectangle.
    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Returns this rectangle moved by `delta`.
    #[must_use]
    pub const fn offset(&self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Grows the rectangle by `dx` on the left and right and `dy` on the top
    /// and bottom. Negative amounts shrink it; size floors at zero.
    #[must_use]
    pub fn inflate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x - dx,
            self.y - dy,
            (self.width + dx * 2).max(0),
            (self.height + dy * 2).max(0),
        )
    }

    /// Shrinks the rectangle by `dx`/`dy` on each side.
    #[must_use]
    pub fn deflate(&self, dx: i32, dy: i32) -> Self {
        self.inflate(-dx, -dy)
    }

    /// Clamps this rectangle so it lies entirely within `bounds`.
    ///
    /// Left/top edges that start before the bound are pulled inward (shrinking
    /// the size), right/bottom edges past the bound are truncated. The result
    /// never has a negative size.
    #[must_use]
    pub fn clamp_within(&self, bounds: &Self) -> Self {
        let mut clamped = *self;

        if clamped.x < bounds.x {
            clamped.width -= bounds.x - clamped.x;
            clamped.x = bounds.x;
        }
        if clamped.y < bounds.y {
            clamped.height -= bounds.y - clamped.y;
            clamped.y = bounds.y;
        }
        if clamped.right() > bounds.right() {
            clamped.width = bounds.right() - clamped.x;
        }
        if clamped.bottom() > bounds.bottom() {
            clamped.height = bounds.bottom() - clamped.y;
        }

        // A rect entirely outside the bound collapses onto its edge.
        clamped.x = clamped.x.min(bounds.right().max(bounds.x));
        clamped.y = clamped.y.min(bounds.bottom().max(bounds.y));
        clamped.width = clamped.width.max(0);
        clamped.height = clamped.height.max(0);
        clamped
    }
}

/// Dock margins.
///
/// Each edge is either docked at a fixed offset from the matching edge of the
/// parent's clip rectangle (`Some(offset)`), or not docked (`None`). Docked
/// edges are re-derived on every bounds pass; undocked edges keep whatever
/// the local bounds were last set to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct Margin {
    /// Offset from the parent's left edge.
    pub left: Option<i32>,
    /// Offset from the parent's right edge.
    pub right: Option<i32>,
    /// Offset from the parent's top edge.
    pub top: Option<i32>,
    /// Offset from the parent's bottom edge.
    pub bottom: Option<i32>,
}

impl Margin {
    /// No docked edges.
    pub const NONE: Self = Self {
        left: None,
        right: None,
        top: None,
        bottom: None,
    };

    /// Docks all four edges at `offset` (fills the parent).
    #[must_use]
    pub const fn fill(offset: i32) -> Self {
        Self {
            left: Some(offset),
            right: Some(offset),
            top: Some(offset),
            bottom: Some(offset),
        }
    }

    /// Docks the left edge.
    #[must_use]
    pub const fn dock_left(mut self, offset: i32) -> Self {
        self.left = Some(offset);
        self
    }

    /// Docks the right edge.
    #[must_use]
    pub const fn dock_right(mut self, offset: i32) -> Self {
        self.right = Some(offset);
        self
    }

    /// Docks the top edge.
    #[must_use]
    pub const fn dock_top(mut self, offset: i32) -> Self {
        self.top = Some(offset);
        self
    }

    /// Docks the bottom edge.
    #[must_use]
    pub const fn dock_bottom(mut self, offset: i32) -> Self {
        self.bottom = Some(offset);
        self
    }

    /// Returns true if no edge is docked.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.top.is_none() && self.bottom.is_none()
    }

    /// Derives local bounds from `local` and the parent clip rectangle.
    #[must_use]
    pub fn apply(&self, local: Rect, parent: Rect) -> Rect {
        let (x, width) = Self::dock_axis(local.x, local.width, parent.width, self.left, self.right);
        let (y, height) = Self::dock_axis(local.y, local.height, parent.height, self.top, self.bottom);
        Rect::new(x, y, width, height)
    }

    /// Resolves one axis: `(position, size)`.
    fn dock_axis(
        pos: i32,
        size: i32,
        span: i32,
        near: Option<i32>,
        far: Option<i32>,
    ) -> (i32, i32) {
        match (near, far) {
            (Some(near), Some(far)) => (near, (span - near - far).max(0)),
            (Some(near), None) => (near, size),
            (None, Some(far)) => (span - size - far, size),
            (None, None) => (pos, size),
        }
    }
}

/// Insets that shrink a rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct Padding {
    /// Left inset.
    pub left: i32,
    /// Right inset.
    pub right: i32,
    /// Top inset.
    pub top: i32,
    /// Bottom inset.
    pub bottom: i32,
}

impl Padding {
    /// No insets.
    pub const ZERO: Self = Self {
        left: 0,
        right: 0,
        top: 0,
        bottom: 0,
    };

    /// Creates padding with explicit insets.
    #[must_use]
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// The same inset on every side.
    #[must_use]
    pub const fn uniform(amount: i32) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    /// Total horizontal inset.
    #[must_use]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical inset.
    #[must_use]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Shrinks `rect` by these insets; size floors at zero.
    #[must_use]
    pub fn apply(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x + self.left,
            rect.y + self.top,
            (rect.width - self.horizontal()).max(0),
            (rect.height - self.vertical()).max(0),
        )
    }
}
