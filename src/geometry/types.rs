//! Core types for the geometry engine

use serde::{Deserialize, Serialize};

/// Top-left offset of an element in the containing coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub top: i64,
    pub left: i64,
}

impl Position {
    pub fn new(top: i64, left: i64) -> Self {
        Self { top, left }
    }

    /// Coordinate on the given axis (`left` for horizontal, `top` for vertical)
    pub fn along(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }
}

/// Width and height of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Extent on the given axis (`width` for horizontal, `height` for vertical)
    pub fn along(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Horizontal => i64::from(self.width),
            Axis::Vertical => i64::from(self.height),
        }
    }
}

/// Layout axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// One side of an element's box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Snapshot of an element's geometry, read once per operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub top: i64,
    pub left: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(top: i64, left: i64, width: u32, height: u32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn from_parts(position: Position, size: Size) -> Self {
        Self::new(position.top, position.left, size.width, size.height)
    }

    pub fn position(&self) -> Position {
        Position::new(self.top, self.left)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> i64 {
        self.top + i64::from(self.height)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> i64 {
        self.left + i64::from(self.width)
    }

    /// Near edge on the axis (`left` or `top`)
    pub fn near(&self, axis: Axis) -> i64 {
        self.position().along(axis)
    }

    /// Far edge on the axis (`right` or `bottom`)
    ///
    /// Assumes the edge fits in `i64`; see [`Rect::checked_far`].
    pub fn far(&self, axis: Axis) -> i64 {
        self.near(axis) + self.extent(axis)
    }

    /// Far edge on the axis, or `None` if it lies past `i64::MAX`
    pub fn checked_far(&self, axis: Axis) -> Option<i64> {
        self.near(axis).checked_add(self.extent(axis))
    }

    /// Whether both far edges fit in `i64`
    pub fn is_representable(&self) -> bool {
        self.checked_far(Axis::Horizontal).is_some() && self.checked_far(Axis::Vertical).is_some()
    }

    /// Extent on the axis (`width` or `height`)
    pub fn extent(&self, axis: Axis) -> i64 {
        self.size().along(axis)
    }

    /// Whether `other` lies within this rectangle's span on the axis
    pub fn spans(&self, other: &Rect, axis: Axis) -> bool {
        self.near(axis) <= other.near(axis) && other.far(axis) <= self.far(axis)
    }
}

/// A non-empty, ordered set of rectangle snapshots
///
/// The calculators in this crate only accept a `RectSet`, so they never
/// observe an empty element set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RectSet(Vec<Rect>);

impl RectSet {
    /// Returns `None` when `rects` is empty
    pub fn new(rects: Vec<Rect>) -> Option<Self> {
        if rects.is_empty() {
            None
        } else {
            Some(Self(rects))
        }
    }

    pub fn first(&self) -> &Rect {
        &self.0[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rect> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<'a> IntoIterator for &'a RectSet {
    type Item = &'a Rect;
    type IntoIter = std::slice::Iter<'a, Rect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.right(), 50);
        assert_eq!(r.bottom(), 50);
        assert_eq!(r.near(Axis::Horizontal), 20);
        assert_eq!(r.far(Axis::Vertical), 50);
    }

    #[test]
    fn test_spans() {
        let outer = Rect::new(0, 0, 100, 10);
        let inner = Rect::new(0, 20, 60, 10);
        let straddling = Rect::new(0, 90, 20, 10);
        assert!(outer.spans(&inner, Axis::Horizontal));
        assert!(!outer.spans(&straddling, Axis::Horizontal));
        assert!(outer.spans(&outer, Axis::Horizontal));
    }

    #[test]
    fn test_rect_set_rejects_empty() {
        assert!(RectSet::new(vec![]).is_none());
        let set = RectSet::new(vec![Rect::new(1, 2, 3, 4)]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.first().top, 1);
    }
}
