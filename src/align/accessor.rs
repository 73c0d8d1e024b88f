//! Access to live element geometry
//!
//! The alignment engine never owns elements. It resolves them, reads their
//! geometry and writes new positions through a [`GeometryAccessor`] supplied
//! by the surrounding environment.

use crate::geometry::{Axis, Edge, Position, Rect, Size};

use super::error::AlignError;

/// A position update; `None` leaves that coordinate unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reposition {
    pub top: Option<i64>,
    pub left: Option<i64>,
}

impl Reposition {
    pub fn top(top: i64) -> Self {
        Self {
            top: Some(top),
            left: None,
        }
    }

    pub fn left(left: i64) -> Self {
        Self {
            top: None,
            left: Some(left),
        }
    }

    /// Move along one axis only
    pub fn along(axis: Axis, value: i64) -> Self {
        match axis {
            Axis::Horizontal => Self::left(value),
            Axis::Vertical => Self::top(value),
        }
    }

    /// Apply the update to a position
    pub fn apply_to(&self, position: Position) -> Position {
        Position {
            top: self.top.unwrap_or(position.top),
            left: self.left.unwrap_or(position.left),
        }
    }
}

/// Capabilities the environment provides to the alignment engine
pub trait GeometryAccessor {
    /// Handle to a live element
    type Element: Clone + std::fmt::Debug;

    /// Whatever the environment uses to name elements
    type Selector: ?Sized + std::fmt::Debug;

    /// Resolve a selector into a concrete, ordered element set.
    ///
    /// Fails with [`AlignError::Resolution`] when nothing matches and with
    /// [`AlignError::Cardinality`] when `require_multiple` is set and fewer
    /// than two elements matched.
    fn resolve(
        &self,
        selector: &Self::Selector,
        require_multiple: bool,
    ) -> Result<Vec<Self::Element>, AlignError>;

    /// Current top/left offset of the element
    fn position(&self, element: &Self::Element) -> Result<Position, AlignError>;

    /// Current width/height of the element
    fn size(&self, element: &Self::Element) -> Result<Size, AlignError>;

    /// Border width on one edge of the element
    fn border_thickness(&self, element: &Self::Element, edge: Edge) -> Result<u32, AlignError>;

    /// Move the element. The environment may clamp the result; callers read
    /// the effective position back with [`position`](Self::position).
    fn reposition(&mut self, element: &Self::Element, target: Reposition)
        -> Result<(), AlignError>;

    /// Snapshot of position and size
    fn rect(&self, element: &Self::Element) -> Result<Rect, AlignError> {
        Ok(Rect::from_parts(self.position(element)?, self.size(element)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reposition_along_axis() {
        let start = Position::new(5, 7);
        assert_eq!(
            Reposition::along(Axis::Horizontal, 40).apply_to(start),
            Position::new(5, 40)
        );
        assert_eq!(
            Reposition::along(Axis::Vertical, -3).apply_to(start),
            Position::new(-3, 7)
        );
    }

    #[test]
    fn test_empty_reposition_is_identity() {
        let start = Position::new(1, 2);
        assert_eq!(Reposition::default().apply_to(start), start);
    }
}
