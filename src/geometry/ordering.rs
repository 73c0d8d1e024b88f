//! Stable ascending ordering along an axis

use super::types::{Axis, Rect};

/// Sort elements ascending by their near edge on `axis`.
///
/// Geometry is taken from the snapshot paired with each handle, so positions
/// are read once before sorting. Ties keep their input order.
pub fn sort_ascending<E>(mut elements: Vec<(E, Rect)>, axis: Axis) -> Vec<(E, Rect)> {
    elements.sort_by_key(|(_, rect)| rect.near(axis));
    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_left() {
        let input = vec![
            ("c", Rect::new(0, 300, 10, 10)),
            ("a", Rect::new(0, -5, 10, 10)),
            ("b", Rect::new(0, 40, 10, 10)),
        ];
        let names: Vec<_> = sort_ascending(input, Axis::Horizontal)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_top() {
        let input = vec![
            ("low", Rect::new(90, 0, 10, 10)),
            ("high", Rect::new(10, 500, 10, 10)),
        ];
        let names: Vec<_> = sort_ascending(input, Axis::Vertical)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["high", "low"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let input = vec![
            ("first", Rect::new(0, 10, 10, 10)),
            ("early", Rect::new(0, 0, 10, 10)),
            ("second", Rect::new(0, 10, 99, 10)),
            ("third", Rect::new(0, 10, 1, 10)),
        ];
        let names: Vec<_> = sort_ascending(input, Axis::Horizontal)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["early", "first", "second", "third"]);
    }
}
