//! Extreme edges of a rectangle set
//!
//! Each calculator is a single left-to-right fold with strict comparison.
//! Only the value is returned, never the element holding it.

use super::types::{Rect, RectSet};

/// Smallest `top` over the set
pub fn min_top(set: &RectSet) -> i64 {
    fold_min(set, |r| r.top)
}

/// Largest `top + height` over the set
pub fn max_bottom(set: &RectSet) -> i64 {
    fold_max(set, Rect::bottom)
}

/// Smallest `left` over the set
pub fn min_left(set: &RectSet) -> i64 {
    fold_min(set, |r| r.left)
}

/// Largest `left + width` over the set
pub fn max_right(set: &RectSet) -> i64 {
    fold_max(set, Rect::right)
}

fn fold_min(set: &RectSet, key: impl Fn(&Rect) -> i64) -> i64 {
    set.iter().skip(1).fold(key(set.first()), |min, r| {
        let value = key(r);
        if value < min {
            value
        } else {
            min
        }
    })
}

fn fold_max(set: &RectSet, key: impl Fn(&Rect) -> i64) -> i64 {
    set.iter().skip(1).fold(key(set.first()), |max, r| {
        let value = key(r);
        if max < value {
            value
        } else {
            max
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(rects: &[(i64, i64, u32, u32)]) -> RectSet {
        RectSet::new(
            rects
                .iter()
                .map(|&(top, left, w, h)| Rect::new(top, left, w, h))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_min_top_is_attained() {
        let s = set(&[(30, 0, 10, 10), (5, 0, 10, 10), (12, 0, 10, 10)]);
        let min = min_top(&s);
        assert_eq!(min, 5);
        assert!(s.iter().all(|r| min <= r.top));
        assert!(s.iter().any(|r| r.top == min));
    }

    #[test]
    fn test_max_bottom_uses_height() {
        let s = set(&[(0, 0, 10, 100), (50, 0, 10, 20)]);
        assert_eq!(max_bottom(&s), 100);
    }

    #[test]
    fn test_horizontal_extremes() {
        let s = set(&[(0, 40, 10, 10), (0, -15, 5, 10), (0, 20, 70, 10)]);
        assert_eq!(min_left(&s), -15);
        assert_eq!(max_right(&s), 90);
    }

    #[test]
    fn test_negative_coordinates() {
        let s = set(&[(-50, -50, 10, 10), (-80, -90, 5, 5)]);
        assert_eq!(max_bottom(&s), -40);
        assert_eq!(max_right(&s), -40);
        assert_eq!(min_top(&s), -80);
    }

    #[test]
    fn test_single_element() {
        let s = set(&[(7, 9, 3, 4)]);
        assert_eq!(min_top(&s), 7);
        assert_eq!(max_bottom(&s), 11);
        assert_eq!(min_left(&s), 9);
        assert_eq!(max_right(&s), 12);
    }
}
