//! Reference lines for center and middle alignment.
//!
//! ## Containment Policy
//!
//! The reference line on an axis is chosen in two ways:
//!
//! 1. Find the element with the largest extent on the axis (the first one wins
//!    on ties). If every element lies within its span, the line is the floor of
//!    the midpoint of that span.
//! 2. Otherwise the line is the floor of the mean of every element's own center.
//!
//! The mean is computed exactly in integers: `sum(2 * near + extent) / (2 * n)`,
//! floored toward negative infinity. The sum is widened to `i128` so sets near
//! the ends of the coordinate range do not overflow.

use super::types::{Axis, Rect, RectSet};

/// Horizontal center line (x-coordinate) of the set
pub fn horizontal_center(set: &RectSet) -> i64 {
    reference_line(set, Axis::Horizontal)
}

/// Vertical middle line (y-coordinate) of the set
pub fn vertical_middle(set: &RectSet) -> i64 {
    reference_line(set, Axis::Vertical)
}

/// Center or middle line depending on the axis
pub fn reference_line(set: &RectSet, axis: Axis) -> i64 {
    let largest = largest_on(set, axis);

    if set.iter().all(|r| largest.spans(r, axis)) {
        largest.near(axis) + largest.extent(axis).div_euclid(2)
    } else {
        let doubled: i128 = set
            .iter()
            .map(|r| 2 * i128::from(r.near(axis)) + i128::from(r.extent(axis)))
            .sum();
        let count = set.len() as i128;
        // the mean of the centers lies between the smallest near edge and the
        // largest far edge, so it fits back into i64
        doubled.div_euclid(2 * count) as i64
    }
}

fn largest_on(set: &RectSet, axis: Axis) -> &Rect {
    set.iter().skip(1).fold(set.first(), |largest, r| {
        if largest.extent(axis) < r.extent(axis) {
            r
        } else {
            largest
        }
    })
}
