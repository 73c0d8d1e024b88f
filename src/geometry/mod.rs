//! Geometry calculators for alignment
//!
//! Pure functions over rectangle snapshots: extremes, center/middle reference
//! lines and axis ordering. Nothing here reads or writes live elements.

pub mod centroid;
pub mod extremum;
pub mod ordering;
pub mod types;

pub use centroid::{horizontal_center, reference_line, vertical_middle};
pub use extremum::{max_bottom, max_right, min_left, min_top};
pub use ordering::sort_ascending;
pub use types::*;
