//! Alignment engine
//!
//! This module applies the geometry calculators to live elements reached
//! through a [`GeometryAccessor`], producing one [`PositionChange`] per element.

pub mod accessor;
pub mod config;
pub mod error;
pub mod operations;
pub mod report;

pub use accessor::{GeometryAccessor, Reposition};
pub use config::{AlignConfig, BorderMode};
pub use error::AlignError;
pub use operations::{AlignKind, Aligner, Spacing};
pub use report::{report, Completion, PositionChange};
