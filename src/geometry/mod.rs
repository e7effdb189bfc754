//! Plane geometry for canvas blocks

pub mod transform;
pub mod types;

pub use transform::{normalize_degrees, RotationTransform};
pub use types::{BoundingBox, Point};
