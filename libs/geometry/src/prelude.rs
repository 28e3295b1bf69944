//! An import prelude that re-exports commonly used items.

pub use crate::frame::Frame;
pub use crate::point::Point;
pub use crate::transform::{Transform, TransformOwned, Transformation};
