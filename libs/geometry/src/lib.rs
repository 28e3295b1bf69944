//! 2-D points, affine transformations, and parallelogram frames.
//!
//! # Examples
//!
//! Map a unit-square point into a [frame](crate::frame::Frame):
//!
//! ```
//! # use geometry::prelude::*;
//! let frame = Frame::new(Point::new(1., 1.), Point::new(2., 0.), Point::new(0., 4.));
//! assert_eq!(frame.map(Point::new(0.5, 0.5)), Point::new(2., 3.));
//! ```
#![warn(missing_docs)]

extern crate self as geometry;

pub mod frame;
pub mod point;
pub mod prelude;
pub mod transform;
