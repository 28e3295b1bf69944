//! Parallelogram coordinate frames.

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::transform::Transformation;

/// A parallelogram coordinate system.
///
/// A frame maps unit-square coordinates `(u, v)` to `origin + u * e1 + v * e2`.
/// Frames whose edge vectors are linearly dependent are legal; they collapse
/// anything mapped through them onto a line or a point.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Frame {
    /// The image of the unit-square point `(0, 0)`.
    pub origin: Point,
    /// The edge vector along which the unit-square x-axis is mapped.
    pub e1: Point,
    /// The edge vector along which the unit-square y-axis is mapped.
    pub e2: Point,
}

impl Frame {
    /// Creates a new [`Frame`].
    pub const fn new(origin: Point, e1: Point, e2: Point) -> Self {
        Self { origin, e1, e2 }
    }

    /// The unit square itself.
    pub const fn unit() -> Self {
        Self::new(Point::zero(), Point::new(1., 0.), Point::new(0., 1.))
    }

    /// The frame covering a `width` by `height` canvas anchored at `(0, 0)`.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let frame = Frame::from_size(640., 480.);
    /// assert_eq!(frame.map(Point::new(1., 1.)), Point::new(640., 480.));
    /// ```
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(Point::zero(), Point::new(width, 0.), Point::new(0., height))
    }

    /// Maps a unit-square point into this frame.
    #[inline]
    pub fn map(&self, p: Point) -> Point {
        self.origin + self.e1 * p.x + self.e2 * p.y
    }

    /// Returns the sub-frame whose corners are the images of the unit-square
    /// points `origin`, `e1`, and `e2` under this frame.
    ///
    /// The arguments are corner positions, not edge vectors: the derived edge
    /// vectors are `map(e1) - map(origin)` and `map(e2) - map(origin)`.
    pub fn retarget(&self, origin: Point, e1: Point, e2: Point) -> Frame {
        let origin = self.map(origin);
        Frame {
            origin,
            e1: self.map(e1) - origin,
            e2: self.map(e2) - origin,
        }
    }

    /// The affine [`Transformation`] equivalent to [`Frame::map`].
    pub fn transformation(&self) -> Transformation {
        Transformation::from_parts(
            [[self.e1.x, self.e2.x], [self.e1.y, self.e2.y]],
            [self.origin.x, self.origin.y],
        )
    }

    /// The signed area of the parallelogram spanned by `e1` and `e2`.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.e1.cross(self.e2)
    }

    /// Returns `true` if `e1` and `e2` are linearly dependent.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.determinant() == 0.
    }

    /// The four corners of the frame, counterclockwise in unit-square order:
    /// `(0,0)`, `(1,0)`, `(1,1)`, `(0,1)`.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.origin,
            self.origin + self.e1,
            self.origin + self.e1 + self.e2,
            self.origin + self.e2,
        ]
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn skewed() -> Frame {
        Frame::new(
            Point::new(3., -2.),
            Point::new(4., 1.),
            Point::new(-1., 5.),
        )
    }

    #[test]
    fn map_sends_unit_corners_to_frame_corners() {
        for frame in [Frame::unit(), Frame::from_size(10., 20.), skewed()] {
            assert_eq!(frame.map(Point::new(0., 0.)), frame.origin);
            assert_eq!(frame.map(Point::new(1., 0.)), frame.origin + frame.e1);
            assert_eq!(frame.map(Point::new(0., 1.)), frame.origin + frame.e2);
            assert_eq!(frame.map(Point::new(1., 1.)), frame.corners()[2]);
        }
    }

    #[test]
    fn transformation_agrees_with_map() {
        let frame = skewed();
        let trans = frame.transformation();
        for p in [
            Point::new(0.25, 0.75),
            Point::new(-1., 2.),
            Point::new(0.5, 0.5),
        ] {
            assert_relative_eq!(trans.apply(p), frame.map(p), epsilon = 1e-12);
        }
    }

    #[test]
    fn retarget_to_left_half() {
        let frame = Frame::from_size(10., 10.);
        let left = frame.retarget(
            Point::new(0., 0.),
            Point::new(0.5, 0.),
            Point::new(0., 1.),
        );
        assert_eq!(
            left,
            Frame::new(Point::zero(), Point::new(5., 0.), Point::new(0., 10.))
        );
    }

    #[test]
    fn degenerate_frames_collapse() {
        let line = Frame::new(Point::zero(), Point::new(1., 1.), Point::new(2., 2.));
        assert!(line.is_degenerate());
        assert!(line.transformation().inv().is_none());
        assert_eq!(line.map(Point::new(1., 1.)), Point::new(3., 3.));
        assert!(!skewed().is_degenerate());
        assert_eq!(skewed().determinant(), 21.);
    }
}
