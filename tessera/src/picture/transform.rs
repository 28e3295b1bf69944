//! Frame retargeting and the canonical flips and rotations.

use std::sync::Arc;

use geometry::frame::Frame;
use geometry::point::Point;

use super::{Picture, PictureRef};
use crate::canvas::Canvas;
use crate::style::Style;

/// A picture drawn into a sub-frame of the frame it is given.
///
/// The corners are unit-square points. Values outside `[0, 1]` are legal and
/// place the picture outside the nominal region.
#[derive(Debug, Clone)]
pub struct Transformed {
    picture: PictureRef,
    origin: Point,
    e1: Point,
    e2: Point,
}

impl Transformed {
    /// Creates a new [`Transformed`] picture.
    pub fn new(picture: PictureRef, origin: Point, e1: Point, e2: Point) -> Self {
        Self {
            picture,
            origin,
            e1,
            e2,
        }
    }

    /// The sub-frame `picture` is drawn into when this picture is drawn into `frame`.
    #[inline]
    pub fn target(&self, frame: &Frame) -> Frame {
        frame.retarget(self.origin, self.e1, self.e2)
    }
}

impl Picture for Transformed {
    fn render(&self, frame: &Frame, style: &Style, canvas: &mut dyn Canvas) {
        self.picture.render(&self.target(frame), style, canvas);
    }
}

/// Draws `picture` into the sub-frame with corners `origin`, `e1` and `e2`.
///
/// This is the only way spatial combinators move pictures around.
pub fn transform(
    picture: &PictureRef,
    origin: impl Into<Point>,
    e1: impl Into<Point>,
    e2: impl Into<Point>,
) -> PictureRef {
    Arc::new(Transformed::new(
        picture.clone(),
        origin.into(),
        e1.into(),
        e2.into(),
    ))
}

/// Returns `picture` unchanged.
pub fn identity(picture: &PictureRef) -> PictureRef {
    picture.clone()
}

/// Mirrors `picture` top to bottom.
pub fn flip_vert(picture: &PictureRef) -> PictureRef {
    transform(picture, (0., 1.), (1., 1.), (0., 0.))
}

/// Mirrors `picture` left to right.
pub fn flip_horiz(picture: &PictureRef) -> PictureRef {
    transform(picture, (1., 0.), (0., 0.), (1., 1.))
}

/// Rotates `picture` a quarter turn.
pub fn rotate90(picture: &PictureRef) -> PictureRef {
    transform(picture, (1., 0.), (1., 1.), (0., 0.))
}

/// Rotates `picture` a half turn.
pub fn rotate180(picture: &PictureRef) -> PictureRef {
    rotate90(&rotate90(picture))
}

/// Rotates `picture` three quarter turns.
pub fn rotate270(picture: &PictureRef) -> PictureRef {
    rotate90(&rotate180(picture))
}
