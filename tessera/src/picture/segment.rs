//! Line-segment pictures.

use std::sync::Arc;

use geometry::frame::Frame;
use geometry::point::Point;
use geometry::transform::{Transform, TransformOwned, Transformation};
use serde::{Deserialize, Serialize};

use super::{Picture, PictureRef};
use crate::canvas::Canvas;
use crate::style::Style;

/// A line segment in unit-square coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// The start point.
    pub start: Point,
    /// The end point.
    pub end: Point,
}

impl Segment {
    /// Creates a new [`Segment`].
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

impl Transform for Segment {
    fn transform(&mut self, trans: Transformation) -> &mut Self {
        self.start.transform(trans);
        self.end.transform(trans);
        self
    }
}

impl From<(Point, Point)> for Segment {
    fn from((start, end): (Point, Point)) -> Self {
        Self::new(start, end)
    }
}

/// A picture made of straight lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentPicture {
    segments: Vec<Segment>,
}

impl SegmentPicture {
    /// Creates a picture that draws `segments` in order.
    pub fn new(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// The segments of this picture.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl Picture for SegmentPicture {
    fn render(&self, frame: &Frame, style: &Style, canvas: &mut dyn Canvas) {
        let trans = frame.transformation();
        for seg in &self.segments {
            let Segment { start, end } = seg.transform_owned(trans);
            tracing::trace!(?start, ?end, "draw segment");
            canvas.draw_line(start, end, style);
        }
    }
}

/// Creates a picture that draws `segments` in order.
pub fn segments(segments: impl IntoIterator<Item = Segment>) -> PictureRef {
    Arc::new(SegmentPicture::new(segments))
}

/// Joins consecutive points with segments.
///
/// `k` points produce `k - 1` segments. Fewer than two points produce none.
///
/// # Example
///
/// ```
/// # use geometry::prelude::*;
/// # use tessera::picture::{path, Segment};
/// let segs = path(&[Point::new(0., 0.), Point::new(1., 0.), Point::new(1., 1.)]);
/// assert_eq!(
///     segs,
///     vec![
///         Segment::new(Point::new(0., 0.), Point::new(1., 0.)),
///         Segment::new(Point::new(1., 0.), Point::new(1., 1.)),
///     ]
/// );
/// ```
pub fn path(points: &[Point]) -> Vec<Segment> {
    points
        .windows(2)
        .map(|w| Segment::new(w[0], w[1]))
        .collect()
}

/// A picture of the open polyline through `points`.
pub fn polyline(points: &[Point]) -> PictureRef {
    segments(path(points))
}
