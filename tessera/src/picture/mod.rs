//! Pictures: things that know how to draw themselves into a frame.
//!
//! A [`Picture`] is an immutable value. Rendering hands it a [`Frame`] and a
//! [`Canvas`]; the picture maps its unit-square content through the frame and
//! issues device-space draw calls. Pictures are shared as [`PictureRef`]s, so
//! the same sub-picture can appear many times in a composite without copying.

use std::fmt::Debug;
use std::sync::Arc;

use geometry::frame::Frame;

use crate::canvas::Canvas;
use crate::style::Style;

pub mod image;
pub mod segment;
pub mod transform;

#[doc(inline)]
pub use image::{image, ImagePicture};
#[doc(inline)]
pub use segment::{path, polyline, segments, Segment, SegmentPicture};
#[doc(inline)]
pub use transform::{
    flip_horiz, flip_vert, identity, rotate180, rotate270, rotate90, transform, Transformed,
};

/// A drawable that renders itself into an arbitrary parallelogram.
pub trait Picture: Debug + Send + Sync {
    /// Draws this picture into `frame` on `canvas` using `style`.
    fn render(&self, frame: &Frame, style: &Style, canvas: &mut dyn Canvas);
}

/// A shared, immutable picture.
pub type PictureRef = Arc<dyn Picture>;

impl<T: Picture + ?Sized> Picture for Arc<T> {
    #[inline]
    fn render(&self, frame: &Frame, style: &Style, canvas: &mut dyn Canvas) {
        (**self).render(frame, style, canvas)
    }
}

/// Pictures drawn one after another into the same frame.
#[derive(Debug, Clone)]
pub struct Group {
    layers: Vec<PictureRef>,
}

impl Group {
    /// Creates a group that renders `layers` in order.
    pub fn new(layers: Vec<PictureRef>) -> Self {
        Self { layers }
    }

    /// The grouped pictures, in rendering order.
    pub fn layers(&self) -> &[PictureRef] {
        &self.layers
    }
}

impl Picture for Group {
    fn render(&self, frame: &Frame, style: &Style, canvas: &mut dyn Canvas) {
        for layer in &self.layers {
            layer.render(frame, style, canvas);
        }
    }
}

/// Renders `picture` into `frame` with the default [`Style`].
pub fn draw<P: Picture + ?Sized>(picture: &P, frame: &Frame, canvas: &mut dyn Canvas) {
    draw_styled(picture, frame, &Style::default(), canvas)
}

/// Renders `picture` into `frame` with `style`.
pub fn draw_styled<P: Picture + ?Sized>(
    picture: &P,
    frame: &Frame,
    style: &Style,
    canvas: &mut dyn Canvas,
) {
    if frame.is_degenerate() {
        tracing::debug!(?frame, "rendering into a degenerate frame");
    }
    picture.render(frame, style, canvas);
}

#[cfg(test)]
mod tests {
    use geometry::prelude::*;

    use super::*;
    use crate::canvas::RecordingCanvas;

    #[test]
    fn groups_render_in_order() {
        let a = polyline(&[Point::new(0., 0.), Point::new(1., 0.)]);
        let b = polyline(&[Point::new(0., 1.), Point::new(1., 1.)]);
        let group = Group::new(vec![b.clone(), a.clone()]);
        assert_eq!(group.layers().len(), 2);

        let mut canvas = RecordingCanvas::new();
        draw(&group, &Frame::from_size(2., 2.), &mut canvas);
        assert_eq!(
            canvas.lines().collect::<Vec<_>>(),
            vec![
                (Point::new(0., 2.), Point::new(2., 2.)),
                (Point::new(0., 0.), Point::new(2., 0.)),
            ]
        );
    }

    #[test]
    fn degenerate_frames_collapse_without_error() {
        let square = polyline(&[
            Point::new(0., 0.),
            Point::new(1., 0.),
            Point::new(1., 1.),
            Point::new(0., 1.),
        ]);
        let flat = Frame::new(Point::new(1., 1.), Point::new(2., 0.), Point::new(4., 0.));

        let mut canvas = RecordingCanvas::new();
        draw(&square, &flat, &mut canvas);
        assert_eq!(canvas.len(), 3);
        assert!(canvas.lines().all(|(a, b)| a.y == 1. && b.y == 1.));
    }
}
