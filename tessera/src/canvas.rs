//! Drawing surfaces.
//!
//! Pictures never draw pixels themselves. They issue device-space calls to a
//! [`Canvas`], which is supplied by the caller at render time.

use geometry::frame::Frame;
use geometry::point::Point;
use geometry::transform::Transformation;

use crate::style::{Color, Style};

/// A surface that pictures draw onto.
///
/// All coordinates are in device space.
pub trait Canvas {
    /// Draws a straight line from `from` to `to`.
    fn draw_line(&mut self, from: Point, to: Point, style: &Style);

    /// Draws `bitmap` into the parallelogram `frame`.
    ///
    /// `transformation` maps bitmap pixel coordinates, where the bitmap spans
    /// `[0, width] x [0, height]`, into device space. Canvases that cannot
    /// display images may ignore the call, which is the default.
    #[allow(unused_variables)]
    fn draw_image(&mut self, bitmap: &dyn Bitmap, frame: &Frame, transformation: Transformation) {}
}

/// Read access to a grid of pixels.
pub trait Bitmap: Send + Sync {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// The colour of the pixel at column `x` and row `y`, or [`None`] if out of range.
    fn pixel(&self, x: u32, y: u32) -> Option<Color>;
}

/// A single call recorded by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A [`Canvas::draw_line`] call.
    Line {
        /// Device-space start point.
        from: Point,
        /// Device-space end point.
        to: Point,
        /// The style the line was drawn with.
        style: Style,
    },
    /// A [`Canvas::draw_image`] call.
    Image {
        /// Width of the bitmap in pixels.
        width: u32,
        /// Height of the bitmap in pixels.
        height: u32,
        /// The destination frame.
        frame: Frame,
        /// The pixel-to-device transformation.
        transformation: Transformation,
    },
}

/// A canvas that records every call it receives, in order.
///
/// Useful as a display list and for testing.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Creates an empty [`RecordingCanvas`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Consumes the canvas, returning the recorded commands.
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// The endpoints of every recorded line, in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            DrawCommand::Image { .. } => None,
        })
    }

    /// The number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Forgets every recorded command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn draw_line(&mut self, from: Point, to: Point, style: &Style) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            style: *style,
        });
    }

    fn draw_image(&mut self, bitmap: &dyn Bitmap, frame: &Frame, transformation: Transformation) {
        self.commands.push(DrawCommand::Image {
            width: bitmap.width(),
            height: bitmap.height(),
            frame: *frame,
            transformation,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LinesOnly(Vec<(Point, Point)>);

    impl Canvas for LinesOnly {
        fn draw_line(&mut self, from: Point, to: Point, _style: &Style) {
            self.0.push((from, to));
        }
    }

    struct Solid;

    impl Bitmap for Solid {
        fn width(&self) -> u32 {
            2
        }
        fn height(&self) -> u32 {
            3
        }
        fn pixel(&self, x: u32, y: u32) -> Option<Color> {
            (x < 2 && y < 3).then_some(Color::WHITE)
        }
    }

    #[test]
    fn recording_canvas_keeps_call_order() {
        let mut canvas = RecordingCanvas::new();
        let style = Style::default();
        canvas.draw_line(Point::new(0., 0.), Point::new(1., 0.), &style);
        canvas.draw_image(&Solid, &Frame::unit(), Transformation::identity());
        canvas.draw_line(Point::new(1., 0.), Point::new(1., 1.), &style);

        assert_eq!(canvas.len(), 3);
        assert!(matches!(
            canvas.commands()[1],
            DrawCommand::Image {
                width: 2,
                height: 3,
                ..
            }
        ));
        assert_eq!(
            canvas.lines().collect::<Vec<_>>(),
            vec![
                (Point::new(0., 0.), Point::new(1., 0.)),
                (Point::new(1., 0.), Point::new(1., 1.)),
            ]
        );

        canvas.clear();
        assert!(canvas.is_empty());
    }

    #[test]
    fn draw_image_is_optional() {
        let mut canvas = LinesOnly(Vec::new());
        canvas.draw_image(&Solid, &Frame::unit(), Transformation::identity());
        canvas.draw_line(Point::zero(), Point::new(2., 2.), &Style::default());
        assert_eq!(canvas.0.len(), 1);
    }
}
