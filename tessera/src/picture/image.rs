//! Bitmap pictures.

use std::fmt;
use std::sync::Arc;

use geometry::frame::Frame;
use geometry::transform::Transformation;

use super::{Picture, PictureRef};
use crate::canvas::{Bitmap, Canvas};
use crate::style::Style;

/// A picture that stretches a bitmap over its frame.
///
/// The bitmap is shared, not copied. Pixel `(0, 0)` lands at the frame origin,
/// the bitmap's width runs along `e1` and its height along `e2`.
pub struct ImagePicture<B> {
    bitmap: Arc<B>,
    width: u32,
    height: u32,
}

impl<B: Bitmap> ImagePicture<B> {
    /// Creates a picture of `bitmap`.
    pub fn new(bitmap: Arc<B>) -> Self {
        let (width, height) = (bitmap.width(), bitmap.height());
        Self {
            bitmap,
            width,
            height,
        }
    }

    /// The shared bitmap.
    pub fn bitmap(&self) -> &Arc<B> {
        &self.bitmap
    }

    /// The affine map from bitmap pixel space into device space for `frame`.
    ///
    /// Returns [`None`] for a bitmap with no pixels.
    pub fn transformation(&self, frame: &Frame) -> Option<Transformation> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(Transformation::cascade(
            frame.transformation(),
            Transformation::scale(1. / self.width as f64, 1. / self.height as f64),
        ))
    }
}

impl<B> fmt::Debug for ImagePicture<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePicture")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl<B: Bitmap + 'static> Picture for ImagePicture<B> {
    fn render(&self, frame: &Frame, _style: &Style, canvas: &mut dyn Canvas) {
        match self.transformation(frame) {
            Some(transformation) => canvas.draw_image(&*self.bitmap, frame, transformation),
            None => tracing::warn!(
                width = self.width,
                height = self.height,
                "skipping empty bitmap"
            ),
        }
    }
}

/// Creates a picture of `bitmap`.
pub fn image<B: Bitmap + 'static>(bitmap: Arc<B>) -> PictureRef {
    Arc::new(ImagePicture::new(bitmap))
}
