//! An import prelude that re-exports commonly used items.

pub use geometry::prelude::*;

pub use crate::cache::PictureCache;
pub use crate::canvas::{Bitmap, Canvas, DrawCommand, RecordingCanvas};
pub use crate::combinators::{below, beside, over, quartet, square_of_four};
pub use crate::context::Context;
pub use crate::error::{Error, Result};
pub use crate::picture::{
    draw, draw_styled, flip_horiz, flip_vert, identity, image, path, polyline, rotate180,
    rotate270, rotate90, segments, transform, Picture, PictureRef, Segment,
};
pub use crate::raster::RasterImage;
pub use crate::shapes::{arrow, diagonals, diamond, outline, wave};
pub use crate::split::{corner_split, right_split, split, square_limit, up_split};
pub use crate::style::{styled, Color, Style};
