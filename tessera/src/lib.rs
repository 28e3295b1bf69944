//! Tessera: recursive picture combinators.
//!
//! A [`Picture`](picture::Picture) knows how to draw itself into any
//! parallelogram [`Frame`](geometry::frame::Frame). Combinators build new
//! pictures by drawing existing ones into sub-frames, which is enough to
//! express flips, rotations, side-by-side layouts and the recursive
//! Escher-style tilings in [`split`].
//!
//! ```
//! use tessera::prelude::*;
//!
//! let picture = square_limit(&wave(), 2)?;
//! let mut canvas = RecordingCanvas::new();
//! draw(&picture, &Frame::from_size(400., 400.), &mut canvas);
//! assert!(!canvas.is_empty());
//! # Ok::<(), tessera::error::Error>(())
//! ```
#![warn(missing_docs)]

extern crate self as tessera;

pub mod cache;
pub mod canvas;
pub mod combinators;
pub mod context;
pub mod error;
pub mod picture;
pub mod prelude;
pub mod raster;
pub mod shapes;
pub mod split;
pub mod style;

#[doc(inline)]
pub use geometry;
#[doc(inline)]
pub use picture::{draw, draw_styled};
