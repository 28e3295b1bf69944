//! Stroke styles and colours.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use geometry::frame::Frame;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::Error;
use crate::picture::{Picture, PictureRef};

/// An 8-bit RGBA colour.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel. `0` is fully transparent.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Creates an opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a colour with an explicit alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns `true` if the colour has zero alpha.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses `#rrggbb` or `#rrggbbaa`.
    ///
    /// ```
    /// # use tessera::style::Color;
    /// assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
    /// assert_eq!("#00000080".parse::<Color>().unwrap(), Color::rgba(0, 0, 0, 128));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel =
            |i: usize| u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(3)? } else { 255 };
        Ok(Color::rgba(channel(0)?, channel(1)?, channel(2)?, a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

/// The stroke parameters passed down to every [`Canvas`] call.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Line colour.
    pub stroke: Color,
    /// Line weight in device units.
    pub weight: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Color::BLACK,
            weight: 1.,
        }
    }
}

impl Style {
    /// Creates a new [`Style`].
    pub const fn new(stroke: Color, weight: f64) -> Self {
        Self { stroke, weight }
    }

    /// Returns a copy of this style with the given stroke colour.
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    /// Returns a copy of this style with the given weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// A picture drawn with a fixed [`Style`], ignoring the style it is rendered with.
#[derive(Debug)]
pub struct Styled {
    picture: PictureRef,
    style: Style,
}

impl Picture for Styled {
    fn render(&self, frame: &Frame, _style: &Style, canvas: &mut dyn Canvas) {
        self.picture.render(frame, &self.style, canvas);
    }
}

/// Draws `picture` with `style` in place of the inherited style.
pub fn styled(picture: &PictureRef, style: Style) -> PictureRef {
    Arc::new(Styled {
        picture: picture.clone(),
        style,
    })
}
