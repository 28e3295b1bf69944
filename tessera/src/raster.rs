//! An in-memory RGBA pixel buffer.

use geometry::frame::Frame;
use geometry::point::Point;
use geometry::transform::Transformation;
use image::{Rgba, RgbaImage};

use crate::canvas::{Bitmap, Canvas};
use crate::style::{Color, Style};

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(Rgba([r, g, b, a]): Rgba<u8>) -> Self {
        Color::rgba(r, g, b, a)
    }
}

impl Bitmap for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let (w, h) = self.dimensions();
        (x < w && y < h).then(|| (*self.get_pixel(x, y)).into())
    }
}

/// An RGBA raster that pictures can be drawn onto.
///
/// A [`RasterImage`] is both a [`Bitmap`], so it can be painted with
/// [`image`](crate::picture::image), and a [`Canvas`], so pictures can be
/// rendered into it. Drawing composites with the source-over rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    buf: RgbaImage,
}

impl RasterImage {
    /// Creates a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buf: RgbaImage::new(width, height),
        }
    }

    /// Creates an image with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            buf: RgbaImage::from_pixel(width, height, color.into()),
        }
    }

    /// Wraps existing row-major pixel data.
    ///
    /// Returns [`None`] if `pixels` does not hold exactly `width * height` entries.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        let raw = pixels
            .into_iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect::<Vec<_>>();
        RgbaImage::from_raw(width, height, raw).map(|buf| Self { buf })
    }

    /// The underlying [`RgbaImage`].
    pub fn as_image(&self) -> &RgbaImage {
        &self.buf
    }

    /// Consumes the raster, returning the underlying [`RgbaImage`].
    pub fn into_image(self) -> RgbaImage {
        self.buf
    }

    /// Every pixel, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
        self.buf.pixels().map(|p| Color::from(*p))
    }

    /// The pixel at (`x`, `y`).
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.contains(x, y).then(|| (*self.buf.get_pixel(x, y)).into())
    }

    /// Overwrites the pixel at (`x`, `y`). Out-of-range writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if self.contains(x, y) {
            self.buf.put_pixel(x, y, color.into());
        }
    }

    /// The number of pixels that are not fully transparent.
    pub fn painted(&self) -> usize {
        self.buf.pixels().filter(|p| p.0[3] != 0).count()
    }

    fn contains(&self, x: u32, y: u32) -> bool {
        x < self.buf.width() && y < self.buf.height()
    }

    /// Composites `color` over the pixel at (`x`, `y`).
    fn blend_pixel(&mut self, x: u32, y: u32, color: Color) {
        if !self.contains(x, y) {
            return;
        }
        let dst = Color::from(*self.buf.get_pixel(x, y));
        self.buf.put_pixel(x, y, blend(color, dst).into());
    }
}

impl From<RgbaImage> for RasterImage {
    fn from(buf: RgbaImage) -> Self {
        Self { buf }
    }
}

/// Source-over compositing of `src` onto `dst`.
fn blend(src: Color, dst: Color) -> Color {
    match src.a {
        255 => src,
        0 => dst,
        _ => {
            let sa = src.a as u32;
            let da = dst.a as u32 * (255 - sa) / 255;
            let a = sa + da;
            let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da) / a) as u8;
            Color::rgba(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b), a as u8)
        }
    }
}

/// Clips the segment `from`-`to` to the rectangle `[0, width] x [0, height]`.
///
/// Liang-Barsky: each edge bounds the segment parameter `t` from one side.
fn clip(from: Point, to: Point, width: f64, height: f64) -> Option<(Point, Point)> {
    let d = to - from;
    let (mut t0, mut t1) = (0f64, 1f64);
    for (p, q) in [
        (-d.x, from.x),
        (d.x, width - from.x),
        (-d.y, from.y),
        (d.y, height - from.y),
    ] {
        if p == 0. {
            if q < 0. {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0. {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((from + d * t0, from + d * t1))
}

impl Bitmap for RasterImage {
    fn width(&self) -> u32 {
        self.buf.width()
    }

    fn height(&self) -> u32 {
        self.buf.height()
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.get(x, y)
    }
}

impl Canvas for RasterImage {
    /// Clips the line to the buffer, then walks it in unit steps along its
    /// major axis. Each pixel is painted at most once per line.
    ///
    /// The stroke weight is not rasterized.
    fn draw_line(&mut self, from: Point, to: Point, style: &Style) {
        if ![from.x, from.y, to.x, to.y].iter().all(|c| c.is_finite()) {
            tracing::warn!(?from, ?to, "skipping line with non-finite endpoints");
            return;
        }
        let (w, h) = (self.buf.width() as f64, self.buf.height() as f64);
        let Some((from, to)) = clip(from, to, w, h) else {
            return;
        };
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.);
        let mut last = None;
        for i in 0..=steps as u64 {
            let p = from + delta * (i as f64 / steps);
            let (x, y) = (p.x.floor(), p.y.floor());
            if x < 0. || y < 0. || x >= w || y >= h {
                continue;
            }
            let cell = (x as u32, y as u32);
            if last != Some(cell) {
                self.blend_pixel(cell.0, cell.1, style.stroke);
                last = Some(cell);
            }
        }
    }

    /// Resamples `bitmap` with nearest-neighbour sampling.
    ///
    /// Every device pixel whose centre lies inside `frame` is mapped back into
    /// bitmap space through the inverse of `transformation`.
    fn draw_image(&mut self, bitmap: &dyn Bitmap, frame: &Frame, transformation: Transformation) {
        let Some(inverse) = transformation.inv() else {
            tracing::warn!(?frame, "skipping image drawn into a degenerate frame");
            return;
        };
        let (w, h) = (bitmap.width(), bitmap.height());
        if w == 0 || h == 0 {
            return;
        }

        let corners = frame.corners();
        let (mut min, mut max) = (corners[0], corners[0]);
        for c in &corners[1..] {
            min = Point::new(min.x.min(c.x), min.y.min(c.y));
            max = Point::new(max.x.max(c.x), max.y.max(c.y));
        }
        let x0 = min.x.floor().max(0.);
        let y0 = min.y.floor().max(0.);
        let x1 = max.x.ceil().min(self.buf.width() as f64);
        let y1 = max.y.ceil().min(self.buf.height() as f64);
        if !(x0 < x1 && y0 < y1) {
            return;
        }

        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                let src = inverse.apply(Point::new(x as f64 + 0.5, y as f64 + 0.5));
                if src.x < 0. || src.y < 0. || src.x >= w as f64 || src.y >= h as f64 {
                    continue;
                }
                if let Some(color) = bitmap.pixel(src.x as u32, src.y as u32) {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    fn red() -> Style {
        Style::default().with_stroke(RED)
    }

    #[test]
    fn horizontal_line_covers_each_pixel_once() {
        let mut img = RasterImage::new(8, 4);
        img.draw_line(Point::new(1.5, 2.5), Point::new(5.5, 2.5), &red());
        for x in 0..8 {
            let expected = if (1..=5).contains(&x) { RED } else { Color::TRANSPARENT };
            assert_eq!(img.get(x, 2), Some(expected), "pixel {x}");
        }
        assert_eq!(img.painted(), 5);
    }

    #[test]
    fn diagonal_line_is_connected() {
        let mut img = RasterImage::new(10, 10);
        img.draw_line(Point::new(0.5, 0.5), Point::new(9.5, 9.5), &red());
        for i in 0..10 {
            assert_eq!(img.get(i, i), Some(RED));
        }
        assert_eq!(img.painted(), 10);
    }

    #[test]
    fn lines_are_clipped() {
        let mut img = RasterImage::new(4, 4);
        img.draw_line(Point::new(-10., 1.5), Point::new(10., 1.5), &red());
        assert_eq!(img.painted(), 4);
        img.draw_line(Point::new(0., 0.), Point::new(f64::NAN, 1.), &red());
        assert_eq!(img.painted(), 4);
        img.draw_line(Point::new(-5., -5.), Point::new(-1., 10.), &red());
        assert_eq!(img.painted(), 4);
    }

    #[test]
    fn long_lines_fill_every_crossed_pixel() {
        let mut img = RasterImage::new(4, 4);
        img.draw_line(Point::new(-1000., 1.5), Point::new(1000., 1.5), &red());
        for x in 0..4 {
            assert_eq!(img.get(x, 1), Some(RED), "pixel {x}");
        }
        assert_eq!(img.painted(), 4);

        let mut img = RasterImage::new(100, 100);
        img.draw_line(Point::new(0., 0.5), Point::new(1000., 0.5), &red());
        for x in 0..100 {
            assert_eq!(img.get(x, 0), Some(RED), "pixel {x}");
        }
        assert_eq!(img.painted(), 100);

        let mut img = RasterImage::new(10, 10);
        img.draw_line(Point::new(-1e6 + 0.5, -1e6 + 0.5), Point::new(1e6 + 0.5, 1e6 + 0.5), &red());
        for i in 0..10 {
            assert_eq!(img.get(i, i), Some(RED), "pixel {i}");
        }
        assert_eq!(img.painted(), 10);
    }

    #[test]
    fn translucent_strokes_blend() {
        let mut img = RasterImage::filled(1, 1, Color::WHITE);
        let style = Style::default().with_stroke(Color::rgba(0, 0, 0, 0));
        img.draw_line(Point::new(0.5, 0.5), Point::new(0.5, 0.5), &style);
        assert_eq!(img.get(0, 0), Some(Color::WHITE));

        let style = Style::default().with_stroke(Color::rgba(0, 0, 0, 128));
        img.draw_line(Point::new(0.5, 0.5), Point::new(0.5, 0.5), &style);
        let c = img.get(0, 0).unwrap();
        assert_eq!(c.a, 255);
        assert!(c.r > 100 && c.r < 150, "{c:?}");

        // A short line inside one pixel still blends only once.
        let mut img = RasterImage::filled(1, 1, Color::WHITE);
        img.draw_line(Point::new(0.1, 0.2), Point::new(0.8, 0.9), &style);
        let c = img.get(0, 0).unwrap();
        assert!(c.r > 100 && c.r < 150, "{c:?}");
    }

    #[test]
    fn image_is_resampled_through_the_inverse_map() {
        // A 2x1 bitmap: red on the left, white on the right.
        let src = RasterImage::from_pixels(2, 1, vec![RED, Color::WHITE]).unwrap();
        let frame = Frame::from_size(4., 2.);
        let trans = Transformation::cascade(frame.transformation(), Transformation::scale(0.5, 1.));

        let mut img = RasterImage::new(6, 3);
        img.draw_image(&src, &frame, trans);

        for y in 0..2 {
            assert_eq!(img.get(0, y), Some(RED));
            assert_eq!(img.get(1, y), Some(RED));
            assert_eq!(img.get(2, y), Some(Color::WHITE));
            assert_eq!(img.get(3, y), Some(Color::WHITE));
            assert_eq!(img.get(4, y), Some(Color::TRANSPARENT));
        }
        assert_eq!(img.get(0, 2), Some(Color::TRANSPARENT));
        assert_eq!(img.painted(), 8);
    }

    #[test]
    fn rgba_images_are_bitmaps() {
        let mut buf = RgbaImage::new(3, 2);
        buf.put_pixel(2, 1, Rgba([1, 2, 3, 4]));
        assert_eq!(Bitmap::width(&buf), 3);
        assert_eq!(buf.pixel(2, 1), Some(Color::rgba(1, 2, 3, 4)));
        assert_eq!(buf.pixel(3, 0), None);

        let raster = RasterImage::from(buf.clone());
        assert_eq!(raster.get(2, 1), Some(Color::rgba(1, 2, 3, 4)));
        assert_eq!(raster.into_image(), buf);
    }

    #[test]
    fn singular_transforms_draw_nothing() {
        let src = RasterImage::filled(2, 2, RED);
        let frame = Frame::new(Point::zero(), Point::new(4., 4.), Point::new(2., 2.));
        let trans = Transformation::cascade(frame.transformation(), Transformation::scale(0.5, 0.5));

        let mut img = RasterImage::new(4, 4);
        img.draw_image(&src, &frame, trans);
        assert_eq!(img.painted(), 0);
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(RasterImage::from_pixels(2, 2, vec![RED; 3]).is_none());
        assert!(RasterImage::from_pixels(0, 5, Vec::new()).is_some());
    }
}
