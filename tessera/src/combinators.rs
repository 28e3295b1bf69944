//! Combinators that lay pictures out next to each other.
//!
//! Every combinator is built from [`transform`] and the rotations in
//! [`picture::transform`](crate::picture::transform). None of them draw
//! anything directly.

use std::sync::Arc;

use crate::picture::{rotate270, rotate90, transform, Group, PictureRef};

/// Draws `left` in the left half of the frame and `right` in the right half.
pub fn beside(left: &PictureRef, right: &PictureRef) -> PictureRef {
    Arc::new(Group::new(vec![
        transform(left, (0., 0.), (0.5, 0.), (0., 1.)),
        transform(right, (0.5, 0.), (1., 0.), (0.5, 1.)),
    ]))
}

/// Stacks `first` and `second` along the frame's `e2` axis.
///
/// `first` takes the half nearer the frame origin, which is the top half of a
/// y-down canvas. The layout is derived from [`beside`] by rotation so that it
/// composes with asymmetric pictures the same way [`beside`] does.
pub fn below(first: &PictureRef, second: &PictureRef) -> PictureRef {
    rotate90(&beside(&rotate270(first), &rotate270(second)))
}

/// Draws `top` over `bottom` in the same frame.
pub fn over(top: &PictureRef, bottom: &PictureRef) -> PictureRef {
    Arc::new(Group::new(vec![bottom.clone(), top.clone()]))
}

/// Arranges four pictures in a two by two grid, row by row.
pub fn quartet(
    top_left: &PictureRef,
    top_right: &PictureRef,
    bottom_left: &PictureRef,
    bottom_right: &PictureRef,
) -> PictureRef {
    below(
        &beside(top_left, top_right),
        &beside(bottom_left, bottom_right),
    )
}

/// Lifts four per-corner picture operations into one operation that arranges
/// their results as a [`quartet`].
///
/// # Example
///
/// ```
/// # use tessera::combinators::square_of_four;
/// # use tessera::picture::{flip_horiz, flip_vert, identity, rotate180};
/// # use tessera::shapes::arrow;
/// let mirrored = square_of_four(identity, flip_horiz, flip_vert, rotate180);
/// let tile = mirrored(&arrow());
/// ```
pub fn square_of_four<TL, TR, BL, BR>(
    tl: TL,
    tr: TR,
    bl: BL,
    br: BR,
) -> impl Fn(&PictureRef) -> PictureRef
where
    TL: Fn(&PictureRef) -> PictureRef,
    TR: Fn(&PictureRef) -> PictureRef,
    BL: Fn(&PictureRef) -> PictureRef,
    BR: Fn(&PictureRef) -> PictureRef,
{
    move |p: &PictureRef| quartet(&tl(p), &tr(p), &bl(p), &br(p))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geometry::prelude::*;

    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::picture::{draw, flip_horiz, flip_vert, identity, polyline, rotate180};

    fn diagonal() -> PictureRef {
        polyline(&[Point::new(0., 0.), Point::new(1., 1.)])
    }

    fn lines(picture: &PictureRef) -> Vec<(Point, Point)> {
        let mut canvas = RecordingCanvas::new();
        draw(picture, &Frame::from_size(10., 10.), &mut canvas);
        canvas.lines().collect()
    }

    fn assert_lines_eq(actual: &[(Point, Point)], expected: &[((f64, f64), (f64, f64))]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?}");
        for (&(a, b), &(ea, eb)) in actual.iter().zip(expected) {
            assert_relative_eq!(a, Point::from(ea), epsilon = 1e-9);
            assert_relative_eq!(b, Point::from(eb), epsilon = 1e-9);
        }
    }

    #[test]
    fn beside_splits_at_half_width() {
        let half = polyline(&[Point::new(0., 0.), Point::new(1., 0.5)]);
        assert_lines_eq(
            &lines(&beside(&diagonal(), &half)),
            &[((0., 0.), (5., 10.)), ((5., 0.), (10., 5.))],
        );
    }

    #[test]
    fn below_puts_first_nearer_the_origin() {
        assert_lines_eq(
            &lines(&below(&diagonal(), &diagonal())),
            &[((0., 0.), (10., 5.)), ((0., 5.), (10., 10.))],
        );
    }

    #[test]
    fn over_draws_bottom_first() {
        let top = polyline(&[Point::new(0., 0.), Point::new(1., 0.)]);
        assert_lines_eq(
            &lines(&over(&top, &diagonal())),
            &[((0., 0.), (10., 10.)), ((0., 0.), (10., 0.))],
        );
    }

    #[test]
    fn quartet_fills_quadrants_row_by_row() {
        let d = diagonal();
        assert_lines_eq(
            &lines(&quartet(&d, &d, &d, &d)),
            &[
                ((0., 0.), (5., 5.)),
                ((5., 0.), (10., 5.)),
                ((0., 5.), (5., 10.)),
                ((5., 5.), (10., 10.)),
            ],
        );
    }

    #[test]
    fn square_of_four_applies_each_corner_operation() {
        let d = diagonal();
        let tile = square_of_four(identity, flip_horiz, flip_vert, rotate180)(&d);
        assert_lines_eq(
            &lines(&tile),
            &[
                ((0., 0.), (5., 5.)),
                ((10., 0.), (5., 5.)),
                ((0., 10.), (5., 5.)),
                ((10., 10.), (5., 5.)),
            ],
        );
    }
}
