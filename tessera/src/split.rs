//! Recursive splits and the square-limit tiling.
//!
//! All functions here take a signed depth and reject negative values with
//! [`Error::InvalidDepth`](crate::error::Error::InvalidDepth) before building
//! anything. Results are rebuilt from scratch on every call; see
//! [`PictureCache`](crate::cache::PictureCache) for a memoizing alternative.

use crate::combinators::{below, beside, square_of_four};
use crate::error::{check_depth, Result};
use crate::picture::{flip_horiz, flip_vert, identity, rotate180, PictureRef};

/// Creates a recursive split from a pair of two-picture combinators.
///
/// The returned function maps `(p, 0)` to `p`, and `(p, n)` to
/// `outer(p, inner(smaller, smaller))` where `smaller` is the result for
/// `(p, n - 1)`.
pub fn split<O, I>(outer: O, inner: I) -> impl Fn(&PictureRef, i32) -> Result<PictureRef>
where
    O: Fn(&PictureRef, &PictureRef) -> PictureRef,
    I: Fn(&PictureRef, &PictureRef) -> PictureRef,
{
    move |p: &PictureRef, n: i32| -> Result<PictureRef> {
        let n = check_depth(n)?;
        Ok(split_rec(&outer, &inner, p, n))
    }
}

fn split_rec<O, I>(outer: &O, inner: &I, p: &PictureRef, n: u32) -> PictureRef
where
    O: Fn(&PictureRef, &PictureRef) -> PictureRef,
    I: Fn(&PictureRef, &PictureRef) -> PictureRef,
{
    if n == 0 {
        return p.clone();
    }
    let smaller = split_rec(outer, inner, p, n - 1);
    outer(p, &inner(&smaller, &smaller))
}

/// Repeatedly splits the right half of the frame into two smaller copies.
pub fn right_split(p: &PictureRef, n: i32) -> Result<PictureRef> {
    tracing::debug!(depth = n, "building right split");
    split(beside, below)(p, n)
}

/// Repeatedly splits the far half of the frame into two smaller copies.
pub fn up_split(p: &PictureRef, n: i32) -> Result<PictureRef> {
    tracing::debug!(depth = n, "building up split");
    split(below, beside)(p, n)
}

/// Recursively fills the frame towards its `(1, 1)` corner.
///
/// ```
/// # use tessera::split::corner_split;
/// # use tessera::shapes::wave;
/// assert!(corner_split(&wave(), 3).is_ok());
/// assert!(corner_split(&wave(), -1).is_err());
/// ```
pub fn corner_split(p: &PictureRef, n: i32) -> Result<PictureRef> {
    let n = check_depth(n)?;
    tracing::debug!(depth = n, "building corner split");
    Ok(corner_split_rec(p, n))
}

fn corner_split_rec(p: &PictureRef, n: u32) -> PictureRef {
    if n == 0 {
        return p.clone();
    }
    let up = split_rec(&below, &beside, p, n - 1);
    let right = split_rec(&beside, &below, p, n - 1);
    let top_left = beside(&up, &up);
    let bottom_right = below(&right, &right);
    let corner = corner_split_rec(p, n - 1);
    beside(&below(p, &top_left), &below(&bottom_right, &corner))
}

/// Four mirrored corner splits meeting in the middle of the frame.
pub fn square_limit(p: &PictureRef, n: i32) -> Result<PictureRef> {
    let corner = corner_split(p, n)?;
    tracing::debug!(depth = n, "building square limit");
    Ok(square_limit_of(&corner))
}

/// Arranges four mirrored copies of a corner split.
pub(crate) fn square_limit_of(corner: &PictureRef) -> PictureRef {
    square_of_four(rotate180, flip_vert, flip_horiz, identity)(corner)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use geometry::prelude::*;
    use test_log::test;

    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::combinators::over;
    use crate::error::Error;
    use crate::picture::{draw, polyline};

    fn lines(picture: &PictureRef) -> Vec<(Point, Point)> {
        let mut canvas = RecordingCanvas::new();
        draw(picture, &Frame::from_size(64., 64.), &mut canvas);
        canvas.lines().collect()
    }

    fn tick() -> PictureRef {
        polyline(&[Point::new(0., 0.), Point::new(1., 0.)])
    }

    #[test]
    fn depth_zero_is_the_picture_itself() {
        let p = tick();
        assert!(Arc::ptr_eq(&right_split(&p, 0).unwrap(), &p));
        assert!(Arc::ptr_eq(&up_split(&p, 0).unwrap(), &p));
        assert!(Arc::ptr_eq(&corner_split(&p, 0).unwrap(), &p));
        assert!(Arc::ptr_eq(&split(over, over)(&p, 0).unwrap(), &p));
    }

    #[test]
    fn negative_depths_are_rejected() {
        let p = tick();
        for result in [
            right_split(&p, -1),
            up_split(&p, -2),
            corner_split(&p, -1),
            square_limit(&p, -3),
        ] {
            assert!(matches!(result, Err(Error::InvalidDepth(n)) if n < 0));
        }
    }

    #[test]
    fn split_counts() {
        // Each level doubles the copies of the previous level and adds one.
        let p = tick();
        for (n, copies) in [(1, 3), (2, 7), (3, 15)] {
            assert_eq!(lines(&right_split(&p, n).unwrap()).len(), copies);
            assert_eq!(lines(&up_split(&p, n).unwrap()).len(), copies);
        }
    }

    #[test]
    fn right_split_once() {
        let p = polyline(&[Point::new(0., 0.), Point::new(1., 1.)]);
        let expected = vec![
            (Point::new(0., 0.), Point::new(32., 64.)),
            (Point::new(32., 0.), Point::new(64., 32.)),
            (Point::new(32., 32.), Point::new(64., 64.)),
        ];
        assert_eq!(lines(&right_split(&p, 1).unwrap()), expected);
    }

    #[test]
    fn corner_split_counts() {
        // c(n) = 1 + 2 * s(n - 1) * 2 + c(n - 1), with s(k) = 2^(k + 1) - 1.
        let p = tick();
        let counts = (0..4)
            .map(|n| lines(&corner_split(&p, n).unwrap()).len())
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![1, 6, 19, 48]);
    }

    #[test]
    fn square_limit_uses_four_corner_splits() {
        let p = tick();
        for n in 0..3 {
            let corner = lines(&corner_split(&p, n).unwrap()).len();
            assert_eq!(lines(&square_limit(&p, n).unwrap()).len(), 4 * corner);
        }
    }
}
