//! Built-in line pictures in unit-square coordinates.

use geometry::point::Point;

use crate::picture::{path, segments, PictureRef};

fn polylines(lines: &[&[(f64, f64)]]) -> PictureRef {
    segments(lines.iter().flat_map(|line| {
        let points = line.iter().copied().map(Point::from).collect::<Vec<_>>();
        path(&points)
    }))
}

/// The border of the unit square.
pub fn outline() -> PictureRef {
    polylines(&[&[(0., 0.), (1., 0.), (1., 1.), (0., 1.), (0., 0.)]])
}

/// The two diagonals of the unit square.
pub fn diagonals() -> PictureRef {
    polylines(&[&[(0., 0.), (1., 1.)], &[(1., 0.), (0., 1.)]])
}

/// The diamond joining the midpoints of the unit square's edges.
pub fn diamond() -> PictureRef {
    polylines(&[&[(0.5, 0.), (1., 0.5), (0.5, 1.), (0., 0.5), (0.5, 0.)]])
}

/// The stick figure traditionally used to demonstrate square limits.
pub fn wave() -> PictureRef {
    polylines(&[
        &[
            (0., 0.84),
            (0.15, 0.6),
            (0.3, 0.65),
            (0.4, 0.65),
            (0.35, 0.84),
            (0.4, 1.),
        ],
        &[(0.6, 1.), (0.65, 0.84), (0.6, 0.65), (0.75, 0.65), (1., 0.35)],
        &[(1., 0.15), (0.6, 0.45), (0.75, 0.)],
        &[(0.6, 0.), (0.5, 0.3), (0.4, 0.)],
        &[(0.25, 0.), (0.35, 0.5), (0.3, 0.6), (0.15, 0.4), (0., 0.65)],
    ])
}

/// A one-barbed arrow along the `e1` axis.
///
/// No flip or rotation maps it onto itself, which makes it handy for
/// checking orientation.
pub fn arrow() -> PictureRef {
    polylines(&[&[(0.1, 0.25), (0.9, 0.25), (0.7, 0.45)]])
}
