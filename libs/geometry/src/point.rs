//! 2-D points and vectors.

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};
use std::ops::{Mul, Neg};

use crate::transform::{Transform, Transformation};

/// A point (or displacement vector) in two-dimensional space.
///
/// Points are plain values: every operation returns a new point.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Point {
    /// The x-coordinate of the point.
    pub x: f64,
    /// The y-coordinate of the point.
    pub y: f64,
}

impl Point {
    /// Creates a new [`Point`] from (x,y) coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the origin, `(0, 0)`.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let origin = Point::zero();
    /// assert_eq!(origin, Point::new(0., 0.));
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0., y: 0. }
    }

    /// Scales both coordinates of this point by `s`.
    #[inline]
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    /// The 2-D cross product (z-component) of `self` and `other`.
    #[inline]
    pub fn cross(&self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// The dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The Euclidean length of this point treated as a vector.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.dot(*self).sqrt()
    }
}

impl Transform for Point {
    fn transform(&mut self, trans: Transformation) -> &mut Self {
        *self = trans.apply(*self);
        self
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Self;
    fn add(self, rhs: Point) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign<Point> for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub<Point> for Point {
    type Output = Self;
    fn sub(self, rhs: Point) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::SubAssign<Point> for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    /// Scales the point by a scalar.
    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from(value: (f64, f64)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

impl From<Point> for (f64, f64) {
    fn from(value: Point) -> Self {
        (value.x, value.y)
    }
}

impl AbsDiffEq for Point {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Point {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn scaling_distributes_over_addition() {
        let pairs = [
            (Point::new(1., 2.), Point::new(3., -4.), 2.5),
            (Point::new(-0.25, 7.), Point::new(0.5, 0.125), -3.),
            (Point::new(1e6, -1e-3), Point::new(-2e6, 4e-3), 0.1),
        ];
        for (a, b, s) in pairs {
            assert_relative_eq!((a + b).scale(s), a.scale(s) + b.scale(s), epsilon = 1e-9);
            assert_relative_eq!((a + b) * s, a * s + b * s, epsilon = 1e-9);
        }
    }

    #[test]
    fn subtraction_inverts_addition() {
        let a = Point::new(3.5, -2.);
        let b = Point::new(-1.25, 10.);
        assert_relative_eq!(a + (b - a), b, epsilon = 1e-12);
        assert_relative_eq!(b + (a - b), a, epsilon = 1e-12);
        assert_eq!(a - a, Point::zero());
        assert_eq!(-a + a, Point::zero());
    }

    #[test]
    fn cross_and_dot_products() {
        let e1 = Point::new(1., 0.);
        let e2 = Point::new(0., 1.);
        assert_eq!(e1.cross(e2), 1.);
        assert_eq!(e2.cross(e1), -1.);
        assert_eq!(e1.dot(e2), 0.);
        assert_eq!(Point::new(3., 4.).norm(), 5.);
    }
}
