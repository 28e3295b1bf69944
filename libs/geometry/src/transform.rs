//! Transformation types and traits.

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// A general 2-D affine transformation.
///
/// Maps a point `p` to `a * p + b`. Unlike a rigid transformation, the matrix may
/// scale, shear, or collapse geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    /// The transformation matrix represented in row-major order.
    pub(crate) a: [[f64; 2]; 2],
    /// The x-y translation applied after the transformation.
    pub(crate) b: [f64; 2],
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    /// Returns the identity transform, leaving any transformed object unmodified.
    pub fn identity() -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [0., 0.],
        }
    }

    /// Creates a transformation from a row-major matrix and a translation.
    pub fn from_parts(a: [[f64; 2]; 2], b: [f64; 2]) -> Self {
        Self { a, b }
    }

    /// Returns a translation by `(x,y)`.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [x, y],
        }
    }

    /// Returns an axis-aligned scaling by `sx` horizontally and `sy` vertically.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: [[sx, 0.], [0., sy]],
            b: [0., 0.],
        }
    }

    /// Returns a counterclockwise rotation by `angle` degrees.
    pub fn rotate(angle: f64) -> Self {
        let sin = angle.to_radians().sin();
        let cos = angle.to_radians().cos();
        Self {
            a: [[cos, -sin], [sin, cos]],
            b: [0., 0.],
        }
    }

    /// Returns a reflection about the x-axis.
    pub fn reflect_vert() -> Self {
        Self {
            a: [[1., 0.], [0., -1.]],
            b: [0., 0.],
        }
    }

    /// Create a new [`Transformation`] that is the cascade of `parent` and `child`.
    ///
    /// The child is applied first, then the parent.
    ///
    /// Note this operation *is not* commutative.
    /// For example the set of transformations:
    /// * (a) Reflect vertically, then
    /// * (b) Translate by (1,1)
    /// * (c) Place a point at (local coordinate) (1,1)
    ///
    /// Lands said point at (2,-2) in top-level space,
    /// whereas reversing the order of (a) and (b) lands it at (2,0).
    pub fn cascade(parent: Transformation, child: Transformation) -> Transformation {
        // The result-transform's origin is the parent's origin,
        // plus the parent-transformed child's origin
        let mut b = matvec(&parent.a, &child.b);
        b[0] += parent.b[0];
        b[1] += parent.b[1];
        // And the cascade-matrix is the product of the parent's and child's
        let a = matmul(&parent.a, &child.a);
        Self { a, b }
    }

    /// Applies this transformation to `p`.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        let [x, y] = matvec(&self.a, &[p.x, p.y]);
        Point::new(x + self.b[0], y + self.b[1])
    }

    /// The row-major matrix of this transformation.
    pub fn matrix(&self) -> [[f64; 2]; 2] {
        self.a
    }

    /// The point representing the translation of this transformation.
    pub fn offset_point(&self) -> Point {
        Point::new(self.b[0], self.b[1])
    }

    /// The determinant of the matrix part of this transformation.
    ///
    /// Zero when the transformation collapses the plane onto a line or a point.
    pub fn determinant(&self) -> f64 {
        self.a[0][0] * self.a[1][1] - self.a[0][1] * self.a[1][0]
    }

    /// Returns the inverse [`Transformation`] of `self`, or [`None`] if `self` is singular.
    ///
    /// # Examples
    ///
    /// ```
    /// use geometry::transform::Transformation;
    /// use approx::assert_relative_eq;
    ///
    /// let trans = Transformation::cascade(
    ///     Transformation::rotate(90.),
    ///     Transformation::translate(5., 10.),
    /// );
    /// let inv = trans.inv().unwrap();
    ///
    /// assert_relative_eq!(
    ///     Transformation::cascade(inv, trans),
    ///     Transformation::identity(),
    ///     epsilon = 1e-12
    /// );
    /// ```
    pub fn inv(&self) -> Option<Transformation> {
        let det = self.determinant();
        if det == 0. || !det.is_finite() {
            return None;
        }
        let a = [
            [self.a[1][1] / det, -self.a[0][1] / det],
            [-self.a[1][0] / det, self.a[0][0] / det],
        ];
        let b = matvec(&a, &self.b);
        Some(Self { a, b: [-b[0], -b[1]] })
    }
}

impl AbsDiffEq for Transformation {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.a
            .iter()
            .flatten()
            .chain(self.b.iter())
            .zip(other.a.iter().flatten().chain(other.b.iter()))
            .all(|(l, r)| l.abs_diff_eq(r, epsilon))
    }
}

impl RelativeEq for Transformation {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.a
            .iter()
            .flatten()
            .chain(self.b.iter())
            .zip(other.a.iter().flatten().chain(other.b.iter()))
            .all(|(l, r)| l.relative_eq(r, epsilon, max_relative))
    }
}

/// Multiples two 2x2 matrices, returning a new 2x2 matrix
fn matmul(a: &[[f64; 2]; 2], b: &[[f64; 2]; 2]) -> [[f64; 2]; 2] {
    [
        [
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
        ],
        [
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        ],
    ]
}
/// Multiplies a 2x2 matrix by a 2-entry vector, returning a new 2-entry vector.
fn matvec(a: &[[f64; 2]; 2], b: &[f64; 2]) -> [f64; 2] {
    [
        a[0][0] * b[0] + a[0][1] * b[1],
        a[1][0] * b[0] + a[1][1] * b[1],
    ]
}

/// A trait for specifying how an object is changed by a transformation.
pub trait Transform {
    /// Applies matrix-vector [`Transformation`] `trans`.
    fn transform(&mut self, trans: Transformation) -> &mut Self;
}

macro_rules! transform_tuple_impls {
    ( $( ( $name:ident, $idx:tt ) )+ ) => {
        impl<$($name: Transform),+> Transform for ($($name,)+)
        {
            fn transform(&mut self, trans: Transformation) -> &mut Self {
                $(self.$idx.transform(trans);)+
                self
            }
        }
    };
}

transform_tuple_impls! { (A, 0) }
transform_tuple_impls! { (A, 0) (B, 1) }
transform_tuple_impls! { (A, 0) (B, 1) (C, 2) }
transform_tuple_impls! { (A, 0) (B, 1) (C, 2) (D, 3) }

impl<T: Transform> Transform for Vec<T> {
    fn transform(&mut self, trans: Transformation) -> &mut Self {
        for i in self.iter_mut() {
            i.transform(trans);
        }
        self
    }
}

/// A trait for specifying how an object is changed by a transformation.
///
/// Takes in an owned copy of the shape and returns the transformed version.
pub trait TransformOwned: Transform + Sized {
    /// Applies matrix-vector [`Transformation`] `trans`.
    ///
    /// Creates a new shape at a location equal to the transformation of our own.
    fn transform_owned(mut self, trans: Transformation) -> Self {
        self.transform(trans);
        self
    }
}

impl<T: Transform + Sized> TransformOwned for T {}
