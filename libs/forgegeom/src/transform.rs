//! Transformation types and traits.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use super::path::{PathCmd, PathSpec, Polyline};
use super::{Circle, Point, Rect, RoundRect};

/// A 2x2 matrix and two-entry translation vector,
/// used for relative movement and scaling of [Point]s and [Shape](super::Shape)s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    /// The transformation matrix represented in row-major order.
    pub a: [[f64; 2]; 2],
    /// The x-y translation applied after the transformation.
    pub b: [f64; 2],
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
    /// Returns a translation by `(x,y)`.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [x, y],
        }
    }
    /// Returns a uniform scaling by `factor` about the origin.
    pub fn scale(factor: f64) -> Self {
        Self {
            a: [[factor, 0.], [0., factor]],
            b: [0., 0.],
        }
    }

    /// Create a new [`Transformation`] that is the cascade of `parent` and `child`.
    ///
    /// The child is applied first. Note this operation *is not* commutative:
    /// translating by `(10, 0)` and then scaling by 2 lands the origin at `(20, 0)`,
    /// whereas scaling first lands it at `(10, 0)`.
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

    /// The translation component.
    pub fn offset_point(&self) -> Point {
        Point::new(self.b[0], self.b[1])
    }

    /// The horizontal scale factor.
    ///
    /// Only meaningful for transformations without rotation.
    pub fn scale_factor(&self) -> f64 {
        self.a[0][0]
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
    ///
    /// Creates a new shape at a location equal to the transformation of our own.
    fn transform(&self, trans: Transformation) -> Self;
}

impl Transform for Point {
    fn transform(&self, trans: Transformation) -> Self {
        let x = trans.a[0][0] * self.x + trans.a[0][1] * self.y + trans.b[0];
        let y = trans.a[1][0] * self.x + trans.a[1][1] * self.y + trans.b[1];
        Self { x, y }
    }
}

impl Transform for Rect {
    fn transform(&self, trans: Transformation) -> Self {
        Rect::new(self.p0.transform(trans), self.p1.transform(trans))
    }
}

impl Transform for RoundRect {
    fn transform(&self, trans: Transformation) -> Self {
        RoundRect {
            rect: self.rect.transform(trans),
            rx: self.rx * trans.scale_factor().abs(),
        }
    }
}

impl Transform for Circle {
    fn transform(&self, trans: Transformation) -> Self {
        Circle {
            center: self.center.transform(trans),
            r: self.r * trans.scale_factor().abs(),
        }
    }
}

impl Transform for PathCmd {
    fn transform(&self, trans: Transformation) -> Self {
        match *self {
            PathCmd::MoveTo(p) => PathCmd::MoveTo(p.transform(trans)),
            PathCmd::LineTo(p) => PathCmd::LineTo(p.transform(trans)),
            PathCmd::CubicTo { c1, c2, end } => PathCmd::CubicTo {
                c1: c1.transform(trans),
                c2: c2.transform(trans),
                end: end.transform(trans),
            },
            PathCmd::Close => PathCmd::Close,
        }
    }
}

impl Transform for PathSpec {
    fn transform(&self, trans: Transformation) -> Self {
        self.cmds().iter().map(|cmd| cmd.transform(trans)).collect()
    }
}

impl Transform for Polyline {
    fn transform(&self, trans: Transformation) -> Self {
        Polyline {
            points: self.points.iter().map(|p| p.transform(trans)).collect(),
        }
    }
}

/// A trait for specifying how a shape is translated by a [`Point`].
#[enum_dispatch]
pub trait Translate {
    /// Translates the shape by a [`Point`] through mutation.
    fn translate(&mut self, p: Point);
}

/// A trait for specifying how a shape is translated by a [`Point`].
pub trait TranslateOwned {
    /// Consumes and translates the shape by a [`Point`], returning the new shape.
    fn translate_owned(self, p: Point) -> Self
    where
        Self: Sized;
}

impl<T> TranslateOwned for T
where
    T: Translate,
{
    fn translate_owned(mut self, p: Point) -> Self {
        self.translate(p);
        self
    }
}

impl Translate for Point {
    fn translate(&mut self, p: Point) {
        self.x += p.x;
        self.y += p.y;
    }
}

impl Translate for Rect {
    fn translate(&mut self, p: Point) {
        self.p0.translate(p);
        self.p1.translate(p);
    }
}

impl Translate for RoundRect {
    fn translate(&mut self, p: Point) {
        self.rect.translate(p);
    }
}

impl Translate for Circle {
    fn translate(&mut self, p: Point) {
        self.center.translate(p);
    }
}

impl Translate for PathSpec {
    fn translate(&mut self, p: Point) {
        for cmd in self.cmds_mut() {
            match cmd {
                PathCmd::MoveTo(pt) | PathCmd::LineTo(pt) => pt.translate(p),
                PathCmd::CubicTo { c1, c2, end } => {
                    c1.translate(p);
                    c2.translate(p);
                    end.translate(p);
                }
                PathCmd::Close => (),
            }
        }
    }
}

impl Translate for Polyline {
    fn translate(&mut self, p: Point) {
        for pt in self.points.iter_mut() {
            pt.translate(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    #[test]
    fn test_matvec() {
        let a = [[1., 2.], [3., 4.]];
        let b = [5., 6.];
        assert_eq!(matvec(&a, &b), [17., 39.]);
    }

    #[test]
    fn test_matmul() {
        let a = [[1., 2.], [3., 4.]];
        let b = [[5., 6.], [7., 8.]];
        assert_eq!(matmul(&a, &b), [[19., 22.], [43., 50.]]);
    }

    #[test]
    fn cascade_identity() {
        let tf = Transformation::cascade(
            Transformation::translate(520., 130.),
            Transformation::scale(1.5),
        );
        let casc = Transformation::cascade(tf, Transformation::identity());
        assert_eq!(tf, casc);
    }

    #[test]
    fn translate_then_scale_order() {
        let p = Point::zero();
        let scale_last = Transformation::cascade(
            Transformation::scale(2.),
            Transformation::translate(10., 0.),
        );
        assert_eq!(p.transform(scale_last), Point::new(20., 0.));

        let translate_last = Transformation::cascade(
            Transformation::translate(10., 0.),
            Transformation::scale(2.),
        );
        assert_eq!(p.transform(translate_last), Point::new(10., 0.));
    }

    #[test]
    fn circle_radius_scales() {
        let c = Circle::new(Point::new(1., 1.), 4.).transform(Transformation::scale(2.));
        assert_eq!(c.center, Point::new(2., 2.));
        assert_eq!(c.r, 8.);
    }

    #[test]
    fn fractional_scale_cascade() {
        let tf = Transformation::cascade(
            Transformation::translate(50., -20.),
            Transformation::scale(0.3),
        );
        let p = Point::new(17.5, 3.25).transform(tf);
        assert_float_eq!(p.x, 55.25, abs <= 1e-9);
        assert_float_eq!(p.y, -19.025, abs <= 1e-9);
        assert_float_eq!(tf.scale_factor(), 0.3, abs <= 1e-12);
    }
}
