//! Rectangular bounding boxes and associated trait implementations.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use super::path::{PathSpec, Polyline};
use super::{Circle, Point, Rect, RoundRect};

/// An axis-aligned rectangular bounding box.
///
/// Points `p0` and `p1` represent opposite corners of a bounding rectangle.
/// `p0` is always closest to negative-infinity, in both x and y,
/// and `p1` is always closest to positive-infinity.
///
/// This differs from [`Rect`] in that it could be empty, meaning that `p0`
/// is to the lower right of `p1`.
#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq)]
pub struct Bbox {
    pub p0: Point,
    pub p1: Point,
}

impl Bbox {
    /// Create a new [`Bbox`] from two [`Point`]s.
    #[inline]
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }
    /// Finds the width of the bounding box in the x-direction.
    #[inline]
    pub fn width(&self) -> f64 {
        self.p1.x - self.p0.x
    }
    /// Finds the height of the bounding box in the y-direction.
    #[inline]
    pub fn height(&self) -> f64 {
        self.p1.y - self.p0.y
    }
    /// Creates a new [`Bbox`] from a single [`Point`].
    ///
    /// The resultant [`Bbox`] comprises solely of the point, having zero area.
    pub fn from_point(pt: Point) -> Self {
        Self { p0: pt, p1: pt }
    }
    /// Creates an empty, otherwise invalid bounding box.
    pub fn empty() -> Self {
        Self {
            p0: Point::new(f64::INFINITY, f64::INFINITY),
            p1: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }
    /// Returns `true` if the bounding box is empty.
    pub fn is_empty(&self) -> bool {
        self.p0.x > self.p1.x || self.p0.y > self.p1.y
    }
    /// Returns true if [`Point`] `pt` lies inside the bounding box.
    pub fn contains(&self, pt: Point) -> bool {
        self.p0.x <= pt.x && self.p1.x >= pt.x && self.p0.y <= pt.y && self.p1.y >= pt.y
    }
    /// Returns the bounding box as a [`Rect`], or [`None`] if it is empty.
    pub fn into_rect(self) -> Option<Rect> {
        if self.is_empty() {
            None
        } else {
            Some(Rect {
                p0: self.p0,
                p1: self.p1,
            })
        }
    }
}

impl Default for Bbox {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Rect> for Bbox {
    fn from(r: Rect) -> Self {
        Self { p0: r.p0, p1: r.p1 }
    }
}

/// A trait representing functions available for objects with a bounding box.
#[enum_dispatch]
pub trait BoundBox {
    /// Compute a rectangular bounding box around the implementing type.
    fn bbox(&self) -> Bbox;
    /// Computes the union with rectangular bounding box `bbox`.
    ///
    /// Creates and returns a new [Bbox].
    /// Default implementation is to return the union of `self.bbox()` and `bbox`.
    fn union(&self, bbox: Bbox) -> Bbox {
        self.bbox().union(bbox)
    }
}

impl<T> BoundBox for &T
where
    T: BoundBox,
{
    fn bbox(&self) -> Bbox {
        T::bbox(*self)
    }
}

impl BoundBox for Bbox {
    fn bbox(&self) -> Bbox {
        *self
    }
    fn union(&self, bbox: Bbox) -> Bbox {
        if bbox.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return bbox;
        }
        Bbox::new(
            Point::new(self.p0.x.min(bbox.p0.x), self.p0.y.min(bbox.p0.y)),
            Point::new(self.p1.x.max(bbox.p1.x), self.p1.y.max(bbox.p1.y)),
        )
    }
}

impl BoundBox for Point {
    fn bbox(&self) -> Bbox {
        Bbox::from_point(*self)
    }
}

impl BoundBox for Rect {
    fn bbox(&self) -> Bbox {
        Bbox::from(*self)
    }
}

impl BoundBox for RoundRect {
    fn bbox(&self) -> Bbox {
        Bbox::from(self.rect)
    }
}

impl BoundBox for Circle {
    fn bbox(&self) -> Bbox {
        Bbox::new(
            Point::new(self.center.x - self.r, self.center.y - self.r),
            Point::new(self.center.x + self.r, self.center.y + self.r),
        )
    }
}

/// Curves are bounded by their control polygon, which always encloses the curve itself.
impl BoundBox for PathSpec {
    fn bbox(&self) -> Bbox {
        self.points().fold(Bbox::empty(), |acc, pt| acc.union(pt.bbox()))
    }
}

impl BoundBox for Polyline {
    fn bbox(&self) -> Bbox {
        self.points.bbox()
    }
}

impl BoundBox for Vec<Point> {
    fn bbox(&self) -> Bbox {
        let mut bbox = Bbox::empty();
        for pt in self {
            bbox = bbox.union(pt.bbox());
        }
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_union_is_identity() {
        let b = Bbox::new(Point::new(1., 2.), Point::new(3., 4.));
        assert_eq!(Bbox::empty().union(b), b);
        assert_eq!(b.union(Bbox::empty()), b);
        assert!(Bbox::empty().into_rect().is_none());
    }

    #[test]
    fn points_bbox() {
        let pts = vec![Point::new(5., -1.), Point::new(-2., 8.), Point::new(0., 0.)];
        let b = pts.bbox();
        assert_eq!(b.p0, Point::new(-2., -1.));
        assert_eq!(b.p1, Point::new(5., 8.));
    }
}
