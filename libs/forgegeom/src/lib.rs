//! Core geometric types and their operations/attributes.
//!
//! All coordinates live in design space: `x` grows to the right and `y` grows
//! downward, matching the SVG coordinate system the diagrams are drawn in.

use std::fmt::Display;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use transform::{Transform, Transformation, Translate};

use self::bbox::{Bbox, BoundBox};
use self::path::{PathSpec, Polyline};

pub mod bbox;
pub mod path;
pub mod transform;

/// Formats a coordinate the way it appears in SVG attribute values.
///
/// Integral values print without a fractional part and negative zero prints as `0`.
pub fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    format!("{value}")
}

/// A point in two-dimensional design-space.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new [`Point`] from (x,y) coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the origin, (0, 0).
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0., y: 0. }
    }

    /// Creates a new [`Point`] shifted by `p.x` in the x-dimension and by `p.y` in the y-dimension.
    #[inline]
    pub fn translated(&self, p: Point) -> Self {
        let mut pt = *self;
        pt.translate(p);
        pt
    }

    /// Creates a new point with both coordinates multiplied by `factor`.
    #[inline]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Returns the point midway between `self` and `other`.
    pub fn midpoint(&self, other: Point) -> Self {
        Self::new(
            self.x + (other.x - self.x) * 0.5,
            self.y + (other.y - self.y) * 0.5,
        )
    }

    /// Rounds both coordinates to the nearest integer, with halves rounding toward
    /// positive infinity.
    pub fn round(&self) -> Self {
        Self::new((self.x + 0.5).floor(), (self.y + 0.5).floor())
    }
}

impl Display for Point {
    /// Displays the point as `x,y`, the pair syntax used by SVG paths and polylines.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", fmt_num(self.x), fmt_num(self.y))
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Self;
    fn add(self, rhs: Point) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Add<Dims> for Point {
    type Output = Self;
    fn add(self, rhs: Dims) -> Self::Output {
        Self::new(self.x + rhs.w, self.y + rhs.h)
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

impl From<(f64, f64)> for Point {
    fn from(value: (f64, f64)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

/// An enumeration of the sides of a axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bot,
    Left,
}

impl Side {
    /// Returns the opposite side.
    pub fn other(&self) -> Self {
        match self {
            Side::Top => Side::Bot,
            Side::Right => Side::Left,
            Side::Bot => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

impl std::ops::Not for Side {
    type Output = Self;
    /// Exclamation Operator returns the opposite side
    fn not(self) -> Self::Output {
        self.other()
    }
}

/// A width and height.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Dims {
    w: f64,
    h: f64,
}

impl Dims {
    /// Creates a new [`Dims`] from a width and height.
    #[inline]
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    /// Creates a new [`Dims`] with equal width and height.
    #[inline]
    pub const fn square(value: f64) -> Self {
        Self { w: value, h: value }
    }

    /// The width.
    #[inline]
    pub fn w(&self) -> f64 {
        self.w
    }

    /// The height.
    #[inline]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Returns a rectangle with corners `(0, 0)` and `(w, h)`.
    #[inline]
    pub fn into_rect(self) -> Rect {
        Rect::with_dims(self)
    }
}

impl std::ops::Mul<f64> for Dims {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            w: self.w * rhs,
            h: self.h * rhs,
        }
    }
}

/// An axis-aligned rectangle, specified by its minimum and maximum corners.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Rect {
    /// The upper-left corner (minimum x and y).
    pub p0: Point,
    /// The lower-right corner (maximum x and y).
    pub p1: Point,
}

impl Rect {
    /// Creates a new rectangle, normalizing the corners.
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    /// Creates a rectangle with points `(0, 0), (dims.w(), dims.h())`.
    pub fn with_dims(dims: Dims) -> Self {
        Self::new(Point::zero(), Point::new(dims.w(), dims.h()))
    }

    /// Creates a rectangle whose upper-left corner is `origin`.
    pub fn from_origin_dims(origin: Point, dims: Dims) -> Self {
        Self::new(origin, origin + dims)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.p0.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.p1.x
    }

    /// Returns the top y-coordinate, the smaller of the two since y grows downward.
    #[inline]
    pub fn top(&self) -> f64 {
        self.p0.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.p1.y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.p1.x - self.p0.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.p1.y - self.p0.y
    }

    pub fn dims(&self) -> Dims {
        Dims::new(self.width(), self.height())
    }

    /// Returns the center point of the rectangle.
    pub fn center(&self) -> Point {
        self.p0.midpoint(self.p1)
    }

    /// Returns the midpoint of the given side.
    pub fn side_center(&self, side: Side) -> Point {
        let c = self.center();
        match side {
            Side::Top => Point::new(c.x, self.top()),
            Side::Bot => Point::new(c.x, self.bottom()),
            Side::Left => Point::new(self.left(), c.y),
            Side::Right => Point::new(self.right(), c.y),
        }
    }

    /// Returns `true` if `pt` lies inside the rectangle or on its boundary.
    pub fn contains(&self, pt: Point) -> bool {
        self.p0.x <= pt.x && pt.x <= self.p1.x && self.p0.y <= pt.y && pt.y <= self.p1.y
    }

    /// Returns `true` if `other` lies entirely within this rectangle.
    pub fn encloses(&self, other: Rect) -> bool {
        self.contains(other.p0) && self.contains(other.p1)
    }
}

/// A rectangle with rounded corners.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundRect {
    pub rect: Rect,
    /// The corner radius.
    pub rx: f64,
}

impl RoundRect {
    pub fn new(rect: Rect, rx: f64) -> Self {
        Self { rect, rx }
    }
}

/// A circle.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub r: f64,
}

impl Circle {
    pub fn new(center: Point, r: f64) -> Self {
        Self { center, r }
    }
}

/// The primary geometric primitive comprising a rendered scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[enum_dispatch(BoundBox, Translate)]
pub enum Shape {
    Rect(Rect),
    RoundRect(RoundRect),
    Circle(Circle),
    Path(PathSpec),
    Polyline(Polyline),
}

impl Transform for Shape {
    fn transform(&self, trans: Transformation) -> Self {
        match self {
            Self::Rect(s) => Self::Rect(s.transform(trans)),
            Self::RoundRect(s) => Self::RoundRect(s.transform(trans)),
            Self::Circle(s) => Self::Circle(s.transform(trans)),
            Self::Path(s) => Self::Path(s.transform(trans)),
            Self::Polyline(s) => Self::Polyline(s.transform(trans)),
        }
    }
}

impl Shape {
    pub fn as_path(&self) -> Option<&PathSpec> {
        if let Shape::Path(path) = self {
            Some(path)
        } else {
            None
        }
    }

    pub fn as_round_rect(&self) -> Option<RoundRect> {
        if let Shape::RoundRect(rect) = self {
            Some(*rect)
        } else {
            None
        }
    }
}

#[cfg(test)]
pub mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    #[test]
    fn rect_normalizes_corners() {
        let r = Rect::new(Point::new(60., 60.), Point::new(0., 0.));
        assert_eq!(r.p0, Point::zero());
        assert_eq!(r.p1, Point::new(60., 60.));
        assert_float_eq!(r.width(), 60., abs <= 1e-12);
    }

    #[test]
    fn rect_side_centers() {
        let r = Rect::from_origin_dims(Point::new(100., 200.), Dims::square(60.));
        assert_eq!(r.side_center(Side::Right), Point::new(160., 230.));
        assert_eq!(r.side_center(Side::Left), Point::new(100., 230.));
        assert_eq!(r.side_center(Side::Top), Point::new(130., 200.));
        assert_eq!(r.side_center(Side::Bot), Point::new(130., 260.));
    }

    #[test]
    fn point_display_matches_svg_syntax() {
        assert_eq!(Point::new(30., 0.).to_string(), "30,0");
        assert_eq!(Point::new(7.5, -0.).to_string(), "7.5,0");
        assert_eq!(Point::new(-12.25, 4.).to_string(), "-12.25,4");
    }

    #[test]
    fn shape_bbox_dispatch() {
        let shape = Shape::Circle(Circle::new(Point::new(64., 30.), 4.));
        let bbox = shape.bbox();
        assert_eq!(bbox.p0, Point::new(60., 26.));
        assert_eq!(bbox.p1, Point::new(68., 34.));
    }
}
