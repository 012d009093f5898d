//! Outline paths and polylines, rendered in SVG path-data syntax.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Point;

/// A single path-data command.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub enum PathCmd {
    /// Starts a new subpath at the given point.
    MoveTo(Point),
    /// A straight segment to the given point.
    LineTo(Point),
    /// A cubic Bézier segment.
    CubicTo { c1: Point, c2: Point, end: Point },
    /// Closes the current subpath.
    Close,
}

impl Display for PathCmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathCmd::MoveTo(p) => write!(f, "M {p}"),
            PathCmd::LineTo(p) => write!(f, "L {p}"),
            PathCmd::CubicTo { c1, c2, end } => write!(f, "C {c1} {c2} {end}"),
            PathCmd::Close => write!(f, "Z"),
        }
    }
}

/// An ordered sequence of [`PathCmd`]s describing one or more subpaths.
///
/// Displays as SVG path data, e.g. `M 0,0 L 30,0 C 60,0 60,60 30,60 L 0,60 Z`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathSpec {
    cmds: Vec<PathCmd>,
}

impl PathSpec {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.cmds.push(PathCmd::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.cmds.push(PathCmd::LineTo(Point::new(x, y)));
        self
    }

    pub fn cubic_to(mut self, c1: (f64, f64), c2: (f64, f64), end: (f64, f64)) -> Self {
        self.cmds.push(PathCmd::CubicTo {
            c1: c1.into(),
            c2: c2.into(),
            end: end.into(),
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.cmds.push(PathCmd::Close);
        self
    }

    #[inline]
    pub fn cmds(&self) -> &[PathCmd] {
        &self.cmds
    }

    #[inline]
    pub(crate) fn cmds_mut(&mut self) -> impl Iterator<Item = &mut PathCmd> {
        self.cmds.iter_mut()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// The number of subpaths, ie. the number of [`PathCmd::MoveTo`] commands.
    pub fn subpaths(&self) -> usize {
        self.cmds
            .iter()
            .filter(|cmd| matches!(cmd, PathCmd::MoveTo(_)))
            .count()
    }

    /// Returns `true` if the path is non-empty and every subpath starts with a move.
    ///
    /// A subpath begins with the first command and after every [`PathCmd::Close`].
    pub fn is_well_formed(&self) -> bool {
        matches!(self.cmds.first(), Some(PathCmd::MoveTo(_)))
            && self.cmds.windows(2).all(|w| {
                !matches!(w[0], PathCmd::Close) || matches!(w[1], PathCmd::MoveTo(_))
            })
    }

    /// Iterates over all anchor and control points, in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cmds.iter().flat_map(|cmd| {
            let pts: Vec<Point> = match *cmd {
                PathCmd::MoveTo(p) | PathCmd::LineTo(p) => vec![p],
                PathCmd::CubicTo { c1, c2, end } => vec![c1, c2, end],
                PathCmd::Close => Vec::new(),
            };
            pts
        })
    }
}

impl FromIterator<PathCmd> for PathSpec {
    fn from_iter<T: IntoIterator<Item = PathCmd>>(iter: T) -> Self {
        Self {
            cmds: iter.into_iter().collect(),
        }
    }
}

impl Display for PathSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, cmd) in self.cmds.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{cmd}")?;
        }
        Ok(())
    }
}

/// An open sequence of straight segments through `points`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

impl Display for Polyline {
    /// Displays the points in SVG `points` attribute syntax, eg. `0,20 30,20 30,0`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Translate;

    #[test]
    fn path_data_syntax() {
        let path = PathSpec::new()
            .move_to(0., 0.)
            .line_to(30., 0.)
            .cubic_to((60., 0.), (60., 60.), (30., 60.))
            .line_to(0., 60.)
            .close();
        assert_eq!(
            path.to_string(),
            "M 0,0 L 30,0 C 60,0 60,60 30,60 L 0,60 Z"
        );
        assert_eq!(path.subpaths(), 1);
        assert!(path.is_well_formed());
    }

    #[test]
    fn subpath_after_close_needs_move() {
        let open_after_close = PathSpec::new()
            .move_to(0., 0.)
            .line_to(10., 0.)
            .close()
            .line_to(5., 5.);
        assert!(!open_after_close.is_well_formed());

        let two_loops = PathSpec::new()
            .move_to(0., 0.)
            .line_to(10., 0.)
            .close()
            .move_to(20., 0.)
            .line_to(30., 0.)
            .close();
        assert!(two_loops.is_well_formed());
        assert_eq!(two_loops.subpaths(), 2);
        assert!(!PathSpec::new().is_well_formed());
    }

    #[test]
    fn translate_moves_control_points() {
        let mut path = PathSpec::new()
            .move_to(0., 0.)
            .cubic_to((1., 0.), (1., 1.), (2., 1.));
        path.translate(Point::new(10., 20.));
        assert_eq!(path.to_string(), "M 10,20 C 11,20 11,21 12,21");
    }

    #[test]
    fn polyline_points_syntax() {
        let line = Polyline {
            points: vec![Point::new(0., 20.), Point::new(30., 20.), Point::new(30., 0.)],
        };
        assert_eq!(line.to_string(), "0,20 30,20 30,0");
        assert_eq!(line.segments().count(), 2);
    }
}
