use std::ops;
use crate::plane::{Point2, Vector2};

/// How far a query extends along its direction vector.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineKind {
    /// The finite segment from `origin` to `origin + direction`.
    Segment,
    /// The whole line through `origin` along `direction`; no clamping of the
    /// line parameter is applied.
    InfiniteLine,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line2 {
    pub p: Point2,
    pub v: Vector2
}

/// Represents a line with an origin and a displacement:
///
/// ```
/// # use raygrid::plane::{Point2, Vector2};
/// # use raygrid::plane::line::Line2;
/// let l = Line2::from_points(Point2::new(1.0, 1.0), Point2::new(2.0, 2.0));
/// assert_eq!(l.v, Vector2::new(1.0, 1.0));
/// assert_eq!(l.end(), Point2::new(2.0, 2.0));
/// ```
///
/// Lines can be translated:
///
/// ```
/// # use raygrid::plane::{Point2, Vector2};
/// # use raygrid::plane::line::Line2;
/// let l = Line2::from_points(Point2::new(1.0, 1.0), Point2::new(2.0, 1.0)) + Vector2::new(1.0, 1.0);
/// assert_eq!(l, Line2::new(Point2::new(2.0, 2.0), Vector2::new(1.0, 0.0)));
/// ```
impl Line2 {
    pub fn new(p: Point2, v: Vector2) -> Line2 {
        Line2 { p, v }
    }

    pub fn from_points(p1: Point2, p2: Point2) -> Line2 {
        Line2 { p: p1, v: p2 - p1 }
    }

    /// The point reached by walking the full displacement from the origin.
    pub fn end(&self) -> Point2 {
        self.p + self.v
    }

    /// Point at parameter `t`, where `0` is the origin and `1` is the end.
    pub fn at(&self, t: f64) -> Point2 {
        self.p + self.v * t
    }
}

impl ops::Add<Vector2> for Line2 {
    type Output = Line2;

    fn add(self, other: Vector2) -> Self {
        Line2::new(self.p + other, self.v)
    }
}

#[cfg(test)]
mod test {
    use crate::plane::{p2, v2};
    use super::*;

    #[test]
    fn test_parameterization() {
        let l = Line2::new(p2(1.0, -1.0), v2(2.0, 4.0));
        assert_eq!(l.at(0.0), l.p);
        assert_eq!(l.at(1.0), l.end());
        assert_eq!(l.at(0.5), p2(2.0, 1.0));
    }
}
