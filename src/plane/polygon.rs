use std::iter;

use thiserror::Error;

use crate::plane::{cross, LineKind, Point2, Vector2};
use crate::plane::bounds::AlignedBoundingBox2d;
use crate::util::intersect::Intersectable;

/// Determinants below this are treated as parallel lines.
const PARALLEL_EPSILON: f64 = 4.0 * std::f64::EPSILON;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Violations reported by [`Polygon2d::validate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum PolygonError {
    #[error("polygon has fewer than three points or no area")]
    Zero,
    #[error("polygon is wound clockwise")]
    Clockwise,
    #[error("polygon is not convex")]
    NotConvex,
}

/// A convex polygon given by its vertices in counter-clockwise order.
///
/// Must obey two laws, neither of which is checked by the queries:
/// - **convex**: every interior angle is at most 180 degrees.
/// - **counter-clockwise**: a clockwise ring inverts every containment and
///   intersection answer.
///
/// [`Polygon2d::validate`] checks both on request. Fewer than three points
/// is tolerated and makes every query answer "no":
///
/// ```
/// # use raygrid::plane::p2;
/// # use raygrid::plane::polygon::Polygon2d;
/// # use raygrid::util::intersect::Intersectable;
/// let tri = Polygon2d::new(vec![p2(0.0, 0.0), p2(2.0, 0.0), p2(1.0, 2.0)]);
/// assert!(tri.encompasses(p2(1.0, 1.0)));
/// assert!(!tri.encompasses(p2(1.0, -1.0)));
///
/// let line = Polygon2d::new(vec![p2(0.0, 0.0), p2(2.0, 0.0)]);
/// assert!(line.bounding_box().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon2d {
    points: Vec<Point2>,
}

impl Polygon2d {
    pub fn new(points: Vec<Point2>) -> Self {
        Polygon2d { points }
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replaces the point at `index`, returning the old one. Out of range
    /// indices leave the polygon untouched.
    pub fn set_point(&mut self, index: usize, point: Point2) -> Option<Point2> {
        self.points.get_mut(index).map(|p| std::mem::replace(p, point))
    }

    pub fn push(&mut self, point: Point2) {
        self.points.push(point)
    }

    /// Consecutive vertex pairs, closing the ring from the last point back
    /// to the first.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let next = self.points.iter().skip(1).chain(self.points.first());
        self.points.iter().cloned().zip(next.cloned())
    }

    /// Twice the signed area; positive for counter-clockwise rings.
    fn signed_area_2(&self) -> f64 {
        self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum()
    }

    pub fn winding(&self) -> Option<Winding> {
        if self.points.len() < 3 {
            return None
        }
        let area = self.signed_area_2();
        if area > 0.0 {
            Some(Winding::CounterClockwise)
        } else if area < 0.0 {
            Some(Winding::Clockwise)
        } else {
            None
        }
    }

    /// Checks the laws the queries rely on.
    ///
    /// Convexity is checked locally (no reflex vertex), so a self-crossing
    /// ring that turns left at every vertex still passes.
    pub fn validate(&self) -> Result<(), PolygonError> {
        match self.winding() {
            None => Err(PolygonError::Zero),
            Some(Winding::Clockwise) => Err(PolygonError::Clockwise),
            Some(Winding::CounterClockwise) => {
                let n = self.points.len();
                let reflex = (0..n).any(|i| {
                    let a = self.points[i];
                    let b = self.points[(i + 1) % n];
                    let c = self.points[(i + 2) % n];
                    cross(b - a, c - b) < 0.0
                });
                if reflex { Err(PolygonError::NotConvex) } else { Ok(()) }
            }
        }
    }
}

/// Parameters `(t1, t2)` where `o1 + t1 * d1 == o2 + t2 * d2`, or `None` when
/// the lines are (nearly) parallel.
fn line_params(o1: Point2, d1: Vector2, o2: Point2, d2: Vector2) -> Option<(f64, f64)> {
    let denom = d2.y * d1.x - d2.x * d1.y;
    if denom.abs() < PARALLEL_EPSILON {
        return None
    }
    let w = o2 - o1;
    Some((cross(w, d2) / denom, cross(w, d1) / denom))
}

fn unit_interval(t: f64) -> bool {
    t >= 0.0 && t <= 1.0
}

impl Intersectable for Polygon2d {
    /// Accepts immediately if the query starts (or, for segments, ends)
    /// inside the polygon, otherwise tests every edge.
    fn intersects(&self, origin: Point2, direction: Vector2, kind: LineKind) -> bool {
        if self.points.len() < 3 {
            return false
        }

        if self.encompasses(origin) {
            return true
        }
        if kind == LineKind::Segment && self.encompasses(origin + direction) {
            return true
        }

        self.edges().any(|(a, b)| {
            match line_params(origin, direction, a, b - a) {
                Some((t1, t2)) => {
                    unit_interval(t2) && (kind == LineKind::InfiniteLine || unit_interval(t1))
                },
                None => false
            }
        })
    }

    fn encompasses(&self, point: Point2) -> bool {
        if self.points.len() < 3 {
            return false
        }

        self.edges().all(|(a, b)| cross(point - a, point - b) >= 0.0)
    }

    fn bounding_box(&self) -> Option<AlignedBoundingBox2d> {
        if self.points.len() < 3 {
            None
        } else {
            AlignedBoundingBox2d::from_points(self.points.iter().cloned())
        }
    }
}

impl iter::FromIterator<Point2> for Polygon2d {
    fn from_iter<I: IntoIterator<Item = Point2>>(it: I) -> Self {
        Polygon2d::new(it.into_iter().collect())
    }
}
