//! Axis-aligned rectangles and the slab test shared by every ray query in
//! this crate.
use std::f64::{INFINITY, NEG_INFINITY};

use rstar::{Envelope, PointDistance, RTreeObject, AABB};

use crate::plane::{p2, LineKind, Point2, Vector2};
use crate::util::intersect::Intersectable;

/// A rectangle spanned by two opposite corners.
///
/// The corners may be given in any order; every query normalizes them per
/// axis, so `new(a, b)` and `new(b, a)` describe the same region:
///
/// ```
/// # use raygrid::plane::p2;
/// # use raygrid::plane::bounds::AlignedBoundingBox2d;
/// # use raygrid::util::intersect::Intersectable;
/// let a = AlignedBoundingBox2d::new(p2(0.0, 0.0), p2(1.0, 1.0));
/// let b = AlignedBoundingBox2d::new(p2(1.0, 1.0), p2(0.0, 0.0));
/// assert!(a.encompasses(p2(1.0, 1.0)));
/// assert!(b.encompasses(p2(0.5, 0.5)));
/// assert!(!b.encompasses(p2(1.1, 0.5)));
/// assert_eq!(a.min(), b.min());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlignedBoundingBox2d {
    c1: Point2,
    c2: Point2,
}

/// Parametric intervals of a ray against the two slabs of a box.
///
/// Each interval is oriented along the direction of travel, so `tx.0` is the
/// parameter at which the ray enters the x slab and `tx.1` where it leaves.
/// An axis whose direction component is zero gets `(-inf, inf)` when the
/// origin lies within that slab and the empty `(inf, -inf)` otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slab {
    pub tx: (f64, f64),
    pub ty: (f64, f64),
}

impl Slab {
    /// Parameter at which the ray enters the box.
    pub fn t0(&self) -> f64 {
        self.tx.0.max(self.ty.0)
    }

    /// Parameter at which the ray leaves the box.
    pub fn t1(&self) -> f64 {
        self.tx.1.min(self.ty.1)
    }

    pub fn is_hit(&self) -> bool {
        self.t0() < self.t1()
    }
}

fn axis_interval(lo: f64, hi: f64, origin: f64, direction: f64) -> (f64, f64) {
    if direction == 0.0 {
        // 0 / 0 would poison the min/max below with NaN
        if lo <= origin && origin <= hi {
            (NEG_INFINITY, INFINITY)
        } else {
            (INFINITY, NEG_INFINITY)
        }
    } else {
        let a = (lo - origin) / direction;
        let b = (hi - origin) / direction;
        if direction > 0.0 { (a, b) } else { (b, a) }
    }
}

impl AlignedBoundingBox2d {
    pub fn new(c1: Point2, c2: Point2) -> Self {
        AlignedBoundingBox2d { c1, c2 }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where I: IntoIterator<Item = Point2> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (lo, hi) = it.fold((first, first), |(lo, hi), p| {
            (p2(lo.x.min(p.x), lo.y.min(p.y)), p2(hi.x.max(p.x), hi.y.max(p.y)))
        });
        Some(AlignedBoundingBox2d::new(lo, hi))
    }

    pub fn c1(&self) -> Point2 { self.c1 }
    pub fn c2(&self) -> Point2 { self.c2 }

    pub fn set_corners(&mut self, c1: Point2, c2: Point2) {
        self.c1 = c1;
        self.c2 = c2;
    }

    /// Per-axis minimum of the two corners.
    pub fn min(&self) -> Point2 {
        p2(self.c1.x.min(self.c2.x), self.c1.y.min(self.c2.y))
    }

    /// Per-axis maximum of the two corners.
    pub fn max(&self) -> Point2 {
        p2(self.c1.x.max(self.c2.x), self.c1.y.max(self.c2.y))
    }

    pub fn width(&self) -> f64 {
        (self.c2.x - self.c1.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.c2.y - self.c1.y).abs()
    }

    pub fn union(&self, other: &AlignedBoundingBox2d) -> AlignedBoundingBox2d {
        let (a, b) = (self.min(), self.max());
        let (c, d) = (other.min(), other.max());
        AlignedBoundingBox2d::new(
            p2(a.x.min(c.x), a.y.min(c.y)),
            p2(b.x.max(d.x), b.y.max(d.y)),
        )
    }

    /// True if the boxes share any point, edges included.
    pub fn overlaps(&self, other: &AlignedBoundingBox2d) -> bool {
        let (a, b) = (self.min(), self.max());
        let (c, d) = (other.min(), other.max());
        !(b.x < c.x || a.x > d.x || b.y < c.y || a.y > d.y)
    }

    /// Intersects the ray `origin + t * direction` with both slabs.
    pub fn slab(&self, origin: Point2, direction: Vector2) -> Slab {
        let lo = self.min();
        let hi = self.max();
        Slab {
            tx: axis_interval(lo.x, hi.x, origin.x, direction.x),
            ty: axis_interval(lo.y, hi.y, origin.y, direction.y),
        }
    }
}

impl Intersectable for AlignedBoundingBox2d {
    /// Slab test. A ray that only touches a corner is not a hit.
    ///
    /// For segments the entry parameter must fall in `[0, 1)`; a segment that
    /// starts inside the box enters at a negative parameter and is not
    /// reported.
    fn intersects(&self, origin: Point2, direction: Vector2, kind: LineKind) -> bool {
        let slab = self.slab(origin, direction);
        if !slab.is_hit() {
            return false
        }

        match kind {
            LineKind::InfiniteLine => true,
            LineKind::Segment => {
                let t = slab.t0();
                t >= 0.0 && t < 1.0
            }
        }
    }

    fn encompasses(&self, point: Point2) -> bool {
        let lo = self.min();
        let hi = self.max();
        lo.x <= point.x && point.x <= hi.x && lo.y <= point.y && point.y <= hi.y
    }

    fn bounding_box(&self) -> Option<AlignedBoundingBox2d> {
        Some(*self)
    }
}

impl RTreeObject for AlignedBoundingBox2d {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.c1.x, self.c1.y], [self.c2.x, self.c2.y])
    }
}

impl PointDistance for AlignedBoundingBox2d {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.envelope().distance_2(point)
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.encompasses(p2(point[0], point[1]))
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use cgmath::InnerSpace;
    use proptest::prelude::*;
    use rstar::RTree;
    use crate::plane::{v2, Line2};
    use super::*;

    fn unit() -> AlignedBoundingBox2d {
        AlignedBoundingBox2d::new(p2(0.0, 0.0), p2(1.0, 1.0))
    }

    #[test]
    fn test_encompasses_closed() {
        let b = unit();
        assert!(b.encompasses(p2(0.5, 0.5)));
        assert!(b.encompasses(p2(1.0, 1.0)));
        assert!(b.encompasses(p2(0.0, 0.0)));
        assert!(!b.encompasses(p2(1.1, 0.5)));
        assert!(!b.encompasses(p2(-0.1, -0.1)));
    }

    #[test]
    fn test_infinite_vs_segment() {
        let b = unit();
        let origin = p2(-1.0, -1.0);
        let d = v2(1.0, 1.0).normalize();

        assert!(b.intersects(origin, d, LineKind::InfiniteLine));
        assert!(b.intersects(origin, -d, LineKind::InfiniteLine));
        assert!(!b.intersects(origin, d, LineKind::Segment));
        assert!(!b.intersects(origin, -d, LineKind::Segment));
    }

    #[test]
    fn test_glancing_corner() {
        let b = unit();
        let d = v2(1.0, 1.0).normalize();
        for &origin in &[p2(-1.0, 0.0), p2(0.0, -1.0)] {
            for &dir in &[d, -d] {
                for &kind in &[LineKind::Segment, LineKind::InfiniteLine] {
                    assert!(
                        !b.intersects(origin, dir, kind),
                        "{:?} {:?} {:?} should miss", origin, dir, kind
                    );
                }
            }
        }
    }

    #[test]
    fn test_segment_reaching_box() {
        let b = unit();
        assert!(b.intersects(p2(-1.0, 0.5), v2(2.0, 0.0), LineKind::Segment));
        assert!(!b.intersects(p2(-1.0, 0.5), v2(0.5, 0.0), LineKind::Segment));
        assert!(b.intersects_line(&Line2::from_points(p2(0.5, -1.0), p2(0.5, 0.5))));
    }

    #[test]
    fn test_axis_parallel() {
        let b = unit();
        assert!(b.intersects(p2(-1.0, 0.5), v2(1.0, 0.0), LineKind::InfiniteLine));
        assert!(!b.intersects(p2(-1.0, 1.5), v2(1.0, 0.0), LineKind::InfiniteLine));
        assert!(b.intersects(p2(0.25, 3.0), v2(0.0, -4.0), LineKind::Segment));
        assert!(!b.intersects(p2(1.25, 3.0), v2(0.0, -4.0), LineKind::Segment));

        let slab = b.slab(p2(-1.0, 0.5), v2(1.0, 0.0));
        assert_eq!(slab.ty, (NEG_INFINITY, INFINITY));
        assert_relative_eq!(slab.t0(), 1.0);
        assert_relative_eq!(slab.t1(), 2.0);
    }

    #[test]
    fn test_slab_orientation() {
        let b = AlignedBoundingBox2d::new(p2(3.0, 1.0), p2(1.0, 3.0));
        let slab = b.slab(p2(4.0, 2.0), v2(-1.0, 0.0));
        assert_relative_eq!(slab.tx.0, 1.0);
        assert_relative_eq!(slab.tx.1, 3.0);
    }

    #[test]
    fn test_from_points_and_union() {
        let b = AlignedBoundingBox2d::from_points(vec![p2(1.0, 5.0), p2(-2.0, 3.0), p2(0.0, 7.0)]);
        let b = b.unwrap();
        assert_eq!(b.min(), p2(-2.0, 3.0));
        assert_eq!(b.max(), p2(1.0, 7.0));
        assert_relative_eq!(b.width(), 3.0);
        assert_relative_eq!(b.height(), 4.0);
        assert_eq!(AlignedBoundingBox2d::from_points(vec![]), None);

        let u = unit().union(&AlignedBoundingBox2d::new(p2(2.0, 2.0), p2(3.0, -1.0)));
        assert_eq!(u.min(), p2(0.0, -1.0));
        assert_eq!(u.max(), p2(3.0, 2.0));
    }

    #[test]
    fn test_overlaps_inclusive() {
        let b = unit();
        assert!(b.overlaps(&AlignedBoundingBox2d::new(p2(1.0, 0.0), p2(2.0, 1.0))));
        assert!(!b.overlaps(&AlignedBoundingBox2d::new(p2(1.5, 0.0), p2(2.0, 1.0))));
    }

    #[test]
    fn test_set_corners() {
        let mut b = unit();
        b.set_corners(p2(4.0, 4.0), p2(2.0, 2.0));
        assert_eq!(b.c1(), p2(4.0, 4.0));
        assert!(b.encompasses(p2(3.0, 3.0)));
        assert!(!b.encompasses(p2(0.5, 0.5)));
    }

    #[test]
    fn test_rtree_lookup() {
        let tree = RTree::bulk_load(vec![
            unit(),
            AlignedBoundingBox2d::new(p2(5.0, 5.0), p2(4.0, 4.0)),
        ]);
        let found: Vec<_> = tree.locate_all_at_point(&[4.5, 4.5]).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].min(), p2(4.0, 4.0));
        assert_eq!(tree.locate_all_at_point(&[2.0, 2.0]).count(), 0);
    }

    proptest! {
        #[test]
        fn corner_order_is_irrelevant(
            ax in -10.0..10.0f64, ay in -10.0..10.0f64,
            bx in -10.0..10.0f64, by in -10.0..10.0f64,
            ox in -20.0..20.0f64, oy in -20.0..20.0f64,
            dx in -20.0..20.0f64, dy in -20.0..20.0f64,
        ) {
            let fwd = AlignedBoundingBox2d::new(p2(ax, ay), p2(bx, by));
            let rev = AlignedBoundingBox2d::new(p2(bx, by), p2(ax, ay));
            let o = p2(ox, oy);
            let d = v2(dx, dy);
            prop_assert_eq!(fwd.encompasses(o), rev.encompasses(o));
            for &kind in &[LineKind::Segment, LineKind::InfiniteLine] {
                prop_assert_eq!(fwd.intersects(o, d, kind), rev.intersects(o, d, kind));
            }
        }
    }
}
