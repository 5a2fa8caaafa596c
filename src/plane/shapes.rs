use crate::plane::{v2, Point2, Vector2};
use crate::plane::bounds::AlignedBoundingBox2d;
use crate::plane::polygon::Polygon2d;

/// Counter-clockwise rectangle with one corner at `origin`.
///
/// Returns `None` unless both extents are positive, since a negative extent
/// would flip the winding.
pub fn rectangle(origin: Point2, extent: Vector2) -> Option<Polygon2d> {
    if !(extent.x > 0.0 && extent.y > 0.0) {
        return None
    }

    let ex = v2(extent.x, 0.0);
    let ey = v2(0.0, extent.y);

    Some(Polygon2d::new(vec![
        origin,
        origin + ex,
        origin + extent,
        origin + ey
    ]))
}

pub fn bounds(origin: Point2, extent: Vector2) -> AlignedBoundingBox2d {
    AlignedBoundingBox2d::new(origin, origin + extent)
}
