use std::fmt::Debug;
use std::sync::Arc;

use crate::plane::{Line2, LineKind, Point2, Vector2};
use crate::plane::bounds::AlignedBoundingBox2d;

/// A shape that can be queried with rays, segments and points.
///
/// Every shape stored in a [`crate::grid::UniformGrid`] implements this,
/// including grids themselves.
pub trait Intersectable: Debug + Send + Sync {
    /// Does the query starting at `origin` along `direction` touch this shape?
    fn intersects(&self, origin: Point2, direction: Vector2, kind: LineKind) -> bool;

    /// Treats `line` as a segment query.
    fn intersects_line(&self, line: &Line2) -> bool {
        self.intersects(line.p, line.v, LineKind::Segment)
    }

    fn encompasses(&self, point: Point2) -> bool;

    /// The tightest axis-aligned box around this shape, if one exists.
    fn bounding_box(&self) -> Option<AlignedBoundingBox2d>;

    /// The volume used for culling. Falls back to the bounding box.
    fn bounding_volume(&self) -> Option<AlignedBoundingBox2d> {
        self.bounding_box()
    }
}

/// Handle used when many cells refer to the same object.
pub type SharedObject = Arc<dyn Intersectable>;

/// Whether two handles point at the same allocation.
pub fn same_object(a: &SharedObject, b: &SharedObject) -> bool {
    // vtable pointers may differ between codegen units; compare data only
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// Appends `object` unless the same allocation is already present.
pub(crate) fn push_unique(out: &mut Vec<SharedObject>, object: &SharedObject) {
    if !out.iter().any(|o| same_object(o, object)) {
        out.push(object.clone());
    }
}
