//! A single bucket of a [`UniformGrid`], optionally refined by a nested grid.
use either::Either;

use crate::grid::UniformGrid;
use crate::plane::{LineKind, Point2, Vector2};
use crate::plane::bounds::AlignedBoundingBox2d;
use crate::util::intersect::{push_unique, Intersectable, SharedObject};

/// Objects overlapping one cell of a grid.
///
/// Once a nested grid is attached, every query is answered by it and the
/// flat list is only kept so the cell can be subdivided again.
#[derive(Debug, Default)]
pub struct GridCell {
    objects: Vec<SharedObject>,
    sub_grid: Option<Box<UniformGrid>>,
}

impl GridCell {
    pub fn new() -> Self {
        GridCell::default()
    }

    /// Where queries against this cell are answered.
    fn contents(&self) -> Either<&UniformGrid, &[SharedObject]> {
        match self.sub_grid.as_deref() {
            Some(grid) => Either::Left(grid),
            None => Either::Right(self.objects.as_slice()),
        }
    }

    pub fn objects(&self) -> &[SharedObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn sub_grid(&self) -> Option<&UniformGrid> {
        self.sub_grid.as_deref()
    }

    pub(crate) fn sub_grid_mut(&mut self) -> Option<&mut UniformGrid> {
        self.sub_grid.as_deref_mut()
    }

    pub fn add_object(&mut self, object: SharedObject, bounds: Option<AlignedBoundingBox2d>) {
        if let Some(grid) = &mut self.sub_grid {
            let bounds = bounds.or_else(|| object.bounding_volume());
            grid.add_object(object.clone(), bounds);
        }
        self.objects.push(object);
    }

    /// Attaches `grid` as this cell's refinement, filling it with the
    /// objects already stored here. Replaces any previous refinement.
    pub fn subdivide(&mut self, mut grid: UniformGrid) {
        for object in &self.objects {
            grid.add_object(object.clone(), None);
        }
        self.sub_grid = Some(Box::new(grid));
    }

    /// Appends every object hit by the query to `out`, skipping objects
    /// already present.
    pub fn all_intersections(
        &self,
        origin: Point2,
        direction: Vector2,
        kind: LineKind,
        out: &mut Vec<SharedObject>,
    ) {
        match self.contents() {
            Either::Left(grid) => grid.all_intersections(origin, direction, kind, out),
            Either::Right(objects) => {
                for object in objects {
                    if object.intersects(origin, direction, kind) {
                        push_unique(out, object);
                    }
                }
            }
        }
    }

    /// Appends every object containing `point` to `out`.
    pub fn encompassing(&self, point: Point2, out: &mut Vec<SharedObject>) {
        match self.contents() {
            Either::Left(grid) => grid.collect_encompassing(point, out),
            Either::Right(objects) => {
                for object in objects {
                    if object.encompasses(point) {
                        push_unique(out, object);
                    }
                }
            }
        }
    }
}

impl Intersectable for GridCell {
    fn intersects(&self, origin: Point2, direction: Vector2, kind: LineKind) -> bool {
        match self.contents() {
            Either::Left(grid) => grid.intersects(origin, direction, kind),
            Either::Right(objects) => objects.iter().any(|o| o.intersects(origin, direction, kind)),
        }
    }

    /// With a nested grid this is that grid's bounds test, otherwise whether
    /// any stored object contains the point.
    fn encompasses(&self, point: Point2) -> bool {
        match self.contents() {
            Either::Left(grid) => grid.encompasses(point),
            Either::Right(objects) => objects.iter().any(|o| o.encompasses(point)),
        }
    }

    /// Union of the stored objects' boxes; `None` when empty or when any
    /// object has no box.
    fn bounding_box(&self) -> Option<AlignedBoundingBox2d> {
        match self.contents() {
            Either::Left(grid) => grid.bounding_box(),
            Either::Right(objects) => {
                let mut boxes = objects.iter().map(|o| o.bounding_box());
                let first = boxes.next()??;
                boxes.try_fold(first, |acc, b| b.map(|b| acc.union(&b)))
            }
        }
    }
}
