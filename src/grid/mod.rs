//! Uniform grid acceleration for ray, segment and point queries over many
//! [`Intersectable`] objects.
//!
//! A grid is built once by repeated [`UniformGrid::add_object`] calls and
//! then only queried; objects cannot be removed. Objects are shared between
//! every cell their bounding box overlaps, so a grid never owns them.
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::plane::{p2, LineKind, Point2, Vector2};
use crate::plane::bounds::AlignedBoundingBox2d;
use crate::util::intersect::{Intersectable, SharedObject};

pub mod cell;
pub mod config;
mod traverse;

pub use cell::GridCell;
pub use config::GridConfig;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum GridError {
    #[error("grid resolution must be positive, got {nx}x{ny}")]
    ZeroResolution { nx: usize, ny: usize },
    #[error("grid bounds must have positive, finite width and height")]
    DegenerateBounds,
    #[error("cell ({ix}, {iy}) is outside the grid")]
    CellOutOfRange { ix: usize, iy: usize },
}

/// A rectangle split into `nx` by `ny` equally sized cells.
///
/// ```
/// # use std::sync::Arc;
/// # use raygrid::plane::{p2, v2, LineKind};
/// # use raygrid::plane::bounds::AlignedBoundingBox2d;
/// # use raygrid::plane::polygon::Polygon2d;
/// # use raygrid::grid::UniformGrid;
/// let area = AlignedBoundingBox2d::new(p2(0.0, 0.0), p2(10.0, 10.0));
/// let mut grid = UniformGrid::new(area, 5, 5).unwrap();
/// grid.add_object(Arc::new(Polygon2d::new(vec![p2(6.0, 6.0), p2(8.0, 6.0), p2(7.0, 8.0)])), None);
/// grid.add_object(Arc::new(AlignedBoundingBox2d::new(p2(1.0, 8.0), p2(2.0, 9.0))), None);
///
/// let hits = grid.intersections(p2(0.0, 7.0), v2(10.0, 0.0), LineKind::Segment);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(grid.objects_at(p2(1.5, 8.5)).len(), 1);
/// ```
pub struct UniformGrid {
    min: Point2,
    max: Point2,
    nx: usize,
    ny: usize,
    cells: Vec<GridCell>,
    objects: Vec<SharedObject>,
    ids: HashSet<usize>,
    config: GridConfig,
}

fn object_id(object: &SharedObject) -> usize {
    Arc::as_ptr(object) as *const () as usize
}

impl UniformGrid {
    pub fn new(bounds: AlignedBoundingBox2d, nx: usize, ny: usize) -> Result<Self, GridError> {
        UniformGrid::from_config(bounds, &GridConfig::default().with_resolution(nx, ny))
    }

    pub fn from_config(bounds: AlignedBoundingBox2d, config: &GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let (w, h) = (bounds.width(), bounds.height());
        if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
            return Err(GridError::DegenerateBounds)
        }

        debug!("new {}x{} grid over {:?}", config.nx, config.ny, bounds);
        let cells = (0..config.nx * config.ny).map(|_| GridCell::new()).collect();
        Ok(UniformGrid {
            min: bounds.min(),
            max: bounds.max(),
            nx: config.nx,
            ny: config.ny,
            cells,
            objects: vec![],
            ids: HashSet::new(),
            config: *config,
        })
    }

    pub fn bounds(&self) -> AlignedBoundingBox2d {
        AlignedBoundingBox2d::new(self.min, self.max)
    }

    pub fn resolution(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of distinct objects inserted.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Every distinct object inserted, in insertion order.
    pub fn objects(&self) -> &[SharedObject] {
        &self.objects
    }

    pub fn cell(&self, ix: usize, iy: usize) -> Option<&GridCell> {
        if ix < self.nx && iy < self.ny {
            self.cells.get(iy * self.nx + ix)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, ix: usize, iy: usize) -> Option<&mut GridCell> {
        if ix < self.nx && iy < self.ny {
            self.cells.get_mut(iy * self.nx + ix)
        } else {
            None
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &GridCell)> + '_ {
        let nx = self.nx;
        self.cells.iter().enumerate().map(move |(i, cell)| ((i % nx, i / nx), cell))
    }

    pub fn cell_bounds(&self, ix: usize, iy: usize) -> Option<AlignedBoundingBox2d> {
        if ix >= self.nx || iy >= self.ny {
            return None
        }
        let w = (self.max.x - self.min.x) / self.nx as f64;
        let h = (self.max.y - self.min.y) / self.ny as f64;
        let lo = p2(self.min.x + ix as f64 * w, self.min.y + iy as f64 * h);
        // the last row and column end exactly on the grid bounds
        let hi = p2(
            if ix + 1 == self.nx { self.max.x } else { lo.x + w },
            if iy + 1 == self.ny { self.max.y } else { lo.y + h },
        );
        Some(AlignedBoundingBox2d::new(lo, hi))
    }

    /// Fractional cell coordinate of `v` along one axis, clamped to the
    /// valid cell range.
    fn fraction(v: f64, lo: f64, hi: f64, cells: usize) -> f64 {
        let f = (v - lo) / (hi - lo) * cells as f64;
        f.max(0.0).min((cells - 1) as f64)
    }

    /// The cell containing `point`, with points outside the grid mapped onto
    /// the nearest border cell.
    pub(crate) fn clamped_index(&self, point: Point2) -> (usize, usize) {
        (
            UniformGrid::fraction(point.x, self.min.x, self.max.x, self.nx) as usize,
            UniformGrid::fraction(point.y, self.min.y, self.max.y, self.ny) as usize,
        )
    }

    /// The cell containing `point`, or `None` outside the grid.
    pub fn cell_index(&self, point: Point2) -> Option<(usize, usize)> {
        if self.encompasses(point) {
            Some(self.clamped_index(point))
        } else {
            None
        }
    }

    /// Inserts `object` into every cell overlapped by `bounds`, or by the
    /// object's own bounding volume when `bounds` is `None`.
    ///
    /// Boxes reaching past the grid are clamped onto the border cells. An
    /// object with no box at all is put in every cell, which makes every
    /// query visit it.
    pub fn add_object(&mut self, object: SharedObject, bounds: Option<AlignedBoundingBox2d>) {
        if self.ids.insert(object_id(&object)) {
            self.objects.push(object.clone());
        }

        match bounds.or_else(|| object.bounding_volume()) {
            Some(b) => {
                let (lo, hi) = (b.min(), b.max());
                let (ix0, iy0) = self.clamped_index(lo);
                let (ix1, iy1) = self.clamped_index(hi);
                trace!("object {:?} spans cells ({}, {})..=({}, {})", b, ix0, iy0, ix1, iy1);
                for iy in iy0..=iy1 {
                    for ix in ix0..=ix1 {
                        if let Some(cell) = self.cell_mut(ix, iy) {
                            cell.add_object(object.clone(), Some(b));
                        }
                    }
                }
            },
            None => {
                // TODO: require a bounding volume at insertion instead of
                // flooding every cell
                warn!("object {:?} has no bounding box; adding it to all {} cells", object, self.cells.len());
                for cell in self.cells.iter_mut() {
                    cell.add_object(object.clone(), None);
                }
            }
        }
    }

    /// Replaces cell `(ix, iy)`'s contents with a nested `nx` by `ny` grid
    /// over the cell's bounds.
    pub fn subdivide_cell(&mut self, ix: usize, iy: usize, nx: usize, ny: usize) -> Result<(), GridError> {
        let config = self.config.child().with_resolution(nx, ny);
        self.subdivide_with(ix, iy, &config)
    }

    fn subdivide_with(&mut self, ix: usize, iy: usize, config: &GridConfig) -> Result<(), GridError> {
        let bounds = self.cell_bounds(ix, iy).ok_or(GridError::CellOutOfRange { ix, iy })?;
        let grid = UniformGrid::from_config(bounds, config)?;
        let cell = self.cell_mut(ix, iy).ok_or(GridError::CellOutOfRange { ix, iy })?;
        debug!("subdividing cell ({}, {}) holding {} objects into {}x{}", ix, iy, cell.len(), config.nx, config.ny);
        cell.subdivide(grid);
        Ok(())
    }

    /// Splits every cell holding more than `max_cell_objects` objects, and
    /// the crowded cells of those nested grids, down to `max_depth` levels.
    /// Returns how many cells were split.
    pub fn refine(&mut self) -> Result<usize, GridError> {
        if self.config.max_depth == 0 {
            return Ok(0)
        }

        let child = self.config.child();
        let mut split = 0;
        for iy in 0..self.ny {
            for ix in 0..self.nx {
                let crowded = self.cell(ix, iy)
                    .map_or(false, |c| c.sub_grid().is_none() && c.len() > self.config.max_cell_objects);
                if crowded {
                    self.subdivide_with(ix, iy, &child)?;
                    split += 1;
                }
                if let Some(sub) = self.cell_mut(ix, iy).and_then(|c| c.sub_grid_mut()) {
                    split += sub.refine()?;
                }
            }
        }
        Ok(split)
    }

    /// Appends every object hit by the query to `out`, each at most once,
    /// visiting every cell along the way.
    pub fn all_intersections(
        &self,
        origin: Point2,
        direction: Vector2,
        kind: LineKind,
        out: &mut Vec<SharedObject>,
    ) {
        if self.objects.is_empty() {
            return
        }

        traverse::walk(self, origin, direction, kind, |_, _, cell| {
            cell.all_intersections(origin, direction, kind, out);
            false
        });
    }

    pub fn intersections(&self, origin: Point2, direction: Vector2, kind: LineKind) -> Vec<SharedObject> {
        let mut out = vec![];
        self.all_intersections(origin, direction, kind, &mut out);
        out
    }

    pub(crate) fn collect_encompassing(&self, point: Point2, out: &mut Vec<SharedObject>) {
        if let Some((ix, iy)) = self.cell_index(point) {
            if let Some(cell) = self.cell(ix, iy) {
                cell.encompassing(point, out);
            }
        }
    }

    /// Objects containing `point`, found through the single cell under it.
    pub fn objects_at(&self, point: Point2) -> Vec<SharedObject> {
        let mut out = vec![];
        self.collect_encompassing(point, &mut out);
        out
    }
}

impl Intersectable for UniformGrid {
    /// Walks the cells along the query and stops at the first hit.
    fn intersects(&self, origin: Point2, direction: Vector2, kind: LineKind) -> bool {
        if self.objects.is_empty() {
            return false
        }

        traverse::walk(self, origin, direction, kind, |_, _, cell| {
            cell.intersects(origin, direction, kind)
        })
    }

    /// Tests against the grid's own bounds, not its objects.
    fn encompasses(&self, point: Point2) -> bool {
        self.bounds().encompasses(point)
    }

    fn bounding_box(&self) -> Option<AlignedBoundingBox2d> {
        Some(self.bounds())
    }
}

impl fmt::Debug for UniformGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let refined = self.cells.iter().filter(|c| c.sub_grid().is_some()).count();
        f.debug_struct("UniformGrid")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("resolution", &(self.nx, self.ny))
            .field("objects", &self.objects.len())
            .field("refined_cells", &refined)
            .finish()
    }
}
