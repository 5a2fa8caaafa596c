//! Incremental cell walk (Amanatides-Woo style) of a ray through a
//! [`UniformGrid`].
//!
//! The walk tracks, per axis, the ray parameter at which the next cell
//! boundary is crossed and always steps across the nearer one. It visits at
//! most `nx + ny - 1` cells.
use std::f64::INFINITY;

use crate::grid::UniformGrid;
use crate::grid::cell::GridCell;
use crate::plane::{LineKind, Point2, Vector2};

/// Per-axis stepping state.
#[derive(Clone, Copy, Debug)]
struct Axis {
    index: isize,
    step: isize,
    stop: isize,
    next: f64,
    delta: f64,
}

impl Axis {
    /// `enter` is the ray parameter at which the grid's slab on this axis is
    /// entered and `delta` the parameter width of one cell.
    fn new(direction: f64, index: isize, cells: usize, enter: f64, delta: f64) -> Axis {
        let n = cells as isize;
        if direction > 0.0 {
            Axis { index, step: 1, stop: n, next: enter + (index + 1) as f64 * delta, delta }
        } else if direction < 0.0 {
            Axis { index, step: -1, stop: -1, next: enter + (n - index) as f64 * delta, delta }
        } else {
            Axis { index, step: 0, stop: -1, next: INFINITY, delta }
        }
    }

    /// Crosses into the neighbouring cell; `false` once the grid is left.
    fn advance(&mut self) -> bool {
        self.index += self.step;
        if self.index == self.stop {
            return false
        }
        self.next += self.delta;
        true
    }
}

/// Calls `visit` with every cell the query passes through, in order of travel,
/// until it returns `true`. Returns whether any visit did.
///
/// Segment queries only walk the part of the segment inside the grid. A zero
/// direction never visits anything.
pub(crate) fn walk<F>(
    grid: &UniformGrid,
    origin: Point2,
    direction: Vector2,
    kind: LineKind,
    mut visit: F,
) -> bool
where F: FnMut(usize, usize, &GridCell) -> bool
{
    if direction.x == 0.0 && direction.y == 0.0 {
        return false
    }

    let slab = grid.bounds().slab(origin, direction);
    let (mut t0, mut t1) = (slab.t0(), slab.t1());
    if t0 > t1 {
        return false
    }
    if kind == LineKind::Segment {
        if t1 < 0.0 || t0 > 1.0 {
            return false
        }
        t0 = t0.max(0.0);
        t1 = t1.min(1.0);
    }

    let (nx, ny) = grid.resolution();
    let dtx = (slab.tx.1 - slab.tx.0) / nx as f64;
    let dty = (slab.ty.1 - slab.ty.0) / ny as f64;

    let (ix, iy) = grid.clamped_index(origin + direction * t0);
    let mut x = Axis::new(direction.x, ix as isize, nx, slab.tx.0, dtx);
    let mut y = Axis::new(direction.y, iy as isize, ny, slab.ty.0, dty);

    loop {
        let (cx, cy) = (x.index as usize, y.index as usize);
        match grid.cell(cx, cy) {
            Some(cell) => {
                if visit(cx, cy, cell) {
                    return true
                }
            },
            None => return false
        }

        let axis = if x.next < y.next { &mut x } else { &mut y };
        if axis.next >= t1 || !axis.advance() {
            return false
        }
    }
}
