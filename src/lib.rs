//! A library for answering ray and segment queries over collections of
//! two-dimensional shapes:
//!
//! ```
//! use std::sync::Arc;
//! use raygrid::plane::{p2, v2, LineKind};
//! use raygrid::plane::bounds::AlignedBoundingBox2d;
//! use raygrid::grid::UniformGrid;
//! use raygrid::util::intersect::Intersectable;
//!
//! let area = AlignedBoundingBox2d::new(p2(0.0, 0.0), p2(4.0, 4.0));
//! let mut grid = UniformGrid::new(area, 4, 4).unwrap();
//! grid.add_object(Arc::new(AlignedBoundingBox2d::new(p2(2.2, 2.2), p2(2.8, 2.8))), None);
//!
//! assert!(grid.intersects(p2(0.0, 0.0), v2(1.0, 1.0), LineKind::InfiniteLine));
//! assert!(!grid.intersects(p2(0.0, 0.0), v2(1.0, 1.0), LineKind::Segment));
//! ```
//!
//! Concrete shapes live in [`plane`], the shared query contract in
//! [`util::intersect`], and the acceleration structure in [`grid`].
extern crate cgmath;
extern crate either;
#[macro_use]
extern crate log;
pub mod grid;
pub mod plane;
pub mod util;

pub use plane::shapes;
