use cgmath;
pub mod bounds;
pub mod line;
pub mod polygon;
pub mod shapes;

pub use line::{Line2, LineKind};

pub type Point2 = cgmath::Point2<f64>;
pub type Vector2 = cgmath::Vector2<f64>;

pub fn p2<T>(x: T, y: T) -> cgmath::Point2<T> {
    cgmath::Point2::new(x, y)
}
pub use cgmath::vec2 as v2;

/// The z component of the 3d cross product of `a` and `b`.
pub fn cross(a: Vector2, b: Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
