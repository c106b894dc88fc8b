//! Mathematical structs and functions.

use cgmath::{Point2, Vector2};
pub use box2d::Box2d;
pub use curve::ParametricCurve2d;
pub use polygon::signed_area;
pub use util::*;

mod box2d;
mod curve;
mod polygon;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;
