use super::{heading_vector, rot90, Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;

/// A rectangle in 2D space, rotated to an arbitrary heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Box2d {
    center: Point2d,
    /// Unit vector along the box's length.
    axis: Vector2d,
    half_len: f64,
    half_wid: f64,
}

impl Box2d {
    /// Creates a box centred at `center`, with its length aligned to the heading `theta`.
    pub fn new(center: Point2d, theta: f64, length: f64, width: f64) -> Self {
        Self {
            center,
            axis: heading_vector(theta),
            half_len: 0.5 * length,
            half_wid: 0.5 * width,
        }
    }

    pub fn center(&self) -> Point2d {
        self.center
    }

    pub fn length(&self) -> f64 {
        2.0 * self.half_len
    }

    pub fn width(&self) -> f64 {
        2.0 * self.half_wid
    }

    /// The four corners of the box, in counter-clockwise order.
    pub fn corners(&self) -> [Point2d; 4] {
        let along = self.axis * self.half_len;
        let across = rot90(self.axis) * self.half_wid;
        [
            self.center - along - across,
            self.center + along - across,
            self.center + along + across,
            self.center - along + across,
        ]
    }

    /// Returns true if the two boxes overlap, touching included.
    ///
    /// Uses the separating axis theorem: two rectangles are disjoint iff
    /// their projections are disjoint along one of the four edge normals.
    pub fn has_overlap(&self, other: &Box2d) -> bool {
        let ours = self.corners();
        let theirs = other.corners();
        [self.axis, rot90(self.axis), other.axis, rot90(other.axis)]
            .into_iter()
            .all(|axis| {
                let a = project_onto_axis(&ours, axis);
                let b = project_onto_axis(&theirs, axis);
                a.max >= b.min && b.max >= a.min
            })
    }
}

fn project_onto_axis(corners: &[Point2d; 4], axis: Vector2d) -> Interval<f64> {
    corners.iter().map(|c| c.to_vec().dot(axis)).fold(
        Interval::new(f64::INFINITY, f64::NEG_INFINITY),
        |acc, d| Interval::new(f64::min(acc.min, d), f64::max(acc.max, d)),
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn corners_follow_heading() {
        let b = Box2d::new(Point2d::new(0.0, 0.0), std::f64::consts::FRAC_PI_2, 4.0, 2.0);
        let corners = b.corners();
        assert_approx_eq!(corners[0].x, 1.0);
        assert_approx_eq!(corners[0].y, -2.0);
        assert_approx_eq!(corners[2].x, -1.0);
        assert_approx_eq!(corners[2].y, 2.0);
    }

    #[test]
    fn axis_aligned_overlap() {
        let a = Box2d::new(Point2d::new(0.0, 0.0), 0.0, 4.0, 2.0);
        let b = Box2d::new(Point2d::new(3.5, 0.0), 0.0, 4.0, 2.0);
        let c = Box2d::new(Point2d::new(4.5, 0.0), 0.0, 4.0, 2.0);
        assert!(a.has_overlap(&b));
        assert!(b.has_overlap(&a));
        assert!(!a.has_overlap(&c));
    }

    #[test]
    fn rotated_boxes_separated_by_diagonal() {
        // The axis-aligned bounds of these boxes overlap, but the boxes don't.
        let a = Box2d::new(Point2d::new(0.0, 0.0), FRAC_PI_4, 4.0, 0.5);
        let b = Box2d::new(Point2d::new(1.2, -1.2), FRAC_PI_4, 4.0, 0.5);
        assert!(!a.has_overlap(&b));

        let c = Box2d::new(Point2d::new(0.2, -0.2), FRAC_PI_4, 4.0, 0.5);
        assert!(a.has_overlap(&c));
    }
}
