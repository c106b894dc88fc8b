use crate::math::{ParametricCurve2d, Point2d};
use crate::reference_line::ReferenceLine;
use std::collections::HashMap;

/// Resolves lane-relative references to world coordinates.
pub trait LaneMap {
    /// Returns the point at arc length `s` along the centre of the lane,
    /// or `None` if the lane is unknown.
    fn lane_point(&self, lane_id: &str, s: f64) -> Option<Point2d>;
}

impl<T: LaneMap + ?Sized> LaneMap for &T {
    fn lane_point(&self, lane_id: &str, s: f64) -> Option<Point2d> {
        (**self).lane_point(lane_id, s)
    }
}

/// A map made of lane centre lines keyed by lane ID.
impl LaneMap for HashMap<String, ReferenceLine> {
    fn lane_point(&self, lane_id: &str, s: f64) -> Option<Point2d> {
        self.get(lane_id).map(|lane| lane.sample(s))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn lane_points_are_sampled_by_arc_length() {
        let mut lanes = HashMap::new();
        lanes.insert(
            "lane_1".to_string(),
            ReferenceLine::new(vec![Point2d::new(0.0, 2.0), Point2d::new(0.0, 12.0)]),
        );
        let p = lanes.lane_point("lane_1", 4.0).unwrap();
        assert_approx_eq!(p.x, 0.0);
        assert_approx_eq!(p.y, 6.0);
        assert!(lanes.lane_point("lane_2", 4.0).is_none());
    }
}
