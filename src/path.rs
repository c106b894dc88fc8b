use crate::math::{ParametricCurve2d, Point2d};
use cgmath::prelude::*;
use serde::{Deserialize, Serialize};

/// A point on the planned path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    /// The heading in radians.
    pub theta: f64,
    /// The arc length from the start of the path in m.
    pub s: f64,
}

/// A point of a planned or predicted trajectory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub path_point: PathPoint,
    /// Speed in m/s.
    #[serde(default)]
    pub v: f64,
    /// Acceleration in m/s^2.
    #[serde(default)]
    pub a: f64,
    /// Time relative to the start of the trajectory, in s.
    pub relative_time: f64,
}

/// The path produced by the path planner, ordered by non-decreasing `s`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathData {
    points: Vec<PathPoint>,
}

impl PathPoint {
    pub fn new(x: f64, y: f64, theta: f64, s: f64) -> Self {
        Self { x, y, theta, s }
    }

    pub fn position(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }
}

impl PathData {
    pub fn new(points: Vec<PathPoint>) -> Self {
        Self { points }
    }

    /// Discretises a curve into path points spaced roughly `step` apart in `t`.
    /// The final sample always lands on the end of the curve.
    ///
    /// Returns `None` unless `step` is finite and positive.
    pub fn sample_curve(curve: &impl ParametricCurve2d, step: f64) -> Option<Self> {
        if !(step.is_finite() && step > 0.0) {
            return None;
        }
        let bounds = curve.bounds();
        let count = (bounds.length() / step).ceil().max(1.0) as usize;
        let mut points: Vec<PathPoint> = Vec::with_capacity(count.saturating_add(1));
        for i in 0..=count {
            let t = f64::min(bounds.min + i as f64 * step, bounds.max);
            let pos = curve.sample(t);
            let dir = curve.sample_dt(t);
            let s = points
                .last()
                .map(|prev| prev.s + pos.distance(prev.position()))
                .unwrap_or(0.0);
            points.push(PathPoint::new(pos.x, pos.y, dir.y.atan2(dir.x), s));
        }
        Some(Self { points })
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn num_of_points(&self) -> usize {
        self.points.len()
    }
}

impl FromIterator<PathPoint> for PathData {
    fn from_iter<I: IntoIterator<Item = PathPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
