use crate::math::{project_local, rot90, ParametricCurve2d, Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;
use serde::{Deserialize, Serialize};

/// Projections may fall this far past either end of the line, in m.
const END_TOLERANCE: f64 = 1e-6;

/// A position in the Frenet frame of a [ReferenceLine].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlPoint {
    /// Arc length along the reference line in m.
    pub s: f64,
    /// Lateral offset in m, positive to the left.
    pub l: f64,
}

/// The centre line that station coordinates are measured along,
/// represented as a polyline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Point2d>", into = "Vec<Point2d>")]
pub struct ReferenceLine {
    points: Vec<Point2d>,
    /// Cumulative arc length at each point.
    accumulated_s: Vec<f64>,
}

impl ReferenceLine {
    /// Creates a reference line through the given points.
    pub fn new(points: Vec<Point2d>) -> Self {
        let accumulated_s = points
            .iter()
            .scan(None, |prev: &mut Option<(Point2d, f64)>, p| {
                let s = prev.map(|(q, s)| s + p.distance(q)).unwrap_or(0.0);
                *prev = Some((*p, s));
                Some(s)
            })
            .collect();
        Self {
            points,
            accumulated_s,
        }
    }

    /// The total length of the line in m.
    pub fn length(&self) -> f64 {
        self.accumulated_s.last().copied().unwrap_or(0.0)
    }

    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    /// Projects a point into the line's Frenet frame.
    ///
    /// Returns `None` if the line has fewer than two points,
    /// or if the closest point lies beyond either end of the line.
    pub fn to_frenet(&self, point: Point2d) -> Option<SlPoint> {
        if self.points.len() < 2 {
            return None;
        }
        let last_segment = self.points.len() - 2;
        let (idx, local, _) = self
            .points
            .windows(2)
            .enumerate()
            .filter_map(|(idx, seg)| {
                let span = seg[1] - seg[0];
                let seg_len = span.magnitude();
                if seg_len <= 0.0 {
                    return None;
                }
                let tan = span / seg_len;
                let local = project_local(point, seg[0], tan, rot90(tan));
                let along = local.x.clamp(0.0, seg_len);
                let dist = (local.x - along).hypot(local.y);
                Some((idx, local, dist))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2))?;

        let seg_len = self.accumulated_s[idx + 1] - self.accumulated_s[idx];
        if (idx == 0 && local.x < -END_TOLERANCE)
            || (idx == last_segment && local.x > seg_len + END_TOLERANCE)
        {
            return None;
        }
        Some(SlPoint {
            s: self.accumulated_s[idx] + local.x.clamp(0.0, seg_len),
            l: local.y,
        })
    }

    /// Finds the segment containing arc length `s`, clamped to the line.
    fn segment_at(&self, s: f64) -> usize {
        let idx = self.accumulated_s.partition_point(|&acc| acc <= s);
        idx.clamp(1, self.points.len() - 1) - 1
    }
}

impl ParametricCurve2d for ReferenceLine {
    /// Samples the point at arc length `t`.
    fn sample(&self, t: f64) -> Point2d {
        match self.points.len() {
            0 => Point2d::origin(),
            1 => self.points[0],
            _ => {
                let idx = self.segment_at(t);
                let s0 = self.accumulated_s[idx];
                let seg_len = self.accumulated_s[idx + 1] - s0;
                if seg_len <= 0.0 {
                    return self.points[idx];
                }
                let f = ((t - s0) / seg_len).clamp(0.0, 1.0);
                self.points[idx] + (self.points[idx + 1] - self.points[idx]) * f
            }
        }
    }

    fn bounds(&self) -> Interval<f64> {
        Interval::new(0.0, self.length())
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        if self.points.len() < 2 {
            return Vector2d::new(0.0, 0.0);
        }
        let idx = self.segment_at(t);
        let span = self.points[idx + 1] - self.points[idx];
        if span.magnitude2() > 0.0 {
            span.normalize()
        } else {
            Vector2d::new(0.0, 0.0)
        }
    }
}

impl From<Vec<Point2d>> for ReferenceLine {
    fn from(points: Vec<Point2d>) -> Self {
        Self::new(points)
    }
}

impl From<ReferenceLine> for Vec<Point2d> {
    fn from(line: ReferenceLine) -> Self {
        line.points
    }
}
