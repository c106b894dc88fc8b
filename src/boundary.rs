use crate::math::{signed_area, Point2d};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A point in the station-time plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StPoint {
    /// Station (arc length along the path) in m.
    pub s: f64,
    /// Time in s.
    pub t: f64,
}

impl StPoint {
    pub const fn new(s: f64, t: f64) -> Self {
        Self { s, t }
    }
}

/// The reason a region of the ST plane is forbidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryType {
    Stop,
    Follow,
    Yield,
    Overtake,
    MissionComplete,
    #[default]
    Unknown,
}

/// A forbidden region of the ST plane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StGraphBoundary {
    points: SmallVec<[StPoint; 4]>,
    boundary_type: BoundaryType,
    /// The buffer the boundary was built with, in m.
    characteristic_length: f64,
}

impl StGraphBoundary {
    /// Creates a boundary from its vertices, ordered counter-clockwise
    /// with time on the horizontal axis and station on the vertical axis.
    pub fn new(
        points: impl IntoIterator<Item = StPoint>,
        boundary_type: BoundaryType,
        characteristic_length: f64,
    ) -> Self {
        Self {
            points: points.into_iter().collect(),
            boundary_type,
            characteristic_length,
        }
    }

    pub fn points(&self) -> &[StPoint] {
        &self.points
    }

    pub fn boundary_type(&self) -> BoundaryType {
        self.boundary_type
    }

    pub fn characteristic_length(&self) -> f64 {
        self.characteristic_length
    }

    /// The signed area enclosed by the vertices, in m·s.
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    /// The smallest and largest station of any vertex.
    pub fn s_range(&self) -> (f64, f64) {
        self.points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (f64::min(lo, p.s), f64::max(hi, p.s))
        })
    }
}

/// Signed area of an ST polygon, taking `t` as x and `s` as y.
pub(crate) fn polygon_area(points: &[StPoint]) -> f64 {
    let points: SmallVec<[Point2d; 4]> = points.iter().map(|p| Point2d::new(p.t, p.s)).collect();
    signed_area(&points)
}
