use super::overlap::{locate_overlap, obstacle_box};
use super::BoundaryMapper;
use crate::boundary::{polygon_area, BoundaryType, StGraphBoundary, StPoint};
use crate::config::{StBoundaryConfig, VehicleParam};
use crate::error::{MappingError, Result};
use crate::map::LaneMap;
use crate::obstacle::{Decision, Obstacle, PredictionTrajectory};
use crate::path::PathData;
use log::{debug, info, warn};

/// The start time given to a followed obstacle's boundary, in s.
/// Being before the cycle start, it marks the region as blocked from the outset.
pub const UNBOUNDED_START_TIME: f64 = -1.0;

/// Distance kept to a yielded obstacle whose envelope starts closer than the
/// requested gap, in m.
const YIELD_FALLBACK_DISTANCE: f64 = 2.0;

/// The running lower and upper station samples of an obstacle's overlap with
/// the path, gathered over all of its predicted trajectories.
#[derive(Default)]
struct Envelope {
    lower: Vec<StPoint>,
    upper: Vec<StPoint>,
}

impl<M: LaneMap> BoundaryMapper<M> {
    /// Builds the boundary of an obstacle from the envelope of all its
    /// predicted trajectories.
    ///
    /// `None` means the obstacle never comes close enough to the path to
    /// constrain the vehicle, or its boundary encloses no area.
    pub(crate) fn map_obstacle_with_prediction_trajectory(
        &self,
        obstacle: &Obstacle,
        decision: &Decision,
        path: &PathData,
        timestamp: f64,
    ) -> Result<Option<StGraphBoundary>> {
        if !matches!(
            decision,
            Decision::Follow { .. } | Decision::Yield { .. } | Decision::Overtake { .. }
        ) {
            return Err(MappingError::UnsupportedDecision(decision.to_string()));
        }
        let valid_size = |x: f64| x.is_finite() && x > 0.0;
        if !valid_size(obstacle.length) || !valid_size(obstacle.width) {
            return Err(MappingError::ObstacleMapping {
                id: obstacle.id.clone(),
                reason: format!("invalid size {} x {}", obstacle.length, obstacle.width),
            });
        }
        if obstacle.trajectories.is_empty() {
            warn!("Obstacle (id = {}) has NO prediction trajectory.", obstacle.id);
        }

        let mut envelope = Envelope::default();
        for trajectory in &obstacle.trajectories {
            self.trace_envelope(&mut envelope, obstacle, trajectory, decision, path, timestamp);
        }
        let mut points = match envelope_polygon(&envelope, &self.config) {
            Some(points) => points,
            None => return Ok(None),
        };
        let boundary_type = adjust_for_decision(
            &mut points,
            decision,
            obstacle.speed,
            &self.config,
            &self.vehicle,
        );
        if polygon_area(&points) <= 0.0 {
            debug!("Discard degenerate {} boundary of obstacle {}.", decision, obstacle.id);
            return Ok(None);
        }
        Ok(Some(StGraphBoundary::new(
            points,
            boundary_type,
            self.config.follow_buffer,
        )))
    }

    /// Appends the stations where the vehicle overlaps the obstacle at each
    /// point of `trajectory` to the envelope.
    fn trace_envelope(
        &self,
        envelope: &mut Envelope,
        obstacle: &Obstacle,
        trajectory: &PredictionTrajectory,
        decision: &Decision,
        path: &PathData,
        timestamp: f64,
    ) {
        for (j, point) in trajectory.points.iter().enumerate() {
            let t = point.relative_time + trajectory.start_timestamp - timestamp;
            let obs_box = obstacle_box(point, obstacle, self.config.expanding_coeff);
            match locate_overlap(path.points(), &obs_box, &self.vehicle, &self.config) {
                Some(interval) => {
                    envelope.lower.push(StPoint::new(interval.min, t));
                    envelope.upper.push(StPoint::new(interval.max, t));
                }
                None => {
                    if matches!(decision, Decision::Yield { .. } | Decision::Overtake { .. }) {
                        info!("Point[{}] cannot find low or high index.", j);
                    }
                }
            }
        }
    }
}

/// Spans the first and last envelope samples with a quadrilateral, padded by
/// the follow buffer.
fn envelope_polygon(envelope: &Envelope, config: &StBoundaryConfig) -> Option<[StPoint; 4]> {
    let (lower_first, lower_last) = (envelope.lower.first()?, envelope.lower.last()?);
    let (upper_first, upper_last) = (envelope.upper.first()?, envelope.upper.last()?);
    if lower_first.t > lower_last.t || upper_first.t > upper_last.t {
        warn!("lower/upper points are reversed.");
    }

    let buffer = config.follow_buffer;
    Some([
        StPoint::new(lower_first.s - buffer, lower_first.t),
        StPoint::new(lower_last.s - buffer, lower_last.t),
        StPoint::new(upper_last.s + buffer + config.boundary_buffer, upper_last.t),
        StPoint::new(upper_first.s + buffer, upper_first.t),
    ])
}

/// Shifts the boundary vertices according to the decision taken for the obstacle.
fn adjust_for_decision(
    points: &mut [StPoint; 4],
    decision: &Decision,
    obstacle_speed: f64,
    config: &StBoundaryConfig,
    vehicle: &VehicleParam,
) -> BoundaryType {
    match *decision {
        Decision::Follow { distance_s } => {
            let follow_distance =
                f64::max(obstacle_speed * config.minimal_follow_time, distance_s.abs())
                    + vehicle.front_edge_to_center;
            points[0].s -= follow_distance;
            points[1].s -= follow_distance;
            points[3].t = UNBOUNDED_START_TIME;
            BoundaryType::Follow
        }
        Decision::Yield { distance_s } => {
            let dis = distance_s.abs();
            // Both lower vertices are placed relative to the first one.
            let base = points[0].s;
            let s = if base - dis < 0.0 {
                f64::max(base - YIELD_FALLBACK_DISTANCE, 0.0)
            } else {
                f64::max(base - dis, 0.0)
            };
            points[0].s = s;
            points[1].s = s;
            BoundaryType::Yield
        }
        Decision::Overtake { distance_s } => {
            let dis = distance_s.abs();
            points[2].s += dis;
            points[3].s += dis;
            BoundaryType::Overtake
        }
        Decision::Stop(_) | Decision::MissionComplete | Decision::None => BoundaryType::Unknown,
    }
}
