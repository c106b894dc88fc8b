use super::BoundaryMapper;
use crate::boundary::{polygon_area, BoundaryType, StGraphBoundary, StPoint};
use crate::error::{MappingError, Result};
use crate::map::LaneMap;
use crate::obstacle::StopLine;
use crate::reference_line::ReferenceLine;
use log::{debug, error, warn};

impl<M: LaneMap> BoundaryMapper<M> {
    /// Builds the boundary blocking everything past a stop line.
    /// Returns `None` if the stop line lies beyond the reachable horizon.
    pub(crate) fn map_main_decision_stop(
        &self,
        stop: &StopLine,
        reference_line: &ReferenceLine,
        planning_distance: f64,
        planning_time: f64,
    ) -> Result<Option<StGraphBoundary>> {
        let map_point = self
            .lane_map
            .lane_point(&stop.lane_id, stop.distance_s)
            .ok_or_else(|| {
                error!("Fail to map_main_decision_stop since lane {} is unknown.", stop.lane_id);
                MappingError::LaneNotFound(stop.lane_id.clone())
            })?;
        let sl_point = reference_line.to_frenet(map_point).ok_or_else(|| {
            error!("Fail to map_main_decision_stop since to_frenet failed.");
            MappingError::Projection {
                x: map_point.x,
                y: map_point.y,
            }
        })?;

        let backward = self.config.backward_routing_distance;
        let stop_rear_center_s = sl_point.s
            - backward
            - self.config.decision_valid_stop_range
            - self.vehicle.front_edge_to_center;
        if stop_rear_center_s < 0.0 {
            error!(
                "Fail to map main_decision_stop since stop_rear_center_s[{}] behind adc.",
                stop_rear_center_s
            );
        } else if stop_rear_center_s >= reference_line.length() - backward {
            warn!(
                "Skip to map_main_decision_stop since stop_rear_center_s[{}] > path length[{}].",
                stop_rear_center_s,
                reference_line.length()
            );
            return Ok(None);
        }

        let s_min = f64::max(stop_rear_center_s, 0.0);
        let s_max = f64::max(s_min + 1.0, f64::max(planning_distance, reference_line.length()));
        Ok(self.full_horizon_boundary(s_min, s_max, planning_time, BoundaryType::Stop))
    }

    /// Builds the boundary blocking everything past the success tunnel.
    pub(crate) fn map_mission_complete(
        &self,
        reference_line: &ReferenceLine,
        planning_distance: f64,
        planning_time: f64,
    ) -> Option<StGraphBoundary> {
        let s_min = self.config.success_tunnel;
        let s_max = f64::min(
            planning_distance,
            reference_line.length() - self.config.backward_routing_distance,
        );
        self.full_horizon_boundary(s_min, s_max, planning_time, BoundaryType::MissionComplete)
    }

    /// A trapezoid covering stations from `s_min` up for the whole horizon,
    /// with its far edge widened by the boundary buffer at the horizon's end.
    fn full_horizon_boundary(
        &self,
        s_min: f64,
        s_max: f64,
        planning_time: f64,
        boundary_type: BoundaryType,
    ) -> Option<StGraphBoundary> {
        let buffer = self.config.boundary_buffer;
        let points = [
            StPoint::new(s_min, 0.0),
            StPoint::new(s_min, planning_time),
            StPoint::new(s_max + buffer, planning_time),
            StPoint::new(s_max, 0.0),
        ];
        if polygon_area(&points) <= 0.0 {
            debug!("Skip degenerate {:?} boundary: s in [{}, {}].", boundary_type, s_min, s_max);
            return None;
        }
        Some(StGraphBoundary::new(points, boundary_type, buffer))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{StBoundaryConfig, VehicleParam};
    use crate::math::Point2d;
    use assert_approx_eq::assert_approx_eq;
    use std::collections::HashMap;

    fn straight_line(length: f64) -> ReferenceLine {
        ReferenceLine::new(vec![Point2d::new(0.0, 0.0), Point2d::new(length, 0.0)])
    }

    fn mapper() -> BoundaryMapper<HashMap<String, ReferenceLine>> {
        mapper_with(1.0, 1.0)
    }

    fn mapper_with(
        stop_range: f64,
        front_overhang: f64,
    ) -> BoundaryMapper<HashMap<String, ReferenceLine>> {
        let config = StBoundaryConfig {
            backward_routing_distance: 5.0,
            decision_valid_stop_range: stop_range,
            boundary_buffer: 0.5,
            success_tunnel: 2.0,
            ..Default::default()
        };
        let vehicle = VehicleParam {
            front_edge_to_center: front_overhang,
            ..Default::default()
        };
        let mut lanes = HashMap::new();
        lanes.insert("lane".to_string(), straight_line(200.0));
        BoundaryMapper::new(config, vehicle, lanes)
    }

    fn stop_at(distance_s: f64) -> StopLine {
        StopLine {
            lane_id: "lane".to_string(),
            distance_s,
        }
    }

    #[test]
    fn stop_boundary_starts_behind_stop_line() {
        let boundary = mapper()
            .map_main_decision_stop(&stop_at(50.0), &straight_line(100.0), 80.0, 8.0)
            .unwrap()
            .unwrap();
        let points = boundary.points();
        assert_eq!(boundary.boundary_type(), BoundaryType::Stop);
        assert_approx_eq!(points[0].s, 43.0);
        assert_approx_eq!(points[1].s, 43.0);
        assert_approx_eq!(points[1].t, 8.0);
        assert_approx_eq!(points[2].s, 100.5);
        assert_approx_eq!(points[3].s, 100.0);
        assert_approx_eq!(boundary.characteristic_length(), 0.5);
        assert!(boundary.area() > 0.0);
    }

    #[test]
    fn stop_behind_vehicle_is_clamped() {
        let boundary = mapper()
            .map_main_decision_stop(&stop_at(3.0), &straight_line(100.0), 80.0, 8.0)
            .unwrap()
            .unwrap();
        assert_approx_eq!(boundary.points()[0].s, 0.0);
    }

    #[test]
    fn stop_beyond_horizon_is_skipped() {
        // 100 - 5 - 0 - 0 = 95 >= 100 - 5
        let line = straight_line(100.0);
        let mapped =
            mapper_with(0.0, 0.0).map_main_decision_stop(&stop_at(100.0), &line, 80.0, 8.0);
        assert_eq!(mapped, Ok(None));
    }

    #[test]
    fn zero_planning_time_is_degenerate() {
        let mapped =
            mapper().map_main_decision_stop(&stop_at(50.0), &straight_line(100.0), 80.0, 0.0);
        assert_eq!(mapped, Ok(None));
    }

    #[test]
    fn unknown_lane_is_fatal() {
        let stop = StopLine {
            lane_id: "missing".to_string(),
            distance_s: 10.0,
        };
        let mapped = mapper().map_main_decision_stop(&stop, &straight_line(100.0), 80.0, 8.0);
        assert_eq!(mapped, Err(MappingError::LaneNotFound("missing".to_string())));
    }

    #[test]
    fn unprojectable_stop_is_fatal() {
        let mapped =
            mapper().map_main_decision_stop(&stop_at(150.0), &straight_line(100.0), 80.0, 8.0);
        assert!(matches!(mapped, Err(MappingError::Projection { .. })));
    }

    #[test]
    fn mission_complete_blocks_past_success_tunnel() {
        let boundary = mapper()
            .map_mission_complete(&straight_line(100.0), 60.0, 8.0)
            .unwrap();
        assert_eq!(boundary.boundary_type(), BoundaryType::MissionComplete);
        let points = boundary.points();
        assert_approx_eq!(points[0].s, 2.0);
        assert_approx_eq!(points[3].s, 60.0);
        assert_approx_eq!(points[2].s, 60.5);
    }

    #[test]
    fn mission_complete_within_success_tunnel_is_skipped() {
        // s_max = min(60, 6 - 5) = 1 < success tunnel
        assert!(mapper().map_mission_complete(&straight_line(6.0), 60.0, 8.0).is_none());
    }
}
