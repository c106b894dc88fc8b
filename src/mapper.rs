use crate::boundary::StGraphBoundary;
use crate::config::{StBoundaryConfig, VehicleParam};
use crate::error::{MappingError, Result};
use crate::map::LaneMap;
use crate::obstacle::{Decision, DecisionData, Obstacle};
use crate::path::{PathData, TrajectoryPoint};
use crate::reference_line::ReferenceLine;
use log::{debug, error, warn};

mod dynamic;
mod overlap;
mod stop;

pub use dynamic::UNBOUNDED_START_TIME;

/// Converts one planning cycle's decisions into forbidden regions of the ST plane.
#[derive(Clone, Debug)]
pub struct BoundaryMapper<M> {
    config: StBoundaryConfig,
    vehicle: VehicleParam,
    lane_map: M,
}

/// The inputs of one mapping call.
#[derive(Clone, Copy)]
pub struct MappingRequest<'a> {
    /// The point the planned trajectory starts from.
    pub initial_point: &'a TrajectoryPoint,
    /// The main decision and the obstacles with their decisions.
    pub decisions: &'a DecisionData,
    /// The planned path that stations are measured along.
    pub path: &'a PathData,
    /// The reference line stop lines are projected onto.
    pub reference_line: &'a ReferenceLine,
    /// The planning horizon in m.
    pub planning_distance: f64,
    /// The planning horizon in s.
    pub planning_time: f64,
    /// The current vehicle-state timestamp in s.
    /// Predicted obstacle times are made relative to it.
    pub timestamp: f64,
}

impl<M: LaneMap> BoundaryMapper<M> {
    /// Creates a new mapper.
    pub fn new(config: StBoundaryConfig, vehicle: VehicleParam, lane_map: M) -> Self {
        Self {
            config,
            vehicle,
            lane_map,
        }
    }

    pub fn config(&self) -> &StBoundaryConfig {
        &self.config
    }

    pub fn vehicle(&self) -> &VehicleParam {
        &self.vehicle
    }

    /// Maps the request's decisions onto ST boundaries, replacing the contents of `out`.
    ///
    /// Boundaries are emitted in order: the main decision's, then those of each
    /// dynamic obstacle in input order. On error, `out` is left empty.
    pub fn get_graph_boundary(
        &self,
        request: &MappingRequest,
        out: &mut Vec<StGraphBoundary>,
    ) -> Result<()> {
        out.clear();
        let result = self
            .check_preconditions(request)
            .and_then(|_| self.map_decisions(request, out));
        if result.is_err() {
            out.clear();
        }
        result
    }

    fn check_preconditions(&self, request: &MappingRequest) -> Result<()> {
        // Written negated so that a NaN time is rejected too
        if !(request.planning_time >= 0.0) {
            let msg = format!("planning_time {} < 0", request.planning_time);
            error!("Fail to get params since {}.", msg);
            return Err(MappingError::Precondition(msg));
        }
        let num_points = request.path.num_of_points();
        if num_points < 2 {
            let msg = format!("too few path points ({})", num_points);
            error!("Fail to get params because of {}.", msg);
            return Err(MappingError::Precondition(msg));
        }
        Ok(())
    }

    fn map_decisions(
        &self,
        request: &MappingRequest,
        out: &mut Vec<StGraphBoundary>,
    ) -> Result<()> {
        let decisions = request.decisions;

        let main_boundary = match &decisions.main_decision {
            Decision::Stop(stop) => self.map_main_decision_stop(
                stop,
                request.reference_line,
                request.planning_distance,
                request.planning_time,
            )?,
            Decision::MissionComplete => self.map_mission_complete(
                request.reference_line,
                request.planning_distance,
                request.planning_time,
            ),
            Decision::Follow { .. }
            | Decision::Yield { .. }
            | Decision::Overtake { .. }
            | Decision::None => None,
        };
        out.extend(main_boundary);

        for obstacle in &decisions.static_obstacles {
            self.map_obstacle_without_trajectory(request, obstacle, out)
                .map_err(|err| {
                    error!(
                        "Fail to map static obstacle with id[{}]: {}",
                        obstacle.id, err
                    );
                    err
                })?;
        }

        for obstacle in &decisions.dynamic_obstacles {
            for decision in &obstacle.decisions {
                match decision {
                    Decision::Follow { .. } => {
                        self.map_obstacle_with_planning(request, obstacle, out)
                            .map_err(|err| {
                                error!(
                                    "Fail to map follow dynamic obstacle with id {}: {}",
                                    obstacle.id, err
                                );
                                err
                            })?;
                    }
                    Decision::Yield { .. } | Decision::Overtake { .. } => {
                        let mapped = self.map_obstacle_with_prediction_trajectory(
                            obstacle,
                            decision,
                            request.path,
                            request.timestamp,
                        );
                        let failed = match mapped {
                            Ok(Some(boundary)) => {
                                out.push(boundary);
                                false
                            }
                            Ok(None) => {
                                warn!(
                                    "Dynamic obstacle with id {} produced no {} boundary.",
                                    obstacle.id, decision
                                );
                                true
                            }
                            Err(err) => {
                                error!(
                                    "Fail to map dynamic obstacle with id {}: {}",
                                    obstacle.id, err
                                );
                                true
                            }
                        };
                        if failed && self.config.legacy_obstacle_short_circuit {
                            debug!("Skip remaining obstacles after {}.", obstacle.id);
                            return Ok(());
                        }
                    }
                    Decision::Stop(_) | Decision::MissionComplete | Decision::None => {}
                }
            }
        }
        Ok(())
    }

    /// Maps an obstacle that has no predicted motion. Static obstacles
    /// currently contribute no boundaries.
    fn map_obstacle_without_trajectory(
        &self,
        _request: &MappingRequest,
        _obstacle: &Obstacle,
        _out: &mut Vec<StGraphBoundary>,
    ) -> Result<()> {
        Ok(())
    }

    /// Maps a followed obstacle against the planned trajectory.
    /// Followed obstacles currently contribute no boundaries.
    fn map_obstacle_with_planning(
        &self,
        _request: &MappingRequest,
        _obstacle: &Obstacle,
        _out: &mut Vec<StGraphBoundary>,
    ) -> Result<()> {
        Ok(())
    }
}
