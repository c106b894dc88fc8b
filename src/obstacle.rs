use crate::path::TrajectoryPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stop line, expressed as a position along a lane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopLine {
    pub lane_id: String,
    /// Arc length along the lane in m.
    pub distance_s: f64,
}

/// A decision taken by the behaviour layer, either for the whole scene
/// or for a single obstacle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Stop before the given line.
    Stop(StopLine),
    /// The destination has been reached.
    MissionComplete,
    /// Stay behind the obstacle, at least `distance_s` m.
    Follow { distance_s: f64 },
    /// Let the obstacle pass first, keeping `distance_s` m clear.
    Yield { distance_s: f64 },
    /// Pass ahead of the obstacle, keeping `distance_s` m clear.
    Overtake { distance_s: f64 },
    #[default]
    None,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Decision::Stop(_) => "stop",
            Decision::MissionComplete => "mission_complete",
            Decision::Follow { .. } => "follow",
            Decision::Yield { .. } => "yield",
            Decision::Overtake { .. } => "overtake",
            Decision::None => "none",
        };
        f.write_str(name)
    }
}

/// One predicted future motion of an obstacle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionTrajectory {
    /// The timestamp the point times are relative to, in s.
    pub start_timestamp: f64,
    pub points: Vec<TrajectoryPoint>,
}

/// A static or moving obstacle perceived around the vehicle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: String,
    /// The length of the obstacle in m.
    pub length: f64,
    /// The width of the obstacle in m.
    pub width: f64,
    /// The speed of the obstacle in m/s.
    pub speed: f64,
    #[serde(default)]
    pub trajectories: Vec<PredictionTrajectory>,
    #[serde(default)]
    pub decisions: Vec<Decision>,
}

/// The decisions for one planning cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionData {
    /// The decision applying to the scene as a whole.
    pub main_decision: Decision,
    pub static_obstacles: Vec<Obstacle>,
    pub dynamic_obstacles: Vec<Obstacle>,
}

impl DecisionData {
    /// Assembles decision data from collaborator-supplied obstacle lists,
    /// dropping missing entries.
    pub fn from_nullable(
        main_decision: Decision,
        static_obstacles: impl IntoIterator<Item = Option<Obstacle>>,
        dynamic_obstacles: impl IntoIterator<Item = Option<Obstacle>>,
    ) -> Self {
        Self {
            main_decision,
            static_obstacles: static_obstacles.into_iter().flatten().collect(),
            dynamic_obstacles: dynamic_obstacles.into_iter().flatten().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_obstacles_are_dropped() {
        let obstacle = |id: &str| Obstacle {
            id: id.to_string(),
            length: 4.0,
            width: 2.0,
            ..Default::default()
        };
        let data = DecisionData::from_nullable(
            Decision::MissionComplete,
            [None, Some(obstacle("a"))],
            [Some(obstacle("b")), None, Some(obstacle("c"))],
        );
        assert_eq!(data.static_obstacles.len(), 1);
        let ids: Vec<_> = data.dynamic_obstacles.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn decisions_deserialize_from_tagged_json() {
        let decisions: Vec<Decision> = serde_json::from_str(
            r#"[
                { "stop": { "lane_id": "l1", "distance_s": 3.0 } },
                "mission_complete",
                { "yield": { "distance_s": 5.0 } },
                "none"
            ]"#,
        )
        .unwrap();
        assert_eq!(
            decisions[0],
            Decision::Stop(StopLine {
                lane_id: "l1".to_string(),
                distance_s: 3.0
            })
        );
        assert_eq!(decisions[1], Decision::MissionComplete);
        assert_eq!(decisions[2], Decision::Yield { distance_s: 5.0 });
        assert_eq!(decisions[3].to_string(), "none");
    }
}
