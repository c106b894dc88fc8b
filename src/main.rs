use std::collections::HashMap;
use std::error::Error;
use std::time::Instant;

use serde::Deserialize;
use st_boundary::{
    BoundaryMapper, DecisionData, MappingRequest, PathData, ReferenceLine, StBoundaryConfig,
    TrajectoryPoint, VehicleParam,
};

/// One planning cycle's inputs, as stored on disk.
#[derive(Deserialize)]
struct Scene {
    #[serde(default)]
    config: StBoundaryConfig,
    #[serde(default)]
    vehicle: VehicleParam,
    #[serde(default)]
    lanes: HashMap<String, ReferenceLine>,
    reference_line: ReferenceLine,
    path: PathData,
    #[serde(default)]
    initial_point: TrajectoryPoint,
    #[serde(default)]
    decisions: DecisionData,
    planning_distance: f64,
    planning_time: f64,
    #[serde(default)]
    timestamp: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let scene_path = std::env::args()
        .nth(1)
        .ok_or("usage: st-boundary <scene.json>")?;
    let content = std::fs::read_to_string(&scene_path)?;
    let scene: Scene = serde_json::from_str(&content)?;

    let mapper = BoundaryMapper::new(scene.config, scene.vehicle, &scene.lanes);
    let request = MappingRequest {
        initial_point: &scene.initial_point,
        decisions: &scene.decisions,
        path: &scene.path,
        reference_line: &scene.reference_line,
        planning_distance: scene.planning_distance,
        planning_time: scene.planning_time,
        timestamp: scene.timestamp,
    };

    let mut boundaries = vec![];
    mapper.get_graph_boundary(&request, &mut boundaries)?;
    println!("{}", serde_json::to_string_pretty(&boundaries)?);

    const NUM_RUNS: u32 = 1000;
    let start = Instant::now();
    for _ in 0..NUM_RUNS {
        mapper.get_graph_boundary(&request, &mut boundaries)?;
    }
    let per_call = start.elapsed() / NUM_RUNS;
    eprintln!(
        "Avg. mapping: {:?} for {} boundaries ({} dynamic obstacles)",
        per_call,
        boundaries.len(),
        scene.decisions.dynamic_obstacles.len(),
    );
    Ok(())
}
