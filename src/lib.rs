//! Maps a planning cycle's driving decisions and the predicted motion of
//! obstacles onto forbidden regions of the station-time plane.

pub use cgmath;
pub use boundary::{BoundaryType, StGraphBoundary, StPoint};
pub use config::{StBoundaryConfig, VehicleParam};
pub use error::{ConfigError, MappingError};
pub use map::LaneMap;
pub use mapper::{BoundaryMapper, MappingRequest, UNBOUNDED_START_TIME};
pub use obstacle::{Decision, DecisionData, Obstacle, PredictionTrajectory, StopLine};
pub use path::{PathData, PathPoint, TrajectoryPoint};
pub use reference_line::{ReferenceLine, SlPoint};
pub use util::Interval;

mod boundary;
mod config;
mod error;
mod map;
mod mapper;
pub mod math;
mod obstacle;
mod path;
mod reference_line;
mod util;
