//! Tunable parameters of the boundary mapper and the ego vehicle's geometry.

use crate::error::ConfigError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

/// Parameters controlling how decisions are turned into ST boundaries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StBoundaryConfig {
    /// Widening of the far edge of every boundary, in m.
    pub boundary_buffer: f64,
    /// Margin added around obstacle envelopes, in m.
    pub follow_buffer: f64,
    /// Longitudinal extension of each overlap sample, in m.
    pub point_extension: f64,
    /// Scale factor applied to obstacle footprints.
    pub expanding_coeff: f64,
    /// The minimum time gap kept behind a followed obstacle, in s.
    pub minimal_follow_time: f64,
    /// Station before which a mission is never considered complete, in m.
    pub success_tunnel: f64,
    /// Offset of the reference line's origin behind the vehicle, in m.
    pub backward_routing_distance: f64,
    /// Distance kept before a stop line, in m.
    pub decision_valid_stop_range: f64,
    /// When set, a yield/overtake obstacle that yields no boundary ends the
    /// whole mapping call successfully instead of being skipped.
    pub legacy_obstacle_short_circuit: bool,
}

impl Default for StBoundaryConfig {
    fn default() -> Self {
        Self {
            boundary_buffer: 0.1,
            follow_buffer: 1.0,
            point_extension: 1.0,
            expanding_coeff: 1.0,
            minimal_follow_time: 2.0,
            success_tunnel: 1.5,
            backward_routing_distance: 100.0,
            decision_valid_stop_range: 0.5,
            legacy_obstacle_short_circuit: false,
        }
    }
}

/// Fixed dimensions of the ego vehicle, in m.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParam {
    pub length: f64,
    pub width: f64,
    /// Distance from the rear axle centre to the front bumper.
    pub front_edge_to_center: f64,
    /// Distance from the rear axle centre to the rear bumper.
    pub back_edge_to_center: f64,
}

impl Default for VehicleParam {
    fn default() -> Self {
        Self {
            length: 4.933,
            width: 2.11,
            front_edge_to_center: 3.89,
            back_edge_to_center: 1.043,
        }
    }
}

impl StBoundaryConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        from_json_str(json)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        from_json_file(path)
    }
}

impl VehicleParam {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        from_json_str(json)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        from_json_file(path)
    }
}

pub(crate) fn from_json_str<T: DeserializeOwned>(json: &str) -> Result<T, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

pub(crate) fn from_json_file<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = StBoundaryConfig::from_json_str(
            r#"{ "boundary_buffer": 0.5, "legacy_obstacle_short_circuit": true }"#,
        )
        .unwrap();
        assert_eq!(config.boundary_buffer, 0.5);
        assert!(config.legacy_obstacle_short_circuit);
        assert_eq!(config.follow_buffer, StBoundaryConfig::default().follow_buffer);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = VehicleParam::from_json_str("{ length: 4 }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = StBoundaryConfig::from_json_file("/nonexistent/st_boundary.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
