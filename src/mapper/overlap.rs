use crate::config::{StBoundaryConfig, VehicleParam};
use crate::math::{heading_vector, Box2d, Point2d};
use crate::obstacle::Obstacle;
use crate::path::{PathPoint, TrajectoryPoint};
use crate::util::Interval;

/// The footprint of the ego vehicle, inflated by `buffer` on every side,
/// when its rear axle centre sits on `point`.
pub(crate) fn vehicle_box(point: &PathPoint, vehicle: &VehicleParam, buffer: f64) -> Box2d {
    let mid_to_rear_center = 0.5 * vehicle.length - vehicle.front_edge_to_center;
    let center = point.position() - heading_vector(point.theta) * mid_to_rear_center;
    Box2d::new(
        center,
        point.theta,
        vehicle.length + 2.0 * buffer,
        vehicle.width + 2.0 * buffer,
    )
}

/// The obstacle's footprint at one predicted pose, scaled by `expanding_coeff`.
pub(crate) fn obstacle_box(
    point: &TrajectoryPoint,
    obstacle: &Obstacle,
    expanding_coeff: f64,
) -> Box2d {
    let pose = &point.path_point;
    Box2d::new(
        Point2d::new(pose.x, pose.y),
        pose.theta,
        obstacle.length * expanding_coeff,
        obstacle.width * expanding_coeff,
    )
}

/// Finds the stations along `path` at which the vehicle would hit `obstacle_box`.
///
/// Scans inwards from both ends of the path at once, stopping as soon as each
/// side has hit the obstacle. The returned interval spans the first and last
/// colliding path points, extended by the configured point extension.
/// Returns `None` if either scan runs into the other without a hit.
pub(crate) fn locate_overlap(
    path: &[PathPoint],
    obstacle_box: &Box2d,
    vehicle: &VehicleParam,
    config: &StBoundaryConfig,
) -> Option<Interval<f64>> {
    let overlaps = |idx: usize| {
        vehicle_box(&path[idx], vehicle, config.boundary_buffer).has_overlap(obstacle_box)
    };

    let mut low = 0;
    let mut high = path.len().checked_sub(1)?;
    let mut find_low = false;
    let mut find_high = false;
    while low < high && !(find_low && find_high) {
        if !find_low {
            if overlaps(low) {
                find_low = true;
            } else {
                low += 1;
            }
        }
        if !find_high {
            if overlaps(high) {
                find_high = true;
            } else {
                high -= 1;
            }
        }
    }

    if find_low && find_high {
        Some(Interval::new(path[low].s, path[high].s).expand(config.point_extension))
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn straight_path() -> Vec<PathPoint> {
        (0..=50)
            .map(|i| PathPoint::new(i as f64, 0.0, 0.0, i as f64))
            .collect()
    }

    fn vehicle() -> VehicleParam {
        VehicleParam {
            length: 4.0,
            width: 2.0,
            front_edge_to_center: 3.0,
            back_edge_to_center: 1.0,
        }
    }

    fn config() -> StBoundaryConfig {
        StBoundaryConfig {
            boundary_buffer: 0.0,
            point_extension: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn vehicle_box_is_ahead_of_rear_axle() {
        let b = vehicle_box(&PathPoint::new(10.0, 0.0, 0.0, 10.0), &vehicle(), 0.5);
        assert_approx_eq!(b.center().x, 11.0);
        assert_approx_eq!(b.length(), 5.0);
        assert_approx_eq!(b.width(), 3.0);
    }

    #[test]
    fn overlap_spans_colliding_stations() {
        // Obstacle occupies x in [19, 21]; the vehicle box spans [s - 1, s + 3].
        let obstacle = Box2d::new(Point2d::new(20.0, 0.0), 0.0, 2.0, 2.0);
        let interval = locate_overlap(&straight_path(), &obstacle, &vehicle(), &config()).unwrap();
        assert_approx_eq!(interval.min, 16.0 - 0.5);
        assert_approx_eq!(interval.max, 22.0 + 0.5);
    }

    #[test]
    fn no_overlap_for_distant_obstacle() {
        let obstacle = Box2d::new(Point2d::new(20.0, 10.0), 0.0, 2.0, 2.0);
        assert!(locate_overlap(&straight_path(), &obstacle, &vehicle(), &config()).is_none());
    }

    #[test]
    fn obstacle_at_path_end_is_found() {
        // Touches the vehicle boxes at s = 49 and s = 50 only.
        let obstacle = Box2d::new(Point2d::new(54.0, 0.0), 0.0, 4.0, 2.0);
        let interval = locate_overlap(&straight_path(), &obstacle, &vehicle(), &config()).unwrap();
        assert_approx_eq!(interval.min, 49.0 - 0.5);
        assert_approx_eq!(interval.max, 50.0 + 0.5);
    }

    #[test]
    fn single_colliding_point_is_not_reported() {
        // Only s = 50 touches; the low scan meets the high one before hitting it.
        let obstacle = Box2d::new(Point2d::new(55.0, 0.0), 0.0, 4.0, 2.0);
        assert!(locate_overlap(&straight_path(), &obstacle, &vehicle(), &config()).is_none());
    }
}
