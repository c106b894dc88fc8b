use super::Point2d;
use itertools::Itertools;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise vertex order, negative for clockwise.
/// Fewer than three vertices enclose no area.
pub fn signed_area(points: &[Point2d]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice_area: f64 = points
        .iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    0.5 * twice_area
}
