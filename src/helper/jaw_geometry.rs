use nalgebra::Vector2;
use thiserror::Error;

use crate::utils::coordinate::Point2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The vertex coincides with one of the ray endpoints, so no angle
    /// is defined at it.
    #[error("degenerate vertex: a ray of the angle has zero length")]
    DegenerateVertex,
}

/// compute_jaw_angle returns the interior angle, in degrees, formed at
/// the jaw corner by the rays towards the chin tip and the ear corner.
///
/// All three points must be in the same coordinate space (pixel space
/// once the normalized detector output has been scaled by the frame
/// size). The cosine is clamped to [-1, 1] before the inverse cosine;
/// accumulated floating-point error can push the raw value just outside
/// that range.
///
/// # Arguments
/// * `chin` - chin tip
/// * `jaw_corner` - the vertex the angle is measured at
/// * `ear_corner` - ear / face-edge corner
///
/// # Returns
/// * `Result<f32, GeometryError>` - angle in [0, 180] degrees
pub fn compute_jaw_angle(
    chin: Point2D,
    jaw_corner: Point2D,
    ear_corner: Point2D,
) -> Result<f32, GeometryError> {
    let d1 = chin - jaw_corner;
    let d2 = ear_corner - jaw_corner;
    let v1 = Vector2::new(d1.x, d1.y);
    let v2 = Vector2::new(d2.x, d2.y);

    let norm_product = v1.norm() * v2.norm();
    if norm_product == 0.0 {
        return Err(GeometryError::DegenerateVertex);
    }

    let cosine = (v1.dot(&v2) / norm_product).clamp(-1.0, 1.0);
    Ok(cosine.acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_angle() {
        let angle = compute_jaw_angle(
            Point2D::new(0.0, 10.0),
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
        )
        .unwrap();
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_symmetry_in_chin_ear_swap() {
        let chin = Point2D::new(500.0, 950.0);
        let jaw = Point2D::new(700.0, 800.0);
        let ear = Point2D::new(850.0, 550.0);
        let a = compute_jaw_angle(chin, jaw, ear).unwrap();
        let b = compute_jaw_angle(ear, jaw, chin).unwrap();
        assert!((a - b).abs() < 1e-4);
    }

    #[test]
    fn test_collinear_opposite_sides_is_straight() {
        let angle = compute_jaw_angle(
            Point2D::new(-10.0, 0.0),
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
        )
        .unwrap();
        assert!((angle - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_collinear_same_side_is_zero() {
        let angle = compute_jaw_angle(
            Point2D::new(5.0, 5.0),
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 10.0),
        )
        .unwrap();
        assert!(angle.abs() < 1e-3);
    }

    #[test]
    fn test_angle_stays_in_range() {
        let samples = [
            (
                Point2D::new(0.3, 0.7),
                Point2D::new(0.3001, 0.7001),
                Point2D::new(0.2999, 0.6999),
            ),
            (
                Point2D::new(123.0, 456.0),
                Point2D::new(789.0, 12.0),
                Point2D::new(345.0, 678.0),
            ),
            (
                Point2D::new(0.0, 1.0),
                Point2D::new(0.0, 0.0),
                Point2D::new(0.0, 2.0),
            ),
        ];
        for (chin, jaw, ear) in samples {
            let angle = compute_jaw_angle(chin, jaw, ear).unwrap();
            assert!((0.0..=180.0).contains(&angle), "angle out of range: {angle}");
            assert!(!angle.is_nan());
        }
    }

    #[test]
    fn test_zero_length_ray_is_degenerate() {
        let p = Point2D::new(700.0, 800.0);
        let ear = Point2D::new(850.0, 550.0);
        assert_eq!(
            compute_jaw_angle(p, p, ear),
            Err(GeometryError::DegenerateVertex)
        );
        assert_eq!(
            compute_jaw_angle(ear, p, p),
            Err(GeometryError::DegenerateVertex)
        );
    }

    #[test]
    fn test_reference_profile_example() {
        // 1000x1000 frame, chin (0.50, 0.95), jaw corner (0.70, 0.80),
        // ear corner (0.85, 0.55) scaled to pixels.
        let angle = compute_jaw_angle(
            Point2D::new(500.0, 950.0),
            Point2D::new(700.0, 800.0),
            Point2D::new(850.0, 550.0),
        )
        .unwrap();
        assert!((angle - 157.9).abs() < 0.1, "got {angle}");
    }
}
