//! Rotation transformation about a block center.
//!
//! Blocks are rotated by the renderer with a CSS-style transform: translate
//! to the block's top-left, then rotate about the block's own center. The
//! resize calculator and the drift classifier both need the same mapping
//! from block-local (unrotated) space to screen space, so it lives here.
//!
//! ## Rotation Convention
//!
//! Clockwise positive angles, in degrees, with the y axis pointing down.
//! - 0° = no rotation
//! - 90° = rotated clockwise (right becomes down)
//! - 180° = upside down
//! - 270° = rotated counter-clockwise (right becomes up)
//!
//! ## Loose Bounds
//!
//! The rendered bounding rect of a rotated block is the axis-aligned box of
//! its four rotated corners, which is what a browser reports for a
//! transformed element.

use super::types::{BoundingBox, Point};

/// Normalize an angle in degrees into `[0, 360)`
pub fn normalize_degrees(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// A 2D rotation around a center point.
#[derive(Debug, Clone, Copy)]
pub struct RotationTransform {
    /// Rotation angle in degrees (clockwise positive)
    pub angle_degrees: f64,
    /// Center point of rotation (the block center)
    pub center: Point,
}

impl RotationTransform {
    /// Create a new rotation transform.
    pub fn new(angle_degrees: f64, center: Point) -> Self {
        Self {
            angle_degrees,
            center,
        }
    }

    /// Rotation of a box about its own center
    pub fn about_center_of(bounds: &BoundingBox, angle_degrees: f64) -> Self {
        Self::new(angle_degrees, bounds.center())
    }

    /// Check if this is effectively a no-op (0° rotation, modulo 360).
    pub fn is_identity(&self) -> bool {
        normalize_degrees(self.angle_degrees).abs() < f64::EPSILON
    }

    /// Rotate a vector (no translation) by this transform's angle.
    ///
    /// In a y-down coordinate system clockwise rotation uses:
    /// ```text
    /// x' = x * cos(θ) - y * sin(θ)
    /// y' = x * sin(θ) + y * cos(θ)
    /// ```
    pub fn rotate_vector(&self, v: Point) -> Point {
        if self.is_identity() {
            return v;
        }
        let (sin_a, cos_a) = self.angle_degrees.to_radians().sin_cos();
        Point::new(v.x * cos_a - v.y * sin_a, v.x * sin_a + v.y * cos_a)
    }

    /// Rotate a vector by the inverse of this transform's angle.
    ///
    /// Used to bring a screen-space pointer delta into block-local axes.
    pub fn unrotate_vector(&self, v: Point) -> Point {
        if self.is_identity() {
            return v;
        }
        let (sin_a, cos_a) = self.angle_degrees.to_radians().sin_cos();
        Point::new(v.x * cos_a + v.y * sin_a, -v.x * sin_a + v.y * cos_a)
    }

    /// Rotate a point around the center.
    pub fn transform_point(&self, point: Point) -> Point {
        if self.is_identity() {
            return point;
        }
        let r = self.rotate_vector(point.delta_from(self.center));
        Point::new(self.center.x + r.x, self.center.y + r.y)
    }

    /// Screen position of the four corners of `bounds`, in the order
    /// top-left, top-right, bottom-right, bottom-left.
    pub fn transform_corners(&self, bounds: &BoundingBox) -> [Point; 4] {
        [
            self.transform_point(bounds.point_at(0.0, 0.0)),
            self.transform_point(bounds.point_at(1.0, 0.0)),
            self.transform_point(bounds.point_at(1.0, 1.0)),
            self.transform_point(bounds.point_at(0.0, 1.0)),
        ]
    }

    /// Transform a bounding box using the loose bounds algorithm.
    pub fn transform_bounds(&self, bounds: &BoundingBox) -> BoundingBox {
        if self.is_identity() {
            return *bounds;
        }
        let corners = self.transform_corners(bounds);
        BoundingBox::from_points(&corners).unwrap_or(*bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert!(normalize_degrees(-1e-20) < 360.0);
    }

    #[test]
    fn test_identity_rotation() {
        let t = RotationTransform::new(360.0, Point::new(50.0, 50.0));
        assert!(t.is_identity());
        let p = Point::new(100.0, 0.0);
        assert_eq!(t.transform_point(p), p);
    }

    #[test]
    fn test_90_degree_rotation_around_non_origin_center() {
        let t = RotationTransform::new(90.0, Point::new(50.0, 50.0));
        // 50 units right of center becomes 50 units below center
        let result = t.transform_point(Point::new(100.0, 50.0));
        assert!(approx_eq(result.x, 50.0), "x: got {}", result.x);
        assert!(approx_eq(result.y, 100.0), "y: got {}", result.y);
    }

    #[test]
    fn test_unrotate_inverts_rotate() {
        for angle in [15.0, 45.0, 90.0, 200.0, 333.0] {
            let t = RotationTransform::new(angle, Point::zero());
            let v = Point::new(12.5, -7.0);
            let back = t.unrotate_vector(t.rotate_vector(v));
            assert!(approx_eq(back.x, v.x), "angle {}: x {}", angle, back.x);
            assert!(approx_eq(back.y, v.y), "angle {}: y {}", angle, back.y);
        }
    }

    #[test]
    fn test_loose_bounds_45_degrees() {
        let bounds = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let t = RotationTransform::about_center_of(&bounds, 45.0);
        let result = t.transform_bounds(&bounds);
        let expected = 100.0 * std::f64::consts::SQRT_2;
        assert!((result.width - expected).abs() < 0.1);
        assert!((result.height - expected).abs() < 0.1);
        assert!(approx_eq(result.center().x, 50.0));
        assert!(approx_eq(result.center().y, 50.0));
    }

    #[test]
    fn test_loose_bounds_90_degrees_swaps_extent() {
        let bounds = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let t = RotationTransform::about_center_of(&bounds, 90.0);
        let result = t.transform_bounds(&bounds);
        assert!(approx_eq(result.width, 50.0), "width {}", result.width);
        assert!(approx_eq(result.height, 100.0), "height {}", result.height);
    }
}
