/// Axis rotations in tenths of a degree
use nalgebra::{Rotation2, Vector2, Vector3};
use std::f64::consts::PI;

/// Magnitude (exclusive) an axis angle must stay under, in tenths of a degree.
pub const ANGLE_LIMIT: i32 = 3600;

/// Precomputed sine/cosine pairs for the three axes.
///
/// An axis whose angle is zero or outside `(-3600, 3600)` carries no
/// rotation and is skipped when a point is projected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    x: Option<Rotation2<f64>>,
    y: Option<Rotation2<f64>>,
    z: Option<Rotation2<f64>>,
}

impl RotationState {
    /// Build from angles given in tenths of a degree.
    pub fn from_tenths(x: i32, y: i32, z: i32) -> Self {
        Self {
            x: axis_rotation(x),
            y: axis_rotation(y),
            z: axis_rotation(z),
        }
    }

    /// Build from angles in degrees; fractions below a tenth are truncated.
    pub fn from_degrees(x: f32, y: f32, z: f32) -> Self {
        Self::from_tenths(
            degrees_to_tenths(x),
            degrees_to_tenths(y),
            degrees_to_tenths(z),
        )
    }

    pub fn identity() -> Self {
        Self {
            x: None,
            y: None,
            z: None,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    /// Rotate a millimeter-space vector.
    ///
    /// Order is fixed: the (Y,Z) pair about X first, then (X,Z) about Y,
    /// then (X,Y) about Z. Each step feeds the next.
    pub fn apply(&self, v: Vector3<f64>) -> Vector3<f64> {
        let (mut x, mut y, mut z) = (v.x, v.y, v.z);

        if let Some(rx) = &self.x {
            let r = rx * Vector2::new(y, z);
            y = r.x;
            z = r.y;
        }

        if let Some(ry) = &self.y {
            // About Y the (X,Z) pair turns the opposite way round.
            let r = ry.inverse() * Vector2::new(x, z);
            x = r.x;
            z = r.y;
        }

        if let Some(rz) = &self.z {
            let r = rz * Vector2::new(x, y);
            x = r.x;
            y = r.y;
        }

        Vector3::new(x, y, z)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::identity()
    }
}

fn axis_rotation(tenths: i32) -> Option<Rotation2<f64>> {
    if tenths == 0 || tenths <= -ANGLE_LIMIT || tenths >= ANGLE_LIMIT {
        return None;
    }
    Some(Rotation2::new(f64::from(tenths) * PI / 1800.0))
}

fn degrees_to_tenths(degrees: f32) -> i32 {
    (degrees * 10.0) as i32
}

/// Viewing angles in degrees, kept within `0..=360` as they accumulate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAngles {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ViewAngles {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x = wrap_degrees(self.x + dx);
        self.y = wrap_degrees(self.y + dy);
        self.z = wrap_degrees(self.z + dz);
    }

    pub fn rotation(&self) -> RotationState {
        RotationState::from_degrees(self.x, self.y, self.z)
    }
}

impl Default for ViewAngles {
    fn default() -> Self {
        Self::zero()
    }
}

fn wrap_degrees(mut angle: f32) -> f32 {
    while angle < 0.0 {
        angle += 360.0;
    }
    while angle > 360.0 {
        angle -= 360.0;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f64>, b: Vector3<f64>) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vector3::new(1.5, -2.0, 3.25);
        assert!(RotationState::identity().is_identity());
        assert_eq!(RotationState::identity().apply(v), v);
    }

    #[test]
    fn test_out_of_range_angles_are_identity() {
        for tenths in [0, 3600, -3600, 5000, -9999] {
            let r = RotationState::from_tenths(tenths, tenths, tenths);
            assert!(r.is_identity(), "angle {tenths} should be identity");
        }
        assert!(!RotationState::from_tenths(3599, 0, 0).is_identity());
    }

    #[test]
    fn test_quarter_turn_about_each_axis() {
        let v = Vector3::new(1.0, 2.0, 3.0);

        // X: y' = -z, z' = y
        let rx = RotationState::from_tenths(900, 0, 0);
        assert!(close(rx.apply(v), Vector3::new(1.0, -3.0, 2.0)));

        // Y: x' = z, z' = -x
        let ry = RotationState::from_tenths(0, 900, 0);
        assert!(close(ry.apply(v), Vector3::new(3.0, 2.0, -1.0)));

        // Z: x' = -y, y' = x
        let rz = RotationState::from_tenths(0, 0, 900);
        assert!(close(rz.apply(v), Vector3::new(-2.0, 1.0, 3.0)));
    }

    #[test]
    fn test_axis_order_is_x_then_y_then_z() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let combined = RotationState::from_tenths(900, 900, 900).apply(v);

        let step = RotationState::from_tenths(900, 0, 0).apply(v);
        let step = RotationState::from_tenths(0, 900, 0).apply(step);
        let step = RotationState::from_tenths(0, 0, 900).apply(step);
        assert!(close(combined, step));

        let reversed = RotationState::from_tenths(0, 0, 900).apply(v);
        let reversed = RotationState::from_tenths(0, 900, 0).apply(reversed);
        let reversed = RotationState::from_tenths(900, 0, 0).apply(reversed);
        assert!(!close(combined, reversed));
    }

    #[test]
    fn test_view_angles_wrap() {
        let mut angles = ViewAngles::zero();
        angles.rotate(-10.0, 370.0, 0.5);
        assert!((angles.x - 350.0).abs() < 1e-4);
        assert!((angles.y - 10.0).abs() < 1e-4);
        assert!((angles.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_degrees_truncate_to_tenths() {
        assert_eq!(degrees_to_tenths(12.39), 123);
        assert_eq!(degrees_to_tenths(-0.05), 0);
    }
}
