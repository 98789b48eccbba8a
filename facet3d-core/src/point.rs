/// Fixed-precision 3D points
///
/// Coordinates are stored in 1/1000 mm so the usable range is about
/// +/-20 m. Floating-point values crossing the API are millimeters.
use nalgebra::Vector3;
use std::fmt;

use crate::error::ProjectionError;
use crate::transform::RotationState;

/// Fixed-point units per millimeter.
pub const UNITS_PER_MM: f64 = 1000.0;

/// Convert millimeters to fixed-point units, rounding half away from zero.
pub fn mm_to_units(mm: f64) -> i32 {
    (mm * UNITS_PER_MM).round() as i32
}

/// Convert fixed-point units back to millimeters.
pub fn units_to_mm(units: i32) -> f64 {
    f64::from(units) / UNITS_PER_MM
}

/// A point in 3D space with integer coordinates in 1/1000 mm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FixedPoint3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl FixedPoint3 {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn from_mm(x: f64, y: f64, z: f64) -> Self {
        Self::new(mm_to_units(x), mm_to_units(y), mm_to_units(z))
    }

    pub fn from_mm_vector(v: Vector3<f64>) -> Self {
        Self::from_mm(v.x, v.y, v.z)
    }

    pub fn to_mm(&self) -> Vector3<f64> {
        Vector3::new(units_to_mm(self.x), units_to_mm(self.y), units_to_mm(self.z))
    }

    /// Translate relative to `camera`, rotate, and re-quantize.
    pub fn project(&self, rotation: &RotationState, camera: &FixedPoint3) -> Self {
        let local = self.to_mm() - camera.to_mm();
        Self::from_mm_vector(rotation.apply(local))
    }

    /// Perspective divide by similar triangles: X and Y are taken relative
    /// to `viewer` and scaled by `viewer.z / (z - viewer.z)`. Z is kept.
    pub fn apply_viewer(&self, viewer: &FixedPoint3) -> Result<Self, ProjectionError> {
        if self.z == viewer.z {
            return Err(ProjectionError::CoplanarWithViewer { z: self.z });
        }

        let p = self.to_mm();
        let e = viewer.to_mm();
        let ratio = e.z / (p.z - e.z);

        Ok(Self::new(
            mm_to_units((p.x - e.x) * ratio),
            mm_to_units((p.y - e.y) * ratio),
            self.z,
        ))
    }
}

impl fmt::Display for FixedPoint3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X:{:.3}({}) Y:{:.3}({}) Z:{:.3}({})",
            units_to_mm(self.x),
            self.x,
            units_to_mm(self.y),
            self.y,
            units_to_mm(self.z),
            self.z
        )
    }
}
