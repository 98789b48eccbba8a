/// Error types for scene construction and projection
use thiserror::Error;

/// Rejected sector (pie wedge) requests. No faces are added when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SectorError {
    #[error("start angle {0} is outside 0..=3600 tenths of a degree")]
    StartAngleOutOfRange(i32),
    #[error("end angle {0} is outside 0..=3600 tenths of a degree")]
    EndAngleOutOfRange(i32),
    #[error("inner radius {inner} mm must be smaller than outer radius {outer} mm")]
    DegenerateRadii { inner: f64, outer: f64 },
    #[error("angular step {0} must be positive")]
    NonPositiveStep(i32),
}

/// Errors raised by the perspective divide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// The point lies on the viewer's depth plane, so the similar-triangles
    /// ratio would divide by zero.
    #[error("point at z={z} is coplanar with the viewer")]
    CoplanarWithViewer { z: i32 },
}

/// Errors from parsing outline path data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathDataError {
    #[error("invalid path data: {0}")]
    Syntax(String),
    #[error("line command before any move command")]
    LineWithoutStart,
}
