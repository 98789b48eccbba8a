//! Facet3D Core Library - scene, projection and color logic
//!
//! Faces (points, lines, triangles, quads) are stored in 1/1000 mm,
//! rotated about the three axes, depth-sorted and fitted to a 2D surface
//! as an ordered list of draw commands. Rasterization is left to a
//! [`DrawSurface`] implementation.

pub mod color;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod path_data;
pub mod point;
pub mod projection;
pub mod scene;
pub mod sector;
pub mod text;
pub mod transform;

// Re-export commonly used types
pub use color::{gradient, GradientOptions, Hsv, Rgb};
pub use draw::{DrawCommand, DrawSurface, RenderOutput, ScreenPoint};
pub use error::{PathDataError, ProjectionError, SectorError};
pub use geometry::{ColorTag, Face, Facet, MarkerShape, Plane, Shadow, Shape};
pub use path_data::parse_path_data;
pub use point::FixedPoint3;
pub use projection::RenderOptions;
pub use scene::Scene;
pub use sector::Sector;
pub use text::{GlyphLayout, TextFlip, TextPath};
pub use transform::{RotationState, ViewAngles};
