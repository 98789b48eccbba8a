/// Faces: points, lines, triangles and quads with color and shading
use crate::color::Rgb;
use crate::error::ProjectionError;
use crate::point::{mm_to_units, FixedPoint3};
use crate::transform::RotationState;

/// Top byte that marks a raw tag as a packed RGB color.
pub const DIRECT_COLOR_SENTINEL: u32 = 0x7F00_0000;
const TOP_BYTE_MASK: u32 = 0xFF00_0000;

/// How a face gets its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTag {
    /// Key into the scene palette.
    Palette(i32),
    /// Color carried by the face itself.
    Direct(Rgb),
}

impl ColorTag {
    /// Decode the packed convention: top byte `0x7f` means the low 24 bits
    /// are RGB, anything else is a palette key.
    pub fn from_raw(raw: u32) -> Self {
        if raw & TOP_BYTE_MASK == DIRECT_COLOR_SENTINEL {
            ColorTag::Direct(Rgb::from_packed(raw))
        } else {
            ColorTag::Palette(raw as i32)
        }
    }

    pub fn to_raw(self) -> u32 {
        match self {
            ColorTag::Palette(id) => id as u32,
            ColorTag::Direct(rgb) => DIRECT_COLOR_SENTINEL | rgb.to_packed(),
        }
    }
}

impl Default for ColorTag {
    fn default() -> Self {
        ColorTag::Palette(0)
    }
}

impl From<Rgb> for ColorTag {
    fn from(rgb: Rgb) -> Self {
        ColorTag::Direct(rgb)
    }
}

/// Shapes for single-point faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarkerShape {
    #[default]
    Circle,
    Triangle,
    Rectangle,
    Dot,
}

/// Shading or marker style of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shadow {
    #[default]
    None,
    /// Darken lines and polygons by this percentage; negative lightens.
    Darken(i32),
    /// Marker drawn in face order.
    Marker(MarkerShape),
    /// Marker held back and drawn after every other face.
    DeferredMarker(MarkerShape),
}

impl Shadow {
    /// Decode the signed-integer convention: `-1/-2/-3` select triangle,
    /// rectangle and dot markers, `-101/-102/-103` the deferred variants,
    /// `0` is no shading and anything else is a darkening percentage.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Shadow::None,
            -1 => Shadow::Marker(MarkerShape::Triangle),
            -2 => Shadow::Marker(MarkerShape::Rectangle),
            -3 => Shadow::Marker(MarkerShape::Dot),
            -101 => Shadow::DeferredMarker(MarkerShape::Triangle),
            -102 => Shadow::DeferredMarker(MarkerShape::Rectangle),
            -103 => Shadow::DeferredMarker(MarkerShape::Dot),
            percent => Shadow::Darken(percent),
        }
    }
}

/// Coordinate plane for flat content such as grid lines and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

impl Plane {
    /// Point at in-plane `(u, v)` and `c` along the plane normal.
    pub fn place(self, u: i32, v: i32, c: i32) -> FixedPoint3 {
        match self {
            Plane::XY => FixedPoint3::new(u, v, c),
            Plane::XZ => FixedPoint3::new(u, c, v),
            Plane::YZ => FixedPoint3::new(c, u, v),
        }
    }

    pub fn place_mm(self, u: f64, v: f64, c: f64) -> FixedPoint3 {
        self.place(mm_to_units(u), mm_to_units(v), mm_to_units(c))
    }
}

/// Vertices of a face; the variant fixes the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Point([FixedPoint3; 1]),
    Line([FixedPoint3; 2]),
    Triangle([FixedPoint3; 3]),
    Quad([FixedPoint3; 4]),
}

impl Shape {
    pub fn points(&self) -> &[FixedPoint3] {
        match self {
            Shape::Point(p) => p,
            Shape::Line(p) => p,
            Shape::Triangle(p) => p,
            Shape::Quad(p) => p,
        }
    }

    pub fn points_mut(&mut self) -> &mut [FixedPoint3] {
        match self {
            Shape::Point(p) => p,
            Shape::Line(p) => p,
            Shape::Triangle(p) => p,
            Shape::Quad(p) => p,
        }
    }
}

/// Behaviour shared by anything made of vertices.
pub trait Facet {
    fn points(&self) -> &[FixedPoint3];

    /// Mean Z of the vertices, rounded to the nearest unit with halves
    /// going to the even neighbour.
    fn depth(&self) -> i32 {
        let points = self.points();
        if points.is_empty() {
            return 0;
        }
        let sum: i64 = points.iter().map(|p| i64::from(p.z)).sum();
        (sum as f64 / points.len() as f64).round_ties_even() as i32
    }

    fn len(&self) -> usize {
        self.points().len()
    }
}

impl Facet for Shape {
    fn points(&self) -> &[FixedPoint3] {
        Shape::points(self)
    }
}

/// A face of the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub shape: Shape,
    pub tag: ColorTag,
    pub shadow: Shadow,
}

impl Face {
    pub fn new(shape: Shape, tag: ColorTag) -> Self {
        Self {
            shape,
            tag,
            shadow: Shadow::None,
        }
    }

    pub fn point(tag: ColorTag, p: FixedPoint3) -> Self {
        Self::new(Shape::Point([p]), tag)
    }

    pub fn line(tag: ColorTag, a: FixedPoint3, b: FixedPoint3) -> Self {
        Self::new(Shape::Line([a, b]), tag)
    }

    pub fn triangle(tag: ColorTag, a: FixedPoint3, b: FixedPoint3, c: FixedPoint3) -> Self {
        Self::new(Shape::Triangle([a, b, c]), tag)
    }

    pub fn quad(
        tag: ColorTag,
        a: FixedPoint3,
        b: FixedPoint3,
        c: FixedPoint3,
        d: FixedPoint3,
    ) -> Self {
        Self::new(Shape::Quad([a, b, c, d]), tag)
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn project(&mut self, rotation: &RotationState, camera: &FixedPoint3) {
        for p in self.shape.points_mut() {
            *p = p.project(rotation, camera);
        }
    }

    /// Perspective-divide every vertex; on error the face is untouched.
    pub fn apply_viewer(&mut self, viewer: &FixedPoint3) -> Result<(), ProjectionError> {
        let mut shape = self.shape;
        for p in shape.points_mut() {
            *p = p.apply_viewer(viewer)?;
        }
        self.shape = shape;
        Ok(())
    }
}

impl Facet for Face {
    fn points(&self) -> &[FixedPoint3] {
        self.shape.points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_z(z: i32) -> FixedPoint3 {
        FixedPoint3::new(0, 0, z)
    }

    #[test]
    fn test_depth_is_rounded_mean() {
        let tag = ColorTag::Palette(1);
        assert_eq!(Face::point(tag, at_z(-7)).depth(), -7);
        assert_eq!(Face::line(tag, at_z(1), at_z(2)).depth(), 2);
        assert_eq!(Face::line(tag, at_z(-1), at_z(-2)).depth(), -2);
        assert_eq!(Face::triangle(tag, at_z(0), at_z(0), at_z(1)).depth(), 0);
        assert_eq!(
            Face::quad(tag, at_z(10), at_z(20), at_z(30), at_z(41)).depth(),
            25
        );
    }

    #[test]
    fn test_depth_halves_round_to_even() {
        let tag = ColorTag::Palette(1);
        assert_eq!(Face::line(tag, at_z(2), at_z(3)).depth(), 2);
        assert_eq!(Face::line(tag, at_z(3), at_z(4)).depth(), 4);
        assert_eq!(Face::line(tag, at_z(-2), at_z(-3)).depth(), -2);
        assert_eq!(
            Face::quad(tag, at_z(0), at_z(0), at_z(5), at_z(5)).depth(),
            2
        );
    }

    #[test]
    fn test_depth_does_not_overflow() {
        let tag = ColorTag::Palette(1);
        let far = at_z(i32::MAX);
        assert_eq!(Face::quad(tag, far, far, far, far).depth(), i32::MAX);
    }

    #[test]
    fn test_point_counts() {
        let tag = ColorTag::default();
        let p = FixedPoint3::origin();
        assert_eq!(Face::point(tag, p).len(), 1);
        assert_eq!(Face::line(tag, p, p).len(), 2);
        assert_eq!(Face::triangle(tag, p, p, p).len(), 3);
        assert_eq!(Face::quad(tag, p, p, p, p).len(), 4);
    }

    #[test]
    fn test_color_tag_raw_form() {
        let direct = ColorTag::from_raw(0x7F_FF_A5_00);
        assert_eq!(direct, ColorTag::Direct(Rgb::ORANGE));
        assert_eq!(direct.to_raw(), 0x7F_FF_A5_00);

        assert_eq!(ColorTag::from_raw(42), ColorTag::Palette(42));
        assert_eq!(ColorTag::from_raw(0x7E_00_00_01), ColorTag::Palette(0x7E_00_00_01));
        assert_eq!(ColorTag::Palette(-5).to_raw() as i32, -5);
    }

    #[test]
    fn test_shadow_codes() {
        assert_eq!(Shadow::from_code(0), Shadow::None);
        assert_eq!(Shadow::from_code(20), Shadow::Darken(20));
        assert_eq!(Shadow::from_code(-7), Shadow::Darken(-7));
        assert_eq!(Shadow::from_code(-1), Shadow::Marker(MarkerShape::Triangle));
        assert_eq!(Shadow::from_code(-2), Shadow::Marker(MarkerShape::Rectangle));
        assert_eq!(Shadow::from_code(-3), Shadow::Marker(MarkerShape::Dot));
        assert_eq!(
            Shadow::from_code(-102),
            Shadow::DeferredMarker(MarkerShape::Rectangle)
        );
    }

    #[test]
    fn test_apply_viewer_is_all_or_nothing() {
        let viewer = FixedPoint3::new(0, 0, 5_000);
        let mut face = Face::line(
            ColorTag::default(),
            FixedPoint3::new(1_000, 1_000, 0),
            FixedPoint3::new(1_000, 1_000, 5_000),
        );
        let before = face.clone();
        assert!(face.apply_viewer(&viewer).is_err());
        assert_eq!(face, before);
    }
}
