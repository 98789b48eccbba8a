//! Text as line faces.
//!
//! Glyph outlines come from an external layout engine as a flattened point
//! stream. Closing segments are already explicit: a closed subpath ends
//! with a line back to its start point. [`Scene::text`] turns each
//! line-to into a [`Face`] on one of the three coordinate planes.

use crate::geometry::{ColorTag, Face, Plane};
use crate::point::{mm_to_units, FixedPoint3};
use crate::scene::Scene;

/// Default divisor of the cap height used as flattening tolerance.
pub const DEFAULT_FLAT_FACTOR: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPointKind {
    /// Begin a new subpath without drawing.
    Start,
    LineTo,
}

/// One point of a flattened outline, in 1/1000 mm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathPoint {
    pub kind: PathPointKind,
    pub x: i32,
    pub y: i32,
}

impl PathPoint {
    pub fn start(x: i32, y: i32) -> Self {
        Self {
            kind: PathPointKind::Start,
            x,
            y,
        }
    }

    pub fn line_to(x: i32, y: i32) -> Self {
        Self {
            kind: PathPointKind::LineTo,
            x,
            y,
        }
    }

    pub fn from_mm(kind: PathPointKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x: mm_to_units(x),
            y: mm_to_units(y),
        }
    }
}

/// Flattened outline of a piece of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPath {
    points: Vec<PathPoint>,
}

impl TextPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<PathPoint>) -> Self {
        Self { points }
    }

    /// Lay out `text` with `engine`. The flattening tolerance is the cap
    /// height divided by `flat_factor` (`0` selects the default).
    pub fn layout<G: GlyphLayout>(
        engine: &G,
        text: &str,
        font: &FontSpec,
        cap_height: f64,
        flat_factor: u32,
    ) -> Result<Self, G::Error> {
        let flat_factor = if flat_factor == 0 {
            DEFAULT_FLAT_FACTOR
        } else {
            flat_factor
        };
        let tolerance = cap_height / f64::from(flat_factor);
        let points = engine.outline(text, font, cap_height, tolerance)?;
        Ok(Self { points })
    }

    pub fn push(&mut self, point: PathPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Font selection passed through to the layout engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            bold: false,
            italic: false,
        }
    }
}

/// External glyph layout: string and font in, flattened outline out.
pub trait GlyphLayout {
    type Error;

    /// Outline of `text` at `cap_height` mm, flattened to within
    /// `tolerance` mm, in 1/1000 mm units.
    fn outline(
        &self,
        text: &str,
        font: &FontSpec,
        cap_height: f64,
        tolerance: f64,
    ) -> Result<Vec<PathPoint>, Self::Error>;
}

/// Mirror the outline along X and/or Y before placing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextFlip {
    pub x: bool,
    pub y: bool,
}

impl TextFlip {
    pub const NONE: TextFlip = TextFlip { x: false, y: false };
    pub const X: TextFlip = TextFlip { x: true, y: false };
    pub const Y: TextFlip = TextFlip { x: false, y: true };
    pub const XY: TextFlip = TextFlip { x: true, y: true };
}

impl Scene {
    /// Place `path` on `plane` with its origin at `(x, y)` and `coordinate`
    /// along the plane normal (millimeters). Returns the number of lines added.
    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        tag: ColorTag,
        path: &TextPath,
        plane: Plane,
        flip: TextFlip,
        x: f64,
        y: f64,
        coordinate: f64,
    ) -> usize {
        self.text_units(
            tag,
            path,
            plane,
            flip,
            FixedPoint3::new(mm_to_units(x), mm_to_units(y), mm_to_units(coordinate)),
        )
    }

    /// As [`Scene::text`] with the origin already in 1/1000 mm; `origin.z`
    /// is the coordinate along the plane normal.
    pub fn text_units(
        &mut self,
        tag: ColorTag,
        path: &TextPath,
        plane: Plane,
        flip: TextFlip,
        origin: FixedPoint3,
    ) -> usize {
        let mut pen: Option<(i32, i32)> = None;
        let mut count = 0;

        for point in path.points() {
            let px = if flip.x {
                origin.x - point.x
            } else {
                origin.x + point.x
            };
            let py = if flip.y {
                origin.y - point.y
            } else {
                origin.y + point.y
            };

            if let (PathPointKind::LineTo, Some((x0, y0))) = (point.kind, pen) {
                self.add(Face::line(
                    tag,
                    plane.place(x0, y0, origin.z),
                    plane.place(px, py, origin.z),
                ));
                count += 1;
            }
            pen = Some((px, py));
        }

        count
    }
}
