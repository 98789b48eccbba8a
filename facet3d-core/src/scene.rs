//! The scene: a palette plus an ordered list of faces.
//!
//! Faces are drawn with the painter's algorithm: after [`Scene::sort_depth`]
//! the list runs farthest-first and every face paints over those before it.
//! [`Scene::render`] works on a private copy, so the caller's scene keeps
//! its insertion order and coordinates.

use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::color::{darken, Rgb};
use crate::draw::{DrawCommand, RenderOutput, ScreenPoint};
use crate::error::ProjectionError;
use crate::geometry::{ColorTag, Face, Facet, MarkerShape, Plane, Shadow, Shape};
use crate::point::FixedPoint3;
use crate::projection::{Limits2D, RenderOptions, ScreenMapping};
use crate::transform::RotationState;

/// Radius of a plain dot marker.
const DOT_RADIUS: i32 = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    palette: BTreeMap<i32, Rgb>,
    faces: Vec<Face>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a palette entry.
    pub fn set_color(&mut self, tag: i32, color: Rgb) {
        self.palette.insert(tag, color);
    }

    /// Assign `colors` to consecutive tags starting at `first_tag`.
    pub fn set_palette(&mut self, first_tag: i32, colors: &[Rgb]) {
        for (tag, color) in (first_tag..).zip(colors) {
            self.set_color(tag, *color);
        }
    }

    /// Palette lookup; black when the tag has no entry.
    pub fn palette_color(&self, tag: i32) -> Rgb {
        self.palette.get(&tag).copied().unwrap_or(Rgb::BLACK)
    }

    pub fn color_for(&self, face: &Face) -> Rgb {
        match face.tag {
            ColorTag::Direct(rgb) => rgb,
            ColorTag::Palette(tag) => self.palette_color(tag),
        }
    }

    /// Append a face; its tag is not checked against the palette.
    pub fn add(&mut self, face: Face) -> &mut Face {
        self.faces.push(face);
        let last = self.faces.len() - 1;
        &mut self.faces[last]
    }

    pub fn point(&mut self, tag: ColorTag, p: FixedPoint3) -> &mut Face {
        self.add(Face::point(tag, p))
    }

    pub fn line(&mut self, tag: ColorTag, a: FixedPoint3, b: FixedPoint3) -> &mut Face {
        self.add(Face::line(tag, a, b))
    }

    pub fn triangle(
        &mut self,
        tag: ColorTag,
        a: FixedPoint3,
        b: FixedPoint3,
        c: FixedPoint3,
    ) -> &mut Face {
        self.add(Face::triangle(tag, a, b, c))
    }

    pub fn quad(
        &mut self,
        tag: ColorTag,
        a: FixedPoint3,
        b: FixedPoint3,
        c: FixedPoint3,
        d: FixedPoint3,
    ) -> &mut Face {
        self.add(Face::quad(tag, a, b, c, d))
    }

    /// Line from `(x0, y0)` to `(x1, y1)` on `plane` at `coordinate` along
    /// its normal. All values in millimeters.
    pub fn line_on_plane(
        &mut self,
        tag: ColorTag,
        plane: Plane,
        from: (f64, f64),
        to: (f64, f64),
        coordinate: f64,
    ) -> &mut Face {
        let a = plane.place_mm(from.0, from.1, coordinate);
        let b = plane.place_mm(to.0, to.1, coordinate);
        self.line(tag, a, b)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn get(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    /// Rotate every face in place; angles in tenths of a degree.
    pub fn project(&mut self, x: i32, y: i32, z: i32, camera: &FixedPoint3) {
        self.project_with(&RotationState::from_tenths(x, y, z), camera);
    }

    pub fn project_with(&mut self, rotation: &RotationState, camera: &FixedPoint3) {
        trace!("projecting {} faces", self.faces.len());
        for face in &mut self.faces {
            face.project(rotation, camera);
        }
    }

    /// Perspective-divide every face. Nothing changes if any point lies on
    /// the viewer's depth plane.
    pub fn apply_viewer(&mut self, viewer: &FixedPoint3) -> Result<(), ProjectionError> {
        if let Some(p) = self
            .faces
            .iter()
            .flat_map(|f| f.points())
            .find(|p| p.z == viewer.z)
        {
            return Err(ProjectionError::CoplanarWithViewer { z: p.z });
        }
        for face in &mut self.faces {
            face.apply_viewer(viewer)?;
        }
        Ok(())
    }

    /// Order faces farthest-first. Ties keep no particular order.
    pub fn sort_depth(&mut self) {
        self.faces.sort_by_key(|f| Reverse(f.depth()));
    }

    /// X/Y bounds of every point; empty for an empty scene.
    pub fn limits(&self) -> Limits2D {
        let mut limits = Limits2D::empty();
        for p in self.faces.iter().flat_map(|f| f.points()) {
            limits.include(p);
        }
        limits
    }

    /// Render with default options. Angles are in degrees.
    pub fn render(
        &self,
        width: i32,
        height: i32,
        angle_x: f32,
        angle_y: f32,
        angle_z: f32,
        camera: &FixedPoint3,
    ) -> Option<RenderOutput> {
        self.render_with(
            &RenderOptions::default(),
            width,
            height,
            RotationState::from_degrees(angle_x, angle_y, angle_z),
            camera,
        )
    }

    /// Project a copy, depth-sort it, fit it to `width` x `height`, and
    /// emit draw commands back to front. `None` when there is nothing to draw.
    pub fn render_with(
        &self,
        options: &RenderOptions,
        width: i32,
        height: i32,
        rotation: RotationState,
        camera: &FixedPoint3,
    ) -> Option<RenderOutput> {
        if self.faces.is_empty() {
            debug!("render skipped: scene has no faces");
            return None;
        }

        let mut scene = self.clone();
        scene.project_with(&rotation, camera);
        scene.sort_depth();

        let limits = scene.limits();
        let mapping = ScreenMapping::fit(&limits, width, height, options.margin)?;
        debug!(
            "rendering {} faces into {}x{}, limits {:?}, scale {}",
            scene.faces.len(),
            width,
            height,
            limits,
            mapping.scale
        );

        let mut commands = Vec::with_capacity(scene.faces.len());
        let mut on_top = Vec::new();

        for face in &scene.faces {
            let color = scene.color_for(face);
            match face.shape {
                Shape::Point([p]) => {
                    let center = mapping.map(&p);
                    match face.shadow {
                        Shadow::DeferredMarker(shape) => {
                            on_top.push(marker_command(options, shape, color, center))
                        }
                        Shadow::Marker(shape) => {
                            commands.push(marker_command(options, shape, color, center))
                        }
                        Shadow::None | Shadow::Darken(_) => commands.push(marker_command(
                            options,
                            MarkerShape::Circle,
                            color,
                            center,
                        )),
                    }
                }
                Shape::Line([a, b]) => commands.push(DrawCommand::Line {
                    color: shaded(color, face.shadow),
                    from: mapping.map(&a),
                    to: mapping.map(&b),
                }),
                Shape::Triangle(_) | Shape::Quad(_) => commands.push(DrawCommand::Polygon {
                    color: shaded(color, face.shadow),
                    points: face.points().iter().map(|p| mapping.map(p)).collect(),
                }),
            }
        }

        commands.extend(on_top);

        Some(RenderOutput {
            width,
            height,
            background: options.background,
            commands,
        })
    }
}

fn shaded(color: Rgb, shadow: Shadow) -> Rgb {
    match shadow {
        Shadow::Darken(percent) if percent != 0 => darken(color, percent),
        _ => color,
    }
}

fn marker_command(
    options: &RenderOptions,
    shape: MarkerShape,
    color: Rgb,
    center: ScreenPoint,
) -> DrawCommand {
    let outline = color.contrast_outline();
    let (size, outline) = match shape {
        MarkerShape::Circle => (options.marker_size >> 1, Some(outline)),
        MarkerShape::Triangle | MarkerShape::Rectangle => (options.marker_size, Some(outline)),
        MarkerShape::Dot => (DOT_RADIUS, None),
    };
    DrawCommand::Marker {
        color,
        outline,
        center,
        size,
        shape,
    }
}
