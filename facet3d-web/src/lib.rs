/// Facet3D Web - WASM wrapper that renders scenes to SVG
///
/// A `WebChart` owns a scene plus viewing angles. JavaScript builds the
/// scene with the `add_*` methods, rotates it, and asks for an SVG string
/// to drop into the page.
use facet3d_core::{
    parse_path_data, ColorTag, DrawSurface, FixedPoint3, Plane, Rgb, Scene, ScreenPoint, Sector,
    Shadow, TextFlip, ViewAngles,
};
use log::debug;
use wasm_bindgen::prelude::*;

pub mod svg;

pub use svg::SvgSurface;

fn plane_from_index(plane: u8) -> Result<Plane, JsValue> {
    match plane {
        0 => Ok(Plane::XY),
        1 => Ok(Plane::XZ),
        2 => Ok(Plane::YZ),
        other => Err(JsValue::from_str(&format!(
            "plane must be 0 (XY), 1 (XZ) or 2 (YZ), got {other}"
        ))),
    }
}

#[wasm_bindgen]
pub struct WebChart {
    scene: Scene,
    angles: ViewAngles,
}

impl Default for WebChart {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebChart {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebChart {
        WebChart {
            scene: Scene::new(),
            angles: ViewAngles::zero(),
        }
    }

    /// Palette entry; `rgb` is `0xrrggbb`.
    pub fn set_color(&mut self, tag: i32, rgb: u32) {
        self.scene.set_color(tag, Rgb::from_packed(rgb));
    }

    /// Tags below use the raw form: `0x7f000000 | 0xrrggbb` for a direct
    /// color, anything else is a palette key. `shadow` is the signed code
    /// accepted by [`Shadow::from_code`].
    pub fn add_point(&mut self, tag: u32, shadow: i32, x: f64, y: f64, z: f64) {
        self.scene
            .point(ColorTag::from_raw(tag), FixedPoint3::from_mm(x, y, z))
            .shadow = Shadow::from_code(shadow);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_line(&mut self, tag: u32, x0: f64, y0: f64, z0: f64, x1: f64, y1: f64, z1: f64) {
        self.scene.line(
            ColorTag::from_raw(tag),
            FixedPoint3::from_mm(x0, y0, z0),
            FixedPoint3::from_mm(x1, y1, z1),
        );
    }

    /// Quad from twelve coordinates (four XYZ triples, millimeters).
    pub fn add_quad(&mut self, tag: u32, shadow: i32, coords: &[f64]) -> Result<(), JsValue> {
        if coords.len() != 12 {
            return Err(JsValue::from_str("add_quad expects 12 coordinates"));
        }
        let p = |i: usize| FixedPoint3::from_mm(coords[i], coords[i + 1], coords[i + 2]);
        self.scene
            .quad(ColorTag::from_raw(tag), p(0), p(3), p(6), p(9))
            .shadow = Shadow::from_code(shadow);
        Ok(())
    }

    /// Ring wedge; angles in tenths of a degree. Returns the faces added.
    #[allow(clippy::too_many_arguments)]
    pub fn add_sector(
        &mut self,
        tag: u32,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: i32,
        end_angle: i32,
        gap: f64,
        depth: f64,
    ) -> Result<usize, JsValue> {
        let mut sector = Sector::new(inner_radius, outer_radius, start_angle, end_angle);
        sector.gap = gap;
        sector.depth = depth;
        self.scene
            .build_sector(ColorTag::from_raw(tag), &sector)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Place `M`/`L`/`Z` path data on a plane (0 XY, 1 XZ, 2 YZ).
    /// Returns the lines added.
    #[allow(clippy::too_many_arguments)]
    pub fn add_text_path(
        &mut self,
        tag: u32,
        path_data: &str,
        plane: u8,
        flip_x: bool,
        flip_y: bool,
        x: f64,
        y: f64,
        coordinate: f64,
    ) -> Result<usize, JsValue> {
        let plane = plane_from_index(plane)?;
        let path = parse_path_data(path_data).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let flip = TextFlip {
            x: flip_x,
            y: flip_y,
        };
        Ok(self
            .scene
            .text(ColorTag::from_raw(tag), &path, plane, flip, x, y, coordinate))
    }

    pub fn clear(&mut self) {
        self.scene = Scene::new();
    }

    pub fn face_count(&self) -> usize {
        self.scene.len()
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.angles.rotate(dx, dy, dz);
    }

    pub fn set_angles(&mut self, x: f32, y: f32, z: f32) {
        self.angles = ViewAngles::new(x, y, z);
    }

    /// Render at the current angles. An empty scene yields an SVG holding
    /// only the background.
    pub fn render_svg(&self, width: i32, height: i32) -> String {
        let mut surface = SvgSurface::new(width, height);
        let output = self.scene.render(
            width,
            height,
            self.angles.x,
            self.angles.y,
            self.angles.z,
            &FixedPoint3::origin(),
        );
        match output {
            Some(output) => {
                debug!("svg render: {} commands", output.commands.len());
                output.draw_on(&mut surface);
            }
            None => surface.fill_rect(ScreenPoint::new(0, 0), width, height, Rgb::WHITE),
        }
        surface.finish()
    }
}
