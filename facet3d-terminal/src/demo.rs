/// Demo scenes: surface chart, 3D pie chart and path text
use facet3d_core::{
    gradient, parse_path_data, ColorTag, FixedPoint3, GradientOptions, PathDataError, Plane,
    Rgb, Scene, Sector, SectorError, TextFlip,
};
use log::debug;
use std::io;

/// Palette tag of the light grey scale grids.
pub const SCALE_TAG: i32 = 100;

/// Grid cells per side of the surface chart.
pub const SURFACE_STEPS: usize = 40;

/// Edge length and height range of the surface chart, in millimeters.
pub const SURFACE_SIZE: f64 = 100.0;

const SCALE_DIVISIONS: usize = 10;

/// Block-letter outline of "F3D", 10 mm tall.
pub const LOGO_PATH: &str = "M0,0 L0,10 L6,10 M0,5 L4,5 \
                             M8,10 L14,10 L14,0 L8,0 M8,5 L14,5 \
                             M16,0 L16,10 L20,10 L22,8 L22,2 L20,0 Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Surface,
    Pie,
    Text,
}

impl Demo {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "surface" | "chart" => Some(Demo::Surface),
            "pie" => Some(Demo::Pie),
            "text" => Some(Demo::Text),
            _ => None,
        }
    }

    pub fn build(self) -> io::Result<Scene> {
        let scene = match self {
            Demo::Surface => surface_chart(),
            Demo::Pie => pie_chart().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            Demo::Text => text_scene().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        };
        debug!("built {:?} demo with {} faces", self, scene.len());
        Ok(scene)
    }
}

/// Height field sampled by the surface chart.
pub fn surface_height(x: f64, y: f64) -> f64 {
    let t = 0.065;
    let xx = x * t;
    let yy = y * t;
    40.0 + xx * xx * xx.sin() + yy * yy * yy.cos()
}

/// Gradient-colored surface over a 100 mm square, framed by scale grids on
/// the three coordinate planes.
pub fn surface_chart() -> Scene {
    let mut scene = Scene::new();
    scene.set_color(SCALE_TAG, Rgb::LIGHT_GRAY);

    for plane in [Plane::YZ, Plane::XZ, Plane::XY] {
        draw_scale(&mut scene, SURFACE_SIZE, plane);
    }

    let colors = gradient(Rgb::RED, Rgb::GREEN, SURFACE_STEPS, &GradientOptions::default());
    scene.set_palette(0, &colors);
    let max_tag = colors.len().saturating_sub(1) as i32;

    let step = SURFACE_SIZE / SURFACE_STEPS as f64;
    for i in 0..SURFACE_STEPS {
        let x0 = step * i as f64;
        for j in 0..SURFACE_STEPS {
            let y0 = step * j as f64;
            surface_cell(&mut scene, x0, y0, x0 + step, y0 + step, max_tag);
        }
    }

    scene
}

fn surface_cell(scene: &mut Scene, x0: f64, y0: f64, x1: f64, y1: f64, max_tag: i32) {
    let corner = |x: f64, y: f64| FixedPoint3::from_mm(x, y, surface_height(x, y));
    let p0 = corner(x0, y0);
    let p1 = corner(x0, y1);
    let p2 = corner(x1, y1);
    let p3 = corner(x1, y0);

    let mean = (f64::from(p0.z) + f64::from(p1.z) + f64::from(p2.z) + f64::from(p3.z)) / 4000.0;
    let tag = if mean < 0.0 {
        0
    } else if mean > SURFACE_SIZE {
        max_tag
    } else {
        (mean / SURFACE_SIZE * f64::from(max_tag)) as i32
    };

    scene.quad(ColorTag::Palette(tag), p0, p1, p2, p3);
}

/// Square frame with nine inner lines each way, on `plane` at 0.
fn draw_scale(scene: &mut Scene, size: f64, plane: Plane) {
    let tag = ColorTag::Palette(SCALE_TAG);
    scene.line_on_plane(tag, plane, (0.0, 0.0), (0.0, size), 0.0);
    scene.line_on_plane(tag, plane, (0.0, size), (size, size), 0.0);
    scene.line_on_plane(tag, plane, (size, size), (size, 0.0), 0.0);
    scene.line_on_plane(tag, plane, (size, 0.0), (0.0, 0.0), 0.0);

    let step = size / SCALE_DIVISIONS as f64;
    for i in 1..SCALE_DIVISIONS {
        let at = step * i as f64;
        scene.line_on_plane(tag, plane, (at, 0.0), (at, size), 0.0);
        scene.line_on_plane(tag, plane, (0.0, at), (size, at), 0.0);
    }
}

/// Extruded ring chart with four slices.
pub fn pie_chart() -> Result<Scene, SectorError> {
    let mut scene = Scene::new();
    let slices = [
        (Rgb::SANDY_BROWN, 1080),
        (Rgb::BLUE, 900),
        (Rgb::GREEN, 720),
        (Rgb::ORANGE, 900),
    ];

    let mut start = 0;
    for (tag, (color, span)) in (1..).zip(slices) {
        scene.set_color(tag, color);
        let mut sector = Sector::new(20.0, 60.0, start, start + span);
        sector.gap = 1.5;
        sector.depth = 10.0;
        scene.build_sector(ColorTag::Palette(tag), &sector)?;
        start += span;
    }

    Ok(scene)
}

/// The logo on each coordinate plane, once per color style.
pub fn text_scene() -> Result<Scene, PathDataError> {
    let path = parse_path_data(LOGO_PATH)?;
    let mut scene = Scene::new();

    scene.set_color(0, Rgb::BLACK);
    scene.text(ColorTag::Palette(0), &path, Plane::XY, TextFlip::NONE, 10.0, 10.0, 10.0);
    scene.text(
        ColorTag::Direct(Rgb::ORANGE),
        &path,
        Plane::XZ,
        TextFlip::NONE,
        10.0,
        10.0,
        10.0,
    );

    scene.set_color(1, Rgb::SANDY_BROWN);
    scene.set_color(2, Rgb::BLUE);
    scene.set_color(3, Rgb::GREEN);
    for i in 0..5 {
        scene.text(
            ColorTag::Palette(i % 4),
            &path,
            Plane::YZ,
            TextFlip::NONE,
            10.0,
            10.0 + 15.0 * f64::from(i),
            10.0,
        );
    }

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet3d_core::{Facet, Shadow};

    #[test]
    fn test_demo_names() {
        assert_eq!(Demo::from_name("surface"), Some(Demo::Surface));
        assert_eq!(Demo::from_name("Pie"), Some(Demo::Pie));
        assert_eq!(Demo::from_name("text"), Some(Demo::Text));
        assert_eq!(Demo::from_name("cube"), None);
    }

    #[test]
    fn test_surface_chart_contents() {
        let scene = surface_chart();
        // Three grids of 4 + 18 lines, then the surface cells.
        assert_eq!(scene.len(), 3 * 22 + SURFACE_STEPS * SURFACE_STEPS);
        assert_eq!(scene.palette_color(SCALE_TAG), Rgb::LIGHT_GRAY);
        let low = scene.palette_color(0);
        assert!(low.r > 0 && low.g == 0 && low.b == 0);

        let quads = scene.faces().iter().filter(|f| f.len() == 4).count();
        assert_eq!(quads, SURFACE_STEPS * SURFACE_STEPS);
        for face in scene.faces().iter().filter(|f| f.len() == 4) {
            match face.tag {
                ColorTag::Palette(tag) => assert!((0..SURFACE_STEPS as i32).contains(&tag)),
                ColorTag::Direct(_) => panic!("surface cells use palette colors"),
            }
        }
    }

    #[test]
    fn test_surface_height_at_origin() {
        assert!((surface_height(0.0, 0.0) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_pie_chart_slices() {
        let scene = pie_chart().unwrap();
        assert_eq!(scene.faces()[0].shadow, Shadow::Darken(20));
        assert_eq!(scene.faces()[scene.len() - 1].shadow, Shadow::Darken(20));
        assert!(scene
            .faces()
            .iter()
            .flat_map(|f| f.points())
            .all(|p| (0..=10_000).contains(&p.z)));

        let tags: std::collections::HashSet<_> = scene.faces().iter().map(|f| f.tag).collect();
        assert_eq!(tags.len(), 4);
        assert_eq!(scene.palette_color(1), Rgb::SANDY_BROWN);
    }

    #[test]
    fn test_text_scene_places_logo_seven_times() {
        let path = parse_path_data(LOGO_PATH).unwrap();
        let lines_per_logo = path
            .points()
            .iter()
            .filter(|p| p.kind == facet3d_core::text::PathPointKind::LineTo)
            .count();
        let scene = text_scene().unwrap();
        assert_eq!(scene.len(), 7 * lines_per_logo);
        assert!(scene.faces().iter().all(|f| f.len() == 2));
    }

    #[test]
    fn test_every_demo_renders() {
        for demo in [Demo::Surface, Demo::Pie, Demo::Text] {
            let scene = demo.build().unwrap();
            let output = scene.render(200, 100, 30.0, 20.0, 10.0, &FixedPoint3::origin());
            assert!(output.is_some(), "{demo:?} produced no output");
        }
    }
}
