//! 2D draw commands and the surface that consumes them.
//!
//! A render produces an ordered list of [`DrawCommand`]s; later commands
//! paint over earlier ones. Any [`DrawSurface`] can replay the list.

use nalgebra::Point2;

use crate::color::Rgb;
use crate::geometry::MarkerShape;

/// Device-space point.
pub type ScreenPoint = Point2<i32>;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled polygon with three or more vertices.
    Polygon { color: Rgb, points: Vec<ScreenPoint> },
    Line {
        color: Rgb,
        from: ScreenPoint,
        to: ScreenPoint,
    },
    /// Point marker. `size` is the edge length for triangles and
    /// rectangles and the radius for circles and dots. Dots have no outline.
    Marker {
        color: Rgb,
        outline: Option<Rgb>,
        center: ScreenPoint,
        size: i32,
        shape: MarkerShape,
    },
}

/// Result of rendering a non-empty scene.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub width: i32,
    pub height: i32,
    /// Fill for the whole surface, painted before any command.
    pub background: Rgb,
    pub commands: Vec<DrawCommand>,
}

impl RenderOutput {
    /// Clear to the background, then replay every command in order.
    pub fn draw_on<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.fill_rect(
            Point2::new(0, 0),
            self.width,
            self.height,
            self.background,
        );
        replay(&self.commands, surface);
    }
}

/// Something that rasterizes draw commands: a pixel buffer, a terminal
/// grid, an SVG document.
pub trait DrawSurface {
    fn fill_rect(&mut self, origin: ScreenPoint, width: i32, height: i32, color: Rgb);

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb);

    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb);

    fn marker(
        &mut self,
        center: ScreenPoint,
        size: i32,
        shape: MarkerShape,
        color: Rgb,
        outline: Option<Rgb>,
    );

    /// Extent of `text` when drawn as a label; `(0, 0)` if the surface
    /// cannot measure text. Renders never emit labels, so placing them is
    /// up to the caller.
    fn measure_text(&self, _text: &str) -> (i32, i32) {
        (0, 0)
    }
}

/// Dispatch commands to `surface` in order.
pub fn replay<S: DrawSurface + ?Sized>(commands: &[DrawCommand], surface: &mut S) {
    for command in commands {
        match command {
            DrawCommand::Polygon { color, points } => surface.fill_polygon(points, *color),
            DrawCommand::Line { color, from, to } => surface.line(*from, *to, *color),
            DrawCommand::Marker {
                color,
                outline,
                center,
                size,
                shape,
            } => surface.marker(*center, *size, *shape, *color, *outline),
        }
    }
}

/// Corner points of a triangle or rectangle marker, clockwise from top-left.
pub fn marker_outline(center: ScreenPoint, size: i32, shape: MarkerShape) -> Vec<ScreenPoint> {
    let f = size >> 1;
    let (x, y) = (center.x, center.y);
    match shape {
        MarkerShape::Triangle => vec![
            Point2::new(x - f, y - f),
            Point2::new(x + f, y - f),
            Point2::new(x, y + f),
        ],
        MarkerShape::Rectangle => vec![
            Point2::new(x - f, y - f),
            Point2::new(x - f, y + f),
            Point2::new(x + f, y + f),
            Point2::new(x + f, y - f),
        ],
        MarkerShape::Circle | MarkerShape::Dot => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl DrawSurface for Recorder {
        fn fill_rect(&mut self, _origin: ScreenPoint, width: i32, height: i32, _color: Rgb) {
            self.calls.push(format!("rect {width}x{height}"));
        }

        fn fill_polygon(&mut self, points: &[ScreenPoint], _color: Rgb) {
            self.calls.push(format!("polygon {}", points.len()));
        }

        fn line(&mut self, from: ScreenPoint, to: ScreenPoint, _color: Rgb) {
            self.calls
                .push(format!("line {},{} {},{}", from.x, from.y, to.x, to.y));
        }

        fn marker(
            &mut self,
            _center: ScreenPoint,
            size: i32,
            shape: MarkerShape,
            _color: Rgb,
            outline: Option<Rgb>,
        ) {
            self.calls
                .push(format!("marker {shape:?} {size} {}", outline.is_some()));
        }
    }

    #[test]
    fn test_draw_on_clears_then_replays_in_order() {
        let output = RenderOutput {
            width: 40,
            height: 30,
            background: Rgb::WHITE,
            commands: vec![
                DrawCommand::Line {
                    color: Rgb::BLACK,
                    from: Point2::new(0, 1),
                    to: Point2::new(2, 3),
                },
                DrawCommand::Polygon {
                    color: Rgb::RED,
                    points: vec![Point2::new(0, 0), Point2::new(1, 0), Point2::new(1, 1)],
                },
                DrawCommand::Marker {
                    color: Rgb::BLUE,
                    outline: None,
                    center: Point2::new(5, 5),
                    size: 2,
                    shape: MarkerShape::Dot,
                },
            ],
        };

        let mut recorder = Recorder::default();
        output.draw_on(&mut recorder);
        assert_eq!(
            recorder.calls,
            vec!["rect 40x30", "line 0,1 2,3", "polygon 3", "marker Dot 2 false"]
        );
        assert_eq!(recorder.measure_text("label"), (0, 0));
    }

    #[test]
    fn test_marker_outline() {
        let c = Point2::new(10, 10);
        assert_eq!(
            marker_outline(c, 12, MarkerShape::Triangle),
            vec![Point2::new(4, 4), Point2::new(16, 4), Point2::new(10, 16)]
        );
        assert_eq!(marker_outline(c, 12, MarkerShape::Rectangle).len(), 4);
        assert!(marker_outline(c, 12, MarkerShape::Circle).is_empty());
    }
}
