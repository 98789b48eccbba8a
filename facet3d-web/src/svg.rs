/// SVG drawing surface
use facet3d_core::{draw::marker_outline, DrawSurface, MarkerShape, Rgb, ScreenPoint};
use std::fmt::Write;

/// Collects draw calls as SVG elements.
pub struct SvgSurface {
    width: i32,
    height: i32,
    body: String,
}

impl SvgSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// Number of elements drawn so far.
    pub fn element_count(&self) -> usize {
        self.body.lines().count()
    }

    /// The complete SVG document.
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }

    fn push(&mut self, element: std::fmt::Arguments<'_>) {
        // Writing to a String cannot fail.
        let _ = self.body.write_fmt(element);
        self.body.push('\n');
    }
}

fn hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

fn points_attr(points: &[ScreenPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl DrawSurface for SvgSurface {
    fn fill_rect(&mut self, origin: ScreenPoint, width: i32, height: i32, color: Rgb) {
        self.push(format_args!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            origin.x,
            origin.y,
            width,
            height,
            hex(color)
        ));
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
        self.push(format_args!(
            "<polygon points=\"{}\" fill=\"{}\"/>",
            points_attr(points),
            hex(color)
        ));
    }

    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb) {
        self.push(format_args!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\"/>",
            from.x,
            from.y,
            to.x,
            to.y,
            hex(color)
        ));
    }

    fn marker(
        &mut self,
        center: ScreenPoint,
        size: i32,
        shape: MarkerShape,
        color: Rgb,
        outline: Option<Rgb>,
    ) {
        let stroke = outline
            .map(|c| format!(" stroke=\"{}\"", hex(c)))
            .unwrap_or_default();
        match shape {
            MarkerShape::Circle | MarkerShape::Dot => self.push(format_args!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"{}/>",
                center.x,
                center.y,
                size,
                hex(color),
                stroke
            )),
            MarkerShape::Triangle | MarkerShape::Rectangle => self.push(format_args!(
                "<polygon points=\"{}\" fill=\"{}\"{}/>",
                points_attr(&marker_outline(center, size, shape)),
                hex(color),
                stroke
            )),
        }
    }
}
