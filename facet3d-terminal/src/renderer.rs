/// ASCII drawing surface for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use facet3d_core::{draw::marker_outline, DrawSurface, MarkerShape, Rgb, ScreenPoint};
use std::io::Write;

/// Character luminosity ramp for filled areas (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['@', '%', '#', '*', '+', '=', '-', ':', '.'];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Rgb,
}

/// Character grid that replays draw commands. Later draws overwrite
/// earlier ones; there is no depth test.
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![
                Cell {
                    ch: ' ',
                    color: Rgb::WHITE,
                };
                width * height
            ],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    /// Character at `(x, y)`, if inside the grid.
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        self.index(x as i32, y as i32).map(|i| self.cells[i].ch)
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Rgb> {
        self.index(x as i32, y as i32).map(|i| self.cells[i].color)
    }

    /// One line of text per row.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|c| c.ch).collect())
            .collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    fn plot(&mut self, x: i32, y: i32, ch: char, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { ch, color };
        }
    }

    fn fill_triangle(&mut self, v0: (f32, f32), v1: (f32, f32), v2: (f32, f32), ch: char, color: Rgb) {
        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to grid bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    // Accept either winding.
                    let inside = (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0)
                        || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
                    if inside {
                        self.plot(x, y, ch, color);
                    }
                }
            }
        }
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, ch: char, color: Rgb) {
        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, ch, color);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_outline(&mut self, points: &[ScreenPoint], ch: char, color: Rgb) {
        for (i, &p) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            self.draw_line(p, next, ch, color);
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Rgb> = None;
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                if current != Some(cell.color) {
                    let Rgb { r, g, b } = cell.color;
                    writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.ch))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for AsciiCanvas {
    fn fill_rect(&mut self, origin: ScreenPoint, width: i32, height: i32, color: Rgb) {
        for y in origin.y..origin.y + height {
            for x in origin.x..origin.x + width {
                self.plot(x, y, ' ', color);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
        if points.len() < 3 {
            return;
        }
        let ch = shade_char(color);
        let v: Vec<(f32, f32)> = points.iter().map(|p| (p.x as f32, p.y as f32)).collect();
        // Fan from the first vertex; faces are convex.
        for i in 1..v.len() - 1 {
            self.fill_triangle(v[0], v[i], v[i + 1], ch, color);
        }
    }

    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb) {
        self.draw_line(from, to, line_char(from, to), color);
    }

    fn marker(
        &mut self,
        center: ScreenPoint,
        size: i32,
        shape: MarkerShape,
        color: Rgb,
        outline: Option<Rgb>,
    ) {
        match shape {
            MarkerShape::Dot => self.plot(center.x, center.y, '.', color),
            MarkerShape::Circle => {
                for y in -size..=size {
                    for x in -size..=size {
                        let d = x * x + y * y;
                        if d <= size * size {
                            let on_edge = d > (size - 1) * (size - 1);
                            match outline {
                                Some(edge) if on_edge && size > 1 => {
                                    self.plot(center.x + x, center.y + y, 'o', edge)
                                }
                                _ => self.plot(center.x + x, center.y + y, 'O', color),
                            }
                        }
                    }
                }
            }
            MarkerShape::Triangle | MarkerShape::Rectangle => {
                let corners = marker_outline(center, size, shape);
                self.fill_polygon(&corners, color);
                if let Some(edge) = outline {
                    self.draw_outline(&corners, marker_char(shape), edge);
                }
            }
        }
    }

    fn measure_text(&self, text: &str) -> (i32, i32) {
        (text.chars().count() as i32, 1)
    }
}

/// Ramp character for a fill color: darker colors get denser glyphs.
fn shade_char(color: Rgb) -> char {
    let idx = color.brightness() as usize * (LUMINOSITY_RAMP.len() - 1) / 255;
    LUMINOSITY_RAMP[idx.min(LUMINOSITY_RAMP.len() - 1)]
}

fn line_char(from: ScreenPoint, to: ScreenPoint) -> char {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dy.abs() * 2 <= dx.abs() {
        '-'
    } else if dx.abs() * 2 <= dy.abs() {
        '|'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}

fn marker_char(shape: MarkerShape) -> char {
    match shape {
        MarkerShape::Triangle => '^',
        _ => '#',
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet3d_core::{ColorTag, FixedPoint3, Scene};
    use nalgebra::Point2;

    #[test]
    fn test_fill_rect_clears_grid() {
        let mut canvas = AsciiCanvas::new(4, 3);
        canvas.line(Point2::new(0, 0), Point2::new(3, 0), Rgb::BLACK);
        canvas.fill_rect(Point2::new(0, 0), 4, 3, Rgb::LIGHT_GRAY);
        assert!(canvas.rows().iter().all(|r| r == "    "));
        assert_eq!(canvas.color_at(3, 2), Some(Rgb::LIGHT_GRAY));
    }

    #[test]
    fn test_line_characters() {
        let mut canvas = AsciiCanvas::new(5, 5);
        canvas.line(Point2::new(0, 0), Point2::new(4, 0), Rgb::BLACK);
        canvas.line(Point2::new(0, 1), Point2::new(0, 4), Rgb::BLACK);
        canvas.line(Point2::new(1, 1), Point2::new(4, 4), Rgb::BLACK);
        assert_eq!(canvas.rows()[0], "-----");
        assert_eq!(canvas.char_at(0, 3), Some('|'));
        assert_eq!(canvas.char_at(3, 3), Some('\\'));
    }

    #[test]
    fn test_polygon_fill_either_winding() {
        let square = [
            Point2::new(1, 1),
            Point2::new(4, 1),
            Point2::new(4, 4),
            Point2::new(1, 4),
        ];
        let mut cw = AsciiCanvas::new(6, 6);
        cw.fill_polygon(&square, Rgb::BLACK);
        let mut ccw = AsciiCanvas::new(6, 6);
        let reversed: Vec<_> = square.iter().rev().copied().collect();
        ccw.fill_polygon(&reversed, Rgb::BLACK);

        assert_eq!(cw.rows(), ccw.rows());
        assert_eq!(cw.char_at(2, 2), Some('@'));
        assert_eq!(cw.char_at(0, 0), Some(' '));
    }

    #[test]
    fn test_brightness_picks_ramp_char() {
        assert_eq!(shade_char(Rgb::BLACK), '@');
        assert_eq!(shade_char(Rgb::WHITE), '.');
    }

    #[test]
    fn test_measure_text_counts_cells() {
        let canvas = AsciiCanvas::new(3, 3);
        assert_eq!(canvas.measure_text("F3D"), (3, 1));
        assert_eq!(canvas.measure_text(""), (0, 1));
    }

    #[test]
    fn test_clipping_outside_grid() {
        let mut canvas = AsciiCanvas::new(3, 3);
        canvas.line(Point2::new(-5, 1), Point2::new(10, 1), Rgb::BLACK);
        canvas.marker(Point2::new(-10, -10), 3, MarkerShape::Circle, Rgb::RED, None);
        assert_eq!(canvas.rows()[1], "---");
        assert_eq!(canvas.char_at(3, 0), None);
    }

    #[test]
    fn test_markers() {
        let mut canvas = AsciiCanvas::new(9, 9);
        canvas.marker(Point2::new(4, 4), 0, MarkerShape::Dot, Rgb::RED, None);
        assert_eq!(canvas.char_at(4, 4), Some('.'));

        canvas.marker(
            Point2::new(4, 4),
            4,
            MarkerShape::Rectangle,
            Rgb::BLUE,
            Some(Rgb::WHITE),
        );
        assert_eq!(canvas.char_at(2, 2), Some('#'));
        assert_eq!(canvas.color_at(2, 2), Some(Rgb::WHITE));
        assert_eq!(canvas.color_at(4, 4), Some(Rgb::BLUE));
    }

    #[test]
    fn test_replays_scene_render() {
        let mut scene = Scene::new();
        scene.set_color(1, Rgb::BLACK);
        scene.line(
            ColorTag::Palette(1),
            FixedPoint3::from_mm(0.0, 0.0, 0.0),
            FixedPoint3::from_mm(10.0, 0.0, 0.0),
        );
        let output = scene
            .render(20, 5, 0.0, 0.0, 0.0, &FixedPoint3::origin())
            .unwrap();

        let mut canvas = AsciiCanvas::new(20, 5);
        output.draw_on(&mut canvas);
        assert_eq!(canvas.rows()[0], "-".repeat(11) + &" ".repeat(9));
    }

    #[test]
    fn test_draw_writes_every_row() {
        let mut canvas = AsciiCanvas::new(3, 2);
        canvas.fill_rect(Point2::new(0, 0), 3, 2, Rgb::WHITE);
        let mut out = Vec::new();
        canvas.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("\r\n").count(), 2);
    }
}
