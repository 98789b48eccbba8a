/// Screen-space limits and scaling
use nalgebra::Point2;

use crate::color::Rgb;
use crate::point::FixedPoint3;

/// Render settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Device units left free across the width and height.
    pub margin: i32,
    /// Edge length of triangle/rectangle markers; circles use half as radius.
    pub marker_size: i32,
    pub background: Rgb,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 10,
            marker_size: 12,
            background: Rgb::WHITE,
        }
    }
}

/// Running min/max of X and Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits2D {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Limits2D {
    /// Inverted bounds, so the first update sets all four.
    pub const fn empty() -> Self {
        Self {
            min_x: i32::MAX,
            max_x: i32::MIN,
            min_y: i32::MAX,
            max_y: i32::MIN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn update(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn include(&mut self, p: &FixedPoint3) {
        self.update(p.x, p.y);
    }

    pub fn x_range(&self) -> i64 {
        i64::from(self.max_x) - i64::from(self.min_x)
    }

    pub fn y_range(&self) -> i64 {
        i64::from(self.max_y) - i64::from(self.min_y)
    }
}

impl Default for Limits2D {
    fn default() -> Self {
        Self::empty()
    }
}

/// Maps scene X/Y into device space with one aspect-preserving scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMapping {
    pub min_x: i32,
    pub min_y: i32,
    pub scale: f64,
}

impl ScreenMapping {
    /// Fit `limits` into `width` x `height` less `margin`.
    ///
    /// An axis with zero extent does not constrain the scale; with both
    /// flat the scale is 1. Returns `None` for empty limits.
    pub fn fit(limits: &Limits2D, width: i32, height: i32, margin: i32) -> Option<Self> {
        if limits.is_empty() {
            return None;
        }

        let sx = axis_scale(width - margin, limits.x_range());
        let sy = axis_scale(height - margin, limits.y_range());
        let scale = match (sx, sy) {
            (Some(sx), Some(sy)) => sx.min(sy),
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => 1.0,
        };

        Some(Self {
            min_x: limits.min_x,
            min_y: limits.min_y,
            scale,
        })
    }

    /// Device coordinates, truncated toward zero.
    pub fn map(&self, p: &FixedPoint3) -> Point2<i32> {
        let x = (i64::from(p.x) - i64::from(self.min_x)) as f64 * self.scale;
        let y = (i64::from(p.y) - i64::from(self.min_y)) as f64 * self.scale;
        Point2::new(x as i32, y as i32)
    }
}

fn axis_scale(extent: i32, range: i64) -> Option<f64> {
    if range == 0 {
        None
    } else {
        Some(f64::from(extent) / range as f64)
    }
}
