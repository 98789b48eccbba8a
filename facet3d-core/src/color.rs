//! RGB and HSV colors, shading, and hue gradients.
//!
//! HSV components are kept as integers: hue in hundredths of a degree
//! (`0..36000`), saturation and value in permille (`0..=1000`).

/// Hue units in a full turn.
pub const HUE_TURN: i32 = 36_000;

/// Saturation/value units for 1.0.
pub const HSV_UNIT: i16 = 1_000;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack the low 24 bits of a `0xRRGGBB` value.
    pub const fn from_packed(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Pack into `0xRRGGBB`.
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Mean of the three channels.
    pub fn brightness(self) -> u8 {
        ((u16::from(self.r) + u16::from(self.g) + u16::from(self.b)) / 3) as u8
    }

    /// Black on light colors, white on dark ones.
    pub fn contrast_outline(self) -> Rgb {
        if self.brightness() > 0x7F {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }

    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self)
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 128, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const LIGHT_GRAY: Rgb = Rgb::new(211, 211, 211);
    pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
    pub const SANDY_BROWN: Rgb = Rgb::new(244, 164, 96);
}

/// Integer HSV color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hsv {
    /// Hundredths of a degree, `0..36000`.
    pub h: i32,
    /// Permille.
    pub s: i16,
    /// Permille.
    pub v: i16,
}

impl Hsv {
    pub const fn new(h: i32, s: i16, v: i16) -> Self {
        Self { h, s, v }
    }

    /// From hue in degrees and saturation/value in `0.0..=1.0`, truncating.
    fn from_unit(h_degrees: f64, s: f64, v: f64) -> Self {
        Self {
            h: (h_degrees * 100.0) as i32,
            s: (s * f64::from(HSV_UNIT)) as i16,
            v: (v * f64::from(HSV_UNIT)) as i16,
        }
    }

    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self)
    }
}

pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let min = r.min(g).min(b);
    let max = r.max(g).max(b);
    let chroma = max - min;

    // Grays have no hue; report 0.
    if chroma == 0.0 {
        return Hsv::from_unit(0.0, 0.0, max);
    }

    let sector = if r == max {
        ((g - b) / chroma).rem_euclid(6.0)
    } else if g == max {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };

    Hsv::from_unit(sector * 60.0, chroma / max, max)
}

/// Channels are truncated, not rounded.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = f64::from(hsv.h.rem_euclid(HUE_TURN)) / 100.0;
    let s = f64::from(hsv.s) / f64::from(HSV_UNIT);
    let v = f64::from(hsv.v) / f64::from(HSV_UNIT);

    let chroma = s * v;
    let hdash = h / 60.0;
    let x = chroma * (1.0 - ((hdash % 2.0) - 1.0).abs());

    let (r, g, b) = match hdash as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let min = v - chroma;
    Rgb::new(
        ((r + min) * 255.0) as u8,
        ((g + min) * 255.0) as u8,
        ((b + min) * 255.0) as u8,
    )
}

/// Lower the HSV value by `percent` of itself. Negative percentages lighten.
pub fn darken(color: Rgb, percent: i32) -> Rgb {
    let mut hsv = rgb_to_hsv(color);

    let v = f64::from(hsv.v) / f64::from(HSV_UNIT);
    let v = (v - v * f64::from(percent) / 100.0).clamp(0.0, 1.0);
    hsv.v = (v * f64::from(HSV_UNIT)) as i16;

    hsv_to_rgb(hsv)
}

/// Which way round the hue circle a gradient travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HueDirection {
    /// The shorter arc from start hue to end hue.
    #[default]
    Clockwise,
    /// The complement of the shorter arc.
    CounterClockwise,
}

/// The single value shared by every gradient sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientValue {
    #[default]
    Average,
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GradientSaturation {
    /// Step from the start saturation toward the end saturation.
    #[default]
    Interpolate,
    /// Every sample uses the start saturation.
    AlignStart,
    /// Every sample uses this saturation (`0.0..=1.0`).
    Replace(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GradientOptions {
    pub direction: HueDirection,
    pub value: GradientValue,
    pub saturation: GradientSaturation,
}

/// Hue-interpolated gradient of `steps` colors.
pub fn gradient(start: Rgb, end: Rgb, steps: usize, options: &GradientOptions) -> Vec<Rgb> {
    gradient_hsv(start, end, steps, options)
        .into_iter()
        .map(hsv_to_rgb)
        .collect()
}

/// As [`gradient`], before conversion back to RGB.
///
/// `steps == 0` yields nothing and `steps == 1` yields only the start hue.
pub fn gradient_hsv(start: Rgb, end: Rgb, steps: usize, options: &GradientOptions) -> Vec<Hsv> {
    let c0 = rgb_to_hsv(start);
    let c1 = rgb_to_hsv(end);

    let value = match options.value {
        GradientValue::Min => c0.v.min(c1.v),
        GradientValue::Max => c0.v.max(c1.v),
        GradientValue::Average => ((i32::from(c0.v) + i32::from(c1.v)) >> 1) as i16,
    };

    let forward = (c1.h - c0.h).rem_euclid(HUE_TURN);
    let shortest = if forward <= HUE_TURN / 2 {
        forward
    } else {
        forward - HUE_TURN
    };
    let arc = match options.direction {
        HueDirection::Clockwise => shortest,
        HueDirection::CounterClockwise if shortest >= 0 => shortest - HUE_TURN,
        HueDirection::CounterClockwise => shortest + HUE_TURN,
    };

    let (s0, s_step) = match options.saturation {
        GradientSaturation::Replace(s) => ((s.clamp(0.0, 1.0) * f64::from(HSV_UNIT)) as i32, 0),
        GradientSaturation::AlignStart => (i32::from(c0.s), 0),
        GradientSaturation::Interpolate => {
            let delta = f64::from(i32::from(c1.s) - i32::from(c0.s));
            (i32::from(c0.s), (delta / steps as f64) as i32)
        }
    };

    let intervals = steps.saturating_sub(1).max(1) as f64;
    (0..steps)
        .map(|i| {
            let offset = (f64::from(arc) * i as f64 / intervals).round() as i32;
            let h = (c0.h + offset).rem_euclid(HUE_TURN);
            let s = (s0 + s_step * i as i32) as i16;
            Hsv::new(h, s, value)
        })
        .collect()
}
