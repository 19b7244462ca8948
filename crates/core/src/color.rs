//! RGB color triples, frame buffers, and the HSV sextant conversion.
//!
//! Colors are carried as f64 channels on the 0–255 scale while they are
//! being mixed, and quantized to bytes only when written into an
//! [`RgbBuffer`].

use crate::error::EngineError;
use crate::grid::Grid;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGB color with f64 channels on the 0–255 scale.
///
/// Channels may leave [0, 255] during mixing; [`Rgb::to_bytes`] clamps.
/// Serializes as a hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive).
    pub fn from_hex(hex: &str) -> Result<Rgb, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(f64::from)
                .map_err(|e| EngineError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Rgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Clamps each channel to [0, 255] and rounds to the nearest byte.
    pub fn to_bytes(self) -> [u8; 3] {
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    pub fn scale(self, k: f64) -> Rgb {
        Rgb::new(self.r * k, self.g * k, self.b * k)
    }
}

impl std::ops::Add for Rgb {
    type Output = Rgb;

    fn add(self, rhs: Rgb) -> Rgb {
        Rgb::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn quantize(c: f64) -> u8 {
    if c.is_nan() {
        return 0;
    }
    c.clamp(0.0, 255.0).round() as u8
}

/// Converts hue, saturation and value (each in [0, 1]) to RGB on the 0–255 scale.
///
/// Standard sextant decomposition: the hue circle is split into six 60°
/// sectors, each assigning `v`, `p`, `q`, `t` to the channels differently.
/// A hue of exactly 1.0 lands in sector 0, same as 0.0.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let h6 = h * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(r * 255.0, g * 255.0, b * 255.0)
}

/// Row-major RGB8 frame, three bytes per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbBuffer {
    /// Black buffer matching `grid`.
    pub fn new(grid: Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            data: vec![0; grid.len() * 3],
        }
    }

    /// Builds a buffer by mapping every cell index through `color`.
    pub fn from_fn(grid: Grid, mut color: impl FnMut(usize) -> Rgb) -> Self {
        let data = (0..grid.len())
            .flat_map(|i| color(i).to_bytes())
            .collect();
        Self {
            width: grid.width(),
            height: grid.height(),
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw bytes, `width * height * 3` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// The `[r, g, b]` triple at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Keeps every `stride`-th row and column, starting at (0, 0).
    ///
    /// A stride of 0 or 1 returns a copy.
    pub fn subsample(&self, stride: usize) -> RgbBuffer {
        let stride = stride.max(1);
        let width = self.width.div_ceil(stride);
        let height = self.height.div_ceil(stride);
        let mut data = Vec::with_capacity(width * height * 3);
        for y in (0..self.height).step_by(stride) {
            for x in (0..self.width).step_by(stride) {
                data.extend_from_slice(&self.pixel(x, y));
            }
        }
        RgbBuffer {
            width,
            height,
            data,
        }
    }

    /// Expands to RGBA8 with opaque alpha.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.data
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect()
    }
}
