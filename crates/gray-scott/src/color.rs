//! Activator-density color mapping.

use crate::field::RealField;
use quantum_fluid_core::color::{Rgb, RgbBuffer};
use serde::{Deserialize, Serialize};

/// Three base colors blended by activator density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrayScottPalette {
    /// Empty regions (`V = 0`).
    pub deep: Rgb,
    /// Weighted linearly by `V`, boosted by 1.5.
    pub glow: Rgb,
    /// Weighted by `V^2.5`, only visible near saturation.
    pub heart: Rgb,
}

impl Default for GrayScottPalette {
    fn default() -> Self {
        Self {
            deep: Rgb::new(20.0, 0.0, 50.0),
            glow: Rgb::new(100.0, 255.0, 255.0),
            heart: Rgb::new(255.0, 150.0, 0.0),
        }
    }
}

impl GrayScottPalette {
    /// `(1 - v)·deep + 1.5·v·glow + v^2.5·heart`, unclamped.
    pub fn color(&self, v: f64) -> Rgb {
        self.deep.scale(1.0 - v) + self.glow.scale(v * 1.5) + self.heart.scale(v.powf(2.5))
    }
}

/// Renders the activator field through `palette`, clamped and rounded to bytes.
pub fn gray_scott_rgb(field: &RealField, palette: &GrayScottPalette) -> RgbBuffer {
    let v = field.v().data();
    RgbBuffer::from_fn(field.grid(), |i| palette.color(v[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantum_fluid_core::grid::Grid;

    fn single_cell(v: f64) -> RealField {
        let mut field = RealField::uniform(Grid::square(1).unwrap());
        field.v.data_mut()[0] = v;
        field
    }

    #[test]
    fn zero_activator_is_exactly_deep() {
        let palette = GrayScottPalette::default();
        let buf = gray_scott_rgb(&single_cell(0.0), &palette);
        assert_eq!(buf.pixel(0, 0), [20, 0, 50]);
    }

    #[test]
    fn full_activator_is_boosted_glow_plus_heart_clamped() {
        let palette = GrayScottPalette::default();
        let c = palette.color(1.0);
        assert_eq!((c.r, c.g, c.b), (405.0, 532.5, 382.5));
        let buf = gray_scott_rgb(&single_cell(1.0), &palette);
        assert_eq!(buf.pixel(0, 0), [255, 255, 255]);
    }

    #[test]
    fn full_activator_respects_custom_palette_without_clamping() {
        let palette = GrayScottPalette {
            deep: Rgb::new(0.0, 0.0, 0.0),
            glow: Rgb::new(10.0, 20.0, 30.0),
            heart: Rgb::new(1.0, 2.0, 3.0),
        };
        let buf = gray_scott_rgb(&single_cell(1.0), &palette);
        assert_eq!(buf.pixel(0, 0), [16, 32, 48]);
    }

    #[test]
    fn mid_activator_blends_all_three_terms() {
        let palette = GrayScottPalette::default();
        let v: f64 = 0.25;
        let heart = v.powf(2.5);
        let expected_r = 0.75 * 20.0 + 0.375 * 100.0 + heart * 255.0;
        let c = palette.color(v);
        assert!((c.r - expected_r).abs() < 1e-12);
        let buf = gray_scott_rgb(&single_cell(v), &palette);
        assert_eq!(buf.pixel(0, 0)[0], expected_r.round() as u8);
    }

    #[test]
    fn mapping_is_deterministic_and_sized_to_grid() {
        let mut field = RealField::uniform(Grid::new(6, 4).unwrap());
        field.add_patch(3, 2, 1);
        let palette = GrayScottPalette::default();
        let a = gray_scott_rgb(&field, &palette);
        let b = gray_scott_rgb(&field, &palette);
        assert_eq!(a, b);
        assert_eq!((a.width(), a.height()), (6, 4));
    }
}
