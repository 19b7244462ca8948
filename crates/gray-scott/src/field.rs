//! The two-species state: substrate `U` and activator `V`.

use quantum_fluid_core::field::Field;
use quantum_fluid_core::grid::Grid;
use quantum_fluid_core::prng::Xorshift64;
use serde::{Deserialize, Serialize};

/// `U` inside a seed patch.
pub const PATCH_U: f64 = 0.5;
/// `V` inside a seed patch.
pub const PATCH_V: f64 = 0.25;

/// How the initial square patches are placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchSeeding {
    /// Number of patches.
    pub count: usize,
    /// Patch half-width `s`; a patch covers `[c - s, c + s)` on each axis.
    pub half_width: usize,
}

impl Default for PatchSeeding {
    fn default() -> Self {
        Self {
            count: 5,
            half_width: 3,
        }
    }
}

/// Paired `U` and `V` concentration fields on one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RealField {
    pub(crate) u: Field,
    pub(crate) v: Field,
}

impl RealField {
    /// Background state: `U = 1`, `V = 0` everywhere.
    pub fn uniform(grid: Grid) -> Self {
        Self {
            u: Field::filled(grid, 1.0),
            v: Field::new(grid),
        }
    }

    /// Background plus `seeding.count` patches centered at random points
    /// inside the middle half of each axis, `[n/4, n - n/4)`.
    pub fn seeded(grid: Grid, seeding: PatchSeeding, rng: &mut Xorshift64) -> Self {
        let mut field = Self::uniform(grid);
        let (w, h) = (grid.width(), grid.height());
        for _ in 0..seeding.count {
            let cx = rng.next_usize_in(w / 4, w - w / 4);
            let cy = rng.next_usize_in(h / 4, h - h / 4);
            field.add_patch(cx, cy, seeding.half_width);
        }
        field
    }

    /// Sets `U = 0.5, V = 0.25` on the square `[c - s, c + s)` around
    /// `(cx, cy)`, wrapping at the edges.
    pub fn add_patch(&mut self, cx: usize, cy: usize, half_width: usize) {
        let s = half_width as isize;
        let (cx, cy) = (cx as isize, cy as isize);
        for dy in -s..s {
            for dx in -s..s {
                self.u.set(cx + dx, cy + dy, PATCH_U);
                self.v.set(cx + dx, cy + dy, PATCH_V);
            }
        }
    }

    pub fn grid(&self) -> Grid {
        self.u.grid()
    }

    /// Substrate concentration.
    pub fn u(&self) -> &Field {
        &self.u
    }

    /// Activator concentration.
    pub fn v(&self) -> &Field {
        &self.v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: usize) -> Grid {
        Grid::square(n).unwrap()
    }

    #[test]
    fn uniform_is_all_substrate() {
        let f = RealField::uniform(grid(8));
        assert!(f.u().data().iter().all(|&u| u == 1.0));
        assert!(f.v().data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn add_patch_covers_half_open_square() {
        let mut f = RealField::uniform(grid(16));
        f.add_patch(8, 8, 3);
        let patched = f.v().data().iter().filter(|&&v| v == PATCH_V).count();
        assert_eq!(patched, 36);
        assert_eq!(f.u().get(5, 5), PATCH_U);
        assert_eq!(f.u().get(10, 10), PATCH_U);
        assert_eq!(f.u().get(11, 11), 1.0);
        assert_eq!(f.v().get(4, 8), 0.0);
    }

    #[test]
    fn add_patch_wraps_at_edges() {
        let mut f = RealField::uniform(grid(8));
        f.add_patch(0, 0, 1);
        assert_eq!(f.v().get(-1, -1), PATCH_V);
        assert_eq!(f.v().get(7, 7), PATCH_V);
        assert_eq!(f.v().get(0, 0), PATCH_V);
    }

    #[test]
    fn seeded_centers_stay_in_middle_half() {
        let g = grid(40);
        let mut rng = Xorshift64::new(9);
        let seeding = PatchSeeding {
            count: 20,
            half_width: 1,
        };
        let f = RealField::seeded(g, seeding, &mut rng);
        // centers in [10, 30), patches reach one cell further down
        for (x, y, v) in f.v().iter() {
            if v > 0.0 {
                assert!((9..30).contains(&x), "x = {x} outside middle band");
                assert!((9..30).contains(&y), "y = {y} outside middle band");
            }
        }
    }

    #[test]
    fn seeded_is_deterministic_per_seed() {
        let g = grid(64);
        let a = RealField::seeded(g, PatchSeeding::default(), &mut Xorshift64::new(1));
        let b = RealField::seeded(g, PatchSeeding::default(), &mut Xorshift64::new(1));
        let c = RealField::seeded(g, PatchSeeding::default(), &mut Xorshift64::new(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn seeded_with_zero_count_is_uniform() {
        let g = grid(16);
        let seeding = PatchSeeding {
            count: 0,
            half_width: 3,
        };
        let f = RealField::seeded(g, seeding, &mut Xorshift64::new(5));
        assert_eq!(f, RealField::uniform(g));
    }
}
