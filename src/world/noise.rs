//! Seeded 2D noise built on FastNoiseLite
//!
//! Frequency is pinned to 1.0, so callers scale the input themselves
//! (`x / divisor`). Output is always within `[-1, 1]`.

use fastnoise_lite::{FastNoiseLite, NoiseType};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NoiseKind {
    /// Classic Perlin gradient noise.
    Gradient,
    /// OpenSimplex2.
    Simplex,
}

impl NoiseKind {
    fn noise_type(self) -> NoiseType {
        match self {
            NoiseKind::Gradient => NoiseType::Perlin,
            NoiseKind::Simplex => NoiseType::OpenSimplex2,
        }
    }
}

/// One configured noise layer. Evaluation takes `&self` and never mutates.
pub struct NoiseField {
    noise: FastNoiseLite,
}

impl NoiseField {
    pub fn new(kind: NoiseKind, seed: u32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(kind.noise_type()));
        noise.set_frequency(Some(1.0));
        NoiseField { noise }
    }

    pub fn sample(&self, x: f32, z: f32) -> f32 {
        self.noise.get_noise_2d(x, z).clamp(-1.0, 1.0)
    }

    /// Sample remapped to `[0, 1]`.
    pub fn sample_unit(&self, x: f32, z: f32) -> f32 {
        (self.sample(x, z) + 1.0) * 0.5
    }
}

/// One-shot evaluation. Same result as building a [`NoiseField`] and sampling it.
pub fn sample(kind: NoiseKind, x: f32, z: f32, seed: u32) -> f32 {
    NoiseField::new(kind, seed).sample(x, z)
}
