//! Deterministic decoration rules
//!
//! Rules are checked in a fixed order and the first match wins, so a sample
//! never carries more than one decoration. Each rule reads its own siting
//! noise channel, independent from the terrain-shape noise.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::core::biome::TerrainSample;
use crate::core::decoration::{DecorationKind, Placement};
use crate::settings::DecorationParams;
use crate::world::noise::{NoiseField, NoiseKind};

// Seed offsets, kept clear of the heightfield layers
const LAYER_WELL: u32 = 16;
const LAYER_HOUSE: u32 = 17;
const LAYER_TREE: u32 = 18;
const LAYER_VARIANT: u32 = 19;
const LAYER_ROTATION: u32 = 20;

/// Siting noise values at one sample, each in `[-1, 1]`.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct SitingNoise {
    pub well: f32,
    pub house: f32,
    pub tree: f32,
    pub variant: f32,
}

/// Decides which decoration, if any, is anchored on a sample.
pub fn classify(
    sample: &TerrainSample,
    siting: &SitingNoise,
    params: &DecorationParams,
) -> Option<DecorationKind> {
    if !sample.biome.is_vegetated() {
        return None;
    }

    if sample.height > params.well_min_height
        && sample.temperature < params.well_max_temperature
        && siting.well > params.well_siting
    {
        return Some(DecorationKind::Well);
    }

    if params.house_height.contains(sample.height)
        && params.house_temperature.contains(sample.temperature)
        && siting.house > params.house_siting
    {
        return Some(DecorationKind::House);
    }

    if params.tree_height.contains(sample.height)
        && params.tree_temperature.contains(sample.temperature)
        && sample.moisture > params.tree_min_moisture
        && siting.tree > params.tree_siting
    {
        let kind = if siting.variant < -params.tree_variant_split {
            DecorationKind::TreeA
        } else if siting.variant > params.tree_variant_split {
            DecorationKind::TreeB
        } else {
            DecorationKind::TreeC
        };
        return Some(kind);
    }

    None
}

pub struct DecorationPlacer {
    params: DecorationParams,
    well: NoiseField,
    house: NoiseField,
    tree: NoiseField,
    variant: NoiseField,
    rotation: NoiseField,
}

impl DecorationPlacer {
    pub fn new(seed: u32, params: DecorationParams) -> Self {
        let layer = |offset: u32| NoiseField::new(NoiseKind::Simplex, seed.wrapping_add(offset));
        DecorationPlacer {
            params,
            well: layer(LAYER_WELL),
            house: layer(LAYER_HOUSE),
            tree: layer(LAYER_TREE),
            variant: layer(LAYER_VARIANT),
            rotation: NoiseField::new(NoiseKind::Gradient, seed.wrapping_add(LAYER_ROTATION)),
        }
    }

    pub fn params(&self) -> &DecorationParams {
        &self.params
    }

    pub fn siting(&self, x: f32, z: f32) -> SitingNoise {
        let s = self.params.siting_divisor;
        let v = self.params.variant_divisor;
        SitingNoise {
            well: self.well.sample(x / s, z / s),
            house: self.house.sample(x / s, z / s),
            tree: self.tree.sample(x / s, z / s),
            variant: self.variant.sample(x / v, z / v),
        }
    }

    /// Rotation about Y in `[0, TAU]`, a pure function of the position.
    pub fn yaw(&self, x: f32, z: f32) -> f32 {
        let r = self.params.rotation_divisor;
        self.rotation.sample_unit(x / r, z / r) * TAU
    }

    /// Runs the rules for the sample at world `(x, z)`. `local` is the anchor
    /// relative to the owning chunk's origin.
    pub fn place(&self, sample: &TerrainSample, x: f32, z: f32, local: Vec3) -> Option<Placement> {
        let kind = classify(sample, &self.siting(x, z), &self.params)?;
        Some(Placement {
            kind,
            local,
            yaw: self.yaw(x, z),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::biome::Biome;
    use test_case::test_case;

    fn land(height: f32, temperature: f32, moisture: f32) -> TerrainSample {
        TerrainSample {
            height,
            temperature,
            moisture,
            biome: Biome::Land,
        }
    }

    const EVERYWHERE: SitingNoise = SitingNoise {
        well: 0.99,
        house: 0.99,
        tree: 0.99,
        variant: 0.0,
    };

    #[test]
    fn cold_high_ground_gets_a_well_only() {
        let params = DecorationParams::default();
        let sample = land(10.0, 0.1, 0.5);
        assert_eq!(classify(&sample, &EVERYWHERE, &params), Some(DecorationKind::Well));
    }

    #[test]
    fn house_wins_over_tree() {
        let params = DecorationParams::default();
        let sample = land(5.0, 0.4, 0.3);
        assert_eq!(classify(&sample, &EVERYWHERE, &params), Some(DecorationKind::House));

        let no_house = SitingNoise {
            house: -1.0,
            ..EVERYWHERE
        };
        assert_eq!(classify(&sample, &no_house, &params), Some(DecorationKind::TreeC));
    }

    #[test_case(-0.9, DecorationKind::TreeA)]
    #[test_case(0.0, DecorationKind::TreeC)]
    #[test_case(0.9, DecorationKind::TreeB)]
    fn tree_variant_follows_bands(variant: f32, expected: DecorationKind) {
        let params = DecorationParams::default();
        let siting = SitingNoise {
            house: -1.0,
            variant,
            ..EVERYWHERE
        };
        assert_eq!(classify(&land(20.0, 0.5, 0.3), &siting, &params), Some(expected));
    }

    #[test_case(Biome::Water)]
    #[test_case(Biome::Rock)]
    fn barren_samples_stay_empty(biome: Biome) {
        let params = DecorationParams::default();
        let sample = TerrainSample {
            biome,
            ..land(10.0, 0.1, 0.5)
        };
        assert_eq!(classify(&sample, &EVERYWHERE, &params), None);
    }

    #[test]
    fn low_siting_noise_places_nothing() {
        let params = DecorationParams::default();
        let quiet = SitingNoise {
            well: -1.0,
            house: -1.0,
            tree: -1.0,
            variant: 0.0,
        };
        assert_eq!(classify(&land(10.0, 0.1, 0.5), &quiet, &params), None);
        assert_eq!(classify(&land(5.0, 0.4, 0.3), &quiet, &params), None);
    }

    #[test]
    fn placement_is_deterministic() {
        let a = DecorationPlacer::new(1925401, DecorationParams::default());
        let b = DecorationPlacer::new(1925401, DecorationParams::default());
        for i in 0..200 {
            let (x, z) = (i as f32 * 3.0, i as f32 * -7.0);
            assert_eq!(a.siting(x, z), b.siting(x, z));
            let yaw = a.yaw(x, z);
            assert_eq!(yaw.to_bits(), b.yaw(x, z).to_bits());
            assert!((0.0..=TAU).contains(&yaw));
        }
    }
}
