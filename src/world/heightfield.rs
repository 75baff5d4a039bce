//! Height, temperature and moisture for a single world position.
//!
//! The recipe runs in a fixed order: climate, three height octaves, mountain
//! amplification, the sea-level floor, then rock patches. Rock patches run
//! last and may flatten terrain the earlier steps produced.

use crate::core::biome::{Biome, TerrainSample};
use crate::settings::TerrainParams;
use crate::world::noise::{NoiseField, NoiseKind};

// Seed offsets per layer
const LAYER_TEMPERATURE: u32 = 0;
const LAYER_MOISTURE: u32 = 1;
const LAYER_DETAIL: u32 = 2;
const LAYER_MEDIUM: u32 = 3;
const LAYER_CONTINENT: u32 = 4;
const LAYER_MOUNTAIN_MASK: u32 = 5;
const LAYER_MOUNTAIN_THRESHOLD: u32 = 6;
const LAYER_ROCK: u32 = 7;

pub struct HeightfieldSynth {
    params: TerrainParams,
    temperature: NoiseField,
    moisture: NoiseField,
    detail: NoiseField,
    medium: NoiseField,
    continent: NoiseField,
    mountain_mask: NoiseField,
    mountain_threshold: NoiseField,
    rock: NoiseField,
}

impl HeightfieldSynth {
    pub fn new(seed: u32, params: TerrainParams) -> Self {
        let layer = |offset: u32| NoiseField::new(NoiseKind::Simplex, seed.wrapping_add(offset));
        HeightfieldSynth {
            params,
            temperature: layer(LAYER_TEMPERATURE),
            moisture: layer(LAYER_MOISTURE),
            detail: layer(LAYER_DETAIL),
            medium: layer(LAYER_MEDIUM),
            continent: layer(LAYER_CONTINENT),
            mountain_mask: layer(LAYER_MOUNTAIN_MASK),
            mountain_threshold: layer(LAYER_MOUNTAIN_THRESHOLD),
            rock: layer(LAYER_ROCK),
        }
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    pub fn evaluate(&self, x: f32, z: f32) -> TerrainSample {
        let p = &self.params;

        let temperature = self
            .temperature
            .sample_unit(x / p.temperature_divisor, z / p.temperature_divisor);
        let moisture = self
            .moisture
            .sample_unit(x / p.moisture_divisor, z / p.moisture_divisor)
            .min(p.moisture_cap - temperature);

        let detail = self.detail.sample(x / p.detail_divisor, z / p.detail_divisor)
            * (moisture + p.detail_moisture_bias);
        let medium =
            self.medium.sample(x / p.medium_divisor, z / p.medium_divisor) * p.medium_amplitude;
        let continent = (self
            .continent
            .sample(x / p.continent_divisor, z / p.continent_divisor)
            * p.continent_amplitude)
            .clamp(0.0, p.continent_amplitude);
        let mut height = detail + medium + continent;

        // Peaks only where the mask dips under its own threshold field
        let mask = self
            .mountain_mask
            .sample(x / p.mountain_divisor, z / p.mountain_divisor);
        let mask_threshold = self
            .mountain_threshold
            .sample(x / p.mountain_divisor, z / p.mountain_divisor);
        if mask < mask_threshold && height > p.mountain_threshold {
            height *= 1.0 + (mask_threshold - mask) * height / p.mountain_sharpness;
        }

        let raw = height;
        let mut biome = if raw < 0.0 { Biome::Water } else { Biome::Land };
        let mut height = raw.max(0.0);

        let rock_noise = self.rock.sample(x / p.rock_divisor, z / p.rock_divisor).abs();
        let rock_limit = p.rock_max_noise.min(((p.rock_height - raw) / p.rock_falloff).abs());
        if rock_noise < rock_limit && height < p.rock_height {
            height *= p.rock_flatten;
            biome = Biome::Rock;
        }

        TerrainSample {
            height,
            temperature,
            moisture,
            biome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> impl Iterator<Item = (f32, f32)> {
        (-40..40).flat_map(|i| (-40..40).map(move |j| (i as f32 * 37.0, j as f32 * 41.0)))
    }

    #[test]
    fn samples_respect_bounds() {
        let synth = HeightfieldSynth::new(1925401, TerrainParams::default());
        for (x, z) in region() {
            let s = synth.evaluate(x, z);
            assert!(s.height >= 0.0, "negative height at ({x}, {z})");
            assert!((0.0..=1.0).contains(&s.temperature));
            assert!(s.moisture <= 0.99 - s.temperature);
        }
    }

    #[test]
    fn evaluation_is_bit_identical() {
        let a = HeightfieldSynth::new(42, TerrainParams::default());
        let b = HeightfieldSynth::new(42, TerrainParams::default());
        for (x, z) in region() {
            let (sa, sb) = (a.evaluate(x, z), b.evaluate(x, z));
            assert_eq!(sa.height.to_bits(), sb.height.to_bits());
            assert_eq!(sa.temperature.to_bits(), sb.temperature.to_bits());
            assert_eq!(sa.moisture.to_bits(), sb.moisture.to_bits());
            assert_eq!(sa.biome, sb.biome);
        }
    }

    #[test]
    fn tags_match_geometry() {
        let params = TerrainParams::default();
        let synth = HeightfieldSynth::new(9, params.clone());
        for (x, z) in region() {
            let s = synth.evaluate(x, z);
            match s.biome {
                Biome::Water => assert_eq!(s.height, 0.0),
                Biome::Rock => assert!(s.height < params.rock_height * params.rock_flatten),
                Biome::Land => {}
            }
        }
    }

    #[test]
    fn mountains_only_raise_terrain() {
        let flat_params = TerrainParams {
            mountain_threshold: f32::MAX,
            ..Default::default()
        };
        let amplified = HeightfieldSynth::new(5, TerrainParams::default());
        let flat = HeightfieldSynth::new(5, flat_params);
        for (x, z) in region() {
            assert!(amplified.evaluate(x, z).height >= flat.evaluate(x, z).height);
        }
    }

    #[test]
    fn without_mountains_height_is_bounded_by_octaves() {
        let params = TerrainParams {
            mountain_threshold: f32::MAX,
            ..Default::default()
        };
        let ceiling = (params.moisture_cap + params.detail_moisture_bias)
            + params.medium_amplitude
            + params.continent_amplitude;
        let synth = HeightfieldSynth::new(77, params);
        for (x, z) in region() {
            assert!(synth.evaluate(x, z).height <= ceiling);
        }
    }
}
