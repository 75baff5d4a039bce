//! Thread-safe chunk generation
//!
//! A `ChunkGenerator` owns every noise layer for one parameter set and fills
//! a chunk in two passes: terrain samples first, then decorations on top of
//! the finished grid. It never touches shared state, so each loader worker
//! can own a copy.

use glam::Vec3;

use crate::core::biome::TerrainSample;
use crate::core::chunk::Chunk;
use crate::core::coord::ChunkCoord;
use crate::settings::GenerationParams;
use crate::world::decoration::DecorationPlacer;
use crate::world::heightfield::HeightfieldSynth;

pub struct ChunkGenerator {
    params: GenerationParams,
    heightfield: HeightfieldSynth,
    decorations: DecorationPlacer,
}

impl ChunkGenerator {
    pub fn new(params: &GenerationParams) -> Self {
        ChunkGenerator {
            params: params.clone(),
            heightfield: HeightfieldSynth::new(params.seed, params.terrain.clone()),
            decorations: DecorationPlacer::new(params.seed, params.decorations.clone()),
        }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn seed(&self) -> u32 {
        self.params.seed
    }

    pub fn chunk_size(&self) -> i32 {
        self.params.chunk_size
    }

    /// Terrain at an arbitrary world position, independent of chunk layout.
    pub fn evaluate(&self, x: f32, z: f32) -> TerrainSample {
        self.heightfield.evaluate(x, z)
    }

    /// Generate a complete chunk at the given coordinate. The result is still
    /// `Generating`; the store flips it to `Resident` when it publishes it.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> Chunk {
        let size = self.params.chunk_size;
        let mut chunk = Chunk::new(coord, size);
        let origin = coord.origin(size);

        // Terrain pass
        for lz in 0..size {
            for lx in 0..size {
                let sample = self
                    .heightfield
                    .evaluate(origin.x + lx as f32, origin.z + lz as f32);
                chunk.set_sample(lx, lz, &sample);
            }
        }

        // Decorations pass
        for lz in 0..size {
            for lx in 0..size {
                let Some(sample) = chunk.sample(lx, lz) else {
                    continue;
                };
                let local = Vec3::new(lx as f32, sample.height, lz as f32);
                if let Some(placement) = self.decorations.place(
                    &sample,
                    origin.x + lx as f32,
                    origin.z + lz as f32,
                    local,
                ) {
                    chunk.push_decoration(placement);
                }
            }
        }

        chunk
    }
}

// Allow cloning for worker threads
impl Clone for ChunkGenerator {
    fn clone(&self) -> Self {
        ChunkGenerator::new(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn scenario_params() -> GenerationParams {
        GenerationParams {
            seed: 1925401,
            chunk_size: 96,
            ..Default::default()
        }
    }

    #[test]
    fn origin_chunk_regenerates_identically() {
        let generator = ChunkGenerator::new(&scenario_params());
        let first = generator.generate_chunk(ChunkCoord::new(0, 0));
        let second = generator.clone().generate_chunk(ChunkCoord::new(0, 0));

        assert_eq!(first.heights().len(), 96 * 96);
        let bits = |c: &Chunk| c.heights().iter().map(|h| h.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first), bits(&second));
        assert_eq!(first.biome_uv(), second.biome_uv());
        assert_eq!(first.decorations(), second.decorations());
    }

    #[test]
    fn neighbouring_chunks_differ() {
        let generator = ChunkGenerator::new(&scenario_params());
        let a = generator.generate_chunk(ChunkCoord::new(0, 0));
        let b = generator.generate_chunk(ChunkCoord::new(1, 0));
        assert_ne!(a.heights(), b.heights());
    }

    #[test]
    fn grid_matches_point_evaluation() {
        let generator = ChunkGenerator::new(&scenario_params());
        let coord = ChunkCoord::new(-3, 2);
        let chunk = generator.generate_chunk(coord);
        let origin = coord.origin(96);
        for (lx, lz) in [(0, 0), (95, 0), (17, 63), (95, 95)] {
            let expected = generator.evaluate(origin.x + lx as f32, origin.z + lz as f32);
            assert_eq!(chunk.sample(lx, lz), Some(expected));
        }
    }

    #[test]
    fn decorations_sit_on_their_sample() {
        let generator = ChunkGenerator::new(&scenario_params());
        let mut anchors = FxHashSet::default();
        for coord in ChunkCoord::new(0, 0).window(1) {
            let chunk = generator.generate_chunk(coord);
            anchors.clear();
            for placement in chunk.decorations() {
                let (lx, lz) = (placement.local.x as i32, placement.local.z as i32);
                assert!((0..96).contains(&lx) && (0..96).contains(&lz));
                assert_eq!(chunk.height(lx, lz), Some(placement.local.y));
                assert!(anchors.insert((lx, lz)), "two decorations on one sample");
            }
        }
    }
}
