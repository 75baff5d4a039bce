use glam::Vec3;

use crate::core::biome::{Biome, TerrainSample};
use crate::core::coord::ChunkCoord;
use crate::core::decoration::Placement;

/// Lifecycle of one chunk value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ChunkState {
    Unloaded,
    Generating,
    Resident,
    /// Terminal. The coordinate may come back later as a new `Chunk`.
    Evicted,
}

pub struct Chunk {
    coord: ChunkCoord,
    size: i32,
    state: ChunkState,
    heights: Vec<f32>,
    climate: Vec<[f32; 2]>,
    biomes: Vec<Biome>,
    decorations: Vec<Placement>,
}

impl Chunk {
    /// Allocates an empty grid in the `Generating` state.
    pub fn new(coord: ChunkCoord, size: i32) -> Self {
        let samples = (size as usize) * (size as usize);
        Chunk {
            coord,
            size,
            state: ChunkState::Generating,
            heights: vec![0.0; samples],
            climate: vec![[0.0, 0.0]; samples],
            biomes: vec![Biome::Land; samples],
            decorations: Vec::new(),
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn state(&self) -> ChunkState {
        self.state
    }

    pub fn origin(&self) -> Vec3 {
        self.coord.origin(self.size)
    }

    fn index(&self, lx: i32, lz: i32) -> Option<usize> {
        if lx >= 0 && lx < self.size && lz >= 0 && lz < self.size {
            Some((lz * self.size + lx) as usize)
        } else {
            None
        }
    }

    pub fn set_sample(&mut self, lx: i32, lz: i32, sample: &TerrainSample) {
        if let Some(i) = self.index(lx, lz) {
            self.heights[i] = sample.height;
            self.climate[i] = [sample.temperature, sample.moisture];
            self.biomes[i] = sample.biome;
        }
    }

    pub fn sample(&self, lx: i32, lz: i32) -> Option<TerrainSample> {
        let i = self.index(lx, lz)?;
        Some(TerrainSample {
            height: self.heights[i],
            temperature: self.climate[i][0],
            moisture: self.climate[i][1],
            biome: self.biomes[i],
        })
    }

    pub fn height(&self, lx: i32, lz: i32) -> Option<f32> {
        self.index(lx, lz).map(|i| self.heights[i])
    }

    /// Row-major (`z` outer, `x` inner) height grid.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Per-sample texture coordinates in the same order as [`Chunk::heights`].
    pub fn biome_uv(&self) -> Vec<[f32; 2]> {
        self.climate
            .iter()
            .zip(&self.biomes)
            .map(|(&[temperature, moisture], &biome)| {
                TerrainSample {
                    height: 0.0,
                    temperature,
                    moisture,
                    biome,
                }
                .uv()
            })
            .collect()
    }

    pub fn decorations(&self) -> &[Placement] {
        &self.decorations
    }

    pub fn push_decoration(&mut self, placement: Placement) {
        self.decorations.push(placement);
    }

    pub(crate) fn mark_resident(&mut self) {
        self.state = ChunkState::Resident;
    }

    /// Drops the sample and decoration storage and marks the value evicted.
    pub(crate) fn release(&mut self) {
        self.heights = Vec::new();
        self.climate = Vec::new();
        self.biomes = Vec::new();
        self.decorations = Vec::new();
        self.state = ChunkState::Evicted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chunk_is_generating_with_full_grid() {
        let chunk = Chunk::new(ChunkCoord::new(1, 2), 8);
        assert_eq!(chunk.state(), ChunkState::Generating);
        assert_eq!(chunk.heights().len(), 64);
        assert_eq!(chunk.origin(), Vec3::new(8.0, 0.0, 16.0));
    }

    #[test]
    fn samples_out_of_range_are_absent() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), 4);
        let sample = TerrainSample {
            height: 2.5,
            temperature: 0.4,
            moisture: 0.3,
            biome: Biome::Rock,
        };
        chunk.set_sample(3, 1, &sample);
        chunk.set_sample(4, 1, &sample);
        assert_eq!(chunk.sample(3, 1), Some(sample));
        assert_eq!(chunk.height(4, 1), None);
        assert_eq!(chunk.biome_uv()[4 + 3], [1.0, 1.0]);
    }

    #[test]
    fn release_frees_storage() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), 16);
        chunk.mark_resident();
        chunk.release();
        assert_eq!(chunk.state(), ChunkState::Evicted);
        assert!(chunk.heights().is_empty());
        assert!(chunk.decorations().is_empty());
    }
}
