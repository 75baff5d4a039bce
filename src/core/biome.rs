/// Surface classification carried next to every height sample.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Biome {
    #[default]
    Land,
    /// Terrain that would have been below sea level before the height floor.
    Water,
    /// Eroded flat patch with no vegetation.
    Rock,
}

impl Biome {
    pub fn is_vegetated(&self) -> bool {
        matches!(self, Biome::Land)
    }
}

/// Everything the synthesizer knows about one world position.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct TerrainSample {
    pub height: f32,
    pub temperature: f32,
    pub moisture: f32,
    pub biome: Biome,
}

impl TerrainSample {
    /// Texture coordinate handed to the terrain shader: climate for land,
    /// the `(1, 1)` corner for water and rock.
    pub fn uv(&self) -> [f32; 2] {
        match self.biome {
            Biome::Land => [self.temperature, self.moisture],
            Biome::Water | Biome::Rock => [1.0, 1.0],
        }
    }
}
