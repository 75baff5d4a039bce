use glam::Vec3;

/// Integer position of a chunk on the infinite chunk grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the world position `(x, z)`.
    pub fn from_world(x: f32, z: f32, chunk_size: i32) -> Self {
        let size = chunk_size as f32;
        Self {
            x: (x / size).floor() as i32,
            z: (z / size).floor() as i32,
        }
    }

    pub fn containing(position: Vec3, chunk_size: i32) -> Self {
        Self::from_world(position.x, position.z, chunk_size)
    }

    /// World-space corner of the chunk (`coordinate * chunk_size`).
    pub fn origin(&self, chunk_size: i32) -> Vec3 {
        let size = chunk_size as f32;
        Vec3::new(self.x as f32 * size, 0.0, self.z as f32 * size)
    }

    /// World-space centre of the chunk, used to rank chunks by distance.
    pub fn center(&self, chunk_size: i32) -> Vec3 {
        let half = chunk_size as f32 * 0.5;
        self.origin(chunk_size) + Vec3::new(half, 0.0, half)
    }

    pub fn chebyshev_distance(&self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    pub fn distance_squared(&self, other: ChunkCoord) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dz = (self.z - other.z) as i64;
        dx * dx + dz * dz
    }

    /// Every coordinate of the `(2r + 1)^2` square centred on `self`.
    pub fn window(self, radius: i32) -> impl Iterator<Item = ChunkCoord> {
        (-radius..=radius)
            .flat_map(move |dx| (-radius..=radius).map(move |dz| ChunkCoord::new(self.x + dx, self.z + dz)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, 0.0, 0, 0)]
    #[test_case(95.9, 95.9, 0, 0)]
    #[test_case(96.0, 0.0, 1, 0)]
    #[test_case(-0.1, -0.1, -1, -1)]
    #[test_case(-96.0, 191.0, -1, 1)]
    fn world_position_maps_to_chunk(x: f32, z: f32, cx: i32, cz: i32) {
        assert_eq!(ChunkCoord::from_world(x, z, 96), ChunkCoord::new(cx, cz));
    }

    #[test]
    fn window_covers_square() {
        let coords: Vec<_> = ChunkCoord::new(3, -2).window(2).collect();
        assert_eq!(coords.len(), 25);
        assert!(coords.iter().all(|c| c.chebyshev_distance(ChunkCoord::new(3, -2)) <= 2));
    }

    #[test]
    fn origin_is_coordinate_times_size() {
        assert_eq!(ChunkCoord::new(-2, 5).origin(96), Vec3::new(-192.0, 0.0, 480.0));
    }
}
