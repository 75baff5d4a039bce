//! Resident chunk bookkeeping
//!
//! The store is the only owner of generated chunks. Each step it works
//! through a distance-ordered queue of missing coordinates around the player,
//! admitting at most one new chunk, and trims back to 80% of its budget once
//! the budget is exceeded.

use std::collections::BinaryHeap;

use glam::Vec3;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::constants::MAX_CHUNKS_PER_STEP;
use crate::core::chunk::{Chunk, ChunkState};
use crate::core::coord::ChunkCoord;
use crate::settings::{ConfigError, GenerationParams, WorldBounds, eviction_target};
use crate::world::generator::ChunkGenerator;
use crate::world::loader::{ChunkGenRequest, ChunkLoader};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start chunk workers: {0}")]
    Workers(#[from] std::io::Error),
}

/// Ground under a world position, interpolated from resident samples.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Surface {
    pub height: f32,
    /// Unit normal, always pointing up (`y > 0`).
    pub normal: Vec3,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StoreStats {
    pub resident: usize,
    pub generating: usize,
    pub generated_total: u64,
    pub evicted_total: u64,
}

pub struct ChunkStore {
    params: GenerationParams,
    bounds: WorldBounds,
    generator: ChunkGenerator,
    loader: Option<ChunkLoader>,
    epoch: u64,
    chunks: FxHashMap<ChunkCoord, Chunk>,
    generated_total: u64,
    evicted_total: u64,
}

impl ChunkStore {
    /// Store that generates inline, one chunk per `ensure_window` call.
    pub fn new(params: GenerationParams, bounds: WorldBounds) -> Result<Self, StoreError> {
        params.validate()?;
        tracing::info!(
            seed = params.seed,
            chunk_size = params.chunk_size,
            radius = params.generation_radius,
            max_resident = params.max_resident,
            "chunk store ready"
        );
        Ok(ChunkStore {
            generator: ChunkGenerator::new(&params),
            params,
            bounds,
            loader: None,
            epoch: 0,
            chunks: FxHashMap::default(),
            generated_total: 0,
            evicted_total: 0,
        })
    }

    /// Moves generation onto `workers` background threads.
    pub fn spawn_loader(&mut self, workers: usize) -> Result<(), StoreError> {
        let loader = ChunkLoader::with_worker_count(workers, &self.params, self.epoch)?;
        tracing::info!(workers = loader.worker_count(), "background chunk generation enabled");
        self.loader = Some(loader);
        Ok(())
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    pub fn chunk_size(&self) -> i32 {
        self.params.chunk_size
    }

    pub fn resident_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn state(&self, coord: ChunkCoord) -> ChunkState {
        if self.chunks.contains_key(&coord) {
            ChunkState::Resident
        } else if self.loader.as_ref().is_some_and(|l| l.is_pending(coord)) {
            ChunkState::Generating
        } else {
            ChunkState::Unloaded
        }
    }

    /// Resident chunks in coordinate order.
    pub fn chunks(&self) -> Vec<&Chunk> {
        let mut chunks: Vec<&Chunk> = self.chunks.values().collect();
        chunks.sort_by_key(|c| c.coord());
        chunks
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            resident: self.chunks.len(),
            generating: self.loader.as_ref().map_or(0, |l| l.pending_count()),
            generated_total: self.generated_total,
            evicted_total: self.evicted_total,
        }
    }

    /// Chunk under the (clamped) position.
    pub fn player_chunk(&self, position: Vec3) -> ChunkCoord {
        ChunkCoord::containing(self.bounds.clamp(position), self.params.chunk_size)
    }

    /// Highest coordinate index whose chunk still overlaps the bounds.
    fn coord_limit(&self) -> (i32, i32) {
        let size = self.params.chunk_size as f32;
        let half = self.bounds.half_extent;
        ((-half / size).floor() as i32, (half / size).floor() as i32)
    }

    /// Missing coordinates of the window, nearest first.
    fn missing_in_window(&self, center: ChunkCoord, radius: i32) -> BinaryHeap<ChunkGenRequest> {
        let (lo, hi) = self.coord_limit();
        center
            .window(radius.max(0))
            .filter(|c| (lo..=hi).contains(&c.x) && (lo..=hi).contains(&c.z))
            .filter(|c| !self.chunks.contains_key(c))
            .filter(|c| !self.loader.as_ref().is_some_and(|l| l.is_pending(*c)))
            .map(|coord| ChunkGenRequest {
                coord,
                priority: coord.distance_squared(center),
                epoch: self.epoch,
            })
            .collect()
    }

    fn publish(&mut self, mut chunk: Chunk) -> bool {
        let coord = chunk.coord();
        if self.chunks.contains_key(&coord) {
            return false;
        }
        chunk.mark_resident();
        tracing::debug!(
            x = coord.x,
            z = coord.z,
            decorations = chunk.decorations().len(),
            "chunk resident"
        );
        self.chunks.insert(coord, chunk);
        self.generated_total += 1;
        true
    }

    /// Brings at most one missing chunk of the window around `player_pos` to
    /// `Resident`. Returns whether the resident set changed.
    pub fn ensure_window(&mut self, player_pos: Vec3, radius: i32) -> bool {
        let center = self.player_chunk(player_pos);
        let mut queue = self.missing_in_window(center, radius);

        if self.loader.is_none() {
            let Some(request) = queue.pop() else {
                return false;
            };
            let chunk = self.generator.generate_chunk(request.coord);
            return self.publish(chunk);
        }

        let mut changed = false;
        let completed = self
            .loader
            .as_mut()
            .map(|l| l.poll_results(MAX_CHUNKS_PER_STEP))
            .unwrap_or_default();
        for result in completed {
            if result.epoch != self.epoch {
                tracing::debug!(
                    coord = ?result.chunk.coord(),
                    epoch = result.epoch,
                    current = self.epoch,
                    "dropping chunk from before invalidation"
                );
                continue;
            }
            changed |= self.publish(result.chunk);
        }

        // One generation in flight at a time
        if let Some(loader) = self.loader.as_mut() {
            if loader.pending_count() < MAX_CHUNKS_PER_STEP {
                if let Some(request) = queue.pop() {
                    loader.request_chunk(request.coord, request.priority);
                }
            }
        }

        changed
    }

    /// When more than `max_resident` chunks are resident, evicts the ones
    /// furthest from the player until `ceil(0.8 * max_resident)` remain.
    /// The evicted chunks are returned already released.
    pub fn evict_excess(&mut self, max_resident: usize, player_pos: Vec3) -> Vec<Chunk> {
        if self.chunks.len() <= max_resident {
            return Vec::new();
        }

        let target = eviction_target(max_resident);
        let player = self.bounds.clamp(player_pos);
        let size = self.params.chunk_size;

        let mut ranked: Vec<(f32, ChunkCoord)> = self
            .chunks
            .keys()
            .map(|coord| {
                let center = coord.center(size);
                let dx = center.x - player.x;
                let dz = center.z - player.z;
                (dx * dx + dz * dz, *coord)
            })
            .collect();
        // Furthest first; coordinate order keeps ties deterministic
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        let excess = self.chunks.len() - target;
        let mut evicted = Vec::with_capacity(excess);
        for (_, coord) in ranked.into_iter().take(excess) {
            if let Some(mut chunk) = self.chunks.remove(&coord) {
                chunk.release();
                evicted.push(chunk);
            }
        }

        self.evicted_total += evicted.len() as u64;
        tracing::debug!(
            evicted = evicted.len(),
            resident = self.chunks.len(),
            max_resident,
            "evicted distant chunks"
        );
        evicted
    }

    /// Drops every chunk and rebuilds the generator for `params`. In-flight
    /// background work is discarded with the old workers, and anything
    /// still tagged with the previous epoch is never published.
    pub fn invalidate(&mut self, params: GenerationParams) -> Result<(), StoreError> {
        params.validate()?;
        let workers = self.loader.as_ref().map(|l| l.worker_count());
        let dropped = self.chunks.len();

        self.loader = None;
        self.chunks.clear();
        self.generator = ChunkGenerator::new(&params);
        self.params = params;
        self.epoch += 1;
        if let Some(workers) = workers {
            self.spawn_loader(workers)?;
        }

        tracing::info!(
            dropped,
            seed = self.params.seed,
            epoch = self.epoch,
            "chunk store invalidated"
        );
        Ok(())
    }

    /// Height of the resident sample at integer world coordinates.
    pub fn sample_height(&self, x: i32, z: i32) -> Option<f32> {
        let size = self.params.chunk_size;
        let coord = ChunkCoord::new(x.div_euclid(size), z.div_euclid(size));
        self.chunks
            .get(&coord)?
            .height(x.rem_euclid(size), z.rem_euclid(size))
    }

    /// Bilinear ground height and normal. `None` unless the sample at the
    /// cell's base corner is resident; missing far corners reuse the base.
    pub fn surface_at(&self, x: f32, z: f32) -> Option<Surface> {
        let fx = x.floor();
        let fz = z.floor();
        let (ix, iz) = (fx as i32, fz as i32);
        let (tx, tz) = (x - fx, z - fz);

        let h00 = self.sample_height(ix, iz)?;
        let h10 = self.sample_height(ix + 1, iz).unwrap_or(h00);
        let h01 = self.sample_height(ix, iz + 1).unwrap_or(h00);
        let h11 = self.sample_height(ix + 1, iz + 1).unwrap_or(h00);

        let top = h00 + (h10 - h00) * tx;
        let bottom = h01 + (h11 - h01) * tx;
        let height = top + (bottom - top) * tz;

        let dh_dx = (h10 - h00) * (1.0 - tz) + (h11 - h01) * tz;
        let dh_dz = (h01 - h00) * (1.0 - tx) + (h11 - h10) * tx;
        let normal = Vec3::new(-dh_dx, 1.0, -dh_dz).normalize();

        Some(Surface { height, normal })
    }

    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        self.surface_at(x, z).map(|s| s.height)
    }

    /// Eye position standing on the terrain at `(x, z)`. Evaluated straight
    /// from the noise, so it works before any chunk is resident.
    pub fn find_spawn_point(&self, x: f32, z: f32, player_height: f32) -> Vec3 {
        let ground = self.generator.evaluate(x, z).height;
        self.bounds.clamp(Vec3::new(x, ground + player_height + 1.0, z))
    }
}
