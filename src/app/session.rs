//! Per-frame driver
//!
//! One `step` runs the whole simulation timeline in order: locomotion,
//! window maintenance, eviction, and an instance rebuild when the resident
//! set changed. Rendering reads the results afterwards.

use glam::Vec3;

use crate::app::tuning::ParamsHandle;
use crate::player::{InputState, Player};
use crate::render::{InstanceAggregator, InstanceBatches};
use crate::settings::WorldSettings;
use crate::world::store::{ChunkStore, StoreError, StoreStats};

/// What changed during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub generated: bool,
    pub evicted: usize,
    pub rebuilt: bool,
    pub invalidated: bool,
}

pub struct Session {
    settings: WorldSettings,
    tuning: ParamsHandle,
    revision: u64,
    store: ChunkStore,
    player: Player,
    aggregator: InstanceAggregator,
    instances: InstanceBatches,
    frame: u64,
}

impl Session {
    pub fn new(settings: WorldSettings) -> Result<Self, StoreError> {
        settings.validate()?;
        let store = ChunkStore::new(settings.generation.clone(), settings.bounds)?;

        let [sx, sy, sz] = settings.movement.spawn;
        let ground = store.find_spawn_point(sx, sz, settings.movement.player_height);
        let spawn = Vec3::new(sx, sy.max(ground.y), sz);
        tracing::info!(x = spawn.x, y = spawn.y, z = spawn.z, "player spawned");

        let tuning = ParamsHandle::new(settings.generation.clone());
        Ok(Session {
            aggregator: InstanceAggregator::new(settings.instances),
            player: Player::new(spawn),
            revision: tuning.revision(),
            tuning,
            store,
            settings,
            instances: InstanceBatches::default(),
            frame: 0,
        })
    }

    /// Generates chunks on `workers` background threads from now on.
    pub fn with_background_generation(mut self, workers: usize) -> Result<Self, StoreError> {
        self.store.spawn_loader(workers)?;
        Ok(self)
    }

    /// Handle for live parameter edits; changes apply on the next step.
    pub fn tuning(&self) -> ParamsHandle {
        self.tuning.clone()
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    pub fn instances(&self) -> &InstanceBatches {
        &self.instances
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn apply_tuning(&mut self) -> bool {
        let (params, revision) = self.tuning.snapshot();
        if revision == self.revision {
            return false;
        }
        self.revision = revision;

        if let Err(err) = self.store.invalidate(params.clone()) {
            // Only worker startup can fail here; the store keeps generating inline
            tracing::warn!(error = %err, "invalidation incomplete");
        }
        self.settings.generation = params;
        true
    }

    pub fn step(&mut self, input: &InputState, frame_dt: f32) -> StepReport {
        let mut report = StepReport {
            invalidated: self.apply_tuning(),
            ..Default::default()
        };

        self.player.step(
            input,
            frame_dt,
            &self.store,
            &self.settings.movement,
            &self.settings.bounds,
        );

        let position = self.player.position;
        let radius = self.store.params().generation_radius;
        let max_resident = self.store.params().max_resident;

        report.generated = self.store.ensure_window(position, radius);
        report.evicted = self.store.evict_excess(max_resident, position).len();

        if report.generated || report.evicted > 0 || report.invalidated {
            self.instances = self.aggregator.rebuild(self.store.chunks());
            report.rebuilt = true;
        }

        self.frame += 1;
        report
    }
}
