// Application module with the session driver and live tuning
pub mod app;

// Core module with fundamental types
pub mod core;

// Player module with input, locomotion and collision
pub mod player;

// Render module with decoration instance batches
pub mod render;

// World module with generation, loading and the chunk store
pub mod world;

// Other modules
pub mod constants;
pub mod save;
pub mod settings;

// Re-exports
pub use app::{ParamsHandle, Session, StepReport};
pub use core::{Biome, Chunk, ChunkCoord, ChunkState, DecorationKind, Placement, TerrainSample};
pub use player::{InputState, MovementMode, Player};
pub use render::{InstanceAggregator, InstanceBatches, InstanceTransform};
pub use save::{
    DEFAULT_SETTINGS_FILE, SettingsError, default_settings_path, load_settings,
    load_settings_or_default, save_settings,
};
pub use settings::{
    ConfigError, GenerationParams, InstanceCapacity, MovementSettings, WorldBounds, WorldSettings,
};
pub use world::{ChunkGenerator, ChunkLoader, ChunkStore, StoreError, StoreStats};
