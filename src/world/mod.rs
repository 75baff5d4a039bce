//! World generation and management modules
//! Contains noise layers, terrain synthesis, decoration rules, chunk
//! generation, loading, and the resident chunk store.

pub mod decoration;
pub mod generator;
pub mod heightfield;
pub mod loader;
pub mod noise;
pub mod store;

// Re-export commonly used types
pub use decoration::{DecorationPlacer, SitingNoise, classify};
pub use generator::ChunkGenerator;
pub use heightfield::HeightfieldSynth;
pub use loader::{ChunkGenRequest, ChunkGenResult, ChunkLoader};
pub use noise::{NoiseField, NoiseKind};
pub use store::{ChunkStore, StoreError, StoreStats, Surface};
