//! Core data structures
//! Contains chunk coordinates, chunks, biome tags, and decoration placements.

pub mod biome;
pub mod chunk;
pub mod coord;
pub mod decoration;

// Re-export commonly used types
pub use biome::{Biome, TerrainSample};
pub use chunk::{Chunk, ChunkState};
pub use coord::ChunkCoord;
pub use decoration::{DecorationKind, Placement};
