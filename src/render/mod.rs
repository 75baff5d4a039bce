//! Rendering-boundary modules
//! Contains the decoration instance batches handed to an external renderer.

pub mod instances;

// Re-export commonly used types
pub use instances::{InstanceAggregator, InstanceBatches, InstanceTransform};
