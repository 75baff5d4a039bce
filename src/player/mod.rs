//! Player-related modules
//! Contains input sampling, locomotion, and ground collision.

pub mod collision;
pub mod input;
pub mod locomotion;

// Re-export commonly used types
pub use input::InputState;
pub use locomotion::{MovementMode, Player};
