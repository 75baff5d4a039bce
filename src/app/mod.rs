//! Application module containing the session state and frame loop
//!
//! `Session` owns the chunk store, the player and the instance batches;
//! `ParamsHandle` lets a debug surface retune generation while it runs.

pub mod session;
pub mod tuning;

pub use session::{Session, StepReport};
pub use tuning::ParamsHandle;
