//! Live-tunable generation parameters
//!
//! A debug surface (or a test) holds a clone of the handle and edits the
//! parameters; the session notices the revision bump on its next step and
//! rebuilds the world. Rejected edits leave the current parameters in place.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::settings::{ConfigError, GenerationParams};

struct Tuned {
    params: GenerationParams,
    revision: u64,
}

#[derive(Clone)]
pub struct ParamsHandle {
    inner: Arc<RwLock<Tuned>>,
}

impl ParamsHandle {
    pub fn new(params: GenerationParams) -> Self {
        ParamsHandle {
            inner: Arc::new(RwLock::new(Tuned { params, revision: 0 })),
        }
    }

    pub fn revision(&self) -> u64 {
        self.inner.read().revision
    }

    pub fn snapshot(&self) -> (GenerationParams, u64) {
        let tuned = self.inner.read();
        (tuned.params.clone(), tuned.revision)
    }

    /// Applies `edit` to a copy and publishes it if it validates.
    /// Returns the new revision.
    pub fn update<F>(&self, edit: F) -> Result<u64, ConfigError>
    where
        F: FnOnce(&mut GenerationParams),
    {
        let mut tuned = self.inner.write();
        let mut next = tuned.params.clone();
        edit(&mut next);

        if let Err(err) = next.validate() {
            tracing::warn!(error = %err, "rejected generation parameter update");
            return Err(err);
        }
        if next == tuned.params {
            return Ok(tuned.revision);
        }

        tuned.params = next;
        tuned.revision += 1;
        tracing::info!(revision = tuned.revision, seed = tuned.params.seed, "generation parameters updated");
        Ok(tuned.revision)
    }

    pub fn set(&self, params: GenerationParams) -> Result<u64, ConfigError> {
        self.update(move |current| *current = params)
    }
}
