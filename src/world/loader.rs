//! Background chunk generation workers
//!
//! Generation requests go out over a bounded crossbeam channel; finished
//! chunks come back whole over a second one. The main thread only ever
//! polls, it never blocks on a worker. Every request and result carries the
//! epoch of the parameters the loader was built for. Dropping the loader
//! closes the request channel, which stops the workers; anything still in
//! flight is discarded when its send fails.

use std::cmp::Ordering;
use std::thread;

use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError, bounded};
use rustc_hash::FxHashSet;

use crate::constants::LOADER_QUEUE_CAPACITY;
use crate::core::chunk::Chunk;
use crate::core::coord::ChunkCoord;
use crate::settings::GenerationParams;
use crate::world::generator::ChunkGenerator;

/// Request for chunk generation with priority
#[derive(Clone, Copy, Debug)]
pub struct ChunkGenRequest {
    pub coord: ChunkCoord,
    pub priority: i64, // Lower = higher priority (distance squared)
    pub epoch: u64,
}

// Ordering for priority queue (min-heap by priority, ties broken by coordinate)
impl PartialEq for ChunkGenRequest {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ChunkGenRequest {}

impl PartialOrd for ChunkGenRequest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChunkGenRequest {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lower priority value = higher priority)
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

/// Result of background chunk generation
pub struct ChunkGenResult {
    pub chunk: Chunk,
    pub epoch: u64,
}

/// Manages background chunk generation with worker threads
pub struct ChunkLoader {
    request_tx: Sender<ChunkGenRequest>,
    result_rx: Receiver<ChunkGenResult>,
    pending: FxHashSet<ChunkCoord>,
    worker_count: usize,
    epoch: u64,
}

/// One worker per spare core, at least one.
pub fn default_worker_count() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

impl ChunkLoader {
    /// Pool generating for `params`; results are stamped with `epoch`.
    pub fn with_worker_count(
        num_workers: usize,
        params: &GenerationParams,
        epoch: u64,
    ) -> std::io::Result<Self> {
        let num_workers = num_workers.max(1);
        // Bounded channels prevent unbounded memory growth
        let (request_tx, request_rx) = bounded::<ChunkGenRequest>(LOADER_QUEUE_CAPACITY);
        let (result_tx, result_rx) = bounded::<ChunkGenResult>(LOADER_QUEUE_CAPACITY);

        // Each worker owns its own ChunkGenerator
        for worker_id in 0..num_workers {
            let rx = request_rx.clone();
            let tx = result_tx.clone();
            let generator = ChunkGenerator::new(params);

            thread::Builder::new()
                .name(format!("chunk-gen-{}", worker_id))
                .spawn(move || {
                    tracing::debug!(worker_id, "chunk worker started");
                    while let Ok(req) = rx.recv() {
                        let chunk = generator.generate_chunk(req.coord);
                        if tx
                            .send(ChunkGenResult {
                                chunk,
                                epoch: req.epoch,
                            })
                            .is_err()
                        {
                            // Loader is gone, drop the result
                            break;
                        }
                    }
                    tracing::debug!(worker_id, "chunk worker stopped");
                })?;
        }

        Ok(ChunkLoader {
            request_tx,
            result_rx,
            pending: FxHashSet::default(),
            worker_count: num_workers,
            epoch,
        })
    }

    /// Queue a coordinate for generation. Returns `false` when it was already
    /// pending or the queue is full; the caller simply retries next step.
    pub fn request_chunk(&mut self, coord: ChunkCoord, priority: i64) -> bool {
        if self.pending.contains(&coord) {
            return false;
        }

        let request = ChunkGenRequest {
            coord,
            priority,
            epoch: self.epoch,
        };
        match self.request_tx.try_send(request) {
            Ok(()) => {
                self.pending.insert(coord);
                true
            }
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Check if a chunk is pending generation
    pub fn is_pending(&self, coord: ChunkCoord) -> bool {
        self.pending.contains(&coord)
    }

    /// Get the number of pending chunks
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Poll for completed chunks (non-blocking)
    /// Returns up to max_results completed chunks
    pub fn poll_results(&mut self, max_results: usize) -> Vec<ChunkGenResult> {
        let mut results = Vec::with_capacity(max_results);

        for _ in 0..max_results {
            match self.result_rx.try_recv() {
                Ok(result) => {
                    self.pending.remove(&result.chunk.coord());
                    results.push(result);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        results
    }

    /// Get worker count
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }
}
