//! Per-kind decoration instance batches
//!
//! The aggregator replays the placements of every resident chunk into dense
//! transform arrays, one per `DecorationKind`, ready to upload as instance
//! buffers. Each array is capped at the kind's configured capacity.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat};

use crate::core::chunk::Chunk;
use crate::core::decoration::{DecorationKind, Placement};
use crate::settings::InstanceCapacity;

const KIND_COUNT: usize = DecorationKind::ALL.len();

/// Column-major model matrix (matches the shader's `mat4x4<f32>` instance input)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    pub model: [[f32; 4]; 4],
}

impl InstanceTransform {
    /// World transform of a placement inside `chunk`.
    pub fn from_placement(chunk: &Chunk, placement: &Placement) -> Self {
        let translation = chunk.origin() + placement.local;
        let model = Mat4::from_rotation_translation(Quat::from_rotation_y(placement.yaw), translation);
        InstanceTransform {
            model: model.to_cols_array_2d(),
        }
    }

    pub fn translation(&self) -> [f32; 3] {
        let [x, y, z, _] = self.model[3];
        [x, y, z]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceBatches {
    batches: [Vec<InstanceTransform>; KIND_COUNT],
}

impl InstanceBatches {
    pub fn get(&self, kind: DecorationKind) -> &[InstanceTransform] {
        &self.batches[kind.id() as usize]
    }

    pub fn as_bytes(&self, kind: DecorationKind) -> &[u8] {
        bytemuck::cast_slice(self.get(kind))
    }

    pub fn len(&self, kind: DecorationKind) -> usize {
        self.get(kind).len()
    }

    pub fn total(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

pub struct InstanceAggregator {
    capacity: InstanceCapacity,
}

impl InstanceAggregator {
    pub fn new(capacity: InstanceCapacity) -> Self {
        InstanceAggregator { capacity }
    }

    pub fn capacity(&self) -> &InstanceCapacity {
        &self.capacity
    }

    /// Rebuilds every batch from scratch. Chunks are visited in coordinate
    /// order; placements beyond a kind's capacity are dropped.
    pub fn rebuild<'a, I>(&self, chunks: I) -> InstanceBatches
    where
        I: IntoIterator<Item = &'a Chunk>,
    {
        let mut chunks: Vec<&Chunk> = chunks.into_iter().collect();
        chunks.sort_by_key(|c| c.coord());

        let mut out = InstanceBatches::default();
        let mut dropped = [0usize; KIND_COUNT];

        for chunk in chunks {
            for placement in chunk.decorations() {
                let slot = placement.kind.id() as usize;
                if out.batches[slot].len() < self.capacity.capacity(placement.kind) {
                    out.batches[slot].push(InstanceTransform::from_placement(chunk, placement));
                } else {
                    dropped[slot] += 1;
                }
            }
        }

        for kind in DecorationKind::ALL {
            let lost = dropped[kind.id() as usize];
            if lost > 0 {
                tracing::warn!(
                    kind = kind.name(),
                    dropped = lost,
                    capacity = self.capacity.capacity(kind),
                    "instance buffer full, placements truncated"
                );
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coord::ChunkCoord;
    use approx::assert_relative_eq;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    fn chunk_with(coord: ChunkCoord, placements: &[(DecorationKind, f32)]) -> Chunk {
        let mut chunk = Chunk::new(coord, 16);
        for (i, (kind, yaw)) in placements.iter().enumerate() {
            chunk.push_decoration(Placement {
                kind: *kind,
                local: Vec3::new(i as f32, 2.0, 3.0),
                yaw: *yaw,
            });
        }
        chunk
    }

    #[test]
    fn transform_places_and_rotates() {
        let chunk = chunk_with(ChunkCoord::new(1, -1), &[(DecorationKind::Well, FRAC_PI_2)]);
        let t = InstanceTransform::from_placement(&chunk, &chunk.decorations()[0]);
        assert_eq!(t.translation(), [16.0, 2.0, -13.0]);

        let model = Mat4::from_cols_array_2d(&t.model);
        let x_axis = model.transform_vector3(Vec3::X);
        assert_relative_eq!(x_axis.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(x_axis.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn batches_split_by_kind_in_coordinate_order() {
        let a = chunk_with(
            ChunkCoord::new(1, 0),
            &[(DecorationKind::TreeA, 0.0), (DecorationKind::House, 0.0)],
        );
        let b = chunk_with(ChunkCoord::new(0, 0), &[(DecorationKind::TreeA, 1.0)]);

        let aggregator = InstanceAggregator::new(InstanceCapacity::default());
        let batches = aggregator.rebuild([&a, &b]);

        assert_eq!(batches.len(DecorationKind::TreeA), 2);
        assert_eq!(batches.len(DecorationKind::House), 1);
        assert_eq!(batches.len(DecorationKind::Well), 0);
        assert_eq!(batches.total(), 3);
        // Chunk (0, 0) comes first regardless of input order
        assert_eq!(batches.get(DecorationKind::TreeA)[0].translation(), [0.0, 2.0, 3.0]);
        assert_eq!(batches.as_bytes(DecorationKind::TreeA).len(), 2 * 64);

        assert_eq!(aggregator.rebuild([&b, &a]), batches);
    }

    #[test]
    fn overflow_is_truncated() {
        let placements = vec![(DecorationKind::Well, 0.0); 5];
        let chunk = chunk_with(ChunkCoord::new(0, 0), &placements);
        let aggregator = InstanceAggregator::new(InstanceCapacity {
            wells: 3,
            ..Default::default()
        });
        let batches = aggregator.rebuild([&chunk]);
        assert_eq!(batches.len(DecorationKind::Well), 3);
        assert_eq!(batches.get(DecorationKind::Well)[2].translation(), [2.0, 2.0, 3.0]);
    }
}
