//! Ground contact against the resident heightfield
//!
//! Only resident chunks are consulted. Over a coordinate that has not been
//! generated yet there is no ground, and a walking player simply falls.

use glam::Vec3;

use crate::constants::GROUND_SNAP;
use crate::settings::WorldBounds;
use crate::world::store::{ChunkStore, Surface};

/// Resolves `position` (eye) and `velocity` against the ground under them.
/// Returns the surface touched, if any. After a contact the velocity has no
/// component left pointing into the surface.
pub fn resolve_ground(
    store: &ChunkStore,
    position: &mut Vec3,
    velocity: &mut Vec3,
    eye_height: f32,
) -> Option<Surface> {
    let surface = store.surface_at(position.x, position.z)?;
    let feet = position.y - eye_height;
    let into = velocity.dot(surface.normal);

    // Penetration is always resolved; resting contact only while not moving away
    let penetrating = feet < surface.height;
    let resting = feet <= surface.height + GROUND_SNAP && into <= 0.0;
    if !penetrating && !resting {
        return None;
    }

    position.y = surface.height + eye_height;
    if into < 0.0 {
        *velocity -= surface.normal * into;
    }
    Some(surface)
}

/// Clamps to the world volume and stops motion along every clamped axis.
pub fn clamp_to_bounds(bounds: &WorldBounds, position: &mut Vec3, velocity: &mut Vec3) {
    let clamped = bounds.clamp(*position);
    for axis in 0..3 {
        if clamped[axis] != position[axis] {
            velocity[axis] = 0.0;
        }
    }
    *position = clamped;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GenerationParams;
    use approx::assert_relative_eq;

    fn resident_store() -> ChunkStore {
        let params = GenerationParams {
            seed: 1925401,
            chunk_size: 16,
            generation_radius: 0,
            max_resident: 4,
            ..Default::default()
        };
        let mut store = ChunkStore::new(params, WorldBounds::default()).unwrap();
        store.ensure_window(Vec3::new(8.0, 0.0, 8.0), 0);
        store
    }

    #[test]
    fn no_ground_without_resident_chunk() {
        let store = resident_store();
        let mut position = Vec3::new(40.0, -10.0, 40.0);
        let mut velocity = Vec3::new(0.0, -5.0, 0.0);
        assert!(resolve_ground(&store, &mut position, &mut velocity, 1.8).is_none());
        assert_eq!(velocity.y, -5.0);
    }

    #[test]
    fn falling_contact_leaves_no_inward_velocity() {
        let store = resident_store();
        for (x, z) in [(3.3, 4.7), (7.5, 7.5), (12.1, 1.9), (0.2, 14.6)] {
            let ground = store.height_at(x, z).unwrap();
            let mut position = Vec3::new(x, ground + 1.0, z);
            let mut velocity = Vec3::new(6.0, -20.0, -3.0);

            let surface = resolve_ground(&store, &mut position, &mut velocity, 1.8).unwrap();
            assert_relative_eq!(position.y, ground + 1.8, epsilon = 1e-4);
            assert!(velocity.dot(surface.normal) >= -1e-4);
        }
    }

    #[test]
    fn rising_player_leaves_the_ground() {
        let store = resident_store();
        let ground = store.height_at(5.0, 5.0).unwrap();
        let mut position = Vec3::new(5.0, ground + 1.8 + 0.01, 5.0);
        let mut velocity = Vec3::new(0.0, 15.0, 0.0);
        assert!(resolve_ground(&store, &mut position, &mut velocity, 1.8).is_none());
        assert_eq!(velocity.y, 15.0);
    }

    #[test]
    fn clamping_stops_the_clamped_axis() {
        let bounds = WorldBounds {
            half_extent: 100.0,
            min_y: -10.0,
            max_y: 50.0,
        };
        let mut position = Vec3::new(150.0, 20.0, -40.0);
        let mut velocity = Vec3::new(3.0, 1.0, 2.0);
        clamp_to_bounds(&bounds, &mut position, &mut velocity);
        assert_eq!(position, Vec3::new(100.0, 20.0, -40.0));
        assert_eq!(velocity, Vec3::new(0.0, 1.0, 2.0));
    }
}
