use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec2, Vec3};

use crate::constants::LOOK_SENSITIVITY;
use crate::player::collision::{clamp_to_bounds, resolve_ground};
use crate::player::input::InputState;
use crate::settings::{MovementSettings, WorldBounds};
use crate::world::store::ChunkStore;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum MovementMode {
    /// No gravity; ascend/descend move vertically.
    #[default]
    Flying,
    /// Gravity-bound, jumps from the ground.
    Walking,
}

impl MovementMode {
    pub fn toggled(self) -> Self {
        match self {
            MovementMode::Flying => MovementMode::Walking,
            MovementMode::Walking => MovementMode::Flying,
        }
    }
}

/// First-person player. `position` is the eye; the feet are `player_height`
/// below it.
#[derive(Clone, Debug)]
pub struct Player {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
    pub mode: MovementMode,
    toggle_held: bool,
}

impl Player {
    pub fn new(spawn: Vec3) -> Self {
        Player {
            position: spawn,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            on_ground: false,
            mode: MovementMode::default(),
            toggle_held: false,
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    pub fn right(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, self.yaw.cos())
    }

    pub fn look_direction(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.look_direction(), Vec3::Y)
    }

    /// Applies a pointer delta. Pitch stops at straight up and straight down.
    pub fn look(&mut self, delta: Vec2, pointer_speed: f32) {
        let scale = LOOK_SENSITIVITY * pointer_speed;
        self.yaw = (self.yaw + delta.x * scale).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch - delta.y * scale).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    fn update_mode(&mut self, pressed: bool) {
        if pressed && !self.toggle_held {
            self.mode = self.mode.toggled();
            self.on_ground = false;
            tracing::debug!(mode = ?self.mode, "movement mode changed");
        }
        self.toggle_held = pressed;
    }

    fn controls(&mut self, input: &InputState, dt: f32, settings: &MovementSettings) {
        let walking = self.mode == MovementMode::Walking;
        let accel = if walking && !self.on_ground {
            settings.air_acceleration
        } else {
            settings.ground_acceleration
        };
        let multiplier = if walking {
            settings.walk_multiplier
        } else {
            settings.flight_multiplier
        };
        let mut speed = dt * accel * multiplier;
        if input.sprint {
            speed *= settings.sprint_multiplier;
        }

        let axes = input.planar_axes();
        self.velocity += (self.forward() * axes.y + self.right() * axes.x) * speed;

        match self.mode {
            MovementMode::Flying => self.velocity.y += input.vertical_axis() * speed,
            MovementMode::Walking => {
                if input.jump && self.on_ground {
                    self.velocity.y = settings.jump_velocity;
                    self.on_ground = false;
                }
            }
        }
    }

    fn integrate(&mut self, dt: f32, settings: &MovementSettings) {
        let mut damping = (-settings.damping_rate * dt).exp() - 1.0;
        if self.mode == MovementMode::Walking && !self.on_ground {
            self.velocity.y -= settings.gravity * dt;
            damping *= settings.air_damping_scale;
        }
        self.velocity += self.velocity * damping;
        self.position += self.velocity * dt;
    }

    /// Advances one frame: look, mode toggle, then fixed sub-steps of
    /// controls, integration, ground contact and bounds clamping.
    pub fn step(
        &mut self,
        input: &InputState,
        frame_dt: f32,
        store: &ChunkStore,
        settings: &MovementSettings,
        bounds: &WorldBounds,
    ) {
        self.look(input.look_delta, settings.pointer_speed);
        self.update_mode(input.toggle_mode);

        let steps = settings.steps_per_frame.max(1);
        let dt = frame_dt.clamp(0.0, settings.max_frame_delta) / steps as f32;

        for _ in 0..steps {
            self.controls(input, dt, settings);
            self.integrate(dt, settings);
            self.on_ground = resolve_ground(
                store,
                &mut self.position,
                &mut self.velocity,
                settings.player_height,
            )
            .is_some();
            clamp_to_bounds(bounds, &mut self.position, &mut self.velocity);
        }
        tracing::trace!(
            x = self.position.x,
            y = self.position.y,
            z = self.position.z,
            on_ground = self.on_ground,
            "player stepped"
        );
    }
}
