//! Session configuration
//!
//! Everything the world generator, the chunk store and the locomotion loop
//! read at session start. Values are validated once with
//! [`WorldSettings::validate`]; generation never clamps a bad value.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::core::decoration::DecorationKind;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("chunk size must be positive, got {0}")]
    NonPositiveChunkSize(i32),
    #[error("chunk size {size} exceeds the maximum of {max}")]
    ChunkSizeTooLarge { size: i32, max: i32 },
    #[error("generation radius must not be negative, got {0}")]
    NegativeRadius(i32),
    #[error("max resident chunk count must be positive")]
    ZeroResidentBudget,
    #[error("generation window of {window} chunks does not fit in a budget of {max_resident}")]
    WindowExceedsBudget { window: usize, max_resident: usize },
    #[error("noise divisor `{layer}` must be finite and positive, got {value}")]
    InvalidDivisor { layer: &'static str, value: f32 },
    #[error("band `{name}` is inverted or not finite ({min}..{max})")]
    InvalidBand { name: &'static str, min: f32, max: f32 },
    #[error("`{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
    #[error("physics needs at least one sub-step per frame")]
    ZeroSteps,
}

/// Inclusive range used by the decoration rules.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f32,
    pub max: f32,
}

impl Band {
    pub const fn new(range: (f32, f32)) -> Self {
        Self {
            min: range.0,
            max: range.1,
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(ConfigError::InvalidBand {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TerrainParams {
    pub temperature_divisor: f32,
    pub moisture_divisor: f32,
    pub detail_divisor: f32,
    pub medium_divisor: f32,
    pub continent_divisor: f32,
    pub mountain_divisor: f32,
    pub rock_divisor: f32,
    pub moisture_cap: f32,
    pub detail_moisture_bias: f32,
    pub medium_amplitude: f32,
    pub continent_amplitude: f32,
    pub mountain_threshold: f32,
    pub mountain_sharpness: f32,
    pub rock_height: f32,
    pub rock_flatten: f32,
    pub rock_max_noise: f32,
    pub rock_falloff: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            temperature_divisor: TEMPERATURE_DIVISOR,
            moisture_divisor: MOISTURE_DIVISOR,
            detail_divisor: DETAIL_DIVISOR,
            medium_divisor: MEDIUM_DIVISOR,
            continent_divisor: CONTINENT_DIVISOR,
            mountain_divisor: MOUNTAIN_DIVISOR,
            rock_divisor: ROCK_DIVISOR,
            moisture_cap: MOISTURE_CAP,
            detail_moisture_bias: DETAIL_MOISTURE_BIAS,
            medium_amplitude: MEDIUM_AMPLITUDE,
            continent_amplitude: CONTINENT_AMPLITUDE,
            mountain_threshold: MOUNTAIN_THRESHOLD,
            mountain_sharpness: MOUNTAIN_SHARPNESS,
            rock_height: ROCK_HEIGHT,
            rock_flatten: ROCK_FLATTEN,
            rock_max_noise: ROCK_MAX_NOISE,
            rock_falloff: ROCK_FALLOFF,
        }
    }
}

impl TerrainParams {
    fn validate(&self) -> Result<(), ConfigError> {
        check_divisor("temperature", self.temperature_divisor)?;
        check_divisor("moisture", self.moisture_divisor)?;
        check_divisor("detail", self.detail_divisor)?;
        check_divisor("medium", self.medium_divisor)?;
        check_divisor("continent", self.continent_divisor)?;
        check_divisor("mountain", self.mountain_divisor)?;
        check_divisor("rock", self.rock_divisor)?;
        check_divisor("mountain_sharpness", self.mountain_sharpness)?;
        check_divisor("rock_falloff", self.rock_falloff)?;
        check_non_negative("continent_amplitude", self.continent_amplitude)?;
        check_non_negative("medium_amplitude", self.medium_amplitude)?;
        check_non_negative("rock_height", self.rock_height)?;
        check_non_negative("rock_max_noise", self.rock_max_noise)?;
        check_finite("detail_moisture_bias", self.detail_moisture_bias)?;
        check_finite("mountain_threshold", self.mountain_threshold)?;
        if !(0.0..=1.0).contains(&self.moisture_cap) {
            return Err(ConfigError::OutOfRange {
                field: "moisture_cap",
                value: self.moisture_cap,
            });
        }
        if !(0.0..=1.0).contains(&self.rock_flatten) {
            return Err(ConfigError::OutOfRange {
                field: "rock_flatten",
                value: self.rock_flatten,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DecorationParams {
    pub siting_divisor: f32,
    pub variant_divisor: f32,
    pub rotation_divisor: f32,
    pub well_min_height: f32,
    pub well_max_temperature: f32,
    pub well_siting: f32,
    pub house_height: Band,
    pub house_temperature: Band,
    pub house_siting: f32,
    pub tree_height: Band,
    pub tree_temperature: Band,
    pub tree_min_moisture: f32,
    pub tree_siting: f32,
    pub tree_variant_split: f32,
}

impl Default for DecorationParams {
    fn default() -> Self {
        Self {
            siting_divisor: SITING_DIVISOR,
            variant_divisor: VARIANT_DIVISOR,
            rotation_divisor: ROTATION_DIVISOR,
            well_min_height: WELL_MIN_HEIGHT,
            well_max_temperature: WELL_MAX_TEMPERATURE,
            well_siting: WELL_SITING,
            house_height: Band::new(HOUSE_HEIGHT_BAND),
            house_temperature: Band::new(HOUSE_TEMPERATURE_BAND),
            house_siting: HOUSE_SITING,
            tree_height: Band::new(TREE_HEIGHT_BAND),
            tree_temperature: Band::new(TREE_TEMPERATURE_BAND),
            tree_min_moisture: TREE_MIN_MOISTURE,
            tree_siting: TREE_SITING,
            tree_variant_split: TREE_VARIANT_SPLIT,
        }
    }
}

impl DecorationParams {
    fn validate(&self) -> Result<(), ConfigError> {
        check_divisor("siting", self.siting_divisor)?;
        check_divisor("variant", self.variant_divisor)?;
        check_divisor("rotation", self.rotation_divisor)?;
        self.house_height.validate("house_height")?;
        self.house_temperature.validate("house_temperature")?;
        self.tree_height.validate("tree_height")?;
        self.tree_temperature.validate("tree_temperature")?;
        check_finite("well_min_height", self.well_min_height)?;
        check_finite("well_max_temperature", self.well_max_temperature)?;
        check_finite("tree_min_moisture", self.tree_min_moisture)?;
        for (field, value) in [
            ("well_siting", self.well_siting),
            ("house_siting", self.house_siting),
            ("tree_siting", self.tree_siting),
            ("tree_variant_split", self.tree_variant_split),
        ] {
            if !(-1.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// Everything that shapes generated content. Changing any field invalidates
/// every resident chunk.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerationParams {
    pub seed: u32,
    pub chunk_size: i32,
    pub generation_radius: i32,
    pub max_resident: usize,
    #[serde(default)]
    pub terrain: TerrainParams,
    #[serde(default)]
    pub decorations: DecorationParams,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            chunk_size: CHUNK_SIZE,
            generation_radius: GENERATION_RADIUS,
            max_resident: MAX_RESIDENT_CHUNKS,
            terrain: TerrainParams::default(),
            decorations: DecorationParams::default(),
        }
    }
}

impl GenerationParams {
    /// Number of coordinates in the square window around the player.
    pub fn window_len(&self) -> usize {
        let side = (self.generation_radius.max(0) as usize) * 2 + 1;
        side * side
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size <= 0 {
            return Err(ConfigError::NonPositiveChunkSize(self.chunk_size));
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::ChunkSizeTooLarge {
                size: self.chunk_size,
                max: MAX_CHUNK_SIZE,
            });
        }
        if self.generation_radius < 0 {
            return Err(ConfigError::NegativeRadius(self.generation_radius));
        }
        if self.max_resident == 0 {
            return Err(ConfigError::ZeroResidentBudget);
        }
        // The window has to survive the post-eviction floor or it would thrash
        let floor = eviction_target(self.max_resident);
        if self.window_len() > floor {
            return Err(ConfigError::WindowExceedsBudget {
                window: self.window_len(),
                max_resident: self.max_resident,
            });
        }
        self.terrain.validate()?;
        self.decorations.validate()
    }
}

/// Resident count an over-budget store is trimmed back to: `ceil(0.8 * max)`.
pub fn eviction_target(max_resident: usize) -> usize {
    (max_resident * EVICTION_KEEP_NUMERATOR).div_ceil(EVICTION_KEEP_DENOMINATOR)
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovementSettings {
    pub steps_per_frame: u32,
    pub max_frame_delta: f32,
    pub player_height: f32,
    pub gravity: f32,
    pub ground_acceleration: f32,
    pub air_acceleration: f32,
    pub sprint_multiplier: f32,
    pub flight_multiplier: f32,
    pub walk_multiplier: f32,
    pub jump_velocity: f32,
    pub damping_rate: f32,
    pub air_damping_scale: f32,
    pub pointer_speed: f32,
    pub spawn: [f32; 3],
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            steps_per_frame: STEPS_PER_FRAME,
            max_frame_delta: MAX_FRAME_DELTA,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            ground_acceleration: GROUND_ACCELERATION,
            air_acceleration: AIR_ACCELERATION,
            sprint_multiplier: SPRINT_MULTIPLIER,
            flight_multiplier: FLIGHT_MULTIPLIER,
            walk_multiplier: WALK_MULTIPLIER,
            jump_velocity: JUMP_VELOCITY,
            damping_rate: DAMPING_RATE,
            air_damping_scale: AIR_DAMPING_SCALE,
            pointer_speed: POINTER_SPEED,
            spawn: [PLAYER_SPAWN.0, PLAYER_SPAWN.1, PLAYER_SPAWN.2],
        }
    }
}

impl MovementSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.steps_per_frame == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        for (field, value) in [
            ("max_frame_delta", self.max_frame_delta),
            ("player_height", self.player_height),
            ("damping_rate", self.damping_rate),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        check_non_negative("gravity", self.gravity)?;
        check_non_negative("ground_acceleration", self.ground_acceleration)?;
        check_non_negative("air_acceleration", self.air_acceleration)?;
        check_non_negative("sprint_multiplier", self.sprint_multiplier)?;
        check_non_negative("flight_multiplier", self.flight_multiplier)?;
        check_non_negative("walk_multiplier", self.walk_multiplier)?;
        check_non_negative("jump_velocity", self.jump_velocity)?;
        check_non_negative("pointer_speed", self.pointer_speed)?;
        if !(0.0..=1.0).contains(&self.air_damping_scale) {
            return Err(ConfigError::OutOfRange {
                field: "air_damping_scale",
                value: self.air_damping_scale,
            });
        }
        for value in self.spawn {
            check_finite("spawn", value)?;
        }
        Ok(())
    }
}

/// Hard limits of the playable volume. Positions are clamped, never rejected.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub half_extent: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            half_extent: WORLD_HALF_EXTENT,
            min_y: WORLD_MIN_Y,
            max_y: WORLD_MAX_Y,
        }
    }
}

impl WorldBounds {
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(-self.half_extent, self.half_extent),
            position.y.clamp(self.min_y, self.max_y),
            position.z.clamp(-self.half_extent, self.half_extent),
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.half_extent.is_finite() || self.half_extent <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "half_extent",
                value: self.half_extent,
            });
        }
        if !self.min_y.is_finite() || !self.max_y.is_finite() || self.min_y >= self.max_y {
            return Err(ConfigError::InvalidBand {
                name: "vertical_bounds",
                min: self.min_y,
                max: self.max_y,
            });
        }
        Ok(())
    }
}

/// Per-kind instance buffer sizes handed to the renderer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct InstanceCapacity {
    pub wells: usize,
    pub houses: usize,
    pub trees: usize,
}

impl Default for InstanceCapacity {
    fn default() -> Self {
        Self {
            wells: MAX_WELL_INSTANCES,
            houses: MAX_HOUSE_INSTANCES,
            trees: MAX_TREE_INSTANCES,
        }
    }
}

impl InstanceCapacity {
    /// Each tree variant owns its own buffer of `trees` slots.
    pub fn capacity(&self, kind: DecorationKind) -> usize {
        match kind {
            DecorationKind::Well => self.wells,
            DecorationKind::House => self.houses,
            DecorationKind::TreeA | DecorationKind::TreeB | DecorationKind::TreeC => self.trees,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WorldSettings {
    #[serde(default)]
    pub generation: GenerationParams,
    #[serde(default)]
    pub movement: MovementSettings,
    #[serde(default)]
    pub bounds: WorldBounds,
    #[serde(default)]
    pub instances: InstanceCapacity,
}

impl WorldSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation.validate()?;
        self.movement.validate()?;
        self.bounds.validate()
    }
}

fn check_divisor(layer: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidDivisor { layer, value });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::OutOfRange { field, value });
    }
    Ok(())
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::OutOfRange { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(WorldSettings::default().validate(), Ok(()));
    }

    #[test_case(0)]
    #[test_case(-96)]
    fn rejects_non_positive_chunk_size(size: i32) {
        let params = GenerationParams {
            chunk_size: size,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::NonPositiveChunkSize(size))
        );
    }

    #[test_case(4097)]
    #[test_case(1_000_000)]
    #[test_case(i32::MAX)]
    fn rejects_oversized_chunk_size(size: i32) {
        let params = GenerationParams {
            chunk_size: size,
            generation_radius: 0,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::ChunkSizeTooLarge {
                size,
                max: MAX_CHUNK_SIZE
            })
        );
    }

    #[test]
    fn largest_chunk_size_is_accepted() {
        let params = GenerationParams {
            chunk_size: MAX_CHUNK_SIZE,
            generation_radius: 0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn rejects_window_larger_than_budget() {
        let params = GenerationParams {
            generation_radius: 6,
            max_resident: 128,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::WindowExceedsBudget { window: 169, .. })
        ));
    }

    #[test]
    fn rejects_zero_divisor() {
        let mut params = GenerationParams::default();
        params.terrain.rock_divisor = 0.0;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidDivisor { layer: "rock", .. })
        ));
    }

    #[test]
    fn rejects_inverted_band() {
        let mut params = GenerationParams::default();
        params.decorations.house_height = Band { min: 10.0, max: 2.0 };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidBand { name: "house_height", .. })
        ));
    }

    #[test_case(128, 103)]
    #[test_case(100, 80)]
    #[test_case(1, 1)]
    fn eviction_target_rounds_up(max: usize, expected: usize) {
        assert_eq!(eviction_target(max), expected);
    }

    #[test]
    fn bounds_clamp_all_axes() {
        let bounds = WorldBounds {
            half_extent: 100.0,
            min_y: -10.0,
            max_y: 50.0,
        };
        let clamped = bounds.clamp(Vec3::new(250.0, -99.0, -101.0));
        assert_eq!(clamped, Vec3::new(100.0, -10.0, -100.0));
    }
}
