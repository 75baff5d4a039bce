// World constants
pub const DEFAULT_SEED: u32 = 1;
pub const CHUNK_SIZE: i32 = 128;
pub const MAX_CHUNK_SIZE: i32 = 4096;
pub const GENERATION_RADIUS: i32 = 2;
pub const MAX_RESIDENT_CHUNKS: usize = 128;
pub const WORLD_HALF_EXTENT: f32 = 1_000_000.0;
pub const WORLD_MIN_Y: f32 = -64.0;
pub const WORLD_MAX_Y: f32 = 2048.0;

// Eviction keeps 4/5 of the budget after a purge
pub const EVICTION_KEEP_NUMERATOR: usize = 4;
pub const EVICTION_KEEP_DENOMINATOR: usize = 5;

// Noise divisors (world units per noise period)
pub const TEMPERATURE_DIVISOR: f32 = 512.0;
pub const MOISTURE_DIVISOR: f32 = 256.0;
pub const DETAIL_DIVISOR: f32 = 4.0;
pub const MEDIUM_DIVISOR: f32 = 128.0;
pub const CONTINENT_DIVISOR: f32 = 1024.0;
pub const MOUNTAIN_DIVISOR: f32 = 1024.0;
pub const ROCK_DIVISOR: f32 = 96.0;
pub const SITING_DIVISOR: f32 = 1.7;
pub const VARIANT_DIVISOR: f32 = 64.0;
pub const ROTATION_DIVISOR: f32 = 3.3;

// Height recipe
pub const MOISTURE_CAP: f32 = 0.99;
pub const DETAIL_MOISTURE_BIAS: f32 = 0.3;
pub const MEDIUM_AMPLITUDE: f32 = 4.0;
pub const CONTINENT_AMPLITUDE: f32 = 32.0;
pub const MOUNTAIN_THRESHOLD: f32 = 6.0;
pub const MOUNTAIN_SHARPNESS: f32 = 5.0;
pub const ROCK_HEIGHT: f32 = 3.0;
pub const ROCK_FLATTEN: f32 = 0.2;
pub const ROCK_MAX_NOISE: f32 = 0.2;
pub const ROCK_FALLOFF: f32 = 8.0;

// Decoration thresholds
pub const WELL_MIN_HEIGHT: f32 = 3.0;
pub const WELL_MAX_TEMPERATURE: f32 = 0.15;
pub const WELL_SITING: f32 = 0.92;
pub const HOUSE_HEIGHT_BAND: (f32, f32) = (2.0, 12.0);
pub const HOUSE_TEMPERATURE_BAND: (f32, f32) = (0.3, 0.6);
pub const HOUSE_SITING: f32 = 0.95;
pub const TREE_HEIGHT_BAND: (f32, f32) = (1.0, 40.0);
pub const TREE_TEMPERATURE_BAND: (f32, f32) = (0.15, 0.8);
pub const TREE_MIN_MOISTURE: f32 = 0.1;
pub const TREE_SITING: f32 = 0.85;
pub const TREE_VARIANT_SPLIT: f32 = 0.3;

// Instance buffer capacities per decoration kind
pub const MAX_WELL_INSTANCES: usize = 256;
pub const MAX_HOUSE_INSTANCES: usize = 512;
pub const MAX_TREE_INSTANCES: usize = 8192;

// Optimization constants
pub const MAX_CHUNKS_PER_STEP: usize = 1;
pub const LOADER_QUEUE_CAPACITY: usize = 64;

// Player constants
pub const STEPS_PER_FRAME: u32 = 5;
pub const MAX_FRAME_DELTA: f32 = 0.05;
pub const PLAYER_HEIGHT: f32 = 1.8;
pub const PLAYER_SPAWN: (f32, f32, f32) = (0.0, 32.0, 0.0);
pub const GRAVITY: f32 = 30.0;
pub const GROUND_ACCELERATION: f32 = 400.0;
pub const AIR_ACCELERATION: f32 = 100.0;
pub const SPRINT_MULTIPLIER: f32 = 3.0;
pub const FLIGHT_MULTIPLIER: f32 = 1.0;
pub const WALK_MULTIPLIER: f32 = 1.0;
pub const JUMP_VELOCITY: f32 = 15.0;
pub const DAMPING_RATE: f32 = 4.0;
pub const AIR_DAMPING_SCALE: f32 = 0.1;
pub const GROUND_SNAP: f32 = 0.05;
pub const POINTER_SPEED: f32 = 2.0;
pub const LOOK_SENSITIVITY: f32 = 0.002;
