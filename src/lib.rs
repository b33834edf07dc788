//! Lane Rush - a three-lane endless runner for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `api`: Leaderboard/feedback HTTP client
//! - `profile`: Player identity and best score (LocalStorage)
//! - `shop`: Skin catalog and selection

pub mod api;
pub mod profile;
pub mod shop;
pub mod sim;

pub use profile::PlayerProfile;
pub use shop::{Shop, Skin};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World x coordinate of each lane (left, center, right)
    pub const LANE_X: [f32; 3] = [-3.0, 0.0, 3.0];
    /// Exponential smoothing gain for lane changes
    pub const LANE_GAIN: f32 = 10.0;

    /// Vertical physics
    pub const GRAVITY: f32 = -20.0;
    pub const JUMP_FORCE: f32 = 8.0;
    /// Ground level while sliding (flattened hitbox)
    pub const SLIDE_GROUND_Y: f32 = -0.5;
    pub const SLIDE_DURATION: f32 = 0.8;

    /// Status effect durations (seconds)
    pub const SHIELD_DURATION: f32 = 5.0;
    pub const MAGNET_DURATION: f32 = 7.0;
    pub const WARD_DURATION: f32 = 10.0;
    pub const CONFUSION_DURATION: f32 = 5.0;

    /// World speed at run start and acceleration per second
    pub const START_SPEED: f32 = 12.0;
    pub const ACCELERATION: f32 = 0.35;

    /// Spawning
    pub const SPAWN_Z: f32 = -100.0;
    /// Entities past this z are behind the character and recycled
    pub const DESPAWN_Z: f32 = 10.0;
    pub const BASE_SPAWN_INTERVAL: f32 = 1.5;
    /// Speed at which the spawn interval equals BASE_SPAWN_INTERVAL
    pub const REFERENCE_SPEED: f32 = 10.0;
    /// Chance that a spawn roll yields a powerup instead of an obstacle
    pub const POWERUP_CHANCE: f32 = 0.1;
    /// Longitudinal spacing between coins in a run
    pub const COIN_SPACING: f32 = 2.5;

    /// Collision broad phase
    pub const HIT_RANGE_Z: f32 = 1.5;
    pub const HIT_RANGE_X: f32 = 1.0;

    /// Magnet buff
    pub const MAGNET_RADIUS: f32 = 15.0;
    pub const MAGNET_PULL_SPEED: f32 = 25.0;
    pub const MAGNET_CONSUME_RADIUS: f32 = 1.5;

    /// Chaser positions (z, relative to the character at 0) and easing gains
    pub const CHASER_HIDDEN_Z: f32 = 15.0;
    pub const CHASER_CHASE_Z: f32 = 2.0;
    pub const CHASER_Z_GAIN: f32 = 3.0;
    pub const CHASER_X_GAIN: f32 = 2.0;
    pub const CHASE_DURATION: f32 = 5.0;

    /// Fraction of coins deducted at run end
    pub const TAX_RATE: f32 = 0.5;

    /// Damage flash length (presentation only)
    pub const FLASH_DURATION: f32 = 0.1;
}

/// Exponential approach toward a target: `value += (target - value) * gain * dt`
///
/// Monotonic for `gain * dt <= 1`; the frame loop keeps dt small enough that
/// this never overshoots.
#[inline]
pub fn ease_toward(value: f32, target: f32, gain: f32, dt: f32) -> f32 {
    value + (target - value) * (gain * dt).min(1.0)
}
