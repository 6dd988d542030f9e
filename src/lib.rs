//! Balloon Pop - a pointer-tracked arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, hit testing, session state machine)
//! - `tuning`: Data-driven difficulty tiers and per-level schedules
//! - `input`: Pointer contract, mouse/hand routing and an autopilot
//! - `audio`: Pop cue contract and rate limiting
//! - `hud`: Status line text
//! - `settings`: Player preferences

pub mod audio;
pub mod hud;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::Settings;
pub use tuning::{Difficulty, DifficultyProfile, LevelParams, TuningError};

/// Game configuration constants
pub mod consts {
    /// Upper bound on a single frame's dt (seconds) to avoid catch-up after a stall
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// A pop within this many ms of the previous one continues the combo
    pub const COMBO_WINDOW_MS: f64 = 850.0;
    /// Base award per pop, plus `COMBO_POINTS * combo`
    pub const POP_BASE_POINTS: u64 = 8;
    pub const COMBO_POINTS: u64 = 2;
    /// Level clear bonus is `CLEAR_BONUS_BASE + level * CLEAR_BONUS_PER_LEVEL`
    pub const CLEAR_BONUS_BASE: u64 = 40;
    pub const CLEAR_BONUS_PER_LEVEL: u64 = 20;

    /// Pause between a level clear and the next level (ms)
    pub const INTERMISSION_MS: f64 = 2400.0;

    /// Balloons are culled once `y < -radius - ESCAPE_MARGIN`
    pub const ESCAPE_MARGIN: f32 = 20.0;
    /// Horizontal inset (beyond radius) for spawn x
    pub const SPAWN_INSET: f32 = 8.0;
    /// Spawn y is `height + radius + [0, SPAWN_DEPTH]`
    pub const SPAWN_DEPTH: f32 = 80.0;
    /// Horizontal inset (beyond radius) for the side-wall clamp
    pub const WALL_INSET: f32 = 6.0;
    /// Base drift amplitude, drawn from `[-BASE_DRIFT, BASE_DRIFT]` px/s
    pub const BASE_DRIFT: f32 = 15.0;
    /// Sway rate of the drift oscillation (radians per ms)
    pub const DRIFT_RATE: f64 = 0.001;

    /// Idle hint shows when nothing was popped this long after the last spawn (ms)
    pub const IDLE_HINT_MS: f64 = 1200.0;

    /// Pointer slots fed by the pointer source
    pub const MAX_POINTERS: usize = 2;

    /// Burst tuning
    pub const SHARD_COUNT: usize = 16;
    pub const SHARD_JITTER: f32 = 0.18;
    pub const SHARD_SPEED: (f32, f32) = (130.0, 290.0);
    pub const SHARD_SIZE: (f32, f32) = (2.0, 5.0);
    pub const SHARD_LIFE: (f32, f32) = (0.22, 0.38);
    pub const SHARD_DRAG: (f32, f32) = (0.84, 0.93);
    pub const SHARD_GRAVITY: (f32, f32) = (180.0, 260.0);
    pub const RING_START_RADIUS: f32 = 8.0;
    pub const RING_GROWTH: (f32, f32) = (260.0, 380.0);
    pub const RING_LIFE: f32 = 0.24;

    /// Radius that maps to a pop cue intensity of 1.0
    pub const CUE_REFERENCE_RADIUS: f32 = 34.0;
    /// Floor for pop cue intensity
    pub const CUE_MIN_INTENSITY: f32 = 0.8;
    /// Minimum spacing between audible pop cues (ms)
    pub const CUE_MIN_GAP_MS: f64 = 35.0;
}
