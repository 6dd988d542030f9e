//! Game state and core simulation types
//!
//! Everything the engine mutates lives in [`GameState`]; there is no hidden
//! global state. Adapters read it through [`super::Snapshot`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::Effects;
use super::field::BalloonField;
use super::hit::PopEvent;
use crate::hud::StatusHint;
use crate::tuning::{DifficultyProfile, LevelParams, level_params};

/// Mixed into the seed for the effects stream
const FX_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Pre-game, nothing advances
    Idle,
    /// Active play: spawning, movement and hit resolution
    Level,
    /// Short pause after a level clear
    Intermission,
    /// Run ended; only cosmetic effects keep draining
    GameOver,
}

/// Visible simulation rectangle, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Horizontal bounds for a circle of `radius` kept `inset` px off the walls.
    /// Collapses to the center line when the playfield is too narrow.
    pub fn x_bounds(&self, radius: f32, inset: f32) -> (f32, f32) {
        let lo = radius + inset;
        let hi = self.width - radius - inset;
        if hi < lo {
            let mid = self.width / 2.0;
            (mid, mid)
        } else {
            (lo, hi)
        }
    }
}

/// Balloon fill color as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BalloonColor(pub u32);

impl BalloonColor {
    pub const PALETTE: [BalloonColor; 6] = [
        BalloonColor(0xf94144),
        BalloonColor(0xf3722c),
        BalloonColor(0xf8961e),
        BalloonColor(0x43aa8b),
        BalloonColor(0x4d96ff),
        BalloonColor(0xc77dff),
    ];

    /// CSS hex string, e.g. `#f94144`
    pub fn to_hex(&self) -> String {
        format!("#{:06x}", self.0 & 0xff_ffff)
    }

    /// Linear [r, g, b] in 0..1
    pub fn to_rgb(&self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }
}

/// A rising balloon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balloon {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Rise speed (px/s)
    pub speed: f32,
    /// Horizontal sway amplitude (px/s), signed
    pub drift: f32,
    pub color: BalloonColor,
    /// Phase offset for sway and wobble (radians)
    pub phase: f32,
}

impl Balloon {
    pub fn new(pos: Vec2, radius: f32, speed: f32, drift: f32, color: BalloonColor) -> Self {
        Self {
            id: 0,
            pos,
            radius,
            speed,
            drift,
            color,
            phase: 0.0,
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    /// Cosmetic horizontal bob for rendering; never used for hit testing
    pub fn bob_offset(&self, now_ms: f64) -> f32 {
        ((now_ms * 0.0025) as f32 + self.phase).sin() * 2.3
    }

    /// Cosmetic string sway for rendering
    pub fn string_sway(&self, now_ms: f64) -> f32 {
        (self.phase + (now_ms * 0.003) as f32).sin() * 10.0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Random source for gameplay (spawn timing and kinematics)
    pub rng: Pcg32,
    /// Separate stream for cosmetic effects, so toggling effects never
    /// changes gameplay draws
    pub fx_rng: Pcg32,
    /// Tuning for the current session
    pub profile: DifficultyProfile,
    pub playfield: Playfield,
    pub mode: Mode,
    /// Current level (1-based, unbounded)
    pub level: u32,
    /// Tuning derived for `level`
    pub level_params: LevelParams,
    /// Deadline of the current level or intermission (ms)
    pub mode_until: f64,
    pub score: u64,
    pub lives: i32,
    pub pops: u32,
    pub combo: u32,
    /// Combo continues if the next pop lands at or before this time (ms)
    pub combo_until: Option<f64>,
    pub field: BalloonField,
    /// Visual particles and rings (not gameplay-affecting)
    pub effects: Effects,
    /// When false, pops spawn no particles or rings
    pub effects_enabled: bool,
    /// Status line for the HUD
    pub status: StatusHint,
}

impl GameState {
    /// Create an idle session with the given profile and seed
    pub fn new(profile: DifficultyProfile, playfield: Playfield, seed: u64) -> Self {
        let lives = profile.lives;
        let level_params = level_params(&profile, 1);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_STREAM),
            profile,
            playfield,
            mode: Mode::Idle,
            level: 1,
            level_params,
            mode_until: 0.0,
            score: 0,
            lives,
            pops: 0,
            combo: 0,
            combo_until: None,
            field: BalloonField::default(),
            effects: Effects::default(),
            effects_enabled: true,
            status: StatusHint::ChooseDifficulty,
        }
    }

    /// Restart both random streams from a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.fx_rng = Pcg32::seed_from_u64(seed ^ FX_STREAM);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.playfield = Playfield::new(width, height);
    }

    pub fn set_effects_enabled(&mut self, enabled: bool) {
        self.effects_enabled = enabled;
        if !enabled {
            self.effects.clear();
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.mode == Mode::GameOver
    }
}

/// Discrete things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    LevelStarted {
        level: u32,
        duration_ms: f64,
    },
    Spawned {
        id: u32,
    },
    Popped(PopEvent),
    Escaped {
        id: u32,
        lives: i32,
    },
    LevelCleared {
        level: u32,
        bonus: u64,
        extra_life: bool,
    },
    GameOver {
        score: u64,
        level: u32,
    },
}
