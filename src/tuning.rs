//! Data-driven game balance
//!
//! Each difficulty tier maps to a [`DifficultyProfile`]. Per-level tuning is
//! derived from the profile by [`level_params`]; the level number is clamped to
//! the profile's cap first, so difficulty stops scaling there while the level
//! counter itself keeps growing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// The shipped tuning table for this tier
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                lives: 10,
                radius: SpanF32::new(48.0, 78.0),
                speed: SpanF32::new(28.0, 68.0),
                hit_mul: 1.2,
                extra_life_every: 1,
                level_cap: 8,
                duration: Schedule::new(40_000.0, 800.0, 28_000.0),
                spawn_min: Schedule::new(800.0, 25.0, 400.0),
                spawn_max: Schedule::new(1300.0, 30.0, 600.0),
                speed_step: 0.06,
                drift_step: 0.04,
            },
            Difficulty::Medium => DifficultyProfile {
                lives: 5,
                radius: SpanF32::new(24.0, 48.0),
                speed: SpanF32::new(42.0, 112.0),
                hit_mul: 0.92,
                extra_life_every: 2,
                level_cap: 12,
                duration: Schedule::new(34_000.0, 1100.0, 21_000.0),
                spawn_min: Schedule::new(620.0, 40.0, 180.0),
                spawn_max: Schedule::new(960.0, 45.0, 300.0),
                speed_step: 0.1,
                drift_step: 0.07,
            },
            Difficulty::Hard => DifficultyProfile {
                lives: 3,
                radius: SpanF32::new(16.0, 34.0),
                speed: SpanF32::new(60.0, 140.0),
                hit_mul: 0.8,
                extra_life_every: 3,
                level_cap: 15,
                duration: Schedule::new(28_000.0, 1200.0, 16_000.0),
                spawn_min: Schedule::new(480.0, 45.0, 120.0),
                spawn_max: Schedule::new(780.0, 50.0, 200.0),
                speed_step: 0.13,
                drift_step: 0.09,
            },
        }
    }
}

/// Inclusive `[min, max]` range used for random draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanF32 {
    pub min: f32,
    pub max: f32,
}

impl SpanF32 {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn is_valid_positive(&self) -> bool {
        self.min > 0.0 && self.max >= self.min
    }
}

/// Linear schedule that decreases with level and bottoms out at `floor`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub base: f64,
    pub step: f64,
    pub floor: f64,
}

impl Schedule {
    pub const fn new(base: f64, step: f64, floor: f64) -> Self {
        Self { base, step, floor }
    }

    /// Value at an already-clamped level
    #[inline]
    pub fn at(&self, level: u32) -> f64 {
        (self.base - level as f64 * self.step).max(self.floor)
    }
}

/// Complete per-tier tuning, selected once per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Lives at session start
    pub lives: i32,
    /// Balloon radius range (px)
    pub radius: SpanF32,
    /// Base rise speed range (px/s), scaled by `LevelParams::speed_mul`
    pub speed: SpanF32,
    /// Hit radius = balloon radius * hit_mul
    pub hit_mul: f32,
    /// Clearing a level divisible by this awards a life
    pub extra_life_every: u32,
    /// Difficulty scaling stops at this level
    pub level_cap: u32,
    /// Active phase length (ms)
    pub duration: Schedule,
    /// Lower bound of the inter-spawn delay (ms)
    pub spawn_min: Schedule,
    /// Upper bound of the inter-spawn delay (ms)
    pub spawn_max: Schedule,
    /// Speed multiplier growth per level
    pub speed_step: f32,
    /// Drift multiplier growth per level
    pub drift_step: f32,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}

/// Configuration defects caught at load time, outside the frame loop
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("starting lives must be positive, got {0}")]
    NoLives(i32),

    #[error("{field} range must be positive and ordered, got {min}..{max}")]
    BadSpan {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("hit multiplier must be positive, got {0}")]
    BadHitMul(f32),

    #[error("extra_life_every must be at least 1")]
    ZeroExtraLifeCadence,

    #[error("level_cap must be at least 1")]
    ZeroLevelCap,

    #[error("level {level}: duration must be positive, got {duration_ms}ms")]
    BadDuration { level: u32, duration_ms: f64 },

    #[error("level {level}: spawn window {min_ms}..{max_ms}ms is empty or non-positive")]
    BadSpawnWindow { level: u32, min_ms: f64, max_ms: f64 },

    #[error("speed_step and drift_step must be non-negative")]
    NegativeStep,

    #[error("invalid profile JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DifficultyProfile {
    /// Parse a profile from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let profile: DifficultyProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Check every invariant the engine relies on.
    ///
    /// Schedules are evaluated at each level up to the cap since the floors
    /// of `spawn_min` and `spawn_max` can cross even when the bases are ordered.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lives <= 0 {
            return Err(TuningError::NoLives(self.lives));
        }
        for (field, span) in [("radius", self.radius), ("speed", self.speed)] {
            if !span.is_valid_positive() {
                return Err(TuningError::BadSpan {
                    field,
                    min: span.min,
                    max: span.max,
                });
            }
        }
        if !(self.hit_mul > 0.0) {
            return Err(TuningError::BadHitMul(self.hit_mul));
        }
        if self.extra_life_every == 0 {
            return Err(TuningError::ZeroExtraLifeCadence);
        }
        if self.level_cap == 0 {
            return Err(TuningError::ZeroLevelCap);
        }
        if self.speed_step < 0.0 || self.drift_step < 0.0 {
            return Err(TuningError::NegativeStep);
        }

        for level in 1..=self.level_cap {
            let params = level_params(self, level);
            if !(params.duration_ms > 0.0) {
                return Err(TuningError::BadDuration {
                    level,
                    duration_ms: params.duration_ms,
                });
            }
            if !(params.spawn_min_ms > 0.0) || params.spawn_max_ms < params.spawn_min_ms {
                return Err(TuningError::BadSpawnWindow {
                    level,
                    min_ms: params.spawn_min_ms,
                    max_ms: params.spawn_max_ms,
                });
            }
        }
        Ok(())
    }
}

/// Tuning derived for a single level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    pub duration_ms: f64,
    pub spawn_min_ms: f64,
    pub spawn_max_ms: f64,
    pub speed_mul: f32,
    pub drift_mul: f32,
}

/// Derive the level's tuning from the profile. Pure.
pub fn level_params(profile: &DifficultyProfile, level: u32) -> LevelParams {
    let clamped = level.min(profile.level_cap);
    LevelParams {
        duration_ms: profile.duration.at(clamped),
        spawn_min_ms: profile.spawn_min.at(clamped),
        spawn_max_ms: profile.spawn_max.at(clamped),
        speed_mul: 1.0 + clamped as f32 * profile.speed_step,
        drift_mul: 1.0 + clamped as f32 * profile.drift_step,
    }
}
