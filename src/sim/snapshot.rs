//! Read-only view of the engine for renderer and HUD adapters

use glam::Vec2;
use serde::Serialize;

use super::effects::{Particle, Ring};
use super::state::{Balloon, GameState, Mode};
use crate::input::Pointer;

/// Banner fades out over the last this-many seconds of an intermission
const BANNER_FADE_SECS: f64 = 0.35;

/// Scalar HUD values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudStats {
    pub score: u64,
    pub lives: i32,
    pub pops: u32,
    pub level: u32,
    pub combo: u32,
    /// Seconds to the level deadline; 0 outside `Level` mode
    pub time_left: u32,
    pub status: String,
}

impl HudStats {
    pub fn capture(state: &GameState, now: f64) -> Self {
        Self {
            score: state.score,
            lives: state.lives,
            pops: state.pops,
            level: state.level,
            combo: state.combo,
            time_left: state.time_left_secs(now),
            status: state.status.to_string(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub now: f64,
    pub mode: Mode,
    pub balloons: Vec<Balloon>,
    pub particles: Vec<Particle>,
    pub rings: Vec<Ring>,
    /// Positions of active pointers only
    pub pointers: Vec<Vec2>,
    /// Opacity of the level-clear banner (0 when not in intermission)
    pub banner_alpha: f32,
    pub hud: HudStats,
}

impl Snapshot {
    pub fn capture(state: &GameState, now: f64, pointers: &[Pointer]) -> Self {
        Self {
            now,
            mode: state.mode,
            balloons: state.field.balloons().to_vec(),
            particles: state.effects.particles.clone(),
            rings: state.effects.rings.clone(),
            pointers: pointers.iter().filter(|p| p.active).map(|p| p.pos).collect(),
            banner_alpha: banner_alpha(state, now),
            hud: HudStats::capture(state, now),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn banner_alpha(state: &GameState, now: f64) -> f32 {
    if state.mode != Mode::Intermission {
        return 0.0;
    }
    let remaining = ((state.mode_until - now) / 1000.0).max(0.0);
    (remaining / BANNER_FADE_SECS).min(1.0) as f32
}
