//! Pointer-vs-balloon hit detection and resolution
//!
//! Hit testing is a plain squared-distance check against a scaled radius.
//! Each active pointer pops at most one balloon per frame: the field is
//! scanned from the newest balloon to the oldest and the first match wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Balloon, BalloonColor, GameState};
use crate::consts::{CUE_MIN_INTENSITY, CUE_REFERENCE_RADIUS};
use crate::input::Pointer;

/// Emitted for every popped balloon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopEvent {
    pub id: u32,
    pub pos: Vec2,
    pub color: BalloonColor,
    pub radius: f32,
    /// Combo count after this pop
    pub combo: u32,
    /// Points awarded for this pop
    pub points: u64,
}

impl PopEvent {
    /// Loudness hint for the pop cue, larger balloons pop louder
    pub fn intensity(&self) -> f32 {
        (self.radius / CUE_REFERENCE_RADIUS).max(CUE_MIN_INTENSITY)
    }
}

/// True if `point` lies within `radius * hit_mul` of the balloon center
#[inline]
pub fn hit_test(point: Vec2, balloon: &Balloon, hit_mul: f32) -> bool {
    let hit_r = balloon.radius * hit_mul;
    point.distance_squared(balloon.pos) <= hit_r * hit_r
}

/// Index of the first balloon hit by `point`, scanning in reverse index order
pub fn find_hit(balloons: &[Balloon], point: Vec2, hit_mul: f32) -> Option<usize> {
    (0..balloons.len())
        .rev()
        .find(|&i| hit_test(point, &balloons[i], hit_mul))
}

/// Pop whatever the active pointers are touching.
///
/// Removes hit balloons, advances combo and score, and spawns a burst per pop
/// when effects are enabled.
pub fn resolve_hits(state: &mut GameState, now: f64, pointers: &[Pointer]) -> Vec<PopEvent> {
    let mut pops = Vec::new();
    let hit_mul = state.profile.hit_mul;

    for pointer in pointers.iter().filter(|p| p.active) {
        let Some(index) = find_hit(state.field.balloons(), pointer.pos, hit_mul) else {
            continue;
        };

        let balloon = state.field.remove_at(index);
        let points = state.register_pop(now);

        if state.effects_enabled {
            state.effects.burst(balloon.pos, balloon.color, &mut state.fx_rng);
        }

        log::debug!(
            "Popped balloon {} combo={} +{}",
            balloon.id,
            state.combo,
            points
        );
        pops.push(PopEvent {
            id: balloon.id,
            pos: balloon.pos,
            color: balloon.color,
            radius: balloon.radius,
            combo: state.combo,
            points,
        });
    }

    pops
}
