//! Per-frame simulation tick
//!
//! Core game loop. `now` (ms) and `dt` (s) are always supplied by the caller,
//! so the simulation never reads a clock.

use super::hit::resolve_hits;
use super::snapshot::Snapshot;
use super::state::{GameEvent, GameState, Mode};
use crate::consts::*;
use crate::hud::StatusHint;
use crate::input::{Pointer, PointerSet};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current pointer positions (inactive ones are ignored)
    pub pointers: PointerSet,
}

impl TickInput {
    pub fn with_pointers(pointers: PointerSet) -> Self {
        Self { pointers }
    }

    /// Single active pointer at (x, y)
    pub fn pointer_at(x: f32, y: f32) -> Self {
        let mut pointers = PointerSet::default();
        pointers[0] = Pointer::at(x, y);
        Self { pointers }
    }
}

/// Result of a tick
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub events: Vec<GameEvent>,
    pub snapshot: Snapshot,
}

impl TickOutput {
    /// Pop events only, in pop order
    pub fn pops(&self) -> impl Iterator<Item = &super::hit::PopEvent> {
        self.events.iter().filter_map(|e| match e {
            GameEvent::Popped(pop) => Some(pop),
            _ => None,
        })
    }
}

/// Turns successive frame timestamps into clamped dt values
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    /// Seconds since the previous call, clamped to [0, MAX_FRAME_DT]; 0 on the first call
    pub fn delta(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) => ((now - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last = Some(now);
        dt.clamp(0.0, MAX_FRAME_DT)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Advance the game by one frame.
///
/// Order: deadline transitions, then (in `Level` mode only) spawn, rise/cull
/// and hit resolution, then effects decay, which runs in every mode.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64, dt: f32) -> TickOutput {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    let mut events = Vec::new();

    events.extend(state.check_deadlines(now));

    if state.mode == Mode::Level {
        if now < state.mode_until {
            let spawned = state.field.try_spawn(
                now,
                &state.profile,
                &state.level_params,
                &state.playfield,
                &mut state.rng,
            );
            events.extend(spawned.map(|id| GameEvent::Spawned { id }));
        }

        for balloon in state.field.advance(dt, now, &state.playfield) {
            log::debug!("Balloon {} escaped", balloon.id);
            let game_over = state.register_escape();
            events.push(GameEvent::Escaped {
                id: balloon.id,
                lives: state.lives,
            });
            events.extend(game_over);
        }

        if state.mode == Mode::Level {
            let pops = resolve_hits(state, now, &input.pointers);
            let idle = pops.is_empty()
                && state
                    .field
                    .last_spawn_at()
                    .is_some_and(|at| now - at > IDLE_HINT_MS);
            if idle {
                state.status = StatusHint::TrackBalloon;
            }
            events.extend(pops.into_iter().map(GameEvent::Popped));
        }
    }

    state.effects.advance(dt);

    TickOutput {
        events,
        snapshot: Snapshot::capture(state, now, &input.pointers),
    }
}
