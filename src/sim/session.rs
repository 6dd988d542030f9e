//! Session state machine
//!
//! ```text
//! Idle ──start──▶ Level ──deadline passed && field empty──▶ Intermission
//!                   ▲  │                                        │
//!                   │  └──lives <= 0──▶ GameOver                │
//!                   └────────────intermission deadline──────────┘
//! ```
//!
//! `reset` is safe from any mode and returns to `Idle` with nothing left over.

use super::state::{GameEvent, GameState, Mode};
use crate::consts::*;
use crate::hud::StatusHint;
use crate::tuning::{Difficulty, DifficultyProfile, level_params};

impl GameState {
    /// Reinitialize every session field and return to `Idle`.
    ///
    /// Profile, playfield, effects toggle and the RNG stream are kept.
    pub fn reset(&mut self) {
        self.mode = Mode::Idle;
        self.level = 1;
        self.level_params = level_params(&self.profile, 1);
        self.mode_until = 0.0;
        self.score = 0;
        self.lives = self.profile.lives;
        self.pops = 0;
        self.combo = 0;
        self.combo_until = None;
        self.field.clear();
        self.effects.clear();
        self.status = StatusHint::ChooseDifficulty;
    }

    /// Reset and begin level 1 at `now`
    pub fn start(&mut self, now: f64) -> GameEvent {
        self.reset();
        log::info!(
            "Session start: lives={} hit_mul={} level_cap={}",
            self.lives,
            self.profile.hit_mul,
            self.profile.level_cap
        );
        self.start_level(now)
    }

    /// Switch to another tier's profile and start over
    pub fn select_difficulty(&mut self, difficulty: Difficulty, now: f64) -> GameEvent {
        log::info!("Difficulty: {}", difficulty.as_str());
        self.select_profile(difficulty.profile(), now)
    }

    /// Switch to a custom (already validated) profile and start over
    pub fn select_profile(&mut self, profile: DifficultyProfile, now: f64) -> GameEvent {
        self.profile = profile;
        self.start(now)
    }

    fn start_level(&mut self, now: f64) -> GameEvent {
        self.mode = Mode::Level;
        self.level_params = level_params(&self.profile, self.level);
        self.mode_until = now + self.level_params.duration_ms;
        self.status = StatusHint::LevelStart { level: self.level };
        log::info!(
            "Level {} start: {}ms, spawn {}..{}ms",
            self.level,
            self.level_params.duration_ms,
            self.level_params.spawn_min_ms,
            self.level_params.spawn_max_ms
        );
        GameEvent::LevelStarted {
            level: self.level,
            duration_ms: self.level_params.duration_ms,
        }
    }

    fn clear_level(&mut self, now: f64) -> GameEvent {
        let bonus = CLEAR_BONUS_BASE + self.level as u64 * CLEAR_BONUS_PER_LEVEL;
        self.score += bonus;
        let extra_life = self.level % self.profile.extra_life_every == 0;
        if extra_life {
            self.lives += 1;
        }
        self.mode = Mode::Intermission;
        self.mode_until = now + INTERMISSION_MS;
        self.status = StatusHint::LevelClear {
            level: self.level,
            bonus,
            extra_life,
        };
        log::info!(
            "Level {} clear: +{} (extra life: {})",
            self.level,
            bonus,
            extra_life
        );
        GameEvent::LevelCleared {
            level: self.level,
            bonus,
            extra_life,
        }
    }

    /// Fire any deadline-driven transition due at `now`.
    ///
    /// A level only clears once its timer has run out and the field is empty.
    pub fn check_deadlines(&mut self, now: f64) -> Option<GameEvent> {
        match self.mode {
            Mode::Intermission if now >= self.mode_until => {
                self.level += 1;
                Some(self.start_level(now))
            }
            Mode::Level if now >= self.mode_until && self.field.is_empty() => {
                Some(self.clear_level(now))
            }
            _ => None,
        }
    }

    /// Advance combo and score for a pop at `now`; returns the points awarded
    pub fn register_pop(&mut self, now: f64) -> u64 {
        self.pops += 1;
        self.combo = match self.combo_until {
            Some(until) if now <= until => self.combo + 1,
            _ => 1,
        };
        self.combo_until = Some(now + COMBO_WINDOW_MS);

        let points = POP_BASE_POINTS + self.combo as u64 * COMBO_POINTS;
        self.score += points;
        self.status = if self.combo > 1 {
            StatusHint::Combo { combo: self.combo }
        } else {
            StatusHint::NicePop
        };
        points
    }

    /// Take a life for an escaped balloon, ending the run at zero
    pub fn register_escape(&mut self) -> Option<GameEvent> {
        self.lives -= 1;
        if self.lives <= 0 && self.mode == Mode::Level {
            self.mode = Mode::GameOver;
            self.status = StatusHint::GameOver { score: self.score };
            log::info!("Game over: score={} level={}", self.score, self.level);
            return Some(GameEvent::GameOver {
                score: self.score,
                level: self.level,
            });
        }
        None
    }

    /// Whole seconds until the level deadline, 0 outside `Level` mode
    pub fn time_left_secs(&self, now: f64) -> u32 {
        if self.mode != Mode::Level {
            return 0;
        }
        ((self.mode_until - now) / 1000.0).ceil().max(0.0) as u32
    }
}
