//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied time only (`now` in ms, `dt` in seconds)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod effects;
pub mod field;
pub mod hit;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use effects::{Effects, Particle, Ring};
pub use field::BalloonField;
pub use hit::{PopEvent, find_hit, hit_test, resolve_hits};
pub use snapshot::{HudStats, Snapshot};
pub use state::{Balloon, BalloonColor, GameEvent, GameState, Mode, Playfield};
pub use tick::{FrameClock, TickInput, TickOutput, tick};
