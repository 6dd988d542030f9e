//! Balloon field: spawning, rising and culling
//!
//! Balloons are kept in spawn order. Removal never reorders the survivors, so
//! a reverse index scan (see [`super::hit::find_hit`]) always sees a stable
//! sequence.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Balloon, BalloonColor, Playfield};
use crate::consts::*;
use crate::tuning::{DifficultyProfile, LevelParams};

/// Owns every live balloon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalloonField {
    balloons: Vec<Balloon>,
    /// Time of the most recent spawn (ms); `None` spawns on the first attempt
    last_spawn_at: Option<f64>,
    next_id: u32,
}

impl BalloonField {
    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn len(&self) -> usize {
        self.balloons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balloons.is_empty()
    }

    pub fn last_spawn_at(&self) -> Option<f64> {
        self.last_spawn_at
    }

    /// Drop every balloon and forget spawn timing
    pub fn clear(&mut self) {
        self.balloons.clear();
        self.last_spawn_at = None;
        self.next_id = 0;
    }

    /// Add a balloon, assigning it a fresh ID
    pub fn insert(&mut self, mut balloon: Balloon) -> u32 {
        self.next_id += 1;
        balloon.id = self.next_id;
        self.balloons.push(balloon);
        self.next_id
    }

    /// Remove by index, preserving the order of the rest
    pub fn remove_at(&mut self, index: usize) -> Balloon {
        self.balloons.remove(index)
    }

    /// Remove by ID
    pub fn remove(&mut self, id: u32) -> Option<Balloon> {
        let index = self.balloons.iter().position(|b| b.id == id)?;
        Some(self.remove_at(index))
    }

    /// Spawn one balloon if the randomized inter-spawn delay has elapsed.
    ///
    /// The delay is redrawn from `[spawn_min_ms, spawn_max_ms]` on every attempt.
    pub fn try_spawn<R: Rng>(
        &mut self,
        now: f64,
        profile: &DifficultyProfile,
        params: &LevelParams,
        playfield: &Playfield,
        rng: &mut R,
    ) -> Option<u32> {
        if let Some(last) = self.last_spawn_at {
            let delay = rng.random_range(params.spawn_min_ms..=params.spawn_max_ms);
            if now - last <= delay {
                return None;
            }
        }

        let id = self.spawn(profile, params, playfield, rng);
        self.last_spawn_at = Some(now);
        Some(id)
    }

    /// Create a balloon just below the bottom edge with randomized kinematics
    pub fn spawn<R: Rng>(
        &mut self,
        profile: &DifficultyProfile,
        params: &LevelParams,
        playfield: &Playfield,
        rng: &mut R,
    ) -> u32 {
        let radius = rng.random_range(profile.radius.min..=profile.radius.max);
        let (x_lo, x_hi) = playfield.x_bounds(radius, SPAWN_INSET);
        let x = rng.random_range(x_lo..=x_hi);
        let y = playfield.height + radius + rng.random_range(0.0..=SPAWN_DEPTH);
        let speed = rng.random_range(profile.speed.min..=profile.speed.max) * params.speed_mul;
        let drift = rng.random_range(-BASE_DRIFT..=BASE_DRIFT) * params.drift_mul;
        let color =
            BalloonColor::PALETTE[rng.random_range(0..BalloonColor::PALETTE.len())];
        let phase = rng.random_range(0.0..std::f32::consts::TAU);

        let id = self.insert(
            Balloon::new(Vec2::new(x, y), radius, speed, drift, color).with_phase(phase),
        );
        log::debug!("Spawned balloon {id} r={radius:.1} speed={speed:.1}");
        id
    }

    /// Rise and sway every balloon, then cull the ones past the top edge.
    ///
    /// Returns the escaped balloons in field order.
    pub fn advance(&mut self, dt: f32, now: f64, playfield: &Playfield) -> Vec<Balloon> {
        let mut escaped = Vec::new();
        self.balloons.retain_mut(|b| {
            b.pos.y -= b.speed * dt;
            let sway = ((now * DRIFT_RATE) as f32 + b.phase).sin();
            b.pos.x += sway * b.drift * dt;
            let (lo, hi) = playfield.x_bounds(b.radius, WALL_INSET);
            b.pos.x = b.pos.x.clamp(lo, hi);

            if b.pos.y < -b.radius - ESCAPE_MARGIN {
                escaped.push(b.clone());
                false
            } else {
                true
            }
        });
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{Difficulty, level_params};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn balloon_at(x: f32, y: f32, radius: f32, speed: f32) -> Balloon {
        Balloon::new(Vec2::new(x, y), radius, speed, 0.0, BalloonColor::PALETTE[0])
    }

    #[test]
    fn test_first_attempt_spawns_immediately() {
        let profile = Difficulty::Medium.profile();
        let params = level_params(&profile, 1);
        let playfield = Playfield::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = BalloonField::default();

        assert_eq!(field.try_spawn(0.0, &profile, &params, &playfield, &mut rng), Some(1));
        assert_eq!(field.last_spawn_at(), Some(0.0));

        // Never spawns before spawn_min_ms has passed
        assert_eq!(field.try_spawn(params.spawn_min_ms, &profile, &params, &playfield, &mut rng), None);
        // Always spawns once spawn_max_ms has passed
        assert!(field.try_spawn(params.spawn_max_ms + 1.0, &profile, &params, &playfield, &mut rng).is_some());
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_spawned_balloon_within_ranges() {
        let profile = Difficulty::Hard.profile();
        let params = level_params(&profile, 4);
        let playfield = Playfield::new(640.0, 480.0);
        let mut rng = Pcg32::seed_from_u64(99);
        let mut field = BalloonField::default();

        for _ in 0..200 {
            field.spawn(&profile, &params, &playfield, &mut rng);
        }
        for b in field.balloons() {
            assert!(b.radius >= profile.radius.min && b.radius <= profile.radius.max);
            assert!(b.pos.x >= b.radius + SPAWN_INSET - 1e-3);
            assert!(b.pos.x <= playfield.width - b.radius - SPAWN_INSET + 1e-3);
            assert!(b.pos.y >= playfield.height + b.radius);
            assert!(b.pos.y <= playfield.height + b.radius + SPAWN_DEPTH + 1e-3);
            assert!(b.speed >= profile.speed.min * params.speed_mul - 1e-3);
            assert!(b.speed <= profile.speed.max * params.speed_mul + 1e-3);
            assert!(b.drift.abs() <= BASE_DRIFT * params.drift_mul + 1e-3);
            assert!(BalloonColor::PALETTE.contains(&b.color));
        }
    }

    #[test]
    fn test_advance_rises_and_clamps() {
        let playfield = Playfield::new(200.0, 400.0);
        let mut field = BalloonField::default();
        let mut b = balloon_at(195.0, 300.0, 20.0, 100.0);
        b.drift = 500.0;
        b.phase = std::f32::consts::FRAC_PI_2;
        field.insert(b);

        let escaped = field.advance(0.05, 0.0, &playfield);
        assert!(escaped.is_empty());
        let b = &field.balloons()[0];
        assert!((b.pos.y - 295.0).abs() < 1e-4);
        // Pushed right by the sway but clamped off the wall
        assert_eq!(b.pos.x, 200.0 - 20.0 - WALL_INSET);
    }

    #[test]
    fn test_escape_culls_and_reports() {
        let playfield = Playfield::new(400.0, 400.0);
        let mut field = BalloonField::default();
        // Escape line for r=10 is y < -30
        let a = field.insert(balloon_at(100.0, -29.0, 10.0, 40.0));
        let b = field.insert(balloon_at(200.0, 100.0, 10.0, 40.0));
        let c = field.insert(balloon_at(300.0, -29.5, 10.0, 1.0));

        let escaped = field.advance(0.05, 0.0, &playfield);
        assert_eq!(escaped.iter().map(|e| e.id).collect::<Vec<_>>(), vec![a]);
        assert_eq!(field.balloons().iter().map(|e| e.id).collect::<Vec<_>>(), vec![b, c]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut field = BalloonField::default();
        let ids: Vec<u32> = (0..5)
            .map(|i| field.insert(balloon_at(i as f32 * 50.0 + 30.0, 100.0, 10.0, 10.0)))
            .collect();

        let removed = field.remove_at(1);
        assert_eq!(removed.id, ids[1]);
        assert_eq!(field.remove(ids[3]).map(|b| b.id), Some(ids[3]));
        assert_eq!(field.remove(ids[3]), None);
        assert_eq!(
            field.balloons().iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![ids[0], ids[2], ids[4]]
        );
    }

    #[test]
    fn test_clear_resets_spawn_timing() {
        let mut field = BalloonField::default();
        field.insert(balloon_at(50.0, 50.0, 10.0, 10.0));
        field.last_spawn_at = Some(123.0);
        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.last_spawn_at(), None);
        assert_eq!(field.insert(balloon_at(50.0, 50.0, 10.0, 10.0)), 1);
    }
}
