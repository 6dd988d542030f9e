//! Pop effects: particle shards and expanding rings
//!
//! Purely cosmetic. Nothing here feeds back into score, lives or level flow.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::BalloonColor;
use crate::consts::*;

/// A shard flung out by a pop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: BalloonColor,
    /// Lifespan (seconds)
    pub life: f32,
    /// Elapsed (seconds)
    pub age: f32,
    /// Per-frame velocity damping
    pub drag: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
}

impl Particle {
    /// Fades from 1 at birth to 0 at end of life
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.life).clamp(0.0, 1.0)
    }
}

/// An expanding shockwave ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub pos: Vec2,
    pub radius: f32,
    /// Radial growth (px/s)
    pub growth: f32,
    pub life: f32,
    pub age: f32,
    pub color: BalloonColor,
}

impl Ring {
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.life).clamp(0.0, 1.0)
    }
}

/// All live effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub rings: Vec<Ring>,
}

impl Effects {
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.rings.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.rings.clear();
    }

    /// Spawn a full-circle shard burst plus one ring at `pos`
    pub fn burst<R: Rng>(&mut self, pos: Vec2, color: BalloonColor, rng: &mut R) {
        self.particles.reserve(SHARD_COUNT);
        for i in 0..SHARD_COUNT {
            let angle = std::f32::consts::TAU * i as f32 / SHARD_COUNT as f32
                + rng.random_range(-SHARD_JITTER..=SHARD_JITTER);
            let speed = rng.random_range(SHARD_SPEED.0..=SHARD_SPEED.1);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                size: rng.random_range(SHARD_SIZE.0..=SHARD_SIZE.1),
                color,
                life: rng.random_range(SHARD_LIFE.0..=SHARD_LIFE.1),
                age: 0.0,
                drag: rng.random_range(SHARD_DRAG.0..=SHARD_DRAG.1),
                gravity: rng.random_range(SHARD_GRAVITY.0..=SHARD_GRAVITY.1),
            });
        }

        self.rings.push(Ring {
            pos,
            radius: RING_START_RADIUS,
            growth: rng.random_range(RING_GROWTH.0..=RING_GROWTH.1),
            life: RING_LIFE,
            age: 0.0,
            color,
        });
    }

    /// Age everything by `dt` seconds and purge what has expired
    pub fn advance(&mut self, dt: f32) {
        self.particles.retain_mut(|p| {
            p.age += dt;
            if p.age >= p.life {
                return false;
            }
            p.vel.x *= p.drag;
            p.vel.y = p.vel.y * p.drag + p.gravity * dt;
            p.pos += p.vel * dt;
            true
        });

        self.rings.retain_mut(|r| {
            r.age += dt;
            if r.age >= r.life {
                return false;
            }
            r.radius += r.growth * dt;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn burst_at(pos: Vec2) -> Effects {
        let mut effects = Effects::default();
        let mut rng = Pcg32::seed_from_u64(42);
        effects.burst(pos, BalloonColor::PALETTE[4], &mut rng);
        effects
    }

    #[test]
    fn test_burst_counts() {
        let effects = burst_at(Vec2::new(10.0, 20.0));
        assert_eq!(effects.particles.len(), SHARD_COUNT);
        assert_eq!(effects.rings.len(), 1);
        assert_eq!(effects.rings[0].radius, RING_START_RADIUS);
        assert!(effects.particles.iter().all(|p| p.pos == Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn test_burst_covers_full_circle() {
        let effects = burst_at(Vec2::ZERO);
        // One shard per sector, each within the jitter of its nominal angle
        for (i, p) in effects.particles.iter().enumerate() {
            let nominal = std::f32::consts::TAU * i as f32 / SHARD_COUNT as f32;
            let dir = Vec2::new(nominal.cos(), nominal.sin());
            let cos = dir.dot(p.vel.normalize());
            assert!(cos >= SHARD_JITTER.cos() - 1e-4);
            let speed = p.vel.length();
            assert!(speed >= SHARD_SPEED.0 - 1e-3 && speed <= SHARD_SPEED.1 + 1e-3);
        }
    }

    #[test]
    fn test_advance_applies_drag_and_gravity() {
        let mut effects = Effects::default();
        effects.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(100.0, 0.0),
            size: 3.0,
            color: BalloonColor::PALETTE[0],
            life: 1.0,
            age: 0.0,
            drag: 0.5,
            gravity: 200.0,
        });
        effects.advance(0.1);

        let p = &effects.particles[0];
        assert!((p.vel.x - 50.0).abs() < 1e-4);
        assert!((p.vel.y - 20.0).abs() < 1e-4);
        assert!((p.pos.x - 5.0).abs() < 1e-4);
        assert!((p.pos.y - 2.0).abs() < 1e-4);
        assert!((p.alpha() - 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_everything_expires() {
        let mut effects = burst_at(Vec2::ZERO);
        let ring_growth = effects.rings[0].growth;
        effects.advance(0.1);
        assert!((effects.rings[0].radius - (RING_START_RADIUS + ring_growth * 0.1)).abs() < 1e-3);

        // Ring lives 0.24s, shards at most 0.38s
        effects.advance(0.15);
        assert!(effects.rings.is_empty());
        effects.advance(0.15);
        assert!(effects.is_empty());
    }
}
