//! Pointer contract and pointer sources
//!
//! The engine only sees up to [`MAX_POINTERS`] pointers per frame, already in
//! playfield pixels. Where they come from (mouse, hand tracking, autopilot) is
//! decided here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_POINTERS;
use crate::sim::{Balloon, Playfield};

/// A tracked pointer position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub pos: Vec2,
    pub active: bool,
}

impl Default for Pointer {
    fn default() -> Self {
        Self {
            pos: Vec2::splat(-9999.0),
            active: false,
        }
    }
}

impl Pointer {
    /// An active pointer at (x, y)
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            active: true,
        }
    }
}

/// Pointer slots delivered to the engine each frame
pub type PointerSet = [Pointer; MAX_POINTERS];

/// Anything that can be polled for the current pointers
pub trait PointerSource {
    fn poll(&mut self, now: f64) -> PointerSet;
}

/// Merges mouse and hand-tracking input.
///
/// The mouse drives pointer 0 until the first hand frame with a hand in it;
/// after that the fingertips own both pointers.
#[derive(Debug, Clone)]
pub struct PointerRouter {
    pointers: PointerSet,
    playfield: Playfield,
    mirror: bool,
    using_mouse: bool,
    hand_seen: bool,
}

impl PointerRouter {
    pub fn new(playfield: Playfield, mirror: bool) -> Self {
        Self {
            pointers: PointerSet::default(),
            playfield,
            mirror,
            using_mouse: true,
            hand_seen: false,
        }
    }

    pub fn resize(&mut self, playfield: Playfield) {
        self.playfield = playfield;
    }

    pub fn using_mouse(&self) -> bool {
        self.using_mouse
    }

    /// True once any hand has been detected
    pub fn hand_seen(&self) -> bool {
        self.hand_seen
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        if self.using_mouse {
            self.pointers[0] = Pointer::at(x, y);
        }
    }

    pub fn mouse_leave(&mut self) {
        if self.using_mouse {
            self.pointers[0].active = false;
        }
    }

    /// Feed one hand-tracking result: normalized (0..1) fingertip per detected hand
    pub fn hand_frame(&mut self, fingertips: &[Vec2]) {
        if fingertips.is_empty() {
            if !self.using_mouse {
                for p in &mut self.pointers {
                    p.active = false;
                }
            }
            return;
        }

        self.using_mouse = false;
        if !self.hand_seen {
            log::info!("Hand tracking active, mouse input disabled");
        }
        self.hand_seen = true;

        for (slot, pointer) in self.pointers.iter_mut().enumerate() {
            *pointer = match fingertips.get(slot) {
                Some(tip) => {
                    let nx = if self.mirror { 1.0 - tip.x } else { tip.x };
                    Pointer::at(nx * self.playfield.width, tip.y * self.playfield.height)
                }
                None => Pointer {
                    active: false,
                    ..*pointer
                },
            };
        }
    }

    pub fn pointers(&self) -> PointerSet {
        self.pointers
    }
}

impl PointerSource for PointerRouter {
    fn poll(&mut self, _now: f64) -> PointerSet {
        self.pointers
    }
}

/// Steers one pointer toward the balloon closest to escaping.
///
/// Used by the headless runner; it chases like a player would, at a capped speed.
#[derive(Debug, Clone)]
pub struct AutoPilot {
    pos: Vec2,
    /// Pointer speed cap (px/s)
    max_speed: f32,
    target: Option<u32>,
}

impl AutoPilot {
    pub fn new(start: Vec2, max_speed: f32) -> Self {
        Self {
            pos: start,
            max_speed,
            target: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// ID of the balloon currently being chased
    pub fn target(&self) -> Option<u32> {
        self.target
    }

    /// Move toward the highest balloon (smallest y) and report the pointer
    pub fn steer(&mut self, balloons: &[Balloon], dt: f32) -> PointerSet {
        let mut pointers = PointerSet::default();
        let Some(target) = balloons
            .iter()
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        else {
            self.target = None;
            return pointers;
        };
        self.target = Some(target.id);

        let delta = target.pos - self.pos;
        let max_step = self.max_speed * dt;
        self.pos += if delta.length() <= max_step {
            delta
        } else {
            delta.normalize_or_zero() * max_step
        };

        pointers[0] = Pointer {
            pos: self.pos,
            active: true,
        };
        pointers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BalloonColor;

    #[test]
    fn test_mouse_drives_pointer_zero() {
        let mut router = PointerRouter::new(Playfield::new(800.0, 600.0), true);
        router.mouse_move(120.0, 80.0);
        let pointers = router.poll(0.0);
        assert_eq!(pointers[0], Pointer::at(120.0, 80.0));
        assert!(!pointers[1].active);

        router.mouse_leave();
        assert!(!router.poll(0.0)[0].active);
    }

    #[test]
    fn test_hands_take_over_mirrored() {
        let mut router = PointerRouter::new(Playfield::new(800.0, 600.0), true);
        router.mouse_move(10.0, 10.0);
        router.hand_frame(&[Vec2::new(0.25, 0.5), Vec2::new(0.75, 0.1)]);
        assert!(!router.using_mouse());
        assert!(router.hand_seen());

        let pointers = router.poll(0.0);
        assert_eq!(pointers[0], Pointer::at(600.0, 300.0));
        assert_eq!(pointers[1].pos, Vec2::new(200.0, 60.0));

        // Mouse no longer moves pointers
        router.mouse_move(1.0, 1.0);
        assert_eq!(router.poll(0.0)[0].pos, Vec2::new(600.0, 300.0));

        // One hand leaves
        router.hand_frame(&[Vec2::new(0.5, 0.5)]);
        let pointers = router.poll(0.0);
        assert!(pointers[0].active);
        assert!(!pointers[1].active);

        // No hands at all
        router.hand_frame(&[]);
        assert!(router.poll(0.0).iter().all(|p| !p.active));
    }

    #[test]
    fn test_empty_hand_frame_keeps_mouse() {
        let mut router = PointerRouter::new(Playfield::new(800.0, 600.0), false);
        router.mouse_move(50.0, 60.0);
        router.hand_frame(&[]);
        assert!(router.using_mouse());
        assert!(router.poll(0.0)[0].active);
    }

    #[test]
    fn test_unmirrored_hands() {
        let mut router = PointerRouter::new(Playfield::new(1000.0, 500.0), false);
        router.hand_frame(&[Vec2::new(0.25, 0.5)]);
        assert_eq!(router.pointers()[0].pos, Vec2::new(250.0, 250.0));
    }

    #[test]
    fn test_autopilot_chases_highest() {
        let mut low = Balloon::new(Vec2::new(100.0, 500.0), 20.0, 50.0, 0.0, BalloonColor::PALETTE[0]);
        low.id = 1;
        let mut high = Balloon::new(Vec2::new(300.0, 100.0), 20.0, 50.0, 0.0, BalloonColor::PALETTE[1]);
        high.id = 2;

        let mut pilot = AutoPilot::new(Vec2::new(300.0, 300.0), 1000.0);
        let pointers = pilot.steer(&[low.clone(), high.clone()], 0.1);
        assert_eq!(pilot.target(), Some(2));
        assert!(pointers[0].active);
        assert_eq!(pointers[0].pos, Vec2::new(300.0, 200.0));

        let pointers = pilot.steer(&[low, high], 0.1);
        assert_eq!(pointers[0].pos, Vec2::new(300.0, 100.0));

        let pointers = pilot.steer(&[], 0.1);
        assert!(!pointers[0].active);
        assert_eq!(pilot.target(), None);
    }
}
