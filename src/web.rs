//! Browser entry points
//!
//! The page owns the canvas, camera and Web Audio. It feeds pointer input into
//! [`WebGame`], calls `tick` from `requestAnimationFrame` and draws the JSON
//! frame it gets back.

use glam::Vec2;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, CueQueue, PopCue};
use crate::input::PointerRouter;
use crate::settings::Settings;
use crate::sim::{FrameClock, GameEvent, GameState, Playfield, Snapshot, TickInput, tick};
use crate::tuning::Difficulty;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) keeps the first logger
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Balloon Pop starting...");
}

/// Everything the page needs to present one frame
#[derive(Serialize)]
struct Frame<'a> {
    snapshot: &'a Snapshot,
    events: &'a [GameEvent],
    cues: &'a [PopCue],
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    router: PointerRouter,
    clock: FrameClock,
    audio: AudioManager<CueQueue>,
    settings: Settings,
    /// Events raised between frames (difficulty picks), flushed with the next tick
    pending: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: f64) -> WebGame {
        let settings = Settings::default();
        let playfield = Playfield::new(width, height);
        let mut game = WebGame {
            state: GameState::new(settings.difficulty.profile(), playfield, seed as u64),
            router: PointerRouter::new(playfield, settings.mirror_camera),
            clock: FrameClock::default(),
            audio: AudioManager::new(CueQueue::default()),
            settings,
            pending: Vec::new(),
        };
        game.apply_settings();
        log::info!("Game initialized with seed: {}", seed as u64);
        game
    }

    /// Load persisted settings (JSON from LocalStorage); bad input keeps defaults
    pub fn load_settings(&mut self, json: &str) {
        self.settings = Settings::from_json(json);
        self.apply_settings();
    }

    pub fn settings_json(&self) -> String {
        self.settings.to_json()
    }

    pub fn storage_key() -> String {
        Settings::STORAGE_KEY.to_string()
    }

    /// Start a session on the named tier; false if the name is unknown
    pub fn select_difficulty(&mut self, name: &str, now: f64) -> bool {
        let Some(difficulty) = Difficulty::from_str(name) else {
            log::warn!("Unknown difficulty: {name}");
            return false;
        };
        self.settings.difficulty = difficulty;
        self.audio.resume();
        let event = self.state.select_difficulty(difficulty, now);
        self.pending.push(event);
        self.clock.reset();
        true
    }

    /// Back to the difficulty picker
    pub fn reset(&mut self) {
        self.state.reset();
        self.pending.clear();
        self.clock.reset();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
        self.router.resize(Playfield::new(width, height));
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        self.router.mouse_move(x, y);
    }

    pub fn mouse_leave(&mut self) {
        self.router.mouse_leave();
    }

    /// One hand-tracker result as flat normalized `[x0, y0, x1, y1, ...]`
    pub fn hands(&mut self, tips: &[f32]) {
        let tips: Vec<Vec2> = tips
            .chunks_exact(2)
            .map(|xy| Vec2::new(xy[0], xy[1]))
            .collect();
        self.router.hand_frame(&tips);
    }

    pub fn using_mouse(&self) -> bool {
        self.router.using_mouse()
    }

    pub fn set_effects(&mut self, enabled: bool) {
        self.settings.effects = enabled;
        self.state.set_effects_enabled(enabled);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.audio.set_muted(muted);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.settings.master_volume = volume.clamp(0.0, 1.0);
        self.audio.set_master_volume(volume);
    }

    /// Advance one frame at `now` (ms) and return the frame as JSON
    pub fn tick(&mut self, now: f64) -> String {
        let dt = self.clock.delta(now);
        let input = TickInput::with_pointers(self.router.pointers());
        let out = tick(&mut self.state, &input, now, dt);

        let mut events = std::mem::take(&mut self.pending);
        events.extend(out.events);
        self.audio.handle_events(now, &events);
        let cues = std::mem::take(&mut self.audio.sink_mut().0);

        let frame = Frame {
            snapshot: &out.snapshot,
            events: &events,
            cues: &cues,
        };
        serde_json::to_string(&frame).unwrap_or_default()
    }
}

impl WebGame {
    fn apply_settings(&mut self) {
        self.settings.apply(&mut self.state);
        self.settings.apply_audio(&mut self.audio);
        self.router = PointerRouter::new(self.state.playfield, self.settings.mirror_camera);
    }
}
