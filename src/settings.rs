//! Game settings and preferences
//!
//! Stored as JSON by the host (LocalStorage in the browser, a file natively).

use serde::{Deserialize, Serialize};

use crate::audio::{AudioManager, AudioSink};
use crate::sim::GameState;
use crate::tuning::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tier used when a session starts
    pub difficulty: Difficulty,
    /// Particle bursts and rings on pop
    pub effects: bool,
    /// Mirror hand-tracking x (selfie camera)
    pub mirror_camera: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            effects: true,
            mirror_camera: true,
            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key used by the web host
    pub const STORAGE_KEY: &'static str = "balloon_pop_settings";

    /// Parse settings, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Effective volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    /// Push gameplay-relevant preferences into a session
    pub fn apply(&self, state: &mut GameState) {
        state.set_effects_enabled(self.effects);
    }

    pub fn apply_audio<S: AudioSink>(&self, audio: &mut AudioManager<S>) {
        audio.set_master_volume(self.master_volume);
        audio.set_muted(self.muted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::LogSink;
    use crate::input::Pointer;
    use crate::sim::{Balloon, BalloonColor, Playfield, resolve_hits};
    use glam::Vec2;

    #[test]
    fn test_json_round_trip_keeps_fields() {
        let settings = Settings {
            difficulty: Difficulty::Hard,
            effects: false,
            mirror_camera: false,
            master_volume: 0.25,
            muted: true,
        };
        assert_eq!(Settings::from_json(&settings.to_json()), settings);
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
        assert_eq!(Settings::from_json(r#"{"difficulty":"extreme"}"#), Settings::default());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{"difficulty":"easy","master_volume":4.0}"#);
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert!(settings.effects);
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_volume(), 0.8);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_apply_disables_effects() {
        let mut state = GameState::new(Difficulty::Easy.profile(), Playfield::default(), 1);
        state.start(0.0);
        let id = state.field.insert(Balloon::new(
            Vec2::new(300.0, 300.0),
            50.0,
            40.0,
            0.0,
            BalloonColor::PALETTE[0],
        ));
        let settings = Settings {
            effects: false,
            ..Settings::default()
        };
        settings.apply(&mut state);
        assert!(!state.effects_enabled);

        let pops = resolve_hits(&mut state, 10.0, &[Pointer::at(300.0, 300.0)]);
        assert_eq!(pops[0].id, id);
        assert!(state.effects.is_empty());

        let mut audio = AudioManager::new(LogSink::default());
        Settings {
            muted: true,
            ..Settings::default()
        }
        .apply_audio(&mut audio);
        assert_eq!(audio.effective_volume(), 0.0);
    }
}
