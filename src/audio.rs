//! Pop cue emission
//!
//! The engine only reports pops. Turning them into sound is the job of an
//! [`AudioSink`]; this module decides which pops are audible and how loud.

use serde::Serialize;

use crate::consts::CUE_MIN_GAP_MS;
use crate::sim::{BalloonColor, GameEvent, PopEvent};

/// A single audible pop
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopCue {
    /// Size hint from the popped balloon (>= 0.8, ~1.0 for a mid-size balloon)
    pub intensity: f32,
    /// Output gain after master volume and mute
    pub volume: f32,
    pub color: BalloonColor,
}

impl PopCue {
    pub fn from_pop(pop: &PopEvent, volume: f32) -> Self {
        Self {
            intensity: pop.intensity(),
            volume,
            color: pop.color,
        }
    }
}

/// Backend that actually produces sound
pub trait AudioSink {
    fn play_pop(&mut self, cue: &PopCue);

    /// Resume output after a user gesture (browsers start audio suspended)
    fn resume(&mut self) {}
}

/// Sink that queues cues for a host to drain (the browser plays them in JS)
#[derive(Debug, Default)]
pub struct CueQueue(pub Vec<PopCue>);

impl AudioSink for CueQueue {
    fn play_pop(&mut self, cue: &PopCue) {
        self.0.push(*cue);
    }
}

/// Sink that only logs cues, for headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: usize,
}

impl AudioSink for LogSink {
    fn play_pop(&mut self, cue: &PopCue) {
        self.played += 1;
        log::debug!(
            "pop cue: intensity={:.2} volume={:.2} color={}",
            cue.intensity,
            cue.volume,
            cue.color.to_hex()
        );
    }
}

/// Drops cues that land too close to the previous audible one
#[derive(Debug, Clone)]
pub struct CueGate {
    min_gap_ms: f64,
    last: Option<f64>,
}

impl Default for CueGate {
    fn default() -> Self {
        Self::new(CUE_MIN_GAP_MS)
    }
}

impl CueGate {
    pub fn new(min_gap_ms: f64) -> Self {
        Self {
            min_gap_ms,
            last: None,
        }
    }

    /// True if a cue at `now` may play; records it as the latest cue
    pub fn admit(&mut self, now: f64) -> bool {
        if self.last.is_some_and(|last| now - last < self.min_gap_ms) {
            return false;
        }
        self.last = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    gate: CueGate,
    master_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            gate: CueGate::default(),
            master_volume: 0.8,
            muted: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn resume(&mut self) {
        self.sink.resume();
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play cues for the pops in `events`; returns how many were audible
    pub fn handle_events(&mut self, now: f64, events: &[GameEvent]) -> usize {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return 0;
        }

        let mut played = 0;
        for event in events {
            let GameEvent::Popped(pop) = event else {
                continue;
            };
            if !self.gate.admit(now) {
                continue;
            }
            self.sink.play_pop(&PopCue::from_pop(pop, vol));
            played += 1;
        }
        played
    }
}
