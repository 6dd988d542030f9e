//! Balloon Pop entry point
//!
//! The browser build is driven from JS through `balloon_pop::web::WebGame`.
//! Natively this runs a headless session with an autopilot pointer and logs
//! what happens, which is handy for tuning difficulty tables.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::{fs, path::PathBuf};

    use anyhow::{Context, Result, bail};
    use clap::Parser;
    use glam::Vec2;

    use balloon_pop::audio::{AudioManager, LogSink};
    use balloon_pop::input::AutoPilot;
    use balloon_pop::sim::{FrameClock, GameEvent, GameState, Playfield, TickInput, tick};
    use balloon_pop::{Difficulty, DifficultyProfile, Settings};

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Play a headless Balloon Pop session", long_about = None)]
    struct Args {
        /// Difficulty tier: easy, medium or hard (overrides the settings file)
        #[arg(long)]
        difficulty: Option<String>,
        /// Custom difficulty profile (JSON); takes precedence over the tier
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Settings file (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Session length cap in simulated seconds
        #[arg(long, default_value_t = 180.0)]
        seconds: f64,
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        #[arg(long, default_value_t = 720.0)]
        height: f32,
        /// Autopilot pointer speed (px/s)
        #[arg(long, default_value_t = 900.0)]
        pilot_speed: f32,
    }

    #[derive(Debug, Default)]
    struct Summary {
        spawned: u32,
        escaped: u32,
        levels_cleared: u32,
        best_combo: u32,
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        if !(args.fps > 0.0) || !(args.seconds > 0.0) {
            bail!("--fps and --seconds must be positive");
        }

        let mut settings = match &args.settings {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("read settings {:?}", path))?;
                Settings::from_json(&json)
            }
            None => Settings::default(),
        };
        if let Some(name) = &args.difficulty {
            settings.difficulty = Difficulty::from_str(name)
                .with_context(|| format!("unknown difficulty {name:?}"))?;
        }

        let profile = match &args.profile {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("read profile {:?}", path))?;
                DifficultyProfile::from_json(&json)
                    .with_context(|| format!("load profile {:?}", path))?
            }
            None => settings.difficulty.profile(),
        };

        let playfield = Playfield::new(args.width, args.height);
        let mut state = GameState::new(profile, playfield, args.seed);
        settings.apply(&mut state);
        let mut audio = AudioManager::new(LogSink::default());
        settings.apply_audio(&mut audio);

        log::info!(
            "Headless run: {} seed={} {}x{} for {}s",
            settings.difficulty.as_str(),
            args.seed,
            args.width,
            args.height,
            args.seconds
        );

        let start = Vec2::new(args.width / 2.0, args.height / 2.0);
        let mut pilot = AutoPilot::new(start, args.pilot_speed);
        let mut clock = FrameClock::default();
        let mut summary = Summary::default();
        let frame_ms = 1000.0 / args.fps;
        let end = args.seconds * 1000.0;

        let mut now = 0.0;
        state.start(now);
        clock.delta(now);

        while now < end && !state.is_game_over() {
            now += frame_ms;
            let dt = clock.delta(now);
            let input = TickInput::with_pointers(pilot.steer(state.field.balloons(), dt));
            let out = tick(&mut state, &input, now, dt);

            for event in &out.events {
                match event {
                    GameEvent::Spawned { .. } => summary.spawned += 1,
                    GameEvent::Escaped { id, lives } => {
                        summary.escaped += 1;
                        log::info!("Balloon {id} escaped, {lives} lives left");
                    }
                    GameEvent::Popped(pop) => {
                        summary.best_combo = summary.best_combo.max(pop.combo);
                    }
                    GameEvent::LevelCleared { .. } => summary.levels_cleared += 1,
                    GameEvent::LevelStarted { .. } | GameEvent::GameOver { .. } => {}
                }
            }
            audio.handle_events(now, &out.events);
        }

        println!("difficulty:     {}", settings.difficulty.as_str());
        println!("simulated:      {:.1}s", now / 1000.0);
        println!("status:         {}", state.status);
        println!("score:          {}", state.score);
        println!("level reached:  {}", state.level);
        println!("levels cleared: {}", summary.levels_cleared);
        println!("lives:          {}", state.lives);
        println!("pops:           {}", state.pops);
        println!("best combo:     {}", summary.best_combo);
        println!("spawned:        {}", summary.spawned);
        println!("escaped:        {}", summary.escaped);
        println!("pop cues:       {}", audio.sink().played);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
