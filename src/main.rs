//! Bug Squash headless driver
//!
//! Runs the simulation at a fixed step with the autopilot tapping, logging
//! progress. Usage: `bug-squash [config.json]`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use bug_squash::sim::{GameEvent, GameState, tick};
    use bug_squash::{Autopilot, SimConfig, SimError};

    /// Stop after ten minutes of game time even if the autopilot survives
    const MAX_GAME_SECONDS: u64 = 10 * 60;

    fn load_config() -> Result<SimConfig, SimError> {
        match std::env::args().nth(1) {
            Some(path) => {
                log::info!("Loading config from {}", path);
                SimConfig::from_json(&std::fs::read_to_string(&path)?)
            }
            None => {
                log::info!("No config given, using defaults");
                Ok(SimConfig::default())
            }
        }
    }

    pub fn run() -> Result<(), SimError> {
        let config = load_config()?;
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let max_ticks = MAX_GAME_SECONDS * u64::from(config.ticks_per_second);
        let mut state = GameState::new(config, seed)?;
        log::info!("Game initialized with seed: {}", seed);

        // Input side: the autopilot only sees snapshots and pushes taps
        let taps = state.tap_queue();
        let mut pilot = Autopilot::new(seed ^ 0x5eed, 12, 8.0);

        let started = Instant::now();
        let mut squashed = 0u32;
        while !state.is_over() && state.tick_count < max_ticks {
            if let Some(tap) = pilot.plan(&state.snapshot()) {
                taps.push(tap);
            }

            for event in tick(&mut state)? {
                match event {
                    GameEvent::BugSquashed { .. } => squashed += 1,
                    GameEvent::LevelCleared { level } => {
                        log::info!("Reached level {} at tick {}", level, state.tick_count);
                    }
                    GameEvent::LifeLost { lives_left } => {
                        log::warn!("Life lost, {} left", lives_left);
                    }
                    GameEvent::BugSpawned { .. } | GameEvent::GameOver { .. } => {}
                }
            }

            if state.tick_count % (u64::from(state.config.ticks_per_second) * 30) == 0 {
                let snap = state.snapshot();
                log::info!(
                    "t={}s level={} bugs={} score={}",
                    snap.tick / u64::from(state.config.ticks_per_second),
                    snap.level,
                    snap.bugs.len(),
                    snap.display_score()
                );
            }
        }

        let elapsed = started.elapsed().max(Duration::from_micros(1));
        let snap = state.snapshot();
        log::info!(
            "Simulated {} ticks in {:.1?} ({:.0} ticks/s)",
            snap.tick,
            elapsed,
            snap.tick as f64 / elapsed.as_secs_f64()
        );
        println!(
            "{} at level {}: score {}, {} bugs squashed, {} ticks",
            if snap.is_over { "Game over" } else { "Time up" },
            snap.level,
            snap.display_score(),
            squashed,
            snap.tick
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bug Squash (headless) starting...");
    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

// env_logger and the blocking loop are native-only; on wasm32 the host page
// drives `tick` through the library and this binary has nothing to do.
#[cfg(target_arch = "wasm32")]
fn main() {}
