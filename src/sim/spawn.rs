//! Population control: spawn table, difficulty curve, level and life changes

use glam::Vec2;
use rand::Rng;

use super::bug::{Bug, BugKind};
use super::state::{GameEvent, GamePhase, GameState};
use crate::error::SimError;
use crate::settings::SimConfig;

/// Pick a kind from the level's spawn table
pub fn pick_kind<R: Rng + ?Sized>(level: u32, rng: &mut R) -> BugKind {
    match level {
        0 | 1 => BugKind::Beetle,
        2 => {
            if rng.random::<f32>() < 0.5 {
                BugKind::Beetle
            } else {
                BugKind::Grasshopper
            }
        }
        _ => {
            let r: f32 = rng.random();
            if r < 0.3 {
                BugKind::Beetle
            } else if r < 0.6 {
                BugKind::Grasshopper
            } else {
                BugKind::Fly
            }
        }
    }
}

/// Generate one bug for the current level at a uniform random position
pub fn spawn_bug(state: &mut GameState) -> Result<Bug, SimError> {
    let pos = Vec2::new(
        state.rng.random::<f32>() * state.arena.width,
        state.rng.random::<f32>() * state.arena.height,
    );
    let kind = pick_kind(state.level, &mut state.rng);
    let id = state.next_entity_id();

    Bug::new(
        id,
        kind,
        pos,
        state.config.speed * kind.speed_factor(),
        state.config.bug_size * kind.size_factor(),
        state.config.size_jitter,
        &mut state.rng,
    )
}

/// Replace the whole field with a fresh batch of opening bugs
pub fn repopulate(state: &mut GameState) -> Result<(), SimError> {
    let count = state.config.initial_bugs;
    let mut bugs = Vec::with_capacity(count);
    for _ in 0..count {
        bugs.push(spawn_bug(state)?);
    }
    state.bugs = bugs;
    Ok(())
}

/// Spawn interval after entering `level`, floored at the configured minimum
pub fn next_spawn_interval_millis(config: &SimConfig, level: u32, current: u32) -> u32 {
    let step = if level > config.late_level_after {
        config.late_level_step_millis
    } else {
        config.early_level_step_millis
    };
    current
        .saturating_sub(step)
        .max(config.min_spawn_interval_millis)
}

/// Run after motion: scheduled spawn, then level clear, then overflow.
pub fn update_population(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
) -> Result<(), SimError> {
    // Scheduled spawn
    if state.tick_count % u64::from(state.spawn_interval_ticks.max(1)) == 0 {
        let bug = spawn_bug(state)?;
        log::debug!("Spawned {} #{} at tick {}", bug.kind().as_str(), bug.id, state.tick_count);
        events.push(GameEvent::BugSpawned {
            id: bug.id,
            kind: bug.kind(),
        });
        state.bugs.push(bug);
    }

    // Field cleared: next level, faster spawns, fresh bugs
    if state.bugs.is_empty() {
        state.level += 1;
        state.spawn_interval_millis =
            next_spawn_interval_millis(&state.config, state.level, state.spawn_interval_millis);
        state.spawn_interval_ticks = SimConfig::spawn_interval_ticks(state.spawn_interval_millis);
        log::info!(
            "Level {}: spawn every {} ticks ({} ms)",
            state.level,
            state.spawn_interval_ticks,
            state.spawn_interval_millis
        );
        events.push(GameEvent::LevelCleared { level: state.level });
        repopulate(state)?;
    }

    // Overrun: lose a life, reset the field
    if state.bugs.len() > state.config.overflow_threshold {
        state.lives = state.lives.saturating_sub(1);
        log::info!("Overrun with {} bugs, {} lives left", state.bugs.len(), state.lives);
        events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        if state.lives == 0 {
            state.phase = GamePhase::Over;
            log::info!("Game over at level {} with score {:.0}", state.level, state.score);
            events.push(GameEvent::GameOver { score: state.score });
            return Ok(());
        }
        repopulate(state)?;
    }

    Ok(())
}
