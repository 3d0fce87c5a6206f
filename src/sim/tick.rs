//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. The outer loop
//! calls `tick` at `ticks_per_second`; there is no `dt`.

use super::hit::resolve_taps;
use super::spawn::update_population;
use super::state::{GameEvent, GamePhase, GameState};
use crate::error::SimError;

/// Advance the game state by one tick.
///
/// Order: drain taps and resolve hits, move every bug, then population
/// control (spawn, level clear, overrun). Once the game is over this does
/// nothing, including leaving queued taps in place.
pub fn tick(state: &mut GameState) -> Result<Vec<GameEvent>, SimError> {
    if state.phase == GamePhase::Over {
        return Ok(Vec::new());
    }

    let mut events = Vec::new();
    state.tick_count += 1;

    let taps = state.drain_taps();
    resolve_taps(state, &taps, &mut events);

    // Each bug reads only its own state, so sequential update is equivalent
    // to a simultaneous one
    let arena = state.arena;
    for bug in &mut state.bugs {
        bug.step(&arena, &mut state.rng);
    }

    update_population(state, &mut events)?;

    Ok(events)
}

/// Run up to `count` ticks, stopping early on game over
pub fn run_ticks(state: &mut GameState, count: u64) -> Result<Vec<GameEvent>, SimError> {
    let mut events = Vec::new();
    for _ in 0..count {
        if state.is_over() {
            break;
        }
        events.extend(tick(state)?);
    }
    Ok(events)
}
