//! Tap hit resolution
//!
//! Hitboxes are axis-aligned squares of side `size` centered on the bug, even
//! for bugs drawn round. The test is strict: a tap exactly on the box edge
//! misses.

use super::bug::Bug;
use super::state::{GameEvent, GameState, Tap};

/// Whether a tap lands inside a bug's square hitbox
#[inline]
pub fn tap_hits_bug(tap: &Tap, bug: &Bug) -> bool {
    let half = bug.size / 2.0;
    let d = (tap.pos() - bug.pos).abs();
    d.x < half && d.y < half
}

/// Mark every bug hit by any tap, in tap then storage order.
///
/// A single tap kills every bug whose box contains it (overlapping bugs all
/// die). A bug hit by several taps is marked once.
pub fn mark_hits(taps: &[Tap], bugs: &[Bug]) -> Vec<bool> {
    let mut dead = vec![false; bugs.len()];
    for tap in taps {
        for (i, bug) in bugs.iter().enumerate() {
            if !dead[i] && tap_hits_bug(tap, bug) {
                dead[i] = true;
            }
        }
    }
    dead
}

/// Consume this tick's taps: score and remove every bug hit.
///
/// Returns the number of bugs removed.
pub fn resolve_taps(state: &mut GameState, taps: &[Tap], events: &mut Vec<GameEvent>) -> usize {
    if taps.is_empty() || state.bugs.is_empty() {
        return 0;
    }

    let dead = mark_hits(taps, &state.bugs);
    let mut removed = 0;
    for (bug, _) in state.bugs.iter().zip(&dead).filter(|(_, d)| **d) {
        state.score += f64::from(bug.points);
        removed += 1;
        log::debug!("Squashed {} #{} for {:.3}", bug.kind().as_str(), bug.id, bug.points);
        events.push(GameEvent::BugSquashed {
            id: bug.id,
            kind: bug.kind(),
            points: bug.points,
        });
    }

    let mut flags = dead.iter();
    state.bugs.retain(|_| !flags.next().copied().unwrap_or(false));
    removed
}
