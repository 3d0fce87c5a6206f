//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of bugs, arrival order of taps)
//! - No rendering or platform dependencies

pub mod arena;
pub mod bug;
pub mod hit;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arena::{Arena, WallHit};
pub use bug::{Bug, BugBody, BugKind, Flight, Hopper};
pub use hit::{mark_hits, resolve_taps, tap_hits_bug};
pub use snapshot::{BugView, Snapshot};
pub use spawn::{next_spawn_interval_millis, pick_kind, repopulate, spawn_bug, update_population};
pub use state::{GameEvent, GamePhase, GameState, Tap, TapQueue};
pub use tick::{run_ticks, tick};
