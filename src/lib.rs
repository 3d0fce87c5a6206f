//! Bug Squash - a tap-the-bugs arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion models, spawning, hit resolution)
//! - `settings`: Data-driven game balance
//! - `autopilot`: Scripted player used by the headless driver
//!
//! Rendering and input capture live outside this crate. Input handlers push
//! arena-space taps through a [`sim::TapQueue`]; renderers read a
//! [`sim::Snapshot`] after every tick.

pub mod autopilot;
pub mod error;
pub mod settings;
pub mod sim;

pub use autopilot::Autopilot;
pub use error::SimError;
pub use settings::SimConfig;

/// Game configuration constants
pub mod consts {
    /// Logical ticks per second driven by the outer loop
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Base bug size before per-kind scaling and jitter
    pub const BUG_SIZE: f32 = 60.0;
    /// Maximum random size variation applied once at creation (either sign)
    pub const BUG_SIZE_JITTER: f32 = 15.0;
    /// Global speed multiplier
    pub const LEVEL_SPEED: f32 = 1.0;

    /// Bugs placed on the field at game start, level clear and life loss
    pub const INITIAL_BUGS: usize = 10;
    /// More live bugs than this costs a life
    pub const OVERFLOW_THRESHOLD: usize = 30;
    pub const STARTING_LIVES: u32 = 1;

    /// Spawn cadence (divided by 60 to get ticks between spawns)
    pub const INITIAL_SPAWN_INTERVAL_MILLIS: u32 = 10_000;
    pub const MIN_SPAWN_INTERVAL_MILLIS: u32 = 60;
    /// Spawn interval millis per tick of spawn cadence
    pub const SPAWN_INTERVAL_DIVISOR: u32 = 60;
    pub const EARLY_LEVEL_STEP_MILLIS: u32 = 1_000;
    pub const LATE_LEVEL_STEP_MILLIS: u32 = 100;
    /// Levels above this use the late (smaller) difficulty step
    pub const LATE_LEVEL_AFTER: u32 = 10;

    /// Per-kind speed multipliers applied to the level speed
    pub const BEETLE_SPEED: f32 = 4.0;
    pub const GRASSHOPPER_SPEED: f32 = 40.0;
    pub const FLY_SPEED: f32 = 4.0;

    /// Per-kind size multipliers applied to the base size
    pub const BEETLE_SIZE: f32 = 1.0;
    pub const GRASSHOPPER_SIZE: f32 = 1.2;
    pub const FLY_SIZE: f32 = 0.9;

    /// Fly per-axis speed cap
    pub const FLY_MAX_SPEED: f32 = 3.0;
    /// Fly acceleration bias magnitude bound
    pub const FLY_MAX_BIAS: f32 = 0.2;
    /// Fly acceleration bias at creation
    pub const FLY_INITIAL_BIAS: f32 = 0.1;
}
