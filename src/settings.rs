//! Simulation tunables
//!
//! Loaded from JSON by the host (or left at defaults). Every field has a
//! default, so partial documents are accepted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::sim::Arena;

/// Game balance and arena settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Bugs ===
    /// Global speed multiplier applied to every kind
    pub speed: f32,
    /// Base bug size before per-kind scaling
    pub bug_size: f32,
    /// Maximum random size variation (applied once, either sign)
    pub size_jitter: f32,

    // === Population ===
    pub starting_lives: u32,
    pub initial_bugs: usize,
    pub overflow_threshold: usize,

    // === Difficulty curve ===
    pub initial_spawn_interval_millis: u32,
    pub min_spawn_interval_millis: u32,
    pub early_level_step_millis: u32,
    pub late_level_step_millis: u32,
    pub late_level_after: u32,

    // === Timing ===
    /// Rate the outer loop calls `tick` at
    pub ticks_per_second: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            speed: LEVEL_SPEED,
            bug_size: BUG_SIZE,
            size_jitter: BUG_SIZE_JITTER,

            starting_lives: STARTING_LIVES,
            initial_bugs: INITIAL_BUGS,
            overflow_threshold: OVERFLOW_THRESHOLD,

            initial_spawn_interval_millis: INITIAL_SPAWN_INTERVAL_MILLIS,
            min_spawn_interval_millis: MIN_SPAWN_INTERVAL_MILLIS,
            early_level_step_millis: EARLY_LEVEL_STEP_MILLIS,
            late_level_step_millis: LATE_LEVEL_STEP_MILLIS,
            late_level_after: LATE_LEVEL_AFTER,

            ticks_per_second: TICKS_PER_SECOND,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: arena {}x{}, lives {}",
            config.arena_width,
            config.arena_height,
            config.starting_lives
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Arena dimensions as passed to motion and boundary code
    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Largest half-extent any bug can have (biggest kind plus full jitter)
    pub fn largest_half_size(&self) -> f32 {
        let biggest = BEETLE_SIZE.max(GRASSHOPPER_SIZE).max(FLY_SIZE);
        (self.bug_size * biggest + self.size_jitter) / 2.0
    }

    /// Largest per-axis speed any bug can reach
    pub fn largest_speed(&self) -> f32 {
        let fastest = BEETLE_SPEED.max(GRASSHOPPER_SPEED).max(FLY_SPEED);
        (self.speed * fastest).max(FLY_MAX_SPEED)
    }

    /// Ticks between scheduled spawns for a given interval, never below 1
    pub fn spawn_interval_ticks(millis: u32) -> u32 {
        (millis / SPAWN_INTERVAL_DIVISOR).max(1)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.arena_width) || !positive(self.arena_height) {
            return Err(SimError::InvalidConfig("arena dimensions must be positive"));
        }
        if !positive(self.speed) {
            return Err(SimError::InvalidConfig("speed must be positive"));
        }
        if !positive(self.bug_size) {
            return Err(SimError::InvalidConfig("bug_size must be positive"));
        }
        if !self.size_jitter.is_finite() || self.size_jitter < 0.0 {
            return Err(SimError::InvalidConfig("size_jitter must be non-negative"));
        }
        // Room for the boundary push on both walls at once
        let min_extent = 2.0 * (self.largest_half_size() + self.largest_speed() + 1.0);
        if self.arena_width <= min_extent || self.arena_height <= min_extent {
            return Err(SimError::InvalidConfig(
                "arena too small for the largest bug at full speed",
            ));
        }
        if self.starting_lives == 0 {
            return Err(SimError::InvalidConfig("starting_lives must be at least 1"));
        }
        if self.initial_bugs == 0 {
            return Err(SimError::InvalidConfig("initial_bugs must be at least 1"));
        }
        if self.initial_bugs > self.overflow_threshold {
            return Err(SimError::InvalidConfig(
                "initial_bugs must not exceed overflow_threshold",
            ));
        }
        if self.min_spawn_interval_millis == 0 {
            return Err(SimError::InvalidConfig(
                "min_spawn_interval_millis must be positive",
            ));
        }
        if self.initial_spawn_interval_millis < self.min_spawn_interval_millis {
            return Err(SimError::InvalidConfig(
                "initial_spawn_interval_millis below the floor",
            ));
        }
        if self.ticks_per_second == 0 {
            return Err(SimError::InvalidConfig("ticks_per_second must be positive"));
        }
        Ok(())
    }
}
