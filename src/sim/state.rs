//! Game state and core simulation types
//!
//! `GameState` is owned by whoever drives `tick`. Input handlers only touch
//! the shared tap queue; renderers only read snapshots.

use std::sync::{Arc, Mutex, PoisonError};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::bug::{Bug, BugKind};
use super::snapshot::Snapshot;
use super::spawn::repopulate;
use crate::error::SimError;
use crate::settings::SimConfig;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance the simulation
    Running,
    /// Lives exhausted; ticks are no-ops
    Over,
}

/// A player tap in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tap {
    pub x: f32,
    pub y: f32,
}

impl Tap {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Shared queue of taps waiting for the next tick.
///
/// Cloning yields another handle to the same queue, so an input thread can
/// push while the simulation owns the state.
#[derive(Debug, Clone, Default)]
pub struct TapQueue {
    inner: Arc<Mutex<Vec<Tap>>>,
}

impl TapQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, tap: Tap) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tap);
    }

    /// Take every queued tap in arrival order, leaving the queue empty
    pub fn drain(&self) -> Vec<Tap> {
        std::mem::take(&mut *self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// Things that happened during a tick, for audio/HUD collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BugSquashed { id: u32, kind: BugKind, points: f32 },
    BugSpawned { id: u32, kind: BugKind },
    /// The field was cleared; `level` is the level just entered
    LevelCleared { level: u32 },
    LifeLost { lives_left: u32 },
    GameOver { score: f64 },
}

/// Complete game state (deterministic for a given seed and tap sequence)
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: SimConfig,
    pub arena: Arena,
    /// Live bugs in insertion order
    pub bugs: Vec<Bug>,
    pub score: f64,
    pub lives: u32,
    /// Current level (1-based)
    pub level: u32,
    /// Simulation tick counter
    pub tick_count: u64,
    pub spawn_interval_millis: u32,
    pub spawn_interval_ticks: u32,
    pub phase: GamePhase,
    pub(crate) rng: Pcg32,
    taps: TapQueue,
    next_id: u32,
}

impl GameState {
    /// Create a new game: validates the config and places the opening bugs
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        Self::with_tap_queue(config, seed, TapQueue::new())
    }

    fn with_tap_queue(config: SimConfig, seed: u64, taps: TapQueue) -> Result<Self, SimError> {
        config.validate()?;

        let spawn_interval_millis = config.initial_spawn_interval_millis;
        let mut state = Self {
            seed,
            arena: config.arena(),
            bugs: Vec::new(),
            score: 0.0,
            lives: config.starting_lives,
            level: 1,
            tick_count: 0,
            spawn_interval_millis,
            spawn_interval_ticks: SimConfig::spawn_interval_ticks(spawn_interval_millis),
            phase: GamePhase::Running,
            rng: Pcg32::seed_from_u64(seed),
            taps,
            next_id: 1,
            config,
        };

        repopulate(&mut state)?;
        log::info!(
            "New game: seed {}, {} bugs, spawn every {} ticks",
            seed,
            state.bugs.len(),
            state.spawn_interval_ticks
        );

        Ok(state)
    }

    /// Throw away the run and start a fresh one with the same config.
    ///
    /// Tap queue handles held by input code stay connected; queued taps are
    /// discarded.
    pub fn restart(&mut self, seed: u64) -> Result<(), SimError> {
        self.taps.clear();
        *self = Self::with_tap_queue(self.config.clone(), seed, self.taps.clone())?;
        Ok(())
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Handle for input code to push taps from any thread
    pub fn tap_queue(&self) -> TapQueue {
        self.taps.clone()
    }

    /// Queue a tap for the next tick
    pub fn submit_tap(&self, x: f32, y: f32) {
        self.taps.push(Tap::new(x, y));
    }

    pub(crate) fn drain_taps(&self) -> Vec<Tap> {
        self.taps.drain()
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
