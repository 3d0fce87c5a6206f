//! Scripted player for demos and soak runs
//!
//! Reads the same snapshot a renderer gets and answers with taps, so it only
//! uses the public input boundary.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Snapshot, Tap};

/// Tap-the-nearest-bug autopilot
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Ticks between taps
    pub reaction_ticks: u32,
    /// Maximum aim error per axis, in arena units
    pub aim_error: f32,
    cooldown: u32,
    last_aim: Option<Vec2>,
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64, reaction_ticks: u32, aim_error: f32) -> Self {
        Self {
            reaction_ticks,
            aim_error: if aim_error.is_finite() {
                aim_error.max(0.0)
            } else {
                0.0
            },
            cooldown: reaction_ticks,
            last_aim: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Decide this tick's tap, if any
    pub fn plan(&mut self, snapshot: &Snapshot) -> Option<Tap> {
        if snapshot.is_over || snapshot.bugs.is_empty() {
            return None;
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }
        self.cooldown = self.reaction_ticks;

        // Sweep across the field rather than jumping around
        let target = match self.last_aim {
            Some(aim) => snapshot.bugs.iter().min_by(|a, b| {
                let da = Vec2::new(a.x, a.y).distance_squared(aim);
                let db = Vec2::new(b.x, b.y).distance_squared(aim);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })?,
            None => snapshot.bugs.first()?,
        };

        let mut aim = Vec2::new(target.x, target.y);
        if self.aim_error.is_finite() && self.aim_error > 0.0 {
            aim.x += self.rng.random_range(-self.aim_error..=self.aim_error);
            aim.y += self.rng.random_range(-self.aim_error..=self.aim_error);
        }
        self.last_aim = Some(aim);
        Some(Tap::new(aim.x, aim.y))
    }
}
