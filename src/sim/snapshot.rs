//! Read-only snapshot handed to the renderer after each tick

use serde::{Deserialize, Serialize};

use super::bug::BugKind;
use super::state::GameState;

/// Beetle walk cycle: 4 frames, 6 ticks each
const BEETLE_FRAMES: u32 = 4;
const BEETLE_TICKS_PER_FRAME: u32 = 6;
/// Fly wing cycle: 5 frames, one per tick
const FLY_FRAMES: u32 = 5;

/// Everything a renderer needs to draw one bug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugView {
    pub id: u32,
    pub kind: BugKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub vx: f32,
    pub vy: f32,
    /// Grasshopper mid-jump
    pub airborne: bool,
    /// Opaque per-tick counter for frame selection
    pub anim_counter: u32,
}

impl BugView {
    /// Sprite rotation in radians (0 = facing up, clockwise positive)
    pub fn heading(&self) -> f32 {
        self.vx.atan2(-self.vy)
    }

    /// Frame index into the kind's sprite sheet
    pub fn sprite_frame(&self) -> u32 {
        match self.kind {
            BugKind::Beetle => {
                (self.anim_counter % (BEETLE_FRAMES * BEETLE_TICKS_PER_FRAME))
                    / BEETLE_TICKS_PER_FRAME
            }
            BugKind::Grasshopper => u32::from(self.airborne),
            BugKind::Fly => self.anim_counter % FLY_FRAMES,
        }
    }
}

/// HUD values plus every live bug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: f64,
    pub lives: u32,
    pub level: u32,
    pub is_over: bool,
    pub tick: u64,
    pub bugs: Vec<BugView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            score: state.score,
            lives: state.lives,
            level: state.level,
            is_over: state.is_over(),
            tick: state.tick_count,
            bugs: state
                .bugs
                .iter()
                .map(|bug| BugView {
                    id: bug.id,
                    kind: bug.kind(),
                    x: bug.pos.x,
                    y: bug.pos.y,
                    size: bug.size,
                    vx: bug.vel.x,
                    vy: bug.vel.y,
                    airborne: bug.airborne(),
                    anim_counter: bug.anim_counter(),
                })
                .collect(),
        }
    }

    /// Score as shown on the HUD
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }
}
