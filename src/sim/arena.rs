//! Arena bounds and wall handling shared by every motion model
//!
//! The arena is an axis-aligned rectangle with its origin at the top-left
//! corner. A bug's position is its center; it is inside the arena when the
//! center is at least half its size away from every wall.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Arena dimensions, passed explicitly into motion and boundary code
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

/// Which wall (if any) a coordinate has crossed on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallHit {
    None,
    /// Left or top wall
    Near,
    /// Right or bottom wall
    Far,
}

impl WallHit {
    #[inline]
    pub fn is_hit(self) -> bool {
        self != WallHit::None
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Classify a coordinate against the valid range `[half, extent - half]`
    #[inline]
    fn classify(coord: f32, half: f32, extent: f32) -> WallHit {
        if coord < half {
            WallHit::Near
        } else if coord > extent - half {
            WallHit::Far
        } else {
            WallHit::None
        }
    }

    /// Wall crossings for a bug of `size` centered at `pos`, per axis
    pub fn wall_hits(&self, pos: Vec2, size: f32) -> (WallHit, WallHit) {
        let half = size / 2.0;
        (
            Self::classify(pos.x, half, self.width),
            Self::classify(pos.y, half, self.height),
        )
    }

    /// True if the center keeps at least half the size from every wall
    pub fn contains(&self, pos: Vec2, size: f32) -> bool {
        let (x, y) = self.wall_hits(pos, size);
        !x.is_hit() && !y.is_hit()
    }

    /// Flip each velocity component whose axis has left the valid range.
    ///
    /// Returns the wall hits that caused the flips.
    pub fn reflect(&self, pos: Vec2, vel: &mut Vec2, size: f32) -> (WallHit, WallHit) {
        let hits = self.wall_hits(pos, size);
        if hits.0.is_hit() {
            vel.x = -vel.x;
        }
        if hits.1.is_hit() {
            vel.y = -vel.y;
        }
        hits
    }

    /// Post-motion safety net: reposition a bug that is still outside the
    /// valid range after its own reflect logic ran.
    ///
    /// The offending axis is forced to `wall ± (half + |v| + 1)`. Velocity is
    /// not touched.
    pub fn push_out_of_wall(&self, pos: &mut Vec2, vel: Vec2, size: f32) {
        let half = size / 2.0;

        if pos.x < half {
            pos.x = half + vel.x.abs() + 1.0;
        }
        if pos.x > self.width - half {
            pos.x = self.width - half - vel.x.abs() - 1.0;
        }

        if pos.y < half {
            pos.y = half + vel.y.abs() + 1.0;
        }
        if pos.y > self.height - half {
            pos.y = self.height - half - vel.y.abs() - 1.0;
        }
    }
}
