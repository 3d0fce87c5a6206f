//! Bug entities and their motion models
//!
//! A bug is a common header (position, velocity, speed, size, points) plus a
//! kind-specific body. The kind is derived from the body, so it can never
//! change after creation.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, WallHit};
use crate::consts::*;
use crate::error::SimError;

/// Bug kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BugKind {
    /// Straight-line walker, bounces off walls
    Beetle,
    /// Sits still, then jumps in a random direction
    Grasshopper,
    /// Drifting random walk with a speed cap
    Fly,
}

impl BugKind {
    /// Score multiplier applied on top of the speed/size ratio
    pub fn score_multiplier(self) -> f32 {
        match self {
            BugKind::Beetle => 1.0,
            BugKind::Grasshopper => 2.0,
            BugKind::Fly => 3.0,
        }
    }

    /// Speed relative to the global level speed
    pub fn speed_factor(self) -> f32 {
        match self {
            BugKind::Beetle => BEETLE_SPEED,
            BugKind::Grasshopper => GRASSHOPPER_SPEED,
            BugKind::Fly => FLY_SPEED,
        }
    }

    /// Size relative to the base bug size
    pub fn size_factor(self) -> f32 {
        match self {
            BugKind::Beetle => BEETLE_SIZE,
            BugKind::Grasshopper => GRASSHOPPER_SIZE,
            BugKind::Fly => FLY_SIZE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BugKind::Beetle => "beetle",
            BugKind::Grasshopper => "grasshopper",
            BugKind::Fly => "fly",
        }
    }
}

/// Grasshopper jump cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hopper {
    pub airborne: bool,
    /// Ticks left on the ground before the next jump
    pub jump_countdown: i32,
    /// Ticks left in the air before landing
    pub land_countdown: i32,
}

/// Fly drift state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    /// Per-axis acceleration added to velocity every tick
    pub bias: Vec2,
    /// Ticks until the x bias is re-rolled
    pub reroll_x: i32,
    /// Ticks until the y bias is re-rolled
    pub reroll_y: i32,
    pub anim_counter: u32,
}

/// Kind-specific payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BugBody {
    Beetle { anim_counter: u32 },
    Grasshopper(Hopper),
    Fly(Flight),
}

/// A bug entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bug {
    pub id: u32,
    /// Center position in arena coordinates
    pub pos: Vec2,
    pub vel: Vec2,
    /// Base speed the velocity is derived from
    pub speed: f32,
    /// Side of the square hitbox (jitter already applied)
    pub size: f32,
    /// Score awarded when squashed
    pub points: f32,
    pub body: BugBody,
}

/// Ticks a grasshopper waits on the ground: [30, 89]
fn roll_jump_countdown<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(30..90)
}

/// Ticks a grasshopper stays airborne: [5, 14]
fn roll_land_countdown<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(5..15)
}

/// Ticks between fly bias re-rolls: [20, 39]
fn roll_reroll_countdown<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(20..40)
}

/// Ticks until a new fly's first bias re-roll: [30, 89]
fn roll_initial_reroll_countdown<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(30..90)
}

/// Uniform in [-FLY_MAX_BIAS, FLY_MAX_BIAS)
fn roll_bias<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>() * 2.0 * FLY_MAX_BIAS - FLY_MAX_BIAS
}

/// Split `speed` between the axes by a direction fraction in [0, 1)
fn split_speed<R: Rng + ?Sized>(speed: f32, rng: &mut R) -> Vec2 {
    let direction: f32 = rng.random();
    Vec2::new(speed * direction, speed * (1.0 - direction))
}

impl Bug {
    /// Build a bug, applying size jitter once.
    ///
    /// `base_size` is the unjittered size; the score value is derived from it.
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        kind: BugKind,
        pos: Vec2,
        speed: f32,
        base_size: f32,
        jitter: f32,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(speed) || !valid(base_size) {
            return Err(SimError::InvalidEntityParameters {
                speed,
                size: base_size,
            });
        }

        let variation = rng.random::<f32>() * jitter.max(0.0);
        let variation = if rng.random_bool(0.5) { -variation } else { variation };
        let mut size = base_size + variation;
        if size <= 0.0 || !size.is_finite() {
            log::warn!(
                "Discarding size jitter {} for {} (base {})",
                variation,
                kind.as_str(),
                base_size
            );
            size = base_size;
        }

        let points = (speed * 10.0 / base_size) * kind.score_multiplier();

        let (vel, body) = match kind {
            BugKind::Beetle => {
                // Keep both axes moving
                let direction = rng.random::<f32>().clamp(0.1, 0.9);
                let vel = Vec2::new(speed * direction, speed * (1.0 - direction));
                let anim_counter = rng.random_range(1..=60);
                (vel, BugBody::Beetle { anim_counter })
            }
            BugKind::Grasshopper => {
                let hopper = Hopper {
                    airborne: false,
                    jump_countdown: roll_jump_countdown(rng),
                    land_countdown: 0,
                };
                (split_speed(speed, rng), BugBody::Grasshopper(hopper))
            }
            BugKind::Fly => {
                let vel = split_speed(speed, rng);
                let flight = Flight {
                    bias: Vec2::splat(FLY_INITIAL_BIAS),
                    reroll_x: roll_initial_reroll_countdown(rng),
                    reroll_y: roll_initial_reroll_countdown(rng),
                    anim_counter: rng.random_range(1..=6),
                };
                (vel, BugBody::Fly(flight))
            }
        };

        Ok(Self {
            id,
            pos,
            vel,
            speed,
            size,
            points,
            body,
        })
    }

    pub fn kind(&self) -> BugKind {
        match self.body {
            BugBody::Beetle { .. } => BugKind::Beetle,
            BugBody::Grasshopper(_) => BugKind::Grasshopper,
            BugBody::Fly(_) => BugKind::Fly,
        }
    }

    /// Grasshopper mid-jump (always false for other kinds)
    pub fn airborne(&self) -> bool {
        matches!(&self.body, BugBody::Grasshopper(h) if h.airborne)
    }

    /// Opaque animation counter for the renderer (0 for kinds without one)
    pub fn anim_counter(&self) -> u32 {
        match &self.body {
            BugBody::Beetle { anim_counter } => *anim_counter,
            BugBody::Grasshopper(_) => 0,
            BugBody::Fly(flight) => flight.anim_counter,
        }
    }

    /// Advance one tick: run the kind's motion model, then the boundary push.
    ///
    /// Reads nothing but this bug and the arena.
    pub fn step<R: Rng + ?Sized>(&mut self, arena: &Arena, rng: &mut R) {
        match &mut self.body {
            BugBody::Beetle { anim_counter } => {
                self.pos += self.vel;
                arena.reflect(self.pos, &mut self.vel, self.size);
                *anim_counter = anim_counter.wrapping_add(1);
            }
            BugBody::Grasshopper(hopper) => {
                if hopper.airborne {
                    self.pos += self.vel;
                    arena.reflect(self.pos, &mut self.vel, self.size);

                    hopper.land_countdown -= 1;
                    if hopper.land_countdown <= 0 {
                        hopper.airborne = false;
                        hopper.jump_countdown = roll_jump_countdown(rng);
                        let mut vel = split_speed(self.speed, rng);
                        if rng.random_bool(0.5) {
                            vel.x = -vel.x;
                        }
                        if rng.random_bool(0.5) {
                            vel.y = -vel.y;
                        }
                        self.vel = vel;
                    }
                } else {
                    hopper.jump_countdown -= 1;
                    if hopper.jump_countdown <= 0 {
                        hopper.airborne = true;
                        hopper.land_countdown = roll_land_countdown(rng);
                    }
                }
            }
            BugBody::Fly(flight) => {
                self.vel += flight.bias;
                self.vel = self
                    .vel
                    .clamp(Vec2::splat(-FLY_MAX_SPEED), Vec2::splat(FLY_MAX_SPEED));
                self.pos += self.vel;

                flight.reroll_x -= 1;
                if flight.reroll_x <= 0 {
                    flight.bias.x = roll_bias(rng);
                    flight.reroll_x = roll_reroll_countdown(rng);
                }
                flight.reroll_y -= 1;
                if flight.reroll_y <= 0 {
                    flight.bias.y = roll_bias(rng);
                    flight.reroll_y = roll_reroll_countdown(rng);
                }

                let (hit_x, hit_y) = arena.reflect(self.pos, &mut self.vel, self.size);
                // Stop a bias that keeps driving into the wall just hit
                if (hit_x == WallHit::Far && flight.bias.x > 0.0)
                    || (hit_x == WallHit::Near && flight.bias.x < 0.0)
                {
                    flight.bias.x = -flight.bias.x;
                }
                if (hit_y == WallHit::Far && flight.bias.y > 0.0)
                    || (hit_y == WallHit::Near && flight.bias.y < 0.0)
                {
                    flight.bias.y = -flight.bias.y;
                }

                flight.anim_counter = flight.anim_counter.wrapping_add(1);
            }
        }

        arena.push_out_of_wall(&mut self.pos, self.vel, self.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> Arena {
        Arena::new(800.0, 600.0)
    }

    fn bug(kind: BugKind, pos: Vec2, seed: u64) -> Bug {
        let mut rng = Pcg32::seed_from_u64(seed);
        Bug::new(1, kind, pos, 4.0, 60.0, 15.0, &mut rng).unwrap()
    }

    #[test]
    fn test_beetle_score_value() {
        let beetle = bug(BugKind::Beetle, Vec2::new(400.0, 300.0), 1);
        assert!((beetle.points - 4.0 * 10.0 / 60.0).abs() < 1e-6);
        assert!((beetle.points - 0.667).abs() < 0.001);
        assert_eq!(beetle.kind(), BugKind::Beetle);
    }

    #[test]
    fn test_score_multipliers() {
        let mut rng = Pcg32::seed_from_u64(2);
        let hopper =
            Bug::new(1, BugKind::Grasshopper, Vec2::ZERO, 40.0, 72.0, 15.0, &mut rng).unwrap();
        assert!((hopper.points - (40.0 * 10.0 / 72.0) * 2.0).abs() < 1e-4);
        let fly = Bug::new(2, BugKind::Fly, Vec2::ZERO, 4.0, 54.0, 15.0, &mut rng).unwrap();
        assert!((fly.points - (4.0 * 10.0 / 54.0) * 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_size_jitter_bounds() {
        let mut rng = Pcg32::seed_from_u64(3);
        for id in 0..200 {
            let b = Bug::new(id, BugKind::Beetle, Vec2::ZERO, 4.0, 60.0, 15.0, &mut rng).unwrap();
            assert!(b.size >= 45.0 && b.size <= 75.0, "size {}", b.size);
        }
    }

    #[test]
    fn test_degenerate_jitter_falls_back_to_base_size() {
        let mut rng = Pcg32::seed_from_u64(4);
        for id in 0..100 {
            let b = Bug::new(id, BugKind::Fly, Vec2::ZERO, 4.0, 1.0, 50.0, &mut rng).unwrap();
            assert!(b.size > 0.0);
        }
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let mut rng = Pcg32::seed_from_u64(5);
        let err = Bug::new(1, BugKind::Beetle, Vec2::ZERO, 0.0, 60.0, 15.0, &mut rng).unwrap_err();
        assert!(matches!(err, SimError::InvalidEntityParameters { .. }));
        assert!(Bug::new(1, BugKind::Beetle, Vec2::ZERO, 4.0, -1.0, 15.0, &mut rng).is_err());
        assert!(Bug::new(1, BugKind::Fly, Vec2::ZERO, f32::NAN, 60.0, 15.0, &mut rng).is_err());
    }

    #[test]
    fn test_beetle_direction_never_axis_aligned() {
        let mut rng = Pcg32::seed_from_u64(6);
        for id in 0..500 {
            let b = Bug::new(id, BugKind::Beetle, Vec2::ZERO, 4.0, 60.0, 15.0, &mut rng).unwrap();
            assert!(b.vel.x >= 4.0 * 0.1 - 1e-5 && b.vel.y >= 4.0 * 0.1 - 1e-5);
            assert!((b.vel.x + b.vel.y - 4.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_beetle_moves_straight_and_reflects() {
        let a = arena();
        let mut b = bug(BugKind::Beetle, Vec2::new(400.0, 300.0), 7);
        let vel = b.vel;
        b.step(&a, &mut Pcg32::seed_from_u64(0));
        assert_eq!(b.pos, Vec2::new(400.0, 300.0) + vel);
        assert_eq!(b.vel, vel);

        // Put it against the right wall moving right
        b.pos = Vec2::new(a.width - b.size / 2.0 - 0.5, 300.0);
        b.vel = Vec2::new(3.0, 1.0);
        b.step(&a, &mut Pcg32::seed_from_u64(0));
        assert_eq!(b.vel, Vec2::new(-3.0, 1.0));
        assert!(a.contains(b.pos, b.size));
    }

    #[test]
    fn test_beetle_anim_counter_advances() {
        let a = arena();
        let mut b = bug(BugKind::Beetle, Vec2::new(400.0, 300.0), 8);
        let before = b.anim_counter();
        assert!((1..=60).contains(&before));
        b.step(&a, &mut Pcg32::seed_from_u64(0));
        assert_eq!(b.anim_counter(), before + 1);
    }

    #[test]
    fn test_grasshopper_jump_cycle() {
        let a = arena();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut g = bug(BugKind::Grasshopper, Vec2::new(400.0, 300.0), 9);
        let BugBody::Grasshopper(h) = &g.body else {
            panic!("expected grasshopper");
        };
        let wait = h.jump_countdown;
        assert!((30..=89).contains(&wait));
        let start = g.pos;

        // Grounded: no movement until the countdown expires
        for _ in 0..wait - 1 {
            g.step(&a, &mut rng);
            assert!(!g.airborne());
            assert_eq!(g.pos, start);
        }
        g.step(&a, &mut rng);
        assert!(g.airborne());
        let BugBody::Grasshopper(h) = &g.body else {
            panic!("expected grasshopper");
        };
        let air = h.land_countdown;
        assert!((5..=14).contains(&air));

        // Airborne: moves every tick, then lands with a fresh countdown
        for _ in 0..air {
            g.step(&a, &mut rng);
            assert!(a.contains(g.pos, g.size));
        }
        assert!(!g.airborne());
        assert_ne!(g.pos, start);
        let BugBody::Grasshopper(h) = &g.body else {
            panic!("expected grasshopper");
        };
        assert!((30..=89).contains(&h.jump_countdown));
        assert!((g.vel.x.abs() + g.vel.y.abs() - g.speed).abs() < 1e-3);
    }

    #[test]
    fn test_fly_speed_is_capped() {
        let a = arena();
        let mut rng = Pcg32::seed_from_u64(10);
        let mut f = bug(BugKind::Fly, Vec2::new(400.0, 300.0), 10);
        for _ in 0..2_000 {
            f.step(&a, &mut rng);
            assert!(f.vel.x.abs() <= FLY_MAX_SPEED + 1e-6);
            assert!(f.vel.y.abs() <= FLY_MAX_SPEED + 1e-6);
            let BugBody::Fly(flight) = &f.body else {
                panic!("expected fly");
            };
            assert!(flight.bias.x.abs() <= FLY_MAX_BIAS);
            assert!(flight.bias.y.abs() <= FLY_MAX_BIAS);
            assert!(a.contains(f.pos, f.size));
        }
    }

    #[test]
    fn test_new_fly_timing() {
        let mut rng = Pcg32::seed_from_u64(12);
        for id in 0..300 {
            let f = Bug::new(id, BugKind::Fly, Vec2::ZERO, 4.0, 54.0, 15.0, &mut rng).unwrap();
            let BugBody::Fly(flight) = &f.body else {
                panic!("expected fly");
            };
            assert_eq!(flight.bias, Vec2::splat(FLY_INITIAL_BIAS));
            assert!((30..=89).contains(&flight.reroll_x), "reroll_x {}", flight.reroll_x);
            assert!((30..=89).contains(&flight.reroll_y), "reroll_y {}", flight.reroll_y);
            assert!((1..=6).contains(&flight.anim_counter));
        }
    }

    #[test]
    fn test_fly_rerolls_bias_on_schedule() {
        let a = arena();
        let mut rng = Pcg32::seed_from_u64(13);
        let mut f = bug(BugKind::Fly, Vec2::new(400.0, 300.0), 13);
        let mut saw_short = false;
        for _ in 0..200 {
            f.pos = Vec2::new(400.0, 300.0);
            if let BugBody::Fly(flight) = &mut f.body {
                flight.reroll_x = 1;
                flight.reroll_y = 2;
            }
            f.step(&a, &mut rng);
            let BugBody::Fly(flight) = &f.body else {
                panic!("expected fly");
            };
            // x re-rolled this tick, y only counted down
            assert!((20..=39).contains(&flight.reroll_x), "reroll_x {}", flight.reroll_x);
            assert_eq!(flight.reroll_y, 1);
            assert!(flight.bias.x.abs() <= FLY_MAX_BIAS);
            saw_short |= flight.reroll_x < 30;
        }
        assert!(saw_short);
    }

    #[test]
    fn test_grasshopper_landing_flips_each_axis_independently() {
        let a = arena();
        let mut rng = Pcg32::seed_from_u64(14);
        let mut g = bug(BugKind::Grasshopper, Vec2::new(400.0, 300.0), 14);
        // [x-, y-] and [both negative, x only, y only, neither]
        let mut negative = [0u32; 2];
        let mut combos = [0u32; 4];
        let landings = 800;
        for _ in 0..landings {
            g.pos = Vec2::new(400.0, 300.0);
            if let BugBody::Grasshopper(h) = &mut g.body {
                h.airborne = true;
                h.land_countdown = 1;
            }
            g.step(&a, &mut rng);
            assert!(!g.airborne());
            let (nx, ny) = (g.vel.x.is_sign_negative(), g.vel.y.is_sign_negative());
            negative[0] += u32::from(nx);
            negative[1] += u32::from(ny);
            combos[match (nx, ny) {
                (true, true) => 0,
                (true, false) => 1,
                (false, true) => 2,
                (false, false) => 3,
            }] += 1;
        }
        // Each axis flips about half the time, every sign pair occurs
        for n in negative {
            assert!(n > landings * 2 / 5 && n < landings * 3 / 5, "{:?}", negative);
        }
        assert!(combos.iter().all(|&c| c > landings / 8), "{:?}", combos);
    }

    #[test]
    fn test_fly_bias_inverts_at_wall() {
        let a = arena();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut f = bug(BugKind::Fly, Vec2::new(400.0, 300.0), 11);
        f.pos = Vec2::new(a.width - f.size / 2.0 - 0.5, 300.0);
        f.vel = Vec2::new(2.0, 0.0);
        if let BugBody::Fly(flight) = &mut f.body {
            flight.bias = Vec2::new(0.15, 0.0);
            flight.reroll_x = 100;
            flight.reroll_y = 100;
        }
        f.step(&a, &mut rng);
        let BugBody::Fly(flight) = &f.body else {
            panic!("expected fly");
        };
        assert_eq!(flight.bias.x, -0.15);
        assert!(f.vel.x < 0.0);
        assert!(a.contains(f.pos, f.size));
    }
}
