//! Fireworks: radial bursts over a fading, persistent frame.
//!
//! The frame is never cleared while fireworks play. Each tick the whole
//! canvas is dimmed by [`GLOBAL_FADE`], which turns the previous particle
//! positions into trails, then every live spark moves and is redrawn.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use super::{Particle, Pool};
use crate::color_math;
use crate::easing::clamp01;
use crate::framebuffer::FrameBuffer;
use crate::math;
use crate::rng::Rng;

/// Maximum concurrent bursts.
pub const MAX_BURSTS: usize = 8;

/// Sparks per burst.
pub const SPARKS_PER_BURST: usize = 25;

/// Initial spark life.
pub const SPARK_LIFE: u16 = 230;

/// Spark life lost per tick.
pub const SPARK_FADE: u16 = 2;

/// Initial burst life.
pub const BURST_LIFE: u16 = 255;

/// Burst life lost per tick.
pub const BURST_FADE: u16 = 2;

/// Multiplicative fade applied to the whole frame each tick.
pub const GLOBAL_FADE: u8 = 230;

/// Per-tick chance (out of 256) of a new burst.
pub const SPAWN_CHANCE: u8 = 28;

/// Radial speed range.
pub const SPEED_MIN: f32 = 1.4;
pub const SPEED_MAX: f32 = 3.2;

/// Per-tick downward acceleration.
pub const GRAVITY: f32 = 0.04;

/// Brightness bump added to each 565 channel when a spark sparkles.
const SPARKLE_BUMP: u8 = 8;

/// One explosion and its sparks.
#[derive(Clone, Debug)]
pub struct Burst {
    pub x: f32,
    pub y: f32,
    pub color: Rgb565,
    /// Chance (out of 256) that a spark flashes brighter this tick.
    pub sparkle: u8,
    pub life: u16,
    pub sparks: Pool<Particle, SPARKS_PER_BURST>,
}

impl Burst {
    /// Burst at `(x, y)`: every spark starts at the origin and flies out along
    /// one of [`SPARKS_PER_BURST`] evenly spaced angles.
    pub fn new(
        x: f32,
        y: f32,
        color: Rgb565,
        sparkle: u8,
        rng: &mut Rng,
    ) -> Self {
        let mut sparks = Pool::new();
        for i in 0..SPARKS_PER_BURST {
            let angle = math::TAU * i as f32 / SPARKS_PER_BURST as f32;
            let speed = SPEED_MIN + rng.below(1000) as f32 / 1000.0 * (SPEED_MAX - SPEED_MIN);
            sparks.spawn(Particle {
                x,
                y,
                vx: math::cos(angle) * speed,
                vy: math::sin(angle) * speed,
                color,
                life: SPARK_LIFE,
            });
        }
        Self {
            x,
            y,
            color,
            sparkle,
            life: BURST_LIFE,
            sparks,
        }
    }

    /// Random burst in the upper part of the screen.
    pub fn random(rng: &mut Rng) -> Self {
        let x = (20 + rng.below(200)) as f32;
        let y = (30 + rng.below(160)) as f32;
        let color = color_math::hue_to_color(rng.hue());
        let sparkle = (32 + rng.below(64)) as u8;
        Self::new(x, y, color, sparkle, rng)
    }

    /// Move and age every spark, drawing the survivors. Returns whether the
    /// burst is still alive.
    pub fn step(
        &mut self,
        fb: &mut FrameBuffer,
        rng: &mut Rng,
    ) -> bool {
        let sparkle = self.sparkle;
        self.sparks.step(|spark| {
            spark.integrate(GRAVITY);
            if !spark.age(SPARK_FADE) {
                return false;
            }
            let mut color = spark.color;
            if rng.chance(sparkle) {
                color = bump(color);
            }
            draw_quad(fb, spark.x, spark.y, color_math::dim(color, spark.life.min(255) as u8));
            true
        });
        self.life = self.life.saturating_sub(BURST_FADE);
        self.life > 0 && !self.sparks.is_empty()
    }
}

/// Raise every native channel by a fixed step, saturating.
fn bump(c: Rgb565) -> Rgb565 {
    Rgb565::new(
        (c.r() + SPARKLE_BUMP).min(Rgb565::MAX_R),
        (c.g() + SPARKLE_BUMP).min(Rgb565::MAX_G),
        (c.b() + SPARKLE_BUMP).min(Rgb565::MAX_B),
    )
}

/// 2x2 pixel quad at the truncated position. Dropped entirely when the anchor
/// pixel is off screen.
fn draw_quad(
    fb: &mut FrameBuffer,
    x: f32,
    y: f32,
    color: Rgb565,
) {
    let (xi, yi) = (x as i32, y as i32);
    if fb.get(xi, yi).is_none() {
        return;
    }
    fb.set(xi, yi, color);
    fb.set(xi + 1, yi, color);
    fb.set(xi, yi + 1, color);
    fb.set(xi + 1, yi + 1, color);
}

/// Burst pool plus the spawn schedule.
#[derive(Clone, Debug, Default)]
pub struct Fireworks {
    bursts: Pool<Burst, MAX_BURSTS>,
}

impl Fireworks {
    pub fn new() -> Self { Self { bursts: Pool::new() } }

    /// Fade the frame, step every burst, then maybe launch a new one.
    pub fn step(
        &mut self,
        fb: &mut FrameBuffer,
        rng: &mut Rng,
    ) {
        fb.dim_all(GLOBAL_FADE);
        self.bursts.step(|burst| burst.step(fb, rng));
        if rng.chance(SPAWN_CHANCE) {
            self.bursts.spawn(Burst::random(rng));
        }
    }

    /// Launch a burst now, if a slot is free.
    pub fn launch(
        &mut self,
        burst: Burst,
    ) -> bool {
        self.bursts.spawn(burst)
    }

    /// Live bursts.
    pub fn burst_count(&self) -> usize { self.bursts.live_count() }

    /// Live sparks across every burst.
    pub fn spark_count(&self) -> usize { self.bursts.iter().map(|b| b.sparks.live_count()).sum() }

    /// Fraction of the spark budget in use.
    pub fn load(&self) -> f32 { clamp01(self.spark_count() as f32 / (MAX_BURSTS * SPARKS_PER_BURST) as f32) }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};

    #[test]
    fn test_sparks_die_after_exactly_115_ticks() {
        let mut rng = Rng::seeded(1);
        let mut fb = FrameBuffer::new();
        let mut burst = Burst::new(120.0, 60.0, WHITE, 0, &mut rng);
        assert_eq!(burst.sparks.live_count(), SPARKS_PER_BURST);
        for tick in 1..=114 {
            burst.step(&mut fb, &mut rng);
            assert_eq!(burst.sparks.live_count(), SPARKS_PER_BURST, "all alive at tick {tick}");
        }
        let alive = burst.step(&mut fb, &mut rng);
        assert_eq!(burst.sparks.live_count(), 0);
        assert!(!alive, "an empty burst is dead");
    }

    #[test]
    fn test_pool_never_exceeds_capacity() {
        let mut rng = Rng::seeded(77);
        let mut fb = FrameBuffer::new();
        let mut fw = Fireworks::new();
        for _ in 0..2000 {
            fw.step(&mut fb, &mut rng);
            fw.launch(Burst::random(&mut rng));
            assert!(fw.burst_count() <= MAX_BURSTS);
            assert!(fw.spark_count() <= MAX_BURSTS * SPARKS_PER_BURST);
            assert!((0.0..=1.0).contains(&fw.load()));
        }
    }

    #[test]
    fn test_trails_fade_without_new_sparks() {
        let mut rng = Rng::seeded(4);
        let mut fb = FrameBuffer::new();
        fb.fill(WHITE);
        for _ in 0..200 {
            fb.dim_all(GLOBAL_FADE);
        }
        assert_eq!(fb.count_not(BLACK), 0);
        let mut fw = Fireworks::new();
        fw.launch(Burst::new(120.0, 120.0, WHITE, 255, &mut rng));
        fw.step(&mut fb, &mut rng);
        assert!(fb.count_not(BLACK) > 0, "sparks are drawn");
    }

    #[test]
    fn test_bump_saturates() {
        assert_eq!(bump(Rgb565::WHITE), Rgb565::WHITE);
        assert_eq!(bump(Rgb565::BLACK), Rgb565::new(8, 8, 8));
    }
}
