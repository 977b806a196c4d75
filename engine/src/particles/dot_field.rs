//! Rejection-sampled dot cloud.
//!
//! Coordinates are drawn biased toward the bottom-right corner, then accepted
//! with a power-law probability that thins the cloud further toward the
//! top-left. Generation stops at the capacity or after a bounded number of
//! attempts, whichever comes first.

use embedded_graphics::pixelcolor::Rgb565;

use super::Pool;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::framebuffer::FrameBuffer;
use crate::math;
use crate::primitives::fill_circle;
use crate::rng::Rng;

/// Maximum dots in one field.
pub const DOT_CAPACITY: usize = 240;

/// Sampling attempts per dot slot.
pub const TRIES_PER_DOT: usize = 12;

const RADIUS_MIN: f32 = 1.5;
const RADIUS_MAX: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dot {
    pub x: i32,
    pub y: i32,
    pub r: i32,
}

/// Uniform float in `[0, 1)` at 1/10000 resolution.
fn frand(rng: &mut Rng) -> f32 { rng.below(10_000) as f32 / 10_000.0 }

/// Uniform draw pushed toward 1 by a cubic bias.
fn biased_high(rng: &mut Rng) -> f32 {
    let r = frand(rng);
    1.0 - r * r * r
}

/// Sample one candidate dot. `None` when the acceptance test rejects it.
///
/// Acceptance probability is `sqrt(x/W * y/H)`.
pub fn sample(rng: &mut Rng) -> Option<Dot> {
    let ux = biased_high(rng);
    let uy = biased_high(rng);
    let x = (ux * (SCREEN_WIDTH - 1) as f32 + 0.5) as i32;
    let y = (uy * (SCREEN_HEIGHT - 1) as f32 + 0.5) as i32;

    let p = math::sqrt((x as f32 / SCREEN_WIDTH as f32) * (y as f32 / SCREEN_HEIGHT as f32));
    if frand(rng) > p {
        return None;
    }

    let rr = RADIUS_MIN + (RADIUS_MAX - RADIUS_MIN) * frand(rng);
    Some(Dot {
        x,
        y,
        r: ((rr + 0.5) as i32).max(1),
    })
}

#[derive(Clone, Debug, Default)]
pub struct DotField {
    dots: Pool<Dot, DOT_CAPACITY>,
}

impl DotField {
    pub fn new() -> Self { Self { dots: Pool::new() } }

    /// Replace the field with a freshly sampled one. Returns the number of
    /// attempts spent.
    pub fn generate(
        &mut self,
        rng: &mut Rng,
    ) -> usize {
        self.dots.clear();
        let max_tries = DOT_CAPACITY * TRIES_PER_DOT;
        let mut tries = 0;
        while self.dots.live_count() < DOT_CAPACITY && tries < max_tries {
            tries += 1;
            if let Some(dot) = sample(rng) {
                self.dots.spawn(dot);
            }
        }
        tries
    }

    pub fn clear(&mut self) { self.dots.clear(); }

    pub fn len(&self) -> usize { self.dots.live_count() }

    pub fn is_empty(&self) -> bool { self.dots.is_empty() }

    pub fn dots(&self) -> impl Iterator<Item = &Dot> { self.dots.iter() }

    pub fn draw(
        &self,
        fb: &mut FrameBuffer,
        color: Rgb565,
    ) {
        for dot in self.dots.iter() {
            fill_circle(fb, dot.x, dot.y, dot.r, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_bounded() {
        let mut rng = Rng::seeded(31);
        let mut field = DotField::new();
        let tries = field.generate(&mut rng);
        assert!(tries <= DOT_CAPACITY * TRIES_PER_DOT);
        assert!(field.len() <= DOT_CAPACITY);
        assert!(!field.is_empty());
        for d in field.dots() {
            assert!((0..240).contains(&d.x) && (0..240).contains(&d.y));
            assert!((1..=5).contains(&d.r));
        }
    }

    #[test]
    fn test_cloud_leans_bottom_right() {
        let mut rng = Rng::seeded(32);
        let mut field = DotField::new();
        field.generate(&mut rng);
        let (mut far, mut near) = (0, 0);
        for d in field.dots() {
            if d.x >= 120 && d.y >= 120 {
                far += 1;
            } else if d.x < 120 && d.y < 120 {
                near += 1;
            }
        }
        assert!(far > near * 4, "far {far} near {near}");
    }

    #[test]
    fn test_clear() {
        let mut rng = Rng::seeded(1);
        let mut field = DotField::new();
        field.generate(&mut rng);
        field.clear();
        assert!(field.is_empty());
    }
}
