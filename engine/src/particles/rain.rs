//! Falling rain streaks for the sad face.

use embedded_graphics::pixelcolor::Rgb565;

use super::Pool;
use crate::color_math::rgb;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::framebuffer::FrameBuffer;
use crate::math;
use crate::primitives::vline;
use crate::rng::Rng;

/// Number of drops.
pub const DROP_COUNT: usize = 40;

/// Streak length in pixels.
pub const STREAK_LEN: i32 = 8;

/// Per-tick fall speed range, half-open.
const SPEED: (i32, i32) = (1, 12);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drop {
    pub x: i32,
    pub y: f32,
    pub speed: f32,
}

/// Fixed set of drops that wrap back to the top.
#[derive(Clone, Debug)]
pub struct Rain {
    drops: Pool<Drop, DROP_COUNT>,
}

impl Rain {
    /// Fill every slot with a drop at a random position.
    pub fn new(rng: &mut Rng) -> Self {
        let mut drops = Pool::new();
        for _ in 0..DROP_COUNT {
            drops.spawn(Drop {
                x: rng.below(SCREEN_WIDTH) as i32,
                y: rng.below(SCREEN_HEIGHT) as f32,
                speed: rng.range(SPEED.0, SPEED.1) as f32,
            });
        }
        Self { drops }
    }

    /// Move every drop down and draw it. Drops past the bottom restart at the
    /// top with a new column.
    pub fn step(
        &mut self,
        fb: &mut FrameBuffer,
        now: u32,
        rng: &mut Rng,
    ) {
        for (i, drop) in self.drops.iter_mut().enumerate() {
            drop.y += drop.speed;
            if drop.y > SCREEN_HEIGHT as f32 {
                drop.y = 0.0;
                drop.x = rng.below(SCREEN_WIDTH) as i32;
            }
            vline(fb, drop.x, drop.y as i32, STREAK_LEN, streak_color(now, i));
        }
    }

    /// Number of drops in flight.
    pub fn len(&self) -> usize { self.drops.live_count() }

    pub fn is_empty(&self) -> bool { self.drops.is_empty() }

    pub fn drops(&self) -> impl Iterator<Item = &Drop> { self.drops.iter() }
}

/// Pale blue-gray that pulses per drop.
fn streak_color(
    now: u32,
    index: usize,
) -> Rgb565 {
    let wave = math::sin((now as f32 + index as f32 * 100.0) / 300.0);
    let b = (100.0 + wave * 50.0).clamp(50.0, 180.0) as u8;
    rgb(b, b, b.saturating_add(30))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BLACK;

    #[test]
    fn test_drops_stay_on_screen() {
        let mut rng = Rng::seeded(8);
        let mut rain = Rain::new(&mut rng);
        let mut fb = FrameBuffer::new();
        assert_eq!(rain.len(), DROP_COUNT);
        for tick in 0..500 {
            rain.step(&mut fb, tick * 20, &mut rng);
            for d in rain.drops() {
                assert!((0..240).contains(&d.x));
                assert!((0.0..=240.0).contains(&d.y), "drop at {}", d.y);
            }
        }
        assert!(fb.count_not(BLACK) > 0);
    }

    #[test]
    fn test_streak_color_is_bluish() {
        for i in 0..40 {
            let (r, _, b) = crate::color_math::unpack(streak_color(1234, i));
            assert!(b >= r);
        }
    }
}
