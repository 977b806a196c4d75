//! Fixed twinkling stars.
//!
//! A twinkle never moves. Its brightness follows a raised cosine over its own
//! period, offset so that neighbouring stars do not pulse in step.

use embedded_graphics::pixelcolor::Rgb565;

use super::Pool;
use crate::color_math;
use crate::easing::raised_cosine;
use crate::framebuffer::FrameBuffer;
use crate::primitives::sparkle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Twinkle {
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pub offset_ms: u32,
    pub period_ms: u32,
}

impl Twinkle {
    /// Brightness in `[0, 1]` at `t_ms`.
    pub fn brightness(
        &self,
        t_ms: u32,
    ) -> f32 {
        let period = self.period_ms.max(1);
        let phase = (t_ms.wrapping_add(self.offset_ms) % period) as f32 / period as f32;
        raised_cosine(phase)
    }

    /// Draw the star faded by its current brightness.
    pub fn draw(
        &self,
        fb: &mut FrameBuffer,
        t_ms: u32,
        color: Rgb565,
    ) {
        let c = color_math::scale(color, self.brightness(t_ms));
        sparkle(fb, self.x, self.y, self.size, c);
    }
}

/// Bounded set of twinkles drawn in one color.
#[derive(Clone, Debug)]
pub struct Sparkles<const N: usize> {
    stars: Pool<Twinkle, N>,
    color: Rgb565,
}

impl<const N: usize> Sparkles<N> {
    pub fn new(color: Rgb565) -> Self {
        Self {
            stars: Pool::new(),
            color,
        }
    }

    /// Add a star. Ignored once the set is full.
    pub fn add(
        &mut self,
        star: Twinkle,
    ) -> bool {
        self.stars.spawn(star)
    }

    pub fn clear(&mut self) { self.stars.clear(); }

    pub fn len(&self) -> usize { self.stars.live_count() }

    pub fn is_empty(&self) -> bool { self.stars.is_empty() }

    pub fn draw(
        &self,
        fb: &mut FrameBuffer,
        t_ms: u32,
    ) {
        for star in self.stars.iter() {
            star.draw(fb, t_ms, self.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, YELLOW};

    fn star() -> Twinkle {
        Twinkle {
            x: 50,
            y: 50,
            size: 6,
            offset_ms: 0,
            period_ms: 800,
        }
    }

    #[test]
    fn test_brightness_cycle() {
        let s = star();
        assert!(s.brightness(0) < 0.01);
        assert!(s.brightness(400) > 0.99);
        assert!(s.brightness(800) < 0.01, "period wraps");
    }

    #[test]
    fn test_dark_star_draws_black() {
        let mut fb = FrameBuffer::new();
        star().draw(&mut fb, 0, YELLOW);
        assert_eq!(fb.count_not(BLACK), 0);
        star().draw(&mut fb, 400, YELLOW);
        assert_eq!(fb.get(50, 50), Some(YELLOW));
    }

    #[test]
    fn test_set_is_bounded() {
        let mut set: Sparkles<3> = Sparkles::new(YELLOW);
        for _ in 0..5 {
            set.add(star());
        }
        assert_eq!(set.len(), 3);
        set.clear();
        assert!(set.is_empty());
    }
}
