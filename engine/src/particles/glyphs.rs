//! Rising, fading sleep glyphs.
//!
//! A small pool of 'Z' characters emitted above the eyes. Each glyph floats
//! upward, sways sideways and fades from light gray to black over its life.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

use super::Pool;
use crate::color_math::rgb;
use crate::config::{CENTER_X, EYE_HEIGHT};
use crate::framebuffer::FrameBuffer;
use crate::math;
use crate::rng::Rng;
use crate::styles::{TOP_LEFT, glyph_font};

/// Glyph pool capacity.
pub const GLYPH_COUNT: usize = 3;

/// Minimum gap between emissions.
pub const EMIT_INTERVAL_MS: u32 = 350;

/// Starting gray level.
const START_GRAY: u32 = 220;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub size: u8,
    pub born_at: u32,
    pub life_ms: u32,
}

impl Glyph {
    /// Gray level at `now`, or `None` once the glyph has expired.
    pub fn gray(
        &self,
        now: u32,
    ) -> Option<u8> {
        let age = now.wrapping_sub(self.born_at);
        if age >= self.life_ms {
            return None;
        }
        Some((START_GRAY - START_GRAY * age / self.life_ms) as u8)
    }
}

#[derive(Clone, Debug)]
pub struct SleepGlyphs {
    glyphs: Pool<Glyph, GLYPH_COUNT>,
    last_emit: u32,
}

impl SleepGlyphs {
    pub fn new(now: u32) -> Self {
        Self {
            glyphs: Pool::new(),
            last_emit: now,
        }
    }

    /// Emit one glyph above an eye line at `eye_y` if the interval has passed
    /// and a slot is free.
    pub fn emit(
        &mut self,
        now: u32,
        eye_y: i32,
        rng: &mut Rng,
    ) {
        if now.wrapping_sub(self.last_emit) < EMIT_INTERVAL_MS {
            return;
        }
        self.last_emit = now;
        self.glyphs.spawn(Glyph {
            x: (CENTER_X + rng.range(-6, 7)) as f32,
            y: (eye_y - (EYE_HEIGHT / 2 + 5)) as f32,
            vy: -0.35 - 0.10 * rng.range(0, 25) as f32,
            size: 1 + rng.range(0, 3) as u8,
            born_at: now,
            life_ms: 1400 + rng.range(0, 600) as u32,
        });
    }

    /// Float, fade and draw every live glyph. Expired glyphs are released.
    pub fn step(
        &mut self,
        fb: &mut FrameBuffer,
        now: u32,
    ) {
        let mut idx = 0;
        self.glyphs.step(|glyph| {
            let slot = idx;
            idx += 1;
            let Some(gray) = glyph.gray(now) else {
                return false;
            };
            glyph.y += glyph.vy;
            let sway = math::sin(0.0025 * now as f32 + 0.6 * slot as f32) * 2.0;
            let position = Point::new((glyph.x + sway) as i32, glyph.y as i32);
            let style = MonoTextStyle::new(glyph_font(glyph.size), rgb(gray, gray, gray));
            Text::with_text_style("Z", position, style, TOP_LEFT).draw(fb).ok();
            true
        });
    }

    pub fn len(&self) -> usize { self.glyphs.live_count() }

    pub fn is_empty(&self) -> bool { self.glyphs.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BLACK;

    #[test]
    fn test_emission_is_rate_limited_and_bounded() {
        let mut rng = Rng::seeded(6);
        let mut zs = SleepGlyphs::new(0);
        zs.emit(100, 120, &mut rng);
        assert!(zs.is_empty(), "first glyph waits for the interval");
        for step in 1..=20 {
            zs.emit(step * EMIT_INTERVAL_MS, 120, &mut rng);
            assert!(zs.len() <= GLYPH_COUNT);
        }
        assert_eq!(zs.len(), GLYPH_COUNT);
    }

    #[test]
    fn test_glyph_fades_then_expires() {
        let g = Glyph {
            x: 120.0,
            y: 80.0,
            vy: -0.5,
            size: 2,
            born_at: 1000,
            life_ms: 1400,
        };
        assert_eq!(g.gray(1000), Some(220));
        assert_eq!(g.gray(1700), Some(110));
        assert_eq!(g.gray(2400), None);
    }

    #[test]
    fn test_glyphs_rise_and_draw() {
        let mut rng = Rng::seeded(9);
        let mut zs = SleepGlyphs::new(0);
        let mut fb = FrameBuffer::new();
        zs.emit(EMIT_INTERVAL_MS, 120, &mut rng);
        zs.step(&mut fb, EMIT_INTERVAL_MS + 20);
        assert!(fb.count_not(BLACK) > 0);
        zs.step(&mut fb, EMIT_INTERVAL_MS + 5000);
        assert!(zs.is_empty(), "expired glyphs are released");
    }
}
