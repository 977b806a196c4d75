//! Drifting background tint shown behind the idle eyes.
//!
//! The hue holds for a while, then crossfades along the short arc of the hue
//! wheel to a new random hue. Brightness breathes slowly between a dark and a
//! slightly brighter factor.

use embedded_graphics::pixelcolor::Rgb565;

use crate::color_math;
use crate::easing::smoothstep;
use crate::framebuffer::FrameBuffer;
use crate::math;
use crate::rng::Rng;

/// Darkest brightness factor.
pub const TINT_MIN_FACTOR: u8 = 32;

/// Brightest brightness factor.
pub const TINT_MAX_FACTOR: u8 = 96;

/// Time spent on one hue.
pub const HUE_HOLD_MS: u32 = 2500;

/// Crossfade time between hues.
pub const HUE_FADE_MS: u32 = 1800;

/// Breathing period (0.10 Hz).
pub const BREATH_PERIOD_MS: u32 = 10_000;

/// Hue step between consecutive targets, half-open.
const HUE_STEP: (i32, i32) = (24, 88);

#[derive(Clone, Copy, Debug)]
struct HueFade {
    from: u8,
    to: u8,
    phase_start: u32,
}

/// Idle tint state. Starts lazily on the first frame.
#[derive(Clone, Debug, Default)]
pub struct IdleTint {
    fade: Option<HueFade>,
}

impl IdleTint {
    pub const fn new() -> Self { Self { fade: None } }

    /// Advance the hue schedule and return the tint color for `now`.
    pub fn color(
        &mut self,
        now: u32,
        rng: &mut Rng,
    ) -> Rgb565 {
        let fade = self.fade.get_or_insert_with(|| HueFade {
            from: rng.hue(),
            to: rng.hue(),
            phase_start: now,
        });

        let elapsed = now.wrapping_sub(fade.phase_start);
        let hue = if elapsed < HUE_HOLD_MS {
            fade.from
        } else if elapsed < HUE_HOLD_MS + HUE_FADE_MS {
            let t = smoothstep((elapsed - HUE_HOLD_MS) as f32 / HUE_FADE_MS as f32);
            color_math::hue_lerp(fade.from, fade.to, t)
        } else {
            fade.from = fade.to;
            fade.to = color_math::hue_add(fade.from, rng.range(HUE_STEP.0, HUE_STEP.1) as u16);
            fade.phase_start = now;
            fade.from
        };

        color_math::dim(color_math::hue_to_color(hue), breath_factor(now))
    }

    /// Fill the whole frame with the current tint.
    pub fn draw(
        &mut self,
        fb: &mut FrameBuffer,
        now: u32,
        rng: &mut Rng,
    ) {
        let color = self.color(now, rng);
        fb.fill(color);
    }

    /// Hue the tint is currently resting on or fading from.
    pub fn current_hue(&self) -> Option<u8> { self.fade.map(|f| f.from) }
}

/// Brightness factor of the slow breathing cycle.
pub fn breath_factor(now: u32) -> u8 {
    let phase = (now % BREATH_PERIOD_MS) as f32 / BREATH_PERIOD_MS as f32;
    let breath = 0.5 + 0.5 * math::sin(math::TAU * phase);
    let span = f32::from(TINT_MAX_FACTOR - TINT_MIN_FACTOR);
    TINT_MIN_FACTOR + (span * breath) as u8
}

// =============================================================================
// Tests
// =============================================================================
