//! Boot intro: colored rings pulse outward, then the eyes fade in and blink.
//!
//! | Phase | Length  | Frame                                           |
//! |-------|---------|-------------------------------------------------|
//! | Rings | 2000 ms | Six expanding outlined rings on black           |
//! | Fade  | 2000 ms | Idle eyes, whole frame dimmed by a smoothstep   |
//! | Blink | 200 ms  | Shut eyes                                       |

use embedded_graphics::pixelcolor::Rgb565;

use crate::color_math::{self, HUE_STEPS};
use crate::colors::BLACK;
use crate::config::{CENTER_X, CENTER_Y};
use crate::easing::{PhaseTimeline, clamp01, ease_out, smoothstep};
use crate::emotions::{Emotion, FrameContext};
use crate::eyes::draw_blinking_eyes;
use crate::framebuffer::FrameBuffer;
use crate::math;
use crate::primitives::draw_circle;

/// Ring phase length.
pub const RING_PHASE_MS: u32 = 2000;

/// Eye fade-in length.
pub const EYES_FADE_MS: u32 = 2000;

/// Final shut-eye blink.
pub const BLINK_MS: u32 = 200;

/// Whole boot sequence.
pub const BOOT_TOTAL_MS: u32 = RING_PHASE_MS + EYES_FADE_MS + BLINK_MS;

const RING_COUNT: usize = 6;
const RING_THICKNESS: i32 = 5;
const RING_SPACING: f32 = 16.0;
const RING_MAX_R: f32 = 100.0;

const TIMELINE: PhaseTimeline<3> = PhaseTimeline::new([RING_PHASE_MS, EYES_FADE_MS, BLINK_MS]);

/// Boot sequence state. Owns a per-run ring palette.
#[derive(Clone, Debug)]
pub struct BootIntro {
    palette: [Rgb565; RING_COUNT],
}

impl BootIntro {
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let base = ctx.rng.hue();
        let step = 8 + ctx.rng.below(32) as u16;
        let palette = core::array::from_fn(|i| color_math::hue_to_color(color_math::hue_add(base, step * i as u16 % HUE_STEPS)));
        ctx.fb.fill(BLACK);
        Self { palette }
    }

    /// Ring colors, innermost first.
    pub fn palette(&self) -> &[Rgb565; RING_COUNT] { &self.palette }

    fn draw_rings(
        &self,
        fb: &mut FrameBuffer,
        t: f32,
    ) {
        let growth = ease_out(t);
        for (i, &base) in self.palette.iter().enumerate() {
            let r = RING_SPACING * i as f32 + growth * RING_MAX_R;
            if r <= RING_MAX_R {
                draw_ring(fb, r, base);
            }
        }
    }
}

/// Thick outline made of concentric one-pixel circles, dimmed toward the rim.
fn draw_ring(
    fb: &mut FrameBuffer,
    radius: f32,
    base: Rgb565,
) {
    let r0 = math::round(radius) as i32;
    let k = clamp01(1.0 - radius / RING_MAX_R);
    let color = color_math::dim(base, (80.0 + 160.0 * k) as u8);
    for t in 0..RING_THICKNESS {
        let rr = r0 + t - RING_THICKNESS / 2;
        if rr > 0 {
            draw_circle(fb, CENTER_X, CENTER_Y, rr, color);
        }
    }
}

impl Emotion for BootIntro {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let elapsed = ctx.elapsed();
        ctx.fb.fill(BLACK);
        match TIMELINE.locate(elapsed) {
            Some((0, t)) => self.draw_rings(ctx.fb, t),
            Some((1, t)) => {
                ctx.eyes.wander(ctx.now, ctx.rng);
                ctx.eyes.update_blink(ctx.now, ctx.rng);
                ctx.eyes.draw(ctx.fb);
                ctx.fb.dim_all((255.0 * smoothstep(t)) as u8);
            }
            _ => draw_blinking_eyes(ctx.fb, CENTER_X as f32, CENTER_Y as f32, 1.0),
        }
        elapsed < BOOT_TOTAL_MS
    }
}

// =============================================================================
// Tests
// =============================================================================
