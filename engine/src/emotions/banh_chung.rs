//! Banh chung: the eyes morph into green leaf-wrapped cakes tied with double
//! ribbons, bounce while sparkles twinkle across the screen, then morph back.
//! Loops every 4.5 s with a fresh sparkle layout per loop.

use super::{Emotion, FrameContext};
use crate::color_math::blend_rounded;
use crate::colors::{GREEN, RIBBON, WHITE, YELLOW};
use crate::config::{CENTER_X, CENTER_Y, EYE_CORNER, EYE_DISTANCE, EYE_HEIGHT, EYE_WIDTH, SCREEN_WIDTH};
use crate::easing::{PhaseTimeline, ease_in_out};
use crate::eyes::eye_box;
use crate::framebuffer::FrameBuffer;
use crate::math;
use crate::particles::sparkles::{Sparkles, Twinkle};
use crate::primitives::fill_rect;
use crate::rng::Rng;

/// Wrap, hold, unwrap.
pub const TIMELINE: PhaseTimeline<3> = PhaseTimeline::new([500, 3500, 500]);

const GROW_PX: f32 = 6.0;
const CAKE_CORNER: i32 = 8;
const RIBBON_FROM: f32 = 0.15;
const BOUNCE_HZ: f32 = 2.2;
const BOUNCE_PX: f32 = 2.0;

const SPARKLE_COUNT: usize = 10;

#[derive(Clone, Debug)]
pub struct BanhChungFace {
    sparkles: Sparkles<SPARKLE_COUNT>,
    loop_index: u32,
}

impl BanhChungFace {
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let mut face = Self {
            sparkles: Sparkles::new(YELLOW),
            loop_index: 0,
        };
        face.scatter(ctx.rng);
        face
    }

    fn scatter(
        &mut self,
        rng: &mut Rng,
    ) {
        self.sparkles.clear();
        for _ in 0..SPARKLE_COUNT {
            let size = rng.range(4, 8);
            let margin = size + 2;
            let far = SCREEN_WIDTH as i32 - margin;
            self.sparkles.add(Twinkle {
                x: rng.range(margin, far),
                y: rng.range(margin, far),
                size,
                offset_ms: rng.range(0, 1000) as u32,
                period_ms: 600 + rng.range(0, 700) as u32,
            });
        }
    }

    pub fn loop_index(&self) -> u32 { self.loop_index }
}

/// Two vertical and two horizontal straps across a cake of `w` by `h`.
fn ribbons(
    fb: &mut FrameBuffer,
    cx: i32,
    cy: i32,
    w: i32,
    h: i32,
) {
    let band = (w / 14).max(3);
    let gap = band * 6;
    fill_rect(fb, cx - gap / 2 - band / 2, cy - h / 2, band, h, RIBBON);
    fill_rect(fb, cx + gap / 2 - band / 2, cy - h / 2, band, h, RIBBON);
    fill_rect(fb, cx - w / 2, cy - gap / 2 - band / 2, w, band, RIBBON);
    fill_rect(fb, cx - w / 2, cy + gap / 2 - band / 2, w, band, RIBBON);
}

impl Emotion for BanhChungFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let elapsed = ctx.elapsed();
        let index = elapsed / TIMELINE.total();
        if index != self.loop_index {
            self.loop_index = index;
            self.scatter(ctx.rng);
        }

        let (phase, p) = TIMELINE.locate_looped(elapsed);
        let holding = phase == 1;
        let morph = match phase {
            0 => ease_in_out(p),
            1 => 1.0,
            _ => 1.0 - ease_in_out(p),
        };

        let w = EYE_WIDTH + (GROW_PX * morph + 0.5) as i32;
        let h = EYE_HEIGHT + (GROW_PX * morph + 0.5) as i32;
        let r = EYE_CORNER + ((CAKE_CORNER - EYE_CORNER) as f32 * morph + 0.5) as i32;
        let color = blend_rounded(WHITE, GREEN, morph);

        let bounce = if holding {
            (BOUNCE_PX * math::sin(math::TAU * BOUNCE_HZ * ctx.now as f32 / 1000.0)) as i32
        } else {
            0
        };

        for (cx, cy) in [(CENTER_X - EYE_DISTANCE, CENTER_Y + bounce), (CENTER_X + EYE_DISTANCE, CENTER_Y - bounce)] {
            eye_box(ctx.fb, cx, cy, w, h, r, color);
            if morph > RIBBON_FROM {
                ribbons(ctx.fb, cx, cy, w, h);
            }
        }

        if holding {
            self.sparkles.draw(ctx.fb, ctx.now);
        }
        ctx.within_duration()
    }
}
