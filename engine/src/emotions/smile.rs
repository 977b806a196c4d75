//! Smile: a black circle rises under each eye to carve a happy arc, giggles,
//! then sinks away. Six yellow sparkles twinkle around the face.

use super::{Emotion, FrameContext};
use crate::colors::{BLACK, WHITE, YELLOW};
use crate::config::{CENTER_X, CENTER_Y, EYE_CORNER, EYE_DISTANCE, EYE_HEIGHT, EYE_WIDTH};
use crate::easing::{PhaseTimeline, ease_in_out};
use crate::eyes::eye_box;
use crate::framebuffer::FrameBuffer;
use crate::math;
use crate::particles::sparkles::{Sparkles, Twinkle};
use crate::primitives::fill_circle;

/// Carve in, giggle, carve out.
pub const TIMELINE: PhaseTimeline<3> = PhaseTimeline::new([500, 2000, 500]);

/// Carve circle offset below the eye center when the smile is off.
const CARVE_Y_OFF: i32 = 100;
/// Carve circle offset at full smile.
const CARVE_Y_ON: i32 = 52;
const CARVE_R: i32 = 60;

const GIGGLE_HZ: f32 = 4.0;
const GIGGLE_Y: f32 = 4.0;
const GIGGLE_R: f32 = 2.0;

const SPARKLE_COUNT: usize = 6;

#[derive(Clone, Debug)]
pub struct SmileFace {
    sparkles: Sparkles<SPARKLE_COUNT>,
}

impl SmileFace {
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let left = CENTER_X - EYE_DISTANCE;
        let right = CENTER_X + EYE_DISTANCE;
        // (x, y, size, base period)
        let layout = [
            (left - 40, CENTER_Y - 60, 6, 600, 500),
            (left + 50, CENTER_Y - 70, 5, 700, 600),
            (right + 42, CENTER_Y - 55, 7, 800, 500),
            (right - 52, CENTER_Y - 68, 5, 650, 700),
            (left - 60, CENTER_Y + 30, 6, 900, 600),
            (right + 58, CENTER_Y + 28, 6, 750, 700),
        ];
        let mut sparkles = Sparkles::new(YELLOW);
        for (x, y, size, period, spread) in layout {
            sparkles.add(Twinkle {
                x,
                y,
                size,
                offset_ms: ctx.rng.range(0, 1000) as u32,
                period_ms: period + ctx.rng.range(0, spread) as u32,
            });
        }
        Self { sparkles }
    }

    pub fn sparkle_count(&self) -> usize { self.sparkles.len() }
}

fn carved_eye(
    fb: &mut FrameBuffer,
    cx: i32,
    y_off: i32,
    r: i32,
) {
    eye_box(fb, cx, CENTER_Y, EYE_WIDTH, EYE_HEIGHT, EYE_CORNER, WHITE);
    if r > 0 {
        fill_circle(fb, cx, CENTER_Y + y_off, r, BLACK);
    }
}

/// Integer lerp rounded to nearest.
fn lerp_i(
    a: i32,
    b: i32,
    t: f32,
) -> i32 {
    a + ((b - a) as f32 * t + 0.5) as i32
}

impl Emotion for SmileFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let (y_off, r) = match TIMELINE.locate_looped(ctx.elapsed()) {
            (0, p) => (lerp_i(CARVE_Y_OFF, CARVE_Y_ON, ease_in_out(p)), CARVE_R),
            (1, _) => {
                let w = math::TAU * GIGGLE_HZ * (ctx.now as f32 / 1000.0);
                let y = CARVE_Y_ON + (GIGGLE_Y * math::sin(w)) as i32;
                let r = (CARVE_R + (GIGGLE_R * math::sin(w * 1.7)) as i32).max(1);
                (y, r)
            }
            (_, p) => (lerp_i(CARVE_Y_ON, CARVE_Y_OFF, ease_in_out(p)), CARVE_R),
        };
        carved_eye(ctx.fb, CENTER_X - EYE_DISTANCE, y_off, r);
        carved_eye(ctx.fb, CENTER_X + EYE_DISTANCE, y_off, r);
        self.sparkles.draw(ctx.fb, ctx.now);
        ctx.within_duration()
    }
}
