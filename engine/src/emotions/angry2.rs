//! Angry2: the tops of both eyes are carved into a frown while they flush
//! red, shake for two seconds, then cool back to white. Loops every 3.5 s.

use super::{Emotion, FrameContext};
use crate::color_math::blend;
use crate::colors::{RED, WHITE};
use crate::config::{CENTER_X, CENTER_Y, EYE_CORNER, EYE_DISTANCE, EYE_HEIGHT, EYE_WIDTH};
use crate::easing::{PhaseTimeline, jittered_ease, square_jitter};
use crate::eyes::{carve_top, eye_box};

/// Flush, hold, cool.
pub const TIMELINE: PhaseTimeline<3> = PhaseTimeline::new([1000, 2000, 500]);

/// Deepest carve at the inner corners.
pub const RISE_MAX: f32 = 22.0;

const JITTER: f32 = 0.015;
const SHAKE_STEP_MS: u32 = 60;
const SHAKE_PX: i32 = 2;

#[derive(Clone, Debug, Default)]
pub struct Angry2Face;

impl Angry2Face {
    pub fn new(_ctx: &mut FrameContext<'_>) -> Self { Self }
}

impl Emotion for Angry2Face {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let elapsed = ctx.elapsed();
        let (mut left, mut right) = (CENTER_X - EYE_DISTANCE, CENTER_X + EYE_DISTANCE);

        let (rise, color) = match TIMELINE.locate_looped(elapsed) {
            (0, p) => {
                let t = jittered_ease(p, JITTER, ctx.rng);
                ((RISE_MAX * t + 0.5) as i32, blend(WHITE, RED, t))
            }
            (1, _) => {
                let dx = square_jitter(elapsed, SHAKE_STEP_MS, SHAKE_PX);
                left += dx;
                right += dx;
                (RISE_MAX as i32, RED)
            }
            (_, p) => {
                let t = jittered_ease(p, JITTER, ctx.rng);
                ((RISE_MAX * (1.0 - t) + 0.5) as i32, blend(RED, WHITE, t))
            }
        };

        eye_box(ctx.fb, left, CENTER_Y, EYE_WIDTH, EYE_HEIGHT, EYE_CORNER, color);
        if rise > 0 {
            carve_top(ctx.fb, left, CENTER_Y, 0, rise);
        }
        eye_box(ctx.fb, right, CENTER_Y, EYE_WIDTH, EYE_HEIGHT, EYE_CORNER, color);
        if rise > 0 {
            carve_top(ctx.fb, right, CENTER_Y, rise, 0);
        }
        ctx.within_duration()
    }
}
