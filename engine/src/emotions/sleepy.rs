//! Sleepy: shut eyes bob slowly while little Z glyphs drift up and fade.

use super::{Emotion, FrameContext};
use crate::config::{CENTER_X, CENTER_Y, EYE_WIDTH};
use crate::eyes::draw_blinking_eyes;
use crate::math;
use crate::particles::glyphs::SleepGlyphs;

const WOBBLE_AMP: f32 = 0.085 * EYE_WIDTH as f32;
const WOBBLE_HZ: f32 = 0.48;
const WOBBLE_EASE: f32 = 0.08;

#[derive(Clone, Debug)]
pub struct SleepyFace {
    eye_y: f32,
    phase: f32,
    last_tick: u32,
    glyphs: SleepGlyphs,
}

impl SleepyFace {
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        Self {
            eye_y: CENTER_Y as f32,
            phase: 0.0,
            last_tick: ctx.now,
            glyphs: SleepGlyphs::new(ctx.now),
        }
    }

    /// Current eye line, rounded.
    pub fn eye_line(&self) -> i32 { math::round(self.eye_y) as i32 }

    pub fn glyphs(&self) -> &SleepGlyphs { &self.glyphs }
}

impl Emotion for SleepyFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let dt = ctx.now.wrapping_sub(self.last_tick) as f32 * 0.001;
        self.last_tick = ctx.now;

        let target = CENTER_Y as f32 + WOBBLE_AMP * math::sin(self.phase);
        self.phase += math::TAU * WOBBLE_HZ * dt;
        self.eye_y += (target - self.eye_y) * WOBBLE_EASE;
        let cy = self.eye_line();

        self.glyphs.emit(ctx.now, cy, ctx.rng);
        draw_blinking_eyes(ctx.fb, CENTER_X as f32, cy as f32, 1.0);
        self.glyphs.step(ctx.fb, ctx.now);
        ctx.within_duration()
    }
}
