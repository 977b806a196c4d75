//! Doubt: one eye swells while the pair spreads apart, holds, then shrinks
//! back. Every cycle re-rolls its timing, size and which eye swells.

use super::{Emotion, FrameContext};
use crate::colors::WHITE;
use crate::config::{CENTER_X, CENTER_Y, EYE_CORNER, EYE_DISTANCE, EYE_HEIGHT, EYE_WIDTH};
use crate::easing::{PhaseTimeline, jittered_ease};
use crate::eyes::eye_box;
use crate::rng::Rng;

const JITTER: f32 = 0.02;

/// Randomized parameters of one swell cycle.
#[derive(Clone, Copy, Debug)]
pub struct DoubtCycle {
    /// Grow, hold, return.
    pub timeline: PhaseTimeline<3>,
    pub max_scale: f32,
    pub spread: i32,
    pub left: bool,
}

impl DoubtCycle {
    pub fn roll(rng: &mut Rng) -> Self {
        let grow = rng.range(80, 301) as u32;
        let hold = rng.range(800, 1501) as u32;
        let back = rng.range(300, 701) as u32;
        Self {
            timeline: PhaseTimeline::new([grow, hold, back]),
            max_scale: 1.20 + rng.range(0, 21) as f32 / 100.0,
            spread: rng.range(4, 12),
            left: rng.coin(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DoubtFace {
    cycle: DoubtCycle,
    cycle_start: u32,
}

impl DoubtFace {
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        Self {
            cycle: DoubtCycle::roll(ctx.rng),
            cycle_start: ctx.now,
        }
    }

    pub fn cycle(&self) -> &DoubtCycle { &self.cycle }
}

fn scaled(
    base: i32,
    s: f32,
) -> i32 {
    (base as f32 * s + 0.5) as i32
}

impl Emotion for DoubtFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let mut e = ctx.now.wrapping_sub(self.cycle_start);
        if e >= self.cycle.timeline.total() {
            self.cycle = DoubtCycle::roll(ctx.rng);
            self.cycle_start = ctx.now;
            e = 0;
        }

        // Swell amount in [0, 1].
        let t = match self.cycle.timeline.locate(e) {
            Some((0, p)) => jittered_ease(p, JITTER, ctx.rng),
            Some((2, p)) => 1.0 - jittered_ease(p, JITTER, ctx.rng),
            _ => 1.0,
        };
        let s = 1.0 + (self.cycle.max_scale - 1.0) * t;
        let dist = EYE_DISTANCE + (self.cycle.spread as f32 * t + 0.5) as i32;

        let big = (scaled(EYE_WIDTH, s), scaled(EYE_HEIGHT, s), scaled(EYE_CORNER, s));
        let normal = (EYE_WIDTH, EYE_HEIGHT, EYE_CORNER);
        let (l, r) = if self.cycle.left { (big, normal) } else { (normal, big) };
        eye_box(ctx.fb, CENTER_X - dist, CENTER_Y, l.0, l.1, l.2, WHITE);
        eye_box(ctx.fb, CENTER_X + dist, CENTER_Y, r.0, r.1, r.2, WHITE);
        ctx.within_duration()
    }
}
