//! Shock: round eyes tremble for three seconds, freeze for one, snap shut
//! for a single frame, then the cycle restarts.

use super::{Emotion, FrameContext};
use crate::colors::WHITE;
use crate::config::{CENTER_X, CENTER_Y, EYE_DISTANCE, EYE_RADIUS};
use crate::easing::PhaseTimeline;
use crate::eyes::{blink_line, circle_eyes};
use crate::math;

const TIMELINE: PhaseTimeline<3> = PhaseTimeline::new([3000, 1000, 1000]);
const TREMBLE_PX: f32 = 10.0;
const TREMBLE_DIVISOR: f32 = 30.0;
const BLINK_H: i32 = 4;

#[derive(Clone, Debug)]
pub struct ShockFace {
    cycle_start: u32,
    blinked: bool,
}

impl ShockFace {
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        Self {
            cycle_start: ctx.now,
            blinked: false,
        }
    }
}

impl Emotion for ShockFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let (left, right) = (CENTER_X - EYE_DISTANCE, CENTER_X + EYE_DISTANCE);
        let e = ctx.now.wrapping_sub(self.cycle_start);
        match TIMELINE.locate(e) {
            Some((0, _)) => {
                let y_off = (math::sin(ctx.now as f32 / TREMBLE_DIVISOR) * TREMBLE_PX) as i32;
                circle_eyes(ctx.fb, left, right, CENTER_Y + y_off, EYE_RADIUS);
            }
            Some((1, _)) => circle_eyes(ctx.fb, left, right, CENTER_Y, EYE_RADIUS),
            Some(_) => {
                if self.blinked {
                    circle_eyes(ctx.fb, left, right, CENTER_Y, EYE_RADIUS);
                } else {
                    let y = CENTER_Y + EYE_RADIUS / 2;
                    blink_line(ctx.fb, left, y, EYE_RADIUS, BLINK_H, WHITE);
                    blink_line(ctx.fb, right, y, EYE_RADIUS, BLINK_H, WHITE);
                    self.blinked = true;
                }
            }
            None => {
                self.cycle_start = ctx.now;
                self.blinked = false;
                circle_eyes(ctx.fb, left, right, CENTER_Y, EYE_RADIUS);
            }
        }
        ctx.within_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BLACK;
    use crate::emotions::testing::Harness;

    #[test]
    fn test_blinks_for_one_frame_per_cycle() {
        let mut h = Harness::new(1);
        let mut face = ShockFace::new(&mut h.ctx(0, 0));

        face.draw(&mut h.ctx(3500, 0));
        assert_eq!(h.fb.get(CENTER_X - EYE_DISTANCE, CENTER_Y), Some(WHITE));

        h.fb.fill(BLACK);
        face.draw(&mut h.ctx(4000, 0));
        assert_eq!(h.fb.get(CENTER_X - EYE_DISTANCE, CENTER_Y), Some(BLACK), "shut frame");

        h.fb.fill(BLACK);
        face.draw(&mut h.ctx(4020, 0));
        assert_eq!(h.fb.get(CENTER_X - EYE_DISTANCE, CENTER_Y), Some(WHITE), "open again");

        face.draw(&mut h.ctx(5000, 0));
        h.fb.fill(BLACK);
        face.draw(&mut h.ctx(9000, 0));
        assert_eq!(h.fb.get(CENTER_X - EYE_DISTANCE, CENTER_Y), Some(BLACK), "next cycle blinks");
    }
}
