//! Deadpool mask: red ring, white slit eyes under a sliding black brow,
//! a scatter of red dots and a red divider down the middle.

use embedded_graphics::prelude::Point;

use super::{Emotion, FrameContext};
use crate::colors::{BLACK, RED, WHITE};
use crate::config::{CENTER_X, CENTER_Y, EYE_DISTANCE, SCREEN_HEIGHT};
use crate::easing::{PhaseTimeline, ease_in_out};
use crate::eyes::eye_box;
use crate::particles::dot_field::DotField;
use crate::primitives::{fill_circle, fill_rect, fill_triangle};

/// Brow in, hold, brow out.
pub const TIMELINE: PhaseTimeline<3> = PhaseTimeline::new([800, 6400, 800]);

const OUTER_R: i32 = 120;
const RING_THICK: i32 = 16;
const EYE_W: i32 = 70;
const EYE_H: i32 = 40;
const EYE_R: i32 = 20;
const BROW_W: i32 = 140;
const BROW_H: i32 = 40;
const BROW_SHIFT: i32 = -25;
const BROW_TRAVEL: f32 = 18.0;
const DIVIDER_W: i32 = 18;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    In,
    Hold,
    Out,
}

#[derive(Clone, Debug)]
pub struct DeadpoolFace {
    dots: DotField,
    stage: Stage,
}

impl DeadpoolFace {
    pub fn new(_ctx: &mut FrameContext<'_>) -> Self {
        Self {
            dots: DotField::new(),
            stage: Stage::Out,
        }
    }

    pub fn dots(&self) -> &DotField { &self.dots }
}

impl Emotion for DeadpoolFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let elapsed = ctx.elapsed().min(TIMELINE.total());
        let (stage, y_off) = match TIMELINE.locate(elapsed) {
            Some((0, p)) => (Stage::In, (ease_in_out(p) * BROW_TRAVEL + 0.5) as i32),
            Some((1, _)) => (Stage::Hold, BROW_TRAVEL as i32),
            Some((_, p)) => (Stage::Out, ((1.0 - ease_in_out(p)) * BROW_TRAVEL + 0.5) as i32),
            None => (Stage::Out, 0),
        };
        if stage != self.stage {
            match stage {
                Stage::In => self.dots.clear(),
                Stage::Hold => {
                    self.dots.generate(ctx.rng);
                }
                Stage::Out => {}
            }
            self.stage = stage;
        }

        fill_circle(ctx.fb, CENTER_X, CENTER_Y, OUTER_R, RED);
        fill_circle(ctx.fb, CENTER_X, CENTER_Y, (OUTER_R - RING_THICK).max(0), BLACK);

        eye_box(ctx.fb, CENTER_X - EYE_DISTANCE, CENTER_Y, EYE_W, EYE_H, EYE_R, WHITE);
        eye_box(ctx.fb, CENTER_X + EYE_DISTANCE, CENTER_Y, EYE_W, EYE_H, EYE_R, WHITE);

        let base_y = CENTER_Y - BROW_H / 2 + y_off + BROW_SHIFT;
        let apex_y = CENTER_Y + BROW_H / 2 + y_off + BROW_SHIFT;
        fill_triangle(
            ctx.fb,
            Point::new(CENTER_X - BROW_W / 2, base_y),
            Point::new(CENTER_X + BROW_W / 2, base_y),
            Point::new(CENTER_X, apex_y),
            BLACK,
        );

        self.dots.draw(ctx.fb, RED);
        fill_rect(ctx.fb, CENTER_X - DIVIDER_W / 2, 0, DIVIDER_W, SCREEN_HEIGHT as i32, RED);
        ctx.within_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotions::testing::Harness;

    #[test]
    fn test_dots_appear_for_hold_only() {
        let mut h = Harness::new(7);
        let mut face = DeadpoolFace::new(&mut h.ctx(0, 0));
        face.draw(&mut h.ctx(400, 0));
        assert!(face.dots().is_empty());
        face.draw(&mut h.ctx(1000, 0));
        assert!(!face.dots().is_empty());
        let held = face.dots().len();
        face.draw(&mut h.ctx(7500, 0));
        assert_eq!(face.dots().len(), held, "dots linger through the brow exit");
    }

    #[test]
    fn test_ring_divider_and_brow() {
        let mut h = Harness::new(7);
        let mut face = DeadpoolFace::new(&mut h.ctx(0, 0));
        face.draw(&mut h.ctx(400, 0));
        assert_eq!(h.fb.get(CENTER_X, 5), Some(RED), "divider");
        assert_eq!(h.fb.get(CENTER_X - OUTER_R + 4, CENTER_Y), Some(RED), "ring");
        // Halfway in, the brow covers the inner top of the left eye.
        assert_eq!(h.fb.get(CENTER_X - 25, CENTER_Y - 12), Some(BLACK));
        assert_eq!(h.fb.get(CENTER_X - EYE_DISTANCE - 30, CENTER_Y + 10), Some(WHITE));
    }

    #[test]
    fn test_reruns_fresh() {
        let mut h = Harness::new(7);
        let (last, _) = h.play(crate::emotion_id::EmotionId::Deadpool, 0, 9000);
        assert_eq!(last, 8000);
    }
}
