//! Furious: the eyes squint and slide inward, shake under angled brows while
//! the color burns from white to red, then relax.

use super::{Emotion, FrameContext};
use crate::color_math;
use crate::colors::{RED, WHITE};
use crate::config::{CENTER_X, CENTER_Y, EYE_DISTANCE, EYE_HEIGHT, EYE_RADIUS, EYE_WIDTH};
use crate::easing::{PhaseTimeline, square_jitter};
use crate::eyes::{BrowStyle, brows_angled, eye_box};

/// Squint, shake, relax.
pub const TIMELINE: PhaseTimeline<3> = PhaseTimeline::new([1600, 4400, 400]);

const HEAT_MS: f32 = 6000.0;
const SQUINT_PX: f32 = 25.0;
const SLIDE_PX: f32 = 4.0;
const SHAKE_STEP_MS: u32 = 50;
const SHAKE_PX: i32 = 2;

const BROWS: BrowStyle = BrowStyle {
    extent: 10,
    eye_width: EYE_WIDTH,
    inset: 30,
    thickness: 7,
};

#[derive(Clone, Debug, Default)]
pub struct FuriousFace;

impl FuriousFace {
    pub fn new(_ctx: &mut FrameContext<'_>) -> Self { Self }
}

impl Emotion for FuriousFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let e = ctx.elapsed();
        let color = color_math::blend(WHITE, RED, e as f32 / HEAT_MS);
        let (left, right) = (CENTER_X - EYE_DISTANCE, CENTER_X + EYE_DISTANCE);
        let squinted = EYE_HEIGHT - SQUINT_PX as i32;

        match TIMELINE.locate(e) {
            Some((0, t)) => {
                let h = EYE_HEIGHT - (t * SQUINT_PX) as i32;
                let slide = (t * SLIDE_PX) as i32;
                eye_box(ctx.fb, left + slide, CENTER_Y, EYE_WIDTH, h, EYE_RADIUS, color);
                eye_box(ctx.fb, right - slide, CENTER_Y, EYE_WIDTH, h, EYE_RADIUS, color);
            }
            Some((1, _)) => {
                let shake = square_jitter(e, SHAKE_STEP_MS, SHAKE_PX);
                let slide = SLIDE_PX as i32;
                let (l, r) = (left + slide + shake, right - slide + shake);
                eye_box(ctx.fb, l, CENTER_Y, EYE_WIDTH, squinted, EYE_RADIUS, color);
                eye_box(ctx.fb, r, CENTER_Y, EYE_WIDTH, squinted, EYE_RADIUS, color);
                brows_angled(ctx.fb, l, r, CENTER_Y - EYE_RADIUS - 6, BROWS, color);
            }
            Some((_, t)) => {
                let h = squinted + (t * SQUINT_PX) as i32;
                let slide = ((1.0 - t) * SLIDE_PX) as i32;
                eye_box(ctx.fb, left + slide, CENTER_Y, EYE_WIDTH, h, EYE_RADIUS, color);
                eye_box(ctx.fb, right - slide, CENTER_Y, EYE_WIDTH, h, EYE_RADIUS, color);
            }
            None => {}
        }
        ctx.within_duration()
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::RgbColor;

    use super::*;
    use crate::colors::BLACK;
    use crate::emotions::testing::Harness;

    #[test]
    fn test_squint_then_burn_red() {
        let mut h = Harness::new(1);
        h.duration_ms = 6000;
        let mut face = FuriousFace::new(&mut h.ctx(0, 0));

        face.draw(&mut h.ctx(0, 0));
        assert_eq!(h.fb.get(CENTER_X - EYE_DISTANCE, CENTER_Y), Some(WHITE));

        h.fb.fill(BLACK);
        face.draw(&mut h.ctx(5990, 0));
        let c = h.fb.get(CENTER_X - EYE_DISTANCE + 4, CENTER_Y).unwrap_or(BLACK);
        assert!(c.r() >= 30 && c.g() <= 4, "nearly red: {c:?}");
        assert_eq!(h.fb.get(CENTER_X - EYE_DISTANCE, CENTER_Y - 30), Some(BLACK), "squinted");
    }

    #[test]
    fn test_stops_after_duration() {
        let mut h = Harness::new(1);
        h.duration_ms = 6000;
        let mut face = FuriousFace::new(&mut h.ctx(0, 0));
        assert!(face.draw(&mut h.ctx(6000, 0)));
        assert!(!face.draw(&mut h.ctx(6020, 0)));
    }
}
