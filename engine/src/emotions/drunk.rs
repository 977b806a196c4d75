//! Drunk: each eye is a two-and-a-half turn spiral of purple dots, the left
//! one turning clockwise and the right one counter-clockwise.

use embedded_graphics::pixelcolor::Rgb565;

use super::{Emotion, FrameContext};
use crate::color_math::rgb;
use crate::config::{CENTER_X, CENTER_Y, EYE_DISTANCE, EYE_RADIUS};
use crate::framebuffer::FrameBuffer;
use crate::math;
use crate::primitives::fill_circle;

const DOTS: i32 = 70;
const TURNS: f32 = 2.5;
const DOT_R: i32 = 2;
const SPIN_STEP: f32 = 0.1;

#[derive(Clone, Debug, Default)]
pub struct DrunkFace {
    phase_left: f32,
    phase_right: f32,
}

impl DrunkFace {
    pub fn new(_ctx: &mut FrameContext<'_>) -> Self { Self::default() }
}

/// Purple shade of dot `i`, bright at the core and dark at the rim.
pub fn dot_color(i: i32) -> Rgb565 {
    let s = (255 - i * 175 / DOTS) as u8;
    rgb(s, 0, s)
}

fn whirlpool(
    fb: &mut FrameBuffer,
    cx: i32,
    cy: i32,
    phase: f32,
    clockwise: bool,
) {
    let step_a = math::TAU * TURNS / DOTS as f32;
    let step_r = EYE_RADIUS as f32 / DOTS as f32;
    let dir = if clockwise { 1.0 } else { -1.0 };
    for i in 0..DOTS {
        let t = step_a * i as f32 * dir + phase;
        let r = i as f32 * step_r;
        let x = cx + (math::cos(t) * r) as i32;
        let y = cy + (math::sin(t) * r) as i32;
        fill_circle(fb, x, y, DOT_R, dot_color(i));
    }
}

impl Emotion for DrunkFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        self.phase_left += SPIN_STEP;
        self.phase_right -= SPIN_STEP;
        whirlpool(ctx.fb, CENTER_X - EYE_DISTANCE, CENTER_Y, self.phase_left, true);
        whirlpool(ctx.fb, CENTER_X + EYE_DISTANCE, CENTER_Y, self.phase_right, false);
        ctx.within_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BLACK;
    use crate::emotions::testing::Harness;

    #[test]
    fn test_dot_shades_darken_outward() {
        assert_eq!(dot_color(0), rgb(255, 0, 255));
        assert_eq!(dot_color(DOTS), rgb(80, 0, 80));
    }

    #[test]
    fn test_spirals_stay_inside_eye() {
        let mut h = Harness::new(3);
        let mut face = DrunkFace::new(&mut h.ctx(0, 0));
        face.draw(&mut h.ctx(20, 0));
        assert_ne!(h.fb.get(CENTER_X - EYE_DISTANCE, CENTER_Y), Some(BLACK));
        assert_eq!(h.fb.get(CENTER_X, CENTER_Y), Some(BLACK));
        assert_eq!(h.fb.get(CENTER_X - EYE_DISTANCE, CENTER_Y - EYE_RADIUS - 4), Some(BLACK));
    }
}
