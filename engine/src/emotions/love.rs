//! Love: bobbing heart eyes over two pulsing gradient cheeks.

use super::{Emotion, FrameContext};
use crate::colors::{CHEEK_INNER, CHEEK_OUTER, LOVE_PINK};
use crate::config::{CENTER_X, CENTER_Y, EYE_DISTANCE, EYE_RADIUS};
use crate::framebuffer::FrameBuffer;
use crate::math;
use crate::primitives::{gradient_circle, rotated_ellipse};

const CHEEK_X_OFFSET: i32 = 130;
const CHEEK_Y_OFFSET: i32 = 60;
const CHEEK_RINGS: usize = 8;
const CHEEK_PULSE_HZ: f32 = 0.55;
const CHEEK_PULSE_PX: f32 = 6.0;
const CHEEK_MIN_R: i32 = 6;

const HEART_W: i32 = 20;
const HEART_H: i32 = 30;
const HEART_TILT_DEG: f32 = 45.0;
const BOB_PERIOD_MS: f32 = 300.0;
const BOB_AMPLITUDE: f32 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct LoveFace;

impl LoveFace {
    pub fn new(_ctx: &mut FrameContext<'_>) -> Self { Self }
}

/// Cheek radius at `now`, breathing around the eye radius.
pub fn cheek_radius(now: u32) -> i32 {
    let phase = now as f32 * 0.001 * math::TAU * CHEEK_PULSE_HZ;
    let s = (math::sin(phase) + 1.0) * 0.5;
    (EYE_RADIUS + ((2.0 * s - 1.0) * CHEEK_PULSE_PX) as i32).max(CHEEK_MIN_R)
}

/// Two lobes tilted toward each other.
fn heart(
    fb: &mut FrameBuffer,
    cx: i32,
    y: i32,
) {
    rotated_ellipse(fb, cx - HEART_W / 2, y, HEART_W, HEART_H, -HEART_TILT_DEG, LOVE_PINK);
    rotated_ellipse(fb, cx + HEART_W / 2, y, HEART_W, HEART_H, HEART_TILT_DEG, LOVE_PINK);
}

impl Emotion for LoveFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let r = cheek_radius(ctx.now);
        let cheek_y = CENTER_Y + CHEEK_Y_OFFSET;
        gradient_circle(ctx.fb, CENTER_X - EYE_DISTANCE + CHEEK_X_OFFSET, cheek_y, r, CHEEK_INNER, CHEEK_OUTER, CHEEK_RINGS);
        gradient_circle(ctx.fb, CENTER_X + EYE_DISTANCE - CHEEK_X_OFFSET, cheek_y, r, CHEEK_INNER, CHEEK_OUTER, CHEEK_RINGS);

        let bob = (math::sin(ctx.now as f32 / BOB_PERIOD_MS) * BOB_AMPLITUDE) as i32;
        heart(ctx.fb, CENTER_X - EYE_DISTANCE, CENTER_Y + bob);
        heart(ctx.fb, CENTER_X + EYE_DISTANCE, CENTER_Y + bob);
        ctx.within_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotions::testing::Harness;

    #[test]
    fn test_cheek_radius_stays_near_eye_radius() {
        for now in (0..4000).step_by(37) {
            let r = cheek_radius(now);
            assert!((EYE_RADIUS - 6..=EYE_RADIUS + 6).contains(&r), "r {r} at {now}");
        }
    }

    #[test]
    fn test_hearts_are_pink() {
        let mut h = Harness::new(2);
        let mut face = LoveFace::new(&mut h.ctx(0, 0));
        assert!(face.draw(&mut h.ctx(0, 0)));
        assert!(h.fb.count_not(crate::colors::BLACK) > 0);
        assert_eq!(h.fb.get(CENTER_X - EYE_DISTANCE - HEART_W / 2, CENTER_Y), Some(LOVE_PINK));
    }
}
