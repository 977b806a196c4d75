//! Cry: after a short pause, tears grow from under both eyes while the face
//! starts to sway. The tears recede and the sway settles at the end.
//!
//! | Phase | Length  | Tears   | Sway          |
//! |-------|---------|---------|---------------|
//! | Intro | 400 ms  | none    | none          |
//! | In    | 1000 ms | growing | growing       |
//! | Hold  | 5000 ms | full    | 10 px         |
//! | Out   | 1000 ms | fading  | settling      |

use embedded_graphics::pixelcolor::Rgb565;

use super::{Emotion, FrameContext};
use crate::colors::{TEAR_BLUE, TEAR_LIGHT, WHITE};
use crate::config::{CENTER_X, CENTER_Y, EYE_DISTANCE, EYE_HEIGHT};
use crate::easing::{PhaseTimeline, ease_in_out};
use crate::eyes::eye_pair;
use crate::framebuffer::FrameBuffer;
use crate::math;
use crate::primitives::fill_round_rect;

pub const TIMELINE: PhaseTimeline<4> = PhaseTimeline::new([400, 1000, 5000, 1000]);

const SWAY_MAX: f32 = 10.0;
const SWAY_HZ: f32 = 1.6;

/// A tear strip: x offset from the eye center, width, full height, corner.
type Tear = (i32, i32, i32, i32);

const LEFT_TEARS: [Tear; 4] = [(-20, 10, 34, 5), (-11, 8, 26, 4), (-5, 12, 44, 6), (6, 8, 24, 4)];
const RIGHT_TEARS: [Tear; 3] = [(-10, 20, 30, 5), (-2, 12, 40, 6), (10, 10, 22, 4)];

#[derive(Clone, Debug, Default)]
pub struct CryFace;

impl CryFace {
    pub fn new(_ctx: &mut FrameContext<'_>) -> Self { Self }
}

/// Tear growth and sway amplitude at `elapsed`.
pub fn tears_and_sway(elapsed: u32) -> (f32, f32) {
    let elapsed = elapsed.min(TIMELINE.total());
    match TIMELINE.locate(elapsed) {
        Some((0, _)) => (0.0, 0.0),
        Some((1, p)) => {
            let k = ease_in_out(p);
            (k, SWAY_MAX * k)
        }
        Some((2, _)) => (1.0, SWAY_MAX),
        Some((_, p)) => {
            let k = ease_in_out(p);
            (1.0 - k, SWAY_MAX * (1.0 - k))
        }
        None => (0.0, 0.0),
    }
}

fn tears(
    fb: &mut FrameBuffer,
    cx: i32,
    cy: i32,
    p: f32,
    set: &[Tear],
    color: Rgb565,
) {
    let base_y = cy + EYE_HEIGHT / 2 - 6;
    for &(dx, w, h, r) in set {
        let len = (h as f32 * p + 0.5) as i32;
        fill_round_rect(fb, cx + dx, base_y, w, len, r, color);
    }
}

impl Emotion for CryFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let elapsed = ctx.elapsed();
        let (p, amp) = tears_and_sway(elapsed);

        let phase = math::TAU * SWAY_HZ * (elapsed.min(TIMELINE.total()) as f32 / 1000.0);
        let wob_x = math::round(amp * math::sin(phase)) as i32;
        let wob_y = math::round(amp * 0.6 * math::sin(phase + 1.3)) as i32;

        let left = CENTER_X - EYE_DISTANCE + wob_x;
        let right = CENTER_X + EYE_DISTANCE + wob_x;
        let cy = CENTER_Y + wob_y;

        if p > 0.0 {
            tears(ctx.fb, left, cy, p, &LEFT_TEARS, TEAR_LIGHT);
            tears(ctx.fb, right, cy, p, &RIGHT_TEARS, TEAR_BLUE);
        }
        eye_pair(ctx.fb, CENTER_X + wob_x, cy, EYE_DISTANCE, WHITE);
        ctx.within_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BLACK;
    use crate::emotions::testing::Harness;

    #[test]
    fn test_phase_envelope() {
        assert_eq!(tears_and_sway(0), (0.0, 0.0));
        assert_eq!(tears_and_sway(399), (0.0, 0.0));
        assert_eq!(tears_and_sway(3000), (1.0, SWAY_MAX));
        let (p, _) = tears_and_sway(7000);
        assert!(p > 0.0 && p < 1.0);
        assert_eq!(tears_and_sway(60_000), (0.0, 0.0));
    }

    #[test]
    fn test_tears_hang_below_eyes() {
        let mut h = Harness::new(2);
        let mut face = CryFace::new(&mut h.ctx(0, 0));
        face.draw(&mut h.ctx(0, 0));
        let below = CENTER_Y + EYE_HEIGHT / 2 + 10;
        assert_eq!(h.fb.get(CENTER_X - EYE_DISTANCE, below), Some(BLACK), "no tears yet");

        h.fb.fill(BLACK);
        face.draw(&mut h.ctx(3000, 0));
        let tear_pixels = h.fb.pixels().filter(|&c| c == TEAR_LIGHT || c == TEAR_BLUE).count();
        assert!(tear_pixels > 500, "{tear_pixels}");
    }
}
