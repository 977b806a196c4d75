//! Cyclop: one big breathing eye on a yellow face, the pupil darting to a
//! new spot every second and resting half a second before it moves again.

use super::{Emotion, FrameContext};
use crate::colors::{BLACK, WHITE, YELLOW};
use crate::config::{CENTER_X, CENTER_Y};
use crate::math;
use crate::primitives::fill_circle;

const EYE_R: f32 = 100.0;
const PUPIL_R: i32 = 30;
const PUPIL_RANGE: (i32, i32) = (-50, 51);
const PUPIL_EASE: f32 = 0.1;
const MOVE_INTERVAL_MS: u32 = 1000;
const PAUSE_MS: u32 = 500;
const BREATH_STEP: f32 = 0.03;
const BREATH_DEPTH: f32 = 0.05;

#[derive(Clone, Debug)]
pub struct CyclopFace {
    pupil: (f32, f32),
    target: (f32, f32),
    paused: bool,
    last_move: u32,
    breath_phase: f32,
}

impl CyclopFace {
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        Self {
            pupil: (0.0, 0.0),
            target: (0.0, 0.0),
            paused: false,
            last_move: ctx.now,
            breath_phase: 0.0,
        }
    }

    /// Pupil offset from the eye center, before scaling.
    pub fn pupil(&self) -> (f32, f32) { self.pupil }

    pub fn is_paused(&self) -> bool { self.paused }
}

impl Emotion for CyclopFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        self.breath_phase += BREATH_STEP;
        let scale = 1.0 + BREATH_DEPTH * math::sin(self.breath_phase);

        let since = ctx.now.wrapping_sub(self.last_move);
        if !self.paused && since > MOVE_INTERVAL_MS {
            self.target = (ctx.rng.range(PUPIL_RANGE.0, PUPIL_RANGE.1) as f32, ctx.rng.range(PUPIL_RANGE.0, PUPIL_RANGE.1) as f32);
            self.last_move = ctx.now;
            self.paused = true;
        } else if self.paused && since > PAUSE_MS {
            self.paused = false;
        }
        if !self.paused {
            self.pupil.0 += (self.target.0 - self.pupil.0) * PUPIL_EASE;
            self.pupil.1 += (self.target.1 - self.pupil.1) * PUPIL_EASE;
        }

        ctx.fb.fill(YELLOW);
        fill_circle(ctx.fb, CENTER_X, CENTER_Y, (EYE_R * scale) as i32, WHITE);
        let px = CENTER_X + (self.pupil.0 * scale) as i32;
        let py = CENTER_Y + (self.pupil.1 * scale) as i32;
        fill_circle(ctx.fb, px, py, PUPIL_R, BLACK);
        ctx.within_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotions::testing::Harness;

    #[test]
    fn test_pupil_darts_then_rests() {
        let mut h = Harness::new(6);
        let mut face = CyclopFace::new(&mut h.ctx(0, 0));
        face.draw(&mut h.ctx(500, 0));
        assert!(!face.is_paused());
        assert_eq!(face.pupil(), (0.0, 0.0));

        face.draw(&mut h.ctx(1001, 0));
        assert!(face.is_paused(), "new target chosen");
        face.draw(&mut h.ctx(1600, 0));
        assert!(!face.is_paused(), "rest over");
        let (x, y) = face.pupil();
        assert!(x.abs() <= 50.0 && y.abs() <= 50.0);
    }

    #[test]
    fn test_face_is_yellow() {
        let mut h = Harness::new(6);
        let mut face = CyclopFace::new(&mut h.ctx(0, 0));
        face.draw(&mut h.ctx(20, 0));
        assert_eq!(h.fb.get(2, 2), Some(YELLOW));
        assert_eq!(h.fb.get(CENTER_X, CENTER_Y), Some(BLACK));
        assert_eq!(h.fb.get(CENTER_X, CENTER_Y - 70), Some(WHITE));
    }
}
