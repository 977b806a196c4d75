//! Confuse: a yellow round eye and a blue flat eye that swap sides every
//! half second, over a swirl of translucent fog.

use super::{Emotion, FrameContext};
use crate::colors::{BLUE, YELLOW};
use crate::config::{CENTER_X, CENTER_Y, EYE_DISTANCE};
use crate::eyes::{eye_circle, eye_flat};
use crate::particles::fog::Fog;

/// Time between side swaps.
pub const SWAP_INTERVAL_MS: u32 = 500;

#[derive(Clone, Debug)]
pub struct ConfuseFace {
    fog: Fog,
    swapped: bool,
    last_swap: u32,
}

impl ConfuseFace {
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        Self {
            fog: Fog::new(ctx.rng),
            swapped: false,
            last_swap: ctx.now,
        }
    }

    pub fn swapped(&self) -> bool { self.swapped }
}

impl Emotion for ConfuseFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        if ctx.now.wrapping_sub(self.last_swap) > SWAP_INTERVAL_MS {
            self.swapped = !self.swapped;
            self.last_swap = ctx.now;
        }

        self.fog.step(ctx.fb);

        let (left, right) = (CENTER_X - EYE_DISTANCE, CENTER_X + EYE_DISTANCE);
        if self.swapped {
            eye_flat(ctx.fb, left, CENTER_Y, BLUE);
            eye_circle(ctx.fb, right, CENTER_Y, YELLOW);
        } else {
            eye_circle(ctx.fb, left, CENTER_Y, YELLOW);
            eye_flat(ctx.fb, right, CENTER_Y, BLUE);
        }
        ctx.within_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotions::testing::Harness;

    #[test]
    fn test_eyes_swap_sides() {
        let mut h = Harness::new(1);
        let mut face = ConfuseFace::new(&mut h.ctx(0, 0));
        face.draw(&mut h.ctx(20, 0));
        assert!(!face.swapped());
        assert_eq!(h.fb.get(CENTER_X - EYE_DISTANCE, CENTER_Y), Some(YELLOW));

        face.draw(&mut h.ctx(SWAP_INTERVAL_MS + 1, 0));
        assert!(face.swapped());
        assert_eq!(h.fb.get(CENTER_X + EYE_DISTANCE, CENTER_Y), Some(YELLOW));
        assert_eq!(h.fb.get(CENTER_X - EYE_DISTANCE, CENTER_Y), Some(BLUE));
    }
}
