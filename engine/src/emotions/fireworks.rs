//! Fireworks: bursts of sparks over a slowly fading frame.

use super::{Emotion, FrameContext};
use crate::particles::fireworks::Fireworks;

#[derive(Clone, Debug, Default)]
pub struct FireworksFace {
    show: Fireworks,
}

impl FireworksFace {
    pub fn new(_ctx: &mut FrameContext<'_>) -> Self { Self { show: Fireworks::new() } }

    pub fn show(&self) -> &Fireworks { &self.show }
}

impl Emotion for FireworksFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        self.show.step(ctx.fb, ctx.rng);
        ctx.within_duration()
    }

    fn keeps_frame(&self) -> bool { true }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BLACK;
    use crate::emotions::testing::Harness;

    #[test]
    fn test_trails_accumulate_on_kept_frame() {
        let mut h = Harness::new(21);
        let mut face = FireworksFace::new(&mut h.ctx(0, 0));
        for tick in 0..120u32 {
            assert!(face.draw(&mut h.ctx(tick * 20, 0)));
        }
        assert!(face.show().burst_count() > 0);
        assert!(h.fb.count_not(BLACK) > 0);
    }
}
