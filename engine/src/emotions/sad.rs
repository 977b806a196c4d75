//! Sad: wandering eyes under falling rain. The blink is frozen at whatever
//! closure it had when the emotion started.

use super::{Emotion, FrameContext};
use crate::particles::rain::Rain;

#[derive(Clone, Debug)]
pub struct SadFace {
    rain: Rain,
}

impl SadFace {
    pub fn new(ctx: &mut FrameContext<'_>) -> Self { Self { rain: Rain::new(ctx.rng) } }
}

impl Emotion for SadFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        ctx.eyes.wander(ctx.now, ctx.rng);
        self.rain.step(ctx.fb, ctx.now, ctx.rng);
        ctx.eyes.draw(ctx.fb);
        ctx.within_duration()
    }
}
