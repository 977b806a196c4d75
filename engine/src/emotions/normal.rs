//! The idle look played as an emotion: tinted background, wandering eyes and
//! the regular blink.

use super::{Emotion, FrameContext};

#[derive(Clone, Debug, Default)]
pub struct NormalFace;

impl NormalFace {
    pub fn new(_ctx: &mut FrameContext<'_>) -> Self { Self }
}

impl Emotion for NormalFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        ctx.tint.draw(ctx.fb, ctx.now, ctx.rng);
        ctx.eyes.wander(ctx.now, ctx.rng);
        ctx.eyes.update_blink(ctx.now, ctx.rng);
        ctx.eyes.draw(ctx.fb);
        ctx.within_duration()
    }
}
